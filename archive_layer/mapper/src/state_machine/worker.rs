//   Copyright 2024 The Tari Project
//   SPDX-License-Identifier: BSD-3-Clause

use std::{future::Future, marker::PhantomData};

use log::*;
use tokio_util::sync::CancellationToken;

use crate::{
    state_machine::{
        bootstrap::Bootstrap,
        collect::Collect,
        forward::Forward,
        index::IndexBlock,
        initialize::Initialize,
        map::MapRegisters,
        resume::Resume,
        update::Update,
        MapperContext,
        MapperEvent,
        MapperState,
    },
    MapperError,
    MapperSpec,
};

const LOG_TARGET: &str = "archive::mapper::worker";

/// Drives the indexing state machine until shutdown or a fatal error.
#[derive(Debug)]
pub struct MapperWorker<TSpec> {
    shutdown: CancellationToken,
    _spec: PhantomData<TSpec>,
}

impl<TSpec: MapperSpec> MapperWorker<TSpec> {
    pub fn new(shutdown: CancellationToken) -> Self {
        Self {
            shutdown,
            _spec: PhantomData,
        }
    }

    pub fn spawn(mut self, mut context: MapperContext<TSpec>) -> tokio::task::JoinHandle<Result<(), MapperError>> {
        tokio::spawn(async move { self.run(&mut context).await })
    }

    pub async fn run(&mut self, context: &mut MapperContext<TSpec>) -> Result<(), MapperError> {
        let mut state = MapperState::Initialize(Initialize::new());
        loop {
            match self.next_event(context, &state).await {
                MapperEvent::Failure { error } => {
                    error!(target: LOG_TARGET, "🚨 Mapper failed in state {}: {}", state, error);
                    return Err(error);
                },
                event => {
                    state = self.transition(state, event);
                },
            }
            if state.is_shutdown() {
                info!(target: LOG_TARGET, "Mapper shut down");
                return Ok(());
            }
        }
    }

    async fn next_event(&self, context: &mut MapperContext<TSpec>, state: &MapperState<TSpec>) -> MapperEvent {
        match state {
            MapperState::Initialize(state) => self.result_or_shutdown(state.on_enter(context)).await,
            MapperState::Bootstrap(state) => self.result_or_shutdown(state.on_enter(context)).await,
            MapperState::Resume(state) => self.result_or_shutdown(state.on_enter(context)).await,
            MapperState::Index(state) => self.result_or_shutdown(state.on_enter(context)).await,
            MapperState::Update(state) => self.result_or_shutdown(state.on_enter(context)).await,
            MapperState::Collect(state) => self.result_or_shutdown(state.on_enter(context)).await,
            MapperState::Map(state) => self.result_or_shutdown(state.on_enter(context)).await,
            MapperState::Forward(state) => self.result_or_shutdown(state.on_enter(context)).await,
            MapperState::Shutdown => MapperEvent::Shutdown,
        }
    }

    fn transition(&mut self, state: MapperState<TSpec>, event: MapperEvent) -> MapperState<TSpec> {
        let state_str = state.to_string();
        let event_str = event.to_string();

        let next_state = match (state, event) {
            (MapperState::Initialize(_), MapperEvent::BootstrapRequired) => MapperState::Bootstrap(Bootstrap::new()),
            (MapperState::Initialize(_), MapperEvent::ResumeRequired) => MapperState::Resume(Resume::new()),
            (MapperState::Bootstrap(_), MapperEvent::Bootstrapped { .. }) => MapperState::Index(IndexBlock::new()),
            (MapperState::Resume(_), MapperEvent::Resumed { .. }) => MapperState::Index(IndexBlock::new()),
            (MapperState::Index(_), MapperEvent::BlockIndexed { .. }) => MapperState::Update(Update::new()),
            (MapperState::Update(_), MapperEvent::CommitReached) => MapperState::Collect(Collect::new()),
            (MapperState::Collect(_), MapperEvent::RegistersCollected { .. }) => {
                MapperState::Map(MapRegisters::new())
            },
            (MapperState::Collect(_), MapperEvent::RegistersSkipped) => MapperState::Forward(Forward::new()),
            (MapperState::Map(_), MapperEvent::RegistersMapped { .. }) => MapperState::Forward(Forward::new()),
            (MapperState::Forward(_), MapperEvent::HeightForwarded { .. }) => MapperState::Index(IndexBlock::new()),
            (_, MapperEvent::Shutdown) => MapperState::Shutdown,
            (state, event) => unreachable!("Invalid state transition from {} via {}", state, event),
        };

        info!(target: LOG_TARGET, "⚙️ TRANSITION: {state_str} --- {event_str} ---> {next_state}");
        next_state
    }

    async fn result_or_shutdown<Fut>(&self, fut: Fut) -> MapperEvent
    where Fut: Future<Output = Result<MapperEvent, MapperError>> {
        let shutdown = self.shutdown.clone();
        let result = tokio::select! {
            _ = shutdown.cancelled() => Ok(MapperEvent::Shutdown),
            ret = fut => ret,
        };

        result.unwrap_or_else(|error| MapperEvent::Failure { error })
    }
}
