//   Copyright 2024 The Tari Project
//   SPDX-License-Identifier: BSD-3-Clause

use std::marker::PhantomData;

use archive_storage::IndexWriter;
use log::*;

use crate::{
    state_machine::{MapperContext, MapperEvent},
    MapperError,
    MapperSpec,
};

const LOG_TARGET: &str = "archive::mapper::map";

/// Drains the collected registers into the store in fixed-size atomic batches.
/// Cancellation is observed between batches; an interrupted height replays on resume
/// because `last` has not advanced yet.
#[derive(Debug)]
pub struct MapRegisters<TSpec>(PhantomData<TSpec>);

impl<TSpec: MapperSpec> MapRegisters<TSpec> {
    pub fn new() -> Self {
        Self(PhantomData)
    }

    pub(super) async fn on_enter(&self, context: &mut MapperContext<TSpec>) -> Result<MapperEvent, MapperError> {
        let total = context.registers.len();
        let height = context.cursor.height;

        while !context.registers.is_empty() {
            if context.shutdown.is_cancelled() {
                info!(
                    target: LOG_TARGET,
                    "Interrupted while mapping registers for height {}, {} left unwritten",
                    height,
                    context.registers.len()
                );
                return Ok(MapperEvent::Shutdown);
            }

            let mut batch = Vec::with_capacity(context.config.map_batch_size.min(context.registers.len()));
            while batch.len() < context.config.map_batch_size {
                match context.registers.pop_first() {
                    Some(pair) => batch.push(pair),
                    None => break,
                }
            }
            context.store.write_registers(height, &batch)?;
        }

        debug!(target: LOG_TARGET, "Mapped {} registers for height {}", total, height);
        Ok(MapperEvent::RegistersMapped { count: total })
    }
}
