//   Copyright 2024 The Tari Project
//   SPDX-License-Identifier: BSD-3-Clause

use std::marker::PhantomData;

use archive_common_types::StateCommitment;
use archive_state_tree::StateTrie;
use log::*;
use tokio::time;

use crate::{
    state_machine::{Cursor, MapperContext, MapperEvent},
    Chain,
    CheckpointLoader,
    MapperError,
    MapperSpec,
    SourceError,
};

const LOG_TARGET: &str = "archive::mapper::bootstrap";

/// Seeds the forest with the sentinel empty trie and the root checkpoint trie, and
/// positions the cursor at the spork's root height.
#[derive(Debug)]
pub struct Bootstrap<TSpec>(PhantomData<TSpec>);

impl<TSpec: MapperSpec> Bootstrap<TSpec> {
    pub fn new() -> Self {
        Self(PhantomData)
    }

    pub(super) async fn on_enter(&self, context: &mut MapperContext<TSpec>) -> Result<MapperEvent, MapperError> {
        let empty = StateTrie::new();
        let empty_root = empty.root_hash();
        context.forest.save(empty, vec![], StateCommitment::zero());

        let loader = context.loader.as_ref().ok_or(MapperError::NoCheckpoint)?;
        let checkpoint = loader.trie().map_err(MapperError::Loader)?;
        let paths = checkpoint.paths();
        let checkpoint_root = checkpoint.root_hash();
        info!(
            target: LOG_TARGET,
            "🚀 Loaded root checkpoint with {} registers, commit {}",
            paths.len(),
            checkpoint_root
        );
        context.forest.save(checkpoint, paths, empty_root);

        let root_height = loop {
            match context.chain.root().await {
                Ok(height) => break height,
                Err(SourceError::Unavailable) => time::sleep(context.config.wait_interval).await,
                Err(err) => return Err(MapperError::Chain(err)),
            }
        };

        context.cursor = Cursor {
            height: root_height,
            last: StateCommitment::zero(),
            next: empty_root,
        };
        context.registers.clear();

        Ok(MapperEvent::Bootstrapped { height: root_height })
    }
}
