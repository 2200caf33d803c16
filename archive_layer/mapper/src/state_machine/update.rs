//   Copyright 2024 The Tari Project
//   SPDX-License-Identifier: BSD-3-Clause

use std::marker::PhantomData;

use log::*;
use tokio::time;

use crate::{
    state_machine::{MapperContext, MapperEvent},
    Feeder,
    MapperError,
    MapperSpec,
    SourceError,
};

const LOG_TARGET: &str = "archive::mapper::update";

/// Pulls trie updates from the feeder and applies them to their parent tries until the
/// forest contains the commitment the indexed block finalized.
///
/// Updates whose parent is no longer in the forest target a pruned branch and are
/// discarded.
#[derive(Debug)]
pub struct Update<TSpec>(PhantomData<TSpec>);

impl<TSpec: MapperSpec> Update<TSpec> {
    pub fn new() -> Self {
        Self(PhantomData)
    }

    pub(super) async fn on_enter(&self, context: &mut MapperContext<TSpec>) -> Result<MapperEvent, MapperError> {
        loop {
            if context.forest.has(&context.cursor.next) {
                return Ok(MapperEvent::CommitReached);
            }

            let mut update = match context.feeder.update().await {
                Ok(update) => update,
                Err(SourceError::Unavailable) => {
                    trace!(target: LOG_TARGET, "⏳ No trie update available yet, waiting");
                    time::sleep(context.config.wait_interval).await;
                    continue;
                },
                Err(err) => return Err(MapperError::Feeder(err)),
            };

            update.canonicalize();

            let Some(parent) = context.forest.tree(&update.parent_commit) else {
                info!(
                    target: LOG_TARGET,
                    "🗑️ Discarding trie update with unknown parent {} ({} paths)",
                    update.parent_commit,
                    update.len()
                );
                continue;
            };

            let trie = parent.update(&update.paths, &update.payloads)?;
            debug!(
                target: LOG_TARGET,
                "Applied trie update: {} -> {} ({} paths)",
                update.parent_commit,
                trie.root_hash(),
                update.len()
            );
            context.forest.save(trie, update.paths, update.parent_commit);
        }
    }
}
