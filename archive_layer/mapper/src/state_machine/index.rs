//   Copyright 2024 The Tari Project
//   SPDX-License-Identifier: BSD-3-Clause

use std::marker::PhantomData;

use archive_storage::{records::BlockFacts, IndexWriter};
use log::*;
use tokio::time;

use crate::{
    state_machine::{MapperContext, MapperEvent},
    Chain,
    MapperError,
    MapperSpec,
    SourceError,
};

const LOG_TARGET: &str = "archive::mapper::index";

/// Fetches every block-level record for the cursor height from the chain and writes
/// them in one atomic batch, then rotates the commit cursor towards the new block's
/// state commitment.
#[derive(Debug)]
pub struct IndexBlock<TSpec>(PhantomData<TSpec>);

impl<TSpec: MapperSpec> IndexBlock<TSpec> {
    pub fn new() -> Self {
        Self(PhantomData)
    }

    pub(super) async fn on_enter(&self, context: &mut MapperContext<TSpec>) -> Result<MapperEvent, MapperError> {
        let height = context.cursor.height;

        let facts = loop {
            match self.fetch(context).await {
                Ok(facts) => break facts,
                Err(SourceError::Unavailable) => {
                    trace!(target: LOG_TARGET, "⏳ Height {} not available yet, waiting", height);
                    time::sleep(context.config.wait_interval).await;
                },
                Err(err) => return Err(MapperError::Chain(err)),
            }
        };

        context.store.write_block(&facts)?;
        debug!(
            target: LOG_TARGET,
            "Indexed block facts for height {} (commit {})", height, facts.commit
        );

        context.cursor.last = context.cursor.next;
        context.cursor.next = facts.commit;

        Ok(MapperEvent::BlockIndexed { height })
    }

    async fn fetch(&self, context: &MapperContext<TSpec>) -> Result<BlockFacts, SourceError> {
        let height = context.cursor.height;
        let chain = &context.chain;

        let header = chain.header(height).await?;
        let commit = chain.commit(height).await?;
        let collections = chain.collections(height).await?;
        let guarantees = chain.guarantees(height).await?;
        let transactions = chain.transactions(height).await?;
        let results = chain.results(height).await?;
        let events = chain.events(height).await?;
        let seals = chain.seals(height).await?;

        Ok(BlockFacts {
            height,
            header,
            commit,
            collections,
            guarantees,
            transactions,
            results,
            events,
            seals,
        })
    }
}
