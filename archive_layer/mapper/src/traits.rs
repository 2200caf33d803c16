//   Copyright 2024 The Tari Project
//   SPDX-License-Identifier: BSD-3-Clause

use archive_common_types::{Height, StateCommitment, TrieUpdate};
use archive_state_tree::StateTrie;
use archive_storage::records::{Collection, Event, Guarantee, Header, Seal, Transaction, TransactionResult};
use async_trait::async_trait;

/// How a source call fails. `Unavailable` means the source simply has no data yet and
/// the caller should retry after its wait interval; anything else aborts the pipeline.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("Source has no data available yet")]
    Unavailable,
    #[error("Source failure: {details}")]
    Fatal { details: String },
}

impl SourceError {
    pub fn fatal<T: ToString>(details: T) -> Self {
        Self::Fatal {
            details: details.to_string(),
        }
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, SourceError::Unavailable)
    }
}

/// The consensus-side view of the chain, queried per finalized height.
#[async_trait]
pub trait Chain: Send + Sync {
    /// The first height of the spork this source covers.
    async fn root(&self) -> Result<Height, SourceError>;

    async fn header(&self, height: Height) -> Result<Header, SourceError>;

    /// The state commitment after executing the block at `height`.
    async fn commit(&self, height: Height) -> Result<StateCommitment, SourceError>;

    async fn collections(&self, height: Height) -> Result<Vec<Collection>, SourceError>;

    async fn guarantees(&self, height: Height) -> Result<Vec<Guarantee>, SourceError>;

    async fn transactions(&self, height: Height) -> Result<Vec<Transaction>, SourceError>;

    async fn results(&self, height: Height) -> Result<Vec<TransactionResult>, SourceError>;

    async fn events(&self, height: Height) -> Result<Vec<Event>, SourceError>;

    async fn seals(&self, height: Height) -> Result<Vec<Seal>, SourceError>;
}

/// The execution-side stream of trie updates. Updates arrive in no particular order
/// relative to finalized blocks; the mapper reconciles them through the forest.
#[async_trait]
pub trait Feeder: Send + Sync {
    async fn update(&mut self) -> Result<TrieUpdate, SourceError>;
}

/// Provides the serialized genesis trie during bootstrap.
pub trait CheckpointLoader: Send + Sync {
    fn trie(&self) -> Result<StateTrie, SourceError>;
}
