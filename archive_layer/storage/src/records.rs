//   Copyright 2024 The Tari Project
//   SPDX-License-Identifier: BSD-3-Clause

use archive_common_types::{BlockId, CollectionId, Height, SealId, StateCommitment, TransactionId, TrieUpdate};
use serde::{Deserialize, Serialize};

/// The finalized block header, reduced to the fields the archive serves.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Header {
    pub height: Height,
    pub block_id: BlockId,
    pub parent_id: BlockId,
    pub timestamp_ms: u64,
    pub payload_hash: [u8; 32],
}

/// A batch of transactions collected by a cluster.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Collection {
    pub id: CollectionId,
    pub transaction_ids: Vec<TransactionId>,
}

/// A cluster's attestation for a collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Guarantee {
    pub collection_id: CollectionId,
    pub signer_ids: Vec<[u8; 32]>,
    pub signature: Vec<u8>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
pub enum TransactionStatus {
    #[default]
    Unknown,
    Sealed,
    Executed,
    Failed,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Transaction {
    pub id: TransactionId,
    pub script: Vec<u8>,
    pub arguments: Vec<Vec<u8>>,
    pub payer: Vec<u8>,
    pub reference_block_id: BlockId,
    pub gas_limit: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct TransactionResult {
    pub transaction_id: TransactionId,
    pub status: TransactionStatus,
    pub error_message: Option<String>,
}

/// A single event emitted during transaction execution.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Event {
    pub transaction_id: TransactionId,
    pub transaction_index: u32,
    pub event_index: u32,
    pub event_type: String,
    pub payload: Vec<u8>,
}

/// An execution result seal committing a block's final state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Seal {
    pub id: SealId,
    pub block_id: BlockId,
    pub result_id: [u8; 32],
    pub final_state: StateCommitment,
}

/// Everything the execution node emits for one finalized block: the consensus-side
/// records plus the trie updates its chunks produced and the commitment they finalize.
/// This is the input record of the block data stream; nothing of this shape is
/// persisted as-is.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct BlockData {
    pub header: Header,
    pub collections: Vec<Collection>,
    pub guarantees: Vec<Guarantee>,
    pub transactions: Vec<Transaction>,
    pub results: Vec<TransactionResult>,
    pub events: Vec<Event>,
    pub seals: Vec<Seal>,
    pub trie_updates: Vec<TrieUpdate>,
    pub final_commit: StateCommitment,
}

impl BlockData {
    /// The spool file name for a height.
    pub fn file_name(height: u64) -> String {
        format!("{height}.blk")
    }
}

/// Everything indexed for one height in a single atomic write, register payloads
/// excepted (those stream in afterwards in their own batches).
#[derive(Debug, Clone, Default)]
pub struct BlockFacts {
    pub height: Height,
    pub header: Header,
    pub commit: StateCommitment,
    pub collections: Vec<Collection>,
    pub guarantees: Vec<Guarantee>,
    pub transactions: Vec<Transaction>,
    pub results: Vec<TransactionResult>,
    pub events: Vec<Event>,
    pub seals: Vec<Seal>,
}

impl BlockFacts {
    pub fn collection_ids(&self) -> Vec<CollectionId> {
        self.collections.iter().map(|c| c.id).collect()
    }

    pub fn transaction_ids(&self) -> Vec<TransactionId> {
        self.transactions.iter().map(|t| t.id).collect()
    }

    pub fn seal_ids(&self) -> Vec<SealId> {
        self.seals.iter().map(|s| s.id).collect()
    }
}
