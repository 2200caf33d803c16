//   Copyright 2024 The Tari Project
//   SPDX-License-Identifier: BSD-3-Clause

use archive_common_types::{BlockId, CollectionId, Height, Payload, RegisterPath, SealId, StateCommitment, TransactionId};

use crate::{
    records::{BlockFacts, Collection, Event, Guarantee, Header, Seal, Transaction, TransactionResult},
    StorageError,
};

/// Read access to the index. Implementations allow any number of concurrent readers.
pub trait IndexReader: Send + Sync {
    /// The lowest indexed height. Absent until the first height has been forwarded.
    fn first(&self) -> Result<Height, StorageError>;

    /// The highest durably indexed height. A height is durably indexed iff `last() >= h`.
    fn last(&self) -> Result<Height, StorageError>;

    /// True when no height has ever been indexed.
    fn is_empty(&self) -> Result<bool, StorageError>;

    fn commit(&self, height: Height) -> Result<StateCommitment, StorageError>;

    fn header(&self, height: Height) -> Result<Header, StorageError>;

    /// Events for a height, filtered to the given types. An empty filter returns all.
    fn events(&self, height: Height, types: &[String]) -> Result<Vec<Event>, StorageError>;

    /// For each path, the most recent payload at or below `height`. Paths never written
    /// at or below that height yield `None`.
    fn registers(&self, height: Height, paths: &[RegisterPath]) -> Result<Vec<Option<Payload>>, StorageError>;

    /// The full register state as of `height`: for every register ever written at or
    /// below it, its most recent payload. Used to rebuild the trie on resume.
    fn registers_at(&self, height: Height) -> Result<Vec<(RegisterPath, Payload)>, StorageError>;

    fn height_for_block(&self, id: &BlockId) -> Result<Height, StorageError>;

    fn collection(&self, id: &CollectionId) -> Result<Collection, StorageError>;

    fn collections_by_height(&self, height: Height) -> Result<Vec<CollectionId>, StorageError>;

    fn guarantee(&self, id: &CollectionId) -> Result<Guarantee, StorageError>;

    fn transaction(&self, id: &TransactionId) -> Result<Transaction, StorageError>;

    fn transactions_by_height(&self, height: Height) -> Result<Vec<TransactionId>, StorageError>;

    fn height_for_transaction(&self, id: &TransactionId) -> Result<Height, StorageError>;

    fn result(&self, id: &TransactionId) -> Result<TransactionResult, StorageError>;

    fn seal(&self, id: &SealId) -> Result<Seal, StorageError>;

    fn seals_by_height(&self, height: Height) -> Result<Vec<SealId>, StorageError>;

    /// The highest height whose register payloads are fully indexed.
    fn latest_registers_height(&self) -> Result<Height, StorageError>;
}

/// Write access to the index. Writers are serialized by the backend; every method is a
/// single atomic batch.
pub trait IndexWriter: Send + Sync {
    /// Record the lowest indexed height. Written exactly once; later calls are no-ops.
    fn write_first(&self, height: Height) -> Result<(), StorageError>;

    /// Advance the highest indexed height. Never regresses; an attempt to move it
    /// backwards is a corruption error.
    fn write_last(&self, height: Height) -> Result<(), StorageError>;

    /// Write every block-level fact for one height atomically: header, commit,
    /// collections, guarantees, transactions, results, events, seals, and all
    /// id-to-height mappings.
    fn write_block(&self, facts: &BlockFacts) -> Result<(), StorageError>;

    /// Write a batch of register payloads for one height atomically. Tombstones (empty
    /// payloads) are written like any value.
    fn write_registers(&self, height: Height, registers: &[(RegisterPath, Payload)]) -> Result<(), StorageError>;

    fn write_latest_registers(&self, height: Height) -> Result<(), StorageError>;
}
