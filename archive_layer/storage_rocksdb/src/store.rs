//   Copyright 2024 The Tari Project
//   SPDX-License-Identifier: BSD-3-Clause

use std::{path::Path, sync::Arc};

use archive_codec::{Codec, PayloadKind};
use archive_common_types::{
    BlockId,
    CollectionId,
    Height,
    Payload,
    RegisterPath,
    SealId,
    StateCommitment,
    TransactionId,
};
use archive_storage::{
    keys,
    records::{BlockFacts, Collection, Event, Guarantee, Header, Seal, Transaction, TransactionResult},
    IndexReader,
    IndexWriter,
    StorageError,
};
use log::*;
use rocksdb::{Direction, IteratorMode, Options, WriteBatch, DB};
use serde::{de::DeserializeOwned, Serialize};

const LOG_TARGET: &str = "archive::storage::rocksdb";

/// The RocksDB-backed index store. Cheap to clone; all clones share one database handle.
/// RocksDB serializes writers internally and allows any number of concurrent readers.
#[derive(Clone)]
pub struct RocksIndexStore {
    db: Arc<DB>,
    codec: Codec,
}

impl RocksIndexStore {
    pub fn open<P: AsRef<Path>>(path: P, codec: Codec) -> Result<Self, StorageError> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        let db = DB::open(&opts, path.as_ref()).map_err(db_err)?;
        info!(target: LOG_TARGET, "💾 Opened index store at {}", path.as_ref().display());
        Ok(Self {
            db: Arc::new(db),
            codec,
        })
    }

    fn get_raw(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StorageError> {
        self.db.get(key).map_err(db_err)
    }

    fn get<T: DeserializeOwned>(
        &self,
        kind: Option<PayloadKind>,
        key: &[u8],
        item: &'static str,
        display_key: &dyn std::fmt::Display,
    ) -> Result<T, StorageError> {
        match self.get_raw(key)? {
            Some(bytes) => Ok(self.codec.decode_value(kind, &bytes)?),
            None => Err(StorageError::not_found(item, display_key)),
        }
    }

    fn put<T: Serialize>(
        &self,
        batch: &mut WriteBatch,
        kind: Option<PayloadKind>,
        key: Vec<u8>,
        value: &T,
    ) -> Result<(), StorageError> {
        let bytes = self.codec.encode_value(kind, value)?;
        batch.put(key, bytes);
        Ok(())
    }

    fn write(&self, batch: WriteBatch) -> Result<(), StorageError> {
        self.db.write(batch).map_err(db_err)
    }

    /// The most recent payload for one register at or below `height`: position a reverse
    /// cursor at `payload ‖ path ‖ BE(height)` and accept the hit only if it still lies
    /// within the register's keyspace.
    fn lookup_register(&self, path: &RegisterPath, height: Height) -> Result<Option<Payload>, StorageError> {
        let seek = keys::payload(path, height);
        let prefix = keys::payload_prefix(path);
        let mut iter = self.db.iterator(IteratorMode::From(&seek, Direction::Reverse));
        match iter.next() {
            None => Ok(None),
            Some(item) => {
                let (key, value) = item.map_err(db_err)?;
                if !key.starts_with(&prefix) {
                    return Ok(None);
                }
                Ok(Some(self.codec.decode_value(Some(PayloadKind::Payloads), &value)?))
            },
        }
    }
}

fn db_err(err: rocksdb::Error) -> StorageError {
    StorageError::Io {
        details: err.to_string(),
    }
}

impl IndexReader for RocksIndexStore {
    fn first(&self) -> Result<Height, StorageError> {
        self.get(None, &keys::first(), "first height", &"first")
    }

    fn last(&self) -> Result<Height, StorageError> {
        self.get(None, &keys::last(), "last height", &"last")
    }

    fn is_empty(&self) -> Result<bool, StorageError> {
        Ok(self.get_raw(&keys::last())?.is_none())
    }

    fn commit(&self, height: Height) -> Result<StateCommitment, StorageError> {
        self.get(None, &keys::commit(height), "commit", &height)
    }

    fn header(&self, height: Height) -> Result<Header, StorageError> {
        self.get(None, &keys::header(height), "header", &height)
    }

    fn events(&self, height: Height, types: &[String]) -> Result<Vec<Event>, StorageError> {
        let events: Vec<Event> = self.get(Some(PayloadKind::Events), &keys::events(height), "events", &height)?;
        if types.is_empty() {
            return Ok(events);
        }
        Ok(events
            .into_iter()
            .filter(|event| types.iter().any(|t| *t == event.event_type))
            .collect())
    }

    fn registers(&self, height: Height, paths: &[RegisterPath]) -> Result<Vec<Option<Payload>>, StorageError> {
        paths.iter().map(|path| self.lookup_register(path, height)).collect()
    }

    fn registers_at(&self, height: Height) -> Result<Vec<(RegisterPath, Payload)>, StorageError> {
        let mut out = Vec::new();
        let mut pending: Option<(RegisterPath, Box<[u8]>)> = None;
        for item in self
            .db
            .iterator(IteratorMode::From(&[keys::PREFIX_PAYLOAD], Direction::Forward))
        {
            let (key, value) = item.map_err(db_err)?;
            let Some((path, key_height)) = keys::parse_payload(&key) else {
                break;
            };
            if key_height > height {
                continue;
            }
            // Versions of one register arrive in ascending height order, so the newest
            // eligible one simply replaces the pending entry.
            if let Some((pending_path, pending_value)) = pending.take() {
                if pending_path != path {
                    out.push((
                        pending_path,
                        self.codec.decode_value(Some(PayloadKind::Payloads), &pending_value)?,
                    ));
                }
            }
            pending = Some((path, value));
        }
        if let Some((pending_path, pending_value)) = pending {
            out.push((
                pending_path,
                self.codec.decode_value(Some(PayloadKind::Payloads), &pending_value)?,
            ));
        }
        Ok(out)
    }

    fn height_for_block(&self, id: &BlockId) -> Result<Height, StorageError> {
        self.get(None, &keys::height_by_block(id), "block height", id)
    }

    fn collection(&self, id: &CollectionId) -> Result<Collection, StorageError> {
        self.get(None, &keys::collection(id), "collection", id)
    }

    fn collections_by_height(&self, height: Height) -> Result<Vec<CollectionId>, StorageError> {
        self.get(None, &keys::collections_by_height(height), "collections", &height)
    }

    fn guarantee(&self, id: &CollectionId) -> Result<Guarantee, StorageError> {
        self.get(None, &keys::guarantee(id), "guarantee", id)
    }

    fn transaction(&self, id: &TransactionId) -> Result<Transaction, StorageError> {
        self.get(Some(PayloadKind::Transactions), &keys::transaction(id), "transaction", id)
    }

    fn transactions_by_height(&self, height: Height) -> Result<Vec<TransactionId>, StorageError> {
        self.get(None, &keys::transactions_by_height(height), "transactions", &height)
    }

    fn height_for_transaction(&self, id: &TransactionId) -> Result<Height, StorageError> {
        self.get(None, &keys::height_by_transaction(id), "transaction height", id)
    }

    fn result(&self, id: &TransactionId) -> Result<TransactionResult, StorageError> {
        self.get(None, &keys::result(id), "transaction result", id)
    }

    fn seal(&self, id: &SealId) -> Result<Seal, StorageError> {
        self.get(None, &keys::seal(id), "seal", id)
    }

    fn seals_by_height(&self, height: Height) -> Result<Vec<SealId>, StorageError> {
        self.get(None, &keys::seals_by_height(height), "seals", &height)
    }

    fn latest_registers_height(&self) -> Result<Height, StorageError> {
        self.get(None, &keys::latest_registers(), "latest register height", &"latest")
    }
}

impl IndexWriter for RocksIndexStore {
    fn write_first(&self, height: Height) -> Result<(), StorageError> {
        if self.get_raw(&keys::first())?.is_some() {
            return Ok(());
        }
        let mut batch = WriteBatch::default();
        self.put(&mut batch, None, keys::first(), &height)?;
        self.write(batch)
    }

    fn write_last(&self, height: Height) -> Result<(), StorageError> {
        if let Some(bytes) = self.get_raw(&keys::last())? {
            let current: Height = self.codec.decode_value(None, &bytes)?;
            if current > height {
                return Err(StorageError::Corruption {
                    details: format!("last height would regress from {} to {}", current, height),
                });
            }
        }
        let mut batch = WriteBatch::default();
        self.put(&mut batch, None, keys::last(), &height)?;
        self.write(batch)
    }

    fn write_block(&self, facts: &BlockFacts) -> Result<(), StorageError> {
        let height = facts.height;
        let mut batch = WriteBatch::default();

        self.put(&mut batch, None, keys::header(height), &facts.header)?;
        self.put(&mut batch, None, keys::commit(height), &facts.commit)?;
        self.put(&mut batch, Some(PayloadKind::Events), keys::events(height), &facts.events)?;
        self.put(&mut batch, None, keys::height_by_block(&facts.header.block_id), &height)?;

        for collection in &facts.collections {
            self.put(&mut batch, None, keys::collection(&collection.id), collection)?;
        }
        self.put(&mut batch, None, keys::collections_by_height(height), &facts.collection_ids())?;

        for guarantee in &facts.guarantees {
            self.put(&mut batch, None, keys::guarantee(&guarantee.collection_id), guarantee)?;
        }

        for transaction in &facts.transactions {
            self.put(
                &mut batch,
                Some(PayloadKind::Transactions),
                keys::transaction(&transaction.id),
                transaction,
            )?;
            self.put(&mut batch, None, keys::height_by_transaction(&transaction.id), &height)?;
        }
        self.put(
            &mut batch,
            None,
            keys::transactions_by_height(height),
            &facts.transaction_ids(),
        )?;

        for result in &facts.results {
            self.put(&mut batch, None, keys::result(&result.transaction_id), result)?;
        }

        for seal in &facts.seals {
            self.put(&mut batch, None, keys::seal(&seal.id), seal)?;
        }
        self.put(&mut batch, None, keys::seals_by_height(height), &facts.seal_ids())?;

        debug!(
            target: LOG_TARGET,
            "Writing block facts for height {} ({} transactions, {} events)",
            height,
            facts.transactions.len(),
            facts.events.len()
        );
        self.write(batch)
    }

    fn write_registers(&self, height: Height, registers: &[(RegisterPath, Payload)]) -> Result<(), StorageError> {
        let mut batch = WriteBatch::default();
        for (path, payload) in registers {
            self.put(&mut batch, Some(PayloadKind::Payloads), keys::payload(path, height), payload)?;
        }
        self.write(batch)
    }

    fn write_latest_registers(&self, height: Height) -> Result<(), StorageError> {
        let mut batch = WriteBatch::default();
        self.put(&mut batch, None, keys::latest_registers(), &height)?;
        self.write(batch)
    }
}
