//   Copyright 2024 The Tari Project
//   SPDX-License-Identifier: BSD-3-Clause

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use archive_codec::Codec;
use archive_common_types::{
    BlockId,
    CollectionId,
    Height,
    Payload,
    RegisterId,
    RegisterPath,
    SealId,
    StateCommitment,
    TransactionId,
};
use archive_invoker::{Invoker, InvokerConfig, InvokerError, RegisterResolver, ScriptVm, VmContext, VmError};
use archive_storage::{
    records::{BlockFacts, Collection, Event, Guarantee, Header, Seal, Transaction, TransactionResult},
    IndexReader,
    IndexWriter,
    StorageError,
};
use archive_storage_rocksdb::RocksIndexStore;
use tempfile::TempDir;

/// Delegates every read to the wrapped store and counts the register lookups, so the
/// tests can observe memoization and caching.
#[derive(Clone)]
struct CountingStore {
    inner: RocksIndexStore,
    register_reads: Arc<AtomicUsize>,
}

impl CountingStore {
    fn new(inner: RocksIndexStore) -> Self {
        Self {
            inner,
            register_reads: Arc::new(AtomicUsize::new(0)),
        }
    }

    fn register_reads(&self) -> usize {
        self.register_reads.load(Ordering::SeqCst)
    }
}

impl IndexReader for CountingStore {
    fn first(&self) -> Result<Height, StorageError> {
        self.inner.first()
    }

    fn last(&self) -> Result<Height, StorageError> {
        self.inner.last()
    }

    fn is_empty(&self) -> Result<bool, StorageError> {
        self.inner.is_empty()
    }

    fn commit(&self, height: Height) -> Result<StateCommitment, StorageError> {
        self.inner.commit(height)
    }

    fn header(&self, height: Height) -> Result<Header, StorageError> {
        self.inner.header(height)
    }

    fn events(&self, height: Height, types: &[String]) -> Result<Vec<Event>, StorageError> {
        self.inner.events(height, types)
    }

    fn registers(&self, height: Height, paths: &[RegisterPath]) -> Result<Vec<Option<Payload>>, StorageError> {
        self.register_reads.fetch_add(1, Ordering::SeqCst);
        self.inner.registers(height, paths)
    }

    fn registers_at(&self, height: Height) -> Result<Vec<(RegisterPath, Payload)>, StorageError> {
        self.inner.registers_at(height)
    }

    fn height_for_block(&self, id: &BlockId) -> Result<Height, StorageError> {
        self.inner.height_for_block(id)
    }

    fn collection(&self, id: &CollectionId) -> Result<Collection, StorageError> {
        self.inner.collection(id)
    }

    fn collections_by_height(&self, height: Height) -> Result<Vec<CollectionId>, StorageError> {
        self.inner.collections_by_height(height)
    }

    fn guarantee(&self, id: &CollectionId) -> Result<Guarantee, StorageError> {
        self.inner.guarantee(id)
    }

    fn transaction(&self, id: &TransactionId) -> Result<Transaction, StorageError> {
        self.inner.transaction(id)
    }

    fn transactions_by_height(&self, height: Height) -> Result<Vec<TransactionId>, StorageError> {
        self.inner.transactions_by_height(height)
    }

    fn height_for_transaction(&self, id: &TransactionId) -> Result<Height, StorageError> {
        self.inner.height_for_transaction(id)
    }

    fn result(&self, id: &TransactionId) -> Result<TransactionResult, StorageError> {
        self.inner.result(id)
    }

    fn seal(&self, id: &SealId) -> Result<Seal, StorageError> {
        self.inner.seal(id)
    }

    fn seals_by_height(&self, height: Height) -> Result<Vec<SealId>, StorageError> {
        self.inner.seals_by_height(height)
    }

    fn latest_registers_height(&self) -> Result<Height, StorageError> {
        self.inner.latest_registers_height()
    }
}

/// Resolves each configured register twice (the second hit must come out of the per-call
/// memo) and echoes context, values, script and arguments into the output.
struct RecordingVm {
    reads: Vec<RegisterId>,
}

impl ScriptVm for RecordingVm {
    fn execute(
        &self,
        context: VmContext,
        script: &[u8],
        arguments: &[Vec<u8>],
        registers: &dyn RegisterResolver,
    ) -> Result<Vec<u8>, VmError> {
        let mut out = Vec::new();
        out.extend_from_slice(&context.height.as_u64().to_be_bytes());
        out.extend_from_slice(context.block_id.as_bytes());
        out.extend_from_slice(&context.timestamp_ms.to_be_bytes());

        for register in &self.reads {
            let first = registers.resolve(register).map_err(to_vm_err)?;
            let second = registers.resolve(register).map_err(to_vm_err)?;
            assert_eq!(first, second);
            if let Some(value) = first {
                out.extend_from_slice(&value);
            }
        }

        out.extend_from_slice(script);
        for argument in arguments {
            out.extend_from_slice(argument);
        }
        Ok(out)
    }
}

fn to_vm_err(err: InvokerError) -> VmError {
    VmError::Execution {
        details: err.to_string(),
    }
}

fn register(key: &[u8]) -> RegisterId {
    RegisterId::new(b"owner".to_vec(), b"controller".to_vec(), key.to_vec())
}

fn seed_store() -> (TempDir, CountingStore) {
    let dir = TempDir::new().unwrap();
    let inner = RocksIndexStore::open(dir.path().join("index.db"), Codec::default()).unwrap();

    for height in [100u64, 101] {
        let height = Height(height);
        inner
            .write_block(&BlockFacts {
                height,
                header: Header {
                    height,
                    block_id: BlockId::from([height.as_u64() as u8; 32]),
                    parent_id: BlockId::default(),
                    timestamp_ms: 1_700_000_000_000 + height.as_u64(),
                    payload_hash: [0u8; 32],
                },
                commit: StateCommitment::from([height.as_u64() as u8; 32]),
                ..Default::default()
            })
            .unwrap();
    }

    let balance = register(b"balance");
    inner
        .write_registers(Height(100), &[(balance.to_path(), Payload::new(balance, b"42".to_vec()))])
        .unwrap();

    inner.write_first(Height(100)).unwrap();
    inner.write_last(Height(101)).unwrap();
    inner.write_latest_registers(Height(101)).unwrap();

    (dir, CountingStore::new(inner))
}

fn invoker(store: &CountingStore, reads: Vec<RegisterId>) -> Invoker<CountingStore, RecordingVm> {
    Invoker::new(store.clone(), RecordingVm { reads }, InvokerConfig::default())
}

#[test]
fn executes_with_fresh_context_and_register_values() {
    let (_dir, store) = seed_store();
    let invoker = invoker(&store, vec![register(b"balance")]);

    let output = invoker
        .execute_script(Height(100), b"script", &[b"arg".to_vec()])
        .unwrap();

    let mut expected = Vec::new();
    expected.extend_from_slice(&100u64.to_be_bytes());
    expected.extend_from_slice(&[100u8; 32]);
    expected.extend_from_slice(&(1_700_000_000_000u64 + 100).to_be_bytes());
    expected.extend_from_slice(b"42");
    expected.extend_from_slice(b"script");
    expected.extend_from_slice(b"arg");
    assert_eq!(output, expected);
}

#[test]
fn memoizes_repeated_reads_within_one_execution() {
    let (_dir, store) = seed_store();
    let invoker = invoker(&store, vec![register(b"balance")]);

    invoker.execute_script(Height(100), b"s", &[]).unwrap();
    assert_eq!(store.register_reads(), 1);
}

#[test]
fn shares_the_cache_across_executions_at_one_height() {
    let (_dir, store) = seed_store();
    let invoker = invoker(&store, vec![register(b"balance")]);

    invoker.execute_script(Height(100), b"s", &[]).unwrap();
    invoker.execute_script(Height(100), b"s", &[]).unwrap();
    assert_eq!(store.register_reads(), 1);
}

#[test]
fn different_heights_resolve_separately() {
    let (_dir, store) = seed_store();
    let invoker = invoker(&store, vec![register(b"balance")]);

    invoker.execute_script(Height(100), b"s", &[]).unwrap();
    invoker.execute_script(Height(101), b"s", &[]).unwrap();
    assert_eq!(store.register_reads(), 2);
}

#[test]
fn absent_registers_resolve_to_none_and_are_cached() {
    let (_dir, store) = seed_store();
    let invoker = invoker(&store, vec![register(b"unheard-of")]);

    let output = invoker.execute_script(Height(100), b"", &[]).unwrap();
    // Context only: the absent register contributes nothing.
    assert_eq!(output.len(), 8 + 32 + 8);

    invoker.execute_script(Height(100), b"", &[]).unwrap();
    assert_eq!(store.register_reads(), 1);
}

#[test]
fn heights_outside_the_indexed_range_are_rejected() {
    let (_dir, store) = seed_store();
    let invoker = invoker(&store, vec![]);

    let err = invoker.execute_script(Height(99), b"s", &[]).unwrap_err();
    assert!(matches!(err, InvokerError::OutOfRange { .. }));
    let err = invoker.execute_script(Height(102), b"s", &[]).unwrap_err();
    assert!(matches!(err, InvokerError::OutOfRange { .. }));
}
