//   Copyright 2024 The Tari Project
//   SPDX-License-Identifier: BSD-3-Clause

use std::{
    collections::{HashMap, VecDeque},
    sync::{Arc, Mutex},
    time::Duration,
};

use archive_codec::Codec;
use archive_common_types::{BlockId, Height, Payload, RegisterId, RegisterPath, StateCommitment, TrieUpdate};
use archive_mapper::{
    Chain,
    CheckpointLoader,
    Feeder,
    MapperConfig,
    MapperContext,
    MapperError,
    MapperSpec,
    MapperWorker,
    SourceError,
};
use archive_state_tree::StateTrie;
use archive_storage::{
    records::{BlockFacts, Collection, Event, Guarantee, Header, Seal, Transaction, TransactionResult},
    IndexReader,
};
use archive_storage_rocksdb::RocksIndexStore;
use async_trait::async_trait;
use tempfile::TempDir;
use tokio_util::sync::CancellationToken;

pub struct TestSpec;

impl MapperSpec for TestSpec {
    type Chain = MockChain;
    type Feeder = MockFeeder;
    type Loader = MockLoader;
    type Store = RocksIndexStore;
}

#[derive(Clone)]
pub struct MockChain {
    root: Height,
    blocks: HashMap<Height, BlockFacts>,
    unavailable: Arc<Mutex<HashMap<Height, usize>>>,
}

impl MockChain {
    pub fn new(root: Height) -> Self {
        Self {
            root,
            blocks: HashMap::new(),
            unavailable: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn with_block(mut self, facts: BlockFacts) -> Self {
        self.blocks.insert(facts.height, facts);
        self
    }

    /// Make the next `count` queries for `height` report Unavailable. The counter is
    /// shared between clones so tests can assert it drained.
    pub fn with_unavailable(self, height: Height, count: usize) -> Self {
        self.unavailable.lock().unwrap().insert(height, count);
        self
    }

    pub fn remaining_unavailable(&self, height: Height) -> usize {
        self.unavailable.lock().unwrap().get(&height).copied().unwrap_or(0)
    }

    fn fact<T>(&self, height: Height, read: impl FnOnce(&BlockFacts) -> T) -> Result<T, SourceError> {
        let mut unavailable = self.unavailable.lock().unwrap();
        if let Some(remaining) = unavailable.get_mut(&height) {
            if *remaining > 0 {
                *remaining -= 1;
                return Err(SourceError::Unavailable);
            }
        }
        drop(unavailable);
        self.blocks.get(&height).map(read).ok_or(SourceError::Unavailable)
    }
}

#[async_trait]
impl Chain for MockChain {
    async fn root(&self) -> Result<Height, SourceError> {
        Ok(self.root)
    }

    async fn header(&self, height: Height) -> Result<Header, SourceError> {
        self.fact(height, |facts| facts.header.clone())
    }

    async fn commit(&self, height: Height) -> Result<StateCommitment, SourceError> {
        self.fact(height, |facts| facts.commit)
    }

    async fn collections(&self, height: Height) -> Result<Vec<Collection>, SourceError> {
        self.fact(height, |facts| facts.collections.clone())
    }

    async fn guarantees(&self, height: Height) -> Result<Vec<Guarantee>, SourceError> {
        self.fact(height, |facts| facts.guarantees.clone())
    }

    async fn transactions(&self, height: Height) -> Result<Vec<Transaction>, SourceError> {
        self.fact(height, |facts| facts.transactions.clone())
    }

    async fn results(&self, height: Height) -> Result<Vec<TransactionResult>, SourceError> {
        self.fact(height, |facts| facts.results.clone())
    }

    async fn events(&self, height: Height) -> Result<Vec<Event>, SourceError> {
        self.fact(height, |facts| facts.events.clone())
    }

    async fn seals(&self, height: Height) -> Result<Vec<Seal>, SourceError> {
        self.fact(height, |facts| facts.seals.clone())
    }
}

#[derive(Default)]
pub struct MockFeeder {
    updates: VecDeque<TrieUpdate>,
}

impl MockFeeder {
    pub fn new(updates: Vec<TrieUpdate>) -> Self {
        Self {
            updates: updates.into(),
        }
    }
}

#[async_trait]
impl Feeder for MockFeeder {
    async fn update(&mut self) -> Result<TrieUpdate, SourceError> {
        self.updates.pop_front().ok_or(SourceError::Unavailable)
    }
}

pub struct MockLoader {
    trie: StateTrie,
}

impl MockLoader {
    pub fn new(trie: StateTrie) -> Self {
        Self { trie }
    }
}

impl CheckpointLoader for MockLoader {
    fn trie(&self) -> Result<StateTrie, SourceError> {
        Ok(self.trie.clone())
    }
}

pub fn path(seed: u8) -> RegisterPath {
    RegisterPath::from([seed; 32])
}

pub fn payload(value: &[u8]) -> Payload {
    Payload::new(RegisterId::default(), value.to_vec())
}

/// The genesis trie used across scenarios: p1, p2, p3 with v1, v2, v3.
pub fn checkpoint_trie() -> StateTrie {
    StateTrie::new()
        .update(
            &[path(1), path(2), path(3)],
            &[payload(b"v1"), payload(b"v2"), payload(b"v3")],
        )
        .unwrap()
}

pub fn block_facts(height: u64, commit: StateCommitment) -> BlockFacts {
    let height = Height(height);
    BlockFacts {
        height,
        header: Header {
            height,
            block_id: BlockId::from([height.as_u64() as u8; 32]),
            parent_id: BlockId::from([height.as_u64().saturating_sub(1) as u8; 32]),
            timestamp_ms: 1_700_000_000_000 + height.as_u64(),
            payload_hash: [0u8; 32],
        },
        commit,
        ..Default::default()
    }
}

pub fn open_store() -> (TempDir, RocksIndexStore) {
    let dir = TempDir::new().unwrap();
    let store = RocksIndexStore::open(dir.path().join("index.db"), Codec::default()).unwrap();
    (dir, store)
}

pub fn test_config() -> MapperConfig {
    MapperConfig {
        wait_interval: Duration::from_millis(5),
        ..Default::default()
    }
}

/// Run the mapper until the store's `last` reaches `target`, then shut it down and
/// return the worker's outcome.
pub async fn run_until_last(
    chain: MockChain,
    feeder: MockFeeder,
    loader: Option<MockLoader>,
    store: RocksIndexStore,
    config: MapperConfig,
    target: Height,
) -> Result<(), MapperError> {
    let shutdown = CancellationToken::new();
    let context = MapperContext::<TestSpec>::new(chain, feeder, loader, store.clone(), config, shutdown.clone());
    let worker = MapperWorker::<TestSpec>::new(shutdown.clone());
    let handle = worker.spawn(context);

    let wait = async {
        loop {
            if handle.is_finished() {
                break;
            }
            match store.last() {
                Ok(last) if last >= target => break,
                _ => tokio::time::sleep(Duration::from_millis(5)).await,
            }
        }
    };
    tokio::time::timeout(Duration::from_secs(10), wait)
        .await
        .expect("mapper did not reach the target height in time");

    shutdown.cancel();
    tokio::time::timeout(Duration::from_secs(10), handle)
        .await
        .expect("mapper did not shut down in time")
        .expect("mapper task panicked")
}
