//   Copyright 2024 The Tari Project
//   SPDX-License-Identifier: BSD-3-Clause

use std::{
    collections::VecDeque,
    fs, io,
    path::{Path, PathBuf},
    sync::Mutex,
};

use archive_common_types::{Height, StateCommitment, TrieUpdate};
use archive_mapper::{Chain, Feeder, SourceError};
use archive_storage::records::{BlockData, Collection, Event, Guarantee, Header, Seal, Transaction, TransactionResult};
use async_trait::async_trait;
use log::*;

const LOG_TARGET: &str = "archive::node::sources::spool";

fn read_block_data(dir: &Path, height: Height) -> Result<Option<BlockData>, SourceError> {
    let path = dir.join(BlockData::file_name(height.as_u64()));
    let bytes = match fs::read(&path) {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(SourceError::fatal(format!("spool file {} unreadable: {}", path.display(), err))),
    };
    let data = archive_codec::decode(&bytes)
        .map_err(|err| SourceError::fatal(format!("spool file {} undecodable: {}", path.display(), err)))?;
    Ok(Some(data))
}

/// The lowest height present in the spool, or `None` while the spool is still empty.
fn scan_root(dir: &Path) -> Result<Option<Height>, SourceError> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(SourceError::fatal(format!("spool dir {} unreadable: {}", dir.display(), err))),
    };
    let mut root: Option<u64> = None;
    for entry in entries {
        let entry = entry.map_err(|err| SourceError::fatal(err.to_string()))?;
        let name = entry.file_name();
        let Some(height) = name
            .to_str()
            .and_then(|name| name.strip_suffix(".blk"))
            .and_then(|height| height.parse::<u64>().ok())
        else {
            continue;
        };
        root = Some(root.map_or(height, |current| current.min(height)));
    }
    Ok(root.map(Height))
}

/// Serves consensus-side block records from the spool. A height whose file has not
/// appeared yet is simply unavailable.
pub struct SpoolChain {
    dir: PathBuf,
    // The last block read, so the eight per-height queries decode the file once.
    cached: Mutex<Option<(Height, BlockData)>>,
}

impl SpoolChain {
    pub fn new(dir: PathBuf) -> Self {
        Self {
            dir,
            cached: Mutex::new(None),
        }
    }

    fn block(&self, height: Height) -> Result<BlockData, SourceError> {
        let mut cached = self.cached.lock().expect("spool cache poisoned");
        if let Some((cached_height, data)) = cached.as_ref() {
            if *cached_height == height {
                return Ok(data.clone());
            }
        }
        let data = read_block_data(&self.dir, height)?.ok_or(SourceError::Unavailable)?;
        *cached = Some((height, data.clone()));
        Ok(data)
    }
}

#[async_trait]
impl Chain for SpoolChain {
    async fn root(&self) -> Result<Height, SourceError> {
        scan_root(&self.dir)?.ok_or(SourceError::Unavailable)
    }

    async fn header(&self, height: Height) -> Result<Header, SourceError> {
        Ok(self.block(height)?.header)
    }

    async fn commit(&self, height: Height) -> Result<StateCommitment, SourceError> {
        Ok(self.block(height)?.final_commit)
    }

    async fn collections(&self, height: Height) -> Result<Vec<Collection>, SourceError> {
        Ok(self.block(height)?.collections)
    }

    async fn guarantees(&self, height: Height) -> Result<Vec<Guarantee>, SourceError> {
        Ok(self.block(height)?.guarantees)
    }

    async fn transactions(&self, height: Height) -> Result<Vec<Transaction>, SourceError> {
        Ok(self.block(height)?.transactions)
    }

    async fn results(&self, height: Height) -> Result<Vec<TransactionResult>, SourceError> {
        Ok(self.block(height)?.results)
    }

    async fn events(&self, height: Height) -> Result<Vec<Event>, SourceError> {
        Ok(self.block(height)?.events)
    }

    async fn seals(&self, height: Height) -> Result<Vec<Seal>, SourceError> {
        Ok(self.block(height)?.seals)
    }
}

/// Streams the spool's trie updates in file order, one update per pull.
pub struct SpoolFeeder {
    dir: PathBuf,
    next_height: Option<Height>,
    pending: VecDeque<TrieUpdate>,
}

impl SpoolFeeder {
    pub fn new(dir: PathBuf) -> Self {
        Self {
            dir,
            next_height: None,
            pending: VecDeque::new(),
        }
    }
}

#[async_trait]
impl Feeder for SpoolFeeder {
    async fn update(&mut self) -> Result<TrieUpdate, SourceError> {
        loop {
            if let Some(update) = self.pending.pop_front() {
                return Ok(update);
            }

            let next_height = match self.next_height {
                Some(height) => height,
                None => {
                    let root = scan_root(&self.dir)?.ok_or(SourceError::Unavailable)?;
                    self.next_height = Some(root);
                    root
                },
            };

            let data = read_block_data(&self.dir, next_height)?.ok_or(SourceError::Unavailable)?;
            debug!(
                target: LOG_TARGET,
                "Feeding {} trie updates from height {}",
                data.trie_updates.len(),
                next_height
            );
            self.pending.extend(data.trie_updates);
            self.next_height = Some(next_height.next());
        }
    }
}
