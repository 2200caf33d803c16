//   Copyright 2024 The Tari Project
//   SPDX-License-Identifier: BSD-3-Clause

use std::{fs, path::PathBuf};

use archive_mapper::{CheckpointLoader, SourceError};
use archive_state_tree::{RootCheckpoint, StateTrie};
use log::*;

const LOG_TARGET: &str = "archive::node::sources::loader";

/// Reads the codec-encoded genesis register set from disk and rebuilds its trie.
pub struct FileCheckpointLoader {
    path: PathBuf,
}

impl FileCheckpointLoader {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl CheckpointLoader for FileCheckpointLoader {
    fn trie(&self) -> Result<StateTrie, SourceError> {
        let bytes = fs::read(&self.path)
            .map_err(|err| SourceError::fatal(format!("checkpoint {} unreadable: {}", self.path.display(), err)))?;
        let checkpoint: RootCheckpoint = archive_codec::decode(&bytes)
            .map_err(|err| SourceError::fatal(format!("checkpoint {} undecodable: {}", self.path.display(), err)))?;
        info!(
            target: LOG_TARGET,
            "📦 Loaded root checkpoint from {} ({} registers)",
            self.path.display(),
            checkpoint.registers.len()
        );
        checkpoint.into_trie().map_err(SourceError::fatal)
    }
}
