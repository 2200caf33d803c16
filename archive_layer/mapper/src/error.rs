//   Copyright 2024 The Tari Project
//   SPDX-License-Identifier: BSD-3-Clause

use archive_common_types::{Height, RegisterPath, StateCommitment};
use archive_state_tree::StateTreeError;
use archive_storage::StorageError;

use crate::SourceError;

#[derive(Debug, thiserror::Error)]
pub enum MapperError {
    #[error("Store is empty and no root checkpoint is configured")]
    NoCheckpoint,
    #[error("Chain source failure: {0}")]
    Chain(SourceError),
    #[error("Feeder source failure: {0}")]
    Feeder(SourceError),
    #[error("Checkpoint loader failure: {0}")]
    Loader(SourceError),
    #[error("Storage failure: {0}")]
    Storage(#[from] StorageError),
    #[error("State tree failure: {0}")]
    StateTree(#[from] StateTreeError),
    #[error("Reloaded trie for height {height} hashes to {actual}, stored commit is {expected}")]
    CommitMismatch {
        height: Height,
        expected: StateCommitment,
        actual: StateCommitment,
    },
    #[error("Forest is missing the step for commit {commit}")]
    MissingStep { commit: StateCommitment },
    #[error("Trie for commit {commit} is missing changed register {path}")]
    MissingRegister {
        commit: StateCommitment,
        path: RegisterPath,
    },
}
