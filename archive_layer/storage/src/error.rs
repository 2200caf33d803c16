//   Copyright 2024 The Tari Project
//   SPDX-License-Identifier: BSD-3-Clause

use archive_codec::CodecError;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Could not find {item} with key {key}")]
    NotFound { item: &'static str, key: String },
    #[error("Invalid query: {details}")]
    Invalid { details: String },
    #[error("Store corruption: {details}")]
    Corruption { details: String },
    #[error("Store I/O failure: {details}")]
    Io { details: String },
    #[error("Codec failure: {0}")]
    Codec(#[from] CodecError),
}

impl StorageError {
    pub fn not_found<K: ToString>(item: &'static str, key: K) -> Self {
        Self::NotFound {
            item,
            key: key.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, StorageError::NotFound { .. })
    }
}
