//   Copyright 2024 The Tari Project
//   SPDX-License-Identifier: BSD-3-Clause

//! Stable binary encoding for archive records, with optional dictionary compression for
//! the high-volume record kinds.
//!
//! Encoding and compression are orthogonal: [`encode`]/[`decode`] are the typed
//! transform, [`Codec`] layers zstd on top for values whose kind carries a trained
//! dictionary. Dictionary bytes are part of the on-disk format; changing them requires a
//! migration.

mod compression;
pub use compression::{CompressionDictionaries, PayloadKind, DEFAULT_COMPRESSION_LEVEL};

mod error;
pub use error::CodecError;

use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};

/// Encode a record with the stable binary encoding.
pub fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>, CodecError> {
    bincode::serialize(value).map_err(CodecError::Encode)
}

/// Decode a record previously produced by [`encode`].
pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, CodecError> {
    bincode::deserialize(bytes).map_err(CodecError::Decode)
}

/// A cheaply cloneable encoder/decoder parametrized by compression dictionaries.
#[derive(Debug, Clone)]
pub struct Codec {
    dictionaries: Arc<CompressionDictionaries>,
    level: i32,
}

impl Default for Codec {
    fn default() -> Self {
        Self::new(CompressionDictionaries::default())
    }
}

impl Codec {
    pub fn new(dictionaries: CompressionDictionaries) -> Self {
        Self {
            dictionaries: Arc::new(dictionaries),
            level: DEFAULT_COMPRESSION_LEVEL,
        }
    }

    pub fn with_level(mut self, level: i32) -> Self {
        self.level = level;
        self
    }

    /// Encode and compress a value of the given kind. `kind = None` skips compression.
    pub fn encode_value<T: Serialize>(&self, kind: Option<PayloadKind>, value: &T) -> Result<Vec<u8>, CodecError> {
        let encoded = encode(value)?;
        match kind {
            Some(kind) => compression::compress(encoded.as_slice(), self.dictionaries.get(kind), self.level),
            None => Ok(encoded),
        }
    }

    /// Decompress and decode a value of the given kind. Must be called with the same
    /// kind the value was written with.
    pub fn decode_value<T: DeserializeOwned>(&self, kind: Option<PayloadKind>, bytes: &[u8]) -> Result<T, CodecError> {
        match kind {
            Some(kind) => {
                let decompressed = compression::decompress(bytes, self.dictionaries.get(kind))?;
                decode(&decompressed)
            },
            None => decode(bytes),
        }
    }
}
