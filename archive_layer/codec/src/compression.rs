//   Copyright 2024 The Tari Project
//   SPDX-License-Identifier: BSD-3-Clause

use std::io::{Read, Write};

use crate::CodecError;

pub const DEFAULT_COMPRESSION_LEVEL: i32 = 3;

/// The record kinds that carry a trained dictionary. Values of any other kind are stored
/// without compression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PayloadKind {
    Payloads,
    Events,
    Transactions,
}

/// Dictionaries trained offline, one per compressed kind. A `None` entry means values of
/// that kind compress without a dictionary.
#[derive(Debug, Clone, Default)]
pub struct CompressionDictionaries {
    pub payloads: Option<Vec<u8>>,
    pub events: Option<Vec<u8>>,
    pub transactions: Option<Vec<u8>>,
}

impl CompressionDictionaries {
    pub fn get(&self, kind: PayloadKind) -> Option<&[u8]> {
        match kind {
            PayloadKind::Payloads => self.payloads.as_deref(),
            PayloadKind::Events => self.events.as_deref(),
            PayloadKind::Transactions => self.transactions.as_deref(),
        }
    }
}

/// Compress into a self-delimiting zstd frame.
pub(crate) fn compress(data: &[u8], dictionary: Option<&[u8]>, level: i32) -> Result<Vec<u8>, CodecError> {
    let mut encoder = match dictionary {
        Some(dict) => zstd::stream::write::Encoder::with_dictionary(Vec::new(), level, dict),
        None => zstd::stream::write::Encoder::new(Vec::new(), level),
    }
    .map_err(CodecError::Compress)?;
    encoder.write_all(data).map_err(CodecError::Compress)?;
    encoder.finish().map_err(CodecError::Compress)
}

/// Decompress a frame produced by [`compress`] with the same dictionary.
pub(crate) fn decompress(data: &[u8], dictionary: Option<&[u8]>) -> Result<Vec<u8>, CodecError> {
    let mut decoder = match dictionary {
        Some(dict) => zstd::stream::read::Decoder::with_dictionary(data, dict),
        None => zstd::stream::read::Decoder::with_buffer(data),
    }
    .map_err(CodecError::Decompress)?;
    let mut out = Vec::new();
    decoder.read_to_end(&mut out).map_err(CodecError::Decompress)?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_without_dictionary() {
        let data = b"some register payload bytes".repeat(10);
        let compressed = compress(&data, None, DEFAULT_COMPRESSION_LEVEL).unwrap();
        let restored = decompress(&compressed, None).unwrap();
        assert_eq!(data, restored.as_slice());
    }

    #[test]
    fn round_trip_with_dictionary() {
        let dict = b"register payload dictionary sample content ".repeat(100);
        let data = b"register payload sample".repeat(20);
        let compressed = compress(&data, Some(&dict), DEFAULT_COMPRESSION_LEVEL).unwrap();
        let restored = decompress(&compressed, Some(&dict)).unwrap();
        assert_eq!(data, restored.as_slice());
    }

    #[test]
    fn empty_input_round_trips() {
        let compressed = compress(&[], None, DEFAULT_COMPRESSION_LEVEL).unwrap();
        let restored = decompress(&compressed, None).unwrap();
        assert!(restored.is_empty());
    }
}
