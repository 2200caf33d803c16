//   Copyright 2024 The Tari Project
//   SPDX-License-Identifier: BSD-3-Clause

use std::io;

#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("Failed to encode value: {0}")]
    Encode(#[source] bincode::Error),
    #[error("Failed to decode value: {0}")]
    Decode(#[source] bincode::Error),
    #[error("Compression failed: {0}")]
    Compress(#[source] io::Error),
    #[error("Decompression failed: {0}")]
    Decompress(#[source] io::Error),
}
