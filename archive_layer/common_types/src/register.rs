//   Copyright 2024 The Tari Project
//   SPDX-License-Identifier: BSD-3-Clause

use std::{
    convert::TryFrom,
    fmt::{Display, Formatter},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

use crate::{hasher::archive_hasher, FixedHash, FixedHashSizeError};

/// The address of a register within the state trie.
///
/// Paths are ordered; the payload key space sorts by path bytes first and height second.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
pub struct RegisterPath(FixedHash);

impl RegisterPath {
    pub const BYTE_SIZE: usize = FixedHash::BYTE_SIZE;

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_slice()
    }

    pub fn to_vec(&self) -> Vec<u8> {
        self.0.to_vec()
    }

    pub fn into_array(self) -> [u8; Self::BYTE_SIZE] {
        self.0.into_array()
    }

    /// The bit at `index` (0 = most significant bit of the first byte). Drives trie traversal.
    pub fn bit(&self, index: usize) -> bool {
        let byte = self.0.as_slice()[index / 8];
        (byte >> (7 - (index % 8))) & 1 == 1
    }
}

impl From<FixedHash> for RegisterPath {
    fn from(hash: FixedHash) -> Self {
        Self(hash)
    }
}

impl From<[u8; RegisterPath::BYTE_SIZE]> for RegisterPath {
    fn from(bytes: [u8; RegisterPath::BYTE_SIZE]) -> Self {
        Self(bytes.into())
    }
}

impl TryFrom<&[u8]> for RegisterPath {
    type Error = FixedHashSizeError;

    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        Ok(Self(FixedHash::try_from(value)?))
    }
}

impl AsRef<[u8]> for RegisterPath {
    fn as_ref(&self) -> &[u8] {
        self.0.as_ref()
    }
}

impl FromStr for RegisterPath {
    type Err = FixedHashSizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(FixedHash::from_hex(s)?))
    }
}

impl Display for RegisterPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

/// The `(owner, controller, key)` triple naming a register.
///
/// The triple maps to its trie path through a fixed domain-separated hash; the mapping is
/// part of the on-disk format.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct RegisterId {
    pub owner: Vec<u8>,
    pub controller: Vec<u8>,
    pub key: Vec<u8>,
}

impl RegisterId {
    pub fn new(owner: Vec<u8>, controller: Vec<u8>, key: Vec<u8>) -> Self {
        Self { owner, controller, key }
    }

    pub fn to_path(&self) -> RegisterPath {
        archive_hasher("RegisterPath")
            .chain(&self.owner)
            .chain(&self.controller)
            .chain(&self.key)
            .result()
            .into()
    }
}

impl Display for RegisterId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}/{}/{}",
            hex::encode(&self.owner),
            hex::encode(&self.controller),
            hex::encode(&self.key)
        )
    }
}
