//   Copyright 2024 The Tari Project
//   SPDX-License-Identifier: BSD-3-Clause

use std::{
    convert::TryFrom,
    fmt::{Display, Formatter},
};

use digest::{consts::U32, generic_array};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A 32-byte hash. All identifiers and commitments in the archive wrap this type.
///
/// Serializes as a hex string in human-readable formats and as raw bytes in binary ones.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FixedHash([u8; FixedHash::BYTE_SIZE]);

#[derive(Debug, thiserror::Error)]
#[error("Invalid fixed hash size: expected {expected} bytes, got {actual}")]
pub struct FixedHashSizeError {
    pub expected: usize,
    pub actual: usize,
}

impl FixedHash {
    pub const BYTE_SIZE: usize = 32;

    pub const fn zero() -> Self {
        Self([0u8; Self::BYTE_SIZE])
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::zero()
    }

    pub const fn byte_size() -> usize {
        Self::BYTE_SIZE
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    pub fn into_array(self) -> [u8; Self::BYTE_SIZE] {
        self.0
    }

    pub fn to_vec(&self) -> Vec<u8> {
        self.0.to_vec()
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    pub fn from_hex(s: &str) -> Result<Self, FixedHashSizeError> {
        let bytes = hex::decode(s).map_err(|_| FixedHashSizeError {
            expected: Self::BYTE_SIZE,
            actual: s.len() / 2,
        })?;
        Self::try_from(bytes.as_slice())
    }
}

impl From<[u8; FixedHash::BYTE_SIZE]> for FixedHash {
    fn from(bytes: [u8; FixedHash::BYTE_SIZE]) -> Self {
        Self(bytes)
    }
}

impl From<generic_array::GenericArray<u8, U32>> for FixedHash {
    fn from(hash: generic_array::GenericArray<u8, U32>) -> Self {
        Self(hash.into())
    }
}

impl TryFrom<&[u8]> for FixedHash {
    type Error = FixedHashSizeError;

    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        let bytes = <[u8; Self::BYTE_SIZE]>::try_from(value).map_err(|_| FixedHashSizeError {
            expected: Self::BYTE_SIZE,
            actual: value.len(),
        })?;
        Ok(Self(bytes))
    }
}

impl TryFrom<Vec<u8>> for FixedHash {
    type Error = FixedHashSizeError;

    fn try_from(value: Vec<u8>) -> Result<Self, Self::Error> {
        Self::try_from(value.as_slice())
    }
}

impl AsRef<[u8]> for FixedHash {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Display for FixedHash {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl Serialize for FixedHash {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            serializer.serialize_str(&self.to_hex())
        } else {
            self.0.serialize(serializer)
        }
    }
}

impl<'de> Deserialize<'de> for FixedHash {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        if deserializer.is_human_readable() {
            let s = String::deserialize(deserializer)?;
            Self::from_hex(&s).map_err(serde::de::Error::custom)
        } else {
            let bytes = <[u8; Self::BYTE_SIZE]>::deserialize(deserializer)?;
            Ok(Self(bytes))
        }
    }
}
