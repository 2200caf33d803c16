//   Copyright 2024 The Tari Project
//   SPDX-License-Identifier: BSD-3-Clause

use std::{
    convert::TryFrom,
    fmt::{Display, Formatter},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

use crate::{FixedHash, FixedHashSizeError};

macro_rules! impl_fixed_hash_id {
    ($ty:ident) => {
        impl $ty {
            pub const fn zero() -> Self {
                Self(FixedHash::zero())
            }

            pub fn is_zero(&self) -> bool {
                self.0.is_zero()
            }

            pub fn hash(&self) -> &FixedHash {
                &self.0
            }

            pub fn as_bytes(&self) -> &[u8] {
                self.0.as_slice()
            }

            pub fn to_vec(&self) -> Vec<u8> {
                self.0.to_vec()
            }
        }

        impl From<FixedHash> for $ty {
            fn from(hash: FixedHash) -> Self {
                Self(hash)
            }
        }

        impl From<[u8; FixedHash::BYTE_SIZE]> for $ty {
            fn from(bytes: [u8; FixedHash::BYTE_SIZE]) -> Self {
                Self(bytes.into())
            }
        }

        impl TryFrom<&[u8]> for $ty {
            type Error = FixedHashSizeError;

            fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
                Ok(Self(FixedHash::try_from(value)?))
            }
        }

        impl AsRef<[u8]> for $ty {
            fn as_ref(&self) -> &[u8] {
                self.0.as_ref()
            }
        }

        impl FromStr for $ty {
            type Err = FixedHashSizeError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(FixedHash::from_hex(s)?))
            }
        }

        impl Display for $ty {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                Display::fmt(&self.0, f)
            }
        }
    };
}

/// Identifies a finalized block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
pub struct BlockId(FixedHash);
impl_fixed_hash_id!(BlockId);

/// Identifies a transaction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
pub struct TransactionId(FixedHash);
impl_fixed_hash_id!(TransactionId);

/// Identifies a collection of transactions guaranteed by a cluster.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
pub struct CollectionId(FixedHash);
impl_fixed_hash_id!(CollectionId);

/// Identifies a block seal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
pub struct SealId(FixedHash);
impl_fixed_hash_id!(SealId);
