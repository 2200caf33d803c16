//   Copyright 2024 The Tari Project
//   SPDX-License-Identifier: BSD-3-Clause

mod fixed_hash;
pub use fixed_hash::{FixedHash, FixedHashSizeError};

mod height;
pub use height::Height;

mod ids;
pub use ids::{BlockId, CollectionId, SealId, TransactionId};

mod commitment;
pub use commitment::StateCommitment;

mod register;
pub use register::{RegisterId, RegisterPath};

mod payload;
pub use payload::Payload;

mod trie_update;
pub use trie_update::TrieUpdate;

pub mod hasher;
