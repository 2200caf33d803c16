//   Copyright 2024 The Tari Project
//   SPDX-License-Identifier: BSD-3-Clause

//! The sparse Merkle trie holding the register state, and the forest of tries held
//! between two consecutive finalized blocks.
//!
//! Tries are immutable persistent structures: an update returns a new trie sharing
//! unchanged subtries with its parent, so the forest holds many siblings cheaply. Nodes
//! are content-addressed; a trie is identified by its root commitment.

mod error;
pub use error::StateTreeError;

mod tree;
pub use tree::{empty_trie_hash, StateTrie};

mod forest;
pub use forest::{Forest, Step};

mod checkpoint;
pub use checkpoint::RootCheckpoint;
