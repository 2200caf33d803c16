//   Copyright 2024 The Tari Project
//   SPDX-License-Identifier: BSD-3-Clause

//! The file-spool source integration: an execution node drops one codec-encoded
//! block data record per finalized height into a directory, and the archive reads the
//! consensus-side facts and the trie update stream back out of it.

mod loader;
pub use loader::FileCheckpointLoader;

mod spool;
pub use spool::{SpoolChain, SpoolFeeder};
