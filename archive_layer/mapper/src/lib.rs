//   Copyright 2024 The Tari Project
//   SPDX-License-Identifier: BSD-3-Clause

//! The indexing pipeline: a state machine bridging the consensus-side block stream and
//! the execution-side trie update stream into a complete per-height index.
//!
//! The machine walks `Initialize → (Bootstrap | Resume) → Index → Update → Collect →
//! Map → Forward → Index → …`, holding the tries seen between two finalized blocks in a
//! forest and pruning it once a height is durably indexed.

mod config;
pub use config::MapperConfig;

mod error;
pub use error::MapperError;

mod traits;
pub use traits::{Chain, CheckpointLoader, Feeder, SourceError};

mod spec;
pub use spec::MapperSpec;

mod state_machine;
pub use state_machine::{Cursor, MapperContext, MapperWorker};
