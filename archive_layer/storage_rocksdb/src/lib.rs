//   Copyright 2024 The Tari Project
//   SPDX-License-Identifier: BSD-3-Clause

//! RocksDB backend for the archive index.
//!
//! A single keyspace ordered by the schema in [`archive_storage::keys`]; per-call
//! `WriteBatch`es give the atomic-per-height guarantee, and the historical register
//! lookup is a reverse seek on the `payload ‖ path ‖ BE(height)` keys.

mod store;
pub use store::RocksIndexStore;
