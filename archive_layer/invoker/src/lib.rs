//   Copyright 2024 The Tari Project
//   SPDX-License-Identifier: BSD-3-Clause

//! Script execution against historical state.
//!
//! The invoker reconstructs a read-only register view for one height on top of the
//! index store and hands it to the script VM together with a fresh execution context
//! built from that height's header. Register reads memoize per call and share a
//! byte-bounded cross-height cache.

mod cache;
pub use cache::RegisterCache;

mod config;
pub use config::InvokerConfig;

mod error;
pub use error::{InvokerError, VmError};

mod invoker;
pub use invoker::Invoker;

mod view;
pub use view::RegisterView;

mod vm;
pub use vm::{RegisterResolver, ScriptVm, UnsupportedVm, VmContext};
