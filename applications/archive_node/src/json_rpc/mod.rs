//   Copyright 2024 The Tari Project
//   SPDX-License-Identifier: BSD-3-Clause

mod error;
mod handlers;
mod server;

pub use handlers::JsonRpcHandlers;
pub use server::spawn_json_rpc;
