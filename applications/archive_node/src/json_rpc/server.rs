//   Copyright 2024 The Tari Project
//   SPDX-License-Identifier: BSD-3-Clause

use std::{net::SocketAddr, sync::Arc};

use archive_invoker::ScriptVm;
use axum::{extract::Extension, routing::post, Router};
use axum_jrpc::{JrpcResult, JsonRpcExtractor};
use log::*;
use tower_http::cors::CorsLayer;

use super::handlers::JsonRpcHandlers;

const LOG_TARGET: &str = "archive::node::json_rpc";

pub fn spawn_json_rpc<TVm: ScriptVm + 'static>(
    preferred_address: SocketAddr,
    handlers: JsonRpcHandlers<TVm>,
) -> anyhow::Result<SocketAddr> {
    let router = Router::new()
        .route("/", post(handler::<TVm>))
        .route("/json_rpc", post(handler::<TVm>))
        .layer(Extension(Arc::new(handlers)))
        .layer(CorsLayer::permissive());

    let server = axum::Server::try_bind(&preferred_address).or_else(|_| {
        error!(
            target: LOG_TARGET,
            "🌐 Failed to bind on preferred address {}. Trying OS-assigned", preferred_address
        );
        axum::Server::try_bind(&"127.0.0.1:0".parse().unwrap())
    })?;
    let server = server.serve(router.into_make_service());
    let listen_addr = server.local_addr();
    info!(target: LOG_TARGET, "🌐 JSON-RPC listening on {listen_addr}");
    tokio::spawn(server);

    Ok(listen_addr)
}

async fn handler<TVm: ScriptVm + 'static>(
    Extension(handlers): Extension<Arc<JsonRpcHandlers<TVm>>>,
    value: JsonRpcExtractor,
) -> JrpcResult {
    debug!(target: LOG_TARGET, "🌐 JSON-RPC request: {}", value.method);
    match value.method.as_str() {
        "get_first" => handlers.get_first(value),
        "get_last" => handlers.get_last(value),
        "get_height_for_block" => handlers.get_height_for_block(value),
        "get_commit" => handlers.get_commit(value),
        "get_header" => handlers.get_header(value),
        "get_events" => handlers.get_events(value),
        "get_register_values" => handlers.get_register_values(value),
        "get_collection" => handlers.get_collection(value),
        "list_collections_for_height" => handlers.list_collections_for_height(value),
        "get_guarantee" => handlers.get_guarantee(value),
        "get_transaction" => handlers.get_transaction(value),
        "get_height_for_transaction" => handlers.get_height_for_transaction(value),
        "list_transactions_for_height" => handlers.list_transactions_for_height(value),
        "get_result" => handlers.get_result(value),
        "get_seal" => handlers.get_seal(value),
        "list_seals_for_height" => handlers.list_seals_for_height(value),
        "execute_script" => handlers.execute_script(value),
        method => Ok(value.method_not_found(method)),
    }
}
