//   Copyright 2024 The Tari Project
//   SPDX-License-Identifier: BSD-3-Clause

use std::fmt::Display;

use archive_invoker::{InvokerError, VmError};
use archive_storage::StorageError;
use axum_jrpc::{
    error::{JsonRpcError, JsonRpcErrorReason},
    JsonRpcResponse,
};
use log::*;

const LOG_TARGET: &str = "archive::node::json_rpc";

const NOT_FOUND_CODE: i32 = 404;

pub fn internal_error<T: Display>(answer_id: i64) -> impl Fn(T) -> JsonRpcResponse {
    move |err| {
        let msg = if cfg!(debug_assertions) || option_env!("CI").is_some() {
            err.to_string()
        } else {
            log::error!(target: LOG_TARGET, "🚨 Internal error: {}", err);
            "Something went wrong".to_string()
        };
        JsonRpcResponse::error(
            answer_id,
            JsonRpcError::new(JsonRpcErrorReason::InternalError, msg, serde_json::Value::Null),
        )
    }
}

pub fn invalid_params<T: Display>(answer_id: i64, err: T) -> JsonRpcResponse {
    JsonRpcResponse::error(
        answer_id,
        JsonRpcError::new(
            JsonRpcErrorReason::InvalidParams,
            err.to_string(),
            serde_json::Value::Null,
        ),
    )
}

/// `NotFound` and `Invalid` surface verbatim to the caller; everything else is an
/// internal failure.
pub fn storage_error(answer_id: i64) -> impl Fn(StorageError) -> JsonRpcResponse {
    move |err| match err {
        StorageError::NotFound { .. } => JsonRpcResponse::error(
            answer_id,
            JsonRpcError::new(
                JsonRpcErrorReason::ApplicationError(NOT_FOUND_CODE),
                err.to_string(),
                serde_json::Value::Null,
            ),
        ),
        StorageError::Invalid { .. } => invalid_params(answer_id, err),
        err => {
            error!(target: LOG_TARGET, "🚨 Storage failure: {}", err);
            internal_error(answer_id)(err)
        },
    }
}

pub fn invoker_error(answer_id: i64) -> impl Fn(InvokerError) -> JsonRpcResponse {
    move |err| match err {
        InvokerError::OutOfRange { .. } => invalid_params(answer_id, err),
        InvokerError::Storage(err) => storage_error(answer_id)(err),
        InvokerError::Vm(VmError::Unsupported) => invalid_params(answer_id, VmError::Unsupported),
        err => {
            error!(target: LOG_TARGET, "🚨 Script execution failure: {}", err);
            internal_error(answer_id)(err)
        },
    }
}
