//   Copyright 2024 The Tari Project
//   SPDX-License-Identifier: BSD-3-Clause

use archive_common_types::{BlockId, CollectionId, Height, RegisterPath, SealId, TransactionId};
use archive_invoker::{Invoker, ScriptVm};
use archive_storage::{records::Event, IndexReader};
use archive_storage_rocksdb::RocksIndexStore;
use axum_jrpc::{JrpcResult, JsonRpcExtractor, JsonRpcResponse};
use serde::{Deserialize, Serialize};

use super::error::{invalid_params, invoker_error, storage_error};

pub struct JsonRpcHandlers<TVm> {
    store: RocksIndexStore,
    invoker: Invoker<RocksIndexStore, TVm>,
}

impl<TVm: ScriptVm> JsonRpcHandlers<TVm> {
    pub fn new(store: RocksIndexStore, invoker: Invoker<RocksIndexStore, TVm>) -> Self {
        Self { store, invoker }
    }

    /// Every height-addressed query validates its height against the indexed range
    /// before touching the index.
    fn checked_height(&self, answer_id: i64, height: u64) -> Result<Height, JsonRpcResponse> {
        let height = Height(height);
        let first = self.store.first().map_err(storage_error(answer_id))?;
        let last = self.store.last().map_err(storage_error(answer_id))?;
        if height < first || height > last {
            return Err(invalid_params(
                answer_id,
                format!("height {} is outside the indexed range [{}, {}]", height, first, last),
            ));
        }
        Ok(height)
    }

    pub fn get_first(&self, value: JsonRpcExtractor) -> JrpcResult {
        let answer_id = value.get_answer_id();
        let height = self.store.first().map_err(storage_error(answer_id))?;
        Ok(JsonRpcResponse::success(answer_id, HeightResponse {
            height: height.as_u64(),
        }))
    }

    pub fn get_last(&self, value: JsonRpcExtractor) -> JrpcResult {
        let answer_id = value.get_answer_id();
        let height = self.store.last().map_err(storage_error(answer_id))?;
        Ok(JsonRpcResponse::success(answer_id, HeightResponse {
            height: height.as_u64(),
        }))
    }

    pub fn get_height_for_block(&self, value: JsonRpcExtractor) -> JrpcResult {
        let answer_id = value.get_answer_id();
        let request = value.parse_params::<IdRequest>()?;
        let id: BlockId = request.id.parse().map_err(|err| invalid_params(answer_id, err))?;
        let height = self.store.height_for_block(&id).map_err(storage_error(answer_id))?;
        Ok(JsonRpcResponse::success(answer_id, HeightResponse {
            height: height.as_u64(),
        }))
    }

    pub fn get_commit(&self, value: JsonRpcExtractor) -> JrpcResult {
        let answer_id = value.get_answer_id();
        let request = value.parse_params::<HeightRequest>()?;
        let height = self.checked_height(answer_id, request.height)?;
        let commit = self.store.commit(height).map_err(storage_error(answer_id))?;
        Ok(JsonRpcResponse::success(answer_id, CommitResponse {
            commit: commit.to_string(),
        }))
    }

    pub fn get_header(&self, value: JsonRpcExtractor) -> JrpcResult {
        let answer_id = value.get_answer_id();
        let request = value.parse_params::<HeightRequest>()?;
        let height = self.checked_height(answer_id, request.height)?;
        let header = self.store.header(height).map_err(storage_error(answer_id))?;
        Ok(JsonRpcResponse::success(answer_id, header))
    }

    pub fn get_events(&self, value: JsonRpcExtractor) -> JrpcResult {
        let answer_id = value.get_answer_id();
        let request = value.parse_params::<GetEventsRequest>()?;
        let height = self.checked_height(answer_id, request.height)?;
        let events = self
            .store
            .events(height, &request.types)
            .map_err(storage_error(answer_id))?;
        Ok(JsonRpcResponse::success(answer_id, EventsResponse { events }))
    }

    pub fn get_register_values(&self, value: JsonRpcExtractor) -> JrpcResult {
        let answer_id = value.get_answer_id();
        let request = value.parse_params::<GetRegisterValuesRequest>()?;
        if request.paths.is_empty() {
            return Err(invalid_params(answer_id, "at least one register path is required"));
        }
        let height = self.checked_height(answer_id, request.height)?;
        let paths = request
            .paths
            .iter()
            .map(|path| path.parse::<RegisterPath>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|err| invalid_params(answer_id, err))?;
        let values = self
            .store
            .registers(height, &paths)
            .map_err(storage_error(answer_id))?
            .into_iter()
            .map(|payload| payload.map(|payload| hex::encode(payload.value)))
            .collect();
        Ok(JsonRpcResponse::success(answer_id, RegisterValuesResponse { values }))
    }

    pub fn get_collection(&self, value: JsonRpcExtractor) -> JrpcResult {
        let answer_id = value.get_answer_id();
        let request = value.parse_params::<IdRequest>()?;
        let id: CollectionId = request.id.parse().map_err(|err| invalid_params(answer_id, err))?;
        let collection = self.store.collection(&id).map_err(storage_error(answer_id))?;
        Ok(JsonRpcResponse::success(answer_id, collection))
    }

    pub fn list_collections_for_height(&self, value: JsonRpcExtractor) -> JrpcResult {
        let answer_id = value.get_answer_id();
        let request = value.parse_params::<HeightRequest>()?;
        let height = self.checked_height(answer_id, request.height)?;
        let collections = self
            .store
            .collections_by_height(height)
            .map_err(storage_error(answer_id))?;
        Ok(JsonRpcResponse::success(answer_id, IdsResponse {
            ids: collections.iter().map(CollectionId::to_string).collect(),
        }))
    }

    pub fn get_guarantee(&self, value: JsonRpcExtractor) -> JrpcResult {
        let answer_id = value.get_answer_id();
        let request = value.parse_params::<IdRequest>()?;
        let id: CollectionId = request.id.parse().map_err(|err| invalid_params(answer_id, err))?;
        let guarantee = self.store.guarantee(&id).map_err(storage_error(answer_id))?;
        Ok(JsonRpcResponse::success(answer_id, guarantee))
    }

    pub fn get_transaction(&self, value: JsonRpcExtractor) -> JrpcResult {
        let answer_id = value.get_answer_id();
        let request = value.parse_params::<IdRequest>()?;
        let id: TransactionId = request.id.parse().map_err(|err| invalid_params(answer_id, err))?;
        let transaction = self.store.transaction(&id).map_err(storage_error(answer_id))?;
        Ok(JsonRpcResponse::success(answer_id, transaction))
    }

    pub fn get_height_for_transaction(&self, value: JsonRpcExtractor) -> JrpcResult {
        let answer_id = value.get_answer_id();
        let request = value.parse_params::<IdRequest>()?;
        let id: TransactionId = request.id.parse().map_err(|err| invalid_params(answer_id, err))?;
        let height = self.store.height_for_transaction(&id).map_err(storage_error(answer_id))?;
        Ok(JsonRpcResponse::success(answer_id, HeightResponse {
            height: height.as_u64(),
        }))
    }

    pub fn list_transactions_for_height(&self, value: JsonRpcExtractor) -> JrpcResult {
        let answer_id = value.get_answer_id();
        let request = value.parse_params::<HeightRequest>()?;
        let height = self.checked_height(answer_id, request.height)?;
        let transactions = self
            .store
            .transactions_by_height(height)
            .map_err(storage_error(answer_id))?;
        Ok(JsonRpcResponse::success(answer_id, IdsResponse {
            ids: transactions.iter().map(TransactionId::to_string).collect(),
        }))
    }

    pub fn get_result(&self, value: JsonRpcExtractor) -> JrpcResult {
        let answer_id = value.get_answer_id();
        let request = value.parse_params::<IdRequest>()?;
        let id: TransactionId = request.id.parse().map_err(|err| invalid_params(answer_id, err))?;
        let result = self.store.result(&id).map_err(storage_error(answer_id))?;
        Ok(JsonRpcResponse::success(answer_id, result))
    }

    pub fn get_seal(&self, value: JsonRpcExtractor) -> JrpcResult {
        let answer_id = value.get_answer_id();
        let request = value.parse_params::<IdRequest>()?;
        let id: SealId = request.id.parse().map_err(|err| invalid_params(answer_id, err))?;
        let seal = self.store.seal(&id).map_err(storage_error(answer_id))?;
        Ok(JsonRpcResponse::success(answer_id, seal))
    }

    pub fn list_seals_for_height(&self, value: JsonRpcExtractor) -> JrpcResult {
        let answer_id = value.get_answer_id();
        let request = value.parse_params::<HeightRequest>()?;
        let height = self.checked_height(answer_id, request.height)?;
        let seals = self.store.seals_by_height(height).map_err(storage_error(answer_id))?;
        Ok(JsonRpcResponse::success(answer_id, IdsResponse {
            ids: seals.iter().map(SealId::to_string).collect(),
        }))
    }

    pub fn execute_script(&self, value: JsonRpcExtractor) -> JrpcResult {
        let answer_id = value.get_answer_id();
        let request = value.parse_params::<ExecuteScriptRequest>()?;
        let script = hex::decode(&request.script).map_err(|err| invalid_params(answer_id, err))?;
        let arguments = request
            .arguments
            .iter()
            .map(hex::decode)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|err| invalid_params(answer_id, err))?;
        let output = self
            .invoker
            .execute_script(Height(request.height), &script, &arguments)
            .map_err(invoker_error(answer_id))?;
        Ok(JsonRpcResponse::success(answer_id, ExecuteScriptResponse {
            output: hex::encode(output),
        }))
    }

}

#[derive(Deserialize, Debug)]
struct HeightRequest {
    height: u64,
}

#[derive(Deserialize, Debug)]
struct IdRequest {
    id: String,
}

#[derive(Deserialize, Debug)]
struct GetEventsRequest {
    height: u64,
    #[serde(default)]
    types: Vec<String>,
}

#[derive(Deserialize, Debug)]
struct GetRegisterValuesRequest {
    height: u64,
    paths: Vec<String>,
}

#[derive(Deserialize, Debug)]
struct ExecuteScriptRequest {
    height: u64,
    script: String,
    #[serde(default)]
    arguments: Vec<String>,
}

#[derive(Serialize, Debug)]
struct HeightResponse {
    height: u64,
}

#[derive(Serialize, Debug)]
struct CommitResponse {
    commit: String,
}

#[derive(Serialize, Debug)]
struct EventsResponse {
    events: Vec<Event>,
}

#[derive(Serialize, Debug)]
struct RegisterValuesResponse {
    values: Vec<Option<String>>,
}

#[derive(Serialize, Debug)]
struct IdsResponse {
    ids: Vec<String>,
}

#[derive(Serialize, Debug)]
struct ExecuteScriptResponse {
    output: String,
}
