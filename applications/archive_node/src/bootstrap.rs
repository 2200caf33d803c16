//   Copyright 2024 The Tari Project
//   SPDX-License-Identifier: BSD-3-Clause

use std::{fs, io, net::SocketAddr, path::PathBuf};

use archive_codec::{Codec, CompressionDictionaries};
use archive_invoker::{Invoker, InvokerConfig, UnsupportedVm};
use archive_mapper::{MapperConfig, MapperContext, MapperError, MapperSpec, MapperWorker};
use archive_storage_rocksdb::RocksIndexStore;
use log::*;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::{
    config::ArchiveConfig,
    json_rpc::{spawn_json_rpc, JsonRpcHandlers},
    sources::{FileCheckpointLoader, SpoolChain, SpoolFeeder},
};

const LOG_TARGET: &str = "archive::node::bootstrap";

pub struct NodeSpec;

impl MapperSpec for NodeSpec {
    type Chain = SpoolChain;
    type Feeder = SpoolFeeder;
    type Loader = FileCheckpointLoader;
    type Store = RocksIndexStore;
}

pub struct Services {
    pub mapper: JoinHandle<Result<(), MapperError>>,
    pub json_rpc_address: Option<SocketAddr>,
}

pub fn spawn_services(config: &ArchiveConfig, shutdown: CancellationToken) -> anyhow::Result<Services> {
    let codec = build_codec(config)?;
    let store = RocksIndexStore::open(config.index_db_path(), codec)?;

    let chain = SpoolChain::new(config.spool_dir.clone());
    let feeder = SpoolFeeder::new(config.spool_dir.clone());
    let loader = if config.bootstrap {
        config.root_checkpoint.clone().map(FileCheckpointLoader::new)
    } else {
        None
    };

    let mapper_config = MapperConfig {
        wait_interval: config.wait_interval,
        skip_registers: config.skip_registers,
        ..Default::default()
    };
    let context = MapperContext::<NodeSpec>::new(chain, feeder, loader, store.clone(), mapper_config, shutdown.clone());
    let mapper = MapperWorker::<NodeSpec>::new(shutdown).spawn(context);

    let json_rpc_address = match config.json_rpc_address {
        Some(address) => {
            let invoker = Invoker::new(store.clone(), UnsupportedVm, InvokerConfig {
                cache_size_bytes: config.cache_size_bytes,
            });
            let handlers = JsonRpcHandlers::new(store.clone(), invoker);
            Some(spawn_json_rpc(address, handlers)?)
        },
        None => None,
    };

    Ok(Services {
        mapper,
        json_rpc_address,
    })
}

fn build_codec(config: &ArchiveConfig) -> anyhow::Result<Codec> {
    let mut dictionaries = CompressionDictionaries::default();
    if let Some(ref dir) = config.dictionary_dir {
        dictionaries.payloads = read_dictionary(dir.join("payloads.dict"))?;
        dictionaries.events = read_dictionary(dir.join("events.dict"))?;
        dictionaries.transactions = read_dictionary(dir.join("transactions.dict"))?;
    }
    Ok(Codec::new(dictionaries))
}

fn read_dictionary(path: PathBuf) -> anyhow::Result<Option<Vec<u8>>> {
    match fs::read(&path) {
        Ok(bytes) => {
            info!(
                target: LOG_TARGET,
                "📚 Loaded compression dictionary {} ({} bytes)",
                path.display(),
                bytes.len()
            );
            Ok(Some(bytes))
        },
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(err.into()),
    }
}
