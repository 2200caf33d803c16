//   Copyright 2024 The Tari Project
//   SPDX-License-Identifier: BSD-3-Clause

mod bootstrap;
mod cli;
mod config;
mod json_rpc;
mod sources;

use std::{panic, process};

use cli::Cli;
use log::*;

use crate::config::ArchiveConfig;
use tokio_util::sync::CancellationToken;

const LOG_TARGET: &str = "archive::node::app";

#[tokio::main]
async fn main() {
    // Setup a panic hook which prints the default rust panic message but also exits the
    // process. This makes a panic in any thread "crash" the system instead of silently
    // continuing.
    let default_hook = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        default_hook(info);
        process::exit(1);
    }));

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(err) = main_inner().await {
        eprintln!("{err:?}");
        error!(target: LOG_TARGET, "Exiting with error: {err}");
        process::exit(1);
    }
}

async fn main_inner() -> anyhow::Result<()> {
    let cli = Cli::init();
    let mut config = ArchiveConfig::load(&cli.base_dir)?;
    cli.apply_overrides(&mut config);

    info!(
        target: LOG_TARGET,
        "Starting archive node (index {}, spool {})",
        config.index_db_path().display(),
        config.spool_dir.display()
    );

    let shutdown = CancellationToken::new();
    let services = bootstrap::spawn_services(&config, shutdown.clone())?;
    if let Some(address) = services.json_rpc_address {
        info!(target: LOG_TARGET, "🌐 Archive API available on {}", address);
    }

    let mut mapper = services.mapper;
    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!(target: LOG_TARGET, "💤 Shutdown signal received, finishing the height in flight");
            shutdown.cancel();
            (&mut mapper).await??;
        },
        result = &mut mapper => {
            shutdown.cancel();
            result??;
        },
    }

    info!(target: LOG_TARGET, "💤 Archive node stopped");
    Ok(())
}
