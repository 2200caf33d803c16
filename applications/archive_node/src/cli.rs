//   Copyright 2024 The Tari Project
//   SPDX-License-Identifier: BSD-3-Clause

use std::{net::SocketAddr, path::PathBuf};

use clap::Parser;

use crate::config::ArchiveConfig;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
#[clap(propagate_version = true)]
pub struct Cli {
    /// Base directory for configuration and data
    #[clap(long, short = 'b', default_value = "data", env = "ARCHIVE_NODE_BASE_DIR")]
    pub base_dir: PathBuf,

    /// Bootstrap an empty index from the configured root checkpoint
    #[clap(long)]
    pub bootstrap: bool,

    /// Index block-level facts only; register payloads are not written
    #[clap(long)]
    pub skip_registers: bool,

    /// How long to wait when a source has no data yet (e.g. "200ms", "5s")
    #[clap(long, short = 'w')]
    pub wait_interval: Option<humantime::Duration>,

    /// Register cache size in bytes for script execution
    #[clap(long)]
    pub cache_size: Option<u64>,

    /// Path to the root checkpoint file
    #[clap(long)]
    pub root_checkpoint: Option<PathBuf>,

    /// Directory holding the block data spool
    #[clap(long)]
    pub spool_dir: Option<PathBuf>,

    /// Bind address for the JSON-RPC server
    #[clap(long, short = 'r', alias = "rpc-address")]
    pub json_rpc_address: Option<SocketAddr>,
}

impl Cli {
    pub fn init() -> Self {
        Self::parse()
    }

    /// Fold the command line into the loaded configuration. Flags beat file values.
    pub fn apply_overrides(&self, config: &mut ArchiveConfig) {
        if self.bootstrap {
            config.bootstrap = true;
        }
        if self.skip_registers {
            config.skip_registers = true;
        }
        if let Some(ref wait_interval) = self.wait_interval {
            config.wait_interval = **wait_interval;
        }
        if let Some(cache_size) = self.cache_size {
            config.cache_size_bytes = cache_size;
        }
        if let Some(ref root_checkpoint) = self.root_checkpoint {
            config.root_checkpoint = Some(root_checkpoint.clone());
        }
        if let Some(ref spool_dir) = self.spool_dir {
            config.spool_dir = spool_dir.clone();
        }
        if let Some(json_rpc_address) = self.json_rpc_address {
            config.json_rpc_address = Some(json_rpc_address);
        }
    }
}
