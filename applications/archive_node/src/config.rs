//   Copyright 2024 The Tari Project
//   SPDX-License-Identifier: BSD-3-Clause

use std::{
    net::SocketAddr,
    path::{Path, PathBuf},
    time::Duration,
};

use config::{Config, ConfigError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ArchiveConfig {
    /// The relative path to store persistent data
    pub data_dir: PathBuf,
    /// Directory the execution node spools block data records into
    pub spool_dir: PathBuf,
    /// The serialized genesis trie this spork starts from
    pub root_checkpoint: Option<PathBuf>,
    /// Bootstrap an empty index from the root checkpoint
    pub bootstrap: bool,
    /// Index block-level facts only
    pub skip_registers: bool,
    /// How long to wait when a source has no data yet
    #[serde(with = "humantime_serde")]
    pub wait_interval: Duration,
    /// Register cache size in bytes for script execution
    pub cache_size_bytes: u64,
    /// JSON-RPC address of the archive API
    pub json_rpc_address: Option<SocketAddr>,
    /// Directory holding the trained compression dictionaries, if any
    pub dictionary_dir: Option<PathBuf>,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("index"),
            spool_dir: PathBuf::from("spool"),
            root_checkpoint: None,
            bootstrap: false,
            skip_registers: false,
            wait_interval: Duration::from_millis(500),
            cache_size_bytes: 1024 * 1024 * 1024,
            json_rpc_address: Some("127.0.0.1:18200".parse().expect("valid default address")),
            dictionary_dir: None,
        }
    }
}

impl ArchiveConfig {
    /// Load `config.toml` from the base directory (optional), apply
    /// `ARCHIVE_NODE_*` environment overrides and resolve relative paths.
    pub fn load(base_dir: &Path) -> Result<Self, ConfigError> {
        let cfg = Config::builder()
            .add_source(config::File::from(base_dir.join("config.toml")).required(false))
            .add_source(config::Environment::with_prefix("ARCHIVE_NODE").separator("__"))
            .build()?;
        let mut this: Self = cfg.try_deserialize()?;
        this.set_base_path(base_dir);
        Ok(this)
    }

    pub fn index_db_path(&self) -> PathBuf {
        self.data_dir.join("index.db")
    }

    pub fn set_base_path<P: AsRef<Path>>(&mut self, base_path: P) {
        if !self.data_dir.is_absolute() {
            self.data_dir = base_path.as_ref().join(&self.data_dir);
        }
        if !self.spool_dir.is_absolute() {
            self.spool_dir = base_path.as_ref().join(&self.spool_dir);
        }
        if let Some(ref mut root_checkpoint) = self.root_checkpoint {
            if !root_checkpoint.is_absolute() {
                *root_checkpoint = base_path.as_ref().join(&*root_checkpoint);
            }
        }
        if let Some(ref mut dictionary_dir) = self.dictionary_dir {
            if !dictionary_dir.is_absolute() {
                *dictionary_dir = base_path.as_ref().join(&*dictionary_dir);
            }
        }
    }
}
