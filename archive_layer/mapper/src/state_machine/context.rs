//   Copyright 2024 The Tari Project
//   SPDX-License-Identifier: BSD-3-Clause

use std::collections::BTreeMap;

use archive_common_types::{Height, Payload, RegisterPath, StateCommitment};
use archive_state_tree::Forest;
use tokio_util::sync::CancellationToken;

use crate::{MapperConfig, MapperSpec};

/// Where the machine stands between two finalized blocks: the height being indexed, the
/// commit it last sealed, and the commit it must bridge to.
#[derive(Debug, Clone, Copy, Default)]
pub struct Cursor {
    pub height: Height,
    pub last: StateCommitment,
    pub next: StateCommitment,
}

/// Everything the states operate on. Owned exclusively by the mapper task; no locking.
pub struct MapperContext<TSpec: MapperSpec> {
    pub chain: TSpec::Chain,
    pub feeder: TSpec::Feeder,
    pub loader: Option<TSpec::Loader>,
    pub store: TSpec::Store,
    pub config: MapperConfig,
    pub forest: Forest,
    pub cursor: Cursor,
    /// Registers collected for the height in flight, first writer (newest step) wins.
    pub registers: BTreeMap<RegisterPath, Payload>,
    /// Process-lifetime latch for the one-time `first` write.
    pub first_written: bool,
    pub shutdown: CancellationToken,
}

impl<TSpec: MapperSpec> MapperContext<TSpec> {
    pub fn new(
        chain: TSpec::Chain,
        feeder: TSpec::Feeder,
        loader: Option<TSpec::Loader>,
        store: TSpec::Store,
        config: MapperConfig,
        shutdown: CancellationToken,
    ) -> Self {
        Self {
            chain,
            feeder,
            loader,
            store,
            config,
            forest: Forest::new(),
            cursor: Cursor::default(),
            registers: BTreeMap::new(),
            first_written: false,
            shutdown,
        }
    }
}
