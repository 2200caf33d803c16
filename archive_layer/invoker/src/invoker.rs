//   Copyright 2024 The Tari Project
//   SPDX-License-Identifier: BSD-3-Clause

use archive_common_types::Height;
use archive_storage::IndexReader;
use log::*;

use crate::{InvokerConfig, InvokerError, RegisterCache, RegisterView, ScriptVm, VmContext};

const LOG_TARGET: &str = "archive::invoker";

/// Executes scripts against the state at any indexed height.
pub struct Invoker<TStore, TVm> {
    store: TStore,
    vm: TVm,
    cache: RegisterCache,
}

impl<TStore, TVm> Invoker<TStore, TVm>
where
    TStore: IndexReader + Clone,
    TVm: ScriptVm,
{
    pub fn new(store: TStore, vm: TVm, config: InvokerConfig) -> Self {
        Self {
            store,
            vm,
            cache: RegisterCache::new(config.cache_size_bytes),
        }
    }

    /// Execute `script` with `arguments` against the register state as of `height`.
    /// The VM receives a fresh context carrying that height's block id and timestamp.
    pub fn execute_script(
        &self,
        height: Height,
        script: &[u8],
        arguments: &[Vec<u8>],
    ) -> Result<Vec<u8>, InvokerError> {
        let first = self.store.first()?;
        let last = self.store.last()?;
        if height < first || height > last {
            return Err(InvokerError::OutOfRange { height, first, last });
        }

        let header = self.store.header(height)?;
        let context = VmContext {
            height,
            block_id: header.block_id,
            timestamp_ms: header.timestamp_ms,
        };

        debug!(
            target: LOG_TARGET,
            "Executing script ({} bytes, {} arguments) at height {}",
            script.len(),
            arguments.len(),
            height
        );
        let view = RegisterView::new(self.store.clone(), height, self.cache.clone());
        let output = self.vm.execute(context, script, arguments, &view)?;
        Ok(output)
    }
}
