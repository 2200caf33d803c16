//   Copyright 2024 The Tari Project
//   SPDX-License-Identifier: BSD-3-Clause

use std::{collections::HashMap, sync::Mutex};

use archive_common_types::{Height, RegisterId};
use archive_storage::IndexReader;
use log::*;

use crate::{InvokerError, RegisterCache, RegisterResolver};

const LOG_TARGET: &str = "archive::invoker::view";

/// A read-only register view pinned to one height.
///
/// Reads memoize by register id for the lifetime of the view (one script execution),
/// then fall back to the shared cache, then to a historical store lookup.
pub struct RegisterView<TStore> {
    store: TStore,
    height: Height,
    cache: RegisterCache,
    memo: Mutex<HashMap<RegisterId, Option<Vec<u8>>>>,
}

impl<TStore: IndexReader> RegisterView<TStore> {
    pub fn new(store: TStore, height: Height, cache: RegisterCache) -> Self {
        Self {
            store,
            height,
            cache,
            memo: Mutex::new(HashMap::new()),
        }
    }

    pub fn height(&self) -> Height {
        self.height
    }
}

impl<TStore: IndexReader> RegisterResolver for RegisterView<TStore> {
    fn resolve(&self, register: &RegisterId) -> Result<Option<Vec<u8>>, InvokerError> {
        if let Some(value) = self.memo.lock().expect("register memo poisoned").get(register) {
            return Ok(value.clone());
        }

        let path = register.to_path();
        let value = match self.cache.get(self.height, &path) {
            Some(cached) => (*cached).clone(),
            None => {
                let mut payloads = self.store.registers(self.height, &[path])?;
                let value = payloads.pop().flatten().map(|payload| payload.value);
                trace!(
                    target: LOG_TARGET,
                    "Register {} at height {} read from store ({})",
                    register,
                    self.height,
                    if value.is_some() { "present" } else { "absent" }
                );
                (*self.cache.insert(self.height, path, value)).clone()
            },
        };

        self.memo
            .lock()
            .expect("register memo poisoned")
            .insert(register.clone(), value.clone());
        Ok(value)
    }
}
