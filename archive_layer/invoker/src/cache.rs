//   Copyright 2024 The Tari Project
//   SPDX-License-Identifier: BSD-3-Clause

use std::sync::Arc;

use archive_common_types::{Height, RegisterPath};
use mini_moka::sync::Cache;

/// The shared cross-height register cache, weighed by payload byte size so a handful of
/// huge registers cannot evict the rest of the working set unnoticed.
///
/// Misses are cached too (`None`): a register that was never written stays cheap to ask
/// for repeatedly.
#[derive(Clone)]
pub struct RegisterCache {
    cache: Cache<(Height, RegisterPath), Arc<Option<Vec<u8>>>>,
}

impl RegisterCache {
    pub fn new(max_bytes: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_bytes)
            .weigher(|key: &(Height, RegisterPath), value: &Arc<Option<Vec<u8>>>| {
                let value_size = value.as_deref().map(<[u8]>::len).unwrap_or(0);
                (std::mem::size_of_val(key) + value_size).try_into().unwrap_or(u32::MAX)
            })
            .build();
        Self { cache }
    }

    pub fn get(&self, height: Height, path: &RegisterPath) -> Option<Arc<Option<Vec<u8>>>> {
        self.cache.get(&(height, *path))
    }

    pub fn insert(&self, height: Height, path: RegisterPath, value: Option<Vec<u8>>) -> Arc<Option<Vec<u8>>> {
        let value = Arc::new(value);
        self.cache.insert((height, path), value.clone());
        value
    }
}
