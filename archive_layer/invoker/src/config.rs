//   Copyright 2024 The Tari Project
//   SPDX-License-Identifier: BSD-3-Clause

#[derive(Debug, Clone)]
pub struct InvokerConfig {
    /// Upper bound on the shared register cache, in bytes. Sized in bytes rather than
    /// entries because payload sizes vary by orders of magnitude.
    pub cache_size_bytes: u64,
}

impl Default for InvokerConfig {
    fn default() -> Self {
        Self {
            cache_size_bytes: 1024 * 1024 * 1024,
        }
    }
}
