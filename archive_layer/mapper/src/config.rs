//   Copyright 2024 The Tari Project
//   SPDX-License-Identifier: BSD-3-Clause

use std::time::Duration;

#[derive(Debug, Clone)]
pub struct MapperConfig {
    /// How long to sleep when a source reports no data yet, before retrying the same
    /// state.
    pub wait_interval: Duration,
    /// Index block-level facts only; register payloads are neither collected nor
    /// written.
    pub skip_registers: bool,
    /// How many register payloads go into one atomic store write.
    pub map_batch_size: usize,
}

impl Default for MapperConfig {
    fn default() -> Self {
        Self {
            wait_interval: Duration::from_millis(100),
            skip_registers: false,
            map_batch_size: 1000,
        }
    }
}
