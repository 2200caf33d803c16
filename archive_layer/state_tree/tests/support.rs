//   Copyright 2024 The Tari Project
//   SPDX-License-Identifier: BSD-3-Clause

use archive_common_types::{Payload, RegisterId, RegisterPath, StateCommitment};
use archive_state_tree::StateTrie;

pub fn change(path_seed: u8, value_seed: Option<u8>) -> (RegisterPath, Payload) {
    change_exact(RegisterPath::from([path_seed; 32]), value_seed.map(from_seed))
}

pub fn change_exact(path: RegisterPath, value: Option<Vec<u8>>) -> (RegisterPath, Payload) {
    let payload = value
        .map(|value| Payload::new(RegisterId::default(), value))
        .unwrap_or_else(|| Payload::tombstone(RegisterId::default()));
    (path, payload)
}

fn from_seed(value_seed: u8) -> Vec<u8> {
    vec![value_seed; value_seed as usize]
}

pub struct TrieTester {
    pub current: StateTrie,
}

impl TrieTester {
    pub fn new_empty() -> Self {
        Self {
            current: StateTrie::new(),
        }
    }

    pub fn put_changes(&mut self, changes: Vec<(RegisterPath, Payload)>) -> StateCommitment {
        let (paths, payloads): (Vec<_>, Vec<_>) = changes.into_iter().unzip();
        self.current = self.current.update(&paths, &payloads).unwrap();
        self.current.root_hash()
    }
}
