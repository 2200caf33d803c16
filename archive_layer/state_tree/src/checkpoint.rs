//   Copyright 2024 The Tari Project
//   SPDX-License-Identifier: BSD-3-Clause

use archive_common_types::{Payload, RegisterPath};
use serde::{Deserialize, Serialize};

use crate::{StateTreeError, StateTrie};

/// A serialized trie: the register set of a spork genesis, decoded from the root
/// checkpoint file during bootstrap.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RootCheckpoint {
    pub registers: Vec<(RegisterPath, Payload)>,
}

impl RootCheckpoint {
    pub fn into_trie(self) -> Result<StateTrie, StateTreeError> {
        let (paths, payloads): (Vec<_>, Vec<_>) = self.registers.into_iter().unzip();
        StateTrie::new().update(&paths, &payloads)
    }

    pub fn from_trie(trie: &StateTrie) -> Self {
        Self {
            registers: trie.leaves().map(|(path, payload)| (*path, payload.clone())).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use archive_common_types::RegisterId;

    use super::*;

    #[test]
    fn checkpoint_round_trips_through_trie() {
        let registers = vec![
            (
                RegisterPath::from([1u8; 32]),
                Payload::new(RegisterId::default(), b"one".to_vec()),
            ),
            (
                RegisterPath::from([2u8; 32]),
                Payload::new(RegisterId::default(), b"two".to_vec()),
            ),
        ];
        let trie = RootCheckpoint {
            registers: registers.clone(),
        }
        .into_trie()
        .unwrap();

        let restored = RootCheckpoint::from_trie(&trie);
        assert_eq!(restored.registers, registers);
    }
}
