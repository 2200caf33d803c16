//   Copyright 2024 The Tari Project
//   SPDX-License-Identifier: BSD-3-Clause

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{Payload, RegisterPath, StateCommitment};

/// A batch of register writes produced by executing one chunk of work, carrying the
/// commitment of the trie it applies to.
///
/// `paths` and `payloads` are parallel arrays.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct TrieUpdate {
    pub parent_commit: StateCommitment,
    pub paths: Vec<RegisterPath>,
    pub payloads: Vec<Payload>,
}

impl TrieUpdate {
    pub fn new(parent_commit: StateCommitment, paths: Vec<RegisterPath>, payloads: Vec<Payload>) -> Self {
        Self {
            parent_commit,
            paths,
            payloads,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Deduplicate by path (the last write to a path wins) and sort the remaining pairs
    /// ascending by path.
    pub fn canonicalize(&mut self) {
        let mut by_path = BTreeMap::new();
        for (path, payload) in self.paths.drain(..).zip(self.payloads.drain(..)) {
            by_path.insert(path, payload);
        }
        let (paths, payloads) = by_path.into_iter().unzip();
        self.paths = paths;
        self.payloads = payloads;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RegisterId;

    fn path(seed: u8) -> RegisterPath {
        RegisterPath::from([seed; 32])
    }

    fn payload(value: &[u8]) -> Payload {
        Payload::new(RegisterId::default(), value.to_vec())
    }

    #[test]
    fn canonicalize_dedups_last_write_wins_and_sorts() {
        let mut update = TrieUpdate::new(
            StateCommitment::zero(),
            vec![path(2), path(1), path(1)],
            vec![payload(b"v2"), payload(b"vA"), payload(b"vB")],
        );
        update.canonicalize();
        assert_eq!(update.paths, vec![path(1), path(2)]);
        assert_eq!(update.payloads, vec![payload(b"vB"), payload(b"v2")]);
    }

    #[test]
    fn canonicalize_preserves_distinct_paths() {
        let mut update = TrieUpdate::new(
            StateCommitment::zero(),
            vec![path(3), path(1), path(2)],
            vec![payload(b"c"), payload(b"a"), payload(b"b")],
        );
        update.canonicalize();
        assert_eq!(update.paths, vec![path(1), path(2), path(3)]);
        assert_eq!(update.payloads, vec![payload(b"a"), payload(b"b"), payload(b"c")]);
    }
}
