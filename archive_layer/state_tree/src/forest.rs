//   Copyright 2024 The Tari Project
//   SPDX-License-Identifier: BSD-3-Clause

use std::collections::HashMap;

use archive_common_types::{RegisterPath, StateCommitment};

use crate::StateTrie;

/// A trie together with the link and changed-path set of the update that produced it.
#[derive(Debug, Clone)]
pub struct Step {
    pub trie: StateTrie,
    pub parent: StateCommitment,
    pub paths: Vec<RegisterPath>,
}

/// The in-memory set of tries held between two consecutive finalized blocks, keyed by
/// root commitment with parent links forming the walk-back chain.
///
/// Append-only within a block interval; pruned to a single keep at block boundaries.
#[derive(Debug, Default)]
pub struct Forest {
    steps: HashMap<StateCommitment, Step>,
}

impl Forest {
    pub fn new() -> Self {
        Self { steps: HashMap::new() }
    }

    /// Store a trie under its root commitment. Idempotent on the root: saving a second
    /// trie with the same root (e.g. from concurrent feeders producing identical
    /// updates) leaves the first entry in place.
    pub fn save(&mut self, trie: StateTrie, paths: Vec<RegisterPath>, parent: StateCommitment) {
        let root = trie.root_hash();
        self.steps.entry(root).or_insert(Step { trie, parent, paths });
    }

    pub fn has(&self, commit: &StateCommitment) -> bool {
        self.steps.contains_key(commit)
    }

    pub fn tree(&self, commit: &StateCommitment) -> Option<&StateTrie> {
        self.steps.get(commit).map(|step| &step.trie)
    }

    pub fn paths(&self, commit: &StateCommitment) -> Option<&[RegisterPath]> {
        self.steps.get(commit).map(|step| step.paths.as_slice())
    }

    pub fn parent(&self, commit: &StateCommitment) -> Option<StateCommitment> {
        self.steps.get(commit).map(|step| step.parent)
    }

    /// Discard every entry except `keep`. The kept entry's parent link may dangle; the
    /// mapper never walks past the commitment it keeps.
    pub fn reset(&mut self, keep: &StateCommitment) {
        self.steps.retain(|commit, _| commit == keep);
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}
