//   Copyright 2024 The Tari Project
//   SPDX-License-Identifier: BSD-3-Clause

use std::marker::PhantomData;

use archive_common_types::StateCommitment;
use archive_state_tree::StateTrie;
use archive_storage::IndexReader;
use log::*;

use crate::{
    state_machine::{Cursor, MapperContext, MapperEvent},
    MapperError,
    MapperSpec,
};

const LOG_TARGET: &str = "archive::mapper::resume";

/// Rebuilds the trie of the last indexed height from persisted payloads, verifies its
/// root against the stored commit, and continues from the following height.
///
/// Requires register payloads on disk: a store written with `skip_registers` cannot be
/// resumed and fails the verification.
#[derive(Debug)]
pub struct Resume<TSpec>(PhantomData<TSpec>);

impl<TSpec: MapperSpec> Resume<TSpec> {
    pub fn new() -> Self {
        Self(PhantomData)
    }

    pub(super) async fn on_enter(&self, context: &mut MapperContext<TSpec>) -> Result<MapperEvent, MapperError> {
        let last_height = context.store.last()?;
        let commit = context.store.commit(last_height)?;

        let registers = context.store.registers_at(last_height)?;
        let (paths, payloads): (Vec<_>, Vec<_>) = registers.into_iter().unzip();
        let trie = StateTrie::new().update(&paths, &payloads)?;

        let actual = trie.root_hash();
        if actual != commit {
            return Err(MapperError::CommitMismatch {
                height: last_height,
                expected: commit,
                actual,
            });
        }
        info!(
            target: LOG_TARGET,
            "🔁 Resuming at height {} with {} registers, commit {}",
            last_height.next(),
            paths.len(),
            commit
        );

        context.forest.save(trie, vec![], StateCommitment::zero());
        context.cursor = Cursor {
            height: last_height.next(),
            last: StateCommitment::zero(),
            next: commit,
        };
        context.registers.clear();

        Ok(MapperEvent::Resumed {
            height: context.cursor.height,
        })
    }
}
