//   Copyright 2024 The Tari Project
//   SPDX-License-Identifier: BSD-3-Clause

use std::marker::PhantomData;

use log::*;

use crate::{
    state_machine::{MapperContext, MapperEvent},
    MapperError,
    MapperSpec,
};

const LOG_TARGET: &str = "archive::mapper::collect";

/// Walks the forest from the new commitment back to the sealed one and gathers the
/// payload of every register that changed in between. The newest write to a path wins;
/// earlier steps cannot override it.
#[derive(Debug)]
pub struct Collect<TSpec>(PhantomData<TSpec>);

impl<TSpec: MapperSpec> Collect<TSpec> {
    pub fn new() -> Self {
        Self(PhantomData)
    }

    pub(super) async fn on_enter(&self, context: &mut MapperContext<TSpec>) -> Result<MapperEvent, MapperError> {
        if context.config.skip_registers {
            return Ok(MapperEvent::RegistersSkipped);
        }

        context.registers.clear();
        let mut commit = context.cursor.next;
        while commit != context.cursor.last {
            let paths = context
                .forest
                .paths(&commit)
                .ok_or(MapperError::MissingStep { commit })?
                .to_vec();
            let trie = context.forest.tree(&commit).ok_or(MapperError::MissingStep { commit })?;

            for path in paths {
                if context.registers.contains_key(&path) {
                    continue;
                }
                let payload = trie.get(&path).ok_or(MapperError::MissingRegister { commit, path })?;
                context.registers.insert(path, payload);
            }

            commit = context.forest.parent(&commit).ok_or(MapperError::MissingStep { commit })?;
        }

        debug!(
            target: LOG_TARGET,
            "Collected {} changed registers for height {}",
            context.registers.len(),
            context.cursor.height
        );
        Ok(MapperEvent::RegistersCollected {
            count: context.registers.len(),
        })
    }
}
