//   Copyright 2024 The Tari Project
//   SPDX-License-Identifier: BSD-3-Clause

use std::marker::PhantomData;

use archive_storage::IndexWriter;
use log::*;

use crate::{
    state_machine::{MapperContext, MapperEvent},
    MapperError,
    MapperSpec,
};

const LOG_TARGET: &str = "archive::mapper::forward";

/// Seals the height: records `first` on the very first pass, advances `last` (the
/// durability watermark, written after every other per-height write), prunes the forest
/// to the finalized commitment and moves the cursor up.
#[derive(Debug)]
pub struct Forward<TSpec>(PhantomData<TSpec>);

impl<TSpec: MapperSpec> Forward<TSpec> {
    pub fn new() -> Self {
        Self(PhantomData)
    }

    pub(super) async fn on_enter(&self, context: &mut MapperContext<TSpec>) -> Result<MapperEvent, MapperError> {
        let height = context.cursor.height;

        if !context.first_written {
            context.store.write_first(height)?;
            context.first_written = true;
        }
        if !context.config.skip_registers {
            context.store.write_latest_registers(height)?;
        }
        context.store.write_last(height)?;

        context.forest.reset(&context.cursor.next);
        context.cursor.height = height.next();

        info!(target: LOG_TARGET, "✅ Indexed height {}", height);
        Ok(MapperEvent::HeightForwarded { height })
    }
}
