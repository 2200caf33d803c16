//   Copyright 2024 The Tari Project
//   SPDX-License-Identifier: BSD-3-Clause

use std::marker::PhantomData;

use archive_storage::IndexReader;
use log::*;

use crate::{
    state_machine::{MapperContext, MapperEvent},
    MapperError,
    MapperSpec,
};

const LOG_TARGET: &str = "archive::mapper::initialize";

/// Decides how the pipeline starts: an empty store bootstraps from the configured root
/// checkpoint; anything else resumes from the last indexed height.
#[derive(Debug)]
pub struct Initialize<TSpec>(PhantomData<TSpec>);

impl<TSpec: MapperSpec> Initialize<TSpec> {
    pub fn new() -> Self {
        Self(PhantomData)
    }

    pub(super) async fn on_enter(&self, context: &mut MapperContext<TSpec>) -> Result<MapperEvent, MapperError> {
        if !context.store.is_empty()? {
            return Ok(MapperEvent::ResumeRequired);
        }
        if context.loader.is_none() {
            return Err(MapperError::NoCheckpoint);
        }
        debug!(target: LOG_TARGET, "Store is empty, bootstrapping from root checkpoint");
        Ok(MapperEvent::BootstrapRequired)
    }
}
