//   Copyright 2024 The Tari Project
//   SPDX-License-Identifier: BSD-3-Clause

use std::fmt::Display;

use crate::state_machine::{
    bootstrap::Bootstrap,
    collect::Collect,
    forward::Forward,
    index::IndexBlock,
    initialize::Initialize,
    map::MapRegisters,
    resume::Resume,
    update::Update,
};

#[derive(Debug)]
pub(crate) enum MapperState<TSpec> {
    Initialize(Initialize<TSpec>),
    Bootstrap(Bootstrap<TSpec>),
    Resume(Resume<TSpec>),
    Index(IndexBlock<TSpec>),
    Update(Update<TSpec>),
    Collect(Collect<TSpec>),
    Map(MapRegisters<TSpec>),
    Forward(Forward<TSpec>),
    Shutdown,
}

impl<TSpec> MapperState<TSpec> {
    pub fn is_shutdown(&self) -> bool {
        matches!(self, MapperState::Shutdown)
    }
}

impl<TSpec> Display for MapperState<TSpec> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        #[allow(clippy::enum_glob_use)]
        use MapperState::*;
        match self {
            Initialize(_) => write!(f, "Initialize"),
            Bootstrap(_) => write!(f, "Bootstrap"),
            Resume(_) => write!(f, "Resume"),
            Index(_) => write!(f, "Index"),
            Update(_) => write!(f, "Update"),
            Collect(_) => write!(f, "Collect"),
            Map(_) => write!(f, "Map"),
            Forward(_) => write!(f, "Forward"),
            Shutdown => write!(f, "Shutdown"),
        }
    }
}
