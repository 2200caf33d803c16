//   Copyright 2024 The Tari Project
//   SPDX-License-Identifier: BSD-3-Clause

use std::{fmt, fmt::Display};

use archive_common_types::Height;

use crate::MapperError;

#[derive(Debug)]
pub(crate) enum MapperEvent {
    BootstrapRequired,
    ResumeRequired,
    Bootstrapped { height: Height },
    Resumed { height: Height },
    BlockIndexed { height: Height },
    CommitReached,
    RegistersCollected { count: usize },
    RegistersSkipped,
    RegistersMapped { count: usize },
    HeightForwarded { height: Height },
    Failure { error: MapperError },
    Shutdown,
}

impl Display for MapperEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        #[allow(clippy::enum_glob_use)]
        use MapperEvent::*;
        match self {
            BootstrapRequired => write!(f, "Bootstrap required"),
            ResumeRequired => write!(f, "Resume required"),
            Bootstrapped { height } => write!(f, "Bootstrapped at height {}", height),
            Resumed { height } => write!(f, "Resumed at height {}", height),
            BlockIndexed { height } => write!(f, "Block indexed at height {}", height),
            CommitReached => write!(f, "Commit reached"),
            RegistersCollected { count } => write!(f, "Collected {} registers", count),
            RegistersSkipped => write!(f, "Registers skipped"),
            RegistersMapped { count } => write!(f, "Mapped {} registers", count),
            HeightForwarded { height } => write!(f, "Forwarded past height {}", height),
            Failure { error } => write!(f, "Failure({error})"),
            Shutdown => write!(f, "Shutdown"),
        }
    }
}
