//   Copyright 2024 The Tari Project
//   SPDX-License-Identifier: BSD-3-Clause

use archive_common_types::Height;
use archive_storage::StorageError;

#[derive(Debug, thiserror::Error)]
pub enum VmError {
    #[error("Script execution failed: {details}")]
    Execution { details: String },
    #[error("Script execution is not supported by this build")]
    Unsupported,
}

#[derive(Debug, thiserror::Error)]
pub enum InvokerError {
    #[error("Height {height} is outside the indexed range [{first}, {last}]")]
    OutOfRange {
        height: Height,
        first: Height,
        last: Height,
    },
    #[error("Storage failure: {0}")]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Vm(#[from] VmError),
}
