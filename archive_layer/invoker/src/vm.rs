//   Copyright 2024 The Tari Project
//   SPDX-License-Identifier: BSD-3-Clause

use archive_common_types::{BlockId, Height, RegisterId};

use crate::{InvokerError, VmError};

/// The execution context handed to the VM, rebuilt per invocation from the header of
/// the queried height.
#[derive(Debug, Clone)]
pub struct VmContext {
    pub height: Height,
    pub block_id: BlockId,
    pub timestamp_ms: u64,
}

/// The VM's register-read callback. Returns `None` for a register never written at or
/// below the view's height; a deleted register resolves to an empty value.
pub trait RegisterResolver {
    fn resolve(&self, register: &RegisterId) -> Result<Option<Vec<u8>>, InvokerError>;
}

/// The narrow procedure interface onto the script execution virtual machine.
pub trait ScriptVm: Send + Sync {
    fn execute(
        &self,
        context: VmContext,
        script: &[u8],
        arguments: &[Vec<u8>],
        registers: &dyn RegisterResolver,
    ) -> Result<Vec<u8>, VmError>;
}

/// Stands in when no chain VM is linked into the build; every execution fails with
/// [`VmError::Unsupported`].
#[derive(Debug, Clone, Copy, Default)]
pub struct UnsupportedVm;

impl ScriptVm for UnsupportedVm {
    fn execute(
        &self,
        _context: VmContext,
        _script: &[u8],
        _arguments: &[Vec<u8>],
        _registers: &dyn RegisterResolver,
    ) -> Result<Vec<u8>, VmError> {
        Err(VmError::Unsupported)
    }
}
