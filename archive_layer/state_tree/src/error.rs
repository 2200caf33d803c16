//   Copyright 2024 The Tari Project
//   SPDX-License-Identifier: BSD-3-Clause

#[derive(Debug, thiserror::Error)]
pub enum StateTreeError {
    #[error("Update has {paths} paths but {payloads} payloads")]
    LengthMismatch { paths: usize, payloads: usize },
    #[error("Unknown parent commitment {commit}")]
    UnknownParent { commit: archive_common_types::StateCommitment },
}
