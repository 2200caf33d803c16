//   Copyright 2024 The Tari Project
//   SPDX-License-Identifier: BSD-3-Clause

use archive_storage::{IndexReader, IndexWriter};

use crate::{Chain, CheckpointLoader, Feeder};

/// Binds the mapper's collaborators together so the worker and its states are generic
/// over one parameter.
pub trait MapperSpec: Send + Sync + 'static {
    type Chain: Chain + 'static;
    type Feeder: Feeder + 'static;
    type Loader: CheckpointLoader + 'static;
    type Store: IndexReader + IndexWriter + Clone + 'static;
}
