// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

/// Failure classes the core distinguishes between. Validation errors surface
/// before any write; collaborator failures are recovered locally via the
/// categorization/drafting fallbacks; atomicity failures mean a combined
/// write must be rolled back and retried by the caller.
#[derive(Debug, Error)]
pub enum Error {
    #[error("validation: {0}")]
    Validation(String),

    #[error("collaborator: {0}")]
    Collaborator(String),

    #[error("atomicity: {0}")]
    Atomicity(String),

    #[error("persistence: {0}")]
    Persistence(#[from] rusqlite::Error),
}

impl Error {
    pub fn validation(msg: impl Into<String>) -> Self {
        Error::Validation(msg.into())
    }

    pub fn collaborator(msg: impl Into<String>) -> Self {
        Error::Collaborator(msg.into())
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
