// SPDX-License-Identifier: GPL-3.0-or-later

use playme_core::{PlaymeError, ResponseStatus};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, DomainError>;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error(transparent)]
    Core(#[from] PlaymeError),

    /// A well-formed response carrying a non-success status.
    #[error("{status}")]
    Api { status: ResponseStatus },

    #[error("not implemented: {0}.api_method")]
    Unbound(&'static str),

    #[error("Missing field in response: {0}")]
    MissingField(&'static str),

    #[error("Cannot cast {found} into {name}")]
    Cast { name: &'static str, found: String },
}

impl DomainError {
    /// Status code of an API error, if this is one.
    pub fn status(&self) -> Option<ResponseStatus> {
        match self {
            DomainError::Api { status } => Some(*status),
            _ => None,
        }
    }
}
