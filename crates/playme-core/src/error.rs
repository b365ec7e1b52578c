// SPDX-License-Identifier: GPL-3.0-or-later

use thiserror::Error;

pub type Result<T> = std::result::Result<T, PlaymeError>;

#[derive(Debug, Error)]
pub enum PlaymeError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// The body is not JSON, or has no `response` object at the top level.
    #[error("Invalid Json response message.")]
    InvalidResponse,

    #[error("Invalid status code in response: {0}")]
    InvalidStatus(String),

    #[error("Invalid method name: {0}")]
    InvalidMethod(String),

    #[error("Invalid base URL: {0}")]
    InvalidUrl(String),
}
