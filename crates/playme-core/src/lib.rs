// SPDX-License-Identifier: GPL-3.0-or-later

//! Client plumbing for the playMe JSON API.
//!
//! This crate builds method names and canonical query strings, performs the
//! HTTP calls and parses the response messages, including the status code
//! the API reports in-band.

pub mod api;
pub mod client;
pub mod error;
pub mod method;
pub mod query;
pub mod request;
pub mod response;
pub mod status;

pub use client::{PlaymeClient, PlaymeClientBuilder};
pub use error::{PlaymeError, Result};
pub use method::MethodPath;
pub use query::{QueryString, API_KEY_PARAM};
pub use request::{Request, DEFAULT_BASE_URL};
pub use response::Response;
pub use status::{ResponseStatus, StatusCategory};
