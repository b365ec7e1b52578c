// SPDX-License-Identifier: GPL-3.0-or-later

use std::fmt;
use std::hash::{Hash, Hasher};

use tokio::sync::OnceCell;

use crate::client::PlaymeClient;
use crate::error::Result;
use crate::method::MethodPath;
use crate::query::QueryString;
use crate::response::Response;

pub const DEFAULT_BASE_URL: &str = "http://api.playme.com";

/// A method paired with its query string.
///
/// Two requests addressing the same method with the same parameters have the
/// same URL and compare equal, whatever order the parameters were given in.
/// The response is fetched at most once per instance.
pub struct Request {
    method: MethodPath,
    query: QueryString,
    base_url: String,
    response: OnceCell<Response>,
}

impl Request {
    pub fn new(method: impl Into<MethodPath>, query: impl Into<QueryString>) -> Self {
        Self {
            method: method.into(),
            query: query.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            response: OnceCell::new(),
        }
    }

    /// Like [`Request::new`], with `overrides` applied on top of `query`.
    pub fn with_params(
        method: impl Into<MethodPath>,
        query: impl Into<QueryString>,
        overrides: impl Into<QueryString>,
    ) -> Self {
        let query = query.into().merged(&overrides.into());
        Self::new(method, query)
    }

    /// Address another endpoint (useful for testing with mock servers).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn method(&self) -> &MethodPath {
        &self.method
    }

    pub fn query(&self) -> &QueryString {
        &self.query
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn to_url(&self) -> String {
        format!("{}/{}?{}", self.base_url, self.method, self.query)
    }

    /// The response, fetched with `client` on first access and reused after.
    pub async fn response(&self, client: &PlaymeClient) -> Result<&Response> {
        self.response
            .get_or_try_init(|| client.execute(self))
            .await
    }

    /// Consume the request and return its response.
    pub async fn send(self, client: &PlaymeClient) -> Result<Response> {
        if let Some(response) = self.response.get() {
            return Ok(response.clone());
        }
        client.execute(&self).await
    }

    pub fn is_resolved(&self) -> bool {
        self.response.initialized()
    }
}

impl fmt::Display for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_url())
    }
}

impl fmt::Debug for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Request({:?}, {:?})", self.method, self.query)
    }
}

impl PartialEq for Request {
    fn eq(&self, other: &Self) -> bool {
        self.to_url() == other.to_url()
    }
}

impl Eq for Request {}

impl Hash for Request {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_url().hash(state);
    }
}
