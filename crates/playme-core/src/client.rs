// SPDX-License-Identifier: GPL-3.0-or-later

use std::time::Duration;

use reqwest::Client;
use tracing::{debug, trace};
use url::Url;

use crate::error::{PlaymeError, Result};
use crate::method::MethodPath;
use crate::query::{QueryString, API_KEY_PARAM};
use crate::request::{Request, DEFAULT_BASE_URL};
use crate::response::Response;

const USER_AGENT: &str = concat!("playme-rs/", env!("CARGO_PKG_VERSION"));

/// HTTP executor for API requests.
///
/// Holds the transport, the endpoint, and an optional API key that is added
/// to every request built through [`PlaymeClient::request`].
#[derive(Debug, Clone)]
pub struct PlaymeClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl PlaymeClient {
    /// Create a new client with default settings.
    pub fn new() -> Result<Self> {
        Self::builder().build()
    }

    /// Create a client builder for custom configuration.
    pub fn builder() -> PlaymeClientBuilder {
        PlaymeClientBuilder::default()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build a request against this client's endpoint.
    ///
    /// The configured API key is added unless `query` already carries one.
    pub fn request(&self, method: impl Into<MethodPath>, query: impl Into<QueryString>) -> Request {
        let mut query = query.into();
        if let Some(api_key) = &self.api_key {
            if !query.contains_key(API_KEY_PARAM) {
                query.insert(API_KEY_PARAM, api_key);
            }
        }
        Request::new(method, query).with_base_url(self.base_url.as_str())
    }

    /// Perform the HTTP GET for `request` and parse its body.
    ///
    /// The API reports its own failures in-band, so bodies of non-2xx HTTP
    /// responses go through the same parser as successful ones. Only
    /// transport failures surface as [`PlaymeError::RequestFailed`].
    pub async fn execute(&self, request: &Request) -> Result<Response> {
        // The URL carries the api key; log the redacted form instead.
        trace!(target: "playme", "GET {} {:?}", request.method(), request.query());

        let response = self.client.get(request.to_url()).send().await?;

        let status = response.status();
        debug!(target: "playme", "response status: {}", status);

        let body = response.text().await?;
        trace!(target: "playme", "response body: {}", body);

        Response::parse(&body)
    }
}

/// Builder for configuring a [`PlaymeClient`].
#[derive(Debug)]
pub struct PlaymeClientBuilder {
    base_url: String,
    api_key: Option<String>,
    timeout: Option<Duration>,
}

impl Default for PlaymeClientBuilder {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            timeout: None,
        }
    }
}

impl PlaymeClientBuilder {
    /// Set a custom base URL (useful for testing with mock servers).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the API key sent as `apikey` with every request.
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set a request timeout. Without one the transport default applies.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<PlaymeClient> {
        Url::parse(&self.base_url)
            .map_err(|e| PlaymeError::InvalidUrl(format!("{}: {}", self.base_url, e)))?;

        let mut builder = Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(PlaymeClient {
            client,
            base_url: self.base_url.trim_end_matches('/').to_string(),
            api_key: self.api_key,
        })
    }
}
