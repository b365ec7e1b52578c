// SPDX-License-Identifier: GPL-3.0-or-later

use std::fmt;
use std::hash::Hash;

use async_trait::async_trait;
use playme_core::{MethodPath, PlaymeClient, QueryString, Response};
use serde_json::{Map, Value};

use crate::error::{DomainError, Result};
use crate::fields::{Field, Record};
use crate::registry::Registry;

/// Typed wrapper over one JSON object of the API.
///
/// Implementors declare the label their payload is nested under and,
/// optionally, the API method that fetches a single instance.
#[async_trait]
pub trait Entity: Sized + Clone + Eq + Hash + fmt::Display + Send + Sync {
    const NAME: &'static str;
    const LABEL: &'static str;
    const COLLECTION_NAME: &'static str;
    const COLLECTION_LABEL: &'static str;

    /// Method fetching one instance by key, `None` when there is none.
    fn api_method() -> Option<MethodPath>;

    fn from_record(record: Record) -> Self;

    fn record(&self) -> &Record;

    fn from_map(map: Map<String, Value>, registry: &Registry) -> Self {
        Self::from_record(Record::cast(map, Self::LABEL, registry))
    }

    fn from_value(value: Value, registry: &Registry) -> Result<Self> {
        Record::from_value(value, Self::LABEL, registry)
            .map(Self::from_record)
            .map_err(|value| DomainError::Cast {
                name: Self::NAME,
                found: value.to_string(),
            })
    }

    /// Build an instance from a successful response.
    fn from_response(response: &Response, registry: &Registry) -> Result<Self> {
        let status = response.status()?;
        if !status.is_success() {
            return Err(DomainError::Api { status });
        }
        Ok(Self::from_map(response.content().clone(), registry))
    }

    /// Fetch one instance through [`Entity::api_method`].
    async fn request(
        client: &PlaymeClient,
        registry: &Registry,
        params: QueryString,
    ) -> Result<Self> {
        let method = Self::api_method().ok_or(DomainError::Unbound(Self::NAME))?;
        let response = method.invoke(client, params).await?;
        Self::from_response(&response, registry)
    }

    fn get(&self, key: &str) -> Option<&Field> {
        self.record().get(key)
    }

    fn to_value(&self) -> Value {
        self.record().to_value()
    }
}
