// SPDX-License-Identifier: GPL-3.0-or-later

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value};

use crate::error::{PlaymeError, Result};
use crate::status::ResponseStatus;

/// Parsed response message.
///
/// Holds the object found under the top-level `response` key of the body.
/// The content is read-only once parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    content: Map<String, Value>,
}

impl Response {
    /// Parse a raw response body.
    ///
    /// Fails with [`PlaymeError::InvalidResponse`] when the body is not JSON,
    /// has no top-level `response` key, or that key does not hold an object.
    pub fn parse(body: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(body).map_err(|_| PlaymeError::InvalidResponse)?;
        match value {
            Value::Object(mut root) => match root.remove("response") {
                Some(Value::Object(content)) => Ok(Self { content }),
                _ => Err(PlaymeError::InvalidResponse),
            },
            _ => Err(PlaymeError::InvalidResponse),
        }
    }

    pub fn content(&self) -> &Map<String, Value> {
        &self.content
    }

    pub fn into_content(self) -> Map<String, Value> {
        self.content
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.content.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.content.contains_key(key)
    }

    /// Status carried by the message.
    ///
    /// Success when there is no `error` object. When there is one, its `code`
    /// must be an integer (or a string holding one); anything else is
    /// reported as [`PlaymeError::InvalidStatus`].
    pub fn status(&self) -> Result<ResponseStatus> {
        let Some(error) = self.content.get("error") else {
            return Ok(ResponseStatus::success());
        };

        let code = error
            .get("code")
            .ok_or_else(|| PlaymeError::InvalidStatus(format!("missing error code in {}", error)))?;

        let parsed = match code {
            Value::String(text) => text.trim().parse::<u32>().ok(),
            Value::Number(number) => number.as_u64().and_then(|n| u32::try_from(n).ok()),
            _ => None,
        };

        parsed
            .map(ResponseStatus::new)
            .ok_or_else(|| PlaymeError::InvalidStatus(code.to_string()))
    }
}

impl FromStr for Response {
    type Err = PlaymeError;

    fn from_str(body: &str) -> Result<Self> {
        Self::parse(body)
    }
}

/// Canonical text form: the message re-wrapped under `response`, pretty
/// printed with sorted keys and four-space indentation, with no trailing
/// whitespace on any line.
impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut root = Map::new();
        root.insert("response".to_string(), Value::Object(self.content.clone()));
        let value = canonicalize(Value::Object(root));

        let mut buf = Vec::new();
        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        value.serialize(&mut serializer).map_err(|_| fmt::Error)?;

        let text = String::from_utf8_lossy(&buf);
        let lines: Vec<&str> = text.lines().map(str::trim_end).collect();
        f.write_str(&lines.join("\n"))
    }
}

/// Rebuild every object in `value` with its keys in ascending order.
pub fn canonicalize(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            Value::Object(
                entries
                    .into_iter()
                    .map(|(key, value)| (key, canonicalize(value)))
                    .collect(),
            )
        }
        Value::Array(items) => Value::Array(items.into_iter().map(canonicalize).collect()),
        other => other,
    }
}
