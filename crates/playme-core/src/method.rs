// SPDX-License-Identifier: GPL-3.0-or-later

use std::fmt;

use crate::api::ROOTS;
use crate::client::PlaymeClient;
use crate::error::{PlaymeError, Result};
use crate::query::QueryString;
use crate::response::Response;

/// Segments starting with this marker are reserved and never extend a path.
pub const RESERVED_PREFIX: char = '_';

/// Dotted name of a remote API method, e.g. `album.getTracks`.
///
/// The API surface is open ended: any path can be built by chaining
/// [`MethodPath::extend`] from a root.
///
/// ```no_run
/// # use playme_core::{api, PlaymeClient, QueryString};
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = PlaymeClient::new()?;
/// let albums = api::artist()
///     .extend("getAlbums")?
///     .invoke(&client, QueryString::new().with("artistCode", 421).with("country", "us"))
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MethodPath(String);

impl MethodPath {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    /// One of the whitelisted root methods (see [`ROOTS`]).
    pub fn root(name: &str) -> Option<Self> {
        ROOTS.contains(&name).then(|| Self::new(name))
    }

    /// A new path with `segment` appended after a dot.
    pub fn extend(&self, segment: &str) -> Result<Self> {
        if segment.is_empty() || segment.starts_with(RESERVED_PREFIX) || segment.contains('.') {
            return Err(PlaymeError::InvalidMethod(format!("{}.{}", self.0, segment)));
        }
        Ok(Self(format!("{}.{}", self.0, segment)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('.')
    }

    /// Call the method with `params`, always asking for a JSON body.
    pub async fn invoke(&self, client: &PlaymeClient, params: QueryString) -> Result<Response> {
        let params = params.with("format", "json");
        client.request(self.clone(), params).send(client).await
    }
}

impl fmt::Display for MethodPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for MethodPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for MethodPath {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

impl From<String> for MethodPath {
    fn from(path: String) -> Self {
        Self(path)
    }
}

impl From<&MethodPath> for MethodPath {
    fn from(path: &MethodPath) -> Self {
        path.clone()
    }
}

impl PartialEq<str> for MethodPath {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for MethodPath {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api;

    #[test]
    fn test_extend_builds_dotted_path() {
        let method = api::artist().extend("getAlbums").unwrap();
        assert_eq!(method, "artist.getAlbums");
        assert_eq!(method, MethodPath::new("artist.getAlbums"));

        let nested = MethodPath::new("album")
            .extend("getTracks")
            .and_then(|m| m.extend("byDisc"))
            .unwrap();
        assert_eq!(nested.to_string(), "album.getTracks.byDisc");
        assert_eq!(
            nested.segments().collect::<Vec<_>>(),
            vec!["album", "getTracks", "byDisc"]
        );
    }

    #[test]
    fn test_extend_leaves_original_untouched() {
        let album = api::album();
        let _ = album.extend("get").unwrap();
        assert_eq!(album, "album");
    }

    #[test]
    fn test_reserved_segments_rejected() {
        let artist = api::artist();
        for segment in ["", "_private", "get.more"] {
            assert!(
                matches!(artist.extend(segment), Err(PlaymeError::InvalidMethod(_))),
                "segment {segment:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_root_whitelist() {
        assert_eq!(MethodPath::root("genre"), Some(api::genre()));
        assert_eq!(MethodPath::root("track"), Some(api::track()));
        assert_eq!(MethodPath::root("playlist"), None);
        // `new` is not restricted.
        assert_eq!(MethodPath::new("playlist"), "playlist");
    }
}
