// SPDX-License-Identifier: GPL-3.0-or-later

use std::fmt;

use playme_core::{MethodPath, PlaymeClient, QueryString};
use serde::Serialize;

use crate::collection::Collection;
use crate::entity::Entity;
use crate::error::Result;
use crate::fields::{Field, Record};
use crate::registry::Registry;

pub type Artists = Collection<Artist>;
pub type Albums = Collection<Album>;
pub type Tracks = Collection<Track>;
pub type Items = Collection<Item>;

// ============================================================================
// Artist
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Artist(Record);

impl Artist {
    pub const CODE_PARAM: &'static str = "artistCode";

    /// Fetch an artist through `artist.get`.
    pub async fn fetch(
        client: &PlaymeClient,
        registry: &Registry,
        code: impl fmt::Display,
    ) -> Result<Self> {
        Self::request(client, registry, QueryString::new().with(Self::CODE_PARAM, code)).await
    }

    pub fn code(&self) -> Option<String> {
        self.0.text(Self::CODE_PARAM)
    }

    pub fn name(&self) -> Option<&str> {
        self.0.get("name").and_then(Field::as_str)
    }

    pub fn albums(&self) -> Option<&Albums> {
        self.0.get(Album::COLLECTION_LABEL).and_then(Field::as_albums)
    }
}

impl Entity for Artist {
    const NAME: &'static str = "Artist";
    const LABEL: &'static str = "artist";
    const COLLECTION_NAME: &'static str = "Artists";
    const COLLECTION_LABEL: &'static str = "artists";

    fn api_method() -> Option<MethodPath> {
        Some(MethodPath::new("artist.get"))
    }

    fn from_record(record: Record) -> Self {
        Self(record)
    }

    fn record(&self) -> &Record {
        &self.0
    }
}

impl fmt::Display for Artist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt_named(Self::NAME, f)
    }
}

impl Collection<Artist> {
    /// Search artists by name through `artist.searchByName`.
    pub async fn search_by_name(
        client: &PlaymeClient,
        registry: &Registry,
        name: &str,
    ) -> Result<Self> {
        let method = MethodPath::new("artist.searchByName");
        Self::request(client, registry, &method, QueryString::new().with("name", name)).await
    }
}

// ============================================================================
// Album
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Album(Record);

impl Album {
    pub const CODE_PARAM: &'static str = "albumCode";

    /// Fetch an album through `album.get`.
    pub async fn fetch(
        client: &PlaymeClient,
        registry: &Registry,
        code: impl fmt::Display,
    ) -> Result<Self> {
        Self::request(client, registry, QueryString::new().with(Self::CODE_PARAM, code)).await
    }

    pub fn code(&self) -> Option<String> {
        self.0.text(Self::CODE_PARAM)
    }

    pub fn name(&self) -> Option<&str> {
        self.0.get("name").and_then(Field::as_str)
    }

    pub fn artist(&self) -> Option<&Artist> {
        self.0.get(Artist::LABEL).and_then(Field::as_artist)
    }

    pub fn tracks(&self) -> Option<&Tracks> {
        self.0.get(Track::COLLECTION_LABEL).and_then(Field::as_tracks)
    }
}

impl Entity for Album {
    const NAME: &'static str = "Album";
    const LABEL: &'static str = "album";
    const COLLECTION_NAME: &'static str = "Albums";
    const COLLECTION_LABEL: &'static str = "albums";

    fn api_method() -> Option<MethodPath> {
        Some(MethodPath::new("album.get"))
    }

    fn from_record(record: Record) -> Self {
        Self(record)
    }

    fn record(&self) -> &Record {
        &self.0
    }
}

impl fmt::Display for Album {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt_named(Self::NAME, f)
    }
}

// ============================================================================
// Track
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Track(Record);

impl Track {
    pub const CODE_PARAM: &'static str = "trackCode";

    /// Fetch a track through `track.get`.
    pub async fn fetch(
        client: &PlaymeClient,
        registry: &Registry,
        code: impl fmt::Display,
    ) -> Result<Self> {
        Self::request(client, registry, QueryString::new().with(Self::CODE_PARAM, code)).await
    }

    pub fn code(&self) -> Option<String> {
        self.0.text(Self::CODE_PARAM)
    }

    pub fn name(&self) -> Option<&str> {
        self.0.get("name").and_then(Field::as_str)
    }

    pub fn album(&self) -> Option<&Album> {
        self.0.get(Album::LABEL).and_then(Field::as_album)
    }

    pub fn artist(&self) -> Option<&Artist> {
        self.0.get(Artist::LABEL).and_then(Field::as_artist)
    }
}

impl Entity for Track {
    const NAME: &'static str = "Track";
    const LABEL: &'static str = "track";
    const COLLECTION_NAME: &'static str = "Tracks";
    const COLLECTION_LABEL: &'static str = "tracks";

    fn api_method() -> Option<MethodPath> {
        Some(MethodPath::new("track.get"))
    }

    fn from_record(record: Record) -> Self {
        Self(record)
    }

    fn record(&self) -> &Record {
        &self.0
    }
}

impl fmt::Display for Track {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt_named(Self::NAME, f)
    }
}

// ============================================================================
// Item
// ============================================================================

/// Untyped entity with no bound API method.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Item(Record);

impl Entity for Item {
    const NAME: &'static str = "Item";
    const LABEL: &'static str = "item";
    const COLLECTION_NAME: &'static str = "Items";
    const COLLECTION_LABEL: &'static str = "items";

    fn api_method() -> Option<MethodPath> {
        None
    }

    fn from_record(record: Record) -> Self {
        Self(record)
    }

    fn record(&self) -> &Record {
        &self.0
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt_named(Self::NAME, f)
    }
}
