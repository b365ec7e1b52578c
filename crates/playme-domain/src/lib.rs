// SPDX-License-Identifier: GPL-3.0-or-later

//! Typed entities built from playMe response messages.
//!
//! Response payloads are cast into [`Artist`], [`Album`] and [`Track`]
//! values and deduplicated [`Collection`]s of them. Fields whose key is a
//! label known to the [`Registry`] are cast recursively, so a track carrying
//! its album and artist exposes both as typed values.

pub mod collection;
pub mod entity;
pub mod error;
pub mod fields;
pub mod models;
pub mod registry;

pub use collection::Collection;
pub use entity::Entity;
pub use error::{DomainError, Result};
pub use fields::{Field, Record};
pub use models::{Album, Albums, Artist, Artists, Item, Items, Track, Tracks};
pub use registry::{Kind, Registry};
