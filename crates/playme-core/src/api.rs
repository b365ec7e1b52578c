// SPDX-License-Identifier: GPL-3.0-or-later

//! Preconfigured root methods of the API.

use crate::method::MethodPath;

/// Root methods every path is expected to start from.
pub const ROOTS: [&str; 4] = ["artist", "album", "track", "genre"];

pub fn artist() -> MethodPath {
    MethodPath::new("artist")
}

pub fn album() -> MethodPath {
    MethodPath::new("album")
}

pub fn track() -> MethodPath {
    MethodPath::new("track")
}

pub fn genre() -> MethodPath {
    MethodPath::new("genre")
}
