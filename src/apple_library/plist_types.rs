use std::collections::HashMap;

use serde::Deserialize;

/// Top level of an exported `Library.xml`.
#[derive(Deserialize)]
pub struct Root {
    /// Keyed by the decimal text of each track's `Track ID`
    #[serde(rename = "Tracks", default)]
    pub(in crate::apple_library) tracks: HashMap<String, Track>,
    #[serde(rename = "Playlists", default)]
    pub(in crate::apple_library) playlists: Vec<Playlist>,
}

#[derive(Deserialize)]
pub struct Track {
    #[serde(rename = "Track ID")]
    pub(in crate::apple_library) track_id: u64,
    #[serde(rename = "Name", default)]
    pub(in crate::apple_library) name: Option<String>,
    #[serde(rename = "Artist", default)]
    pub(in crate::apple_library) artist: Option<String>,
    #[serde(rename = "Album Artist", default)]
    pub(in crate::apple_library) album_artist: Option<String>,
    #[serde(rename = "Album", default)]
    pub(in crate::apple_library) album: Option<String>,
    /// Bytes
    #[serde(rename = "Size", default)]
    pub(in crate::apple_library) size: Option<u64>,
}

#[derive(Deserialize)]
pub struct Playlist {
    #[serde(rename = "Name")]
    pub(in crate::apple_library) name: String,
    /// Only present on the library's master playlist
    #[serde(rename = "Master", default)]
    pub(in crate::apple_library) master: Option<bool>,
    /// Present on built-in playlists such as Music, Movies or Podcasts
    #[serde(rename = "Distinguished Kind", default)]
    pub(in crate::apple_library) distinguished_kind: Option<u64>,
    #[serde(rename = "Playlist Items", default)]
    pub(in crate::apple_library) items: Vec<PlaylistItem>,
}

#[derive(Deserialize)]
pub struct PlaylistItem {
    #[serde(rename = "Track ID")]
    pub(in crate::apple_library) track_id: u64,
}
