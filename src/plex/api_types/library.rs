use anyhow::{Context, Result};
use serde::Deserialize;

/* ---------- Sections ---------- */

#[derive(Deserialize)]
pub struct SectionsRoot {
    #[serde(rename = "MediaContainer")]
    pub(in crate::plex) media_container: SectionsContainer,
}

#[derive(Deserialize)]
pub struct SectionsContainer {
    #[serde(rename = "Directory", default)]
    pub(in crate::plex) directories: Vec<Section>,
}

#[derive(Deserialize)]
pub struct Section {
    /// Section id
    pub(in crate::plex) key: String,
    pub(in crate::plex) title: String,
    /// `artist` for music libraries
    #[serde(rename = "type")]
    pub(in crate::plex) section_type: String,
}

impl SectionsRoot {
    pub fn music_section_key(&self, title: &str) -> Result<&str> {
        self.media_container
            .directories
            .iter()
            .find(|s| s.title == title && s.section_type == "artist")
            .map(|s| s.key.as_str())
            .with_context(|| format!("no music library named \"{title}\""))
    }
}

/* ---------- Tracks ---------- */

#[derive(Deserialize)]
pub struct TracksRoot {
    #[serde(rename = "MediaContainer")]
    pub(in crate::plex) media_container: TracksContainer,
}

#[derive(Deserialize)]
pub struct TracksContainer {
    #[serde(rename = "totalSize", default)]
    pub(in crate::plex) total_size: Option<u32>,
    #[serde(rename = "Metadata", default)]
    pub(in crate::plex) metadata: Vec<Track>,
}

/// A track from `/library/sections/{id}/all?type=10`.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    pub(in crate::plex) rating_key: String,
    #[serde(default)]
    pub(in crate::plex) title: String,
    /// Album
    #[serde(default)]
    pub(in crate::plex) parent_title: Option<String>,
    /// Track artist, only set when it differs from the album artist
    #[serde(default)]
    pub(in crate::plex) original_title: Option<String>,
    /// Album artist
    #[serde(default)]
    pub(in crate::plex) grandparent_title: Option<String>,
    #[serde(rename = "Media", default)]
    pub(in crate::plex) media: Vec<Media>,
}

#[derive(Deserialize)]
pub struct Media {
    #[serde(rename = "Part", default)]
    pub(in crate::plex) parts: Vec<Part>,
}

#[derive(Deserialize)]
pub struct Part {
    /// Absolute path on the server
    pub(in crate::plex) file: String,
    #[serde(default)]
    pub(in crate::plex) size: Option<u64>,
}
