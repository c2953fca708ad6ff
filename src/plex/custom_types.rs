use anyhow::{Context, Result};

use crate::plex::api_types;

/// A track already in the Plex library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogTrack {
    /// `ratingKey`
    pub id: String,
    pub title: String,
    pub album: Option<String>,
    /// Track artist, set when it differs from the album artist
    pub artist: Option<String>,
    pub album_artist: Option<String>,
    /// Path of the media file on the server
    pub file: String,
    /// Bytes
    pub size: Option<u64>,
}

impl TryFrom<api_types::library::Track> for CatalogTrack {
    type Error = anyhow::Error;

    fn try_from(value: api_types::library::Track) -> Result<Self, Self::Error> {
        let part = value
            .media
            .into_iter()
            .next()
            .and_then(|media| media.parts.into_iter().next())
            .with_context(|| {
                format!(
                    "track {} (\"{}\") has no media part",
                    value.rating_key, value.title,
                )
            })?;

        Ok(CatalogTrack {
            id: value.rating_key,
            title: value.title,
            album: value.parent_title,
            artist: value.original_title,
            album_artist: value.grandparent_title,
            file: part.file,
            size: part.size,
        })
    }
}
