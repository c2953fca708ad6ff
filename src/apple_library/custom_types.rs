use std::collections::HashMap;

use anyhow::{Context, Result};

use crate::apple_library::plist_types;

/// A parsed export. Playlist items are looked up in `tracks` only when the
/// playlist is asked for.
#[derive(Debug)]
pub struct Library {
    /// Keyed by the `Tracks` dictionary key
    tracks: HashMap<String, SourceTrack>,
    /// User-defined playlists, in export order
    playlists: Vec<PlaylistEntry>,
}

#[derive(Debug)]
struct PlaylistEntry {
    name: String,
    track_ids: Vec<u64>,
}

#[derive(Debug, PartialEq, Eq)]
pub struct Playlist {
    pub name: String,
    pub tracks: Vec<SourceTrack>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceTrack {
    /// `Track ID`, stable within one export
    pub id: String,
    pub title: String,
    pub artist: Option<String>,
    pub album_artist: Option<String>,
    pub album: Option<String>,
    /// Bytes
    pub size: Option<u64>,
}

impl SourceTrack {
    /// The artist compared against the catalog: the track artist, falling back
    /// to the album artist.
    pub fn match_artist(&self) -> &str {
        self.artist
            .as_deref()
            .or(self.album_artist.as_deref())
            .unwrap_or_default()
    }
}

impl From<plist_types::Track> for SourceTrack {
    fn from(track: plist_types::Track) -> Self {
        SourceTrack {
            id: track.track_id.to_string(),
            title: track.name.unwrap_or_default(),
            artist: track.artist,
            album_artist: track.album_artist,
            album: track.album,
            size: track.size,
        }
    }
}

impl plist_types::Playlist {
    fn is_user_defined(&self) -> bool {
        self.master.is_none() && self.distinguished_kind.is_none()
    }
}

impl From<plist_types::Root> for Library {
    fn from(value: plist_types::Root) -> Self {
        let tracks = value
            .tracks
            .into_iter()
            .map(|(key, track)| (key, SourceTrack::from(track)))
            .collect();

        let playlists = value
            .playlists
            .into_iter()
            .filter(plist_types::Playlist::is_user_defined)
            .map(|playlist| PlaylistEntry {
                name: playlist.name,
                track_ids: playlist.items.iter().map(|item| item.track_id).collect(),
            })
            .collect();

        Library { tracks, playlists }
    }
}

impl Library {
    /// Number of tracks in the whole export, not only in playlists.
    pub fn track_count(&self) -> usize {
        self.tracks.len()
    }

    /// Builds the user-defined playlists, keeping only those named in `filter`
    /// when one is given.
    ///
    /// Only the returned playlists have their items looked up, so an unknown
    /// track id fails the call only when its playlist is selected.
    pub fn playlists(&self, filter: Option<&[String]>) -> Result<Vec<Playlist>> {
        self.playlists
            .iter()
            .filter(|entry| filter.is_none_or(|names| names.contains(&entry.name)))
            .map(|entry| {
                let tracks = entry
                    .track_ids
                    .iter()
                    .map(|track_id| {
                        self.tracks
                            .get(&track_id.to_string())
                            .cloned()
                            .with_context(|| {
                                format!(
                                    "playlist \"{}\" references unknown track {track_id}",
                                    entry.name,
                                )
                            })
                    })
                    .collect::<Result<Vec<_>>>()?;
                Ok(Playlist {
                    name: entry.name.clone(),
                    tracks,
                })
            })
            .collect()
    }
}
