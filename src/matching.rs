use crate::apple_library::custom_types::SourceTrack;
use crate::normalize;
use crate::plex::custom_types::CatalogTrack;

/// Result of classifying one source track against the whole catalog.
///
/// Candidate lists keep catalog order, so the first entry is always the
/// earliest candidate scanned.
#[derive(Debug, PartialEq, Eq)]
pub enum MatchOutcome<'a> {
    SingleFull(&'a CatalogTrack),
    /// Two or more full matches
    AmbiguousFull(Vec<&'a CatalogTrack>),
    Partial(Vec<&'a CatalogTrack>),
    NameOnly(Vec<&'a CatalogTrack>),
    NoMatch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tier {
    Perfect,
    Full,
    Partial,
    NameOnly,
    Ignored,
}

#[derive(Debug, Clone, Copy)]
struct Signals {
    title: bool,
    size: bool,
    album: bool,
    artist: bool,
}

impl Signals {
    fn tier(self) -> Tier {
        let Signals {
            title,
            size,
            album,
            artist,
        } = self;

        if title && size && album && artist {
            Tier::Perfect
        } else if title && size && (album || artist) {
            Tier::Full
        } else if size && album && artist {
            Tier::Full
        } else if title && size {
            Tier::Partial
        } else if title && (album || artist) {
            Tier::Partial
        } else if size && (album || artist) {
            Tier::Partial
        } else if title {
            Tier::NameOnly
        } else {
            // Same size by coincidence
            Tier::Ignored
        }
    }
}

/// Source-side values, folded once per classification instead of per candidate.
struct SourceKey<'s> {
    title: String,
    comparable_title: String,
    album: Option<&'s str>,
    artist: String,
    size: Option<u64>,
}

impl<'s> SourceKey<'s> {
    fn new(source: &'s SourceTrack) -> Self {
        Self {
            title: source.title.to_lowercase(),
            comparable_title: normalize::derive_comparable_title(&source.title),
            album: source.album.as_deref(),
            artist: source.match_artist().to_lowercase(),
            size: source.size,
        }
    }

    fn title_matches(&self, track: &CatalogTrack) -> bool {
        if normalize::derive_filename_title(&track.file) == self.title {
            return true;
        }
        if track.title.to_lowercase() == self.title {
            return true;
        }
        !track.title.is_empty()
            && normalize::derive_comparable_title(&track.title) == self.comparable_title
    }

    /// Sizes compare by their decimal text; a missing size on either side never matches.
    fn size_matches(&self, track: &CatalogTrack) -> bool {
        match (self.size, track.size) {
            (Some(source), Some(catalog)) => source.to_string() == catalog.to_string(),
            _ => false,
        }
    }

    /// The catalog album matches either the source album as exported or the
    /// name of the folder the catalog file lives in.
    fn album_matches(&self, track: &CatalogTrack) -> bool {
        let Some(album) = track.album.as_deref().map(str::to_lowercase) else {
            return false;
        };
        self.album == Some(album.as_str())
            || normalize::derive_folder_album(&track.file).as_deref() == Some(album.as_str())
    }

    fn artist_matches(&self, track: &CatalogTrack) -> bool {
        [track.artist.as_deref(), track.album_artist.as_deref()]
            .into_iter()
            .flatten()
            .any(|artist| artist.to_lowercase() == self.artist)
    }
}

/// Classifies `source` against `catalog` in a single pass, in catalog order.
///
/// A candidate matching on title, size, album and artist ends the scan
/// immediately. Otherwise every candidate with at least a title or a size match
/// is bucketed by strength and the strongest non-empty bucket wins.
pub fn classify<'a>(source: &SourceTrack, catalog: &'a [CatalogTrack]) -> MatchOutcome<'a> {
    let key = SourceKey::new(source);

    let mut full = Vec::new();
    let mut partial = Vec::new();
    let mut name_only = Vec::new();

    for track in catalog {
        let title = key.title_matches(track);
        let size = key.size_matches(track);
        if !title && !size {
            continue;
        }

        let signals = Signals {
            title,
            size,
            album: key.album_matches(track),
            artist: key.artist_matches(track),
        };

        match signals.tier() {
            Tier::Perfect => return MatchOutcome::SingleFull(track),
            Tier::Full => full.push(track),
            Tier::Partial => partial.push(track),
            Tier::NameOnly => name_only.push(track),
            Tier::Ignored => {}
        }
    }

    if full.len() == 1 {
        MatchOutcome::SingleFull(full[0])
    } else if !full.is_empty() {
        MatchOutcome::AmbiguousFull(full)
    } else if !partial.is_empty() {
        MatchOutcome::Partial(partial)
    } else if !name_only.is_empty() {
        MatchOutcome::NameOnly(name_only)
    } else {
        MatchOutcome::NoMatch
    }
}
