use std::collections::HashMap;

use tracing::warn;

use crate::apple_library::custom_types::SourceTrack;
use crate::matching::{self, MatchOutcome};
use crate::plex::custom_types::CatalogTrack;

/// Source track id to the catalog track it resolved to, for one run.
#[derive(Debug, Default)]
pub struct ReconciliationCache<'a> {
    tracks: HashMap<String, &'a CatalogTrack>,
}

impl<'a> ReconciliationCache<'a> {
    pub fn get(&self, id: &str) -> Option<&'a CatalogTrack> {
        self.tracks.get(id).copied()
    }

    pub fn put(&mut self, id: &str, track: &'a CatalogTrack) {
        self.tracks.insert(id.to_owned(), track);
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ResolveStats {
    pub cache_hits: usize,
    /// Number of catalog scans, one per cache miss
    pub scans: usize,
    pub ambiguous: usize,
    pub dropped_name_only: usize,
    pub dropped_no_match: usize,
}

/// State shared by every playlist resolved in one run.
pub struct ResolveContext<'a> {
    cache: ReconciliationCache<'a>,
    verbose: bool,
    stats: ResolveStats,
}

impl<'a> ResolveContext<'a> {
    pub fn new(verbose: bool) -> Self {
        Self {
            cache: ReconciliationCache::default(),
            verbose,
            stats: ResolveStats::default(),
        }
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }

    pub fn cache(&self) -> &ReconciliationCache<'a> {
        &self.cache
    }

    pub fn stats(&self) -> ResolveStats {
        self.stats
    }

    fn resolve_track(
        &mut self,
        source: &SourceTrack,
        catalog: &'a [CatalogTrack],
    ) -> Option<&'a CatalogTrack> {
        if let Some(track) = self.cache.get(&source.id) {
            self.stats.cache_hits += 1;
            return Some(track);
        }

        self.stats.scans += 1;
        let track = match matching::classify(source, catalog) {
            MatchOutcome::SingleFull(track) => track,
            MatchOutcome::AmbiguousFull(candidates) => {
                self.stats.ambiguous += 1;
                if self.verbose {
                    warn!(
                        candidates = candidates.len(),
                        "multiple matches for {}, using the first",
                        describe(source),
                    );
                }
                candidates[0]
            }
            MatchOutcome::Partial(candidates) => candidates[0],
            MatchOutcome::NameOnly(_) => {
                self.stats.dropped_name_only += 1;
                return None;
            }
            MatchOutcome::NoMatch => {
                self.stats.dropped_no_match += 1;
                if self.verbose {
                    warn!("cannot find even a name match for {}, skipping", describe(source));
                }
                return None;
            }
        };

        self.cache.put(&source.id, track);
        Some(track)
    }
}

fn describe(track: &SourceTrack) -> String {
    format!(
        "{}/{}/{}",
        track.match_artist(),
        track.album.as_deref().unwrap_or_default(),
        track.title,
    )
}

/// Resolves a playlist's tracks to catalog tracks, keeping playlist order.
///
/// Tracks without a usable match are left out, so the result can be shorter
/// than `source_tracks`.
pub fn resolve<'a>(
    source_tracks: &[SourceTrack],
    catalog: &'a [CatalogTrack],
    context: &mut ResolveContext<'a>,
) -> Vec<&'a CatalogTrack> {
    source_tracks
        .iter()
        .filter_map(|source| context.resolve_track(source, catalog))
        .collect()
}
