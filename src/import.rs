use anyhow::{Result, ensure};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use tracing::{debug, warn};

use crate::apple_library::custom_types::Playlist;
use crate::plex::custom_types::CatalogTrack;
use crate::resolver::{self, ResolveContext};

/// Somewhere resolved playlists are created.
pub trait PlaylistSink {
    /// Fails when `tracks` is empty.
    async fn create_playlist(&self, name: &str, tracks: &[&CatalogTrack]) -> Result<()>;
}

/// Prints playlists instead of creating them.
pub struct DryRunSink;

impl PlaylistSink for DryRunSink {
    async fn create_playlist(&self, name: &str, tracks: &[&CatalogTrack]) -> Result<()> {
        ensure!(!tracks.is_empty(), "no tracks resolved for \"{name}\"");
        println!("\"{name}\" ({} tracks)", tracks.len());
        for (i, track) in tracks.iter().enumerate() {
            println!("  #{} {} \u{2192} {}", i + 1, track.title, track.file);
        }
        Ok(())
    }
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub created: usize,
    pub failed: usize,
    pub source_tracks: usize,
    pub resolved_tracks: usize,
}

fn progress_bar(len: usize, hidden: bool) -> ProgressBar {
    let progress = ProgressBar::new(len as u64);
    if hidden {
        progress.set_draw_target(ProgressDrawTarget::hidden());
    } else {
        progress.set_style(
            ProgressStyle::with_template("{msg} [{elapsed_precise}] [{bar:40}] {pos}/{len}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("=> "),
        );
    }
    progress
}

/// Resolves and creates every playlist in order.
///
/// A playlist the sink rejects is counted as failed and the run moves on.
pub async fn import_playlists<'a, S: PlaylistSink>(
    playlists: &[Playlist],
    catalog: &'a [CatalogTrack],
    sink: &S,
    context: &mut ResolveContext<'a>,
) -> ImportSummary {
    let progress = progress_bar(playlists.len(), context.verbose());
    let mut summary = ImportSummary::default();

    for playlist in playlists {
        progress.set_message(playlist.name.clone());
        let tracks = resolver::resolve(&playlist.tracks, catalog, context);
        summary.source_tracks += playlist.tracks.len();
        summary.resolved_tracks += tracks.len();
        debug!(
            source = playlist.tracks.len(),
            resolved = tracks.len(),
            "resolved \"{}\"",
            playlist.name,
        );

        match sink.create_playlist(&playlist.name, &tracks).await {
            Ok(()) => summary.created += 1,
            Err(error) => {
                summary.failed += 1;
                if context.verbose() {
                    warn!("could not create \"{}\": {error:#}", playlist.name);
                }
            }
        }
        progress.inc(1);
    }

    progress.finish_and_clear();
    summary
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::matching::tests::{catalog_track, source_track};
    use crate::resolver::tests::CapturedLogs;

    /// Records created playlists and rejects empty ones the way Plex does.
    #[derive(Default)]
    struct RecordingSink {
        created: RefCell<Vec<(String, Vec<String>)>>,
    }

    impl PlaylistSink for RecordingSink {
        async fn create_playlist(&self, name: &str, tracks: &[&CatalogTrack]) -> Result<()> {
            ensure!(!tracks.is_empty(), "empty playlist");
            self.created.borrow_mut().push((
                name.to_owned(),
                tracks.iter().map(|t| t.id.clone()).collect(),
            ));
            Ok(())
        }
    }

    fn catalog() -> Vec<CatalogTrack> {
        vec![
            catalog_track(
                "c1",
                "Song A",
                "/music/Band X/Album Y/01 Song A.mp3",
                Some(1000),
                Some("Album Y"),
                Some("Band X"),
            ),
            catalog_track(
                "c2",
                "Song B",
                "/music/Band X/Album Y/02 Song B.mp3",
                Some(2000),
                Some("Album Y"),
                Some("Band X"),
            ),
        ]
    }

    #[tokio::test]
    async fn test_import_playlists_shares_cache() {
        let catalog = catalog();
        let playlists = vec![
            Playlist {
                name: "First".to_owned(),
                tracks: vec![
                    source_track("7", "03 - Song A", Some(1000)),
                    source_track("8", "Song B", Some(2000)),
                ],
            },
            Playlist {
                name: "Second".to_owned(),
                tracks: vec![source_track("8", "Song B", Some(2000))],
            },
        ];
        let sink = RecordingSink::default();
        let mut context = ResolveContext::new(true);

        let summary = import_playlists(&playlists, &catalog, &sink, &mut context).await;

        assert_eq!(
            summary,
            ImportSummary {
                created: 2,
                failed: 0,
                source_tracks: 3,
                resolved_tracks: 3,
            },
        );
        assert_eq!(
            sink.created.into_inner(),
            vec![
                (
                    "First".to_owned(),
                    vec!["c1".to_owned(), "c2".to_owned()]
                ),
                ("Second".to_owned(), vec!["c2".to_owned()]),
            ],
        );
        assert_eq!(context.stats().scans, 2);
        assert_eq!(context.stats().cache_hits, 1);
    }

    fn failing_playlists() -> Vec<Playlist> {
        vec![
            Playlist {
                name: "Nothing Matches".to_owned(),
                tracks: vec![source_track("1", "Unknown", Some(1))],
            },
            Playlist {
                name: "Empty".to_owned(),
                tracks: vec![],
            },
            Playlist {
                name: "Good".to_owned(),
                tracks: vec![source_track("8", "Song B", Some(2000))],
            },
        ]
    }

    #[tokio::test]
    async fn test_import_playlists_continues_after_sink_failure() {
        let catalog = catalog();
        let playlists = failing_playlists();
        let sink = RecordingSink::default();
        let logs = CapturedLogs::default();
        let _guard = tracing::subscriber::set_default(logs.subscriber());
        let mut context = ResolveContext::new(false);

        let summary = import_playlists(&playlists, &catalog, &sink, &mut context).await;

        assert_eq!(summary.created, 1);
        assert_eq!(summary.failed, 2);
        assert_eq!(summary.resolved_tracks, 1);
        assert_eq!(sink.created.borrow().len(), 1);
        assert_eq!(sink.created.borrow()[0].0, "Good");
        assert_eq!(logs.contents(), "");
    }

    #[tokio::test]
    async fn test_import_playlists_verbose_reports_sink_failure() {
        let catalog = catalog();
        let playlists = failing_playlists();
        let sink = RecordingSink::default();
        let logs = CapturedLogs::default();
        let _guard = tracing::subscriber::set_default(logs.subscriber());
        let mut context = ResolveContext::new(true);

        let summary = import_playlists(&playlists, &catalog, &sink, &mut context).await;

        assert_eq!(summary.failed, 2);
        let logs = logs.contents();
        assert!(logs.contains("could not create \"Nothing Matches\": empty playlist"));
        assert!(logs.contains("could not create \"Empty\": empty playlist"));
        assert!(!logs.contains("could not create \"Good\""));
    }

    #[tokio::test]
    async fn test_dry_run_sink_rejects_empty_playlist() {
        assert!(DryRunSink.create_playlist("Empty", &[]).await.is_err());
        let catalog = catalog();
        assert!(
            DryRunSink
                .create_playlist("One", &[&catalog[0]])
                .await
                .is_ok()
        );
    }
}
