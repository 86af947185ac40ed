// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Playlist pane state and playback actions.
//!
//! This module owns the lifecycle of the displayed playlist: which resource
//! is being loaded, the installed document once a fetch lands, the derived
//! header runtime, and the track table the tracks are shown in.
//!
//! Fetches run on the command worker, so a reload can be requested while an
//! older fetch is still in flight. Each load bumps a generation counter and
//! resolutions carry the generation they answer; a resolution whose
//! generation is no longer current is dropped on the floor instead of
//! clobbering newer state.
//!
//! Playback actions are guarded: they do nothing unless the pane is ready
//! and the addressed row exists, so a key mashed during a load never plays
//! a stale or half-installed playlist.

mod event;
mod render;

use anyhow::Result;
use rand::RngExt;

use crate::{
    components::TrackTableState, model::Playlist, player::PlaybackController,
    util::format::humanize_millis,
};

/// Lifecycle of the playlist resource behind the pane.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum LoadState {
    /// No load has been requested yet.
    Idle,
    /// A fetch is in flight.
    Loading,
    /// A playlist document is installed and actionable.
    Ready,
    /// The last load failed; the message is rendered with a retry hint.
    Failed(String),
}

pub(crate) struct PlaylistPane {
    state: LoadState,
    identifier: Option<String>,
    playlist: Option<Playlist>,
    runtime: Option<String>,
    generation: u64,
    pub(crate) track_table: TrackTableState,
}

impl PlaylistPane {
    pub(crate) fn new(show_artist: bool, show_album: bool) -> Self {
        Self {
            state: LoadState::Idle,
            identifier: None,
            playlist: None,
            runtime: None,
            generation: 0,
            track_table: TrackTableState::new(show_artist, show_album),
        }
    }

    pub(crate) fn state(&self) -> &LoadState {
        &self.state
    }

    pub(crate) fn is_ready(&self) -> bool {
        self.state == LoadState::Ready
    }

    pub(crate) fn playlist(&self) -> Option<&Playlist> {
        self.playlist.as_ref()
    }

    pub(crate) fn runtime(&self) -> Option<&str> {
        self.runtime.as_deref()
    }

    pub(crate) fn identifier(&self) -> Option<&str> {
        self.identifier.as_deref()
    }

    pub(crate) fn artwork_url(&self, size: u32) -> Option<String> {
        self.playlist
            .as_ref()
            .and_then(|playlist| playlist.artwork_url(size))
    }

    /// Starts a load of the given identifier, clearing whatever was shown.
    ///
    /// Returns the new generation; the eventual resolution must present it
    /// back through [`resolve`](Self::resolve) or
    /// [`resolve_failed`](Self::resolve_failed) to be accepted.
    pub(crate) fn begin_load(&mut self, identifier: &str) -> u64 {
        self.identifier = Some(identifier.to_string());
        self.playlist = None;
        self.runtime = None;
        self.track_table.clear();
        self.state = LoadState::Loading;
        self.generation += 1;
        self.generation
    }

    /// Installs a fetched playlist if its generation is still current.
    pub(crate) fn resolve(&mut self, generation: u64, playlist: Playlist) {
        if generation != self.generation {
            return;
        }
        self.install(playlist);
    }

    /// Records a fetch failure if its generation is still current.
    pub(crate) fn resolve_failed(&mut self, generation: u64, message: String) {
        if generation != self.generation {
            return;
        }
        self.state = LoadState::Failed(message);
    }

    /// Installs a playlist document obtained outside the fetch path, such
    /// as one read from a local file.
    ///
    /// Bumps the generation so a fetch still in flight cannot replace it,
    /// and clears the identifier since there is nothing to re-fetch.
    pub(crate) fn supply(&mut self, playlist: Playlist) {
        self.generation += 1;
        self.identifier = None;
        self.install(playlist);
    }

    /// Fails the pane outright, invalidating any fetch in flight.
    pub(crate) fn fail(&mut self, message: &str) {
        self.generation += 1;
        self.playlist = None;
        self.runtime = None;
        self.track_table.clear();
        self.state = LoadState::Failed(message.to_string());
    }

    /// Restarts the load of the current identifier, when there is one.
    ///
    /// Returns the identifier and the fresh generation for the caller to
    /// dispatch the fetch with.
    pub(crate) fn reload(&mut self) -> Option<(String, u64)> {
        let identifier = self.identifier.clone()?;
        let generation = self.begin_load(&identifier);
        Some((identifier, generation))
    }

    fn install(&mut self, playlist: Playlist) {
        self.runtime = Some(humanize_millis(playlist.total_duration_millis()));
        self.track_table.set_tracks(playlist.track_summaries());
        self.playlist = Some(playlist);
        self.state = LoadState::Ready;
    }

    /// Starts playback at the given row.
    ///
    /// Ignored unless the pane is ready and the row exists.
    pub(crate) fn play_from_start(
        &self,
        controller: &impl PlaybackController,
        start_index: usize,
    ) -> Result<()> {
        if self.state != LoadState::Ready {
            return Ok(());
        }
        match self.playlist.as_ref() {
            Some(playlist) if start_index < self.track_table.tracks.len() => {
                controller.play_playlist(playlist, start_index)
            }
            _ => Ok(()),
        }
    }

    /// Starts shuffled playback from a random row.
    ///
    /// Playback has to be running before the shuffle is enabled; shuffling
    /// first would randomise the queue of whatever played previously.
    pub(crate) fn shuffle(&self, controller: &impl PlaybackController) -> Result<()> {
        if self.state != LoadState::Ready {
            return Ok(());
        }
        let track_len = self.track_table.tracks.len();
        if track_len == 0 {
            return Ok(());
        }

        let start_index = rand::rng().random_range(0..track_len);
        self.play_from_start(controller, start_index)?;
        controller.enable_shuffle()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::model::{
        PlaylistAttributes, PlaylistRelationships, Preview, Track, TrackAttributes,
        TrackRelationship,
    };

    #[derive(Debug, PartialEq)]
    enum ControllerCall {
        Play { start_index: usize },
        Shuffle,
    }

    #[derive(Default)]
    struct RecordingController {
        calls: RefCell<Vec<ControllerCall>>,
    }

    impl RecordingController {
        fn calls(&self) -> Vec<ControllerCall> {
            self.calls.take()
        }
    }

    impl PlaybackController for RecordingController {
        fn play_playlist(&self, _playlist: &Playlist, start_index: usize) -> Result<()> {
            self.calls
                .borrow_mut()
                .push(ControllerCall::Play { start_index });
            Ok(())
        }

        fn enable_shuffle(&self) -> Result<()> {
            self.calls.borrow_mut().push(ControllerCall::Shuffle);
            Ok(())
        }
    }

    fn track(id: &str, name: &str, duration_millis: u64) -> Track {
        Track {
            id: id.to_string(),
            attributes: Some(TrackAttributes {
                name: name.to_string(),
                artist_name: Some("Artist".to_string()),
                album_name: Some("Album".to_string()),
                track_number: None,
                duration_in_millis: Some(duration_millis),
                artwork: None,
                previews: vec![Preview {
                    url: format!("https://streams.test/{}.m4a", id),
                }],
            }),
        }
    }

    fn playlist(name: &str, tracks: Vec<Track>) -> Playlist {
        Playlist {
            id: "pl.test".to_string(),
            attributes: PlaylistAttributes {
                name: name.to_string(),
                curator_name: Some("Curator".to_string()),
                description: None,
                track_count: None,
                artwork: None,
            },
            relationships: Some(PlaylistRelationships {
                tracks: TrackRelationship { data: tracks },
            }),
        }
    }

    fn hits() -> Playlist {
        playlist(
            "Heavy Rotation",
            vec![
                track("1", "One", 180_000),
                track("2", "Two", 220_000),
                track("3", "Three", 0),
            ],
        )
    }

    fn ready_pane() -> PlaylistPane {
        let mut pane = PlaylistPane::new(true, true);
        pane.supply(hits());
        pane
    }

    #[test]
    fn supply_installs_the_playlist() {
        let pane = ready_pane();

        assert_eq!(pane.state(), &LoadState::Ready);
        assert_eq!(pane.playlist().map(Playlist::name), Some("Heavy Rotation"));
        assert_eq!(pane.runtime(), Some("6 min 40 sec"));
        assert_eq!(pane.track_table.tracks.len(), 3);
        assert_eq!(pane.identifier(), None);
    }

    #[test]
    fn begin_load_clears_previous_content() {
        let mut pane = ready_pane();

        pane.begin_load("pl.next");

        assert_eq!(pane.state(), &LoadState::Loading);
        assert!(pane.playlist().is_none());
        assert_eq!(pane.runtime(), None);
        assert!(pane.track_table.tracks.is_empty());
        assert_eq!(pane.identifier(), Some("pl.next"));
    }

    #[test]
    fn resolve_installs_a_current_fetch() {
        let mut pane = PlaylistPane::new(true, true);
        let generation = pane.begin_load("pl.test");

        pane.resolve(generation, hits());

        assert_eq!(pane.state(), &LoadState::Ready);
        assert_eq!(pane.runtime(), Some("6 min 40 sec"));
    }

    #[test]
    fn stale_resolve_is_discarded() {
        let mut pane = PlaylistPane::new(true, true);
        let first = pane.begin_load("pl.first");
        let second = pane.begin_load("pl.second");

        pane.resolve(first, hits());
        assert_eq!(pane.state(), &LoadState::Loading);

        pane.resolve(second, hits());
        assert_eq!(pane.state(), &LoadState::Ready);
    }

    #[test]
    fn stale_failure_is_discarded() {
        let mut pane = PlaylistPane::new(true, true);
        let first = pane.begin_load("pl.first");
        let second = pane.begin_load("pl.second");

        pane.resolve_failed(first, "HTTP 503".to_string());
        assert_eq!(pane.state(), &LoadState::Loading);

        pane.resolve_failed(second, "HTTP 503".to_string());
        assert_eq!(pane.state(), &LoadState::Failed("HTTP 503".to_string()));
    }

    #[test]
    fn supply_invalidates_a_fetch_in_flight() {
        let mut pane = PlaylistPane::new(true, true);
        let generation = pane.begin_load("pl.remote");

        pane.supply(playlist("Local Document", vec![track("9", "Nine", 60_000)]));
        pane.resolve(generation, hits());

        assert_eq!(pane.playlist().map(Playlist::name), Some("Local Document"));
    }

    #[test]
    fn fail_invalidates_a_fetch_in_flight() {
        let mut pane = PlaylistPane::new(true, true);
        let generation = pane.begin_load("pl.remote");

        pane.fail("document was unreadable");
        pane.resolve(generation, hits());

        assert_eq!(
            pane.state(),
            &LoadState::Failed("document was unreadable".to_string())
        );
    }

    #[test]
    fn reload_restarts_the_failed_identifier() {
        let mut pane = PlaylistPane::new(true, true);
        let first = pane.begin_load("pl.flaky");
        pane.resolve_failed(first, "HTTP 503".to_string());

        let (identifier, second) = pane.reload().expect("an identifier to reload");

        assert_eq!(identifier, "pl.flaky");
        assert_ne!(second, first);
        assert_eq!(pane.state(), &LoadState::Loading);
    }

    #[test]
    fn reload_without_an_identifier_is_none() {
        let mut pane = PlaylistPane::new(true, true);
        assert!(pane.reload().is_none());

        // A supplied document has no identifier behind it either.
        let mut pane = ready_pane();
        assert!(pane.reload().is_none());
    }

    #[test]
    fn play_is_ignored_while_loading() {
        let mut pane = PlaylistPane::new(true, true);
        pane.begin_load("pl.test");
        let controller = RecordingController::default();

        pane.play_from_start(&controller, 0).unwrap();
        pane.shuffle(&controller).unwrap();

        assert!(controller.calls().is_empty());
    }

    #[test]
    fn play_is_ignored_after_failure() {
        let mut pane = PlaylistPane::new(true, true);
        pane.fail("HTTP 404");
        let controller = RecordingController::default();

        pane.play_from_start(&controller, 0).unwrap();
        pane.shuffle(&controller).unwrap();

        assert!(controller.calls().is_empty());
    }

    #[test]
    fn play_out_of_bounds_is_ignored() {
        let pane = ready_pane();
        let controller = RecordingController::default();

        pane.play_from_start(&controller, 99).unwrap();

        assert!(controller.calls().is_empty());
    }

    #[test]
    fn play_from_start_addresses_the_row() {
        let pane = ready_pane();
        let controller = RecordingController::default();

        pane.play_from_start(&controller, 1).unwrap();

        assert_eq!(controller.calls(), vec![ControllerCall::Play { start_index: 1 }]);
    }

    #[test]
    fn shuffle_starts_playback_before_enabling_shuffle() {
        let pane = ready_pane();

        for _ in 0..20 {
            let controller = RecordingController::default();
            pane.shuffle(&controller).unwrap();

            match controller.calls().as_slice() {
                [ControllerCall::Play { start_index }, ControllerCall::Shuffle] => {
                    assert!(*start_index < 3);
                }
                other => panic!("unexpected call sequence: {:?}", other),
            }
        }
    }

    #[test]
    fn shuffle_of_an_empty_playlist_is_ignored() {
        let mut pane = PlaylistPane::new(true, true);
        pane.supply(playlist("Empty", vec![]));
        let controller = RecordingController::default();

        pane.shuffle(&controller).unwrap();

        assert!(controller.calls().is_empty());
    }
}
