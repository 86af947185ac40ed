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

//! Audio playback control and state management.
//!
//! This module provides the high-level [`AudioPlayer`] interface used by the
//! UI to control music playback. It manages a background worker thread that
//! interfaces with the underlying audio library (MPV), ensuring that heavy
//! audio operations do not block the main application thread.
//!
//! Components drive playback through the [`PlaybackController`] trait rather
//! than the concrete player, so tests can substitute a recording double and
//! assert on the command sequence.

mod commands;

use std::sync::mpsc;

use anyhow::Result;

use crate::{
    actions::events::AppEvent,
    model::{Playlist, TrackSummary},
    player::commands::AudioPlayerCommand,
};

/// Represents the current playback status of the audio engine.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum PlayerState {
    Playing,
    Paused,
    Stopped,
}

/// Playback operations a component may request.
///
/// `play_playlist` loads the playlist's playable tracks as a queue and starts
/// at the given track index; `enable_shuffle` randomises the play order of
/// the loaded queue. Callers wanting shuffled playback must start playback
/// first and enable shuffle second, otherwise the shuffle applies to a stale
/// or empty queue.
pub(crate) trait PlaybackController {
    fn play_playlist(&self, playlist: &Playlist, start_index: usize) -> Result<()>;

    fn enable_shuffle(&self) -> Result<()>;
}

/// A handle to the audio playback engine.
///
/// This struct acts as a command proxy; it does not perform audio processing
/// itself but instead sends instructions to a background worker thread.
pub(crate) struct AudioPlayer {
    /// Channel for sending commands to the background worker thread.
    command_tx: mpsc::Sender<AudioPlayerCommand>,
    /// Channel for broadcasting queue updates back to the main event loop.
    event_tx: mpsc::Sender<AppEvent>,
}

impl AudioPlayer {
    /// Spawns the audio worker thread and returns a new player handle.
    ///
    /// # Arguments
    ///
    /// * `event_tx` - A channel to send application-level events (like progress
    ///   updates or errors) back to the main event loop.
    pub(crate) fn new(event_tx: mpsc::Sender<AppEvent>) -> Result<Self> {
        let (command_tx, command_rx) = mpsc::channel::<AudioPlayerCommand>();

        commands::spawn_player_worker(command_rx, event_tx.clone());

        Ok(Self {
            command_tx,
            event_tx,
        })
    }

    /// Builds a player handle over externally owned channels, without a
    /// worker thread behind them.
    #[cfg(test)]
    fn with_channels(
        command_tx: mpsc::Sender<AudioPlayerCommand>,
        event_tx: mpsc::Sender<AppEvent>,
    ) -> Self {
        Self {
            command_tx,
            event_tx,
        }
    }

    // Maps internal audio backend flags to a simplified [`PlayerState`].
    fn player_state(is_paused: bool, is_idle: bool) -> PlayerState {
        if is_idle {
            PlayerState::Stopped
        } else if is_paused {
            PlayerState::Paused
        } else {
            PlayerState::Playing
        }
    }

    /// Toggles the playback state between paused and playing.
    pub(crate) fn toggle_pause(&self) -> Result<()> {
        self.command_tx.send(AudioPlayerCommand::TogglePause)?;
        Ok(())
    }

    /// Stop playback.
    pub(crate) fn stop(&self) -> Result<()> {
        self.command_tx.send(AudioPlayerCommand::Stop)?;
        Ok(())
    }

    /// Adjusts the playback volume relative to the current level.
    ///
    /// # Arguments
    ///
    /// * `delta` - The amount to change the volume (positive or negative).
    pub(crate) fn adjust_volume(&self, delta: i32) -> Result<()> {
        self.command_tx
            .send(AudioPlayerCommand::AdjustVolume(delta))?;
        Ok(())
    }

    /// Toggles the audio output between muted and unmuted.
    pub(crate) fn toggle_mute(&self) -> Result<()> {
        self.command_tx.send(AudioPlayerCommand::ToggleMute)?;
        Ok(())
    }

    /// Adjusts the playback position forward or backwards relative to the
    /// current position.
    ///
    /// # Arguments
    ///
    /// * `delta` - The amount to seek (positive or negative).
    pub(crate) fn seek(&self, delta: i32) -> Result<()> {
        self.command_tx.send(AudioPlayerCommand::Seek(delta))?;
        Ok(())
    }
}

impl PlaybackController for AudioPlayer {
    /// Loads the playlist's playable tracks into the engine and starts at
    /// the requested track.
    ///
    /// Tracks without a stream URL are dropped from the queue; the start
    /// index refers to the playlist row and is re-anchored onto the playable
    /// subset. A playlist with nothing playable reports an error event and
    /// leaves the engine untouched.
    fn play_playlist(&self, playlist: &Playlist, start_index: usize) -> Result<()> {
        let (queue, start) = match stream_queue(playlist, start_index) {
            Some(queue) => queue,
            None => {
                self.event_tx.send(AppEvent::Error(
                    "Playlist has no playable tracks".to_string(),
                ))?;
                return Ok(());
            }
        };

        let urls = queue
            .iter()
            .filter_map(|track| track.stream_url.clone())
            .collect();

        self.command_tx.send(AudioPlayerCommand::PlayQueue {
            urls,
            start_index: start,
        })?;
        self.event_tx.send(AppEvent::QueueLoaded { queue, start })?;

        Ok(())
    }

    fn enable_shuffle(&self) -> Result<()> {
        self.command_tx.send(AudioPlayerCommand::EnableShuffle)?;
        Ok(())
    }
}

/// Projects a playlist onto its playable tracks and maps a playlist row
/// index onto the queue.
///
/// When the requested row is itself unplayable the start lands on the next
/// playable track, or the last one when no later track qualifies. Returns
/// `None` when the playlist has no playable tracks at all.
fn stream_queue(playlist: &Playlist, start_index: usize) -> Option<(Vec<TrackSummary>, usize)> {
    let queue: Vec<TrackSummary> = playlist
        .track_summaries()
        .into_iter()
        .filter(TrackSummary::playable)
        .collect();

    if queue.is_empty() {
        return None;
    }

    let start = queue
        .iter()
        .position(|track| track.index >= start_index)
        .unwrap_or(queue.len() - 1);

    Some((queue, start))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        Playlist, PlaylistAttributes, PlaylistRelationships, Preview, Track, TrackAttributes,
        TrackRelationship,
    };

    fn track(id: &str, name: &str, preview: Option<&str>) -> Track {
        Track {
            id: id.to_string(),
            attributes: Some(TrackAttributes {
                name: name.to_string(),
                artist_name: Some("Artist".to_string()),
                album_name: Some("Album".to_string()),
                track_number: None,
                duration_in_millis: Some(200_000),
                artwork: None,
                previews: preview
                    .map(|url| vec![Preview {
                        url: url.to_string(),
                    }])
                    .unwrap_or_default(),
            }),
        }
    }

    fn playlist(tracks: Vec<Track>) -> Playlist {
        Playlist {
            id: "pl.test".to_string(),
            attributes: PlaylistAttributes {
                name: "Test Playlist".to_string(),
                curator_name: None,
                description: None,
                track_count: None,
                artwork: None,
            },
            relationships: Some(PlaylistRelationships {
                tracks: TrackRelationship { data: tracks },
            }),
        }
    }

    fn mixed_playlist() -> Playlist {
        playlist(vec![
            track("1", "One", Some("https://streams.test/one.m4a")),
            track("2", "Two", None),
            track("3", "Three", Some("https://streams.test/three.m4a")),
        ])
    }

    #[test]
    fn stream_queue_drops_unplayable_tracks() {
        let (queue, start) = stream_queue(&mixed_playlist(), 0).expect("playable queue");

        assert_eq!(queue.len(), 2);
        assert_eq!(queue[0].title, "One");
        assert_eq!(queue[1].title, "Three");
        assert_eq!(start, 0);
    }

    #[test]
    fn stream_queue_reanchors_start_onto_playable_subset() {
        // Row 1 is unplayable; playback starts with the next playable row.
        let (queue, start) = stream_queue(&mixed_playlist(), 1).expect("playable queue");

        assert_eq!(start, 1);
        assert_eq!(queue[start].title, "Three");
    }

    #[test]
    fn stream_queue_clamps_start_past_the_end() {
        let (queue, start) = stream_queue(&mixed_playlist(), 10).expect("playable queue");

        assert_eq!(start, queue.len() - 1);
    }

    #[test]
    fn stream_queue_is_none_without_playable_tracks() {
        let unplayable = playlist(vec![track("1", "One", None), track("2", "Two", None)]);

        assert!(stream_queue(&unplayable, 0).is_none());
        assert!(stream_queue(&playlist(vec![]), 0).is_none());
    }

    #[test]
    fn play_playlist_loads_queue_and_reports_it() {
        let (command_tx, command_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let player = AudioPlayer::with_channels(command_tx, event_tx);

        player
            .play_playlist(&mixed_playlist(), 2)
            .expect("playable playlist");

        match command_rx.try_recv().expect("a queue command") {
            AudioPlayerCommand::PlayQueue { urls, start_index } => {
                assert_eq!(
                    urls,
                    vec![
                        "https://streams.test/one.m4a".to_string(),
                        "https://streams.test/three.m4a".to_string()
                    ]
                );
                assert_eq!(start_index, 1);
            }
            other => panic!("unexpected command: {:?}", other),
        }

        match event_rx.try_recv().expect("a queue event") {
            AppEvent::QueueLoaded { queue, start } => {
                assert_eq!(queue.len(), 2);
                assert_eq!(start, 1);
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[test]
    fn play_playlist_reports_a_fully_unplayable_playlist() {
        let (command_tx, command_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let player = AudioPlayer::with_channels(command_tx, event_tx);
        let unplayable = playlist(vec![track("1", "One", None)]);

        player
            .play_playlist(&unplayable, 0)
            .expect("reports via event channel");

        assert!(command_rx.try_recv().is_err());
        assert!(matches!(
            event_rx.try_recv().expect("an error event"),
            AppEvent::Error(message) if message.contains("no playable tracks")
        ));
    }

    #[test]
    fn enable_shuffle_sends_the_shuffle_command() {
        let (command_tx, command_rx) = mpsc::channel();
        let (event_tx, _event_rx) = mpsc::channel();
        let player = AudioPlayer::with_channels(command_tx, event_tx);

        player.enable_shuffle().expect("command sent");

        assert!(matches!(
            command_rx.try_recv().expect("a shuffle command"),
            AudioPlayerCommand::EnableShuffle
        ));
    }
}
