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

//! Application event distribution and orchestration.
//!
//! This module defines the central event-handling logic for the application,
//! bridging the gap between user input (keyboard), background worker updates
//! (catalog fetches, audio player), and the UI rendering pipeline.
//!
//! # Architecture
//!
//! The system follows a reactive event-loop pattern:
//!
//! 1. **Capture**: Events are received via the [`AppEvent`] enum through an
//!    asynchronous channel.
//! 2. **Process**: The [`process_events`] function updates the [`App`] state,
//!    triggers commands to background workers (like the catalog fetcher or
//!    player), and drives the playlist pane's load lifecycle.
//! 3. **Render**: After each event is processed, the UI is re-drawn using the
//!   `ratatui` terminal.

use std::{io::Stdout, sync::mpsc::Sender};

use anyhow::{Result, bail};
use crossterm::event::{Event, KeyCode, KeyEvent};
use ratatui::{Terminal, prelude::CrosstermBackend};

use crate::{
    App,
    actions::commands::AppCommand,
    model::{Playlist, TrackSummary},
    player::PlayerState,
    render::draw,
};

const FINE_VOLUME_DELTA: i32 = 1;
const VOLUME_DELTA: i32 = 5;

const FINE_SEEK_DELTA: i32 = 5;
const SEEK_DELTA: i32 = 20;

#[derive(Debug)]
pub(crate) enum AppEvent {
    Key(KeyEvent),

    OpenPlaylist(String),
    ReloadPlaylist,
    PlaylistResolved {
        generation: u64,
        playlist: Box<Playlist>,
    },
    PlaylistResolveFailed {
        generation: u64,
        message: String,
    },

    PlayPlaylist(Option<usize>),
    ShufflePlaylist,
    StopPlayback,
    ShowArtworkUrl,

    QueueLoaded {
        queue: Vec<TrackSummary>,
        start: usize,
    },
    QueuePositionChanged(usize),

    PlayerStateChanged(PlayerState),
    TitleChanged(String),
    DurationChanged(u64),
    TimeChanged(f64),
    VolumeChanged(u32),
    TrackFinished,

    Tick,

    ExitApplication,

    Error(String),
    FatalError(String),
}

pub(crate) trait AppEventProcessor {
    fn process_event(&mut self, event: Event, event_tx: &Sender<AppEvent>) -> Result<()>;
}

/// Runs the main application loop, handling events and rendering the UI in the
/// terminal.
///
/// This function loops until a 'quit' event is received or the event channel
/// is closed.
pub(crate) fn process_events(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
) -> Result<()> {
    while let Ok(event) = app.event_rx.recv() {
        if matches!(event, AppEvent::ExitApplication) {
            break;
        }

        match event {
            AppEvent::Key(key) => process_key_event(app, key)?,

            AppEvent::OpenPlaylist(identifier) => open_playlist(app, &identifier)?,
            AppEvent::ReloadPlaylist => reload_playlist(app)?,

            AppEvent::PlaylistResolved {
                generation,
                playlist,
            } => app.playlist_pane.resolve(generation, *playlist),
            AppEvent::PlaylistResolveFailed {
                generation,
                message,
            } => app.playlist_pane.resolve_failed(generation, message),

            AppEvent::PlayPlaylist(start_index) => {
                app.playlist_pane
                    .play_from_start(&app.audio_player, start_index.unwrap_or(0))?;
                app.queue_shuffled = false;
            }
            AppEvent::ShufflePlaylist => {
                app.playlist_pane.shuffle(&app.audio_player)?;
                app.queue_shuffled = app.playlist_pane.is_ready();
            }
            AppEvent::StopPlayback => app.audio_player.stop()?,
            AppEvent::ShowArtworkUrl => {
                app.status = Some(
                    match app.playlist_pane.artwork_url(app.config.artwork_size) {
                        Some(url) => url,
                        None => "No artwork for this playlist".to_string(),
                    },
                );
            }

            AppEvent::QueueLoaded { queue, start } => {
                app.now_playing = queue.get(start).cloned();
                app.play_queue = queue;
            }
            AppEvent::QueuePositionChanged(position) => {
                // After a shuffle the engine's order no longer matches the
                // loaded queue; the player bar then falls back to the title
                // the engine reports.
                app.now_playing = if app.queue_shuffled {
                    None
                } else {
                    app.play_queue.get(position).cloned()
                };
            }

            // Player state
            AppEvent::PlayerStateChanged(state) => app.player_state = state,
            AppEvent::TitleChanged(title) => app.player_track_name = Some(title),
            AppEvent::DurationChanged(dur) => app.player_duration = Some(dur),
            AppEvent::VolumeChanged(vol) => app.volume = Some(vol),
            AppEvent::TrackFinished => app.player_time = app.player_duration,
            AppEvent::TimeChanged(seconds) => {
                app.player_time = Some(seconds as u64);
                if let Some(duration) = app.player_duration {
                    app.player_position = if duration > 0 {
                        Some(seconds / duration as f64)
                    } else {
                        None
                    };
                }
            }

            AppEvent::Error(message) => app.status = Some(message),
            AppEvent::FatalError(message) => bail!("{message}"),

            AppEvent::Tick => {}
            _ => {}
        }

        // Render after every event processed
        terminal.draw(|f| draw(f, app))?;
    }

    Ok(())
}

/// Starts a fetch of the given identifier through the command worker.
///
/// The pane hands out the generation the fetch must answer with; a blank
/// identifier fails the pane immediately without involving the worker.
fn open_playlist(app: &mut App, identifier: &str) -> Result<()> {
    let identifier = identifier.trim();
    if identifier.is_empty() {
        app.playlist_pane
            .fail("No playlist identifier given; try :open <id>");
        return Ok(());
    }

    let generation = app.playlist_pane.begin_load(identifier);
    app.command_tx.send(AppCommand::FetchPlaylist {
        identifier: identifier.to_string(),
        generation,
    })?;

    Ok(())
}

/// Re-issues the fetch for the pane's current identifier, covering both
/// retry-after-failure and refresh-while-ready.
fn reload_playlist(app: &mut App) -> Result<()> {
    match app.playlist_pane.reload() {
        Some((identifier, generation)) => {
            app.command_tx.send(AppCommand::FetchPlaylist {
                identifier,
                generation,
            })?;
        }
        None => app.status = Some("Nothing to reload".to_string()),
    }

    Ok(())
}

/// Maps keyboard input to application actions and playback commands.
///
/// The commander gets first refusal so `:` input captures keystrokes; the
/// playlist pane handles table navigation and row activation next; whatever
/// remains is treated as a global binding.
///
/// # Arguments
///
/// * `app` - A mutable reference to the application state.
/// * `key` - The key event captured from the terminal backend.
///
/// # Errors
///
/// Returns an error if a command fails to send to a background worker or if
/// a requested action cannot be executed.
fn process_key_event(app: &mut App, key: KeyEvent) -> Result<()> {
    let event = Event::Key(key);
    let handled = app.commander.handle_event(event, &mut app.command_tx);
    if handled {
        return Ok(());
    }

    let event = Event::Key(key);
    app.playlist_pane.process_event(event, &app.event_tx)?;

    process_global_key_event(app, key)
}

fn process_global_key_event(app: &mut App, key: KeyEvent) -> Result<()> {
    match (key.code, key.modifiers) {
        (KeyCode::Char('q'), _) => {
            app.event_tx.send(AppEvent::ExitApplication)?;
        }

        // Playlist actions
        (KeyCode::Char('p'), _) => {
            app.playlist_pane.play_from_start(&app.audio_player, 0)?;
            app.queue_shuffled = false;
        }
        (KeyCode::Char('S'), _) => {
            app.playlist_pane.shuffle(&app.audio_player)?;
            app.queue_shuffled = app.playlist_pane.is_ready();
        }
        (KeyCode::Char('r'), _) => reload_playlist(app)?,

        // Playback controls
        (KeyCode::Char(','), _) => app.audio_player.seek(-FINE_SEEK_DELTA)?,
        (KeyCode::Char('.'), _) => app.audio_player.seek(FINE_SEEK_DELTA)?,
        (KeyCode::Char('<'), _) => app.audio_player.seek(-SEEK_DELTA)?,
        (KeyCode::Char('>'), _) => app.audio_player.seek(SEEK_DELTA)?,
        (KeyCode::Char(' '), _) => app.audio_player.toggle_pause()?,
        (KeyCode::Char('x'), _) => app.audio_player.stop()?,
        (KeyCode::Char('-'), _) => app.audio_player.adjust_volume(-FINE_VOLUME_DELTA)?,
        (KeyCode::Char('='), _) => app.audio_player.adjust_volume(FINE_VOLUME_DELTA)?,
        (KeyCode::Char('_'), _) => app.audio_player.adjust_volume(-VOLUME_DELTA)?,
        (KeyCode::Char('+'), _) => app.audio_player.adjust_volume(VOLUME_DELTA)?,
        (KeyCode::Char('m'), _) => app.audio_player.toggle_mute()?,

        _ => {}
    }

    Ok(())
}
