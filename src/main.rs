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

//! # Playlist Player TUI.
//!
//! A terminal-based playlist viewer and player.
//!
//! This application coordinates a TUI frontend built with `ratatui` and a
//! background processing layer.
//!
//! It uses an event-driven architecture where:
//!
//! * The **Main Thread** manages the terminal lifecycle and UI rendering.
//! * **Background Workers** handle catalog fetches and audio playback via
//!   asynchronous command processing.
//! * **Event Loops** capture user input and system ticks to drive the UI
//!   state.
//!
//! ## Architecture
//!
//! The application follows a strict setup-run-teardown pattern to ensure the
//! terminal state is preserved even in the event of a crash. Communication
//! between the UI and background workers is handled via `std::sync::mpsc`
//! channels.

mod actions;
mod catalog;
mod commander;
mod components;
mod config;
mod model;
mod player;
mod render;
mod theme;
mod util;

use anyhow::{Context, Result};
use crossterm::{
    event::{self},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::{
    env, fs,
    io::{self},
    path::{Path, PathBuf},
    sync::mpsc::{self, Receiver, Sender},
    thread,
    time::Duration,
};

use crate::{
    actions::{
        commands::AppCommand,
        events::{AppEvent, process_events},
    },
    commander::Commander,
    components::PlaylistPane,
    config::AppConfig,
    model::{Playlist, PlaylistDocument, TrackSummary},
    player::{AudioPlayer, PlayerState},
    theme::Theme,
};

/// Where the displayed playlist comes from.
///
/// A command line argument naming an existing file is read as a playlist
/// document; anything else is treated as a catalog identifier to fetch.
#[derive(Debug, PartialEq)]
enum PlaylistSource {
    Document(PathBuf),
    Identifier(String),
}

/// Application state.
struct App {
    pub config: AppConfig,

    pub theme: Theme,

    pub event_tx: Sender<AppEvent>,
    pub event_rx: Receiver<AppEvent>,

    pub command_tx: Sender<AppCommand>,

    pub audio_player: AudioPlayer,

    pub playlist_pane: PlaylistPane,
    pub commander: Commander,

    pub play_queue: Vec<TrackSummary>,
    pub queue_shuffled: bool,

    pub player_state: PlayerState,
    pub now_playing: Option<TrackSummary>,
    pub player_track_name: Option<String>,
    pub player_duration: Option<u64>,
    pub player_time: Option<u64>,
    pub player_position: Option<f64>,
    pub volume: Option<u32>,

    pub status: Option<String>,
}

impl App {
    /// Create a new instance of application state.
    pub fn new(config: AppConfig, command_tx: Sender<AppCommand>) -> Result<Self> {
        let (event_tx, event_rx) = mpsc::channel();

        let audio_player_event_tx = event_tx.clone();

        let playlist_pane = PlaylistPane::new(config.show_artist, config.show_album);

        Ok(Self {
            config,
            theme: Theme::default(),
            event_tx,
            event_rx,
            command_tx,
            audio_player: AudioPlayer::new(audio_player_event_tx)?,
            playlist_pane,
            commander: Commander::new(),
            play_queue: Vec::new(),
            queue_shuffled: false,
            player_state: PlayerState::Stopped,
            now_playing: None,
            player_track_name: None,
            player_duration: None,
            player_time: None,
            player_position: None,
            volume: None,
            status: None,
        })
    }
}

/// The entry point of the application.
///
/// Sets up the communication channels, initializes the application state,
/// manages the terminal lifecycle, and returns an error if any part of the
/// execution fails.
fn main() -> Result<()> {
    let config = config::load_config();

    let source = resolve_playlist_source(env::args().nth(1), &config);

    let (command_tx, command_rx) = mpsc::channel();

    let mut app = App::new(config, command_tx).context("Failed to initalise application")?;

    let mut terminal = setup_terminal(&app)?;
    let res = run(&mut terminal, &mut app, command_rx, source);
    restore_terminal(&mut terminal);

    res.context("Application error occurred")
}

/// Decides which playlist the session opens with.
///
/// The first command line argument wins: an existing file is loaded as a
/// playlist document, anything else is taken as a catalog identifier. With
/// no argument the configured default identifier applies, if there is one.
fn resolve_playlist_source(argument: Option<String>, config: &AppConfig) -> Option<PlaylistSource> {
    match argument {
        Some(argument) => {
            let path = PathBuf::from(&argument);
            if path.is_file() {
                Some(PlaylistSource::Document(path))
            } else {
                Some(PlaylistSource::Identifier(argument))
            }
        }
        None => config
            .default_playlist
            .clone()
            .map(PlaylistSource::Identifier),
    }
}

/// Reads a playlist document from a local file.
///
/// Accepts both the catalog response envelope and a bare playlist object,
/// so a saved API response can be opened as-is.
fn load_playlist_document(path: &Path) -> Result<Playlist> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read playlist document {}", path.display()))?;

    if let Ok(document) = serde_json::from_str::<PlaylistDocument>(&raw) {
        if let Some(playlist) = document.data.into_iter().next() {
            return Ok(playlist);
        }
    }

    serde_json::from_str::<Playlist>(&raw)
        .with_context(|| format!("Playlist document {} was not understood", path.display()))
}

/// Prepares the terminal for the TUI application.
///
/// This function performs the following side effects:
/// * Sets the terminal background color based on the provided theme.
/// * Enables raw mode to capture all keyboard input.
/// * Switches the terminal to the alternate screen buffer.
///
/// # Errors
///
/// Returns an error if raw mode cannot be enabled or if the alternate screen
/// cannot be entered.
fn setup_terminal(app: &App) -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    // Set the background of the entire terminal window, without this we'd get
    // a thin black outline
    util::term::set_terminal_bg(&theme::Theme::to_hex(app.theme.background_colour));

    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("Failed to create terminal")?;

    Ok(terminal)
}

/// Restores the terminal to its original state.
///
/// This reverses the changes made by [`setup_terminal`], including disabling
/// raw mode, leaving the alternate screen, and resetting the background color.
/// It also ensures the cursor is made visible again.
///
/// This function is designed to be "best-effort" and does not return a result,
/// as it is typically called during cleanup or panic handling.
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) {
    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    util::term::reset_terminal_bg();
    terminal.show_cursor().ok();
}

/// Starts the application's background workers and enters the main event loop.
///
/// This function spawns several long-running background threads:
/// * A command worker to process asynchronous [`AppCommand`]s.
/// * An input thread to poll for system keyboard events.
/// * A tick thread to trigger periodic UI refreshes.
///
/// After spawning the workers, the opening playlist is put in front of the
/// pane and control passes to [`process_events`] to manage the UI and state
/// updates.
///
/// # Errors
///
/// Returns an error if the event processing loop encounters an unrecoverable
/// application error.
fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    command_rx: Receiver<AppCommand>,
    source: Option<PlaylistSource>,
) -> Result<()> {
    // Spawn a background worker to process application commands asynchronously.
    let command_event_tx = app.event_tx.clone();
    actions::commands::spawn_command_worker(&app.config, command_rx, command_event_tx);

    // Spawn a thread to translate raw key events to application events.
    let tx_keys = app.event_tx.clone();
    thread::spawn(move || {
        loop {
            if let Ok(event::Event::Key(key)) = event::read() {
                tx_keys.send(AppEvent::Key(key)).ok();
            }
        }
    });

    // Spawn a thread to send a periodic tick application event, this is
    // effectively the minimum "frame rate" for rendering the TUI application.
    let tx_tick = app.event_tx.clone();
    thread::spawn(move || {
        loop {
            let _ = tx_tick.send(AppEvent::Tick);
            thread::sleep(Duration::from_millis(250));
        }
    });

    // Initial trigger: put the opening playlist in front of the pane.
    match source {
        Some(PlaylistSource::Document(path)) => match load_playlist_document(&path) {
            Ok(playlist) => app.playlist_pane.supply(playlist),
            Err(error) => app.playlist_pane.fail(&format!("{error:#}")),
        },
        Some(PlaylistSource::Identifier(identifier)) => {
            app.event_tx.send(AppEvent::OpenPlaylist(identifier))?;
        }
        None => app.playlist_pane.fail(
            "No playlist given; pass an identifier or set default_playlist in the configuration",
        ),
    }

    // Application event loop, process events until the user quits
    process_events(terminal, app)
}
