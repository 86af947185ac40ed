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

//! Asynchronous application command processing.
//!
//! This module implements the command pattern used to offload blocking
//! catalog requests from the main UI thread. It provides a dedicated worker
//! loop that translates [`AppCommand`] requests into catalog fetches (and
//! other operations) and broadcasts the results back to the application via
//! [`AppEvent`]s.
//!
//! Only [`AppCommand::FetchPlaylist`] does real work here; the remaining
//! commands exist so the commander can request actions without touching
//! application state, and simply echo back as the matching event.

use anyhow::Result;
use std::{
    sync::mpsc::{Receiver, Sender},
    thread,
};

use crate::{actions::events::AppEvent, catalog::CatalogClient, config::AppConfig};

#[derive(Debug)]
pub(crate) enum AppCommand {
    FetchPlaylist { identifier: String, generation: u64 },
    OpenPlaylist(String),
    ReloadPlaylist,
    PlayPlaylist(Option<usize>),
    ShufflePlaylist,
    StopPlayback,
    ShowArtworkUrl,
    ExitApplication,
}

/// Spawns a background thread to process application commands.
///
/// This worker thread initializes its own catalog client and enters a
/// blocking loop, listening for incoming [`AppCommand`]s.
///
/// # Arguments
///
/// * `config` - The application configuration.
/// * `command_rx` - The receiving end of the command channel.
/// * `event_tx` - The sending end of the channel for broadcasting results.
pub(crate) fn spawn_command_worker(
    config: &AppConfig,
    command_rx: Receiver<AppCommand>,
    event_tx: Sender<AppEvent>,
) {
    let config = config.clone();

    thread::spawn(move || {
        let client = CatalogClient::from_config(&config);

        while let Ok(request) = command_rx.recv() {
            if let Err(e) = handle_command(&client, request, &event_tx) {
                let _ = event_tx.send(AppEvent::Error(e.to_string()));
            }
        }
    });
}

/// Orchestrates the execution of a single command.
///
/// This function implements the logic for each command and sends the result
/// back through the application event channel.
fn handle_command(
    client: &CatalogClient,
    command: AppCommand,
    event_tx: &Sender<AppEvent>,
) -> Result<()> {
    match command {
        AppCommand::FetchPlaylist {
            identifier,
            generation,
        } => {
            // A failed fetch is pane state, not a worker error; it travels
            // with the generation so stale failures can be discarded too.
            match client.fetch_playlist(&identifier) {
                Ok(playlist) => event_tx.send(AppEvent::PlaylistResolved {
                    generation,
                    playlist: Box::new(playlist),
                })?,
                Err(error) => event_tx.send(AppEvent::PlaylistResolveFailed {
                    generation,
                    message: error.to_string(),
                })?,
            }
        }
        AppCommand::OpenPlaylist(identifier) => {
            event_tx.send(AppEvent::OpenPlaylist(identifier))?;
        }
        AppCommand::ReloadPlaylist => {
            event_tx.send(AppEvent::ReloadPlaylist)?;
        }
        AppCommand::PlayPlaylist(start_index) => {
            event_tx.send(AppEvent::PlayPlaylist(start_index))?;
        }
        AppCommand::ShufflePlaylist => {
            event_tx.send(AppEvent::ShufflePlaylist)?;
        }
        AppCommand::StopPlayback => {
            event_tx.send(AppEvent::StopPlayback)?;
        }
        AppCommand::ShowArtworkUrl => {
            event_tx.send(AppEvent::ShowArtworkUrl)?;
        }
        AppCommand::ExitApplication => {
            event_tx.send(AppEvent::ExitApplication)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc;

    use super::*;

    const DOCUMENT_BODY: &str = r#"{
        "data": [{
            "id": "pl.hits",
            "type": "playlists",
            "attributes": { "name": "Heavy Rotation" },
            "relationships": { "tracks": { "data": [] } }
        }]
    }"#;

    #[test]
    fn fetch_resolves_with_its_generation() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", "/v1/catalog/us/playlists/pl.hits?include=tracks")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(DOCUMENT_BODY)
            .create();

        let client = CatalogClient::new(&server.url(), "us", "dev-token", None);
        let (event_tx, event_rx) = mpsc::channel();

        handle_command(
            &client,
            AppCommand::FetchPlaylist {
                identifier: "pl.hits".to_string(),
                generation: 7,
            },
            &event_tx,
        )
        .unwrap();

        mock.assert();
        match event_rx.try_recv().unwrap() {
            AppEvent::PlaylistResolved {
                generation,
                playlist,
            } => {
                assert_eq!(generation, 7);
                assert_eq!(playlist.name(), "Heavy Rotation");
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[test]
    fn failed_fetch_resolves_failed_with_its_generation() {
        let mut server = mockito::Server::new();
        server
            .mock("GET", "/v1/catalog/us/playlists/pl.gone?include=tracks")
            .with_status(404)
            .create();

        let client = CatalogClient::new(&server.url(), "us", "dev-token", None);
        let (event_tx, event_rx) = mpsc::channel();

        handle_command(
            &client,
            AppCommand::FetchPlaylist {
                identifier: "pl.gone".to_string(),
                generation: 3,
            },
            &event_tx,
        )
        .unwrap();

        match event_rx.try_recv().unwrap() {
            AppEvent::PlaylistResolveFailed {
                generation,
                message,
            } => {
                assert_eq!(generation, 3);
                assert!(message.contains("pl.gone"));
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[test]
    fn ui_commands_echo_as_events() {
        let server = mockito::Server::new();
        let client = CatalogClient::new(&server.url(), "us", "dev-token", None);
        let (event_tx, event_rx) = mpsc::channel();

        handle_command(
            &client,
            AppCommand::OpenPlaylist("pl.next".to_string()),
            &event_tx,
        )
        .unwrap();
        assert!(matches!(
            event_rx.try_recv().unwrap(),
            AppEvent::OpenPlaylist(identifier) if identifier == "pl.next"
        ));

        handle_command(&client, AppCommand::ReloadPlaylist, &event_tx).unwrap();
        assert!(matches!(
            event_rx.try_recv().unwrap(),
            AppEvent::ReloadPlaylist
        ));

        handle_command(&client, AppCommand::PlayPlaylist(Some(4)), &event_tx).unwrap();
        assert!(matches!(
            event_rx.try_recv().unwrap(),
            AppEvent::PlayPlaylist(Some(4))
        ));

        handle_command(&client, AppCommand::ShufflePlaylist, &event_tx).unwrap();
        assert!(matches!(
            event_rx.try_recv().unwrap(),
            AppEvent::ShufflePlaylist
        ));

        handle_command(&client, AppCommand::StopPlayback, &event_tx).unwrap();
        assert!(matches!(
            event_rx.try_recv().unwrap(),
            AppEvent::StopPlayback
        ));

        handle_command(&client, AppCommand::ShowArtworkUrl, &event_tx).unwrap();
        assert!(matches!(
            event_rx.try_recv().unwrap(),
            AppEvent::ShowArtworkUrl
        ));

        handle_command(&client, AppCommand::ExitApplication, &event_tx).unwrap();
        assert!(matches!(
            event_rx.try_recv().unwrap(),
            AppEvent::ExitApplication
        ));
    }
}
