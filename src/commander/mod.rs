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

//! Command-line input logic and state management.
//!
//! This module implements the logic for a command-line processing
//! component, handling a text input component, and dispatching a
//! corresponding application command when typing is finished and a command
//! is submitted.

use std::sync::mpsc::Sender;

use anyhow::Result;
use crossterm::event::{Event, KeyCode};
use tui_input::{Input, backend::crossterm::EventHandler};

use crate::actions::commands::AppCommand;

pub(crate) struct Commander {
    active: bool,
    pub(crate) input: Input,
}

impl Commander {

    pub(crate) fn new() -> Self {
        Self {
            active: false,
            input: Input::default(),
        }
    }

    pub(crate) fn active(&self) -> bool {
        self.active
    }

    pub(crate) fn handle_event(&mut self, event: Event, command_sender: &mut Sender<AppCommand>) -> bool {
        if self.active {
            match event {
                Event::Key(key_event) => {
                    match key_event.code {
                        KeyCode::Esc => {
                            self.active = false;
                            true
                        }

                        KeyCode::Enter => {
                            let buffer = self.input.value().trim();
                            if !buffer.is_empty() {
                                let _ = self.run_command(buffer, command_sender);
                            }
                            self.input.reset();
                            // Leave command mode so the status line gets
                            // its row back.
                            self.active = false;

                            true
                        }

                        _ => {
                            // Delegate all key events to the managed input component.
                            self.input.handle_event(&event);

                            true
                        }
                    }
                }

                _ => false,
            }
        } else {
            match event {
                Event::Key(key_event) => {
                    match key_event.code {
                        KeyCode::Char(':') => {
                            self.active = true;
                            true
                        }

                        _ => false
                    }
                }

                _ => false
            }
        }
    }

    fn run_command(&self, buffer: &str, command_sender: &mut Sender<AppCommand>) -> Result<()> {
        let parts: Vec<&str> = buffer.split_whitespace().collect();

        match parts.as_slice() {
            ["q"] => command_sender.send(AppCommand::ExitApplication)?,

            ["open", identifier] | ["o", identifier] => {
                command_sender.send(AppCommand::OpenPlaylist(identifier.to_string()))?
            }
            ["reload"] | ["rl"] => command_sender.send(AppCommand::ReloadPlaylist)?,

            ["p"] => command_sender.send(AppCommand::PlayPlaylist(None))?,
            ["p", row] => {
                // Rows are addressed as displayed, starting at 1.
                if let Ok(row) = row.parse::<usize>() {
                    command_sender.send(AppCommand::PlayPlaylist(Some(row.saturating_sub(1))))?
                }
            }
            ["sh"] => command_sender.send(AppCommand::ShufflePlaylist)?,
            ["st"] => command_sender.send(AppCommand::StopPlayback)?,

            ["cover"] => command_sender.send(AppCommand::ShowArtworkUrl)?,

            [] => {}             // empty (no command)

            [_cmd, ..] => {}     // unknown command (and params)
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc::{self, Receiver};

    use crossterm::event::{KeyEvent, KeyModifiers};

    use super::*;

    fn press(commander: &mut Commander, tx: &mut Sender<AppCommand>, code: KeyCode) -> bool {
        commander.handle_event(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)), tx)
    }

    fn submit(line: &str) -> (Commander, Receiver<AppCommand>) {
        let (mut tx, rx) = mpsc::channel();
        let mut commander = Commander::new();

        press(&mut commander, &mut tx, KeyCode::Char(':'));
        for c in line.chars() {
            press(&mut commander, &mut tx, KeyCode::Char(c));
        }
        press(&mut commander, &mut tx, KeyCode::Enter);

        (commander, rx)
    }

    #[test]
    fn colon_activates_and_enter_submits() {
        let (commander, rx) = submit("q");

        assert!(!commander.active());
        assert!(matches!(rx.try_recv().unwrap(), AppCommand::ExitApplication));
    }

    #[test]
    fn escape_cancels_without_a_command() {
        let (mut tx, rx) = mpsc::channel();
        let mut commander = Commander::new();

        press(&mut commander, &mut tx, KeyCode::Char(':'));
        press(&mut commander, &mut tx, KeyCode::Char('q'));
        press(&mut commander, &mut tx, KeyCode::Esc);

        assert!(!commander.active());
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn keys_pass_through_when_inactive() {
        let (mut tx, _rx) = mpsc::channel();
        let mut commander = Commander::new();

        assert!(!press(&mut commander, &mut tx, KeyCode::Char('x')));
        assert!(!press(&mut commander, &mut tx, KeyCode::Enter));
    }

    #[test]
    fn open_maps_to_open_playlist() {
        let (_, rx) = submit("open pl.xyz");
        assert!(matches!(
            rx.try_recv().unwrap(),
            AppCommand::OpenPlaylist(identifier) if identifier == "pl.xyz"
        ));

        let (_, rx) = submit("o p.abc123");
        assert!(matches!(
            rx.try_recv().unwrap(),
            AppCommand::OpenPlaylist(identifier) if identifier == "p.abc123"
        ));
    }

    #[test]
    fn reload_and_its_alias_map_to_reload() {
        let (_, rx) = submit("reload");
        assert!(matches!(rx.try_recv().unwrap(), AppCommand::ReloadPlaylist));

        let (_, rx) = submit("rl");
        assert!(matches!(rx.try_recv().unwrap(), AppCommand::ReloadPlaylist));
    }

    #[test]
    fn play_takes_an_optional_one_based_row() {
        let (_, rx) = submit("p");
        assert!(matches!(rx.try_recv().unwrap(), AppCommand::PlayPlaylist(None)));

        let (_, rx) = submit("p 3");
        assert!(matches!(
            rx.try_recv().unwrap(),
            AppCommand::PlayPlaylist(Some(2))
        ));

        let (_, rx) = submit("p zero");
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn shuffle_stop_and_cover_map_to_their_commands() {
        let (_, rx) = submit("sh");
        assert!(matches!(rx.try_recv().unwrap(), AppCommand::ShufflePlaylist));

        let (_, rx) = submit("st");
        assert!(matches!(rx.try_recv().unwrap(), AppCommand::StopPlayback));

        let (_, rx) = submit("cover");
        assert!(matches!(rx.try_recv().unwrap(), AppCommand::ShowArtworkUrl));
    }

    #[test]
    fn unknown_commands_send_nothing() {
        let (_, rx) = submit("bogus args here");
        assert!(rx.try_recv().is_err());
    }
}
