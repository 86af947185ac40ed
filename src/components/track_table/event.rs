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

//! Input handling and event processing for the track table.
//!
//! This module maps raw terminal keyboard events to table navigation and
//! row activation.

use crossterm::event::{Event, KeyCode};

use crate::components::{TrackTable, TrackTableAction};

impl TrackTable<'_> {
    pub(crate) fn process_event(&mut self, event: &Event) -> Option<TrackTableAction> {
        // Internal events
        match event {
            Event::Key(key_event) => match (key_event.code, key_event.modifiers) {
                (KeyCode::Char('j'), _) | (KeyCode::Down, _) => self.goto_next(),
                (KeyCode::Char('k'), _) | (KeyCode::Up, _) => self.goto_previous(),
                (KeyCode::Char('g'), _) => self.goto_first(),
                (KeyCode::Char('G'), _) => self.goto_last(),

                _ => {}
            },

            _ => {}
        }

        // External events that result in a table action
        match event {
            Event::Key(key_event) => match (key_event.code, key_event.modifiers) {
                (KeyCode::Enter, _) => self
                    .table_state
                    .selected()
                    .filter(|index| *index < self.tracks.len())
                    .map(TrackTableAction::ActivateCurrent),

                _ => None,
            },

            _ => None,
        }
    }
}
