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

//! Interactive track table widget and state management.
//!
//! This module provides a reusable table component for displaying and
//! selecting tracks. It separates persistent state (`TrackTableState`) from
//! the transient widget view (`TrackTable`); input handling reports a
//! [`TrackTableAction`] back to the owning component instead of reaching
//! into application state itself.

mod event;
mod render;

use ratatui::widgets::TableState;

use crate::model::TrackSummary;

/// An action the table asks its owner to carry out.
#[derive(Debug, PartialEq)]
pub(crate) enum TrackTableAction {
    /// Start playback at the given row index.
    ActivateCurrent(usize),
}

pub(crate) struct TrackTableState {
    pub(crate) tracks: Vec<TrackSummary>,
    pub(crate) table_state: TableState,
    show_artist: bool,
    show_album: bool,
}

impl TrackTableState {
    pub(crate) fn new(show_artist: bool, show_album: bool) -> Self {
        Self {
            tracks: vec![],
            table_state: TableState::new(),
            show_artist,
            show_album,
        }
    }

    /// Replaces the table contents, resetting scroll state and putting the
    /// cursor on the first row.
    pub(crate) fn set_tracks(&mut self, tracks: Vec<TrackSummary>) {
        self.tracks = tracks;
        self.table_state = TableState::new();
        if !self.tracks.is_empty() {
            self.table_state.select(Some(0));
        }
    }

    pub(crate) fn clear(&mut self) {
        self.tracks.clear();
        self.table_state = TableState::new();
    }

    /// The cursor row, bounds-checked against the current contents.
    pub(crate) fn selected(&self) -> Option<usize> {
        self.table_state
            .selected()
            .filter(|index| *index < self.tracks.len())
    }

    pub(crate) fn as_widget(&mut self) -> TrackTable<'_> {
        TrackTable {
            tracks: &self.tracks,
            table_state: &mut self.table_state,
            show_artist: self.show_artist,
            show_album: self.show_album,
        }
    }
}

pub(crate) struct TrackTable<'a> {
    tracks: &'a [TrackSummary],
    table_state: &'a mut TableState,
    show_artist: bool,
    show_album: bool,
}

impl<'a> TrackTable<'a> {
    fn goto_next(&mut self) {
        let len = self.tracks.len();
        if len == 0 { return; }
        let i = match self.table_state.selected() {
            Some(i) => if i >= len - 1 { 0 } else { i + 1 },
            None => 0,
        };
        self.table_state.select(Some(i));
    }

    fn goto_previous(&mut self) {
        let len = self.tracks.len();
        if len == 0 { return; }
        let i = match self.table_state.selected() {
            Some(i) => if i == 0 { len - 1 } else { i - 1 },
            None => 0,
        };
        self.table_state.select(Some(i));
    }

    // Selecting concrete indices here keeps the cursor honest for row
    // activation; TableState::select_last defers clamping to render time.
    fn goto_first(&mut self) {
        if !self.tracks.is_empty() {
            self.table_state.select(Some(0));
        }
    }

    fn goto_last(&mut self) {
        if !self.tracks.is_empty() {
            self.table_state.select(Some(self.tracks.len() - 1));
        }
    }
}
