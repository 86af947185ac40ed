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

//! UI rendering logic for the track table.
//!
//! This module handles the visual representation of track data, including
//! column layout, selection highlighting, and theme application using the
//! Ratatui widget system.

use ratatui::{Frame, layout::{Alignment, Constraint, Rect}, style::{Color, Style, Stylize}, text::Line, widgets::{Block, Cell, Row, Table}};

use crate::{components::TrackTable, render::Render, theme::Theme, util::format::format_time};

impl Render for TrackTable<'_> {
    fn draw(&mut self, f: &mut Frame, area: Rect, theme: &Theme) {
        self.draw_table(f, area, theme);
    }
}

impl TrackTable<'_> {
    fn draw_table(&mut self, f: &mut Frame, area: Rect, theme: &Theme) {
        let show_artist = self.show_artist;
        let show_album = self.show_album;

        let rows = self.tracks.iter().map(|item| {
            // Tracks with no stream URL stay listed but render dimmed.
            let unplayable = !item.playable();
            let cell_colour = move |colour| if unplayable { theme.table_unplayable_fg } else { colour };

            let row_number = format!("{}", item.index + 1);
            let time = format_time(item.duration_millis / 1000);

            let mut cells = vec![
                Cell::from(Line::from(row_number).style(Style::default().fg(cell_colour(theme.table_track_number_fg))).alignment(Alignment::Right)),
                Cell::from(Line::from(item.title.as_str()).style(Style::default().fg(cell_colour(theme.table_track_fg)))),
            ];
            if show_artist {
                cells.push(Cell::from(Line::from(item.artist.as_str()).style(Style::default().fg(cell_colour(theme.table_artist_fg)))));
            }
            if show_album {
                cells.push(Cell::from(Line::from(item.album.as_str()).style(Style::default().fg(cell_colour(theme.table_album_fg)))));
            }
            cells.push(Cell::from(Line::from(time).style(Style::default().fg(cell_colour(theme.table_time_fg))).alignment(Alignment::Right)));

            Row::new(cells)
        });

        let mut widths = vec![Constraint::Length(4), Constraint::Percentage(40)];
        let mut header_cells = vec![
            Cell::from(Line::from("#").alignment(Alignment::Right)),
            Cell::from("Title"),
        ];
        if show_artist {
            widths.push(Constraint::Percentage(25));
            header_cells.push(Cell::from("Artist"));
        }
        if show_album {
            widths.push(Constraint::Percentage(25));
            header_cells.push(Cell::from("Album"));
        }
        widths.push(Constraint::Length(6));
        header_cells.push(Cell::from(Line::from("Time").alignment(Alignment::Right)));

        let table = Table::new(rows, widths)
            .header(
                Row::new(header_cells)
                    .style(Style::default().bold().fg(theme.accent_colour))
                    .bottom_margin(1),
            )
            .row_highlight_style(Style::default().bg(Color::Blue).fg(Color::White))
            .block(Block::default());

        let state = &mut self.table_state;
        f.render_stateful_widget(table, area, state);
    }
}
