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

//! UI rendering logic for the playlist pane.
//!
//! The pane renders one of three faces: a centred placeholder while a load
//! is pending, a centred failure message with a retry hint, or the playlist
//! header above the track table once a document is installed.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    prelude::Rect,
    style::{Style, Stylize},
    text::Line,
    widgets::{Block, Borders, Padding, Paragraph},
};

use crate::{
    components::{LoadState, PlaylistPane},
    model::Playlist,
    render::{Render, icons::ICON_NOTE},
    theme::Theme,
};

/// Header rows: name, curator, summary, spacer, description, border.
const HEADER_HEIGHT: u16 = 6;
const ARTWORK_TILE_WIDTH: u16 = 10;

impl PlaylistPane {
    pub(crate) fn draw(&mut self, f: &mut Frame, area: Rect, theme: &Theme) {
        if let LoadState::Failed(message) = self.state() {
            let message = message.clone();
            draw_failed(f, area, theme, &message);
            return;
        }

        if !self.is_ready() {
            let placeholder = match self.identifier() {
                Some(identifier) => format!("Loading {}", identifier),
                None => "Loading playlist".to_string(),
            };
            draw_placeholder(f, area, theme, &placeholder);
            return;
        }

        self.draw_ready(f, area, theme);
    }

    fn draw_ready(&mut self, f: &mut Frame, area: Rect, theme: &Theme) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(HEADER_HEIGHT), Constraint::Min(0)])
            .split(area);

        let has_tracks = {
            let playlist = match self.playlist() {
                Some(playlist) => playlist,
                None => return,
            };
            draw_header(f, chunks[0], theme, playlist, self.runtime());
            playlist.has_track_relationship()
        };

        if has_tracks {
            self.track_table.as_widget().draw(f, chunks[1], theme);
        } else {
            // A document without a track relationship keeps its header; the
            // track region stays a placeholder.
            draw_placeholder(f, chunks[1], theme, "Loading tracks");
        }
    }
}

fn draw_header(f: &mut Frame, area: Rect, theme: &Theme, playlist: &Playlist, runtime: Option<&str>) {
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(theme.border_colour))
        .padding(Padding::horizontal(1));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(ARTWORK_TILE_WIDTH),
            Constraint::Length(2),
            Constraint::Min(0),
        ])
        .split(inner);

    draw_artwork_tile(f, chunks[0], theme);

    let curator_line = match playlist.curator() {
        Some(curator) => format!("Playlist by {}", curator),
        None => "Playlist".to_string(),
    };
    let summary_line = format!(
        "{} songs, {}",
        playlist.track_count(),
        runtime.unwrap_or("0 sec")
    );

    let mut lines = vec![
        Line::from(playlist.name().to_string())
            .style(Style::default().bold().fg(theme.accent_colour)),
        Line::from(curator_line),
        Line::from(summary_line).style(Style::default().fg(theme.table_time_fg)),
    ];
    if let Some(description) = playlist.description() {
        lines.push(Line::from(""));
        lines.push(
            Line::from(description.to_string()).style(Style::default().fg(theme.border_colour)),
        );
    }

    f.render_widget(Paragraph::new(lines), chunks[2]);
}

// A stand-in while the terminal has no real artwork: an accent note on a
// darker tile, sized to match the header.
fn draw_artwork_tile(f: &mut Frame, area: Rect, theme: &Theme) {
    let tile = Paragraph::new(ICON_NOTE)
        .style(
            Style::default()
                .fg(theme.accent_colour)
                .bg(theme.gauge_track_colour),
        )
        .alignment(Alignment::Center)
        .block(Block::default().padding(Padding::top(area.height.saturating_sub(1) / 2)));

    f.render_widget(tile, area);
}

fn draw_failed(f: &mut Frame, area: Rect, theme: &Theme, message: &str) {
    let lines = vec![
        Line::from(message.to_string()).style(Style::default().fg(theme.error_colour)),
        Line::from(""),
        Line::from("press r to retry, or :open <playlist-id>")
            .style(Style::default().fg(theme.border_colour)),
    ];

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().padding(Padding::top(area.height.saturating_sub(3) / 2)));

    f.render_widget(paragraph, area);
}

fn draw_placeholder(f: &mut Frame, area: Rect, theme: &Theme, message: &str) {
    let paragraph = Paragraph::new(message)
        .style(Style::default().fg(theme.border_colour))
        .alignment(Alignment::Center)
        .block(Block::default().padding(Padding::top(area.height / 2)));

    f.render_widget(paragraph, area);
}
