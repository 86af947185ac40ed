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

//! Terminal emulator styling via OSC escape sequences.
//!
//! The panel paints the whole terminal window background so the UI does not
//! sit inside a black outline; these helpers issue the OSC 11/111 sequences
//! that set and restore the emulator's background color.
//!
//! # Compatibility
//!
//! Requires an emulator that understands OSC 11/111. XTerm, iTerm2,
//! Alacritty and Kitty all do; emulators that do not will ignore the
//! sequences harmlessly.

use std::io::{self, Write};

fn emit(sequence: &str) {
    let mut stdout = io::stdout();
    let _ = stdout.write_all(sequence.as_bytes());
    let _ = stdout.flush();
}

/// Sets the terminal background color to the given hex string (OSC 11).
///
/// Flushes immediately so the change lands before the alternate screen is
/// entered.
pub(crate) fn set_terminal_bg(hex_color: &str) {
    emit(&format!("\x1b]11;{}\x07", hex_color));
}

/// Restores the terminal background to the user's configured default
/// (OSC 111). Called during teardown, so failures are ignored.
pub(crate) fn reset_terminal_bg() {
    emit("\x1b]111\x07");
}
