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

const MILLIS_PER_SECOND: u64 = 1_000;
const SECONDS_PER_MINUTE: u64 = 60;
const SECONDS_PER_HOUR: u64 = 3_600;

/// Formats a duration in seconds into a `MM:SS` string.
///
/// This is used primarily for displaying track positions and per-track
/// durations in the player interface. Durations of an hour or more roll
/// into the minutes field rather than gaining an hours field.
///
/// # Arguments
///
/// * `total_seconds` - The duration to format, represented as a 64-bit integer.
pub(crate) fn format_time(total_seconds: u64) -> String {
    let mins = total_seconds / SECONDS_PER_MINUTE;
    let secs = total_seconds % SECONDS_PER_MINUTE;
    format!("{:02}:{:02}", mins, secs)
}

/// Formats a duration in milliseconds into a readable runtime string.
///
/// This is the playlist-header form of a duration, e.g. `"6 min 40 sec"`
/// or `"1 hr 12 min"`. Sub-minute components are shown only below an hour;
/// above an hour the seconds are dropped as noise.
pub(crate) fn humanize_millis(total_millis: u64) -> String {
    let total_seconds = total_millis / MILLIS_PER_SECOND;

    let hours = total_seconds / SECONDS_PER_HOUR;
    let minutes = (total_seconds % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE;
    let seconds = total_seconds % SECONDS_PER_MINUTE;

    if hours > 0 {
        if minutes > 0 {
            format!("{} hr {} min", hours, minutes)
        } else {
            format!("{} hr", hours)
        }
    } else if minutes > 0 {
        if seconds > 0 {
            format!("{} min {} sec", minutes, seconds)
        } else {
            format!("{} min", minutes)
        }
    } else {
        format!("{} sec", seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_time_pads_minutes_and_seconds() {
        assert_eq!(format_time(0), "00:00");
        assert_eq!(format_time(65), "01:05");
        assert_eq!(format_time(599), "09:59");
    }

    #[test]
    fn format_time_rolls_hours_into_minutes() {
        assert_eq!(format_time(3600), "60:00");
        assert_eq!(format_time(3725), "62:05");
    }

    #[test]
    fn humanize_millis_zero() {
        assert_eq!(humanize_millis(0), "0 sec");
    }

    #[test]
    fn humanize_millis_sub_minute() {
        assert_eq!(humanize_millis(45_000), "45 sec");
        assert_eq!(humanize_millis(999), "0 sec");
    }

    #[test]
    fn humanize_millis_minutes_and_seconds() {
        assert_eq!(humanize_millis(400_000), "6 min 40 sec");
        assert_eq!(humanize_millis(2_700_000), "45 min");
    }

    #[test]
    fn humanize_millis_hours_drop_seconds() {
        assert_eq!(humanize_millis(4_320_000), "1 hr 12 min");
        assert_eq!(humanize_millis(3_600_000), "1 hr");
        assert_eq!(humanize_millis(3_659_000), "1 hr");
        assert_eq!(humanize_millis(7_920_000), "2 hr 12 min");
    }
}
