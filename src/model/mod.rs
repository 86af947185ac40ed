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

//! Domain models and core data structures.
//!
//! This module defines the wire shape of the catalog's playlist documents
//! (a `data` envelope around playlist resources with camelCase attribute
//! objects, optional on tracks) together with the derived accessors the UI
//! relies on: track-count fallback, total runtime, artwork URL sizing, and
//! the flattened [`TrackSummary`] projection used by the track table and
//! the playback queue.

use serde::{Deserialize, Serialize};

const UNKNOWN_TITLE: &str = "Unknown Title";
const UNKNOWN_ARTIST: &str = "Unknown Artist";
const UNKNOWN_ALBUM: &str = "Unknown Album";

/// Response envelope for playlist lookups: a `data` array that carries at
/// most one playlist for a by-identifier fetch.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct PlaylistDocument {
    #[serde(default)]
    pub(crate) data: Vec<Playlist>,
}

/// A playlist resource: identifier, display attributes, and an optional
/// track relationship. The relationship is genuinely optional on the wire;
/// a playlist without one still renders its header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct Playlist {
    pub(crate) id: String,
    pub(crate) attributes: PlaylistAttributes,
    #[serde(default)]
    pub(crate) relationships: Option<PlaylistRelationships>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PlaylistAttributes {
    pub(crate) name: String,
    #[serde(default)]
    pub(crate) curator_name: Option<String>,
    #[serde(default)]
    pub(crate) description: Option<Description>,
    #[serde(default)]
    pub(crate) track_count: Option<usize>,
    #[serde(default)]
    pub(crate) artwork: Option<Artwork>,
}

/// Editorial description, offered by the catalog in a long and a short
/// variant.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub(crate) struct Description {
    #[serde(default)]
    pub(crate) standard: Option<String>,
    #[serde(default)]
    pub(crate) short: Option<String>,
}

/// Artwork reference whose `url` is a template containing `{w}`/`{h}`
/// placeholders for the requested pixel size.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct Artwork {
    pub(crate) url: String,
    #[serde(default)]
    pub(crate) width: Option<u32>,
    #[serde(default)]
    pub(crate) height: Option<u32>,
}

impl Artwork {
    /// Resolves the URL template to a square rendition of the given size.
    pub(crate) fn url_sized(&self, size: u32) -> String {
        let size = size.to_string();
        self.url.replace("{w}", &size).replace("{h}", &size)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct PlaylistRelationships {
    #[serde(default)]
    pub(crate) tracks: TrackRelationship,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub(crate) struct TrackRelationship {
    #[serde(default)]
    pub(crate) data: Vec<Track>,
}

/// A track resource. The attributes object itself can be missing for
/// tracks the catalog no longer fully resolves; such tracks still occupy
/// their slot in the playback order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct Track {
    pub(crate) id: String,
    #[serde(default)]
    pub(crate) attributes: Option<TrackAttributes>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TrackAttributes {
    pub(crate) name: String,
    #[serde(default)]
    pub(crate) artist_name: Option<String>,
    #[serde(default)]
    pub(crate) album_name: Option<String>,
    #[serde(default)]
    pub(crate) track_number: Option<u32>,
    #[serde(default)]
    pub(crate) duration_in_millis: Option<u64>,
    #[serde(default)]
    pub(crate) artwork: Option<Artwork>,
    #[serde(default)]
    pub(crate) previews: Vec<Preview>,
}

/// Preview stream reference; the only playable URL the catalog exposes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct Preview {
    pub(crate) url: String,
}

impl Playlist {
    pub(crate) fn name(&self) -> &str {
        &self.attributes.name
    }

    pub(crate) fn curator(&self) -> Option<&str> {
        self.attributes.curator_name.as_deref()
    }

    /// The editorial description, preferring the long form.
    pub(crate) fn description(&self) -> Option<&str> {
        let description = self.attributes.description.as_ref()?;
        description.standard.as_deref().or(description.short.as_deref())
    }

    /// Whether the track relationship was resolved at all. A playlist
    /// without one is displayable but its track region stays a placeholder.
    pub(crate) fn has_track_relationship(&self) -> bool {
        self.relationships.is_some()
    }

    pub(crate) fn tracks(&self) -> &[Track] {
        self.relationships
            .as_ref()
            .map(|relationships| relationships.tracks.data.as_slice())
            .unwrap_or_default()
    }

    /// The displayed track count: the explicit attribute when the catalog
    /// provides one, otherwise the length of the resolved relationship.
    pub(crate) fn track_count(&self) -> usize {
        self.attributes
            .track_count
            .unwrap_or_else(|| self.tracks().len())
    }

    /// Total runtime in milliseconds. Tracks with no attributes object or
    /// no duration contribute zero rather than poisoning the sum.
    pub(crate) fn total_duration_millis(&self) -> u64 {
        self.tracks().iter().map(Track::duration_millis).sum()
    }

    pub(crate) fn artwork_url(&self, size: u32) -> Option<String> {
        self.attributes
            .artwork
            .as_ref()
            .map(|artwork| artwork.url_sized(size))
    }

    /// Flattens the track relationship into display rows, preserving the
    /// playback order so rows stay index-addressable.
    pub(crate) fn track_summaries(&self) -> Vec<TrackSummary> {
        self.tracks()
            .iter()
            .enumerate()
            .map(|(index, track)| TrackSummary::new(index, track))
            .collect()
    }
}

impl Track {
    pub(crate) fn title(&self) -> &str {
        self.attributes
            .as_ref()
            .map(|attributes| attributes.name.as_str())
            .unwrap_or(UNKNOWN_TITLE)
    }

    pub(crate) fn duration_millis(&self) -> u64 {
        self.attributes
            .as_ref()
            .and_then(|attributes| attributes.duration_in_millis)
            .unwrap_or(0)
    }

    pub(crate) fn preview_url(&self) -> Option<&str> {
        self.attributes
            .as_ref()
            .and_then(|attributes| attributes.previews.first())
            .map(|preview| preview.url.as_str())
    }
}

/// Flat per-row projection of a track for the table, the player bar and
/// the stream queue.
#[derive(Debug, Clone)]
pub(crate) struct TrackSummary {
    pub(crate) index: usize,
    pub(crate) title: String,
    pub(crate) artist: String,
    pub(crate) album: String,
    pub(crate) duration_millis: u64,
    pub(crate) stream_url: Option<String>,
}

impl TrackSummary {
    fn new(index: usize, track: &Track) -> Self {
        let artist = track
            .attributes
            .as_ref()
            .and_then(|attributes| attributes.artist_name.clone())
            .unwrap_or_else(|| UNKNOWN_ARTIST.to_string());
        let album = track
            .attributes
            .as_ref()
            .and_then(|attributes| attributes.album_name.clone())
            .unwrap_or_else(|| UNKNOWN_ALBUM.to_string());

        Self {
            index,
            title: track.title().to_string(),
            artist,
            album,
            duration_millis: track.duration_millis(),
            stream_url: track.preview_url().map(str::to_string),
        }
    }

    pub(crate) fn playable(&self) -> bool {
        self.stream_url.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document_json() -> &'static str {
        r#"{
            "data": [{
                "id": "pl.f4d106fed2bd41149aaacabb233eb5eb",
                "type": "playlists",
                "attributes": {
                    "name": "Todays Hits",
                    "curatorName": "Apple Music Hits",
                    "description": { "standard": "The biggest songs.", "short": "Big songs." },
                    "artwork": {
                        "url": "https://example.org/cover/{w}x{h}bb.jpeg",
                        "width": 4320,
                        "height": 1080
                    }
                },
                "relationships": {
                    "tracks": {
                        "data": [
                            {
                                "id": "900032829",
                                "type": "songs",
                                "attributes": {
                                    "name": "Never Gonna Give You Up",
                                    "artistName": "Rick Astley",
                                    "albumName": "Whenever You Need Somebody",
                                    "trackNumber": 1,
                                    "durationInMillis": 180000,
                                    "previews": [{ "url": "https://example.org/previews/900032829.m4a" }]
                                }
                            },
                            {
                                "id": "900032830",
                                "type": "songs",
                                "attributes": {
                                    "name": "Together Forever",
                                    "artistName": "Rick Astley",
                                    "albumName": "Whenever You Need Somebody",
                                    "trackNumber": 2,
                                    "durationInMillis": 220000
                                }
                            },
                            { "id": "900032831", "type": "songs" }
                        ]
                    }
                }
            }]
        }"#
    }

    fn parse_playlist() -> Playlist {
        let document: PlaylistDocument =
            serde_json::from_str(document_json()).expect("document should deserialize");
        document.data.into_iter().next().expect("one playlist")
    }

    #[test]
    fn deserializes_a_catalog_shaped_document() {
        let playlist = parse_playlist();

        assert_eq!(playlist.id, "pl.f4d106fed2bd41149aaacabb233eb5eb");
        assert_eq!(playlist.name(), "Todays Hits");
        assert_eq!(playlist.curator(), Some("Apple Music Hits"));
        assert_eq!(playlist.description(), Some("The biggest songs."));
        assert_eq!(playlist.tracks().len(), 3);
    }

    #[test]
    fn track_count_falls_back_to_relationship_length() {
        let mut playlist = parse_playlist();
        assert_eq!(playlist.attributes.track_count, None);
        assert_eq!(playlist.track_count(), 3);

        playlist.attributes.track_count = Some(25);
        assert_eq!(playlist.track_count(), 25);
    }

    #[test]
    fn track_count_is_zero_without_count_or_relationship() {
        let mut playlist = parse_playlist();
        playlist.relationships = None;
        assert_eq!(playlist.track_count(), 0);
        assert!(!playlist.has_track_relationship());
    }

    #[test]
    fn total_duration_treats_missing_durations_as_zero() {
        let playlist = parse_playlist();
        // 180000 + 220000 + (attribute-less track contributing 0)
        assert_eq!(playlist.total_duration_millis(), 400_000);
    }

    #[test]
    fn total_duration_of_empty_track_list_is_zero() {
        let mut playlist = parse_playlist();
        playlist.relationships = None;
        assert_eq!(playlist.total_duration_millis(), 0);
    }

    #[test]
    fn artwork_url_replaces_both_size_placeholders() {
        let playlist = parse_playlist();
        assert_eq!(
            playlist.artwork_url(300).as_deref(),
            Some("https://example.org/cover/300x300bb.jpeg")
        );
    }

    #[test]
    fn summaries_keep_playback_order_and_fallbacks() {
        let playlist = parse_playlist();
        let summaries = playlist.track_summaries();

        assert_eq!(summaries.len(), 3);
        assert_eq!(summaries[0].index, 0);
        assert_eq!(summaries[0].title, "Never Gonna Give You Up");
        assert!(summaries[0].playable());

        // Second track has attributes but no preview stream.
        assert_eq!(summaries[1].title, "Together Forever");
        assert!(!summaries[1].playable());

        // Third track has no attributes object at all.
        assert_eq!(summaries[2].title, "Unknown Title");
        assert_eq!(summaries[2].artist, "Unknown Artist");
        assert_eq!(summaries[2].album, "Unknown Album");
        assert_eq!(summaries[2].duration_millis, 0);
        assert!(!summaries[2].playable());
    }

    #[test]
    fn description_prefers_the_long_form() {
        let mut playlist = parse_playlist();
        assert_eq!(playlist.description(), Some("The biggest songs."));

        playlist.attributes.description = Some(Description {
            standard: None,
            short: Some("Big songs.".to_string()),
        });
        assert_eq!(playlist.description(), Some("Big songs."));

        playlist.attributes.description = None;
        assert_eq!(playlist.description(), None);
    }
}
