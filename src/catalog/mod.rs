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

//! Remote music catalog client.
//!
//! Playlists are fetched over HTTP from an Apple-Music-shaped catalog API.
//! An identifier selects one of two fetch paths: identifiers carrying the
//! library prefix resolve against the user's library (which additionally
//! requires a music user token), everything else resolves against the public
//! catalog for the configured storefront.
//!
//! The client is blocking by design; it is owned and driven by the command
//! worker thread, never by the UI thread.

pub(crate) mod error;

use std::time::Duration;

use crate::{config::AppConfig, model::{Playlist, PlaylistDocument}};

pub(crate) use error::CatalogError;

/// Identifier prefix that marks a playlist as belonging to the user's
/// library rather than the public catalog.
const LIBRARY_PREFIX: &str = "p.";

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
const READ_TIMEOUT: Duration = Duration::from_secs(15);
const WRITE_TIMEOUT: Duration = Duration::from_secs(15);

/// Which fetch path a playlist identifier routes through.
///
/// Note that the prefix match is literal: `"p.abc123"` is library-scoped,
/// while `"pl.xyz"` is not (the marker is `p.`, not `p`).
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum PlaylistScope {
    Library,
    Catalog,
}

impl PlaylistScope {
    pub(crate) fn of(identifier: &str) -> Self {
        if identifier.starts_with(LIBRARY_PREFIX) {
            Self::Library
        } else {
            Self::Catalog
        }
    }
}

/// Blocking HTTP client for playlist lookups.
pub(crate) struct CatalogClient {
    agent: ureq::Agent,
    base_url: String,
    storefront: String,
    developer_token: String,
    music_user_token: Option<String>,
}

impl CatalogClient {
    /// Creates a client for the given API endpoint and credentials.
    ///
    /// A trailing slash on the base URL is tolerated and stripped.
    pub(crate) fn new(
        base_url: &str,
        storefront: &str,
        developer_token: &str,
        music_user_token: Option<&str>,
    ) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout_connect(CONNECT_TIMEOUT)
            .timeout_read(READ_TIMEOUT)
            .timeout_write(WRITE_TIMEOUT)
            .build();

        Self {
            agent,
            base_url: base_url.trim().trim_end_matches('/').to_string(),
            storefront: storefront.to_string(),
            developer_token: developer_token.to_string(),
            music_user_token: music_user_token.map(str::to_string),
        }
    }

    pub(crate) fn from_config(config: &AppConfig) -> Self {
        Self::new(
            &config.api_base_url,
            &config.storefront,
            &config.developer_token,
            config.music_user_token.as_deref(),
        )
    }

    /// Resolves a playlist by identifier, routed by [`PlaylistScope`].
    ///
    /// Blank identifiers are rejected up front; no request is issued for
    /// them.
    pub(crate) fn fetch_playlist(&self, identifier: &str) -> Result<Playlist, CatalogError> {
        let identifier = identifier.trim();
        if identifier.is_empty() {
            return Err(CatalogError::MissingIdentifier);
        }

        match PlaylistScope::of(identifier) {
            PlaylistScope::Library => self.fetch_library_playlist(identifier),
            PlaylistScope::Catalog => self.fetch_catalog_playlist(identifier),
        }
    }

    /// Fetches a playlist from the user's library.
    ///
    /// Library lookups are authorised by the developer token plus a music
    /// user token; without the latter this fails immediately with a
    /// configuration error.
    pub(crate) fn fetch_library_playlist(&self, identifier: &str) -> Result<Playlist, CatalogError> {
        let user_token = self
            .music_user_token
            .as_deref()
            .ok_or(CatalogError::MissingUserToken)?;

        let url = format!(
            "{}/v1/me/library/playlists/{}?include=tracks",
            self.base_url,
            urlencoding::encode(identifier)
        );

        let request = self
            .agent
            .get(&url)
            .set("Authorization", &self.bearer())
            .set("Music-User-Token", user_token);

        Self::request_playlist(request, identifier)
    }

    /// Fetches a playlist from the public catalog of the configured
    /// storefront.
    pub(crate) fn fetch_catalog_playlist(&self, identifier: &str) -> Result<Playlist, CatalogError> {
        let url = format!(
            "{}/v1/catalog/{}/playlists/{}?include=tracks",
            self.base_url,
            self.storefront,
            urlencoding::encode(identifier)
        );

        let request = self.agent.get(&url).set("Authorization", &self.bearer());

        Self::request_playlist(request, identifier)
    }

    fn bearer(&self) -> String {
        format!("Bearer {}", self.developer_token)
    }

    /// Issues the request and narrows the response document to its single
    /// playlist resource.
    fn request_playlist(request: ureq::Request, identifier: &str) -> Result<Playlist, CatalogError> {
        let response = request.call().map_err(|err| match err {
            ureq::Error::Status(status, _) => CatalogError::from_status(status, identifier),
            ureq::Error::Transport(transport) => CatalogError::Transport(transport.to_string()),
        })?;

        let document: PlaylistDocument = response.into_json()?;

        document
            .data
            .into_iter()
            .next()
            .ok_or(CatalogError::EmptyDocument)
    }
}
