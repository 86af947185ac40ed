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

//! Error taxonomy for catalog lookups.
//!
//! Keeps the failure classes the UI cares about distinct: identifiers that
//! are rejected before any request is made, resources that do not exist,
//! the service refusing the request, and the transport or payload going
//! wrong underneath.

use thiserror::Error;

#[derive(Error, Debug)]
pub(crate) enum CatalogError {
    /// Rejected up front; no request is issued for a blank identifier.
    #[error("playlist identifier is empty")]
    MissingIdentifier,

    /// Library lookups need a music user token alongside the developer
    /// token. Also rejected before any request goes out.
    #[error("library playlists require a music user token in the configuration")]
    MissingUserToken,

    #[error("playlist {0} was not found")]
    NotFound(String),

    #[error("catalog request failed with status {status}")]
    Api { status: u16 },

    #[error("catalog request failed: {0}")]
    Transport(String),

    #[error("catalog response could not be decoded: {0}")]
    Decode(#[from] std::io::Error),

    #[error("catalog response carried no playlist data")]
    EmptyDocument,
}

impl CatalogError {
    /// Maps an HTTP status line to the matching error class.
    pub(crate) fn from_status(status: u16, identifier: &str) -> Self {
        match status {
            404 => Self::NotFound(identifier.to_string()),
            _ => Self::Api { status },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_status_names_the_identifier() {
        match CatalogError::from_status(404, "pl.gone") {
            CatalogError::NotFound(identifier) => assert_eq!(identifier, "pl.gone"),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn other_statuses_map_to_api_errors() {
        assert!(matches!(
            CatalogError::from_status(401, "pl.xyz"),
            CatalogError::Api { status: 401 }
        ));
        assert!(matches!(
            CatalogError::from_status(503, "pl.xyz"),
            CatalogError::Api { status: 503 }
        ));
    }
}
