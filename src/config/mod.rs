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

//! Application configuration.
//!
//! This module manages the application configuration file. The catalog
//! credentials live here: the developer token authorises catalog lookups,
//! and the optional music user token additionally unlocks library
//! (`p.`-prefixed) playlists.

use serde::{Deserialize, Serialize};

const CONFIG_NAME: &str = "playbill";

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AppConfig {
    pub version: u32,
    pub api_base_url: String,
    pub storefront: String,
    pub developer_token: String,
    pub music_user_token: Option<String>,
    pub default_playlist: Option<String>,
    pub artwork_size: u32,
    pub show_artist: bool,
    pub show_album: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: 1,
            api_base_url: "https://api.music.apple.com".to_string(),
            storefront: "us".to_string(),
            developer_token: String::new(),
            music_user_token: None,
            default_playlist: None,
            artwork_size: 300,
            show_artist: true,
            show_album: true,
        }
    }
}

pub fn load_config() -> AppConfig {
    confy::load(CONFIG_NAME, None).unwrap_or_default()
}
