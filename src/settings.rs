//! Player preferences
//!
//! Persisted in LocalStorage. Game balance lives in `tuning`; this holds the
//! things a player (or deployer) would change.

use serde::{Deserialize, Serialize};

use crate::platform::storage;
use crate::score_client::DEFAULT_RANKING_URL;
use crate::tuning::Tuning;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Ranking service base URL (`/register` is appended)
    pub ranking_url: String,
    /// Pre-fills the name field after a game over
    pub last_player_name: String,
    /// Optional balance override
    pub tuning: Option<Tuning>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            ranking_url: DEFAULT_RANKING_URL.to_string(),
            last_player_name: String::new(),
            tuning: None,
        }
    }
}

impl Settings {
    /// LocalStorage key
    const STORAGE_KEY: &'static str = "sky_angel_settings";

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Tuning to play with (override or defaults)
    pub fn tuning(&self) -> Tuning {
        self.tuning.clone().unwrap_or_default()
    }

    /// Remember the name used for the last submission
    pub fn remember_player(&mut self, name: &str) {
        let name = name.trim();
        if !name.is_empty() && name != self.last_player_name {
            self.last_player_name = name.to_string();
            self.save();
        }
    }

    /// Load settings from LocalStorage, falling back to defaults
    pub fn load() -> Self {
        match storage::load(Self::STORAGE_KEY) {
            Some(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from LocalStorage");
                    settings
                }
                Err(e) => {
                    log::warn!("Ignoring unreadable settings: {}", e);
                    Self::default()
                }
            },
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Save settings to LocalStorage
    pub fn save(&self) {
        match serde_json::to_string(self) {
            Ok(json) => {
                if storage::save(Self::STORAGE_KEY, &json) {
                    log::info!("Settings saved");
                }
            }
            Err(e) => log::error!("Failed to serialize settings: {}", e),
        }
    }
}
