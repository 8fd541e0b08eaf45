//! Engine settings
//!
//! Timings, answer token and status texts. Every field has a default, so a
//! host can override any subset from JSON.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Engine tuning
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Milliseconds between ticks
    pub tick_interval_ms: u32,
    /// Milliseconds the failure message stays up before the ball resets
    pub reset_delay_ms: u32,
    /// Written to the answer field on success
    pub success_token: String,
    pub success_message: String,
    pub failure_message: String,
    /// Tile edge length in CSS pixels
    pub tile_size_px: u32,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            tick_interval_ms: TICK_INTERVAL_MS,
            reset_delay_ms: FAILURE_RESET_DELAY_MS,
            success_token: SUCCESS_TOKEN.to_string(),
            success_message: SUCCESS_MESSAGE.to_string(),
            failure_message: FAILURE_MESSAGE.to_string(),
            tile_size_px: TILE_SIZE_PX,
        }
    }
}

impl EngineSettings {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Global the page may define to override defaults
    #[cfg(target_arch = "wasm32")]
    const GLOBAL_KEY: &'static str = "stage4Settings";

    /// Load settings from `window.stage4Settings` (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let value = web_sys::window()
            .and_then(|w| js_sys::Reflect::get(&w, &Self::GLOBAL_KEY.into()).ok())
            .filter(|v| !v.is_undefined() && !v.is_null());

        if let Some(value) = value {
            if let Some(json) = js_sys::JSON::stringify(&value).ok().and_then(|s| s.as_string()) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from {}", Self::GLOBAL_KEY);
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring {}: {}", Self::GLOBAL_KEY, e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}
