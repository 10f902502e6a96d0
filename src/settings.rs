//! Game settings and preferences
//!
//! Persisted in LocalStorage on the web; native builds use defaults.

use serde::{Deserialize, Serialize};

use crate::consts::{CANVAS_HEIGHT, CANVAS_WIDTH};

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    Medium,
    #[default]
    High,
}

impl QualityPreset {
    /// Maximum live particles for this preset; `None` is unbounded
    pub fn max_particles(&self) -> Option<usize> {
        match self {
            QualityPreset::Low => Some(100),
            QualityPreset::Medium => Some(500),
            QualityPreset::High => None,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Graphics quality preset
    pub quality: QualityPreset,
    /// Pop particle effects
    pub particles: bool,
    /// Reduced motion (no wobble, no gold pulse)
    pub reduced_motion: bool,
    /// Surface size for headless runs (the browser uses the canvas element)
    pub canvas_width: f32,
    pub canvas_height: f32,
    /// Fixed RNG seed; `None` seeds from the clock
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::High,
            particles: true,
            reduced_motion: false,
            canvas_width: CANVAS_WIDTH,
            canvas_height: CANVAS_HEIGHT,
            seed: None,
        }
    }
}

impl Settings {
    /// Parse settings from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Effective particle count cap
    pub fn max_particles(&self) -> Option<usize> {
        if !self.particles {
            Some(0)
        } else {
            self.quality.max_particles()
        }
    }

    /// Whether idle balloons sway and gold balloons pulse
    pub fn effective_motion(&self) -> bool {
        !self.reduced_motion
    }

    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "balloonacy_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring malformed settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Native builds have no storage
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}
