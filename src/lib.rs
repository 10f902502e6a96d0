//! Balloonacy - A balloon-popping canvas game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (balloons, particles, spawning, scoring)
//! - `renderer`: Draws the simulation onto a 2D surface
//! - `platform`: Frame scheduling, score display, browser bindings
//! - `color`: RGB helpers (hex, lighten/darken)
//! - `settings`: Player preferences

pub mod color;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use color::{Rgb, Rgba};
pub use settings::{QualityPreset, Settings};

/// Game configuration constants
pub mod consts {
    /// Default canvas size (pixels)
    pub const CANVAS_WIDTH: f32 = 800.0;
    pub const CANVAS_HEIGHT: f32 = 600.0;

    /// Horizontal spawn margin from either canvas edge
    pub const SPAWN_MARGIN_X: f32 = 100.0;
    /// Balloons spawn this far below the bottom edge
    pub const SPAWN_DEPTH: f32 = 100.0;
    /// Chance of a spawn attempt succeeding on a given frame
    pub const SPAWN_CHANCE_PER_FRAME: f32 = 0.02;
    /// No spawns while this many balloons are on screen
    pub const MAX_BALLOONS: usize = 15;

    /// Cumulative spawn thresholds
    pub const GOLD_THRESHOLD: f32 = 0.10;
    pub const BOMB_THRESHOLD: f32 = 0.25;

    pub const GOLD_POINTS: i64 = 100;
    pub const BOMB_POINTS: i64 = -50;
    /// Bombs rise faster than their size tier
    pub const BOMB_SPEED_FACTOR: f32 = 1.3;

    /// Length of the string hanging below each balloon
    pub const STRING_LENGTH: f32 = 50.0;
    /// Wobble phase advance per frame
    pub const WOBBLE_STEP: f32 = 0.05;
    /// Wobble horizontal amplitude (pixels)
    pub const WOBBLE_AMPLITUDE: f32 = 2.0;
    /// Pop animation progress per frame (10 frames to complete)
    pub const POP_ANIMATION_STEP: f32 = 0.1;

    /// Particle physics (per frame)
    pub const PARTICLE_GRAVITY: f32 = 0.15;
    pub const PARTICLE_DRAG: f32 = 0.98;
}
