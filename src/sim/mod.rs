//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be deterministic:
//! - One frame per scheduler callback, fixed per-frame speeds
//! - Seeded RNG only
//! - Stable iteration order (balloons oldest first)
//! - Drawing only through the `Surface` trait

pub mod autopilot;
pub mod balloon;
pub mod input;
pub mod particle;
pub mod spawner;
pub mod state;
pub mod tick;

pub use autopilot::pick_target;
pub use balloon::{Balloon, BalloonKind, SizeTier};
pub use input::{CanvasView, PointerClick, PopEvent, handle_click, pop_at};
pub use particle::{Burst, Particle, ParticleShape, pop_bursts};
pub use spawner::spawn;
pub use state::{GamePhase, GameState, ScoreBoard};
pub use tick::{FrameReport, on_frame, reset, start, step};
