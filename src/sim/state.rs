//! Game state and score counters
//!
//! `GameState` is the whole simulation context. It is owned by the caller and
//! passed by `&mut` into the frame and input entry points.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::balloon::Balloon;
use super::particle::{self, Particle};
use crate::color::Rgb;
use crate::platform::FrameToken;
use crate::settings::Settings;

/// Loop state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Stopped,
    Running,
}

/// Counters mirrored to the score display
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBoard {
    pub score: i64,
    pub popped: u32,
    pub missed: u32,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub phase: GamePhase,
    pub scores: ScoreBoard,
    /// Active balloons, oldest first
    pub balloons: Vec<Balloon>,
    /// Visual particles (not gameplay-affecting)
    pub particles: Vec<Particle>,
    /// Pending frame callback; `Some` exactly while running
    pub frame_token: Option<FrameToken>,
    /// Frames simulated since the last reset
    pub frame_count: u64,
    pub settings: Settings,
    pub(crate) rng: Pcg32,
    next_id: u32,
}

impl GameState {
    /// Create a new stopped game with the given seed
    pub fn new(seed: u64) -> Self {
        Self::with_settings(seed, Settings::default())
    }

    pub fn with_settings(seed: u64, settings: Settings) -> Self {
        Self {
            seed,
            phase: GamePhase::Stopped,
            scores: ScoreBoard::default(),
            balloons: Vec::new(),
            particles: Vec::new(),
            frame_token: None,
            frame_count: 0,
            settings,
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        }
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Spawn a balloon below a `canvas`-sized surface
    pub fn spawn_balloon(&mut self, canvas: Vec2) -> &Balloon {
        let id = self.next_entity_id();
        let balloon = super::spawner::spawn(&mut self.rng, id, canvas);
        log::debug!("Spawned {:?} balloon {} at x={:.0}", balloon.kind, id, balloon.pos.x);
        self.balloons.push(balloon);
        &self.balloons[self.balloons.len() - 1]
    }

    /// Emit a particle burst, bounded by the settings' particle cap
    pub fn emit_particles(&mut self, pos: Vec2, color: Rgb, count: usize) -> usize {
        let cap = self.settings.max_particles();
        particle::emit(&mut self.particles, &mut self.rng, pos, color, count, cap)
    }

    /// Drop all entities and counters, keeping the RNG stream and settings
    pub(crate) fn clear(&mut self) {
        self.phase = GamePhase::Stopped;
        self.scores = ScoreBoard::default();
        self.balloons.clear();
        self.particles.clear();
        self.frame_token = None;
        self.frame_count = 0;
    }
}
