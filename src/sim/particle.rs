//! Pop particles
//!
//! Purely cosmetic: particles never feed back into scoring.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

use super::balloon::{Balloon, BalloonKind};
use crate::color::Rgb;
use crate::consts::{PARTICLE_DRAG, PARTICLE_GRAVITY};

pub const GOLD_BURST: Rgb = Rgb::from_hex(0xFFD700);
pub const GOLD_SECONDARY_BURST: Rgb = Rgb::from_hex(0xFFA500);
pub const BOMB_BURST: Rgb = Rgb::from_hex(0xFF0000);
pub const BOMB_SMOKE_BURST: Rgb = Rgb::BLACK;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticleShape {
    Square,
    Circle,
}

/// A particle for visual effects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: Rgb,
    pub size: f32,
    /// 1 = fresh, 0 = dead; doubles as draw alpha
    pub life: f32,
    /// Life lost per frame
    pub decay: f32,
    pub rotation: f32,
    pub rotation_speed: f32,
    pub shape: ParticleShape,
}

impl Particle {
    /// Spawn with a random explosion velocity (biased slightly upward)
    pub fn new<R: Rng + ?Sized>(rng: &mut R, pos: Vec2, color: Rgb) -> Self {
        let angle = rng.random_range(0.0..TAU);
        let speed = rng.random_range(2.0..8.0);
        let lift = rng.random_range(1.0..3.0);
        let vel = Vec2::new(angle.cos() * speed, angle.sin() * speed - lift);

        Self {
            pos,
            vel,
            color,
            size: rng.random_range(3.0..8.0),
            life: 1.0,
            decay: rng.random_range(0.015..0.03),
            rotation: rng.random_range(0.0..TAU),
            rotation_speed: rng.random_range(-0.2..0.2),
            shape: if rng.random_bool(0.5) {
                ParticleShape::Square
            } else {
                ParticleShape::Circle
            },
        }
    }

    /// Integrate one frame: velocity, gravity, drag, spin, fade
    pub fn advance(&mut self) {
        self.pos += self.vel;
        self.vel.y += PARTICLE_GRAVITY;
        self.vel *= PARTICLE_DRAG;
        self.rotation += self.rotation_speed;
        self.life -= self.decay;
    }

    pub fn is_dead(&self) -> bool {
        self.life <= 0.0
    }
}

/// One colored burst of particles
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Burst {
    pub color: Rgb,
    pub count: usize,
}

/// Particle bursts for a popped balloon, in emission order
pub fn pop_bursts(balloon: &Balloon) -> Vec<Burst> {
    let base = (balloon.radius / 2.0).round() as usize;
    match balloon.kind {
        BalloonKind::Gold => vec![
            Burst { color: GOLD_BURST, count: base * 2 },
            Burst { color: GOLD_SECONDARY_BURST, count: base },
        ],
        BalloonKind::Bomb => vec![
            Burst { color: BOMB_BURST, count: (base as f32 * 1.5).ceil() as usize },
            Burst { color: BOMB_SMOKE_BURST, count: base },
        ],
        BalloonKind::Normal => vec![Burst { color: balloon.color, count: base }],
    }
}

/// Push `count` fresh particles at `pos`, never exceeding `cap` live particles
pub fn emit<R: Rng + ?Sized>(
    particles: &mut Vec<Particle>,
    rng: &mut R,
    pos: Vec2,
    color: Rgb,
    count: usize,
    cap: Option<usize>,
) -> usize {
    let count = match cap {
        Some(cap) => count.min(cap.saturating_sub(particles.len())),
        None => count,
    };
    particles.extend((0..count).map(|_| Particle::new(rng, pos, color)));
    count
}
