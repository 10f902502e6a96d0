//! Balloon spawning
//!
//! One uniform roll picks the balloon type against cumulative thresholds:
//! `[0, 0.10)` gold, `[0.10, 0.25)` bomb, everything else normal.

use glam::Vec2;
use rand::Rng;
use rand::seq::IndexedRandom;

use super::balloon::{Balloon, BalloonKind, SizeTier};
use crate::color::Rgb;
use crate::consts::*;

pub const GOLD_COLOR: Rgb = Rgb::from_hex(0xFFD700);
pub const GOLD_LABEL: &str = "⭐";
pub const BOMB_COLOR: Rgb = Rgb::from_hex(0x2C3E50);
pub const BOMB_LABEL: &str = "💣";

/// Colors for normal balloons
pub const PALETTE: [Rgb; 14] = [
    Rgb::from_hex(0xFF6B6B), // Red
    Rgb::from_hex(0x4ECDC4), // Teal
    Rgb::from_hex(0x45B7D1), // Blue
    Rgb::from_hex(0xFFA07A), // Orange
    Rgb::from_hex(0x98D8C8), // Mint
    Rgb::from_hex(0xF7DC6F), // Yellow
    Rgb::from_hex(0xBB8FCE), // Purple
    Rgb::from_hex(0xEC7063), // Pink
    Rgb::from_hex(0xFF1744), // Hot pink
    Rgb::from_hex(0x76FF03), // Lime
    Rgb::from_hex(0x00BCD4), // Cyan
    Rgb::from_hex(0xFF9800), // Deep orange
    Rgb::from_hex(0xE91E63), // Magenta
    Rgb::from_hex(0x00E676), // Bright green
];

/// Create a balloon just below the bottom edge of a `canvas`-sized surface
pub fn spawn<R: Rng + ?Sized>(rng: &mut R, id: u32, canvas: Vec2) -> Balloon {
    let x = if canvas.x > SPAWN_MARGIN_X * 2.0 {
        rng.random_range(SPAWN_MARGIN_X..canvas.x - SPAWN_MARGIN_X)
    } else {
        canvas.x / 2.0
    };
    let pos = Vec2::new(x, canvas.y + SPAWN_DEPTH);

    let roll: f32 = rng.random();

    if roll < GOLD_THRESHOLD {
        let tier = SizeTier::Medium;
        return Balloon::new(id, pos, tier.radius(), GOLD_COLOR, tier.speed(), BalloonKind::Gold, GOLD_POINTS)
            .with_label(GOLD_LABEL);
    }

    if roll < BOMB_THRESHOLD {
        let tier = SizeTier::Small;
        return Balloon::new(
            id,
            pos,
            tier.radius(),
            BOMB_COLOR,
            tier.speed() * BOMB_SPEED_FACTOR,
            BalloonKind::Bomb,
            BOMB_POINTS,
        )
        .with_label(BOMB_LABEL);
    }

    let tier = *SizeTier::ALL.choose(rng).unwrap_or(&SizeTier::Medium);
    let color = *PALETTE.choose(rng).unwrap_or(&PALETTE[0]);
    Balloon::new(id, pos, tier.radius(), color, tier.speed(), BalloonKind::Normal, tier.points())
}
