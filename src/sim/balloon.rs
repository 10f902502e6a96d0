//! Balloon entity
//!
//! Balloons rise from below the canvas at a fixed per-frame speed. Once
//! popped they stop moving and play a short pop animation before expiring.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::color::Rgb;
use crate::consts::*;

/// Balloon types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BalloonKind {
    #[default]
    Normal,
    /// Bonus balloon, always medium sized
    Gold,
    /// Penalty balloon, small and fast
    Bomb,
}

impl BalloonKind {
    /// Bombs cost points and don't count as popped
    pub fn counts_as_popped(&self) -> bool {
        *self != BalloonKind::Bomb
    }
}

/// Discrete balloon size presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SizeTier {
    Small,
    Medium,
    Large,
}

impl SizeTier {
    pub const ALL: [SizeTier; 3] = [SizeTier::Small, SizeTier::Medium, SizeTier::Large];

    pub fn radius(&self) -> f32 {
        match self {
            SizeTier::Small => 30.0,
            SizeTier::Medium => 45.0,
            SizeTier::Large => 60.0,
        }
    }

    /// Rise speed in pixels per frame (bigger is slower)
    pub fn speed(&self) -> f32 {
        match self {
            SizeTier::Small => 2.5,
            SizeTier::Medium => 1.8,
            SizeTier::Large => 1.2,
        }
    }

    pub fn points(&self) -> i64 {
        match self {
            SizeTier::Small => 30,
            SizeTier::Medium => 45,
            SizeTier::Large => 60,
        }
    }
}

/// A balloon entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Balloon {
    pub id: u32,
    pub pos: Vec2,
    pub radius: f32,
    pub color: Rgb,
    /// Pixels risen per frame
    pub speed: f32,
    pub kind: BalloonKind,
    /// Score delta applied when popped
    pub points: i64,
    /// Glyph drawn on special balloons
    pub label: Option<String>,
    pub popped: bool,
    /// Pop animation progress, 0-1
    pub pop_progress: f32,
    /// Sway phase (radians)
    pub wobble: f32,
    pub string_length: f32,
}

impl Balloon {
    pub fn new(id: u32, pos: Vec2, radius: f32, color: Rgb, speed: f32, kind: BalloonKind, points: i64) -> Self {
        Self {
            id,
            pos,
            radius,
            color,
            speed,
            kind,
            points,
            label: None,
            popped: false,
            pop_progress: 0.0,
            wobble: 0.0,
            string_length: STRING_LENGTH,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Move upward by one frame's worth of speed (popped balloons stay put)
    pub fn advance(&mut self) {
        if !self.popped {
            self.pos.y -= self.speed;
        }
    }

    /// Step the sway or pop animation by one frame
    pub fn animate(&mut self) {
        if self.popped {
            self.pop_progress = (self.pop_progress + POP_ANIMATION_STEP).min(1.0);
        } else {
            self.wobble += WOBBLE_STEP;
        }
    }

    /// True if the point lies on or inside the balloon body
    pub fn hit_test(&self, point: Vec2) -> bool {
        self.pos.distance(point) <= self.radius
    }

    pub fn pop(&mut self) {
        self.popped = true;
        self.pop_progress = 0.0;
    }

    /// Pop animation finished
    pub fn pop_finished(&self) -> bool {
        self.popped && self.pop_progress >= 1.0
    }

    /// Balloon and string are entirely above the top edge
    pub fn above_top(&self) -> bool {
        self.pos.y + self.radius + self.string_length < 0.0
    }

    /// Ready for removal: popped and done animating, or escaped unpopped
    pub fn is_expired(&self) -> bool {
        self.pop_finished() || (!self.popped && self.above_top())
    }

    /// Horizontal sway offset for drawing
    pub fn wobble_offset(&self) -> f32 {
        self.wobble.sin() * WOBBLE_AMPLITUDE
    }

    /// Frames until this balloon escapes the top edge if never popped
    ///
    /// Counted with the same subtraction as `advance`. `None` if the balloon
    /// never gets there.
    pub fn frames_to_escape(&self) -> Option<u32> {
        if self.speed.is_nan() || self.speed <= 0.0 || !self.pos.y.is_finite() {
            return None;
        }
        let mut y = self.pos.y;
        let mut frames = 0u32;
        while y + self.radius + self.string_length >= 0.0 {
            let next = y - self.speed;
            if next == y {
                return None;
            }
            y = next;
            frames = frames.checked_add(1)?;
        }
        Some(frames)
    }
}
