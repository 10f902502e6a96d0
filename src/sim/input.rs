//! Pointer input
//!
//! Clicks arrive in client (CSS pixel) coordinates and are mapped onto the
//! canvas' native pixel grid before hit-testing.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::balloon::BalloonKind;
use super::particle::pop_bursts;
use super::state::GameState;
use crate::platform::ScoreDisplay;

/// A pointer click in client coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerClick {
    pub client_x: f32,
    pub client_y: f32,
}

/// Where the canvas sits on the page and how big its backing store is
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasView {
    /// Displayed bounding box (client coordinates)
    pub left: f32,
    pub top: f32,
    pub display_width: f32,
    pub display_height: f32,
    /// Native pixel size
    pub width: f32,
    pub height: f32,
}

impl CanvasView {
    /// View where display size equals native size
    pub fn unscaled(width: f32, height: f32) -> Self {
        Self {
            left: 0.0,
            top: 0.0,
            display_width: width,
            display_height: height,
            width,
            height,
        }
    }

    /// Map a client point to native canvas pixels
    pub fn to_canvas(&self, click: PointerClick) -> Vec2 {
        let scale_x = if self.display_width > 0.0 {
            self.width / self.display_width
        } else {
            1.0
        };
        let scale_y = if self.display_height > 0.0 {
            self.height / self.display_height
        } else {
            1.0
        };
        Vec2::new(
            (click.client_x - self.left) * scale_x,
            (click.client_y - self.top) * scale_y,
        )
    }
}

/// Result of a successful pop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PopEvent {
    pub balloon_id: u32,
    pub kind: BalloonKind,
    pub points: i64,
    pub particles: usize,
}

/// Handle a click in client coordinates
pub fn handle_click<D: ScoreDisplay + ?Sized>(
    state: &mut GameState,
    click: PointerClick,
    view: &CanvasView,
    display: &mut D,
) -> Option<PopEvent> {
    if !state.is_running() {
        return None;
    }
    pop_at(state, view.to_canvas(click), display)
}

/// Pop the newest unpopped balloon under `point`, if any
pub fn pop_at<D: ScoreDisplay + ?Sized>(
    state: &mut GameState,
    point: Vec2,
    display: &mut D,
) -> Option<PopEvent> {
    let balloon = state
        .balloons
        .iter_mut()
        .rev()
        .find(|b| !b.popped && b.hit_test(point))?;

    balloon.pop();
    let (id, kind, points, pos) = (balloon.id, balloon.kind, balloon.points, balloon.pos);
    let bursts = pop_bursts(balloon);

    state.scores.score += points;
    if kind.counts_as_popped() {
        state.scores.popped += 1;
    }

    let particles: usize = bursts
        .iter()
        .map(|burst| state.emit_particles(pos, burst.color, burst.count))
        .sum();

    display.refresh(&state.scores);
    log::debug!("Popped {:?} balloon {} for {} points", kind, id, points);

    Some(PopEvent {
        balloon_id: id,
        kind,
        points,
        particles,
    })
}
