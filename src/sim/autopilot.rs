//! Demo autopilot
//!
//! Picks a click target the way an attentive player would: the visible,
//! non-bomb balloon closest to escaping. Used by the headless demo.

use glam::Vec2;

use super::balloon::BalloonKind;
use super::state::GameState;

/// Point to click next, if any balloon is worth popping
pub fn pick_target(state: &GameState, canvas: Vec2) -> Option<Vec2> {
    state
        .balloons
        .iter()
        .filter(|b| !b.popped && b.kind != BalloonKind::Bomb)
        .filter(|b| b.pos.y - b.radius < canvas.y && b.pos.y + b.radius > 0.0)
        .filter_map(|b| b.frames_to_escape().map(|frames| (frames, b.pos)))
        .min_by_key(|(frames, _)| *frames)
        .map(|(_, pos)| pos)
}
