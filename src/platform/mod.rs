//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Frame scheduling (requestAnimationFrame on web, manual stepping headless)
//! - Score display (DOM elements on web)
//! - The drawing surface (see `renderer::Surface`)

#[cfg(target_arch = "wasm32")]
pub mod web;

use serde::{Deserialize, Serialize};

use crate::sim::ScoreBoard;

/// Handle for one pending frame callback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FrameToken(pub u32);

/// Schedules the next frame of the game loop
pub trait FrameScheduler {
    /// Ask for one frame callback; `None` if the platform refused
    fn request_frame(&mut self) -> Option<FrameToken>;
    /// Withdraw a previously requested callback
    fn cancel_frame(&mut self, token: FrameToken);
}

/// Externally owned score readouts and start control
pub trait ScoreDisplay {
    fn refresh(&mut self, scores: &ScoreBoard);

    /// Start control disabled/relabelled while the loop runs
    fn set_running(&mut self, _running: bool) {}
}

/// Headless scheduler: frames fire only when the owner says so
#[derive(Debug, Default)]
pub struct ManualScheduler {
    pending: Vec<FrameToken>,
    next: u32,
    cancelled: u32,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Dequeue the oldest pending callback
    pub fn fire(&mut self) -> Option<FrameToken> {
        if self.pending.is_empty() {
            None
        } else {
            Some(self.pending.remove(0))
        }
    }

    pub fn pending(&self) -> &[FrameToken] {
        &self.pending
    }

    /// Total callbacks withdrawn
    pub fn cancelled(&self) -> u32 {
        self.cancelled
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self) -> Option<FrameToken> {
        self.next += 1;
        let token = FrameToken(self.next);
        self.pending.push(token);
        Some(token)
    }

    fn cancel_frame(&mut self, token: FrameToken) {
        let before = self.pending.len();
        self.pending.retain(|t| *t != token);
        if self.pending.len() != before {
            self.cancelled += 1;
        }
    }
}

/// Headless display that keeps the last shown values
#[derive(Debug, Default, Clone)]
pub struct RecordingDisplay {
    pub shown: ScoreBoard,
    pub refreshes: u32,
    pub running: bool,
}

impl ScoreDisplay for RecordingDisplay {
    fn refresh(&mut self, scores: &ScoreBoard) {
        self.shown = *scores;
        self.refreshes += 1;
    }

    fn set_running(&mut self, running: bool) {
        self.running = running;
    }
}
