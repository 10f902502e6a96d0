//! Per-frame game loop
//!
//! The loop is driven by a `FrameScheduler`: `start` requests the first
//! frame, every frame requests the next one while running, and `reset`
//! cancels whatever is pending before clearing state.

use rand::Rng;

use super::state::{GamePhase, GameState};
use crate::consts::{MAX_BALLOONS, SPAWN_CHANCE_PER_FRAME};
use crate::platform::{FrameScheduler, FrameToken, ScoreDisplay};
use crate::renderer::{Surface, draw_balloon, draw_particle};

/// What happened during one frame
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameReport {
    /// Balloons removed this frame (popped or escaped)
    pub removed: u32,
    /// Of those, balloons that escaped unpopped
    pub missed: u32,
    /// Particles that faded out
    pub faded: u32,
    /// ID of the balloon spawned this frame
    pub spawned: Option<u32>,
}

/// Start the loop; returns false if it was already running or no frame
/// could be scheduled
pub fn start<F, D>(state: &mut GameState, scheduler: &mut F, display: &mut D) -> bool
where
    F: FrameScheduler + ?Sized,
    D: ScoreDisplay + ?Sized,
{
    if state.is_running() {
        return false;
    }

    let Some(token) = scheduler.request_frame() else {
        log::error!("Could not schedule the first frame; game not started");
        return false;
    };
    state.phase = GamePhase::Running;
    state.frame_token = Some(token);
    display.set_running(true);
    log::info!("Game started (seed {})", state.seed);
    true
}

/// Stop the loop and clear everything
///
/// Cancels the pending frame first so no stale frame runs on cleared state.
pub fn reset<F, S, D>(state: &mut GameState, scheduler: &mut F, surface: &mut S, display: &mut D)
where
    F: FrameScheduler + ?Sized,
    S: Surface + ?Sized,
    D: ScoreDisplay + ?Sized,
{
    if let Some(token) = state.frame_token.take() {
        scheduler.cancel_frame(token);
    }

    state.clear();
    surface.clear();
    display.refresh(&state.scores);
    display.set_running(false);
    log::info!("Game reset");
}

/// Frame callback entry point
///
/// Runs one frame if `token` is the pending one, then schedules the next.
/// Stale or unexpected tokens are ignored and return `None`.
pub fn on_frame<F, S, D>(
    state: &mut GameState,
    token: FrameToken,
    surface: &mut S,
    scheduler: &mut F,
    display: &mut D,
) -> Option<FrameReport>
where
    F: FrameScheduler + ?Sized,
    S: Surface + ?Sized,
    D: ScoreDisplay + ?Sized,
{
    if !state.is_running() || state.frame_token != Some(token) {
        log::debug!("Ignoring stale frame {:?}", token);
        return None;
    }
    state.frame_token = None;

    let report = step(state, surface, display);

    if state.is_running() {
        state.frame_token = scheduler.request_frame();
        if state.frame_token.is_none() {
            log::error!("Could not schedule the next frame; stopping");
            state.phase = GamePhase::Stopped;
            display.set_running(false);
        }
    }
    Some(report)
}

/// Advance and draw one frame
pub fn step<S, D>(state: &mut GameState, surface: &mut S, display: &mut D) -> FrameReport
where
    S: Surface + ?Sized,
    D: ScoreDisplay + ?Sized,
{
    let mut report = FrameReport::default();
    let motion = state.settings.effective_motion();

    surface.clear();
    state.frame_count += 1;

    state.balloons.retain_mut(|balloon| {
        balloon.advance();
        // Sway steps before drawing, the pop ring after
        if balloon.popped {
            draw_balloon(surface, balloon, motion);
            balloon.animate();
        } else {
            balloon.animate();
            draw_balloon(surface, balloon, motion);
        }

        if !balloon.is_expired() {
            return true;
        }
        report.removed += 1;
        if !balloon.popped {
            report.missed += 1;
            log::debug!("Balloon {} escaped", balloon.id);
        }
        false
    });

    if report.missed > 0 {
        state.scores.missed += report.missed;
        display.refresh(&state.scores);
    }

    state.particles.retain_mut(|particle| {
        particle.advance();
        draw_particle(surface, particle);
        if particle.is_dead() {
            report.faded += 1;
            false
        } else {
            true
        }
    });

    // Roll every frame, even when the cap blocks the spawn
    let roll: f32 = state.rng.random();
    if roll < SPAWN_CHANCE_PER_FRAME && state.balloons.len() < MAX_BALLOONS {
        let canvas = surface.size();
        report.spawned = Some(state.spawn_balloon(canvas).id);
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{ManualScheduler, RecordingDisplay};
    use crate::renderer::DrawList;
    use crate::sim::{Balloon, BalloonKind, ScoreBoard};
    use crate::Rgb;
    use glam::Vec2;
    use std::collections::HashSet;

    struct Harness {
        state: GameState,
        scheduler: ManualScheduler,
        surface: DrawList,
        display: RecordingDisplay,
    }

    impl Harness {
        fn new(seed: u64, width: f32, height: f32) -> Self {
            Self {
                state: GameState::new(seed),
                scheduler: ManualScheduler::new(),
                surface: DrawList::new(width, height),
                display: RecordingDisplay::default(),
            }
        }

        fn start(&mut self) -> bool {
            start(&mut self.state, &mut self.scheduler, &mut self.display)
        }

        fn reset(&mut self) {
            reset(&mut self.state, &mut self.scheduler, &mut self.surface, &mut self.display);
        }

        /// Fire the next scheduled frame
        fn frame(&mut self) -> Option<FrameReport> {
            let token = self.scheduler.fire()?;
            on_frame(
                &mut self.state,
                token,
                &mut self.surface,
                &mut self.scheduler,
                &mut self.display,
            )
        }
    }

    fn floating(id: u32, y: f32) -> Balloon {
        Balloon::new(id, Vec2::new(400.0, y), 30.0, Rgb::from_hex(0xFF6B6B), 2.5, BalloonKind::Normal, 30)
    }

    #[test]
    fn test_start_only_from_stopped() {
        let mut h = Harness::new(1, 800.0, 600.0);
        assert!(h.start());
        assert!(!h.start());
        assert!(h.display.running);
        // Exactly one pending frame while running
        assert_eq!(h.scheduler.pending().len(), 1);
        assert_eq!(h.state.frame_token, Some(h.scheduler.pending()[0]));
    }

    #[test]
    fn test_frames_keep_one_token_pending() {
        let mut h = Harness::new(2, 800.0, 600.0);
        h.start();
        for _ in 0..20 {
            assert!(h.frame().is_some());
            assert_eq!(h.scheduler.pending().len(), 1);
            assert_eq!(h.state.frame_token, Some(h.scheduler.pending()[0]));
        }
        assert_eq!(h.state.frame_count, 20);
        assert_eq!(h.surface.clears, 20);
    }

    #[test]
    fn test_stale_token_is_ignored() {
        let mut h = Harness::new(3, 800.0, 600.0);
        h.start();
        let stale = FrameToken(999);
        let before = h.state.frame_count;
        assert!(
            on_frame(&mut h.state, stale, &mut h.surface, &mut h.scheduler, &mut h.display).is_none()
        );
        assert_eq!(h.state.frame_count, before);
    }

    #[test]
    fn test_reset_cancels_pending_frame() {
        let mut h = Harness::new(4, 800.0, 600.0);
        h.start();
        let pending = h.state.frame_token.unwrap();
        h.reset();
        assert!(h.scheduler.pending().is_empty());
        assert_eq!(h.scheduler.cancelled(), 1);
        assert!(!h.display.running);

        // A callback for the cancelled token must not run
        assert!(
            on_frame(&mut h.state, pending, &mut h.surface, &mut h.scheduler, &mut h.display)
                .is_none()
        );
        assert_eq!(h.state.frame_count, 0);
    }

    #[test]
    fn test_reset_is_idempotent() {
        let mut h = Harness::new(5, 800.0, 600.0);
        h.start();
        for _ in 0..200 {
            h.frame();
        }
        h.state.scores.score = 75;
        h.reset();
        let once = (h.state.scores, h.state.balloons.clone(), h.state.particles.len(), h.state.phase);
        h.reset();
        let twice = (h.state.scores, h.state.balloons.clone(), h.state.particles.len(), h.state.phase);

        assert_eq!(once, twice);
        assert_eq!(h.state.scores, ScoreBoard::default());
        assert!(h.state.balloons.is_empty());
        assert_eq!(h.state.phase, GamePhase::Stopped);
        assert!(h.state.frame_token.is_none());
        assert!(h.scheduler.pending().is_empty());
        assert_eq!(h.display.shown, ScoreBoard::default());
        assert_eq!(h.surface.cmds, vec![crate::renderer::DrawCmd::Clear]);
    }

    #[test]
    fn test_restart_after_reset() {
        let mut h = Harness::new(6, 800.0, 600.0);
        h.start();
        h.frame();
        h.reset();
        assert!(h.start());
        assert!(h.frame().is_some());
        assert_eq!(h.state.frame_count, 1);
    }

    #[test]
    fn test_escaped_balloon_counts_as_missed() {
        let mut h = Harness::new(7, 800.0, 600.0);
        h.state.balloons.push(floating(100, -80.0));
        h.start();
        let report = h.frame().unwrap();
        assert_eq!(report.missed, 1);
        assert_eq!(report.removed, 1);
        assert_eq!(h.state.scores.missed, 1);
        assert_eq!(h.display.shown.missed, 1);
        assert!(h.state.balloons.iter().all(|b| b.id != 100));
    }

    #[test]
    fn test_popped_balloon_removed_without_miss() {
        let mut h = Harness::new(8, 800.0, 600.0);
        let mut b = floating(100, -500.0);
        b.pop();
        h.state.balloons.push(b);
        h.start();

        let mut removed = 0;
        for _ in 0..12 {
            let report = h.frame().unwrap();
            assert_eq!(report.missed, 0);
            removed += report.removed;
            if h.state.balloons.iter().all(|b| b.id != 100) {
                break;
            }
        }
        assert!(removed >= 1);
        assert!(h.state.balloons.iter().all(|b| b.id != 100));
        assert_eq!(h.state.scores.missed, 0);
    }

    #[test]
    fn test_removal_keeps_neighbours() {
        // Removing one balloon must not skip the one after it
        let mut h = Harness::new(9, 800.0, 600.0);
        h.state.balloons.push(floating(100, -80.0));
        h.state.balloons.push(floating(101, -80.0));
        h.state.balloons.push(floating(102, 300.0));
        h.start();
        let report = h.frame().unwrap();
        assert_eq!(report.missed, 2);
        assert_eq!(h.state.balloons[0].id, 102);
        assert_eq!(h.state.balloons[0].pos.y, 297.5);
    }

    #[test]
    fn test_spawn_cap() {
        let mut h = Harness::new(10, 800.0, 600.0);
        for i in 0..MAX_BALLOONS as u32 {
            h.state.balloons.push(floating(1000 + i, 300.0));
        }
        h.start();
        for _ in 0..100 {
            let report = h.frame().unwrap();
            assert!(report.spawned.is_none());
        }
        assert_eq!(h.state.balloons.len(), MAX_BALLOONS);
    }

    #[test]
    fn test_particles_fade_out() {
        let mut h = Harness::new(11, 800.0, 600.0);
        h.state.emit_particles(Vec2::new(400.0, 300.0), Rgb::WHITE, 30);
        h.start();
        let mut faded = 0;
        for _ in 0..70 {
            faded += h.frame().unwrap().faded;
        }
        assert_eq!(faded, 30);
        assert!(h.state.particles.is_empty());
    }

    /// Run `frames` frames with no clicks; returns (missed, expected missed)
    fn run_unattended(seed: u64, height: f32, frames: u64) -> (u32, u32) {
        let mut h = Harness::new(seed, 800.0, height);
        h.start();

        let mut seen = HashSet::new();
        let mut expected = 0;
        for frame in 1..=frames {
            h.frame();
            for b in &h.state.balloons {
                if seen.insert(b.id) {
                    // First advance happens on the next frame
                    let escape = b.frames_to_escape().expect("balloons rise");
                    if frame + escape as u64 <= frames {
                        expected += 1;
                    }
                }
            }
        }
        (h.state.scores.missed, expected)
    }

    #[test]
    fn test_fifty_frames_unattended() {
        let mut h = Harness::new(42, 800.0, 600.0);
        h.start();
        let mut spawned_at = Vec::new();
        for frame in 1..=50u32 {
            let report = h.frame().unwrap();
            assert_eq!(report.missed, 0);
            if let Some(id) = report.spawned {
                spawned_at.push((id, frame));
            }
        }

        assert!(h.state.is_running());
        assert_eq!(h.state.frame_count, 50);
        assert_eq!(h.surface.clears, 50);
        assert_eq!(h.scheduler.pending().len(), 1);
        assert_eq!(h.state.balloons.len(), spawned_at.len());

        // Every balloon rose one speed step and swayed one step per frame since spawning
        for (id, frame) in spawned_at {
            let b = h.state.balloons.iter().find(|b| b.id == id).unwrap();
            let mut y = 600.0 + crate::consts::SPAWN_DEPTH;
            let mut wobble = 0.0f32;
            for _ in frame..50 {
                y -= b.speed;
                wobble += crate::consts::WOBBLE_STEP;
            }
            assert_eq!(b.pos.y, y);
            assert_eq!(b.wobble, wobble);
        }
    }

    /// Grants a fixed number of frames, then refuses
    struct FlakyScheduler {
        inner: ManualScheduler,
        grants: u32,
    }

    impl FrameScheduler for FlakyScheduler {
        fn request_frame(&mut self) -> Option<FrameToken> {
            if self.grants == 0 {
                return None;
            }
            self.grants -= 1;
            self.inner.request_frame()
        }

        fn cancel_frame(&mut self, token: FrameToken) {
            self.inner.cancel_frame(token);
        }
    }

    #[test]
    fn test_start_fails_without_a_frame() {
        let mut state = GameState::new(12);
        let mut scheduler = FlakyScheduler { inner: ManualScheduler::new(), grants: 0 };
        let mut display = RecordingDisplay::default();

        assert!(!start(&mut state, &mut scheduler, &mut display));
        assert_eq!(state.phase, GamePhase::Stopped);
        assert!(state.frame_token.is_none());
        assert!(!display.running);

        // Recovers once frames are available again
        scheduler.grants = 1;
        assert!(start(&mut state, &mut scheduler, &mut display));
        assert!(display.running);
    }

    #[test]
    fn test_loop_stops_when_scheduling_fails() {
        let mut state = GameState::new(13);
        let mut scheduler = FlakyScheduler { inner: ManualScheduler::new(), grants: 2 };
        let mut surface = DrawList::new(800.0, 600.0);
        let mut display = RecordingDisplay::default();
        assert!(start(&mut state, &mut scheduler, &mut display));

        let token = scheduler.inner.fire().unwrap();
        assert!(on_frame(&mut state, token, &mut surface, &mut scheduler, &mut display).is_some());
        assert!(state.is_running());

        let token = scheduler.inner.fire().unwrap();
        assert!(on_frame(&mut state, token, &mut surface, &mut scheduler, &mut display).is_some());
        assert_eq!(state.phase, GamePhase::Stopped);
        assert!(state.frame_token.is_none());
        assert!(!display.running);

        scheduler.grants = 1;
        assert!(start(&mut state, &mut scheduler, &mut display));
    }

    #[test]
    fn test_sway_steps_before_drawing() {
        let mut h = Harness::new(14, 800.0, 600.0);
        h.state.balloons.push(floating(100, 300.0));
        h.start();
        h.frame();
        assert_eq!(h.state.balloons[0].wobble, crate::consts::WOBBLE_STEP);

        // The string is drawn from the swayed position on the very first frame
        let sway = crate::consts::WOBBLE_STEP.sin() * crate::consts::WOBBLE_AMPLITUDE;
        let string_start = h.surface.cmds.iter().find_map(|cmd| match cmd {
            crate::renderer::DrawCmd::Line { from, .. } => Some(*from),
            _ => None,
        });
        assert_eq!(string_start.map(|p| p.x), Some(400.0 + sway));
    }

    #[test]
    fn test_pop_ring_starts_at_zero_progress() {
        let mut h = Harness::new(15, 800.0, 600.0);
        let mut b = floating(100, 300.0);
        b.pop();
        h.state.balloons.push(b);
        h.start();
        h.frame();
        assert!((h.state.balloons[0].pop_progress - 0.1).abs() < 1e-6);
        assert_eq!(h.state.balloons[0].wobble, 0.0);
    }

    #[test]
    fn test_missed_matches_travel_time() {
        // A short canvas lets balloons escape within the run
        let (missed, expected) = run_unattended(1234, 10.0, 600);
        assert!(expected > 0);
        assert_eq!(missed, expected);
    }

    #[test]
    fn test_same_seed_same_run() {
        let mut a = Harness::new(77, 800.0, 600.0);
        let mut b = Harness::new(77, 800.0, 600.0);
        a.start();
        b.start();
        for _ in 0..300 {
            assert_eq!(a.frame(), b.frame());
        }
        assert_eq!(a.state.balloons, b.state.balloons);
    }
}
