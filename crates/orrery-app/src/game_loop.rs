//! Fixed-timestep animation clock.
//!
//! Simulation steps run at a fixed 60 Hz from an accumulator while rendering
//! happens once per redraw. Scene time is the simulated time scaled by
//! `scene.time_scale`, interpolated into the current partial step.

use std::time::Instant;
use tracing::warn;

/// Fixed simulation timestep: 60 Hz.
pub const FIXED_DT: f64 = 1.0 / 60.0;

/// Longest frame the accumulator will absorb (4 FPS).
pub const MAX_FRAME_TIME: f64 = 0.25;

/// Fixed-timestep loop state.
#[derive(Debug)]
pub struct GameLoop {
    previous_time: Instant,
    accumulator: f64,
    total_sim_time: f64,
    time_scale: f64,
    frame_count: u64,
    update_count: u64,
}

impl GameLoop {
    pub fn new(time_scale: f64) -> Self {
        Self {
            previous_time: Instant::now(),
            accumulator: 0.0,
            total_sim_time: 0.0,
            time_scale,
            frame_count: 0,
            update_count: 0,
        }
    }

    /// Runs one frame against the wall clock and returns the measured frame
    /// time in seconds.
    ///
    /// - `update_fn(fixed_dt, total_sim_time)` runs zero or more times.
    /// - `render_fn(alpha, scene_time)` runs exactly once.
    pub fn tick(
        &mut self,
        update_fn: impl FnMut(f64, f64),
        render_fn: impl FnMut(f64, f64),
    ) -> f64 {
        let now = Instant::now();
        let frame_time = now.duration_since(self.previous_time).as_secs_f64();
        self.previous_time = now;

        if frame_time > MAX_FRAME_TIME {
            warn!(
                "Frame time {:.1}ms exceeds maximum, clamping to {:.1}ms",
                frame_time * 1000.0,
                MAX_FRAME_TIME * 1000.0
            );
        }
        self.advance(frame_time, update_fn, render_fn);
        frame_time
    }

    /// Advances by an explicit frame time; the clock-free core of [`tick`](Self::tick).
    pub fn advance(
        &mut self,
        frame_time: f64,
        mut update_fn: impl FnMut(f64, f64),
        mut render_fn: impl FnMut(f64, f64),
    ) {
        self.accumulator += frame_time.clamp(0.0, MAX_FRAME_TIME);

        while self.accumulator >= FIXED_DT {
            update_fn(FIXED_DT, self.total_sim_time);
            self.total_sim_time += FIXED_DT;
            self.accumulator -= FIXED_DT;
            self.update_count += 1;
        }

        render_fn(self.alpha(), self.scene_time());
        self.frame_count += 1;
    }

    /// Fraction of a step left in the accumulator, in `[0.0, 1.0)`.
    pub fn alpha(&self) -> f64 {
        if self.accumulator > 0.0 {
            self.accumulator / FIXED_DT
        } else {
            0.0
        }
    }

    /// Seconds of animation shown this frame.
    pub fn scene_time(&self) -> f64 {
        (self.total_sim_time + self.accumulator) * self.time_scale
    }

    pub fn time_scale(&self) -> f64 {
        self.time_scale
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn update_count(&self) -> u64 {
        self.update_count
    }

    pub fn total_sim_time(&self) -> f64 {
        self.total_sim_time
    }
}

impl Default for GameLoop {
    fn default() -> Self {
        Self::new(1.0)
    }
}

/// Averages frame rate over one-second windows.
#[derive(Debug, Default)]
pub struct FpsCounter {
    elapsed: f64,
    frames: u32,
}

impl FpsCounter {
    /// Reporting window in seconds.
    pub const WINDOW: f64 = 1.0;

    /// Records one frame; returns the average FPS whenever a window closes.
    pub fn record(&mut self, frame_time: f64) -> Option<f64> {
        self.elapsed += frame_time;
        self.frames += 1;
        if self.elapsed < Self::WINDOW {
            return None;
        }
        let fps = f64::from(self.frames) / self.elapsed;
        self.elapsed = 0.0;
        self.frames = 0;
        Some(fps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_dt_value() {
        assert!((FIXED_DT - 1.0 / 60.0).abs() < f64::EPSILON * 10.0);
    }

    #[test]
    fn test_single_step() {
        let mut game_loop = GameLoop::default();
        let mut updates = 0u32;
        game_loop.advance(FIXED_DT, |_, _| updates += 1, |_, _| {});
        assert_eq!(updates, 1);
        assert!(game_loop.accumulator.abs() < 1e-12);
    }

    #[test]
    fn test_multiple_steps_pass_running_sim_time() {
        let mut game_loop = GameLoop::default();
        let mut seen = Vec::new();
        game_loop.advance(3.0 * FIXED_DT + 1e-9, |_, t| seen.push(t), |_, _| {});
        assert_eq!(seen.len(), 3);
        assert!(seen[0].abs() < 1e-12);
        assert!((seen[2] - 2.0 * FIXED_DT).abs() < 1e-12);
        assert!((game_loop.total_sim_time() - 3.0 * FIXED_DT).abs() < 1e-12);
    }

    #[test]
    fn test_partial_step_still_renders() {
        let mut game_loop = GameLoop::default();
        let mut updates = 0u32;
        let mut alpha = -1.0;
        game_loop.advance(0.25 * FIXED_DT, |_, _| updates += 1, |a, _| alpha = a);
        assert_eq!(updates, 0);
        assert!((alpha - 0.25).abs() < 1e-10);
        assert_eq!(game_loop.frame_count(), 1);
    }

    #[test]
    fn test_frame_time_is_clamped() {
        let mut game_loop = GameLoop::default();
        let mut updates = 0u32;
        game_loop.advance(5.0, |_, _| updates += 1, |_, _| {});
        let max_updates = (MAX_FRAME_TIME / FIXED_DT).ceil() as u32;
        assert!(updates > 0 && updates <= max_updates, "{updates} updates");
    }

    #[test]
    fn test_negative_frame_time_ignored() {
        let mut game_loop = GameLoop::default();
        game_loop.advance(-1.0, |_, _| panic!("no update expected"), |_, _| {});
        assert_eq!(game_loop.scene_time(), 0.0);
    }

    #[test]
    fn test_scene_time_includes_partial_step() {
        let mut game_loop = GameLoop::default();
        let mut shown = 0.0;
        game_loop.advance(1.5 * FIXED_DT, |_, _| {}, |_, t| shown = t);
        assert!((shown - 1.5 * FIXED_DT).abs() < 1e-12);
    }

    #[test]
    fn test_scene_time_scaled() {
        let mut game_loop = GameLoop::new(2.0);
        for _ in 0..60 {
            game_loop.advance(FIXED_DT, |_, _| {}, |_, _| {});
        }
        assert!((game_loop.scene_time() - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_time_scale_freezes_animation() {
        let mut game_loop = GameLoop::new(0.0);
        game_loop.advance(0.1, |_, _| {}, |_, _| {});
        assert_eq!(game_loop.scene_time(), 0.0);
        assert!(game_loop.update_count() > 0);
    }

    #[test]
    fn test_deterministic_sequence() {
        let frame_times = [0.017, 0.015, 0.020, 0.016, 0.033, 0.008, 0.018];
        let mut a = GameLoop::default();
        let mut b = GameLoop::default();
        for &ft in &frame_times {
            let (mut ta, mut tb) = (0.0, 0.0);
            a.advance(ft, |_, _| {}, |_, t| ta = t);
            b.advance(ft, |_, _| {}, |_, t| tb = t);
            assert_eq!(ta, tb);
        }
        assert_eq!(a.update_count(), b.update_count());
        assert_eq!(a.frame_count(), frame_times.len() as u64);
    }

    #[test]
    fn test_fps_counter_reports_once_per_window() {
        let mut fps = FpsCounter::default();
        let mut reports = Vec::new();
        for _ in 0..8 {
            if let Some(rate) = fps.record(0.25) {
                reports.push(rate);
            }
        }
        assert_eq!(reports, vec![4.0, 4.0]);
    }

    #[test]
    fn test_fps_counter_slow_frame() {
        let mut fps = FpsCounter::default();
        assert_eq!(fps.record(2.0), Some(0.5));
        assert_eq!(fps.record(0.1), None);
    }
}
