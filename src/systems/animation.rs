//! Animation clock
//!
//! Object transforms are a pure function of the time since start, so the only
//! state here is the start instant.

use std::time::Instant;

/// Measures elapsed time since the animation started
pub struct AnimationSystem {
    start: Instant,
    frames: u64,
}

impl AnimationSystem {
    /// Start the clock now
    pub fn new() -> Self {
        Self::started_at(Instant::now())
    }

    /// Start the clock at a given instant
    pub fn started_at(start: Instant) -> Self {
        Self { start, frames: 0 }
    }

    /// Seconds since start
    pub fn elapsed(&self) -> f32 {
        self.elapsed_at(Instant::now())
    }

    /// Seconds between start and `now` (zero if `now` is earlier)
    pub fn elapsed_at(&self, now: Instant) -> f32 {
        now.saturating_duration_since(self.start).as_secs_f32()
    }

    /// Advance the frame counter and return the current time
    pub fn tick(&mut self) -> f32 {
        self.frames += 1;
        let t = self.elapsed();
        if self.frames % 600 == 0 {
            log::debug!("{} frames in {:.1}s ({:.1} fps)", self.frames, t, self.frames as f32 / t.max(f32::EPSILON));
        }
        t
    }

    /// Frames ticked so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Restart from zero
    pub fn reset(&mut self) {
        self.start = Instant::now();
        self.frames = 0;
    }
}

impl Default for AnimationSystem {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_elapsed_at() {
        let start = Instant::now();
        let anim = AnimationSystem::started_at(start);
        let t = anim.elapsed_at(start + Duration::from_millis(1500));
        assert!((t - 1.5).abs() < 1e-6);
    }

    #[test]
    fn test_elapsed_never_negative() {
        let start = Instant::now() + Duration::from_secs(10);
        let anim = AnimationSystem::started_at(start);
        assert_eq!(anim.elapsed_at(Instant::now()), 0.0);
    }

    #[test]
    fn test_tick_counts_frames() {
        let mut anim = AnimationSystem::new();
        anim.tick();
        anim.tick();
        assert_eq!(anim.frames(), 2);
        anim.reset();
        assert_eq!(anim.frames(), 0);
    }

    #[test]
    fn test_elapsed_advances() {
        let anim = AnimationSystem::new();
        std::thread::sleep(Duration::from_millis(20));
        assert!(anim.elapsed() >= 0.02);
    }
}
