use std::time::{Duration, Instant};

/// Measures real elapsed time between frames.
///
/// Deltas come from a monotonic clock, so they are never negative and
/// irregular frame intervals do not accumulate drift.
#[derive(Debug, Clone)]
pub struct Timer {
    start_time: Instant,
    last_tick: Instant,
    /// Time between the last two ticks
    pub delta: Duration,
    pub frame_count: u64,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer {
    #[must_use]
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start_time: now,
            last_tick: now,
            delta: Duration::ZERO,
            frame_count: 0,
        }
    }

    /// Marks a new frame and returns the elapsed seconds since the previous one.
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        self.delta = now.saturating_duration_since(self.last_tick);
        self.last_tick = now;
        self.frame_count += 1;
        self.dt_seconds()
    }

    #[must_use]
    pub fn dt_seconds(&self) -> f32 {
        self.delta.as_secs_f32()
    }

    /// Total time since the timer was created.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.last_tick.saturating_duration_since(self.start_time)
    }
}
