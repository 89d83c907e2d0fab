#[cfg(not(target_arch = "wasm32"))]
use std::time::{Duration, Instant};

#[cfg(target_arch = "wasm32")]
use web_time::{Duration, Instant};

/// Wall-clock timer, used by hosts that have no display-refresh timestamp of
/// their own (the headless demo, native shells).
pub struct Timer {
    start_time: Instant,
    last_update: Instant,
    /// Time since last tick
    pub delta: Duration,
    /// Total elapsed time since creation
    pub elapsed: Duration,
    /// Total number of ticks
    pub frame_count: u64,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer {
    /// Creates a new timer starting from now.
    #[must_use]
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start_time: now,
            last_update: now,
            delta: Duration::ZERO,
            elapsed: Duration::ZERO,
            frame_count: 0,
        }
    }

    pub fn tick(&mut self) {
        let now = Instant::now();
        self.delta = now - self.last_update;
        self.elapsed = now - self.start_time;
        self.last_update = now;
        self.frame_count += 1;
    }

    /// Elapsed time in milliseconds, shaped like a `requestAnimationFrame` timestamp.
    #[must_use]
    pub fn timestamp_ms(&self) -> f64 {
        self.elapsed.as_secs_f64() * 1000.0
    }
}

/// Derives per-frame deltas from the monotonic timestamps handed to a frame
/// callback. The first tick reports zero.
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last: Option<f64>,
}

impl FrameClock {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seconds since the previous call. Never negative.
    pub fn delta(&mut self, now_secs: f64) -> f32 {
        let dt = match self.last {
            Some(last) => (now_secs - last).max(0.0),
            None => 0.0,
        };
        // A stale timestamp must not rewind the clock.
        self.last = Some(self.last.map_or(now_secs, |last| last.max(now_secs)));
        dt as f32
    }
}

/// A delayed one-shot callback slot. Fires at most once per arming.
#[derive(Debug, Clone, Default)]
pub struct OneShotTimer {
    deadline: Option<f64>,
}

impl OneShotTimer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arm(&mut self, now_secs: f64, delay_secs: f64) {
        self.deadline = Some(now_secs + delay_secs.max(0.0));
    }

    #[inline]
    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Returns `true` exactly once, on the first poll at or after the deadline.
    pub fn poll(&mut self, now_secs: f64) -> bool {
        match self.deadline {
            Some(deadline) if now_secs >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}
