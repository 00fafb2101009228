//! Frame clock with a monotonic elapsed-time feed

use serde::Serialize;
use std::time::Instant;

/// Largest frame delta accepted, in seconds. Longer stalls are clamped.
pub const MAX_FRAME_DELTA: f64 = 0.25;

/// One clock sample, taken once per frame
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct FrameTime {
    /// Total elapsed scene time in seconds
    pub elapsed: f64,
    /// Time since the previous frame in seconds
    pub delta: f64,
    /// Frame counter, starting at 0 for the first tick
    pub frame: u64,
}

impl FrameTime {
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed * 1000.0
    }

    pub fn delta_ms(&self) -> f64 {
        self.delta * 1000.0
    }
}

/// Tracks scene time. Either ticks from the wall clock (`tick`) or is fed
/// explicit deltas (`advance`) for headless replay and tests.
pub struct FrameClock {
    /// Total elapsed scene time in seconds
    pub total_time: f64,
    /// Time since last frame in seconds
    pub delta_time: f64,
    frame: u64,
    started: bool,
    last_instant: Instant,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self {
            total_time: 0.0,
            delta_time: 0.0,
            frame: 0,
            started: false,
            last_instant: Instant::now(),
        }
    }
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance from the wall clock. Call once per frame.
    pub fn tick(&mut self) -> FrameTime {
        let now = Instant::now();
        if !self.started {
            self.last_instant = now;
            return self.advance(0.0);
        }
        let elapsed = now.duration_since(self.last_instant).as_secs_f64();
        self.last_instant = now;
        self.advance(elapsed)
    }

    /// Advance by an explicit delta in seconds. Negative or non-finite deltas
    /// count as zero so the clock never runs backwards.
    pub fn advance(&mut self, delta: f64) -> FrameTime {
        let delta = if delta.is_finite() { delta } else { 0.0 };
        // Clamp to avoid one stalled frame jumping the whole sequence
        self.delta_time = delta.clamp(0.0, MAX_FRAME_DELTA);
        if self.started {
            self.frame += 1;
        } else {
            self.started = true;
        }
        self.total_time += self.delta_time;
        self.sample()
    }

    /// The most recent sample without advancing
    pub fn sample(&self) -> FrameTime {
        FrameTime {
            elapsed: self.total_time,
            delta: self.delta_time,
            frame: self.frame,
        }
    }
}
