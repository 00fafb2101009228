//! Global phase controller: clock-comparison state machine
//!
//! Phases only move forward. `advance` is fed the frame clock and compares it
//! against fixed thresholds; there are no timers to cancel.

use crate::config::{FadeParams, SceneConfig};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Phase {
    Entry,
    Writing,
    Reveal,
}

impl Phase {
    pub fn name(&self) -> &'static str {
        match self {
            Phase::Entry => "entry",
            Phase::Writing => "writing",
            Phase::Reveal => "reveal",
        }
    }
}

/// Phase thresholds and cross-fade parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhaseTiming {
    pub writing_at_ms: f64,
    /// `None` keeps the scene in `Writing`
    pub reveal_at_ms: Option<f64>,
    pub fade: FadeParams,
}

impl PhaseTiming {
    pub fn from_config(config: &SceneConfig) -> Self {
        Self {
            writing_at_ms: config.entry_duration_ms,
            reveal_at_ms: config.reveal_enabled.then(|| config.reveal_at_ms()),
            fade: config.fade,
        }
    }

    /// The phase a clock reading falls into
    pub fn phase_at(&self, elapsed_ms: f64) -> Phase {
        match self.reveal_at_ms {
            Some(reveal) if elapsed_ms >= reveal => Phase::Reveal,
            _ if elapsed_ms >= self.writing_at_ms => Phase::Writing,
            _ => Phase::Entry,
        }
    }
}

/// Controller output for one frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PhaseSnapshot {
    pub phase: Phase,
    /// Phase entered during this call, if any
    pub entered: Option<Phase>,
    pub particle_opacity: f32,
    pub text_opacity: f32,
    pub fade_complete: bool,
}

pub struct PhaseController {
    timing: PhaseTiming,
    phase: Phase,
    latest_ms: f64,
    fade_ticks: u64,
    particle_opacity: f32,
    text_opacity: f32,
}

impl PhaseController {
    pub fn new(timing: PhaseTiming) -> Self {
        Self {
            timing,
            phase: Phase::Entry,
            latest_ms: 0.0,
            fade_ticks: 0,
            particle_opacity: timing.fade.particle_start.clamp(0.0, 1.0),
            text_opacity: 0.0,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn timing(&self) -> &PhaseTiming {
        &self.timing
    }

    pub fn particle_opacity(&self) -> f32 {
        self.particle_opacity
    }

    pub fn text_opacity(&self) -> f32 {
        self.text_opacity
    }

    pub fn fade_complete(&self) -> bool {
        self.particle_opacity <= 0.0 && self.text_opacity >= 1.0
    }

    /// Bring the controller up to `elapsed_ms`. Readings older than the
    /// latest one seen are treated as the latest, so the phase never regresses.
    pub fn advance(&mut self, elapsed_ms: f64) -> PhaseSnapshot {
        if elapsed_ms.is_finite() && elapsed_ms > self.latest_ms {
            self.latest_ms = elapsed_ms;
        }
        let now = self.latest_ms;

        let target = self.timing.phase_at(now);
        let entered = if target > self.phase {
            self.phase = target;
            Some(target)
        } else {
            None
        };

        if let (Phase::Reveal, Some(reveal_at)) = (self.phase, self.timing.reveal_at_ms) {
            let due = ((now - reveal_at) / self.timing.fade.tick_ms).floor() as u64;
            self.apply_fade_ticks(due);
        }

        self.snapshot(entered)
    }

    fn apply_fade_ticks(&mut self, due: u64) {
        let fade = self.timing.fade;
        while self.fade_ticks < due && !self.fade_complete() {
            self.particle_opacity = (self.particle_opacity - fade.particle_step).max(0.0);
            self.text_opacity = (self.text_opacity + fade.text_step).min(1.0);
            self.fade_ticks += 1;
        }
    }

    pub fn snapshot(&self, entered: Option<Phase>) -> PhaseSnapshot {
        PhaseSnapshot {
            phase: self.phase,
            entered,
            particle_opacity: self.particle_opacity,
            text_opacity: self.text_opacity,
            fade_complete: self.fade_complete(),
        }
    }
}
