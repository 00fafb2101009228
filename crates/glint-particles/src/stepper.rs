//! Per-frame glitter update: entry flight, wave following, dispersal
//!
//! Runs once per rendered frame over the whole pool. Nothing here can fail:
//! every progress scalar is clamped to [0, 1] and every path lookup is
//! clamped or wrapped, so a pathological frame delta cannot produce NaN.

use crate::config::{GlitterParams, SceneConfig};
use crate::easing::{clamp01, ease_in_out_cubic, ease_out_back, smoothstep};
use crate::particle::{GlitterParticle, GlitterPool, IndividualPhase};
use crate::path::{LetterformPath, WavePath};
use crate::phase::Phase;
use glint_core::{Result, Vec3};
use glint_runtime::FrameTime;

/// Frame length the per-frame spread speeds were tuned at
pub const REFERENCE_FRAME_MS: f64 = 1000.0 / 60.0;

pub struct ParticleStepper {
    letterform: LetterformPath,
    wave: WavePath,
    entry_duration_ms: f64,
    entry_base_rate: f32,
    blend_threshold: f32,
    entry_z: f32,
    params: GlitterParams,
}

impl ParticleStepper {
    /// Builds both paths. The letterform runs from the entry point to the
    /// first wave sample so the hand-off has nothing to jump over.
    pub fn new(config: &SceneConfig) -> Result<Self> {
        let wave = WavePath::generate(config.wave_shape())?;
        let start = [config.entry_point[0], config.entry_point[1]];
        let end = [wave.first().x, wave.first().y];
        Ok(Self {
            letterform: LetterformPath::new(start, end),
            wave,
            entry_duration_ms: config.entry_duration_ms,
            entry_base_rate: config.entry_base_rate,
            blend_threshold: config.blend_threshold,
            entry_z: config.entry_point[2],
            params: config.glitter.clone(),
        })
    }

    pub fn letterform(&self) -> &LetterformPath {
        &self.letterform
    }

    pub fn wave(&self) -> &WavePath {
        &self.wave
    }

    pub fn step(&self, pool: &mut GlitterPool, frame: &FrameTime, phase: Phase) {
        let now_ms = frame.elapsed_ms();
        let time_s = frame.elapsed as f32;

        for p in pool.particles_mut() {
            hand_off(p, phase);
            match p.phase {
                IndividualPhase::Entry => self.step_entry(p, now_ms, frame.delta_ms()),
                IndividualPhase::Following => self.step_following(p, time_s, frame.delta as f32),
                IndividualPhase::Dispersing => self.step_dispersing(p, frame),
            }
            self.shimmer(p, time_s);
        }
    }

    fn step_entry(&self, p: &mut GlitterParticle, now_ms: f64, dt_ms: f64) {
        if now_ms <= p.delay_ms {
            return;
        }
        let dt = (dt_ms / self.entry_duration_ms) as f32;
        let rate = self.entry_base_rate + p.entry_progress * p.acceleration;
        p.entry_progress = clamp01(p.entry_progress + rate * dt).max(p.entry_progress);
        p.position = self.entry_position(p);
    }

    /// Position along the letterform for the particle's current progress,
    /// blended onto the wave start near the end.
    pub fn entry_position(&self, p: &GlitterParticle) -> Vec3 {
        let eased = ease_in_out_cubic(clamp01(p.entry_progress));
        let [x, y] = self.letterform.evaluate(eased);

        let formation_scale = 1.0 - eased.powi(3) * self.params.formation_convergence;
        let on_path = Vec3::new(x, y, self.entry_z) + p.formation.scaled(formation_scale);

        if eased <= self.blend_threshold {
            return on_path;
        }
        let blend = ease_in_out_cubic(clamp01(
            (eased - self.blend_threshold) / (1.0 - self.blend_threshold),
        ));
        let wave_start = self.wave.first() + p.formation.scaled(self.params.wave_formation_scale);
        on_path.lerp(wave_start, blend)
    }

    fn step_following(&self, p: &mut GlitterParticle, time_s: f32, dt_s: f32) {
        let base = self.wave.sample_looped(p.path_index);
        let ramp = if self.params.flutter_ramp_s > 0.0 {
            smoothstep(clamp01(p.follow_s / self.params.flutter_ramp_s))
        } else {
            1.0
        };
        let flutter = (time_s * self.params.flutter_frequency + p.formation.angle).sin()
            * self.params.flutter_amplitude
            * ramp;
        p.position = base
            + p.formation.scaled(self.params.wave_formation_scale)
            + Vec3::new(flutter, 0.0, 0.0);
        p.path_index = self.wave.wrap_index(p.path_index + p.path_speed * dt_s);
        p.follow_s += dt_s;
    }

    fn step_dispersing(&self, p: &mut GlitterParticle, frame: &FrameTime) {
        let eased = ease_out_back(p.spread_progress);
        p.spread_progress = clamp01(p.spread_progress + self.params.spread_rate * frame.delta as f32);

        // Per-frame approach fraction rescaled to this frame's length
        let frames = (frame.delta_ms() / REFERENCE_FRAME_MS) as f32;
        let approach = 1.0 - (1.0 - clamp01(p.spread_speed)).powf(frames);
        // Floored at 0: past the back-out overshoot particles hold position
        // instead of drifting back from the target.
        let weight = clamp01(approach * (1.0 - eased));
        p.position = p.position.lerp(p.spread_target, weight);
    }

    fn shimmer(&self, p: &mut GlitterParticle, time_s: f32) {
        let wave = (time_s * p.sparkle_speed + p.sparkle_phase).sin();
        let brightness = self.params.shimmer_base + self.params.shimmer_amplitude * wave;
        p.color = p.base_color.scaled(brightness);
    }
}

/// Move the particle's own phase forward to match the global one
fn hand_off(p: &mut GlitterParticle, phase: Phase) {
    match phase {
        Phase::Reveal => p.phase = IndividualPhase::Dispersing,
        Phase::Writing if p.phase == IndividualPhase::Entry && p.entry_progress >= 1.0 => {
            p.phase = IndividualPhase::Following;
            p.path_index = 0.0;
            p.follow_s = 0.0;
        }
        _ => {}
    }
}
