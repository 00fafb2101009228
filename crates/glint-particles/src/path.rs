//! Precomputed motion paths: the written "MM" letterform and the wave
//!
//! Both paths are built once from closed-form geometry and are immutable
//! afterwards. Every query clamps or wraps its parameter, so evaluation is
//! defined for any input including NaN.

use crate::easing::{clamp01, lerp, smoothstep};
use glint_core::{GlintError, Result, Vec3};
use std::f32::consts::PI;

/// Number of straight strokes in the double "MM" glyph
pub const LETTERFORM_SEGMENTS: usize = 8;

/// Double "MM" zig-zag from a start point to an end point.
///
/// Control points step `stroke` to the left and alternate between the start
/// height and `height` above it; the last stroke lands on `end`.
#[derive(Debug, Clone)]
pub struct LetterformPath {
    points: [[f32; 2]; LETTERFORM_SEGMENTS + 1],
}

impl LetterformPath {
    pub fn new(start: [f32; 2], end: [f32; 2]) -> Self {
        Self::with_stroke(start, end, 1.2, 3.0)
    }

    pub fn with_stroke(start: [f32; 2], end: [f32; 2], stroke: f32, height: f32) -> Self {
        let mut points = [[0.0; 2]; LETTERFORM_SEGMENTS + 1];
        for (i, point) in points.iter_mut().enumerate().take(LETTERFORM_SEGMENTS) {
            let rise = if i % 2 == 1 { height } else { 0.0 };
            *point = [start[0] - stroke * i as f32, start[1] + rise];
        }
        points[LETTERFORM_SEGMENTS] = end;
        Self { points }
    }

    /// The ordered control points, start first
    pub fn control_points(&self) -> &[[f32; 2]] {
        &self.points
    }

    pub fn start(&self) -> [f32; 2] {
        self.points[0]
    }

    pub fn end(&self) -> [f32; 2] {
        self.points[LETTERFORM_SEGMENTS]
    }

    /// Point along the glyph at global `progress` in [0, 1]. Each stroke is
    /// traversed with a smoothstep so the pen slows into every corner.
    pub fn evaluate(&self, progress: f32) -> [f32; 2] {
        let scaled = clamp01(progress) * LETTERFORM_SEGMENTS as f32;
        let segment = (scaled.floor() as usize).min(LETTERFORM_SEGMENTS - 1);
        let t = smoothstep(clamp01(scaled - segment as f32));

        let a = self.points[segment];
        let b = self.points[segment + 1];
        [lerp(a[0], b[0], t), lerp(a[1], b[1], t)]
    }
}

/// Geometry of the sinusoidal wave path
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaveShape {
    pub segments: usize,
    pub range_start: f32,
    pub range_width: f32,
    pub amplitude: f32,
    pub frequency: f32,
}

impl Default for WaveShape {
    fn default() -> Self {
        Self {
            segments: 200,
            range_start: -4.0,
            range_width: 16.0,
            amplitude: 0.5,
            frequency: 8.0,
        }
    }
}

/// Fixed samples of `y = amplitude * sin(t * π * frequency)` across the range
#[derive(Debug, Clone, PartialEq)]
pub struct WavePath {
    samples: Vec<Vec3>,
}

impl WavePath {
    pub fn generate(shape: WaveShape) -> Result<Self> {
        if shape.segments < 2 {
            return Err(GlintError::InvalidConfig(format!(
                "wave path needs at least 2 segments, got {}",
                shape.segments
            )));
        }
        let geometry = [
            shape.range_start,
            shape.range_width,
            shape.amplitude,
            shape.frequency,
        ];
        if geometry.iter().any(|v| !v.is_finite()) {
            return Err(GlintError::InvalidConfig(
                "wave path geometry must be finite".into(),
            ));
        }

        let samples = (0..shape.segments)
            .map(|i| {
                let t = i as f32 / shape.segments as f32;
                Vec3::new(
                    shape.range_start + t * shape.range_width,
                    (t * PI * shape.frequency).sin() * shape.amplitude,
                    0.0,
                )
            })
            .collect();
        Ok(Self { samples })
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> &[Vec3] {
        &self.samples
    }

    pub fn first(&self) -> Vec3 {
        self.samples[0]
    }

    pub fn last(&self) -> Vec3 {
        self.samples[self.samples.len() - 1]
    }

    /// Wrap a continuous sample index into [0, len)
    pub fn wrap_index(&self, path_index: f32) -> f32 {
        let len = self.samples.len() as f32;
        if !path_index.is_finite() {
            return 0.0;
        }
        let wrapped = path_index.rem_euclid(len);
        // rem_euclid can round up to exactly `len` for tiny negative inputs
        if wrapped >= len {
            0.0
        } else {
            wrapped
        }
    }

    /// Looping lookup: interpolates between `floor(i)` and the next sample,
    /// with the last sample flowing back into the first.
    pub fn sample_looped(&self, path_index: f32) -> Vec3 {
        let index = self.wrap_index(path_index);
        let base = (index.floor() as usize).min(self.samples.len() - 1);
        let next = (base + 1) % self.samples.len();
        let t = index - base as f32;
        self.samples[base].lerp(self.samples[next], t)
    }

    /// Open lookup: `t` in [0, 1] spans first to last sample exactly.
    pub fn evaluate(&self, t: f32) -> Vec3 {
        let last = self.samples.len() - 1;
        let scaled = clamp01(t) * last as f32;
        let base = (scaled.floor() as usize).min(last);
        if base == last {
            return self.samples[last];
        }
        let frac = scaled - base as f32;
        self.samples[base].lerp(self.samples[base + 1], frac)
    }
}
