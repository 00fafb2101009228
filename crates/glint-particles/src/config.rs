//! Scene configuration (parsed from TOML) and the built-in presets
//!
//! The three scene variants differ only in palette, timing and reveal
//! cadence, so they are expressed as presets over one `SceneConfig`.

use crate::layout::LayoutTable;
use crate::path::WaveShape;
use glint_core::{Color, GlintError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Names accepted by [`SceneConfig::preset`]
pub const PRESETS: &[&str] = &["classic", "gold", "frost"];

/// Top-level scene configuration.
///
/// Defaults reproduce the classic greeting: 1000 glitter particles, 4.5 s of
/// entry, 3.5 s of writing, then the reveal with a 100 ms letter cadence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Glitter particles in the main pool
    pub particle_count: usize,
    /// Scene time at which `Entry` hands over to `Writing`
    pub entry_duration_ms: f64,
    /// Length of the `Writing` phase before the reveal starts
    pub writing_duration_ms: f64,
    /// When false the scene stays in `Writing` forever
    pub reveal_enabled: bool,
    /// Interval between revealed letters
    pub reveal_tick_ms: f64,
    /// Samples in the wave path
    pub path_segments: usize,
    pub path_amplitude: f32,
    pub path_frequency: f32,
    pub wave_range_start: f32,
    pub wave_range_width: f32,
    /// Where the swarm enters the scene; the letterform starts here
    pub entry_point: [f32; 3],
    /// Share of the entry duration over which particle delays are spread
    pub stagger_fraction: f64,
    /// Progress gained per entry duration before acceleration kicks in
    pub entry_base_rate: f32,
    /// Eased entry progress above which particles blend onto the wave
    pub blend_threshold: f32,
    pub seed: u32,
    pub message: String,
    pub glitter: GlitterParams,
    pub fade: FadeParams,
    pub ambient: AmbientParams,
    pub sparkle: SparkleParams,
    pub palette: Palette,
    pub layout: LayoutTable,
}

/// Per-particle randomization ranges for the glitter pool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlitterParams {
    pub scale_min: f32,
    pub scale_max: f32,
    /// Progress-proportional entry acceleration, per entry duration
    pub acceleration_min: f32,
    pub acceleration_max: f32,
    /// Wave samples travelled per second while following
    pub path_speed_min: f32,
    pub path_speed_max: f32,
    /// Fraction of the remaining distance covered per reference frame
    pub spread_speed_min: f32,
    pub spread_speed_max: f32,
    pub spread_radius_min: f32,
    pub spread_radius_max: f32,
    pub spread_depth: f32,
    /// Spread progress gained per second while dispersing
    pub spread_rate: f32,
    pub formation_radius: f32,
    /// Extra formation radius for the last particle to start
    pub formation_growth: f32,
    /// How far formations tighten by the end of the letterform
    pub formation_convergence: f32,
    /// Formation scale while riding the wave
    pub wave_formation_scale: f32,
    pub flutter_amplitude: f32,
    pub flutter_frequency: f32,
    /// Seconds over which flutter fades in after joining the wave
    pub flutter_ramp_s: f32,
    pub shimmer_base: f32,
    pub shimmer_amplitude: f32,
    pub shimmer_speed_min: f32,
    pub shimmer_speed_max: f32,
}

impl Default for GlitterParams {
    fn default() -> Self {
        Self {
            scale_min: 0.01,
            scale_max: 0.025,
            acceleration_min: 0.81,
            acceleration_max: 2.025,
            path_speed_min: 6.0,
            path_speed_max: 18.0,
            spread_speed_min: 0.003,
            spread_speed_max: 0.011,
            spread_radius_min: 15.0,
            spread_radius_max: 40.0,
            spread_depth: 15.0,
            spread_rate: 0.6,
            formation_radius: 0.2,
            formation_growth: 0.6,
            formation_convergence: 0.3,
            wave_formation_scale: 0.5,
            flutter_amplitude: 0.1,
            flutter_frequency: 2.0,
            flutter_ramp_s: 0.4,
            shimmer_base: 0.8,
            shimmer_amplitude: 0.2,
            shimmer_speed_min: 1.5,
            shimmer_speed_max: 4.0,
        }
    }
}

/// Particle/text cross-fade applied once the reveal begins
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FadeParams {
    pub tick_ms: f64,
    pub particle_start: f32,
    pub particle_step: f32,
    pub text_step: f32,
}

impl Default for FadeParams {
    fn default() -> Self {
        Self {
            tick_ms: 30.0,
            particle_start: 0.9,
            particle_step: 0.015,
            text_step: 0.02,
        }
    }
}

/// Background snow field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AmbientParams {
    pub count: usize,
    /// Half-size of the cube the flakes are scattered in
    pub extent: f32,
    pub factor_min: f32,
    pub factor_max: f32,
    /// Drift clock advance per second
    pub speed_min: f32,
    pub speed_max: f32,
    pub scale: f32,
}

impl Default for AmbientParams {
    fn default() -> Self {
        Self {
            count: 300,
            extent: 10.0,
            factor_min: 20.0,
            factor_max: 120.0,
            speed_min: 0.3,
            speed_max: 0.45,
            scale: 0.05,
        }
    }
}

/// Sparkles spawned around revealed letters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SparkleParams {
    /// Sparkles spawned when a letter appears
    pub burst_count: usize,
    /// Arena slots; spawns beyond this are dropped
    pub capacity: usize,
    /// Per-frame chance that each visible letter emits one more sparkle
    pub shimmer_probability: f32,
    /// Life lost per frame
    pub life_speed_min: f32,
    pub life_speed_max: f32,
    pub scale_min: f32,
    pub scale_max: f32,
    /// Half-extent of the box around a letter anchor sparkles spawn in
    pub jitter: [f32; 3],
}

impl Default for SparkleParams {
    fn default() -> Self {
        Self {
            burst_count: 20,
            capacity: 2048,
            shimmer_probability: 0.1,
            life_speed_min: 0.01,
            life_speed_max: 0.03,
            scale_min: 0.02,
            scale_max: 0.05,
            jitter: [0.15, 0.2, 0.05],
        }
    }
}

/// Render colors handed through to the renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub glitter: Color,
    pub sparkle: Color,
    pub text: Color,
    pub snow: Color,
    pub background_top: Color,
    pub background_bottom: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self::pearl()
    }
}

impl Palette {
    pub fn pearl() -> Self {
        Self {
            glitter: Color::from_rgb8(237, 230, 219),
            sparkle: Color::from_rgb8(255, 248, 231),
            text: Color::from_rgb8(237, 230, 219),
            snow: Color::WHITE.with_alpha(0.6),
            background_top: Color::from_rgb8(112, 17, 49),
            background_bottom: Color::from_rgb8(82, 12, 36),
        }
    }

    pub fn gold() -> Self {
        Self {
            glitter: Color::from_rgb8(255, 215, 0),
            sparkle: Color::from_rgb8(255, 236, 139),
            text: Color::from_rgb8(255, 223, 128),
            snow: Color::WHITE.with_alpha(0.5),
            background_top: Color::from_rgb8(20, 24, 48),
            background_bottom: Color::from_rgb8(8, 10, 24),
        }
    }

    pub fn frost() -> Self {
        Self {
            glitter: Color::from_rgb8(200, 230, 255),
            sparkle: Color::from_rgb8(240, 250, 255),
            text: Color::from_rgb8(225, 240, 255),
            snow: Color::WHITE.with_alpha(0.7),
            background_top: Color::from_rgb8(16, 42, 84),
            background_bottom: Color::from_rgb8(6, 18, 40),
        }
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            particle_count: 1000,
            entry_duration_ms: 4500.0,
            writing_duration_ms: 3500.0,
            reveal_enabled: true,
            reveal_tick_ms: 100.0,
            path_segments: 200,
            path_amplitude: 0.5,
            path_frequency: 8.0,
            wave_range_start: -4.0,
            wave_range_width: 16.0,
            entry_point: [4.0, -4.0, 0.0],
            stagger_fraction: 1.0 / 3.0,
            entry_base_rate: 0.81,
            blend_threshold: 0.95,
            seed: 0xDEAD_BEEF,
            message: "Merry Christmas from Consid".to_string(),
            glitter: GlitterParams::default(),
            fade: FadeParams::default(),
            ambient: AmbientParams::default(),
            sparkle: SparkleParams::default(),
            palette: Palette::default(),
            layout: LayoutTable::default(),
        }
    }
}

impl SceneConfig {
    /// Look up a built-in preset by name
    pub fn preset(name: &str) -> Result<Self> {
        match name {
            "classic" => Ok(Self::default()),
            "gold" => Ok(Self {
                entry_duration_ms: 3000.0,
                writing_duration_ms: 3000.0,
                palette: Palette::gold(),
                ..Self::default()
            }),
            "frost" => Ok(Self {
                reveal_tick_ms: 150.0,
                palette: Palette::frost(),
                sparkle: SparkleParams {
                    shimmer_probability: 0.15,
                    ..SparkleParams::default()
                },
                ..Self::default()
            }),
            other => Err(GlintError::UnknownPreset {
                name: other.to_string(),
                allowed: PRESETS.iter().map(|s| s.to_string()).collect(),
            }),
        }
    }

    /// Parse and validate a TOML document. Missing keys take defaults.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Scene time at which the reveal starts
    pub fn reveal_at_ms(&self) -> f64 {
        self.entry_duration_ms + self.writing_duration_ms
    }

    pub fn wave_shape(&self) -> WaveShape {
        WaveShape {
            segments: self.path_segments,
            range_start: self.wave_range_start,
            range_width: self.wave_range_width,
            amplitude: self.path_amplitude,
            frequency: self.path_frequency,
        }
    }

    /// Reject configurations that would put NaN or empty data into the
    /// frame loop.
    pub fn validate(&self) -> Result<()> {
        if self.particle_count == 0 {
            return Err(GlintError::InvalidConfig(
                "particle_count must be at least 1".into(),
            ));
        }
        if self.message.trim().is_empty() {
            return Err(GlintError::InvalidConfig("message must not be empty".into()));
        }
        if self.path_segments < 2 {
            return Err(GlintError::InvalidConfig(
                "path_segments must be at least 2".into(),
            ));
        }

        positive("entry_duration_ms", self.entry_duration_ms)?;
        non_negative("writing_duration_ms", self.writing_duration_ms)?;
        positive("reveal_tick_ms", self.reveal_tick_ms)?;
        positive("fade.tick_ms", self.fade.tick_ms)?;
        positive("fade.particle_step", self.fade.particle_step as f64)?;
        positive("fade.text_step", self.fade.text_step as f64)?;
        positive("entry_base_rate", self.entry_base_rate as f64)?;

        unit_interval("stagger_fraction", self.stagger_fraction)?;
        unit_interval("blend_threshold", self.blend_threshold as f64)?;
        unit_interval("fade.particle_start", self.fade.particle_start as f64)?;
        unit_interval("sparkle.shimmer_probability", self.sparkle.shimmer_probability as f64)?;
        if self.blend_threshold >= 1.0 {
            return Err(GlintError::ValueOutOfRange {
                field: "blend_threshold".into(),
                min: 0.0,
                max: 1.0,
                value: self.blend_threshold as f64,
            });
        }

        let g = &self.glitter;
        ordered("glitter.scale", g.scale_min, g.scale_max)?;
        positive("glitter.scale_min", g.scale_min as f64)?;
        ordered("glitter.acceleration", g.acceleration_min, g.acceleration_max)?;
        ordered("glitter.path_speed", g.path_speed_min, g.path_speed_max)?;
        ordered("glitter.spread_radius", g.spread_radius_min, g.spread_radius_max)?;
        ordered("glitter.shimmer_speed", g.shimmer_speed_min, g.shimmer_speed_max)?;
        ordered("glitter.spread_speed", g.spread_speed_min, g.spread_speed_max)?;
        unit_interval("glitter.spread_speed_max", g.spread_speed_max as f64)?;
        positive("glitter.spread_rate", g.spread_rate as f64)?;
        non_negative("glitter.flutter_ramp_s", g.flutter_ramp_s as f64)?;
        let finite = [
            g.spread_depth,
            g.formation_radius,
            g.formation_growth,
            g.formation_convergence,
            g.wave_formation_scale,
            g.flutter_amplitude,
            g.flutter_frequency,
            g.shimmer_base,
            g.shimmer_amplitude,
            self.path_amplitude,
            self.path_frequency,
            self.wave_range_start,
            self.wave_range_width,
        ];
        if finite.iter().chain(self.entry_point.iter()).any(|v| !v.is_finite()) {
            return Err(GlintError::InvalidConfig(
                "path geometry and glitter parameters must be finite".into(),
            ));
        }

        let a = &self.ambient;
        ordered("ambient.factor", a.factor_min, a.factor_max)?;
        ordered("ambient.speed", a.speed_min, a.speed_max)?;
        if !a.extent.is_finite() || !a.scale.is_finite() {
            return Err(GlintError::InvalidConfig(
                "ambient extent and scale must be finite".into(),
            ));
        }

        let s = &self.sparkle;
        if s.capacity == 0 {
            return Err(GlintError::InvalidConfig(
                "sparkle.capacity must be at least 1".into(),
            ));
        }
        ordered("sparkle.life_speed", s.life_speed_min, s.life_speed_max)?;
        positive("sparkle.life_speed_min", s.life_speed_min as f64)?;
        ordered("sparkle.scale", s.scale_min, s.scale_max)?;
        if s.jitter.iter().any(|v| !v.is_finite()) {
            return Err(GlintError::InvalidConfig(
                "sparkle.jitter must be finite".into(),
            ));
        }

        let l = &self.layout;
        if !(l.advance.is_finite() && l.space_advance.is_finite())
            || l.pairs.iter().any(|p| !p.extra.is_finite())
        {
            return Err(GlintError::InvalidConfig(
                "layout spacing must be finite".into(),
            ));
        }

        Ok(())
    }
}

fn positive(field: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(GlintError::ValueOutOfRange {
            field: field.to_string(),
            min: f64::MIN_POSITIVE,
            max: f64::MAX,
            value,
        })
    }
}

fn non_negative(field: &str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(GlintError::ValueOutOfRange {
            field: field.to_string(),
            min: 0.0,
            max: f64::MAX,
            value,
        })
    }
}

fn unit_interval(field: &str, value: f64) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(GlintError::ValueOutOfRange {
            field: field.to_string(),
            min: 0.0,
            max: 1.0,
            value,
        })
    }
}

fn ordered(field: &str, min: f32, max: f32) -> Result<()> {
    if min.is_finite() && max.is_finite() && min <= max {
        Ok(())
    } else {
        Err(GlintError::InvalidConfig(format!(
            "{field}: min ({min}) must not exceed max ({max})"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = SceneConfig::default();
        config.validate().unwrap();
        assert_eq!(config.particle_count, 1000);
        assert!((config.reveal_at_ms() - 8000.0).abs() < 1e-9);
    }

    #[test]
    fn all_presets_validate() {
        for name in PRESETS {
            SceneConfig::preset(name).unwrap().validate().unwrap();
        }
    }

    #[test]
    fn presets_differ_in_palette_and_timing() {
        let classic = SceneConfig::preset("classic").unwrap();
        let gold = SceneConfig::preset("gold").unwrap();
        let frost = SceneConfig::preset("frost").unwrap();
        assert_ne!(classic.palette, gold.palette);
        assert!(gold.reveal_at_ms() < classic.reveal_at_ms());
        assert!(frost.reveal_tick_ms > classic.reveal_tick_ms);
    }

    #[test]
    fn unknown_preset_lists_allowed() {
        let err = SceneConfig::preset("neon").unwrap_err();
        match err {
            GlintError::UnknownPreset { name, allowed } => {
                assert_eq!(name, "neon");
                assert_eq!(allowed.len(), PRESETS.len());
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn parse_partial_toml() {
        let toml_str = r#"
particle_count = 250
entry_duration_ms = 2000
message = "Hello"

[glitter]
scale_max = 0.05

[[layout.pairs]]
left = "H"
right = "e"
extra = 0.1
"#;
        let config = SceneConfig::from_toml_str(toml_str).unwrap();
        assert_eq!(config.particle_count, 250);
        assert!((config.entry_duration_ms - 2000.0).abs() < 1e-9);
        assert_eq!(config.message, "Hello");
        assert!((config.glitter.scale_max - 0.05).abs() < 1e-6);
        assert!((config.glitter.scale_min - 0.01).abs() < 1e-6);
        assert_eq!(config.layout.pairs.len(), 1);
        assert_eq!(config.layout.pairs[0].left, 'H');
        // Untouched sections keep defaults
        assert_eq!(config.ambient.count, 300);
    }

    #[test]
    fn toml_round_trip_of_preset() {
        let gold = SceneConfig::preset("gold").unwrap();
        let text = gold.to_toml_string().unwrap();
        let parsed = SceneConfig::from_toml_str(&text).unwrap();
        assert_eq!(parsed, gold);
    }

    #[test]
    fn rejects_zero_particles() {
        let config = SceneConfig {
            particle_count: 0,
            ..SceneConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(GlintError::InvalidConfig(_))
        ));
    }

    #[test]
    fn rejects_empty_message() {
        let err = SceneConfig::from_toml_str("message = \"   \"").unwrap_err();
        assert!(matches!(err, GlintError::InvalidConfig(_)));
    }

    #[test]
    fn rejects_nan_timing() {
        let config = SceneConfig {
            entry_duration_ms: f64::NAN,
            ..SceneConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(GlintError::ValueOutOfRange { .. })
        ));
    }

    #[test]
    fn rejects_blend_threshold_of_one() {
        let config = SceneConfig {
            blend_threshold: 1.0,
            ..SceneConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_inverted_ranges() {
        let mut config = SceneConfig::default();
        config.glitter.scale_min = 0.5;
        config.glitter.scale_max = 0.1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_non_positive_glitter_scale() {
        for scale_min in [0.0, -0.02] {
            let mut config = SceneConfig::default();
            config.glitter.scale_min = scale_min;
            match config.validate() {
                Err(GlintError::ValueOutOfRange { field, .. }) => {
                    assert_eq!(field, "glitter.scale_min")
                }
                other => panic!("unexpected result {other:?}"),
            }
        }
    }

    #[test]
    fn rejects_negative_flutter_ramp() {
        let mut config = SceneConfig::default();
        config.glitter.flutter_ramp_s = -1.0;
        assert!(config.validate().is_err());
        config.glitter.flutter_ramp_s = 0.0;
        config.validate().unwrap();
    }
}
