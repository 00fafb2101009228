//! The greeting scene: ties the phase controller, glitter stepper, ambient
//! field and letter reveal into one frame update, and packs the results
//! into instance buffers for the renderer.

use crate::ambient::AmbientField;
use crate::config::SceneConfig;
use crate::particle::{GlitterPool, ParticleInstance};
use crate::phase::{Phase, PhaseController, PhaseSnapshot, PhaseTiming};
use crate::rand::ParticleRng;
use crate::reveal::RevealSequencer;
use crate::stepper::ParticleStepper;
use glint_core::{Color, GlintError, Result, Vec3};
use glint_runtime::{FrameTime, SceneSystem};
use log::info;
use serde::Serialize;

/// Everything the renderer needs for one frame
#[derive(Debug, Serialize)]
pub struct FrameOutput<'a> {
    pub time: FrameTime,
    pub phase: Phase,
    pub particle_opacity: f32,
    pub text_opacity: f32,
    pub revealed_text: String,
    /// Text color with the cross-faded text opacity as alpha
    pub text_color: Color,
    pub text_transform: Option<TextTransform>,
    /// Vertical backdrop gradient, top then bottom
    pub background: [Color; 2],
    pub glitter: &'a [ParticleInstance],
    pub ambient: &'a [ParticleInstance],
    pub sparkles: &'a [ParticleInstance],
}

/// Gentle float applied to the text once it is fully faded in
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TextTransform {
    pub position: Vec3,
    /// Rotation around the vertical axis, radians
    pub yaw: f32,
}

impl TextTransform {
    pub fn at(time_s: f32) -> Self {
        Self {
            position: Vec3::new((time_s * 0.5).sin() * 0.1, (time_s * 0.8).sin() * 0.15, 0.0),
            yaw: (time_s * 0.3).sin() * 0.08,
        }
    }
}

pub struct GreetingScene {
    config: SceneConfig,
    rng: ParticleRng,
    stepper: ParticleStepper,
    glitter: GlitterPool,
    ambient: AmbientField,
    controller: PhaseController,
    reveal: RevealSequencer,
    snapshot: PhaseSnapshot,
    last_frame: FrameTime,
    /// Pre-allocated instance buffers, refilled every frame
    glitter_instances: Vec<ParticleInstance>,
    ambient_instances: Vec<ParticleInstance>,
    sparkle_instances: Vec<ParticleInstance>,
    closed: bool,
}

impl GreetingScene {
    /// Validate the config and build every pool. Fails fast on bad input.
    pub fn new(config: SceneConfig) -> Result<Self> {
        config.validate()?;

        let mut rng = ParticleRng::new(config.seed);
        let stepper = ParticleStepper::new(&config)?;
        let glitter = GlitterPool::new(&config, &mut rng);
        let ambient = AmbientField::new(&config.ambient, &mut rng);
        let controller = PhaseController::new(PhaseTiming::from_config(&config));
        let reveal = RevealSequencer::new(
            &config.message,
            &config.layout,
            config.reveal_tick_ms,
            config.sparkle.clone(),
            config.palette.sparkle,
        )?;
        let snapshot = controller.snapshot(None);

        let mut scene = Self {
            glitter_instances: Vec::with_capacity(glitter.len()),
            ambient_instances: Vec::with_capacity(ambient.len()),
            sparkle_instances: Vec::with_capacity(config.sparkle.capacity),
            config,
            rng,
            stepper,
            glitter,
            ambient,
            controller,
            reveal,
            snapshot,
            last_frame: FrameTime::default(),
            closed: false,
        };
        scene.pack_instances();
        Ok(scene)
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.snapshot.phase
    }

    pub fn snapshot(&self) -> &PhaseSnapshot {
        &self.snapshot
    }

    pub fn glitter(&self) -> &GlitterPool {
        &self.glitter
    }

    pub fn reveal(&self) -> &RevealSequencer {
        &self.reveal
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn frame(&self) -> FrameOutput<'_> {
        FrameOutput {
            time: self.last_frame,
            phase: self.snapshot.phase,
            particle_opacity: self.snapshot.particle_opacity,
            text_opacity: self.snapshot.text_opacity,
            revealed_text: self.reveal.revealed_text(),
            text_color: self.config.palette.text.with_alpha(self.snapshot.text_opacity),
            text_transform: self.text_transform(),
            background: [
                self.config.palette.background_top,
                self.config.palette.background_bottom,
            ],
            glitter: &self.glitter_instances,
            ambient: &self.ambient_instances,
            sparkles: &self.sparkle_instances,
        }
    }

    /// Text float offset, only once the text has fully faded in
    pub fn text_transform(&self) -> Option<TextTransform> {
        (self.snapshot.text_opacity >= 1.0).then(|| TextTransform::at(self.last_frame.elapsed as f32))
    }

    fn pack_instances(&mut self) {
        let opacity = self.snapshot.particle_opacity;
        self.glitter_instances.clear();
        self.glitter_instances.extend(
            self.glitter
                .particles()
                .iter()
                .map(|p| ParticleInstance::from_glitter(p, opacity)),
        );

        let snow = self.config.palette.snow;
        let scale = self.ambient.scale();
        self.ambient_instances.clear();
        self.ambient_instances.extend(
            self.ambient
                .flakes()
                .iter()
                .map(|f| ParticleInstance::new(f.position, scale, snow)),
        );

        self.sparkle_instances.clear();
        self.sparkle_instances.extend(
            self.reveal
                .sparkles()
                .map(|s| ParticleInstance::new(s.position, s.scale, s.color.with_alpha(s.life))),
        );
    }
}

impl SceneSystem for GreetingScene {
    fn initialize(&mut self) -> Result<()> {
        info!(
            "[glint] scene initialized: {} glitter, {} ambient, message {:?}",
            self.glitter.len(),
            self.ambient.len(),
            self.config.message
        );
        Ok(())
    }

    fn update(&mut self, frame: &FrameTime) -> Result<()> {
        if self.closed {
            return Err(GlintError::SceneClosed);
        }

        let snapshot = self.controller.advance(frame.elapsed_ms());
        if let Some(phase) = snapshot.entered {
            info!("[glint] phase -> {} at {:.0} ms", phase.name(), frame.elapsed_ms());
            if phase == Phase::Reveal {
                self.reveal.start(self.config.reveal_at_ms());
            }
        }
        if snapshot.fade_complete && !self.snapshot.fade_complete {
            info!("[glint] cross-fade complete at {:.0} ms", frame.elapsed_ms());
        }

        self.stepper.step(&mut self.glitter, frame, snapshot.phase);
        self.ambient.step(frame.delta as f32);
        self.reveal.update(frame, &mut self.rng);

        self.snapshot = snapshot;
        self.last_frame = *frame;
        self.pack_instances();
        Ok(())
    }

    fn shutdown(&mut self) -> Result<()> {
        if !self.closed {
            self.closed = true;
            self.reveal.clear_sparkles();
            self.sparkle_instances.clear();
            info!("[glint] scene shut down at {:.0} ms", self.last_frame.elapsed_ms());
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "glint"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particle::IndividualPhase;
    use glint_runtime::FrameClock;

    fn run_to(scene: &mut GreetingScene, clock: &mut FrameClock, until_ms: f64, dt: f64) {
        while clock.total_time * 1000.0 < until_ms {
            let frame = clock.advance(dt);
            scene.update(&frame).unwrap();
        }
    }

    #[test]
    fn four_particle_scenario() {
        let config = SceneConfig {
            particle_count: 4,
            entry_duration_ms: 100.0,
            seed: 1234,
            ..SceneConfig::default()
        };
        let mut scene = GreetingScene::new(config).unwrap();
        scene.initialize().unwrap();
        let mut clock = FrameClock::new();
        run_to(&mut scene, &mut clock, 200.0, 0.01);

        let positions: Vec<Vec3> = scene.glitter().particles().iter().map(|p| p.position).collect();
        assert_eq!(positions.len(), 4);
        for (i, a) in positions.iter().enumerate() {
            assert!(a.is_finite());
            for b in &positions[i + 1..] {
                assert!(a.distance(b) > 1e-4, "positions collapsed: {a:?} {b:?}");
            }
        }
        assert!(scene
            .glitter()
            .particles()
            .iter()
            .any(|p| p.phase != IndividualPhase::Entry));
        assert_eq!(scene.phase(), Phase::Writing);
    }

    #[test]
    fn full_sequence_reveals_message() {
        let config = SceneConfig {
            particle_count: 120,
            ..SceneConfig::default()
        };
        let message = config.message.clone();
        let mut scene = GreetingScene::new(config).unwrap();
        let mut clock = FrameClock::new();
        run_to(&mut scene, &mut clock, 12_000.0, 1.0 / 60.0);

        let frame = scene.frame();
        assert_eq!(frame.phase, Phase::Reveal);
        assert_eq!(frame.revealed_text, message);
        assert_eq!(frame.particle_opacity, 0.0);
        assert_eq!(frame.text_opacity, 1.0);
        assert!(frame.text_transform.is_some());
        assert_eq!(frame.glitter.len(), 120);
        assert_eq!(frame.ambient.len(), 300);
        assert!(frame.glitter.iter().all(|g| g.color[3] == 0.0));
        assert_eq!(scene.glitter().phase_counts(), (0, 0, 120));
    }

    #[test]
    fn text_hidden_until_reveal() {
        let config = SceneConfig {
            particle_count: 10,
            ..SceneConfig::default()
        };
        let mut scene = GreetingScene::new(config).unwrap();
        let mut clock = FrameClock::new();
        run_to(&mut scene, &mut clock, 6000.0, 1.0 / 60.0);
        let frame = scene.frame();
        assert_eq!(frame.phase, Phase::Writing);
        assert_eq!(frame.revealed_text, "");
        assert!(frame.sparkles.is_empty());
        assert!(frame.text_transform.is_none());
        assert!((frame.particle_opacity - 0.9).abs() < 1e-6);
    }

    #[test]
    fn same_seed_same_frames() {
        let config = SceneConfig {
            particle_count: 32,
            ..SceneConfig::default()
        };
        let mut a = GreetingScene::new(config.clone()).unwrap();
        let mut b = GreetingScene::new(config).unwrap();
        let (mut ca, mut cb) = (FrameClock::new(), FrameClock::new());
        run_to(&mut a, &mut ca, 9000.0, 1.0 / 30.0);
        run_to(&mut b, &mut cb, 9000.0, 1.0 / 30.0);
        let (fa, fb) = (a.frame(), b.frame());
        assert_eq!(fa.glitter.len(), fb.glitter.len());
        for (x, y) in fa.glitter.iter().zip(fb.glitter) {
            assert_eq!(x.pos_scale, y.pos_scale);
        }
        assert_eq!(fa.sparkles.len(), fb.sparkles.len());
    }

    #[test]
    fn rejects_invalid_config() {
        let config = SceneConfig {
            message: String::new(),
            ..SceneConfig::default()
        };
        assert!(GreetingScene::new(config).is_err());
    }

    #[test]
    fn updates_after_shutdown_are_refused() {
        let config = SceneConfig {
            particle_count: 8,
            ..SceneConfig::default()
        };
        let mut scene = GreetingScene::new(config).unwrap();
        let mut clock = FrameClock::new();
        run_to(&mut scene, &mut clock, 100.0, 1.0 / 60.0);
        let before: Vec<Vec3> = scene.glitter().particles().iter().map(|p| p.position).collect();

        scene.shutdown().unwrap();
        assert!(scene.is_closed());
        let frame = clock.advance(1.0 / 60.0);
        assert!(matches!(scene.update(&frame), Err(GlintError::SceneClosed)));

        let after: Vec<Vec3> = scene.glitter().particles().iter().map(|p| p.position).collect();
        assert_eq!(before, after);
        // Shutdown is idempotent
        scene.shutdown().unwrap();
    }

    #[test]
    fn frame_serializes_to_json() {
        let config = SceneConfig {
            particle_count: 2,
            ..SceneConfig::default()
        };
        let scene = GreetingScene::new(config).unwrap();
        let json = serde_json::to_string(&scene.frame()).unwrap();
        assert!(json.contains("\"phase\":\"Entry\""));
        assert!(json.contains("pos_scale"));
        assert!(json.contains("\"background\""));
    }

    #[test]
    fn frame_carries_palette_text_and_backdrop() {
        let config = SceneConfig {
            particle_count: 16,
            ..SceneConfig::preset("gold").unwrap()
        };
        let palette = config.palette.clone();
        let mut scene = GreetingScene::new(config).unwrap();

        let frame = scene.frame();
        assert_eq!(frame.background, [palette.background_top, palette.background_bottom]);
        assert_eq!(frame.text_color.a, 0.0);
        assert_eq!(frame.text_color.r, palette.text.r);

        let mut clock = FrameClock::new();
        run_to(&mut scene, &mut clock, 9000.0, 1.0 / 60.0);
        let frame = scene.frame();
        assert_eq!(frame.text_color.a, 1.0);
        assert_eq!(frame.text_color.with_alpha(palette.text.a), palette.text);
    }
}
