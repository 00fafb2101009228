//! CLI command implementations

pub mod presets;
pub mod simulate;
pub mod snapshot;

use anyhow::{ensure, Context, Result};
use clap::Args;
use glint_particles::{GreetingScene, SceneConfig};
use glint_runtime::{FrameClock, SceneSystem};

/// Scene selection shared by every command that runs the scene
#[derive(Args, Debug, Clone)]
pub struct SceneArgs {
    /// Built-in preset (classic, gold, frost)
    #[arg(long, default_value = "classic")]
    pub preset: String,

    /// TOML config file, overrides the preset
    #[arg(long)]
    pub config: Option<String>,

    /// Override the random seed
    #[arg(long)]
    pub seed: Option<u32>,
}

impl SceneArgs {
    pub fn resolve(&self) -> Result<SceneConfig> {
        let mut config = match &self.config {
            Some(path) => SceneConfig::load(path)
                .with_context(|| format!("Failed to load config from {}", path))?,
            None => SceneConfig::preset(&self.preset)
                .with_context(|| format!("Failed to resolve preset '{}'", self.preset))?,
        };
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        Ok(config)
    }
}

/// Build and initialize a scene from the command line selection
pub fn open_scene(args: &SceneArgs) -> Result<GreetingScene> {
    let config = args.resolve()?;
    let mut scene = GreetingScene::new(config).context("Failed to build scene")?;
    scene.initialize().context("Failed to initialize scene")?;
    Ok(scene)
}

/// Fixed frame step for a simulated frame rate
pub fn frame_step(fps: f64) -> Result<f64> {
    ensure!(fps.is_finite() && fps > 0.0, "fps must be positive, got {}", fps);
    Ok(1.0 / fps)
}

/// Advance `scene` until the clock reaches `until_ms`, calling `on_frame`
/// after every update
pub fn drive(
    scene: &mut GreetingScene,
    clock: &mut FrameClock,
    step_s: f64,
    until_ms: f64,
    mut on_frame: impl FnMut(&GreetingScene),
) -> Result<()> {
    loop {
        let frame = clock.advance(step_s);
        scene
            .update(&frame)
            .with_context(|| format!("Update failed on frame {}", frame.frame))?;
        on_frame(scene);
        if frame.elapsed_ms() >= until_ms {
            return Ok(());
        }
    }
}
