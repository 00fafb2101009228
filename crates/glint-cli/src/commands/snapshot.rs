//! Dump a single simulated frame as JSON

use super::{drive, frame_step, open_scene, SceneArgs};
use anyhow::{ensure, Context, Result};
use glint_runtime::{FrameClock, SceneSystem};

pub struct SnapshotArgs {
    pub scene: SceneArgs,
    pub at_ms: f64,
    pub fps: f64,
    pub output: Option<String>,
}

pub fn run(args: SnapshotArgs) -> Result<()> {
    ensure!(
        args.at_ms.is_finite() && args.at_ms >= 0.0,
        "--at-ms must be non-negative, got {}",
        args.at_ms
    );
    let step = frame_step(args.fps)?;
    let mut scene = open_scene(&args.scene)?;
    let mut clock = FrameClock::new();
    drive(&mut scene, &mut clock, step, args.at_ms, |_| {})?;

    let json = serde_json::to_string_pretty(&scene.frame()).context("Failed to serialize frame")?;
    match &args.output {
        Some(path) => {
            std::fs::write(path, json).with_context(|| format!("Failed to write {}", path))?;
            println!(
                "Wrote frame {} ({} phase) to {}",
                clock.sample().frame,
                scene.phase().name(),
                path
            );
        }
        None => println!("{}", json),
    }

    scene.shutdown()?;
    Ok(())
}
