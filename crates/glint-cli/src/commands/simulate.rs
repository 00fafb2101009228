//! Headless simulation with periodic status output

use super::{drive, frame_step, open_scene, SceneArgs};
use anyhow::{ensure, Result};
use glint_particles::GreetingScene;
use glint_runtime::{FrameClock, SceneSystem};

pub struct SimulateArgs {
    pub scene: SceneArgs,
    pub duration_ms: f64,
    pub fps: f64,
    pub report_every_ms: f64,
}

pub fn run(args: SimulateArgs) -> Result<()> {
    ensure!(
        args.duration_ms.is_finite() && args.duration_ms >= 0.0,
        "duration must be non-negative, got {}",
        args.duration_ms
    );
    let step = frame_step(args.fps)?;
    let mut scene = open_scene(&args.scene)?;
    let mut clock = FrameClock::new();

    println!(
        "Simulating '{}' for {:.0} ms at {} fps",
        scene.config().message,
        args.duration_ms,
        args.fps
    );

    let mut next_report = 0.0;
    let mut last_phase = None;
    drive(&mut scene, &mut clock, step, args.duration_ms, |scene| {
        let now = scene.frame().time.elapsed_ms();
        let phase = scene.phase();
        if last_phase != Some(phase) {
            println!("[{:>7.0} ms] phase {}", now, phase.name());
            last_phase = Some(phase);
        }
        if args.report_every_ms > 0.0 && now >= next_report {
            println!("[{:>7.0} ms] {}", now, status_line(scene));
            while next_report <= now {
                next_report += args.report_every_ms;
            }
        }
    })?;

    println!("Final: {}", status_line(&scene));
    scene.shutdown()?;
    Ok(())
}

fn status_line(scene: &GreetingScene) -> String {
    let (entry, following, dispersing) = scene.glitter().phase_counts();
    let snapshot = scene.snapshot();
    format!(
        "entry {} / following {} / dispersing {} | opacity {:.2} -> text {:.2} | {} sparkles | {:?}",
        entry,
        following,
        dispersing,
        snapshot.particle_opacity,
        snapshot.text_opacity,
        scene.reveal().sparkle_count(),
        scene.reveal().revealed_text()
    )
}
