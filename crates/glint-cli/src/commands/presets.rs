//! Preset listing and config dump

use anyhow::{Context, Result};
use glint_particles::{SceneConfig, PRESETS};

pub fn list() -> Result<()> {
    for name in PRESETS {
        let config = SceneConfig::preset(name)?;
        println!(
            "{:<8} {} particles, writing at {:.0} ms, reveal at {:.0} ms",
            name,
            config.particle_count,
            config.entry_duration_ms,
            config.reveal_at_ms()
        );
    }
    Ok(())
}

pub fn print_config(preset: &str) -> Result<()> {
    let config = SceneConfig::preset(preset)
        .with_context(|| format!("Failed to resolve preset '{}'", preset))?;
    let text = config
        .to_toml_string()
        .context("Failed to serialize config")?;
    print!("{}", text);
    Ok(())
}
