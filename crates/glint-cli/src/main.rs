//! Glint CLI - headless driver for the particle greeting scene

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{presets, simulate, snapshot, SceneArgs};

#[derive(Parser)]
#[command(name = "glint")]
#[command(about = "Particle choreography for an animated greeting", long_about = None)]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the scene on a simulated clock and print phase changes
    Simulate {
        #[command(flatten)]
        scene: SceneArgs,

        /// How long to run, in milliseconds
        #[arg(long, default_value = "12000")]
        duration_ms: f64,

        /// Simulated frames per second
        #[arg(long, default_value = "60")]
        fps: f64,

        /// Print a status line every N milliseconds (0 disables)
        #[arg(long, default_value = "1000")]
        report_every_ms: f64,
    },

    /// Simulate up to a point in time and dump that frame as JSON
    Snapshot {
        #[command(flatten)]
        scene: SceneArgs,

        /// Scene time to stop at, in milliseconds
        #[arg(long)]
        at_ms: f64,

        /// Simulated frames per second
        #[arg(long, default_value = "60")]
        fps: f64,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<String>,
    },

    /// List the built-in presets
    Presets,

    /// Print a preset's full configuration as TOML
    Config {
        /// Preset name
        #[arg(long, default_value = "classic")]
        preset: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match cli.command {
        Commands::Simulate {
            scene,
            duration_ms,
            fps,
            report_every_ms,
        } => simulate::run(simulate::SimulateArgs {
            scene,
            duration_ms,
            fps,
            report_every_ms,
        }),
        Commands::Snapshot {
            scene,
            at_ms,
            fps,
            output,
        } => snapshot::run(snapshot::SnapshotArgs {
            scene,
            at_ms,
            fps,
            output,
        }),
        Commands::Presets => presets::list(),
        Commands::Config { preset } => presets::print_config(&preset),
    }
}
