//! particle_stage: interactive entry point.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use particle_stage::app::{run, SourceKind};
use particle_stage::config::StageConfig;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "particle_stage", about = "Hand-gesture particle text and 3D scene installation")]
struct Cli {
    /// TOML configuration file (defaults apply when omitted)
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Replay a JSON-lines tracking recording instead of simulating hands
    #[arg(long, value_name = "FILE")]
    replay: Option<PathBuf>,

    /// Start with the tutorial already complete
    #[arg(long)]
    skip_tutorial: bool,

    /// Photo library for the photo tree (overrides the config file)
    #[arg(long, value_name = "DIR")]
    photos: Option<PathBuf>,

    /// Read hands from a LeapMotion controller
    #[cfg(feature = "leap")]
    #[arg(long, conflicts_with = "replay")]
    leap: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "particle_stage=info,gesture_core=info,scene_state=info,hand_sign=warn".into()),
        )
        .init();

    info!("particle_stage v{} starting", env!("CARGO_PKG_VERSION"));

    let mut cfg = match &cli.config {
        Some(path) => StageConfig::load(path)?,
        None => StageConfig::default(),
    };
    if cli.skip_tutorial {
        cfg.tutorial.skip = true;
    }
    if let Some(dir) = cli.photos {
        cfg.media.photo_dir = Some(dir);
    }

    let kind = match cli.replay {
        Some(path) => SourceKind::Replay(path),
        None => SourceKind::Sim,
    };
    #[cfg(feature = "leap")]
    let kind = if cli.leap { SourceKind::Leap } else { kind };
    info!(source = ?kind, texts = cfg.texts.items.len(), "configured");

    run(cfg, kind)
}
