// SPDX-License-Identifier: MIT OR Apache-2.0
//! `keyframe-sample`: inspect animation snapshots from the command line.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use timeline_keyframes::{AnimationEngine, AnimationSnapshot, EngineConfig, TrackId};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser, Debug)]
#[command(name = "keyframe-sample", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sample one track of a snapshot over a time range.
    Sample(SampleArgs),
    /// List available easing names.
    Easings,
    /// Print samples of an easing curve.
    Preview(PreviewArgs),
}

#[derive(Parser, Debug)]
struct SampleArgs {
    /// Input snapshot JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Track ID or property name.
    #[arg(long)]
    track: String,

    /// First sample time.
    #[arg(long, default_value_t = 0.0)]
    from: f64,

    /// Last sample time.
    #[arg(long)]
    to: f64,

    /// Number of intervals between `from` and `to`.
    #[arg(long, default_value_t = 10)]
    steps: usize,

    /// Engine configuration (RON).
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct PreviewArgs {
    /// Easing name, e.g. `ease-out-bounce`.
    #[arg(long)]
    easing: String,

    /// Number of intervals across [0, 1].
    #[arg(long, default_value_t = 10)]
    steps: usize,
}

fn main() -> anyhow::Result<()> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Sample(args) => cmd_sample(args),
        Command::Easings => cmd_easings(),
        Command::Preview(args) => cmd_preview(args),
    }
}

fn load_engine(snapshot: &Path, config: Option<&Path>) -> anyhow::Result<AnimationEngine> {
    let config = match config {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("load config '{}'", path.display()))?,
        None => EngineConfig::default(),
    };
    let snapshot = AnimationSnapshot::load(snapshot)
        .with_context(|| format!("load snapshot '{}'", snapshot.display()))?;

    let mut engine = AnimationEngine::with_config(config);
    engine.from_json(snapshot);
    Ok(engine)
}

fn resolve_track(engine: &AnimationEngine, key: &str) -> anyhow::Result<TrackId> {
    engine
        .get_all_tracks()
        .find(|t| t.id.0.to_string() == key)
        .or_else(|| engine.find_track_by_property(key))
        .map(|t| t.id)
        .with_context(|| format!("no track with ID or property '{key}'"))
}

fn cmd_sample(args: SampleArgs) -> anyhow::Result<()> {
    let engine = load_engine(&args.in_path, args.config.as_deref())?;
    let track = resolve_track(&engine, &args.track)?;

    for i in 0..=args.steps {
        let time = if args.steps == 0 {
            args.from
        } else {
            args.from + (args.to - args.from) * i as f64 / args.steps as f64
        };
        let value = engine
            .get_value(track, time)
            .context("track disappeared while sampling")?;
        println!("{time} {}", serde_json::to_string(&value)?);
    }
    Ok(())
}

fn cmd_easings() -> anyhow::Result<()> {
    for name in timeline_keyframes::easing_functions() {
        println!("{name}");
    }
    Ok(())
}

fn cmd_preview(args: PreviewArgs) -> anyhow::Result<()> {
    let samples = timeline_keyframes::preview_easing(&args.easing, args.steps)
        .with_context(|| format!("unknown easing '{}'", args.easing))?;
    for (i, value) in samples.iter().enumerate() {
        let t = if args.steps == 0 {
            0.0
        } else {
            i as f64 / args.steps as f64
        };
        println!("{t} {value}");
    }
    Ok(())
}
