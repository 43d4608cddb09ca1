//! Offside CLI
//!
//! Headless driver for the match engine: runs matches at a fixed tick,
//! stages the offside teaching scenario and prints the effective config.
//! Snapshots and summaries go to stdout as JSON lines; logs go to stderr.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use offside_core::engine::config::PROFILE_ENV_VAR;
use offside_core::engine::{explanation_lines, MatchCounters};
use offside_core::{EngineConfig, MatchEngine, MatchEvent, MatchPhase, MatchPlan};

#[derive(Parser)]
#[command(name = "offside")]
#[command(about = "Two-team match simulator with offside adjudication", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a headless match
    Run {
        /// RNG seed; equal seeds give equal matches
        #[arg(long, default_value_t = 0)]
        seed: u64,

        /// Ticks to simulate
        #[arg(long, default_value_t = 3000)]
        ticks: u32,

        /// JSON config file (missing fields take defaults)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Preset: classic, arcade, training
        #[arg(long)]
        profile: Option<String>,

        /// Resume automatically this many ticks after an offside call
        #[arg(long)]
        auto_resume_offside: Option<u32>,

        /// Print a JSON snapshot every N ticks (0 = never)
        #[arg(long, default_value_t = 0)]
        snapshot_every: u32,
    },

    /// Stage the offside teaching scenario and play until a call
    Scenario {
        #[arg(long, default_value_t = 0)]
        seed: u64,

        /// Give up after this many ticks
        #[arg(long, default_value_t = 600)]
        ticks: u32,
    },

    /// Print the effective configuration as JSON
    Config {
        /// Preset: classic, arcade, training
        #[arg(long)]
        profile: Option<String>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { seed, ticks, config, profile, auto_resume_offside, snapshot_every } => {
            let mut cfg = resolve_config(config.as_ref(), profile.as_deref())?;
            if auto_resume_offside.is_some() {
                cfg.timing.offside_auto_resume_ticks = auto_resume_offside;
                cfg.validate().context("invalid --auto-resume-offside")?;
            }
            run_match(seed, ticks, cfg, snapshot_every)?;
        }
        Commands::Scenario { seed, ticks } => {
            let cfg = resolve_config(None, None)?;
            run_scenario(seed, ticks, cfg)?;
        }
        Commands::Config { profile } => {
            let cfg = resolve_config(None, profile.as_deref())?;
            println!("{}", cfg.to_json_pretty()?);
        }
    }

    Ok(())
}

/// File beats `--profile`, which beats `OFFSIDE_PROFILE`.
fn resolve_config(path: Option<&PathBuf>, profile: Option<&str>) -> Result<EngineConfig> {
    if let Some(path) = path {
        return EngineConfig::load(path)
            .with_context(|| format!("failed to load config from {}", path.display()));
    }
    match profile {
        Some(name) => EngineConfig::preset(name).with_context(|| format!("bad --profile {}", name)),
        None => {
            if let Ok(name) = std::env::var(PROFILE_ENV_VAR) {
                log::info!("using {}={}", PROFILE_ENV_VAR, name);
            }
            Ok(EngineConfig::from_env_or_default())
        }
    }
}

fn run_match(seed: u64, ticks: u32, cfg: EngineConfig, snapshot_every: u32) -> Result<()> {
    let mut engine = MatchEngine::new(MatchPlan::new(seed).with_config(cfg))
        .context("failed to build match engine")?;

    log::info!("running {} ticks with seed {}", ticks, seed);

    for _ in 0..ticks {
        engine.step();

        for event in engine.drain_events() {
            if matches!(event, MatchEvent::Goal { .. } | MatchEvent::OffsideCalled { .. }) {
                println!("{}", serde_json::to_string(&event)?);
            }
        }

        if snapshot_every > 0 && engine.tick() % u64::from(snapshot_every) == 0 {
            println!("{}", serde_json::to_string(&engine.view())?);
        }
    }

    print_summary(&engine)
}

fn run_scenario(seed: u64, ticks: u32, cfg: EngineConfig) -> Result<()> {
    let mut engine = MatchEngine::new(MatchPlan::new(seed).with_config(cfg))
        .context("failed to build match engine")?;

    let staged = engine
        .stage_offside_scenario()
        .context("roster has no midfielder, forward or keeper to stage")?;
    println!("{}", serde_json::to_string(&staged)?);

    for _ in 0..ticks {
        engine.step();
        if engine.phase() != MatchPhase::Playing {
            break;
        }
    }

    let view = engine.view();
    match view.offside {
        Some(call) => {
            println!("OFFSIDE at tick {}", view.tick);
            println!(
                "  receiver {} beyond second-last defender {} (line x = {:.1})",
                call.receiver, call.second_last_defender, call.line_x
            );
            println!();
            for line in explanation_lines() {
                println!("{}", line);
            }
            println!();
            for line in call.assessment.explain() {
                println!("  {}", line);
            }
        }
        None => {
            println!("no offside called in {} ticks (phase: {})", view.tick, view.phase.name());
        }
    }

    print_summary(&engine)
}

fn print_summary(engine: &MatchEngine) -> Result<()> {
    let score = engine.score();
    let MatchCounters { ticks, kicks, passes_received, offside_calls, goals, .. } =
        engine.counters();
    log::info!(
        "finished: {} - {} after {} ticks ({} kicks, {} passes received, {} offside calls)",
        score.home,
        score.away,
        ticks,
        kicks,
        passes_received,
        offside_calls
    );
    let summary = serde_json::json!({
        "seed": engine.seed(),
        "ticks": ticks,
        "phase": engine.phase(),
        "score": score,
        "goals": goals,
        "kicks": kicks,
        "passes_received": passes_received,
        "offside_calls": offside_calls,
    });
    println!("{}", serde_json::to_string(&summary)?);
    Ok(())
}
