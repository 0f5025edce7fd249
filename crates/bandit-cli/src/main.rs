use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, bail, ensure};
use bandit_core::app::{BanditEngine, EngineStatus};
use bandit_core::domain::BanditConfig;
use bandit_core::impls::{DelayedStore, InMemoryStatsStore, TimeoutStore};
use clap::{Args, Parser, Subcommand};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "bandit-cli")]
#[command(about = "Drive a bandit engine against simulated Bernoulli arms")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a simulation and print the final engine status as JSON
    Simulate(SimulateArgs),
}

#[derive(Args, Debug)]
struct SimulateArgs {
    /// Success probability of each arm, comma separated (one entry per arm)
    #[arg(long, value_delimiter = ',', required = true)]
    probs: Vec<f64>,

    /// Total number of select+reward cycles
    #[arg(long, default_value_t = 1000)]
    trials: usize,

    /// Seed for both the engines and the simulated environment
    #[arg(long, env = "BANDIT_SEED")]
    seed: Option<u64>,

    /// Number of engine instances sharing one store, driven concurrently
    #[arg(long, default_value_t = 1)]
    engines: usize,

    /// Latency injected before every store operation
    #[arg(long, default_value_t = 0)]
    latency_ms: u64,

    /// Deadline for every store operation
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// UCB1 exploration constant (overrides the config file)
    #[arg(long)]
    exploration: Option<f64>,

    /// JSON engine config; its `arms` must match the number of probabilities
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct Report {
    trials: usize,
    total_reward: f64,
    expected_regret: f64,
    status: EngineStatus,
}

/// config ファイル + CLI 引数から BanditConfig を組み立てる
fn resolve_config(args: &SimulateArgs) -> anyhow::Result<BanditConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            BanditConfig::from_json_str(&json)?
        }
        None => BanditConfig::new(args.probs.len()),
    };
    if config.arms != args.probs.len() {
        bail!(
            "config has {} arms but {} probabilities were given",
            config.arms,
            args.probs.len()
        );
    }
    if let Some(exploration) = args.exploration {
        config = config.with_exploration(exploration);
    }
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }
    config.validate()?;
    Ok(config)
}

/// trials をできるだけ均等に engines 個へ分ける
fn split_trials(trials: usize, engines: usize) -> Vec<usize> {
    (0..engines)
        .map(|i| trials / engines + usize::from(i < trials % engines))
        .collect()
}

fn build_engine(
    config: BanditConfig,
    store: &InMemoryStatsStore,
    args: &SimulateArgs,
) -> anyhow::Result<BanditEngine> {
    let delayed = DelayedStore::new(store.clone(), Duration::from_millis(args.latency_ms));
    let builder = BanditEngine::builder(config);
    let builder = match args.timeout_ms {
        Some(ms) => builder.store(TimeoutStore::new(delayed, Duration::from_millis(ms))),
        None => builder.store(delayed),
    };
    Ok(builder.build()?)
}

/// 1 engine 分のループ：select → 環境で pull → reward
async fn drive(
    engine: Arc<BanditEngine>,
    probs: Arc<Vec<f64>>,
    trials: usize,
    mut env: StdRng,
) -> anyhow::Result<f64> {
    let mut total = 0.0;
    for _ in 0..trials {
        let arm = engine.select().await?;
        let reward = if env.gen_bool(probs[arm]) { 1.0 } else { 0.0 };
        engine.reward(arm, reward).await?;
        total += reward;
    }
    Ok(total)
}

async fn simulate(args: SimulateArgs) -> anyhow::Result<Report> {
    ensure!(!args.probs.is_empty(), "at least one probability is required");
    ensure!(args.engines >= 1, "--engines must be at least 1");
    for &p in &args.probs {
        ensure!((0.0..=1.0).contains(&p), "probability {p} is outside [0, 1]");
    }

    let config = resolve_config(&args)?;
    let store = InMemoryStatsStore::new(config.arms);
    let probs = Arc::new(args.probs.clone());

    info!(
        arms = config.arms,
        trials = args.trials,
        engines = args.engines,
        latency_ms = args.latency_ms,
        "starting simulation"
    );

    let mut engines = Vec::with_capacity(args.engines);
    let mut workers = Vec::with_capacity(args.engines);
    for (i, share) in split_trials(args.trials, args.engines).into_iter().enumerate() {
        let engine_config = match config.seed {
            Some(seed) => config.clone().with_seed(seed.wrapping_add(i as u64)),
            None => config.clone(),
        };
        let engine = Arc::new(build_engine(engine_config, &store, &args)?);
        let env = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed.rotate_left(32) ^ i as u64),
            None => StdRng::from_entropy(),
        };
        workers.push(tokio::spawn(drive(engine.clone(), probs.clone(), share, env)));
        engines.push(engine);
    }

    let mut total_reward = 0.0;
    for worker in workers {
        total_reward += worker.await.context("simulation worker panicked")??;
    }

    let best = probs.iter().copied().fold(0.0, f64::max);
    let expected_regret = best * args.trials as f64 - total_reward;
    let status = engines[0].status().await?;

    info!(
        total_reward,
        expected_regret,
        leader = ?status.leader(),
        "simulation finished"
    );

    Ok(Report {
        trials: args.trials,
        total_reward,
        expected_regret,
        status,
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Simulate(args) => {
            let report = simulate(args).await?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }
    Ok(())
}
