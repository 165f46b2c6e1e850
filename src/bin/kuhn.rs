//! Kuhn Poker CFR solver binary.
//!
//! Trains both players by self-play, prints each player's average strategy
//! per information set, then reports the exact game value, exploitability,
//! and the mean payoffs of sampled playouts.
//!
//! Usage:
//!   cargo run --release --bin kuhn -- [OPTIONS]

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;

use kuhn_cfr::cfr::{
    exploitability, game_value, EvalPolicy, EvalReport, StrategyProfile, StrategySumMode,
    TrainConfig, TrainStats, Trainer,
};
use kuhn_cfr::games::kuhn::{KuhnAction, KuhnPoker, NUM_PLAYERS};

/// Seed used when neither the command line nor a config file sets one.
const DEFAULT_SEED: u64 = 42;

#[derive(Parser, Debug)]
#[command(name = "kuhn", version, about = "Solve Kuhn Poker with CFR and evaluate by self-play")]
struct Cli {
    /// Configuration JSON file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Training iterations
    #[arg(short, long)]
    iterations: Option<u64>,

    /// Evaluation hands
    #[arg(short = 'n', long)]
    hands: Option<u64>,

    /// Random seed
    #[arg(short, long)]
    seed: Option<u64>,

    /// Accumulate the strategy sum once per node visit instead of once per action
    #[arg(long)]
    per_node_strategy_sum: bool,

    /// Sample evaluation actions from the average strategy instead of the current one
    #[arg(long)]
    eval_average: bool,

    /// Print a JSON report instead of text
    #[arg(long)]
    json: bool,

    /// Hide the progress bar
    #[arg(long)]
    no_progress: bool,
}

#[derive(Serialize)]
struct SolveReport {
    config: TrainConfig,
    stats: TrainStats,
    average_strategies: [StrategyProfile; NUM_PLAYERS],
    game_value: f64,
    exploitability: f64,
    evaluation: EvalReport,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn build_config(cli: &Cli) -> kuhn_cfr::Result<TrainConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            log::info!("loading configuration from {}", path.display());
            TrainConfig::from_json_file(path)?
        }
        None => TrainConfig::default(),
    };

    if let Some(iterations) = cli.iterations {
        config.iterations = iterations;
    }
    if let Some(hands) = cli.hands {
        config.eval_hands = hands;
    }
    if let Some(seed) = cli.seed {
        config.seed = Some(seed);
    }
    if config.seed.is_none() {
        config.seed = Some(DEFAULT_SEED);
    }
    if cli.per_node_strategy_sum {
        config.strategy_sum_mode = StrategySumMode::PerNode;
    }
    if cli.eval_average {
        config.eval_policy = EvalPolicy::Average;
    }

    config.validate()?;
    Ok(config)
}

fn progress_bar(cli: &Cli, len: u64) -> ProgressBar {
    if cli.no_progress || cli.json {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new(len);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{spinner:.green} training [{bar:40.cyan/blue}] {pos}/{len} ({per_sec}, {eta})")
    {
        bar.set_style(style.progress_chars("#>-"));
    }
    bar
}

fn run(cli: Cli) -> kuhn_cfr::Result<()> {
    let config = build_config(&cli)?;
    log::debug!("{:?}", config);

    let mut trainer = Trainer::new(config.clone());
    let bar = progress_bar(&cli, config.iterations);
    let stats = trainer
        .train_with_callback(config.iterations, config.progress_interval, |stats| {
            bar.set_position(stats.iterations)
        })
        .clone();
    bar.finish_and_clear();

    let average_strategies = trainer.average_strategies();
    let value = game_value(trainer.game(), trainer.tables());
    let exploit = exploitability(trainer.game(), trainer.tables());
    let evaluation = trainer.evaluate();

    if cli.json {
        let report = SolveReport {
            config,
            stats,
            average_strategies,
            game_value: value,
            exploitability: exploit,
            evaluation,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "(columns: {}, {})",
        KuhnAction::Pass.name(),
        KuhnAction::Bet.name()
    );
    for (player, profile) in average_strategies.iter().enumerate() {
        println!("Player {} average strategy:", player);
        for (infoset, strategy) in profile.iter().enumerate() {
            println!(
                "  Infoset {}: {:.3} {:.3}   ({})",
                infoset,
                strategy[0],
                strategy[1],
                KuhnPoker::info_set_label(infoset)
            );
        }
    }

    println!();
    println!(
        "Trained {} iterations in {:.2}s ({:.0} it/s)",
        stats.iterations, stats.elapsed_seconds, stats.iterations_per_second
    );
    println!("Game value (player 0): {:+.4} (equilibrium -1/18 = -0.0556)", value);
    println!("Exploitability: {:.4}", exploit);
    println!(
        "Average Payoff over {} games: Player 0: {}, Player 1: {}",
        evaluation.hands, evaluation.mean_payoffs[0], evaluation.mean_payoffs[1]
    );

    Ok(())
}
