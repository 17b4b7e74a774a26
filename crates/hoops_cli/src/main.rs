//! hoops CLI
//!
//! Generates play-by-play / ground-truth pairs and scores extracted reports.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use hoops_core::api::{self, BatchRequest, ConfigOverrides};
use hoops_core::{evaluate_reports, Difficulty, GameInvariants};

#[derive(Parser)]
#[command(name = "hoops", version)]
#[command(about = "Generate synthetic basketball play-by-play with ground-truth box scores", long_about = None)]
struct Cli {
    /// Debug-level logging (RUST_LOG takes precedence)
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate games and write examples.jsonl
    Generate {
        /// Games per difficulty tier
        #[arg(long, default_value_t = 1)]
        games_per_difficulty: u32,

        /// Comma-separated tiers
        #[arg(long, value_delimiter = ',', default_value = "basic,medium,hard")]
        difficulty: Vec<Difficulty>,

        /// Batch seed
        #[arg(long, default_value_t = 0)]
        seed: u64,

        /// Output directory
        #[arg(long)]
        out: PathBuf,

        /// Also write examples.json and true_report.json
        #[arg(long)]
        json_files: bool,

        /// Override file (rules, roster, profiles); falls back to HOOPS_CONFIG_PATH
        #[arg(long)]
        config: Option<PathBuf>,

        /// Run the invariant oracle on every game
        #[arg(long)]
        verify: bool,
    },

    /// Score a candidate report against a game's ground truth
    Evaluate {
        /// JSONL file written by `generate`
        #[arg(long)]
        truth: PathBuf,

        /// Candidate report (JSON, ground-truth shape)
        #[arg(long)]
        candidate: PathBuf,

        #[arg(long)]
        game_id: String,

        /// Include every individual check in the output
        #[arg(long)]
        details: bool,
    },
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn load_overrides(config: Option<&Path>) -> Result<ConfigOverrides> {
    match config {
        Some(path) => ConfigOverrides::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => ConfigOverrides::from_env_or_default()
            .with_context(|| format!("Failed to load config from {}", api::CONFIG_PATH_ENV)),
    }
}

fn generate(
    games_per_difficulty: u32,
    difficulties: Vec<Difficulty>,
    seed: u64,
    out: &Path,
    json_files: bool,
    config: Option<&Path>,
    verify: bool,
) -> Result<()> {
    if difficulties.is_empty() {
        bail!("at least one difficulty is required");
    }
    let request = BatchRequest {
        seed,
        games_per_difficulty,
        difficulties,
        overrides: load_overrides(config)?,
    };
    let games = api::generate_batch(&request).context("Failed to generate games")?;

    if verify {
        let mut failed = 0;
        for game in &games {
            let violations = GameInvariants::compute(&game.record).violations();
            if !violations.is_empty() {
                warn!(game_id = %game.game_id, ?violations, "invariant violation");
                failed += 1;
            }
        }
        if failed > 0 {
            bail!("{failed} of {} games violate invariants", games.len());
        }
        info!(games = games.len(), "all games passed the invariant oracle");
    }

    api::write_batch(out, &games, json_files)
        .with_context(|| format!("Failed to write output to {}", out.display()))?;
    println!(
        "Wrote {} games to {}",
        games.len(),
        out.join(api::JSONL_FILE).display()
    );
    Ok(())
}

fn evaluate(truth: &Path, candidate: &Path, game_id: &str, details: bool) -> Result<()> {
    let records = api::read_jsonl_file(truth)
        .with_context(|| format!("Failed to read {}", truth.display()))?;
    let report = api::find_true_report(&records, game_id)
        .with_context(|| format!("No true report for {game_id} in {}", truth.display()))?;

    let content = fs::read_to_string(candidate)
        .with_context(|| format!("Failed to read {}", candidate.display()))?;
    let candidate_json: serde_json::Value = serde_json::from_str(&content)
        .with_context(|| format!("Candidate {} is not valid JSON", candidate.display()))?;

    let evaluation = evaluate_reports(&candidate_json, report)?;
    info!(
        game_id,
        field = evaluation.field.accuracy_pct,
        fractional = evaluation.fractional_per_block.accuracy_pct,
        discrepancies = evaluation.discrepancies.len(),
        "evaluated"
    );

    let output = if details {
        serde_json::to_value(&evaluation)?
    } else {
        evaluation.summary()
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Generate {
            games_per_difficulty,
            difficulty,
            seed,
            out,
            json_files,
            config,
            verify,
        } => generate(
            games_per_difficulty,
            difficulty,
            seed,
            &out,
            json_files,
            config.as_deref(),
            verify,
        ),
        Commands::Evaluate {
            truth,
            candidate,
            game_id,
            details,
        } => evaluate(&truth, &candidate, &game_id, details),
    }
}
