//! Batch generation and the JSONL / JSON file exports.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use tracing::{debug, info};

use super::config_env::ConfigOverrides;
use crate::engine::{GameRecord, GameSetup, GameSim};
use crate::error::Result;
use crate::models::{Difficulty, ExtractionInput, GameDocuments, GroundTruthReport, JsonlRecord};
use crate::output::game_documents;

pub const JSONL_FILE: &str = "examples.jsonl";
pub const EXAMPLES_FILE: &str = "examples.json";
pub const TRUE_REPORT_FILE: &str = "true_report.json";

#[derive(Debug, Clone)]
pub struct BatchRequest {
    pub seed: u64,
    pub games_per_difficulty: u32,
    pub difficulties: Vec<Difficulty>,
    pub overrides: ConfigOverrides,
}

impl Default for BatchRequest {
    fn default() -> Self {
        Self {
            seed: 0,
            games_per_difficulty: 1,
            difficulties: Difficulty::ALL.to_vec(),
            overrides: ConfigOverrides::default(),
        }
    }
}

/// One game of a batch.
#[derive(Debug, Clone)]
pub struct GeneratedGame {
    /// `<difficulty>_game_<n>`, 1-based.
    pub game_id: String,
    pub seed: u64,
    pub record: GameRecord,
    pub documents: GameDocuments,
}

pub fn game_id(difficulty: Difficulty, number: u32) -> String {
    format!("{difficulty}_game_{number}")
}

/// Seed of the `number`-th game of a tier, independent of the other games.
pub fn derive_game_seed(batch_seed: u64, difficulty: Difficulty, number: u32) -> u64 {
    let tier = difficulty as u64 + 1;
    let mut z = batch_seed
        .wrapping_add(tier.wrapping_mul(0x9E37_79B9_7F4A_7C15))
        .wrapping_add(u64::from(number).wrapping_mul(0xD1B5_4A32_D192_ED03));
    // splitmix64 finalizer
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

pub fn generate_batch(request: &BatchRequest) -> Result<Vec<GeneratedGame>> {
    request.overrides.validate()?;
    let rules = request.overrides.rules();
    let catalog = request.overrides.catalog();

    let mut games = Vec::with_capacity(request.difficulties.len() * request.games_per_difficulty as usize);
    for &difficulty in &request.difficulties {
        let profile = request.overrides.profile(difficulty);
        info!(
            %difficulty,
            games = request.games_per_difficulty,
            target_events = profile.target_events,
            "generating games"
        );
        for number in 1..=request.games_per_difficulty {
            let seed = derive_game_seed(request.seed, difficulty, number);
            let record = GameSim::new(GameSetup {
                difficulty,
                seed,
                rules: &rules,
                profile: &profile,
                catalog: &catalog,
                home_team: None,
                away_team: None,
            })?
            .simulate();
            let game_id = game_id(difficulty, number);
            debug!(%game_id, seed, final_score = %record.final_score(), "game generated");
            games.push(GeneratedGame {
                game_id,
                seed,
                documents: game_documents(&record),
                record,
            });
        }
    }
    Ok(games)
}

/// Two lines per game: the example, then its true report.
pub fn write_jsonl<W: Write>(mut writer: W, games: &[GeneratedGame]) -> Result<()> {
    for game in games {
        let example = JsonlRecord::Example {
            game_id: game.game_id.clone(),
            data: game.documents.example.clone(),
        };
        let truth = JsonlRecord::TrueReport {
            game_id: game.game_id.clone(),
            data: game.documents.true_report.clone(),
        };
        for record in [example, truth] {
            serde_json::to_writer(&mut writer, &record)?;
            writer.write_all(b"\n")?;
        }
    }
    writer.flush()?;
    Ok(())
}

pub fn read_jsonl<R: BufRead>(reader: R) -> Result<Vec<JsonlRecord>> {
    let mut records = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        records.push(serde_json::from_str(&line)?);
    }
    Ok(records)
}

pub fn read_jsonl_file(path: impl AsRef<Path>) -> Result<Vec<JsonlRecord>> {
    read_jsonl(BufReader::new(File::open(path)?))
}

/// Ground-truth report of `game_id` among JSONL records.
pub fn find_true_report<'a>(records: &'a [JsonlRecord], game_id: &str) -> Option<&'a GroundTruthReport> {
    records.iter().find_map(|record| match record {
        JsonlRecord::TrueReport { game_id: id, data } if id == game_id => Some(data),
        _ => None,
    })
}

/// Writes `examples.jsonl` into `dir`, plus `examples.json` and
/// `true_report.json` when `json_files` is set.
pub fn write_batch(dir: impl AsRef<Path>, games: &[GeneratedGame], json_files: bool) -> Result<()> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;
    write_jsonl(BufWriter::new(File::create(dir.join(JSONL_FILE))?), games)?;

    if json_files {
        let examples: BTreeMap<&str, &ExtractionInput> = games
            .iter()
            .map(|g| (g.game_id.as_str(), &g.documents.example))
            .collect();
        let reports: BTreeMap<&str, &GroundTruthReport> = games
            .iter()
            .map(|g| (g.game_id.as_str(), &g.documents.true_report))
            .collect();
        fs::write(dir.join(EXAMPLES_FILE), serde_json::to_string_pretty(&examples)?)?;
        fs::write(dir.join(TRUE_REPORT_FILE), serde_json::to_string_pretty(&reports)?)?;
    }
    info!(dir = %dir.display(), games = games.len(), "batch written");
    Ok(())
}
