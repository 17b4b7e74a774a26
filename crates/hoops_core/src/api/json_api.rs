use serde::{Deserialize, Serialize};

use super::config_env::ConfigOverrides;
use crate::engine::{GameSetup, GameSim};
use crate::error::{CoreError, Result};
use crate::models::{Difficulty, ExtractionInput, GroundTruthReport};
use crate::output::game_documents;
use crate::SCHEMA_VERSION;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub schema_version: u8,
    pub seed: u64,
    pub difficulty: Difficulty,
    /// Drawn from the roster catalog when absent.
    #[serde(default)]
    pub home_team: Option<String>,
    #[serde(default)]
    pub away_team: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub schema_version: u8,
    pub seed: u64,
    pub example: ExtractionInput,
    pub true_report: GroundTruthReport,
}

/// Simulates one game from a JSON request and returns both documents as JSON.
///
/// Overrides named by `HOOPS_CONFIG_PATH` apply when the variable is set.
pub fn generate_game_json(request_json: &str) -> Result<String> {
    let overrides = ConfigOverrides::from_env_or_default()?;
    generate_game_json_with(request_json, &overrides)
}

pub fn generate_game_json_with(request_json: &str, overrides: &ConfigOverrides) -> Result<String> {
    let request: GenerateRequest = serde_json::from_str(request_json)?;
    if request.schema_version != SCHEMA_VERSION {
        return Err(CoreError::UnsupportedSchema(request.schema_version));
    }

    let rules = overrides.rules();
    let profile = overrides.profile(request.difficulty);
    let catalog = overrides.catalog();
    let record = GameSim::new(GameSetup {
        difficulty: request.difficulty,
        seed: request.seed,
        rules: &rules,
        profile: &profile,
        catalog: &catalog,
        home_team: request.home_team.as_deref(),
        away_team: request.away_team.as_deref(),
    })?
    .simulate();

    let documents = game_documents(&record);
    let response = GenerateResponse {
        schema_version: SCHEMA_VERSION,
        seed: request.seed,
        example: documents.example,
        true_report: documents.true_report,
    };
    Ok(serde_json::to_string(&response)?)
}
