//! External documents: the extraction input handed to the model under test,
//! and the ground truth report the evaluator scores it against.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::difficulty::Difficulty;
use super::play::PlayByPlayEntry;
use super::stats::StatLine;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamSheet {
    pub coach: String,
    pub roster: Vec<String>,
    pub starting_lineup: Vec<String>,
    pub bench: Vec<String>,
}

/// Team sheet plus the players who actually took the floor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TruthTeamSheet {
    #[serde(flatten)]
    pub sheet: TeamSheet,
    /// Sorted by name.
    pub participants: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamFinalStats {
    pub stats: StatLine,
    /// Every roster name, zero-filled for players who never entered.
    pub players: BTreeMap<String, StatLine>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionInput {
    pub matchup: String,
    pub teams: BTreeMap<String, TeamSheet>,
    pub play_by_play: Vec<PlayByPlayEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroundTruthReport {
    pub matchup: String,
    pub difficulty: Difficulty,
    pub final_score: String,
    pub teams: BTreeMap<String, TruthTeamSheet>,
    pub final_stats: BTreeMap<String, TeamFinalStats>,
}

impl GroundTruthReport {
    /// Parses `"<A>: <n>, <B>: <m>"` back into `(team, points)` pairs.
    pub fn parse_final_score(&self) -> Option<Vec<(String, u32)>> {
        self.final_score
            .split(", ")
            .map(|part| {
                let (team, points) = part.rsplit_once(": ")?;
                Some((team.to_string(), points.parse().ok()?))
            })
            .collect()
    }
}

/// Both documents for one simulated game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameDocuments {
    pub example: ExtractionInput,
    pub true_report: GroundTruthReport,
}

/// One line of the JSONL export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum JsonlRecord {
    Example { game_id: String, data: ExtractionInput },
    TrueReport { game_id: String, data: GroundTruthReport },
}

impl JsonlRecord {
    pub fn game_id(&self) -> &str {
        match self {
            JsonlRecord::Example { game_id, .. } | JsonlRecord::TrueReport { game_id, .. } => {
                game_id
            }
        }
    }
}
