//! Report evaluation: scores a candidate box score against the ground truth.
//!
//! Every comparison is one [`Check`] carrying two weights:
//!
//! - `field`: each check counts 1.
//! - `fractional_per_block`: the final score is one block of weight 1; each
//!   team's aggregate stats share a weight of 1; each team's player checks
//!   (participant stats plus one all-zeros check per non-participant) share
//!   a weight of 1.
//!
//! Accuracy in either mode is `100 * Σ(weight of correct checks) / Σ(weight)`.
//!
//! ```text
//! final_score ──► 1 check                      (field 1, fractional 1)
//! team stats  ──► |stats| checks per team      (field 1, fractional 1/|stats|)
//! players     ──► Σ|stats| of participants     (field 1, fractional 1/checks)
//!                 + 1 per non-participant
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use crate::error::Result;
use crate::models::GroundTruthReport;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckScope {
    Meta,
    Team,
    Player,
    NonParticipant,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CheckWeights {
    pub field: f64,
    pub fractional_per_block: f64,
}

/// A single comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Check {
    pub scope: CheckScope,
    pub team: Option<String>,
    pub player: Option<String>,
    /// Stat key, `final_score`, or `all_zeros`.
    pub stat: String,
    pub truth: Value,
    /// `None` when the candidate had nothing at this position.
    pub candidate: Option<Value>,
    pub correct: bool,
    pub weights: CheckWeights,
}

impl Check {
    pub fn contribution(&self) -> CheckWeights {
        if self.correct {
            self.weights
        } else {
            CheckWeights {
                field: 0.0,
                fractional_per_block: 0.0,
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScopeTotals {
    pub checks: usize,
    pub matched: usize,
    pub weight: f64,
    pub correct_weight: f64,
}

/// Totals for one weighting mode.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AccuracySummary {
    pub accuracy_pct: f64,
    pub sum_weights: f64,
    pub sum_contributions: f64,
    pub by_scope: BTreeMap<CheckScope, ScopeTotals>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationReport {
    pub field: AccuracySummary,
    pub fractional_per_block: AccuracySummary,
    pub discrepancies: Vec<String>,
    pub checks: Vec<Check>,
}

impl EvaluationReport {
    /// Summary without the per-check list.
    pub fn summary(&self) -> Value {
        serde_json::json!({
            "field": self.field,
            "fractional_per_block": self.fractional_per_block,
            "discrepancies": self.discrepancies,
        })
    }
}

struct Evaluator {
    checks: Vec<Check>,
    discrepancies: Vec<String>,
}

impl Evaluator {
    fn push(
        &mut self,
        scope: CheckScope,
        team: Option<&str>,
        player: Option<&str>,
        stat: &str,
        truth: Value,
        candidate: Option<Value>,
        correct: bool,
        fractional: f64,
    ) {
        self.checks.push(Check {
            scope,
            team: team.map(str::to_string),
            player: player.map(str::to_string),
            stat: stat.to_string(),
            truth,
            candidate,
            correct,
            weights: CheckWeights {
                field: 1.0,
                fractional_per_block: fractional,
            },
        });
    }

    fn team_block(
        &mut self,
        team: &str,
        truth_team: &Map<String, Value>,
        truth_sheet: Option<&Map<String, Value>>,
        candidate_team: Option<&Map<String, Value>>,
    ) {
        let empty = Map::new();
        let truth_stats = object(truth_team.get("stats")).unwrap_or(&empty);
        let truth_players = object(truth_team.get("players")).unwrap_or(&empty);
        let candidate_stats = candidate_team.and_then(|t| object(t.get("stats")));
        let candidate_players = candidate_team.and_then(|t| object(t.get("players")));

        let team_weight = share(truth_stats.len());
        for (stat, truth) in truth_stats {
            let candidate = candidate_stats.and_then(|s| s.get(stat)).cloned();
            let correct = candidate_team.is_some() && values_equal(truth, candidate.as_ref());
            if candidate_team.is_some() && !correct {
                self.discrepancies.push(format!(
                    "TEAM STAT MISMATCH for {team} ({stat}): GT={truth}, LLM={}",
                    show(candidate.as_ref())
                ));
            }
            self.push(CheckScope::Team, Some(team), None, stat, truth.clone(), candidate, correct, team_weight);
        }

        let participants = string_list(truth_sheet.and_then(|s| s.get("participants")));
        let roster = string_list(truth_sheet.and_then(|s| s.get("roster")));
        let non_participants: Vec<&str> = roster
            .iter()
            .copied()
            .filter(|p| !participants.contains(p))
            .collect();

        let participant_checks: usize = participants
            .iter()
            .map(|p| object(truth_players.get(*p)).map_or(0, Map::len))
            .sum();
        let player_weight = share(participant_checks + non_participants.len());

        for &player in &participants {
            let truth_line = object(truth_players.get(player)).unwrap_or(&empty);
            let candidate_line = candidate_players
                .and_then(|p| object(p.get(player)))
                .filter(|line| !line.is_empty());
            if candidate_team.is_some() && candidate_line.is_none() {
                self.discrepancies
                    .push(format!("MISSING PARTICIPATING PLAYER: {player} in team {team}."));
            }
            for (stat, truth) in truth_line {
                let candidate = candidate_line.and_then(|line| line.get(stat)).cloned();
                let correct = candidate_line.is_some() && values_equal(truth, candidate.as_ref());
                if candidate_line.is_some() && !correct {
                    self.discrepancies.push(format!(
                        "PLAYER STAT MISMATCH for {player} ({stat}): GT={truth}, LLM={}",
                        show(candidate.as_ref())
                    ));
                }
                self.push(
                    CheckScope::Player,
                    Some(team),
                    Some(player),
                    stat,
                    truth.clone(),
                    candidate,
                    correct,
                    player_weight,
                );
            }
        }

        for player in non_participants {
            let candidate = candidate_players.and_then(|p| p.get(player)).cloned();
            let correct = candidate_team.is_some() && is_all_zeros(candidate.as_ref());
            if candidate_team.is_some() && !correct {
                self.discrepancies.push(format!(
                    "NON-PARTICIPANT ERROR for {player}: Should have all zero stats, but got: {}",
                    show(candidate.as_ref())
                ));
            }
            self.push(
                CheckScope::NonParticipant,
                Some(team),
                Some(player),
                "all_zeros",
                Value::String("all zeros expected".to_string()),
                candidate,
                correct,
                player_weight,
            );
        }
    }

    fn finish(self) -> EvaluationReport {
        EvaluationReport {
            field: summarize(&self.checks, |w| w.field),
            fractional_per_block: summarize(&self.checks, |w| w.fractional_per_block),
            discrepancies: self.discrepancies,
            checks: self.checks,
        }
    }
}

/// Scores `candidate` (a report in the ground-truth shape, possibly partial
/// or malformed) against `truth`.
pub fn evaluate_reports(candidate: &Value, truth: &GroundTruthReport) -> Result<EvaluationReport> {
    let truth_json = serde_json::to_value(truth)?;
    let empty = Map::new();
    let mut eval = Evaluator {
        checks: Vec::new(),
        discrepancies: Vec::new(),
    };

    let truth_score = Value::String(truth.final_score.clone());
    let candidate_score = candidate.get("final_score").cloned();
    let score_ok = candidate_score.as_ref() == Some(&truth_score);
    if !score_ok {
        eval.discrepancies.push(format!(
            "METADATA MISMATCH for 'final_score': GT='{}', LLM='{}'",
            truth.final_score,
            show(candidate_score.as_ref())
        ));
    }
    eval.push(CheckScope::Meta, None, None, "final_score", truth_score, candidate_score, score_ok, 1.0);

    let truth_stats = object(truth_json.get("final_stats")).unwrap_or(&empty);
    let truth_sheets = object(truth_json.get("teams")).unwrap_or(&empty);
    let candidate_stats = object(candidate.get("final_stats"));

    for (team, truth_team) in truth_stats {
        let truth_team = truth_team.as_object().unwrap_or(&empty);
        let candidate_team = match candidate_stats.and_then(|s| s.get(team)) {
            Some(block) => Some(block.as_object().unwrap_or(&empty)),
            None => {
                eval.discrepancies.push(format!("MISSING STATS BLOCK for team: {team}"));
                None
            }
        };
        let sheet = object(truth_sheets.get(team));
        eval.team_block(team, truth_team, sheet, candidate_team);
    }

    Ok(eval.finish())
}

fn summarize(checks: &[Check], weight: impl Fn(&CheckWeights) -> f64) -> AccuracySummary {
    let mut summary = AccuracySummary::default();
    for check in checks {
        let w = weight(&check.weights);
        let c = weight(&check.contribution());
        summary.sum_weights += w;
        summary.sum_contributions += c;
        let scope = summary.by_scope.entry(check.scope).or_default();
        scope.checks += 1;
        scope.matched += usize::from(check.correct);
        scope.weight += w;
        scope.correct_weight += c;
    }
    summary.accuracy_pct = 100.0 * summary.sum_contributions / summary.sum_weights.max(1e-9);
    summary
}

fn share(count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        1.0 / count as f64
    }
}

fn object(value: Option<&Value>) -> Option<&Map<String, Value>> {
    value.and_then(Value::as_object)
}

fn string_list(value: Option<&Value>) -> Vec<&str> {
    value
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default()
}

/// Numbers compare by value, so `3` and `3.0` agree.
fn values_equal(truth: &Value, candidate: Option<&Value>) -> bool {
    match (truth, candidate) {
        (Value::Number(a), Some(Value::Number(b))) => a.as_f64() == b.as_f64(),
        (_, Some(b)) => truth == b,
        (_, None) => false,
    }
}

/// A non-empty object whose values are all numeric zero.
fn is_all_zeros(line: Option<&Value>) -> bool {
    match line.and_then(Value::as_object) {
        Some(map) if !map.is_empty() => map
            .values()
            .all(|v| v.as_f64().is_some_and(|n| n == 0.0)),
        _ => false,
    }
}

fn show(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(v) => v.to_string(),
        None => "None".to_string(),
    }
}
