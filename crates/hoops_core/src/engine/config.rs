//! # Simulation configuration
//!
//! Game rules ([`SimConfig`]) are shared by every tier; [`DifficultyProfile`]
//! carries the per-tier knobs (log length, passing, substitution and VAR
//! rates, lexicon breadth, event weights).
//!
//! ```rust
//! use hoops_core::engine::config::{DifficultyProfile, SimConfig};
//! use hoops_core::Difficulty;
//!
//! let rules = SimConfig::default();
//! let hard = DifficultyProfile::for_difficulty(Difficulty::Hard);
//! assert_eq!(rules.foul_limit, 5);
//! assert!(hard.allow_var);
//! ```

use serde::{Deserialize, Serialize};

use super::events::{EventKind, PossessionAction};
use crate::error::{CoreError, Result};
use crate::models::Difficulty;

/// Game rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Personal fouls that disqualify a player (기본: 5)
    pub foul_limit: u32,
    /// Team fouls per period before the bonus (기본: 5)
    pub team_foul_limit: u32,
    /// Award bonus free throws once `team_foul_limit` is reached.
    /// Team fouls are always counted; off by default.
    pub bonus_free_throws: bool,
    /// Log a narrative line whenever a team foul is counted or reset.
    pub debug_team_fouls: bool,
    /// Per-shot free throw make probability (기본: 0.5)
    pub free_throw_make_probability: f64,
    /// Probability a live rebound goes to the shooting team (기본: 0.2)
    pub offensive_rebound_probability: f64,
    /// Overtime budget is the first quarter's budget divided by this (기본: 2)
    pub overtime_divisor: u32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            foul_limit: 5,
            team_foul_limit: 5,
            bonus_free_throws: false,
            debug_team_fouls: false,
            free_throw_make_probability: 0.5,
            offensive_rebound_probability: 0.2,
            overtime_divisor: 2,
        }
    }
}

impl SimConfig {
    pub fn validate(&self) -> Result<()> {
        if self.foul_limit == 0 {
            return Err(CoreError::InvalidConfig("foul_limit must be at least 1".to_string()));
        }
        if self.overtime_divisor == 0 {
            return Err(CoreError::InvalidConfig(
                "overtime_divisor must be at least 1".to_string(),
            ));
        }
        check_probability("free_throw_make_probability", self.free_throw_make_probability)?;
        check_probability(
            "offensive_rebound_probability",
            self.offensive_rebound_probability,
        )?;
        Ok(())
    }
}

/// Relative weight of each possession-ending event kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventWeights {
    pub bad_pass_turnover: u32,
    pub steal: u32,
    pub timeout: u32,
    pub assisted_2pt: u32,
    pub assisted_2pt_receiver_first: u32,
    pub assisted_3pt: u32,
    pub assisted_3pt_receiver_first: u32,
    pub missed_2pt: u32,
    pub blocked_2pt: u32,
    pub shooting_foul_2pt: u32,
    pub missed_3pt: u32,
    pub blocked_3pt: u32,
    pub shooting_foul_3pt: u32,
}

impl EventWeights {
    pub fn weight(&self, kind: EventKind) -> u32 {
        match kind {
            EventKind::BadPassTurnover => self.bad_pass_turnover,
            EventKind::Steal => self.steal,
            EventKind::Timeout => self.timeout,
            EventKind::AssistedScore2 => self.assisted_2pt,
            EventKind::AssistedScore2ReceiverFirst => self.assisted_2pt_receiver_first,
            EventKind::AssistedScore3 => self.assisted_3pt,
            EventKind::AssistedScore3ReceiverFirst => self.assisted_3pt_receiver_first,
            EventKind::MissedShot2 => self.missed_2pt,
            EventKind::Block2 => self.blocked_2pt,
            EventKind::ShootingFoul2 => self.shooting_foul_2pt,
            EventKind::MissedShot3 => self.missed_3pt,
            EventKind::Block3 => self.blocked_3pt,
            EventKind::ShootingFoul3 => self.shooting_foul_3pt,
        }
    }

    pub fn total(&self) -> u32 {
        EventKind::ALL.iter().map(|&k| self.weight(k)).sum()
    }
}

/// Per-tier simulation knobs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DifficultyProfile {
    /// Regulation narrative budget, split across four quarters.
    pub target_events: u32,
    /// Upper bound of plain passes before each possession-ending action.
    pub max_passes: u32,
    /// Plain passes borrow the assist wording, so a pass reads like an assist.
    pub adversarial_assist_bias: bool,
    pub allow_substitutions: bool,
    pub substitution_chance: f64,
    pub allow_var: bool,
    pub var_chance: f64,
    /// Each phrase pool is cut to `max(lexicon_min, len / lexicon_divisor)`.
    pub lexicon_divisor: usize,
    pub lexicon_min: usize,
    pub event_weights: EventWeights,
}

impl DifficultyProfile {
    pub fn for_difficulty(difficulty: Difficulty) -> Self {
        match difficulty {
            Difficulty::Basic => Self::basic(),
            Difficulty::Medium => Self::medium(),
            Difficulty::Hard => Self::hard(),
        }
    }

    /// Short logs, lots of misses and turnovers, no VAR.
    pub fn basic() -> Self {
        Self {
            target_events: 150,
            max_passes: 5,
            adversarial_assist_bias: false,
            allow_substitutions: true,
            substitution_chance: 0.05,
            allow_var: false,
            var_chance: 0.0,
            lexicon_divisor: 4,
            lexicon_min: 2,
            event_weights: EventWeights {
                bad_pass_turnover: 4,
                steal: 5,
                timeout: 4,
                assisted_2pt: 3,
                assisted_2pt_receiver_first: 0,
                assisted_3pt: 3,
                assisted_3pt_receiver_first: 0,
                missed_2pt: 10,
                blocked_2pt: 8,
                shooting_foul_2pt: 8,
                missed_3pt: 9,
                blocked_3pt: 8,
                shooting_foul_3pt: 7,
            },
        }
    }

    pub fn medium() -> Self {
        Self {
            target_events: 600,
            max_passes: 3,
            adversarial_assist_bias: true,
            allow_substitutions: true,
            substitution_chance: 0.1,
            allow_var: true,
            var_chance: 0.05,
            lexicon_divisor: 2,
            lexicon_min: 4,
            event_weights: EventWeights {
                bad_pass_turnover: 3,
                steal: 5,
                timeout: 3,
                assisted_2pt: 7,
                assisted_2pt_receiver_first: 5,
                assisted_3pt: 7,
                assisted_3pt_receiver_first: 5,
                missed_2pt: 8,
                blocked_2pt: 6,
                shooting_foul_2pt: 5,
                missed_3pt: 7,
                blocked_3pt: 6,
                shooting_foul_3pt: 5,
            },
        }
    }

    /// Long logs, mostly completed scoring plays, frequent VAR and substitutions.
    pub fn hard() -> Self {
        Self {
            target_events: 900,
            max_passes: 1,
            adversarial_assist_bias: true,
            allow_substitutions: true,
            substitution_chance: 0.15,
            allow_var: true,
            var_chance: 0.1,
            lexicon_divisor: 1,
            lexicon_min: 0,
            event_weights: EventWeights {
                bad_pass_turnover: 2,
                steal: 5,
                timeout: 2,
                assisted_2pt: 9,
                assisted_2pt_receiver_first: 7,
                assisted_3pt: 9,
                assisted_3pt_receiver_first: 7,
                missed_2pt: 6,
                blocked_2pt: 4,
                shooting_foul_2pt: 3,
                missed_3pt: 5,
                blocked_3pt: 4,
                shooting_foul_3pt: 3,
            },
        }
    }

    /// Effective substitution probability (0 when substitutions are off).
    pub fn effective_substitution_chance(&self) -> f64 {
        if self.allow_substitutions {
            self.substitution_chance
        } else {
            0.0
        }
    }

    /// Number of phrases kept from a pool of `pool_len`.
    pub fn lexicon_size(&self, pool_len: usize) -> usize {
        let divisor = self.lexicon_divisor.max(1);
        (pool_len / divisor).max(self.lexicon_min).max(1).min(pool_len)
    }

    pub fn validate(&self) -> Result<()> {
        if self.target_events < 4 {
            return Err(CoreError::InvalidConfig(format!(
                "target_events must cover four quarters, got {}",
                self.target_events
            )));
        }
        check_probability("substitution_chance", self.substitution_chance)?;
        check_probability("var_chance", self.var_chance)?;
        // Periods only close on a shot attempt; fouls alone can be filtered out.
        let closes_periods = EventKind::ALL.iter().any(|&kind| {
            kind.ends_with_shot_attempt()
                && !kind.charges_defensive_foul()
                && self.event_weights.weight(kind) > 0
        });
        if !closes_periods {
            return Err(CoreError::InvalidConfig(
                "event_weights need a positive weight on a field goal attempt".to_string(),
            ));
        }
        // A tied game only ends once somebody can score from the field.
        let can_score = EventKind::ALL.iter().any(|&kind| {
            matches!(kind.action(), PossessionAction::AssistedScore { .. })
                && self.event_weights.weight(kind) > 0
        });
        if !can_score {
            return Err(CoreError::InvalidConfig(
                "event_weights need a positive weight on an assisted basket".to_string(),
            ));
        }
        Ok(())
    }
}

fn check_probability(name: &str, value: f64) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(CoreError::InvalidConfig(format!("{name} must be within 0..=1, got {value}")))
    }
}
