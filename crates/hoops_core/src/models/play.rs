//! Play-by-play log entries.
//!
//! Each entry carries the human-readable line that goes into the documents
//! plus a typed [`PlayKind`] tag naming the statistical effect applied with
//! that line. The tag never leaves the process; it exists so the box score can
//! be recomputed from the log alone.

use serde::{Deserialize, Serialize};

use super::stats::ShotValue;
use super::team::TeamSide;

/// Outcome of a video review of the previous made basket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VarOutcome {
    /// 2pt basket waved off for an offensive foul by the shooter.
    OffensiveFoulOverturn,
    /// 3pt basket waved off for a shot clock violation.
    ShotClockOverturn,
    /// 3pt basket released after the buzzer.
    BuzzerOverturn,
    /// 3pt basket downgraded to two points.
    Downgrade,
}

impl VarOutcome {
    /// Outcomes reviewable after a made basket of the given value.
    pub fn candidates(value: ShotValue) -> &'static [VarOutcome] {
        match value {
            ShotValue::Two => &[VarOutcome::OffensiveFoulOverturn],
            ShotValue::Three => &[
                VarOutcome::ShotClockOverturn,
                VarOutcome::BuzzerOverturn,
                VarOutcome::Downgrade,
            ],
        }
    }

    /// Points removed from the scoring team.
    pub fn points_removed(self) -> u32 {
        match self {
            VarOutcome::OffensiveFoulOverturn => 2,
            VarOutcome::ShotClockOverturn | VarOutcome::BuzzerOverturn => 3,
            VarOutcome::Downgrade => 1,
        }
    }

    pub fn charges_foul(self) -> bool {
        matches!(self, VarOutcome::OffensiveFoulOverturn)
    }

    pub fn charges_turnover(self) -> bool {
        !matches!(self, VarOutcome::Downgrade)
    }
}

/// Typed tag of a log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayKind {
    JumpBall,
    PeriodBoundary,
    Inbound,
    Pass,
    /// Made field goal with assist, credited to `side`.
    AssistedScore { side: TeamSide, value: ShotValue },
    /// Missed field goal by `side`.
    MissedShot { side: TeamSide, value: ShotValue },
    /// `side` is the shooting team; the block goes to the other side.
    Block { side: TeamSide, value: ShotValue },
    /// `side` is the shooting team; the foul goes to the other side.
    ShootingFoul { side: TeamSide, value: ShotValue },
    FreeThrow { side: TeamSide, made: bool },
    Rebound { side: TeamSide, offensive: bool },
    /// `side` is the team credited with the steal.
    Steal { side: TeamSide },
    BadPass { side: TeamSide },
    /// `side` is the team whose basket was reviewed.
    VarReview { side: TeamSide, outcome: VarOutcome },
    Timeout { side: TeamSide },
    GameResume,
    Substitution { side: TeamSide },
    FoulOut { side: TeamSide },
    ShortHanded { side: TeamSide },
    EndOfGame,
    #[default]
    Notice,
}

impl PlayKind {
    /// Signed change to a team's points carried by this line, if any.
    pub fn points_delta(&self) -> Option<(TeamSide, i64)> {
        match *self {
            PlayKind::AssistedScore { side, value } => Some((side, value.points() as i64)),
            PlayKind::FreeThrow { side, made: true } => Some((side, 1)),
            PlayKind::VarReview { side, outcome } => {
                Some((side, -(outcome.points_removed() as i64)))
            }
            _ => None,
        }
    }

    /// Whether this line applies any statistical effect.
    pub fn has_effect(&self) -> bool {
        matches!(
            self,
            PlayKind::AssistedScore { .. }
                | PlayKind::MissedShot { .. }
                | PlayKind::Block { .. }
                | PlayKind::ShootingFoul { .. }
                | PlayKind::FreeThrow { .. }
                | PlayKind::Rebound { .. }
                | PlayKind::Steal { .. }
                | PlayKind::BadPass { .. }
                | PlayKind::VarReview { .. }
        )
    }
}

/// One line of the play-by-play.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayByPlayEntry {
    pub event_id: u32,
    pub description: String,
    #[serde(skip, default)]
    pub kind: PlayKind,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_var_candidates_match_value() {
        assert_eq!(VarOutcome::candidates(ShotValue::Two).len(), 1);
        for outcome in VarOutcome::candidates(ShotValue::Three) {
            assert!(outcome.points_removed() <= 3);
            assert!(!outcome.charges_foul());
        }
    }

    #[test]
    fn test_points_delta() {
        let score = PlayKind::AssistedScore {
            side: TeamSide::Home,
            value: ShotValue::Three,
        };
        assert_eq!(score.points_delta(), Some((TeamSide::Home, 3)));
        let review = PlayKind::VarReview {
            side: TeamSide::Away,
            outcome: VarOutcome::Downgrade,
        };
        assert_eq!(review.points_delta(), Some((TeamSide::Away, -1)));
        assert_eq!(PlayKind::Timeout { side: TeamSide::Home }.points_delta(), None);
        assert!(!PlayKind::JumpBall.has_effect());
    }

    #[test]
    fn test_kind_not_serialized() {
        let entry = PlayByPlayEntry {
            event_id: 1,
            description: "Start of Q1.".to_string(),
            kind: PlayKind::PeriodBoundary,
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json, serde_json::json!({"event_id": 1, "description": "Start of Q1."}));
    }
}
