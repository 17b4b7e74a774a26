//! Invariant oracle for simulated games.
//!
//! Checks logical consistency of a finished [`GameRecord`] rather than exact
//! output, so generator changes that keep the box score honest pass while
//! bookkeeping bugs are caught.
//!
//! ## Usage
//!
//! ```rust,ignore
//! let record = GameSim::new(setup)?.simulate();
//! let invariants = GameInvariants::compute(&record);
//! assert!(invariants.violations().is_empty(), "{:?}", invariants.violations());
//! ```

use serde::{Deserialize, Serialize};

use super::play::PlayKind;
use super::stats::StatLine;
use super::team::TeamSide;
use crate::engine::GameRecord;

/// Pre-computed invariants for one game.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GameInvariants {
    pub event_counts: EventCounts,

    /// attempted >= made for every shot category, team and player.
    pub shot_consistency: bool,

    /// active ∪ bench ∪ disqualified equals the roster, pairwise disjoint.
    pub roster_partition: bool,

    /// Team points equal the points implied by its made shots, and the sum
    /// of its players' points.
    pub score_conservation: bool,

    /// Team aggregates equal the sum of the player lines, counter by counter.
    pub aggregates_match_players: bool,

    /// `event_id` runs exactly `1..=N`.
    pub log_monotonic: bool,

    /// Points recomputed by replaying the typed log agree with the ledger.
    pub replayed_points_match: bool,

    /// Players who never took the floor have all-zero stat lines.
    pub non_participants_idle: bool,

    /// Every disqualified player reached the foul limit.
    pub disqualifications_valid: bool,

    /// The final score is not tied.
    pub decided: bool,
}

/// Line counts by kind.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EventCounts {
    pub total_lines: usize,
    pub made_baskets: usize,
    pub missed_shots: usize,
    pub free_throws: usize,
    pub rebounds: usize,
    pub turnovers: usize,
    pub reviews: usize,
    pub substitutions: usize,
    pub foul_outs: usize,
    pub overtimes: u32,
}

impl EventCounts {
    fn tally(record: &GameRecord) -> Self {
        let mut counts = EventCounts {
            total_lines: record.play_by_play.len(),
            overtimes: record.overtimes,
            ..Default::default()
        };
        for entry in &record.play_by_play {
            match entry.kind {
                PlayKind::AssistedScore { .. } => counts.made_baskets += 1,
                PlayKind::MissedShot { .. } | PlayKind::Block { .. } => counts.missed_shots += 1,
                PlayKind::FreeThrow { .. } => counts.free_throws += 1,
                PlayKind::Rebound { .. } => counts.rebounds += 1,
                PlayKind::Steal { .. } | PlayKind::BadPass { .. } => counts.turnovers += 1,
                PlayKind::VarReview { .. } => counts.reviews += 1,
                PlayKind::Substitution { .. } => counts.substitutions += 1,
                PlayKind::FoulOut { .. } => counts.foul_outs += 1,
                _ => {}
            }
        }
        counts
    }
}

impl GameInvariants {
    pub fn compute(record: &GameRecord) -> Self {
        Self {
            event_counts: EventCounts::tally(record),
            shot_consistency: record.ledger.is_consistent(),
            roster_partition: TeamSide::BOTH
                .iter()
                .all(|&side| record.lineup(side).is_partitioned()),
            score_conservation: TeamSide::BOTH.iter().all(|&side| {
                let team = record.ledger.team(side);
                let player_points: u32 = team.players.values().map(|p| p.points).sum();
                team.stats.points == team.stats.points_from_shots()
                    && team.stats.points == player_points
            }),
            aggregates_match_players: TeamSide::BOTH.iter().all(|&side| {
                let team = record.ledger.team(side);
                sum_lines(team.players.values()) == team.stats
            }),
            log_monotonic: record
                .play_by_play
                .iter()
                .enumerate()
                .all(|(i, entry)| entry.event_id as usize == i + 1),
            replayed_points_match: {
                let replayed = replay_points(record);
                TeamSide::BOTH
                    .iter()
                    .all(|&side| replayed[side.index()] == i64::from(record.score(side)))
            },
            non_participants_idle: TeamSide::BOTH.iter().all(|&side| {
                let lineup = record.lineup(side);
                record
                    .ledger
                    .team(side)
                    .players
                    .iter()
                    .filter(|(name, _)| !lineup.participants().contains(*name))
                    .all(|(_, line)| line.is_zero())
            }),
            disqualifications_valid: TeamSide::BOTH.iter().all(|&side| {
                record
                    .lineup(side)
                    .disqualified()
                    .iter()
                    .all(|player| record.ledger.fouls(side, player) >= record.foul_limit)
            }),
            decided: record.score(TeamSide::Home) != record.score(TeamSide::Away),
        }
    }

    /// Names of the failed checks.
    pub fn violations(&self) -> Vec<&'static str> {
        [
            ("shot_consistency", self.shot_consistency),
            ("roster_partition", self.roster_partition),
            ("score_conservation", self.score_conservation),
            ("aggregates_match_players", self.aggregates_match_players),
            ("log_monotonic", self.log_monotonic),
            ("replayed_points_match", self.replayed_points_match),
            ("non_participants_idle", self.non_participants_idle),
            ("disqualifications_valid", self.disqualifications_valid),
            ("decided", self.decided),
        ]
        .into_iter()
        .filter(|(_, ok)| !ok)
        .map(|(name, _)| name)
        .collect()
    }

    pub fn is_valid(&self) -> bool {
        self.violations().is_empty()
    }
}

/// Points per side recomputed from the log tags alone.
pub fn replay_points(record: &GameRecord) -> [i64; 2] {
    let mut points = [0i64; 2];
    for entry in &record.play_by_play {
        if let Some((side, delta)) = entry.kind.points_delta() {
            points[side.index()] += delta;
        }
    }
    points
}

fn sum_lines<'a>(lines: impl Iterator<Item = &'a StatLine>) -> StatLine {
    lines.fold(StatLine::default(), |mut acc, line| {
        acc.points += line.points;
        acc.assists += line.assists;
        acc.rebounds += line.rebounds;
        acc.defensive_rebounds += line.defensive_rebounds;
        acc.offensive_rebounds += line.offensive_rebounds;
        acc.fouls += line.fouls;
        acc.steals += line.steals;
        acc.blocks += line.blocks;
        acc.turnovers += line.turnovers;
        acc.two_pt_made += line.two_pt_made;
        acc.two_pt_attempted += line.two_pt_attempted;
        acc.three_pt_made += line.three_pt_made;
        acc.three_pt_attempted += line.three_pt_attempted;
        acc.ft_made += line.ft_made;
        acc.ft_attempted += line.ft_attempted;
        acc
    })
}
