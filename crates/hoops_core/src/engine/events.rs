//! Event catalog and weighted selector.
//!
//! Selection is a two-stage pipeline: [`feasible_candidates`] filters the
//! weighted table against the current game state, then [`select_event`]
//! samples one kind proportionally to its weight. Neither stage mutates the
//! game; the only side effect of sampling is advancing the RNG.

use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;

use super::config::EventWeights;
use crate::models::ShotValue;

/// Possession-ending event kinds the selector can draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EventKind {
    BadPassTurnover,
    Steal,
    Timeout,
    AssistedScore2,
    AssistedScore2ReceiverFirst,
    AssistedScore3,
    AssistedScore3ReceiverFirst,
    MissedShot2,
    Block2,
    ShootingFoul2,
    MissedShot3,
    Block3,
    ShootingFoul3,
}

/// Word order of an assisted basket line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssistWording {
    /// "<passer> fed <scorer>, who ..."
    PasserFirst,
    /// "<scorer> gets a sharp pass from <passer>, and ..."
    ReceiverFirst,
}

/// What a selected kind asks the sequence handlers to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PossessionAction {
    AssistedScore { value: ShotValue, wording: AssistWording },
    MissedShot { value: ShotValue },
    Block { value: ShotValue },
    ShootingFoul { value: ShotValue },
    Steal,
    BadPass,
    Timeout,
}

impl EventKind {
    pub const ALL: [EventKind; 13] = [
        EventKind::BadPassTurnover,
        EventKind::Steal,
        EventKind::Timeout,
        EventKind::AssistedScore2,
        EventKind::AssistedScore2ReceiverFirst,
        EventKind::AssistedScore3,
        EventKind::AssistedScore3ReceiverFirst,
        EventKind::MissedShot2,
        EventKind::Block2,
        EventKind::ShootingFoul2,
        EventKind::MissedShot3,
        EventKind::Block3,
        EventKind::ShootingFoul3,
    ];

    pub fn action(self) -> PossessionAction {
        use AssistWording::*;
        use ShotValue::*;
        match self {
            EventKind::BadPassTurnover => PossessionAction::BadPass,
            EventKind::Steal => PossessionAction::Steal,
            EventKind::Timeout => PossessionAction::Timeout,
            EventKind::AssistedScore2 => PossessionAction::AssistedScore {
                value: Two,
                wording: PasserFirst,
            },
            EventKind::AssistedScore2ReceiverFirst => PossessionAction::AssistedScore {
                value: Two,
                wording: ReceiverFirst,
            },
            EventKind::AssistedScore3 => PossessionAction::AssistedScore {
                value: Three,
                wording: PasserFirst,
            },
            EventKind::AssistedScore3ReceiverFirst => PossessionAction::AssistedScore {
                value: Three,
                wording: ReceiverFirst,
            },
            EventKind::MissedShot2 => PossessionAction::MissedShot { value: Two },
            EventKind::MissedShot3 => PossessionAction::MissedShot { value: Three },
            EventKind::Block2 => PossessionAction::Block { value: Two },
            EventKind::Block3 => PossessionAction::Block { value: Three },
            EventKind::ShootingFoul2 => PossessionAction::ShootingFoul { value: Two },
            EventKind::ShootingFoul3 => PossessionAction::ShootingFoul { value: Three },
        }
    }

    /// Needs a passer and a distinct shooter from the offense.
    pub fn needs_two_offense_players(self) -> bool {
        matches!(
            self.action(),
            PossessionAction::AssistedScore { .. } | PossessionAction::MissedShot { .. }
        )
    }

    /// Charges a foul to the defense.
    pub fn charges_defensive_foul(self) -> bool {
        matches!(self.action(), PossessionAction::ShootingFoul { .. })
    }

    /// Counts as a genuine shot attempt for period accounting.
    pub fn ends_with_shot_attempt(self) -> bool {
        !matches!(
            self.action(),
            PossessionAction::Steal | PossessionAction::BadPass | PossessionAction::Timeout
        )
    }
}

/// Game-state facts the filter needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Feasibility {
    pub offense_active: usize,
    /// The defense has a bench to cover a foul-out.
    pub defense_can_foul: bool,
}

/// Stage one: weighted kinds that are possible right now.
///
/// Zero-weight kinds are dropped so stage two never sees an all-zero table.
pub fn feasible_candidates(weights: &EventWeights, state: Feasibility) -> Vec<(EventKind, u32)> {
    EventKind::ALL
        .iter()
        .copied()
        .filter(|&kind| !(kind.needs_two_offense_players() && state.offense_active < 2))
        .filter(|&kind| !(kind.charges_defensive_foul() && !state.defense_can_foul))
        .map(|kind| (kind, weights.weight(kind)))
        .filter(|&(_, w)| w > 0)
        .collect()
}

/// Stage two: weighted draw. Falls back to a timeout on an empty table.
pub fn select_event<R: Rng + ?Sized>(rng: &mut R, candidates: &[(EventKind, u32)]) -> EventKind {
    if candidates.is_empty() {
        return EventKind::Timeout;
    }
    match WeightedIndex::new(candidates.iter().map(|&(_, w)| w)) {
        Ok(dist) => candidates[dist.sample(rng)].0,
        Err(_) => EventKind::Timeout,
    }
}
