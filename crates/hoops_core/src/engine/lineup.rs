//! Lineup manager: active / bench / disqualified sets for one team.

use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::BTreeSet;
use tracing::warn;

/// Size of a full starting lineup.
pub const STARTING_FIVE: usize = 5;

/// A completed swap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Substitution {
    pub player_in: String,
    pub player_out: String,
}

/// Result of a forced foul-out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoulOut {
    /// Active plus bench after the disqualification.
    pub available: usize,
    pub was_active: bool,
    /// Bench player who replaced an active disqualified player.
    pub replacement: Option<String>,
}

impl FoulOut {
    /// Active player removed with nobody left to replace them.
    pub fn short_handed(&self) -> bool {
        self.was_active && self.replacement.is_none()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TeamLineup {
    roster: Vec<String>,
    starting_lineup: Vec<String>,
    starting_bench: Vec<String>,
    active: Vec<String>,
    bench: Vec<String>,
    disqualified: Vec<String>,
    participants: BTreeSet<String>,
}

impl TeamLineup {
    /// Shuffles the roster and takes the first five as starters.
    pub fn shuffled<R: Rng + ?Sized>(rng: &mut R, roster: &[String]) -> Self {
        let mut order = roster.to_vec();
        order.shuffle(rng);
        let split = STARTING_FIVE.min(order.len());
        let bench = order.split_off(split);
        Self::from_parts(roster, order, bench)
    }

    /// Lineup with an explicit starting five.
    pub fn from_parts(roster: &[String], active: Vec<String>, bench: Vec<String>) -> Self {
        Self {
            roster: roster.to_vec(),
            starting_lineup: active.clone(),
            starting_bench: bench.clone(),
            participants: active.iter().cloned().collect(),
            active,
            bench,
            disqualified: Vec::new(),
        }
    }

    pub fn roster(&self) -> &[String] {
        &self.roster
    }

    pub fn starting_lineup(&self) -> &[String] {
        &self.starting_lineup
    }

    pub fn starting_bench(&self) -> &[String] {
        &self.starting_bench
    }

    pub fn active(&self) -> &[String] {
        &self.active
    }

    pub fn bench(&self) -> &[String] {
        &self.bench
    }

    pub fn disqualified(&self) -> &[String] {
        &self.disqualified
    }

    /// Everyone who has been in the active lineup at least once.
    pub fn participants(&self) -> &BTreeSet<String> {
        &self.participants
    }

    pub fn is_active(&self, player: &str) -> bool {
        self.active.iter().any(|p| p == player)
    }

    pub fn is_disqualified(&self, player: &str) -> bool {
        self.disqualified.iter().any(|p| p == player)
    }

    /// Players not disqualified.
    pub fn available_count(&self) -> usize {
        self.active.len() + self.bench.len()
    }

    /// A foul needs a bench to cover a possible foul-out.
    pub fn can_commit_fouls(&self) -> bool {
        !self.bench.is_empty()
    }

    /// Random active player.
    pub fn pick_active<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        match self.active.choose(rng) {
            Some(player) => player.clone(),
            None => {
                warn!("no active players left, falling back to the first roster name");
                self.roster.first().cloned().unwrap_or_default()
            }
        }
    }

    /// Random active player other than `except`, or `except` itself when
    /// nobody else is on the floor.
    pub fn pick_other_active<R: Rng + ?Sized>(&self, rng: &mut R, except: &str) -> String {
        let options: Vec<&String> = self.active.iter().filter(|p| *p != except).collect();
        match options.choose(rng) {
            Some(player) => (*player).clone(),
            None => {
                warn!(player = except, "no distinct active teammate, reusing the same player");
                except.to_string()
            }
        }
    }

    /// With probability `chance`, swaps a random active player (never
    /// `protected`) for a random bench player.
    pub fn substitute<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        chance: f64,
        protected: Option<&str>,
    ) -> Option<Substitution> {
        if rng.gen::<f64>() >= chance || self.bench.is_empty() {
            return None;
        }
        let out_options: Vec<&String> = self
            .active
            .iter()
            .filter(|p| Some(p.as_str()) != protected)
            .collect();
        let player_out = (*out_options.choose(rng)?).clone();
        let player_in = self.bench.choose(rng)?.clone();

        self.participants.insert(player_in.clone());
        self.active.retain(|p| *p != player_out);
        self.bench.push(player_out.clone());
        self.bench.retain(|p| *p != player_in);
        self.active.push(player_in.clone());

        Some(Substitution {
            player_in,
            player_out,
        })
    }

    /// Moves `player` to disqualified; an active player is replaced from the
    /// bench when possible.
    pub fn force_foul_out<R: Rng + ?Sized>(&mut self, rng: &mut R, player: &str) -> FoulOut {
        let was_active = self.is_active(player);
        self.active.retain(|p| p != player);
        self.bench.retain(|p| p != player);
        if !self.is_disqualified(player) {
            self.disqualified.push(player.to_string());
        }
        let available = self.available_count();

        let replacement = if was_active {
            let incoming = self.bench.choose(rng).cloned();
            if let Some(player_in) = &incoming {
                self.bench.retain(|p| p != player_in);
                self.active.push(player_in.clone());
                self.participants.insert(player_in.clone());
            }
            incoming
        } else {
            None
        };

        FoulOut {
            available,
            was_active,
            replacement,
        }
    }

    /// active ∪ bench ∪ disqualified equals the roster, pairwise disjoint.
    pub fn is_partitioned(&self) -> bool {
        let mut seen = BTreeSet::new();
        for player in self.active.iter().chain(&self.bench).chain(&self.disqualified) {
            if !seen.insert(player.as_str()) {
                return false;
            }
        }
        let roster: BTreeSet<&str> = self.roster.iter().map(String::as_str).collect();
        seen == roster
    }
}
