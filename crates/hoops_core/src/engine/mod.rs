//! Game Simulation Engine
//!
//! Runs one basketball game per [`GameSim`], possession by possession, and
//! records both the narrative log and the box score that log implies.
//!
//! ## Architecture
//!
//! - `events.rs` - event catalog, feasibility filter, weighted selector
//! - `ledger.rs` - stat effects as data, applied to the box score
//! - `lineup.rs` - active / bench / disqualified partitions
//! - `period.rs` - quarter and overtime budgets
//! - `sequences.rs` - one handler per event kind
//! - `game.rs` - per-game state and the possession loop
//!
//! ## Data Flow
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                        GAME SIMULATION FLOW                         │
//! ├─────────────────────────────────────────────────────────────────────┤
//! │                                                                     │
//! │  [INPUT]                                                            │
//! │    GameSetup { difficulty, seed, rules, profile, catalog, teams? }  │
//! │         │                                                           │
//! │         ▼                                                           │
//! │  GameSim::new                                                       │
//! │    lexicon → teams → starting fives → jump ball → "Start of Q1."    │
//! │         │                                                           │
//! │         ▼                                                           │
//! │  ┌───────────────────────────────────────────────────────────┐      │
//! │  │  while clock.is_running()                                 │      │
//! │  │    inbound (if no ball) → 0..=max_passes passes           │      │
//! │  │    feasible_candidates → select_event → sequence handler  │      │
//! │  │    handler: narrative line + StatEffect → StatLedger      │      │
//! │  │    clock.bill → close quarter / start overtime            │      │
//! │  └───────────────────────────────────────────────────────────┘      │
//! │         │                                                           │
//! │         ▼                                                           │
//! │  [OUTPUT: GameRecord]                                               │
//! │    ├─► play_by_play: Vec<PlayByPlayEntry>  (typed, 1..=N)           │
//! │    ├─► ledger: StatLedger                  (team + player lines)    │
//! │    └─► lineups: [TeamLineup; 2]            (participants, DQs)      │
//! │              │                                                      │
//! │              ▼                                                      │
//! │  output.rs → ExtractionInput + GroundTruthReport                    │
//! │  oracle.rs → GameInvariants                                         │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod events;
pub mod game;
pub mod ledger;
pub mod lineup;
pub mod narrative;
pub mod period;
mod sequences;

pub use config::{DifficultyProfile, EventWeights, SimConfig};
pub use events::{AssistWording, EventKind, PossessionAction};
pub use game::{GameRecord, GameSetup, GameSim, ScoringPlay};
pub use ledger::{StatEffect, StatLedger, TeamLedger};
pub use lineup::{FoulOut, Substitution, TeamLineup};
pub use narrative::Lexicon;
pub use period::PeriodClock;
