pub mod difficulty;
pub mod oracle;
pub mod play;
pub mod report;
pub mod roster;
pub mod stats;
pub mod team;

pub use difficulty::Difficulty;
pub use oracle::{EventCounts, GameInvariants};
pub use play::{PlayByPlayEntry, PlayKind, VarOutcome};
pub use report::{
    ExtractionInput, GameDocuments, GroundTruthReport, JsonlRecord, TeamFinalStats, TeamSheet,
    TruthTeamSheet,
};
pub use roster::{RosterCatalog, TeamProfile, MIN_ROSTER_SIZE};
pub use stats::{ShotValue, StatLine, STAT_FIELD_COUNT};
pub use team::TeamSide;
