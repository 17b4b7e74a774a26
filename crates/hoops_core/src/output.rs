//! Builds the external documents from a finished game.

use std::collections::BTreeMap;

use crate::engine::{GameRecord, TeamLineup};
use crate::models::{
    ExtractionInput, GameDocuments, GroundTruthReport, TeamProfile, TeamSheet, TeamSide,
    TruthTeamSheet,
};

fn team_sheet(team: &TeamProfile, lineup: &TeamLineup) -> TeamSheet {
    TeamSheet {
        coach: team.head_coach.clone(),
        roster: team.players.clone(),
        starting_lineup: lineup.starting_lineup().to_vec(),
        bench: lineup.starting_bench().to_vec(),
    }
}

/// The document handed to the extractor: rosters and the log, no stats.
pub fn extraction_input(record: &GameRecord) -> ExtractionInput {
    let teams = TeamSide::BOTH
        .iter()
        .map(|&side| {
            let team = record.team(side);
            (team.name.clone(), team_sheet(team, record.lineup(side)))
        })
        .collect();

    ExtractionInput {
        matchup: record.matchup(),
        teams,
        play_by_play: record.play_by_play.clone(),
    }
}

pub fn ground_truth_report(record: &GameRecord) -> GroundTruthReport {
    let mut teams = BTreeMap::new();
    let mut final_stats = BTreeMap::new();

    for side in TeamSide::BOTH {
        let team = record.team(side);
        let lineup = record.lineup(side);
        // BTreeSet iterates sorted
        let participants = lineup.participants().iter().cloned().collect();
        teams.insert(
            team.name.clone(),
            TruthTeamSheet {
                sheet: team_sheet(team, lineup),
                participants,
            },
        );
        final_stats.insert(team.name.clone(), record.ledger.team(side).to_final_stats());
    }

    GroundTruthReport {
        matchup: record.matchup(),
        difficulty: record.difficulty,
        final_score: record.final_score(),
        teams,
        final_stats,
    }
}

pub fn game_documents(record: &GameRecord) -> GameDocuments {
    GameDocuments {
        example: extraction_input(record),
        true_report: ground_truth_report(record),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{DifficultyProfile, GameSetup, GameSim, SimConfig};
    use crate::models::{Difficulty, RosterCatalog};

    fn documents(seed: u64) -> (GameRecord, GameDocuments) {
        let rules = SimConfig::default();
        let profile = DifficultyProfile::basic();
        let catalog = RosterCatalog::default();
        let record = GameSim::new(GameSetup {
            difficulty: Difficulty::Basic,
            seed,
            rules: &rules,
            profile: &profile,
            catalog: &catalog,
            home_team: None,
            away_team: None,
        })
        .unwrap()
        .simulate();
        let docs = game_documents(&record);
        (record, docs)
    }

    #[test]
    fn test_documents_describe_same_game() {
        let (record, docs) = documents(42);
        assert_eq!(docs.example.matchup, docs.true_report.matchup);
        assert_eq!(docs.example.play_by_play.len(), record.play_by_play.len());

        for (name, sheet) in &docs.example.teams {
            let truth = &docs.true_report.teams[name];
            assert_eq!(sheet, &truth.sheet);
            assert_eq!(sheet.starting_lineup.len(), 5);
            assert_eq!(sheet.starting_lineup.len() + sheet.bench.len(), sheet.roster.len());
            let stats = &docs.true_report.final_stats[name];
            assert_eq!(stats.players.len(), sheet.roster.len());
        }
    }

    #[test]
    fn test_final_score_matches_team_points() {
        let (_, docs) = documents(7);
        let report = &docs.true_report;
        for (team, points) in report.parse_final_score().unwrap() {
            assert_eq!(report.final_stats[&team].stats.points, points);
        }
    }

    #[test]
    fn test_participants_sorted_and_on_roster() {
        let (_, docs) = documents(11);
        for truth in docs.true_report.teams.values() {
            let mut sorted = truth.participants.clone();
            sorted.sort();
            assert_eq!(sorted, truth.participants);
            assert!(truth.participants.len() >= 5);
            assert!(truth.participants.iter().all(|p| truth.sheet.roster.contains(p)));
        }
    }

    #[test]
    fn test_extraction_input_omits_truth_fields() {
        let (_, docs) = documents(3);
        let json = serde_json::to_value(&docs.example).unwrap();
        assert!(json.get("final_stats").is_none());
        assert!(json.get("final_score").is_none());
        let team = json["teams"].as_object().unwrap().values().next().unwrap();
        assert!(team.get("participants").is_none());
        assert_eq!(json["play_by_play"][0]["event_id"], 1);
        assert!(json["play_by_play"][0].get("kind").is_none());
    }
}
