//! Property tests: every generated game keeps its box score consistent with
//! its own play-by-play, whatever the seed and tier.

use hoops_core::engine::{DifficultyProfile, GameRecord, GameSetup, GameSim, SimConfig};
use hoops_core::models::oracle::replay_points;
use hoops_core::{Difficulty, GameInvariants, RosterCatalog, TeamSide};
use proptest::prelude::*;
use std::collections::BTreeMap;

fn play(difficulty: Difficulty, seed: u64, target_events: u32, rules: &SimConfig) -> GameRecord {
    let mut profile = DifficultyProfile::for_difficulty(difficulty);
    profile.target_events = target_events;
    let catalog = RosterCatalog::default();
    GameSim::new(GameSetup {
        difficulty,
        seed,
        rules,
        profile: &profile,
        catalog: &catalog,
        home_team: None,
        away_team: None,
    })
    .unwrap()
    .simulate()
}

fn difficulty() -> impl Strategy<Value = Difficulty> {
    prop_oneof![
        Just(Difficulty::Basic),
        Just(Difficulty::Medium),
        Just(Difficulty::Hard),
    ]
}

fn count(record: &GameRecord, line: &str) -> usize {
    record
        .play_by_play
        .iter()
        .filter(|e| e.description == line)
        .count()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn prop_oracle_holds(seed in any::<u64>(), tier in difficulty(), target in 8u32..160) {
        let record = play(tier, seed, target, &SimConfig::default());
        let invariants = GameInvariants::compute(&record);
        prop_assert!(invariants.is_valid(), "{:?}", invariants.violations());
    }

    #[test]
    fn prop_replayed_log_equals_box_score(seed in any::<u64>(), tier in difficulty()) {
        let record = play(tier, seed, 120, &SimConfig::default());
        let replayed = replay_points(&record);
        for side in TeamSide::BOTH {
            let stats = record.ledger.team(side).stats;
            prop_assert_eq!(replayed[side.index()], i64::from(stats.points));
            prop_assert_eq!(stats.points, stats.points_from_shots());
        }
    }

    #[test]
    fn prop_period_structure(seed in any::<u64>(), tier in difficulty(), target in 4u32..40) {
        let record = play(tier, seed, target, &SimConfig::default());

        for q in 1..=4 {
            prop_assert_eq!(count(&record, &format!("Start of Q{q}.")), 1);
            prop_assert_eq!(count(&record, &format!("End of Q{q}.")), 1);
        }
        for ot in 1..=record.overtimes {
            prop_assert_eq!(count(&record, &format!("Start of OT{ot}.")), 1);
            prop_assert_eq!(count(&record, &format!("End of OT{ot}.")), 1);
        }
        prop_assert_eq!(count(&record, &format!("Start of OT{}.", record.overtimes + 1)), 0);
        prop_assert_eq!(record.periods_played, 4 + record.overtimes);
        prop_assert_eq!(count(&record, "End of game."), 1);
        prop_assert_eq!(
            record.play_by_play.last().map(|e| e.description.as_str()),
            Some("End of game.")
        );
        prop_assert!(record.score(TeamSide::Home) != record.score(TeamSide::Away));
    }

    #[test]
    fn prop_team_fouls_reset_each_period(seed in any::<u64>(), tier in difficulty()) {
        let rules = SimConfig {
            debug_team_fouls: true,
            ..SimConfig::default()
        };
        let record = play(tier, seed, 80, &rules);

        let mut running: BTreeMap<String, u32> = BTreeMap::new();
        for entry in &record.play_by_play {
            if entry.description == "Team fouls reset for new quarter." {
                running.clear();
            } else if let Some(rest) = entry.description.strip_prefix("Team fouls this quarter – ") {
                let (team, tally) = rest.rsplit_once(": ").unwrap();
                let n: u32 = tally.split('/').next().unwrap().parse().unwrap();
                let expected = running.entry(team.to_string()).or_insert(0);
                *expected += 1;
                prop_assert_eq!(n, *expected, "{}", entry.description);
            }
        }
    }

    #[test]
    fn prop_same_seed_same_game(seed in any::<u64>(), tier in difficulty()) {
        let rules = SimConfig::default();
        let a = play(tier, seed, 60, &rules);
        let b = play(tier, seed, 60, &rules);
        prop_assert_eq!(a.play_by_play, b.play_by_play);
        prop_assert_eq!(a.ledger, b.ledger);
    }
}
