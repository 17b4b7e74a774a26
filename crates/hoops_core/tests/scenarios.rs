use hoops_core::api::{self, BatchRequest, ConfigOverrides};
use hoops_core::engine::{DifficultyProfile, GameRecord, GameSetup, GameSim, SimConfig};
use hoops_core::models::PlayKind;
use hoops_core::{evaluate_reports, Difficulty, GameInvariants, JsonlRecord, RosterCatalog, TeamSide};

fn play(difficulty: Difficulty, seed: u64, rules: &SimConfig, profile: &DifficultyProfile) -> GameRecord {
    let catalog = RosterCatalog::default();
    GameSim::new(GameSetup {
        difficulty,
        seed,
        rules,
        profile,
        catalog: &catalog,
        home_team: Some("Israel"),
        away_team: Some("Slovenia"),
    })
    .unwrap()
    .simulate()
}

#[test]
fn basic_game_points_follow_the_log() {
    let record = play(
        Difficulty::Basic,
        2023,
        &SimConfig::default(),
        &DifficultyProfile::basic(),
    );
    assert_eq!(record.matchup(), "Israel vs Slovenia");

    let mut points = [0i64; 2];
    for entry in &record.play_by_play {
        match entry.kind {
            PlayKind::AssistedScore { side, value } => points[side.index()] += i64::from(value.points()),
            PlayKind::FreeThrow { side, made: true } => points[side.index()] += 1,
            PlayKind::VarReview { .. } => panic!("basic games have no video review"),
            _ => {}
        }
    }
    for side in TeamSide::BOTH {
        assert_eq!(points[side.index()], i64::from(record.score(side)));
    }
}

#[test]
fn non_effect_lines_carry_no_stat_kind() {
    let record = play(
        Difficulty::Medium,
        77,
        &SimConfig::default(),
        &DifficultyProfile::medium(),
    );
    for entry in &record.play_by_play {
        let text = entry.description.as_str();
        if text.starts_with("Start of")
            || text.starts_with("End of")
            || text.contains("jump ball")
            || text == "The game resumes after a timeout."
        {
            assert!(!entry.kind.has_effect(), "{text}");
        }
    }
}

#[test]
fn fouled_out_players_never_return() {
    let rules = SimConfig {
        foul_limit: 1,
        ..SimConfig::default()
    };
    let record = play(Difficulty::Hard, 5150, &rules, &DifficultyProfile::hard());
    let invariants = GameInvariants::compute(&record);
    assert!(invariants.is_valid(), "{:?}", invariants.violations());

    let disqualified: Vec<&String> = TeamSide::BOTH
        .iter()
        .flat_map(|&side| record.lineup(side).disqualified())
        .collect();
    assert!(!disqualified.is_empty());

    for player in disqualified {
        let out_at = record
            .play_by_play
            .iter()
            .position(|e| e.description.starts_with(&format!("{player} commits a 1th foul")))
            .unwrap();
        // the forced substitution line right after still names them
        for entry in record.play_by_play.iter().skip(out_at + 2) {
            assert!(
                !entry.description.contains(player.as_str()),
                "{player} appears after disqualification: {}",
                entry.description
            );
        }
        for side in TeamSide::BOTH {
            assert!(!record.lineup(side).active().contains(player));
        }
    }
}

#[test]
fn batch_files_round_trip_through_evaluation() {
    let dir = tempfile::tempdir().unwrap();
    let mut overrides = ConfigOverrides::default();
    let mut basic = DifficultyProfile::basic();
    basic.target_events = 60;
    overrides.profiles.insert(Difficulty::Basic, basic);

    let request = BatchRequest {
        seed: 31,
        games_per_difficulty: 3,
        difficulties: vec![Difficulty::Basic],
        overrides,
    };
    let games = api::generate_batch(&request).unwrap();
    api::write_batch(dir.path(), &games, true).unwrap();

    let records = api::read_jsonl_file(dir.path().join(api::JSONL_FILE)).unwrap();
    assert_eq!(records.len(), 6);
    assert!(matches!(&records[0], JsonlRecord::Example { game_id, .. } if game_id == "basic_game_1"));

    let truth = api::find_true_report(&records, "basic_game_2").unwrap();
    let candidate = serde_json::to_value(truth).unwrap();
    let report = evaluate_reports(&candidate, truth).unwrap();
    assert_eq!(report.field.accuracy_pct, 100.0);

    let examples: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(dir.path().join(api::EXAMPLES_FILE)).unwrap())
            .unwrap();
    assert_eq!(examples.as_object().unwrap().len(), 3);
    let reports: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(dir.path().join(api::TRUE_REPORT_FILE)).unwrap())
            .unwrap();
    assert_eq!(reports["basic_game_3"], serde_json::to_value(&games[2].documents.true_report).unwrap());
}

#[test]
fn degraded_candidate_scores_below_truth() {
    let record = play(
        Difficulty::Hard,
        404,
        &SimConfig::default(),
        &DifficultyProfile::hard(),
    );
    let truth = hoops_core::ground_truth_report(&record);
    let mut candidate = serde_json::to_value(&truth).unwrap();
    let home = record.team(TeamSide::Home).name.clone();
    let points = truth.final_stats[&home].stats.points;
    candidate["final_stats"][home.as_str()]["stats"]["points"] = (points + 1).into();

    let report = evaluate_reports(&candidate, &truth).unwrap();
    assert!(report.field.accuracy_pct < 100.0);
    assert!(report.fractional_per_block.accuracy_pct < 100.0);
    assert_eq!(report.discrepancies.len(), 1);
}
