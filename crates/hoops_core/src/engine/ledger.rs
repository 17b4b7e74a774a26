//! Stat ledger: team and player counters for one game.
//!
//! All mutation goes through [`StatLedger::apply`], a dispatcher over the
//! tagged [`StatEffect`] enumeration. Each effect touches exactly the counters
//! it names; reversals clamp at zero and keep `attempted >= made`.

use std::collections::BTreeMap;

use crate::models::{PlayKind, ShotValue, StatLine, TeamFinalStats, TeamSide, VarOutcome};

/// A statistical effect and its named operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatEffect<'a> {
    AssistedScore {
        passer: &'a str,
        scorer: &'a str,
        value: ShotValue,
    },
    MissedShot {
        shooter: &'a str,
        value: ShotValue,
    },
    /// The blocker plays for the other side.
    Block {
        blocker: &'a str,
        shooter: &'a str,
        value: ShotValue,
    },
    /// The defender plays for the other side.
    ShootingFoul {
        shooter: &'a str,
        defender: &'a str,
        value: ShotValue,
    },
    FreeThrow {
        shooter: &'a str,
        made: bool,
    },
    Rebound {
        rebounder: &'a str,
        offensive: bool,
    },
    /// The ball handler plays for the other side.
    Steal {
        stealer: &'a str,
        ball_handler: &'a str,
    },
    BadPass {
        ball_handler: &'a str,
    },
    VarReview {
        passer: &'a str,
        scorer: &'a str,
        outcome: VarOutcome,
    },
}

impl StatEffect<'_> {
    /// Log tag for this effect applied on behalf of `side`.
    pub fn play_kind(&self, side: TeamSide) -> PlayKind {
        match *self {
            StatEffect::AssistedScore { value, .. } => PlayKind::AssistedScore { side, value },
            StatEffect::MissedShot { value, .. } => PlayKind::MissedShot { side, value },
            StatEffect::Block { value, .. } => PlayKind::Block { side, value },
            StatEffect::ShootingFoul { value, .. } => PlayKind::ShootingFoul { side, value },
            StatEffect::FreeThrow { made, .. } => PlayKind::FreeThrow { side, made },
            StatEffect::Rebound { offensive, .. } => PlayKind::Rebound { side, offensive },
            StatEffect::Steal { .. } => PlayKind::Steal { side },
            StatEffect::BadPass { .. } => PlayKind::BadPass { side },
            StatEffect::VarReview { outcome, .. } => PlayKind::VarReview { side, outcome },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TeamLedger {
    pub stats: StatLine,
    pub players: BTreeMap<String, StatLine>,
}

impl TeamLedger {
    pub fn new<'a>(roster: impl IntoIterator<Item = &'a String>) -> Self {
        Self {
            stats: StatLine::default(),
            players: roster
                .into_iter()
                .map(|name| (name.clone(), StatLine::default()))
                .collect(),
        }
    }

    fn player_mut(&mut self, name: &str) -> &mut StatLine {
        debug_assert!(self.players.contains_key(name), "{name} is not on the roster");
        self.players.entry(name.to_string()).or_default()
    }

    pub fn player(&self, name: &str) -> Option<&StatLine> {
        self.players.get(name)
    }

    pub fn to_final_stats(&self) -> TeamFinalStats {
        TeamFinalStats {
            stats: self.stats,
            players: self.players.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct StatLedger {
    teams: [TeamLedger; 2],
}

impl StatLedger {
    pub fn new(home: TeamLedger, away: TeamLedger) -> Self {
        Self {
            teams: [home, away],
        }
    }

    pub fn team(&self, side: TeamSide) -> &TeamLedger {
        &self.teams[side.index()]
    }

    fn team_mut(&mut self, side: TeamSide) -> &mut TeamLedger {
        &mut self.teams[side.index()]
    }

    pub fn points(&self, side: TeamSide) -> u32 {
        self.team(side).stats.points
    }

    pub fn fouls(&self, side: TeamSide, player: &str) -> u32 {
        self.team(side).player(player).map_or(0, |line| line.fouls)
    }

    /// Applies `effect` on behalf of `side`.
    pub fn apply(&mut self, side: TeamSide, effect: &StatEffect<'_>) {
        match *effect {
            StatEffect::AssistedScore {
                passer,
                scorer,
                value,
            } => {
                let team = self.team_mut(side);
                team.stats.add_field_goal(value);
                team.stats.assists += 1;
                team.player_mut(passer).assists += 1;
                team.player_mut(scorer).add_field_goal(value);
            }
            StatEffect::MissedShot { shooter, value } => {
                let team = self.team_mut(side);
                team.stats.add_field_goal_attempt(value);
                team.player_mut(shooter).add_field_goal_attempt(value);
            }
            StatEffect::Block {
                blocker,
                shooter,
                value,
            } => {
                let defense = self.team_mut(side.other());
                defense.stats.blocks += 1;
                defense.player_mut(blocker).blocks += 1;
                let offense = self.team_mut(side);
                offense.stats.add_field_goal_attempt(value);
                offense.player_mut(shooter).add_field_goal_attempt(value);
            }
            StatEffect::ShootingFoul {
                shooter,
                defender,
                value,
            } => {
                let offense = self.team_mut(side);
                offense.stats.add_field_goal_attempt(value);
                offense.player_mut(shooter).add_field_goal_attempt(value);
                let defense = self.team_mut(side.other());
                defense.stats.fouls += 1;
                defense.player_mut(defender).fouls += 1;
            }
            StatEffect::FreeThrow { shooter, made } => {
                let team = self.team_mut(side);
                team.stats.add_free_throw(made);
                team.player_mut(shooter).add_free_throw(made);
            }
            StatEffect::Rebound {
                rebounder,
                offensive,
            } => {
                let team = self.team_mut(side);
                team.stats.add_rebound(offensive);
                team.player_mut(rebounder).add_rebound(offensive);
            }
            StatEffect::Steal {
                stealer,
                ball_handler,
            } => {
                let defense = self.team_mut(side);
                defense.stats.steals += 1;
                defense.player_mut(stealer).steals += 1;
                let offense = self.team_mut(side.other());
                offense.stats.turnovers += 1;
                offense.player_mut(ball_handler).turnovers += 1;
            }
            StatEffect::BadPass { ball_handler } => {
                let team = self.team_mut(side);
                team.stats.turnovers += 1;
                team.player_mut(ball_handler).turnovers += 1;
            }
            StatEffect::VarReview {
                passer,
                scorer,
                outcome,
            } => self.apply_review(side, passer, scorer, outcome),
        }
    }

    fn apply_review(&mut self, side: TeamSide, passer: &str, scorer: &str, outcome: VarOutcome) {
        let team = self.team_mut(side);
        match outcome {
            VarOutcome::Downgrade => {
                // net -1 point, assist stands
                for line in [&mut team.stats, team.players.entry(scorer.to_string()).or_default()] {
                    line.remove_field_goal(ShotValue::Three);
                    line.add_field_goal(ShotValue::Two);
                }
            }
            VarOutcome::OffensiveFoulOverturn
            | VarOutcome::ShotClockOverturn
            | VarOutcome::BuzzerOverturn => {
                let value = if outcome == VarOutcome::OffensiveFoulOverturn {
                    ShotValue::Two
                } else {
                    ShotValue::Three
                };
                team.stats.remove_field_goal(value);
                team.stats.remove_assist();
                team.player_mut(passer).remove_assist();
                team.player_mut(scorer).remove_field_goal(value);
                if outcome.charges_foul() {
                    team.stats.fouls += 1;
                    team.player_mut(scorer).fouls += 1;
                }
                if outcome.charges_turnover() {
                    team.stats.turnovers += 1;
                    team.player_mut(scorer).turnovers += 1;
                }
            }
        }
    }

    /// Every team and player line keeps `attempted >= made`.
    pub fn is_consistent(&self) -> bool {
        self.teams
            .iter()
            .all(|t| t.stats.is_consistent() && t.players.values().all(StatLine::is_consistent))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster(prefix: &str) -> Vec<String> {
        (1..=8).map(|i| format!("{prefix}{i}")).collect()
    }

    fn ledger() -> StatLedger {
        StatLedger::new(
            TeamLedger::new(&roster("h")),
            TeamLedger::new(&roster("a")),
        )
    }

    #[test]
    fn test_assisted_score_touches_named_counters() {
        let mut ledger = ledger();
        ledger.apply(
            TeamSide::Home,
            &StatEffect::AssistedScore {
                passer: "h1",
                scorer: "h2",
                value: ShotValue::Three,
            },
        );
        let home = ledger.team(TeamSide::Home);
        assert_eq!(home.stats.points, 3);
        assert_eq!(home.stats.assists, 1);
        assert_eq!(home.player("h1").unwrap().assists, 1);
        assert_eq!(home.player("h1").unwrap().points, 0);
        assert_eq!(home.player("h2").unwrap().three_pt_made, 1);
        assert!(ledger.team(TeamSide::Away).stats.is_zero());
    }

    #[test]
    fn test_cross_team_effects() {
        let mut ledger = ledger();
        ledger.apply(
            TeamSide::Home,
            &StatEffect::ShootingFoul {
                shooter: "h3",
                defender: "a4",
                value: ShotValue::Two,
            },
        );
        ledger.apply(
            TeamSide::Away,
            &StatEffect::Steal {
                stealer: "a2",
                ball_handler: "h5",
            },
        );
        ledger.apply(
            TeamSide::Away,
            &StatEffect::Block {
                blocker: "h1",
                shooter: "a2",
                value: ShotValue::Three,
            },
        );
        assert_eq!(ledger.fouls(TeamSide::Away, "a4"), 1);
        assert_eq!(ledger.team(TeamSide::Home).stats.two_pt_attempted, 1);
        assert_eq!(ledger.team(TeamSide::Home).player("h5").unwrap().turnovers, 1);
        assert_eq!(ledger.team(TeamSide::Away).stats.steals, 1);
        assert_eq!(ledger.team(TeamSide::Home).player("h1").unwrap().blocks, 1);
        assert_eq!(ledger.team(TeamSide::Away).player("a2").unwrap().three_pt_attempted, 1);
    }

    #[test]
    fn test_overturn_restores_pre_scoring_counters() {
        let mut ledger = ledger();
        ledger.apply(
            TeamSide::Home,
            &StatEffect::MissedShot {
                shooter: "h2",
                value: ShotValue::Two,
            },
        );
        let before = ledger.clone();

        ledger.apply(
            TeamSide::Home,
            &StatEffect::AssistedScore {
                passer: "h1",
                scorer: "h2",
                value: ShotValue::Two,
            },
        );
        ledger.apply(
            TeamSide::Home,
            &StatEffect::VarReview {
                passer: "h1",
                scorer: "h2",
                outcome: VarOutcome::OffensiveFoulOverturn,
            },
        );

        let mut expected = before.clone();
        {
            let home = expected.team_mut(TeamSide::Home);
            home.stats.fouls += 1;
            home.stats.turnovers += 1;
            let shooter = home.player_mut("h2");
            shooter.fouls += 1;
            shooter.turnovers += 1;
        }
        assert_eq!(ledger, expected);
    }

    #[test]
    fn test_three_point_overturns_add_turnover_only() {
        for outcome in [VarOutcome::ShotClockOverturn, VarOutcome::BuzzerOverturn] {
            let mut ledger = ledger();
            ledger.apply(
                TeamSide::Away,
                &StatEffect::AssistedScore {
                    passer: "a1",
                    scorer: "a2",
                    value: ShotValue::Three,
                },
            );
            ledger.apply(
                TeamSide::Away,
                &StatEffect::VarReview {
                    passer: "a1",
                    scorer: "a2",
                    outcome,
                },
            );
            let away = ledger.team(TeamSide::Away);
            assert_eq!(away.stats.points, 0);
            assert_eq!(away.stats.assists, 0);
            assert_eq!(away.stats.turnovers, 1);
            assert_eq!(away.stats.fouls, 0);
            assert_eq!(away.player("a2").unwrap().three_pt_attempted, 0);
            assert_eq!(away.player("a1").unwrap().assists, 0);
        }
    }

    #[test]
    fn test_downgrade_keeps_assist() {
        let mut ledger = ledger();
        ledger.apply(
            TeamSide::Home,
            &StatEffect::AssistedScore {
                passer: "h1",
                scorer: "h2",
                value: ShotValue::Three,
            },
        );
        ledger.apply(
            TeamSide::Home,
            &StatEffect::VarReview {
                passer: "h1",
                scorer: "h2",
                outcome: VarOutcome::Downgrade,
            },
        );
        let home = ledger.team(TeamSide::Home);
        assert_eq!(home.stats.points, 2);
        assert_eq!(home.stats.assists, 1);
        assert_eq!(home.stats.three_pt_made, 0);
        assert_eq!(home.stats.two_pt_made, 1);
        let scorer = home.player("h2").unwrap();
        assert_eq!(scorer.points, 2);
        assert_eq!(scorer.two_pt_attempted, 1);
        assert_eq!(scorer.three_pt_attempted, 0);
    }

    #[test]
    fn test_review_on_empty_ledger_clamps() {
        let mut ledger = ledger();
        ledger.apply(
            TeamSide::Home,
            &StatEffect::VarReview {
                passer: "h1",
                scorer: "h2",
                outcome: VarOutcome::BuzzerOverturn,
            },
        );
        let home = ledger.team(TeamSide::Home);
        assert_eq!(home.stats.points, 0);
        assert_eq!(home.stats.turnovers, 1);
        assert!(ledger.is_consistent());
    }

    #[test]
    fn test_play_kind_tags_side() {
        let effect = StatEffect::FreeThrow {
            shooter: "h1",
            made: true,
        };
        assert_eq!(
            effect.play_kind(TeamSide::Home),
            PlayKind::FreeThrow {
                side: TeamSide::Home,
                made: true
            }
        );
    }
}
