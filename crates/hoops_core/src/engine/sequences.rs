//! Sequence handlers: one per possession-ending action.
//!
//! Each handler runs the full multi-line sequence for its action (shot,
//! rebound, free throws, video review, substitutions) and returns whether the
//! possession ended with a genuine shot attempt, which is what the period
//! clock needs to decide when a quarter may close.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::trace;

use super::events::AssistWording;
use super::game::{GameSim, ScoringPlay};
use super::ledger::StatEffect;
use super::narrative;
use crate::models::{PlayKind, ShotValue, TeamSide, VarOutcome};

impl GameSim {
    /// Passer is the ball holder; a distinct teammate scores.
    pub(super) fn assisted_score(
        &mut self,
        offense: TeamSide,
        passer: String,
        value: ShotValue,
        wording: AssistWording,
    ) -> bool {
        let scorer = self.lineups[offense.index()].pick_other_active(&mut self.rng, &passer);
        let description = match wording {
            AssistWording::PasserFirst => {
                let verb = self.lexicon.assist_pass(&mut self.rng);
                let shot = self.lexicon.made_shot(&mut self.rng, value);
                narrative::assisted_score(&passer, verb, &scorer, shot)
            }
            AssistWording::ReceiverFirst => {
                let phrase = self.lexicon.receiver_pass(&mut self.rng);
                let shot = self.lexicon.made_shot(&mut self.rng, value);
                narrative::assisted_score_receiver_first(&scorer, phrase, &passer, shot)
            }
        };
        self.apply(
            offense,
            StatEffect::AssistedScore {
                passer: &passer,
                scorer: &scorer,
                value,
            },
            description,
        );
        self.change_possession(offense.other(), None);
        self.last_scoring = Some(ScoringPlay {
            side: offense,
            passer,
            scorer,
            value,
        });

        if self.profile.allow_var && self.rng.gen::<f64>() < self.profile.var_chance {
            self.video_review();
        }
        self.substitution_chances();
        self.ball = None;
        true
    }

    pub(super) fn missed_shot(&mut self, offense: TeamSide, passer: String, value: ShotValue) -> bool {
        let shooter = self.lineups[offense.index()].pick_other_active(&mut self.rng, &passer);
        let verb = self.lexicon.assist_pass(&mut self.rng);
        let miss = self.lexicon.missed_shot(&mut self.rng, value);
        self.apply(
            offense,
            StatEffect::MissedShot {
                shooter: &shooter,
                value,
            },
            narrative::missed_shot(&passer, verb, &shooter, miss),
        );
        self.rebound(offense);
        true
    }

    pub(super) fn blocked_shot(&mut self, offense: TeamSide, shooter: String, value: ShotValue) -> bool {
        let blocker = self.lineups[offense.other().index()].pick_active(&mut self.rng);
        self.apply(
            offense,
            StatEffect::Block {
                blocker: &blocker,
                shooter: &shooter,
                value,
            },
            narrative::block(&shooter, &blocker, value),
        );
        self.rebound(offense);
        true
    }

    pub(super) fn shooting_foul(&mut self, offense: TeamSide, shooter: String, value: ShotValue) -> bool {
        let defense = offense.other();
        let defender = self.lineups[defense.index()].pick_active(&mut self.rng);
        self.apply(
            offense,
            StatEffect::ShootingFoul {
                shooter: &shooter,
                defender: &defender,
                value,
            },
            narrative::shooting_foul(&shooter, &defender, value),
        );
        self.check_foul_out(defense, &defender);
        self.count_team_foul(defense);
        self.free_throw_trip(offense, &shooter, value.free_throws(), true);
        true
    }

    pub(super) fn steal(&mut self, offense: TeamSide, ball_handler: String) -> bool {
        let defense = offense.other();
        let stealer = self.lineups[defense.index()].pick_active(&mut self.rng);
        self.apply(
            defense,
            StatEffect::Steal {
                stealer: &stealer,
                ball_handler: &ball_handler,
            },
            narrative::steal(&stealer, &ball_handler),
        );
        self.change_possession(defense, Some(stealer));
        false
    }

    /// Dead-ball turnover: the other team inbounds next.
    pub(super) fn bad_pass(&mut self, offense: TeamSide, ball_handler: String) -> bool {
        self.apply(
            offense,
            StatEffect::BadPass {
                ball_handler: &ball_handler,
            },
            narrative::bad_pass(&ball_handler),
        );
        self.change_possession(offense.other(), None);
        self.substitution_chance(offense, None);
        false
    }

    /// No stat effect and no possession change.
    pub(super) fn timeout(&mut self, offense: TeamSide) -> bool {
        let coach = self.teams[offense.index()].head_coach.clone();
        self.log(PlayKind::Timeout { side: offense }, narrative::timeout(&coach));
        self.substitution_chances();
        self.log(PlayKind::GameResume, narrative::GAME_RESUME.to_string());
        self.inbound(offense);
        false
    }

    /// Live rebound after a miss by `shooting`.
    fn rebound(&mut self, shooting: TeamSide) {
        let offensive = self.rng.gen_bool(self.rules.offensive_rebound_probability);
        let side = if offensive { shooting } else { shooting.other() };
        let rebounder = self.lineups[side.index()].pick_active(&mut self.rng);
        self.apply(
            side,
            StatEffect::Rebound {
                rebounder: &rebounder,
                offensive,
            },
            narrative::rebound(&rebounder, offensive),
        );
        self.change_possession(side, Some(rebounder));
    }

    /// Only the last shot decides the next possession.
    fn free_throw_trip(&mut self, shooting: TeamSide, shooter: &str, shots: u32, substitutions: bool) {
        for i in 0..shots {
            let last = i + 1 == shots;
            let made = self.rng.gen_bool(self.rules.free_throw_make_probability);
            self.apply(
                shooting,
                StatEffect::FreeThrow { shooter, made },
                narrative::free_throw(shooter, i as usize, made),
            );
            if last {
                if made {
                    self.change_possession(shooting.other(), None);
                } else {
                    self.rebound(shooting);
                }
            } else if substitutions {
                // 슈터는 자유투 사이에 교체 불가
                self.substitution_chance(shooting, Some(shooter));
                self.substitution_chance(shooting.other(), None);
            }
        }
    }

    /// Reviews the basket held in the scoring memory and consumes it.
    fn video_review(&mut self) {
        let Some(play) = self.last_scoring.take() else {
            return;
        };
        let Some(&outcome) = VarOutcome::candidates(play.value).choose(&mut self.rng) else {
            return;
        };
        if outcome.charges_foul() && !self.lineups[play.side.index()].can_commit_fouls() {
            trace!(?outcome, "review skipped, no bench to absorb the foul");
            return;
        }
        let opponent = play.side.other();
        let victim = self.lineups[opponent.index()].pick_active(&mut self.rng);
        self.apply(
            play.side,
            StatEffect::VarReview {
                passer: &play.passer,
                scorer: &play.scorer,
                outcome,
            },
            narrative::var_review(outcome, &play.scorer, &victim),
        );

        if outcome.charges_foul() {
            self.check_foul_out(play.side, &play.scorer);
            let fouls = self.count_team_foul(play.side);
            if self.rules.bonus_free_throws && fouls >= self.rules.team_foul_limit {
                self.bonus_free_throws(play.side, &victim);
            }
        }
    }

    /// Two shots for the fouled defender once the fouling team is in the bonus.
    fn bonus_free_throws(&mut self, fouling: TeamSide, shooter: &str) {
        if self.rules.debug_team_fouls {
            self.log(PlayKind::Notice, narrative::BONUS_IN_EFFECT.to_string());
        }
        self.log(PlayKind::Notice, narrative::bonus_awarded(shooter));
        self.free_throw_trip(fouling.other(), shooter, 2, false);
    }
}
