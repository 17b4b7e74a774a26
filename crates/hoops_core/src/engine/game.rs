//! Game state and the possession loop.
//!
//! [`GameSim`] owns every piece of per-game state (RNG, ledger, lineups,
//! log, possession, period clock). One call to [`GameSim::simulate`] runs
//! the game to completion and hands back a [`GameRecord`]; nothing is shared
//! between games.

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, trace, warn};

use super::config::{DifficultyProfile, SimConfig};
use super::events::{feasible_candidates, select_event, Feasibility, PossessionAction};
use super::ledger::{StatEffect, StatLedger, TeamLedger};
use super::lineup::TeamLineup;
use super::narrative::{self, Lexicon};
use super::period::{period_label, PeriodClock};
use crate::error::{CoreError, Result};
use crate::models::{
    Difficulty, PlayByPlayEntry, PlayKind, RosterCatalog, ShotValue, TeamProfile, TeamSide,
};

/// Everything needed to start one game.
#[derive(Debug, Clone, Copy)]
pub struct GameSetup<'a> {
    pub difficulty: Difficulty,
    pub seed: u64,
    pub rules: &'a SimConfig,
    pub profile: &'a DifficultyProfile,
    pub catalog: &'a RosterCatalog,
    /// Drawn from the catalog when `None`.
    pub home_team: Option<&'a str>,
    pub away_team: Option<&'a str>,
}

/// The last made basket, kept until the next possession change so a video
/// review can reverse it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoringPlay {
    pub side: TeamSide,
    pub passer: String,
    pub scorer: String,
    pub value: ShotValue,
}

/// Final state of a simulated game.
#[derive(Debug, Clone)]
pub struct GameRecord {
    pub difficulty: Difficulty,
    pub seed: u64,
    pub foul_limit: u32,
    /// Home first.
    pub teams: [TeamProfile; 2],
    pub lineups: [TeamLineup; 2],
    pub ledger: StatLedger,
    pub play_by_play: Vec<PlayByPlayEntry>,
    pub periods_played: u32,
    pub overtimes: u32,
}

impl GameRecord {
    pub fn team(&self, side: TeamSide) -> &TeamProfile {
        &self.teams[side.index()]
    }

    pub fn lineup(&self, side: TeamSide) -> &TeamLineup {
        &self.lineups[side.index()]
    }

    pub fn score(&self, side: TeamSide) -> u32 {
        self.ledger.points(side)
    }

    pub fn matchup(&self) -> String {
        format!("{} vs {}", self.teams[0].name, self.teams[1].name)
    }

    /// `"<Home>: <n>, <Away>: <m>"`
    pub fn final_score(&self) -> String {
        format!(
            "{}: {}, {}: {}",
            self.teams[0].name,
            self.score(TeamSide::Home),
            self.teams[1].name,
            self.score(TeamSide::Away)
        )
    }
}

pub struct GameSim {
    pub(super) rng: ChaCha8Rng,
    pub(super) rules: SimConfig,
    pub(super) profile: DifficultyProfile,
    pub(super) difficulty: Difficulty,
    pub(super) seed: u64,
    pub(super) lexicon: Lexicon,
    pub(super) teams: [TeamProfile; 2],
    pub(super) lineups: [TeamLineup; 2],
    pub(super) ledger: StatLedger,
    pub(super) log: Vec<PlayByPlayEntry>,
    pub(super) possession: TeamSide,
    /// `None` means the next possession starts with an inbound.
    pub(super) ball: Option<String>,
    pub(super) last_scoring: Option<ScoringPlay>,
    /// Per-period team fouls (tracked, bonus off by default).
    pub(super) team_fouls: [u32; 2],
    pub(super) clock: PeriodClock,
    /// Highest period whose "End of" line has been written.
    pub(super) closed_through: u32,
}

impl GameSim {
    /// Draws the lexicon, the matchup and both starting fives, then opens
    /// the game with a jump ball.
    pub fn new(setup: GameSetup<'_>) -> Result<Self> {
        setup.rules.validate()?;
        setup.profile.validate()?;
        setup.catalog.validate()?;

        let mut rng = ChaCha8Rng::seed_from_u64(setup.seed);
        let lexicon = Lexicon::sample(&mut rng, setup.profile);
        let [home, away] = choose_teams(&mut rng, setup)?;

        let lineups = [
            TeamLineup::shuffled(&mut rng, &home.players),
            TeamLineup::shuffled(&mut rng, &away.players),
        ];
        let ledger = StatLedger::new(
            TeamLedger::new(&home.players),
            TeamLedger::new(&away.players),
        );

        let jumper_home = lineups[0].pick_active(&mut rng);
        let jumper_away = lineups[1].pick_active(&mut rng);
        let winner = random_side(&mut rng);
        let winner_player = match winner {
            TeamSide::Home => jumper_home.clone(),
            TeamSide::Away => jumper_away.clone(),
        };

        let mut sim = Self {
            rng,
            rules: setup.rules.clone(),
            profile: setup.profile.clone(),
            difficulty: setup.difficulty,
            seed: setup.seed,
            lexicon,
            teams: [home, away],
            lineups,
            ledger,
            log: Vec::new(),
            possession: winner,
            // 점프볼 승자가 공을 잡고 시작 (첫 공격은 인바운드 없음)
            ball: Some(winner_player.clone()),
            last_scoring: None,
            team_fouls: [0; 2],
            clock: PeriodClock::new(setup.profile.target_events, winner),
            closed_through: 0,
        };
        sim.log(
            PlayKind::JumpBall,
            narrative::jump_ball(&jumper_home, &jumper_away, &winner_player),
        );
        sim.log(PlayKind::PeriodBoundary, narrative::period_start("Q1"));
        Ok(sim)
    }

    /// Runs the game to the final buzzer.
    pub fn simulate(mut self) -> GameRecord {
        self.run();
        self.finish()
    }

    pub fn lineup(&self, side: TeamSide) -> &TeamLineup {
        &self.lineups[side.index()]
    }

    pub fn ledger(&self) -> &StatLedger {
        &self.ledger
    }

    pub fn play_by_play(&self) -> &[PlayByPlayEntry] {
        &self.log
    }

    pub fn possession(&self) -> TeamSide {
        self.possession
    }

    pub fn ball(&self) -> Option<&str> {
        self.ball.as_deref()
    }

    pub fn team_fouls(&self, side: TeamSide) -> u32 {
        self.team_fouls[side.index()]
    }

    pub fn clock(&self) -> &PeriodClock {
        &self.clock
    }

    fn run(&mut self) {
        while self.clock.is_running() {
            let before = self.log.len();
            let ended_with_shot = self.play_possession();
            let added = (self.log.len() - before) as u32;
            self.settle_possession(added, ended_with_shot);
        }
        self.close_game();
    }

    /// Bills the possession and handles period boundaries and overtime.
    fn settle_possession(&mut self, added: u32, ended_with_shot: bool) {
        self.clock.bill(added, ended_with_shot);
        if self.clock.quarter_complete(ended_with_shot) {
            self.close_quarter();
        } else if self.clock.budget_spent() && self.is_tied() {
            self.start_overtime();
        }
        self.last_scoring = None;
    }

    fn play_possession(&mut self) -> bool {
        let offense = self.possession;
        let defense = offense.other();
        let holder = match self.ball.clone() {
            Some(player) => player,
            None => self.inbound(offense),
        };
        let holder = self.move_ball(offense, holder);

        let state = Feasibility {
            offense_active: self.lineup(offense).active().len(),
            defense_can_foul: self.lineup(defense).can_commit_fouls(),
        };
        let candidates = feasible_candidates(&self.profile.event_weights, state);
        let kind = select_event(&mut self.rng, &candidates);
        trace!(?kind, period = self.clock.period(), ?offense, "possession action");

        match kind.action() {
            PossessionAction::AssistedScore { value, wording } => {
                self.assisted_score(offense, holder, value, wording)
            }
            PossessionAction::MissedShot { value } => self.missed_shot(offense, holder, value),
            PossessionAction::Block { value } => self.blocked_shot(offense, holder, value),
            PossessionAction::ShootingFoul { value } => self.shooting_foul(offense, holder, value),
            PossessionAction::Steal => self.steal(offense, holder),
            PossessionAction::BadPass => self.bad_pass(offense, holder),
            PossessionAction::Timeout => self.timeout(offense),
        }
    }

    // ------------------------------------------------------------------
    // Shared steps
    // ------------------------------------------------------------------

    pub(super) fn log(&mut self, kind: PlayKind, description: String) {
        let event_id = self.log.len() as u32 + 1;
        self.log.push(PlayByPlayEntry {
            event_id,
            description,
            kind,
        });
    }

    /// Applies a ledger effect and writes its line in the same step.
    pub(super) fn apply(&mut self, side: TeamSide, effect: StatEffect<'_>, description: String) {
        self.ledger.apply(side, &effect);
        self.log(effect.play_kind(side), description);
    }

    /// Hands the ball to `side`. The scoring memory only survives while the
    /// same team keeps the ball.
    pub(super) fn change_possession(&mut self, side: TeamSide, ball: Option<String>) {
        if side != self.possession {
            self.last_scoring = None;
        }
        self.possession = side;
        self.ball = ball;
    }

    pub(super) fn is_tied(&self) -> bool {
        self.ledger.points(TeamSide::Home) == self.ledger.points(TeamSide::Away)
    }

    /// Inbound to a distinct teammate; returns the receiver.
    pub(super) fn inbound(&mut self, offense: TeamSide) -> String {
        let lineup = &self.lineups[offense.index()];
        let inbounder = lineup.pick_active(&mut self.rng);
        let receiver = lineup.pick_other_active(&mut self.rng, &inbounder);
        self.log(PlayKind::Inbound, narrative::inbound(&inbounder, &receiver));
        self.ball = Some(receiver.clone());
        receiver
    }

    /// `0..=max_passes` passes between distinct active players.
    fn move_ball(&mut self, offense: TeamSide, mut holder: String) -> String {
        let passes = self.rng.gen_range(0..=self.profile.max_passes);
        for _ in 0..passes {
            let lineup = &self.lineups[offense.index()];
            if !lineup.active().iter().any(|p| *p != holder) {
                break;
            }
            let receiver = lineup.pick_other_active(&mut self.rng, &holder);
            let verb = self.lexicon.plain_pass(&mut self.rng);
            self.log(PlayKind::Pass, narrative::pass(&holder, verb, &receiver));
            holder = receiver;
        }
        self.ball = Some(holder.clone());
        holder
    }

    pub(super) fn substitution_chance(&mut self, side: TeamSide, protected: Option<&str>) {
        if !self.profile.allow_substitutions {
            return;
        }
        let idx = side.index();
        let chance = self.profile.effective_substitution_chance();
        if let Some(sub) = self.lineups[idx].substitute(&mut self.rng, chance, protected) {
            let line = narrative::substitution(
                &self.teams[idx].head_coach,
                &sub.player_in,
                &sub.player_out,
            );
            self.log(PlayKind::Substitution { side }, line);
        }
    }

    pub(super) fn substitution_chances(&mut self) {
        for side in TeamSide::BOTH {
            self.substitution_chance(side, None);
        }
    }

    /// Disqualifies `player` once they reach the foul limit.
    pub(super) fn check_foul_out(&mut self, side: TeamSide, player: &str) {
        let idx = side.index();
        if self.lineups[idx].is_disqualified(player)
            || self.ledger.fouls(side, player) < self.rules.foul_limit
        {
            return;
        }
        let outcome = self.lineups[idx].force_foul_out(&mut self.rng, player);
        let team = self.teams[idx].name.clone();
        self.log(
            PlayKind::FoulOut { side },
            narrative::foul_out(player, self.rules.foul_limit, &team, outcome.available),
        );
        if let Some(player_in) = &outcome.replacement {
            let line =
                narrative::foul_out_substitution(&self.teams[idx].head_coach, player_in, player);
            self.log(PlayKind::Substitution { side }, line);
        } else if outcome.short_handed() {
            warn!(team = %team, active = self.lineups[idx].active().len(), "team continues short-handed");
            self.log(PlayKind::ShortHanded { side }, narrative::short_handed(&team));
        }
    }

    /// Counts a team foul for the current period and returns the new total.
    pub(super) fn count_team_foul(&mut self, side: TeamSide) -> u32 {
        let idx = side.index();
        self.team_fouls[idx] += 1;
        let count = self.team_fouls[idx];
        if self.rules.debug_team_fouls {
            let line =
                narrative::team_fouls(&self.teams[idx].name, count, self.rules.team_foul_limit);
            self.log(PlayKind::Notice, line);
        }
        count
    }

    fn reset_team_fouls(&mut self) {
        self.team_fouls = [0; 2];
        if self.rules.debug_team_fouls {
            self.log(PlayKind::Notice, narrative::TEAM_FOULS_RESET.to_string());
        }
    }

    // ------------------------------------------------------------------
    // Period boundaries
    // ------------------------------------------------------------------

    fn close_current_period(&mut self) {
        let period = self.clock.period();
        if self.closed_through < period {
            self.closed_through = period;
            self.log(PlayKind::PeriodBoundary, narrative::period_end(&period_label(period)));
        }
    }

    fn close_quarter(&mut self) {
        self.close_current_period();
        let starter = self.clock.advance_quarter();
        self.change_possession(starter, None);
        self.last_scoring = None;
        self.log(PlayKind::PeriodBoundary, narrative::period_start(&self.clock.label()));
        self.reset_team_fouls();
        debug!(
            period = self.clock.period(),
            home = self.ledger.points(TeamSide::Home),
            away = self.ledger.points(TeamSide::Away),
            "quarter started"
        );
    }

    fn start_overtime(&mut self) {
        let tied_period = self.clock.label();
        let next = self.clock.overtimes() + 1;
        self.close_current_period();
        self.log(PlayKind::Notice, narrative::tie_to_overtime(&tied_period, next));

        let number = self.clock.add_overtime(self.rules.overtime_divisor);
        self.reset_team_fouls();

        let jumper_home = self.lineups[0].pick_active(&mut self.rng);
        let jumper_away = self.lineups[1].pick_active(&mut self.rng);
        let winner = random_side(&mut self.rng);
        let winner_player = match winner {
            TeamSide::Home => jumper_home.clone(),
            TeamSide::Away => jumper_away.clone(),
        };
        self.log(
            PlayKind::JumpBall,
            narrative::overtime_jump_ball(number, &jumper_home, &jumper_away, &winner_player),
        );
        self.log(PlayKind::PeriodBoundary, narrative::period_start(&self.clock.label()));
        self.change_possession(winner, Some(winner_player));
        debug!(overtime = number, score = self.ledger.points(TeamSide::Home), "tied, overtime added");
    }

    fn close_game(&mut self) {
        self.close_current_period();
        self.log(PlayKind::EndOfGame, narrative::END_OF_GAME.to_string());
    }

    fn finish(self) -> GameRecord {
        debug!(
            seed = self.seed,
            difficulty = %self.difficulty,
            home = %self.teams[0].name,
            away = %self.teams[1].name,
            home_points = self.ledger.points(TeamSide::Home),
            away_points = self.ledger.points(TeamSide::Away),
            lines = self.log.len(),
            overtimes = self.clock.overtimes(),
            "game simulated"
        );
        GameRecord {
            difficulty: self.difficulty,
            seed: self.seed,
            foul_limit: self.rules.foul_limit,
            periods_played: self.clock.period(),
            overtimes: self.clock.overtimes(),
            teams: self.teams,
            lineups: self.lineups,
            ledger: self.ledger,
            play_by_play: self.log,
        }
    }
}

fn random_side<R: Rng + ?Sized>(rng: &mut R) -> TeamSide {
    TeamSide::BOTH
        .choose(rng)
        .copied()
        .unwrap_or(TeamSide::Home)
}

/// Resolves the matchup, drawing unnamed sides from the catalog.
fn choose_teams<R: Rng + ?Sized>(rng: &mut R, setup: GameSetup<'_>) -> Result<[TeamProfile; 2]> {
    let catalog = setup.catalog;
    let lookup = |name: &str| {
        catalog
            .team(name)
            .cloned()
            .ok_or_else(|| CoreError::UnknownTeam(name.to_string()))
    };

    let (home, away) = match (setup.home_team, setup.away_team) {
        (Some(home), Some(away)) => (lookup(home)?, lookup(away)?),
        (Some(home), None) => {
            let home = lookup(home)?;
            let away = draw_team(rng, catalog, Some(&home.name))?;
            (home, away)
        }
        (None, Some(away)) => {
            let away = lookup(away)?;
            let home = draw_team(rng, catalog, Some(&away.name))?;
            (home, away)
        }
        (None, None) => {
            let home = draw_team(rng, catalog, None)?;
            let away = draw_team(rng, catalog, Some(&home.name))?;
            (home, away)
        }
    };

    if home.name == away.name {
        return Err(CoreError::InvalidConfig(format!(
            "a team cannot play itself: {}",
            home.name
        )));
    }
    Ok([home, away])
}

fn draw_team<R: Rng + ?Sized>(
    rng: &mut R,
    catalog: &RosterCatalog,
    exclude: Option<&str>,
) -> Result<TeamProfile> {
    let options: Vec<&TeamProfile> = catalog
        .teams
        .iter()
        .filter(|t| Some(t.name.as_str()) != exclude)
        .collect();
    options
        .choose(rng)
        .map(|t| (*t).clone())
        .ok_or_else(|| CoreError::InvalidRoster("not enough teams to draw a matchup".to_string()))
}
