//! Narrative lexicon and line rendering.
//!
//! Phrase pools are fixed; each game samples a per-tier subset once at
//! setup ([`Lexicon::sample`]) so wording varies between games while staying
//! stable within one.

use rand::seq::SliceRandom;
use rand::Rng;

use super::config::DifficultyProfile;
use crate::models::{ShotValue, VarOutcome};

const ASSIST_PASS_VERBS: [&str; 10] = [
    "passed the ball to",
    "dished it to",
    "fed",
    "kicked it out to",
    "delivered the ball to",
    "lobbed it to",
    "swung it over to",
    "found",
    "dropped it off to",
    "set up",
];

const RECEIVER_PASS_PHRASES: [&str; 9] = [
    "gets a sharp pass from",
    "receives a quick pass from",
    "is set up by",
    "catches a perfect pass from",
    "takes a pass from",
    "is found by",
    "is fed by",
    "is delivered the ball by",
    "is kicked the ball by",
];

const PLAIN_PASS_VERBS: [&str; 6] = [
    "passes to",
    "sends it to",
    "plays it to",
    "moves it to",
    "rotates it to",
    "pushes it to",
];

const MADE_TWO: [&str; 8] = [
    "finishes with a mid-range jump shot.",
    "finishes with a layup at the rim.",
    "knocks down a successful 2-point jump shot.",
    "attempted a 3-pointer and made it, but stepped on the 3-point line.",
    "dunks with one hand.",
    "dunks with two hands.",
    "drives to the basket and scores with a layup.",
    "pulls up for a mid-range jumper and hits it.",
];

const MADE_THREE: [&str; 6] = [
    "is open on the perimeter for a successful 3-point shot.",
    "is in the corner, and makes the 3-point shot.",
    "catches and shoots a successful 3-pointer.",
    "drives and kicks out to a 3-point shooter, who nails it.",
    "tries a very difficult 3-pointer, but makes it.",
    "tries a very difficult 3-pointer, but nails it.",
];

const MISSED_TWO: [&str; 9] = [
    "attempts an easy 2-point shot, but misses.",
    "misses a mid-range jump shot.",
    "misses a layup at the rim.",
    "misses a 2-point jump shot.",
    "attempted a 3-pointer but stepped on the 3-point line and missed.",
    "goes up for a dunk but misses.",
    "attempts a dunk but misses.",
    "drives to the basket but misses the layup.",
    "pulls up for a mid-range jumper but misses.",
];

const MISSED_THREE: [&str; 7] = [
    "attempts an easy 3-point shot, but misses.",
    "is open on the perimeter for a 3-point shot, but misses.",
    "is in the corner, and misses the 3-point shot.",
    "catches and shoots a 3-pointer, but misses.",
    "drives and kicks out to a 3-point shooter, who misses.",
    "tries a very easy 3-pointer, but misses.",
    "tries a very easy 3-pointer, but misses.",
];

const FREE_THROW_ORDINALS: [&str; 3] = ["first", "second", "third"];

/// Per-game phrase subsets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lexicon {
    assist_pass: Vec<&'static str>,
    receiver_pass: Vec<&'static str>,
    /// Wording of pass-only lines.
    plain_pass: Vec<&'static str>,
    made_two: Vec<&'static str>,
    made_three: Vec<&'static str>,
    missed_two: Vec<&'static str>,
    missed_three: Vec<&'static str>,
}

impl Lexicon {
    pub fn sample<R: Rng + ?Sized>(rng: &mut R, profile: &DifficultyProfile) -> Self {
        let mut subset = |pool: &[&'static str]| -> Vec<&'static str> {
            pool.choose_multiple(&mut *rng, profile.lexicon_size(pool.len()))
                .copied()
                .collect()
        };
        let assist_pass = subset(&ASSIST_PASS_VERBS);
        let receiver_pass = subset(&RECEIVER_PASS_PHRASES);
        let made_two = subset(&MADE_TWO);
        let made_three = subset(&MADE_THREE);
        let missed_two = subset(&MISSED_TWO);
        let missed_three = subset(&MISSED_THREE);
        let plain_pass = if profile.adversarial_assist_bias {
            assist_pass.clone()
        } else {
            PLAIN_PASS_VERBS.to_vec()
        };
        Self {
            assist_pass,
            receiver_pass,
            plain_pass,
            made_two,
            made_three,
            missed_two,
            missed_three,
        }
    }

    pub fn assist_pass<R: Rng + ?Sized>(&self, rng: &mut R) -> &'static str {
        pick(rng, &self.assist_pass, "passes to")
    }

    pub fn receiver_pass<R: Rng + ?Sized>(&self, rng: &mut R) -> &'static str {
        pick(rng, &self.receiver_pass, "receives a pass from")
    }

    pub fn plain_pass<R: Rng + ?Sized>(&self, rng: &mut R) -> &'static str {
        pick(rng, &self.plain_pass, "passes to")
    }

    pub fn made_shot<R: Rng + ?Sized>(&self, rng: &mut R, value: ShotValue) -> &'static str {
        match value {
            ShotValue::Two => pick(rng, &self.made_two, "scores."),
            ShotValue::Three => pick(rng, &self.made_three, "scores from deep."),
        }
    }

    pub fn missed_shot<R: Rng + ?Sized>(&self, rng: &mut R, value: ShotValue) -> &'static str {
        let pool = match value {
            ShotValue::Two => &self.missed_two,
            ShotValue::Three => &self.missed_three,
        };
        pick(rng, pool, "attempts a shot but misses.")
    }

    /// Every phrase this lexicon can emit.
    pub fn phrases(&self) -> impl Iterator<Item = &'static str> + '_ {
        [
            &self.assist_pass,
            &self.receiver_pass,
            &self.plain_pass,
            &self.made_two,
            &self.made_three,
            &self.missed_two,
            &self.missed_three,
        ]
        .into_iter()
        .flatten()
        .copied()
    }
}

fn pick<R: Rng + ?Sized>(rng: &mut R, pool: &[&'static str], fallback: &'static str) -> &'static str {
    pool.choose(rng).copied().unwrap_or(fallback)
}

fn value_label(value: ShotValue) -> &'static str {
    match value {
        ShotValue::Two => "2-point",
        ShotValue::Three => "3-point",
    }
}

pub fn free_throw_ordinal(index: usize) -> &'static str {
    FREE_THROW_ORDINALS.get(index).copied().unwrap_or("next")
}

// ---------------------------------------------------------------------------
// Line renderers
// ---------------------------------------------------------------------------

pub fn jump_ball(a: &str, b: &str, winner: &str) -> String {
    format!("The game starts with a jump ball between {a} and {b}. {winner} wins possession.")
}

pub fn overtime_jump_ball(number: u32, a: &str, b: &str, winner: &str) -> String {
    format!("Overtime {number} jump ball between {a} and {b}. {winner} wins the tip.")
}

pub fn inbound(inbounder: &str, receiver: &str) -> String {
    format!("{inbounder} inbounds the ball to {receiver} to start the possession.")
}

pub fn pass(passer: &str, verb: &str, receiver: &str) -> String {
    format!("{passer} {verb} {receiver}.")
}

pub fn assisted_score(passer: &str, verb: &str, scorer: &str, description: &str) -> String {
    format!("{passer} {verb} {scorer}, who {description}")
}

pub fn assisted_score_receiver_first(
    scorer: &str,
    phrase: &str,
    passer: &str,
    description: &str,
) -> String {
    format!("{scorer} {phrase} {passer}, and {description}")
}

pub fn missed_shot(passer: &str, verb: &str, shooter: &str, description: &str) -> String {
    format!("{passer} {verb} {shooter}, who {description}")
}

pub fn block(shooter: &str, blocker: &str, value: ShotValue) -> String {
    format!("{shooter} tries a {} shot, but is blocked by {blocker}!", value_label(value))
}

pub fn shooting_foul(shooter: &str, defender: &str, value: ShotValue) -> String {
    let shots = match value {
        ShotValue::Two => "two",
        ShotValue::Three => "three",
    };
    format!(
        "{shooter} is fouled by {defender} on a {} attempt and will go to the line for {shots} shots.",
        value_label(value)
    )
}

pub fn free_throw(shooter: &str, index: usize, made: bool) -> String {
    let verb = if made { "makes" } else { "misses" };
    format!("{shooter} {verb} the {} free throw.", free_throw_ordinal(index))
}

pub fn rebound(rebounder: &str, offensive: bool) -> String {
    if offensive {
        format!("Offensive rebound by {rebounder}!")
    } else {
        format!("Defensive rebound by {rebounder}.")
    }
}

pub fn steal(stealer: &str, ball_handler: &str) -> String {
    format!("{stealer} steals the ball from {ball_handler}!")
}

pub fn bad_pass(ball_handler: &str) -> String {
    format!("A bad pass from {ball_handler} results in a turnover.")
}

pub fn timeout(coach: &str) -> String {
    format!("{coach} calls a timeout.")
}

pub const GAME_RESUME: &str = "The game resumes after a timeout.";
pub const END_OF_GAME: &str = "End of game.";
pub const BONUS_IN_EFFECT: &str = "Bonus in effect: two free throws for the non-fouling team.";
pub const TEAM_FOULS_RESET: &str = "Team fouls reset for new quarter.";

pub fn substitution(coach: &str, player_in: &str, player_out: &str) -> String {
    format!("Substitution by {coach}: {player_in} comes in for {player_out}.")
}

pub fn foul_out(player: &str, limit: u32, team: &str, available: usize) -> String {
    format!(
        "{player} commits a {limit}th foul and is disqualified. {team} available players: {available}."
    )
}

pub fn foul_out_substitution(coach: &str, player_in: &str, player_out: &str) -> String {
    format!("Substitution by {coach}: {player_in} comes in for {player_out} (fouled out).")
}

pub fn short_handed(team: &str) -> String {
    format!("{team} has no eligible substitutes and will continue short-handed.")
}

pub fn team_fouls(team: &str, count: u32, limit: u32) -> String {
    format!("Team fouls this quarter – {team}: {count}/{limit}.")
}

pub fn bonus_awarded(shooter: &str) -> String {
    format!("{shooter} is awarded two free throws (team fouls in bonus).")
}

/// `scorer` lost the basket, `victim` is the defender fouled on the play.
pub fn var_review(outcome: VarOutcome, scorer: &str, victim: &str) -> String {
    match outcome {
        VarOutcome::OffensiveFoulOverturn => format!(
            "After a VAR review, the previous basket by {scorer} is overturned due to an offensive foul committed by {scorer} against {victim} before the shot."
        ),
        VarOutcome::ShotClockOverturn => format!(
            "The referees go to the monitor. After VAR review, the 3-point shot by {scorer} is waved off due to a shot clock violation."
        ),
        VarOutcome::BuzzerOverturn => format!(
            "VAR review: the shot by {scorer} was released after the buzzer. The 3-point basket does not count."
        ),
        VarOutcome::Downgrade => format!(
            "After a VAR review, {scorer}'s basket is downgraded from three to two points (toe on the line)."
        ),
    }
}

pub fn period_start(label: &str) -> String {
    format!("Start of {label}.")
}

pub fn period_end(label: &str) -> String {
    format!("End of {label}.")
}

pub fn tie_to_overtime(label: &str, next_overtime: u32) -> String {
    format!("{label} ends in a tie. Going to OT{next_overtime}.")
}
