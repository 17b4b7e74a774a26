//! Period controller: quarter and overtime budgets.
//!
//! Every period owns a budget of narrative lines. The game loop reports how
//! many lines each possession wrote ([`PeriodClock::bill`]); quarters 1-3
//! close once their budget is spent by a possession that ended with a shot
//! attempt, and from quarter 4 on the last unit of the budget is held back
//! until such a possession spends it.

use crate::models::TeamSide;

pub const REGULATION_QUARTERS: u32 = 4;

/// Label of a 1-based period: `Q1`..`Q4`, then `OT1`, `OT2`, ...
pub fn period_label(period: u32) -> String {
    if period <= REGULATION_QUARTERS {
        format!("Q{period}")
    } else {
        format!("OT{}", period - REGULATION_QUARTERS)
    }
}

/// Splits `target` over four quarters, remainder to the earliest ones.
pub fn quarter_targets(target: u32) -> [u32; 4] {
    let base = target / REGULATION_QUARTERS;
    let rem = target % REGULATION_QUARTERS;
    std::array::from_fn(|i| base + u32::from((i as u32) < rem))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodClock {
    targets: Vec<u32>,
    /// 1-based.
    period: u32,
    billed_in_period: u32,
    billed_total: u32,
    target_total: u32,
    overtimes: u32,
    opening_winner: TeamSide,
}

impl PeriodClock {
    pub fn new(target_events: u32, opening_winner: TeamSide) -> Self {
        Self {
            targets: quarter_targets(target_events).to_vec(),
            period: 1,
            billed_in_period: 0,
            billed_total: 0,
            target_total: target_events,
            overtimes: 0,
            opening_winner,
        }
    }

    pub fn period(&self) -> u32 {
        self.period
    }

    pub fn label(&self) -> String {
        period_label(self.period)
    }

    pub fn overtimes(&self) -> u32 {
        self.overtimes
    }

    pub fn targets(&self) -> &[u32] {
        &self.targets
    }

    pub fn billed_total(&self) -> u32 {
        self.billed_total
    }

    pub fn billed_in_period(&self) -> u32 {
        self.billed_in_period
    }

    /// Budget left overall; the game loop runs while this holds.
    pub fn is_running(&self) -> bool {
        self.billed_total < self.target_total
    }

    fn current_target(&self) -> u32 {
        self.targets
            .get(self.period as usize - 1)
            .copied()
            .unwrap_or_default()
    }

    /// Bills `added` lines against the current period and returns the
    /// units actually billed.
    pub fn bill(&mut self, added: u32, ended_with_shot: bool) -> u32 {
        if added == 0 {
            return 0;
        }
        let target = self.current_target();
        let mut bill = added.min(target.saturating_sub(self.billed_in_period));
        if self.period >= REGULATION_QUARTERS
            && !ended_with_shot
            && self.billed_in_period + bill >= target
        {
            bill = target.saturating_sub(self.billed_in_period + 1);
        }
        self.billed_in_period += bill;
        self.billed_total += bill;
        bill
    }

    /// Quarters 1-3 close on a shot attempt once their budget is spent.
    pub fn quarter_complete(&self, ended_with_shot: bool) -> bool {
        self.period < REGULATION_QUARTERS
            && ended_with_shot
            && self.billed_in_period >= self.current_target()
    }

    /// Moves to the next quarter and returns who inbounds first:
    /// the opening jump winner in Q1/Q3, the other team in Q2/Q4.
    pub fn advance_quarter(&mut self) -> TeamSide {
        self.period += 1;
        self.billed_in_period = 0;
        if self.period % 2 == 1 {
            self.opening_winner
        } else {
            self.opening_winner.other()
        }
    }

    /// Regulation (or the latest overtime) has used its whole budget.
    pub fn budget_spent(&self) -> bool {
        self.billed_total >= self.target_total && self.period >= REGULATION_QUARTERS
    }

    /// Appends an overtime budget of `Q1 / divisor` (at least 1), moves into
    /// it and returns its number.
    pub fn add_overtime(&mut self, divisor: u32) -> u32 {
        let first = self.targets.first().copied().unwrap_or_default();
        let cap = (first / divisor.max(1)).max(1);
        self.overtimes += 1;
        self.target_total += cap;
        self.targets.push(cap);
        self.billed_in_period = 0;
        self.period += 1;
        self.overtimes
    }
}
