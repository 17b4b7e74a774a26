use serde::{Deserialize, Serialize};

/// Field goal value of a shot from the floor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShotValue {
    Two,
    Three,
}

impl ShotValue {
    pub fn points(self) -> u32 {
        match self {
            ShotValue::Two => 2,
            ShotValue::Three => 3,
        }
    }

    /// Free throws awarded on a shooting foul for this attempt.
    pub fn free_throws(self) -> u32 {
        self.points()
    }
}

/// Box score counters shared by the team aggregate and every player.
///
/// Serialized field names are the ones the ground truth report uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StatLine {
    pub points: u32,
    pub assists: u32,
    pub rebounds: u32,
    pub defensive_rebounds: u32,
    pub offensive_rebounds: u32,
    pub fouls: u32,
    pub steals: u32,
    pub blocks: u32,
    pub turnovers: u32,
    #[serde(rename = "2pt_shots_made")]
    pub two_pt_made: u32,
    #[serde(rename = "2pt_shots_attempted")]
    pub two_pt_attempted: u32,
    #[serde(rename = "3pt_shots_made")]
    pub three_pt_made: u32,
    #[serde(rename = "3pt_shots_attempted")]
    pub three_pt_attempted: u32,
    pub ft_made: u32,
    pub ft_attempted: u32,
}

/// Number of serialized fields in a [`StatLine`].
pub const STAT_FIELD_COUNT: usize = 15;

impl StatLine {
    pub fn made_mut(&mut self, value: ShotValue) -> &mut u32 {
        match value {
            ShotValue::Two => &mut self.two_pt_made,
            ShotValue::Three => &mut self.three_pt_made,
        }
    }

    pub fn attempted_mut(&mut self, value: ShotValue) -> &mut u32 {
        match value {
            ShotValue::Two => &mut self.two_pt_attempted,
            ShotValue::Three => &mut self.three_pt_attempted,
        }
    }

    pub fn made(&self, value: ShotValue) -> u32 {
        match value {
            ShotValue::Two => self.two_pt_made,
            ShotValue::Three => self.three_pt_made,
        }
    }

    pub fn attempted(&self, value: ShotValue) -> u32 {
        match value {
            ShotValue::Two => self.two_pt_attempted,
            ShotValue::Three => self.three_pt_attempted,
        }
    }

    /// Made field goal: points, make and attempt.
    pub fn add_field_goal(&mut self, value: ShotValue) {
        self.points += value.points();
        *self.made_mut(value) += 1;
        *self.attempted_mut(value) += 1;
    }

    pub fn add_field_goal_attempt(&mut self, value: ShotValue) {
        *self.attempted_mut(value) += 1;
    }

    /// Removes a made field goal, clamping every counter at zero.
    pub fn remove_field_goal(&mut self, value: ShotValue) {
        self.points = self.points.saturating_sub(value.points());
        let made = self.made_mut(value);
        *made = made.saturating_sub(1);
        let attempted = self.attempted_mut(value);
        *attempted = attempted.saturating_sub(1);
        self.restore_shot_order(value);
    }

    pub fn add_free_throw(&mut self, made: bool) {
        self.ft_attempted += 1;
        if made {
            self.ft_made += 1;
            self.points += 1;
        }
    }

    pub fn add_rebound(&mut self, offensive: bool) {
        self.rebounds += 1;
        if offensive {
            self.offensive_rebounds += 1;
        } else {
            self.defensive_rebounds += 1;
        }
    }

    pub fn remove_assist(&mut self) {
        self.assists = self.assists.saturating_sub(1);
    }

    /// Keeps `attempted >= made` after a clamped subtraction.
    fn restore_shot_order(&mut self, value: ShotValue) {
        let made = self.made(value);
        let attempted = self.attempted_mut(value);
        if *attempted < made {
            *attempted = made;
        }
    }

    /// Attempted is at least made for every shot category.
    pub fn is_consistent(&self) -> bool {
        self.two_pt_attempted >= self.two_pt_made
            && self.three_pt_attempted >= self.three_pt_made
            && self.ft_attempted >= self.ft_made
    }

    pub fn is_zero(&self) -> bool {
        *self == StatLine::default()
    }

    /// Points implied by the shooting counters.
    pub fn points_from_shots(&self) -> u32 {
        2 * self.two_pt_made + 3 * self.three_pt_made + self.ft_made
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_goal_add_remove() {
        let mut line = StatLine::default();
        line.add_field_goal(ShotValue::Three);
        assert_eq!(line.points, 3);
        assert_eq!(line.three_pt_made, 1);
        assert_eq!(line.three_pt_attempted, 1);

        line.remove_field_goal(ShotValue::Three);
        assert!(line.is_zero());
    }

    #[test]
    fn test_remove_clamps_at_zero() {
        let mut line = StatLine::default();
        line.remove_field_goal(ShotValue::Two);
        line.remove_assist();
        assert!(line.is_zero());
    }

    #[test]
    fn test_remove_keeps_attempts_above_makes() {
        // Running totals that could only arise from a malformed history.
        let mut line = StatLine {
            two_pt_made: 2,
            two_pt_attempted: 0,
            points: 4,
            ..Default::default()
        };
        line.remove_field_goal(ShotValue::Two);
        assert_eq!(line.two_pt_made, 1);
        assert_eq!(line.two_pt_attempted, 1);
        assert!(line.is_consistent());
    }

    #[test]
    fn test_free_throws() {
        let mut line = StatLine::default();
        line.add_free_throw(true);
        line.add_free_throw(false);
        assert_eq!(line.points, 1);
        assert_eq!(line.ft_made, 1);
        assert_eq!(line.ft_attempted, 2);
        assert_eq!(line.points_from_shots(), 1);
    }

    #[test]
    fn test_serialized_field_names() {
        let value = serde_json::to_value(StatLine::default()).unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj.len(), STAT_FIELD_COUNT);
        for key in [
            "points",
            "defensive_rebounds",
            "offensive_rebounds",
            "2pt_shots_made",
            "2pt_shots_attempted",
            "3pt_shots_made",
            "3pt_shots_attempted",
            "ft_made",
            "ft_attempted",
        ] {
            assert!(obj.contains_key(key), "missing {key}");
        }
    }
}
