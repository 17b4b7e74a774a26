//! Roster catalog: the teams, head coaches and player names a game can draw from.
//!
//! The catalog is an immutable configuration object handed to the simulator.
//! Nothing here is global; every game borrows the catalog it was built with.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::{CoreError, Result};

/// Minimum roster size (a full starting five).
pub const MIN_ROSTER_SIZE: usize = 5;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TeamProfile {
    pub name: String,
    pub head_coach: String,
    /// Ordered roster. Order is preserved in the output documents.
    pub players: Vec<String>,
}

impl TeamProfile {
    pub fn new(name: &str, head_coach: &str, players: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            head_coach: head_coach.to_string(),
            players: players.iter().map(|p| p.to_string()).collect(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(CoreError::InvalidRoster("team name must not be empty".to_string()));
        }
        if self.players.len() < MIN_ROSTER_SIZE {
            return Err(CoreError::InvalidRoster(format!(
                "{} needs at least {} players, found {}",
                self.name,
                MIN_ROSTER_SIZE,
                self.players.len()
            )));
        }
        let mut seen = HashSet::new();
        for player in &self.players {
            if player.trim().is_empty() {
                return Err(CoreError::InvalidRoster(format!(
                    "{} has a player with an empty name",
                    self.name
                )));
            }
            if !seen.insert(player.as_str()) {
                return Err(CoreError::InvalidRoster(format!(
                    "{} lists {} twice",
                    self.name, player
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RosterCatalog {
    pub teams: Vec<TeamProfile>,
}

impl RosterCatalog {
    pub fn new(teams: Vec<TeamProfile>) -> Result<Self> {
        let catalog = Self { teams };
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let catalog: Self = serde_json::from_str(json)?;
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn validate(&self) -> Result<()> {
        if self.teams.len() < 2 {
            return Err(CoreError::InvalidRoster(format!(
                "catalog needs at least 2 teams, found {}",
                self.teams.len()
            )));
        }
        let mut names = HashSet::new();
        for team in &self.teams {
            team.validate()?;
            if !names.insert(team.name.as_str()) {
                return Err(CoreError::InvalidRoster(format!(
                    "team {} is listed twice",
                    team.name
                )));
            }
        }
        Ok(())
    }

    pub fn team(&self, name: &str) -> Option<&TeamProfile> {
        self.teams.iter().find(|t| t.name == name)
    }

    pub fn team_names(&self) -> impl Iterator<Item = &str> {
        self.teams.iter().map(|t| t.name.as_str())
    }
}

impl Default for RosterCatalog {
    fn default() -> Self {
        Self {
            teams: vec![
                TeamProfile::new(
                    "Israel",
                    "Ariel Beit-Halahmy",
                    &[
                        "Khadeen Carrington",
                        "Itay Segev",
                        "Deni Avdija",
                        "Roman Sorkin",
                        "Bar Timor",
                        "Yam Madar",
                        "Rafi Menco",
                        "Nimrod Levi",
                        "Ethan Burg",
                        "Tomer Ginat",
                        "Yovel Zoosman",
                        "Guy Palatin",
                    ],
                ),
                TeamProfile::new(
                    "Iceland",
                    "Craig Pedersen",
                    &[
                        "Aegir Steinarsson",
                        "Hilmar Henningsson",
                        "Jon Axel Gudmundsson",
                        "Elvar Fridriksson",
                        "Almar Orri Atlason",
                        "Karl Jonsson",
                        "Kristinn Palsson",
                        "Martin Hermannsson",
                        "Orri Gunnarsson",
                        "Tryggvi Hlinason",
                        "Styrmir Thrastarson",
                        "Sigtryggur Bjornsson",
                    ],
                ),
                TeamProfile::new(
                    "Poland",
                    "Igor Milicic",
                    &[
                        "Andrzej Pluta",
                        "Aleksander Balcerowski",
                        "Michal Sokolowski",
                        "Jordan Loyd",
                        "Mateusz Ponitka",
                        "Szymon Zapala",
                        "Aleksander Dziewa",
                        "Tomasz Gielo",
                        "Kamil Laczynski",
                        "Dominik Olejniczak",
                        "Michal Michalak",
                        "Przemyslaw Zolnierewicz",
                    ],
                ),
                TeamProfile::new(
                    "France",
                    "Frederic Fauthoux",
                    &[
                        "Sylvain Francisco",
                        "Elie Okobo",
                        "Nadir Hifi",
                        "Timothe Luwawu-Cabarrot",
                        "Guerschon Yabusele",
                        "Isaia Cordinier",
                        "Theo Maledon",
                        "Mouhammadou Jaiteh",
                        "Zaccharie Risacher",
                        "Jaylen Hoard",
                        "Alexandre Sarr",
                        "Bilal Coulibaly",
                    ],
                ),
                TeamProfile::new(
                    "Belgium",
                    "Dario Gjergja",
                    &[
                        "Emmanuel Lecomte",
                        "Jean-Marc Mwema",
                        "Hans Vanwijn",
                        "Loic Schwartz",
                        "Kevin Tumba",
                        "Ismael Bako",
                        "Andy van Vliet",
                        "Siebe Ledegen",
                        "Niels Van Den Eynde",
                        "Joppe Mennes",
                        "Godwin Tshimanga",
                        "Mamadou Guisse",
                    ],
                ),
                TeamProfile::new(
                    "Slovenia",
                    "Aleksander Sekulic",
                    &[
                        "Martin Krampelj",
                        "Mark Padjen",
                        "Aleksej Nikolic",
                        "Klemen Prepelic",
                        "Edo Muric",
                        "Rok Radovic",
                        "Robert Jurkovic",
                        "Gregor Hrovat",
                        "Luka Scuka",
                        "Alen Omic",
                        "Leon Stergar",
                        "Luka Doncic",
                    ],
                ),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_is_valid() {
        let catalog = RosterCatalog::default();
        assert!(catalog.validate().is_ok());
        assert_eq!(catalog.teams.len(), 6);
        for team in &catalog.teams {
            assert_eq!(team.players.len(), 12, "{} roster size", team.name);
        }
    }

    #[test]
    fn test_rejects_short_roster() {
        let catalog = RosterCatalog {
            teams: vec![
                TeamProfile::new("A", "Coach A", &["a1", "a2", "a3", "a4"]),
                TeamProfile::new("B", "Coach B", &["b1", "b2", "b3", "b4", "b5"]),
            ],
        };
        assert!(matches!(catalog.validate(), Err(CoreError::InvalidRoster(_))));
    }

    #[test]
    fn test_rejects_duplicate_player() {
        let team = TeamProfile::new("A", "Coach", &["x", "y", "z", "w", "x"]);
        assert!(team.validate().is_err());
    }

    #[test]
    fn test_rejects_single_team_catalog() {
        let catalog = RosterCatalog {
            teams: vec![TeamProfile::new("A", "Coach", &["1", "2", "3", "4", "5"])],
        };
        assert!(catalog.validate().is_err());
    }

    #[test]
    fn test_from_json_roundtrip() {
        let json = serde_json::to_string(&RosterCatalog::default()).unwrap();
        let parsed = RosterCatalog::from_json(&json).unwrap();
        assert_eq!(parsed, RosterCatalog::default());
        assert!(parsed.team("Slovenia").is_some());
        assert!(parsed.team("Narnia").is_none());
    }
}
