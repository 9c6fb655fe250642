//! Team, Country, Bombo and the qualifying round a team enters in.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};
use uuid::Uuid;

use crate::models::error::TournamentError;
use crate::models::tournament::TournamentId;

/// Unique identifier for a team registered in a tournament edition.
pub type TeamId = Uuid;

/// Canonical list of countries a team may represent.
///
/// Raw country strings are normalized through [`Country::normalize`] at the
/// boundary; the engine only ever compares these values.
#[derive(
    Clone, Copy, Debug, Eq, Hash, PartialEq, Ord, PartialOrd, Display, EnumString, EnumIter,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Country {
    Argentina,
    #[strum(serialize = "brasil", serialize = "brazil", to_string = "brasil")]
    Brasil,
    Bolivia,
    Chile,
    Colombia,
    Ecuador,
    Paraguay,
    #[strum(serialize = "perú", serialize = "peru", serialize = "perãº", to_string = "perú")]
    Peru,
    Uruguay,
    Venezuela,
}

impl Country {
    /// Parse a raw country name: trims, lowercases and accepts known spelling
    /// and encoding variants.
    pub fn normalize(raw: &str) -> Result<Self, TournamentError> {
        let cleaned = raw.trim().to_lowercase();
        cleaned
            .parse()
            .map_err(|_| TournamentError::UnknownCountry(raw.trim().to_string()))
    }

    pub fn all() -> Vec<Country> {
        Country::iter().collect()
    }
}

impl TryFrom<String> for Country {
    type Error = TournamentError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Country::normalize(&value)
    }
}

impl From<Country> for String {
    fn from(c: Country) -> Self {
        c.to_string()
    }
}

impl Serialize for Country {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Country {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Country::normalize(&raw).map_err(serde::de::Error::custom)
    }
}

/// Seed pot ("bombo") a team is drawn from: 1 is the strongest pot, 4 the weakest.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Bombo(u8);

impl Bombo {
    pub const ALL: [u8; 4] = [1, 2, 3, 4];

    pub fn new(value: u8) -> Result<Self, TournamentError> {
        if Self::ALL.contains(&value) {
            Ok(Self(value))
        } else {
            Err(TournamentError::InvalidBombo(value))
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Bombo {
    type Error = TournamentError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Bombo::new(value)
    }
}

impl From<Bombo> for u8 {
    fn from(b: Bombo) -> Self {
        b.0
    }
}

/// One of the three qualifying rounds. Also used as a team's entry point
/// into the qualifying stage.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum QualifyingRound {
    First = 1,
    Second = 2,
    Third = 3,
}

impl QualifyingRound {
    pub fn number(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for QualifyingRound {
    type Error = TournamentError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(QualifyingRound::First),
            2 => Ok(QualifyingRound::Second),
            3 => Ok(QualifyingRound::Third),
            other => Err(TournamentError::InvalidQualifyingRound(other)),
        }
    }
}

impl From<QualifyingRound> for u8 {
    fn from(r: QualifyingRound) -> Self {
        r.number()
    }
}

/// Registration input for a team. Every field is spelled out; nothing is
/// inherited from other inputs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewTeam {
    pub name: String,
    pub country: Country,
    pub bombo: Bombo,
    #[serde(default)]
    pub ranking: Option<u32>,
    #[serde(default)]
    pub points: u32,
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default)]
    pub is_current_champion: bool,
    #[serde(default)]
    pub is_from_qualifying_stage: bool,
    #[serde(default)]
    pub qualifying_entry_stage: Option<QualifyingRound>,
}

impl NewTeam {
    pub fn new(name: impl Into<String>, country: Country, bombo: Bombo) -> Self {
        Self {
            name: name.into(),
            country,
            bombo,
            ranking: None,
            points: 0,
            logo: None,
            is_current_champion: false,
            is_from_qualifying_stage: false,
            qualifying_entry_stage: None,
        }
    }

    /// Field-level checks that need no other records.
    pub fn validate(&self) -> Result<(), TournamentError> {
        if self.name.trim().is_empty() {
            return Err(TournamentError::EmptyTeamName);
        }
        if self.qualifying_entry_stage.is_some() && !self.is_from_qualifying_stage {
            return Err(TournamentError::EntryStageWithoutQualifying);
        }
        Ok(())
    }
}

/// A team registered in one tournament edition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub tournament_id: TournamentId,
    pub name: String,
    pub country: Country,
    pub bombo: Bombo,
    /// Lower is better; teams without a ranking sort after ranked ones.
    pub ranking: Option<u32>,
    pub points: u32,
    pub logo: Option<String>,
    /// Soft-delete flag: false once the team has lost a tie.
    pub is_participating: bool,
    pub is_current_champion: bool,
    pub is_from_qualifying_stage: bool,
    pub qualifying_entry_stage: Option<QualifyingRound>,
}

impl Team {
    /// Build a team from validated registration input.
    pub fn from_new(tournament_id: TournamentId, new: NewTeam) -> Self {
        Self {
            id: Uuid::new_v4(),
            tournament_id,
            name: new.name.trim().to_string(),
            country: new.country,
            bombo: new.bombo,
            ranking: new.ranking,
            points: new.points,
            logo: new.logo,
            is_participating: true,
            is_current_champion: new.is_current_champion,
            is_from_qualifying_stage: new.is_from_qualifying_stage,
            qualifying_entry_stage: new.qualifying_entry_stage,
        }
    }

    /// Mark the team as no longer taking part. Standings rows that reference
    /// it are kept.
    pub fn eliminate(&mut self) {
        self.is_participating = false;
    }

    /// Name in title case, as used in draw placeholders.
    pub fn display_name(&self) -> String {
        title_case(&self.name)
    }
}

fn title_case(s: &str) -> String {
    s.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
