//! Bulk team registration from CSV.
//!
//! Expected header (only `name`, `country` and `bombo` are required):
//!
//! ```text
//! name,country,bombo,ranking,points,is_current_champion,is_from_qualifying_stage,qualifying_entry_stage,logo
//! ```

use std::io::Read;

use serde::Deserialize;

use crate::models::{Bombo, Country, ErrorKind, NewTeam, QualifyingRound, TournamentError};

#[derive(thiserror::Error, Debug)]
pub enum ImportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("line {line}: {source}")]
    Row {
        line: u64,
        #[source]
        source: TournamentError,
    },
}

impl ImportError {
    /// Malformed CSV is a validation failure; a bad row keeps its own kind.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ImportError::Csv(_) => ErrorKind::Validation,
            ImportError::Row { source, .. } => source.kind(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct TeamRow {
    name: String,
    country: String,
    bombo: u8,
    #[serde(default)]
    ranking: Option<u32>,
    #[serde(default)]
    points: Option<u32>,
    #[serde(default)]
    is_current_champion: Option<bool>,
    #[serde(default)]
    is_from_qualifying_stage: Option<bool>,
    #[serde(default)]
    qualifying_entry_stage: Option<u8>,
    #[serde(default)]
    logo: Option<String>,
}

impl TeamRow {
    fn into_new_team(self) -> Result<NewTeam, TournamentError> {
        let country = Country::normalize(&self.country)?;
        let bombo = Bombo::new(self.bombo)?;
        let qualifying_entry_stage = self
            .qualifying_entry_stage
            .map(QualifyingRound::try_from)
            .transpose()?;
        let team = NewTeam {
            name: self.name.trim().to_string(),
            country,
            bombo,
            ranking: self.ranking,
            points: self.points.unwrap_or(0),
            logo: self.logo.filter(|l| !l.trim().is_empty()),
            is_current_champion: self.is_current_champion.unwrap_or(false),
            is_from_qualifying_stage: self.is_from_qualifying_stage.unwrap_or(false),
            qualifying_entry_stage,
        };
        team.validate()?;
        Ok(team)
    }
}

/// Parse every row into a [`NewTeam`]. Stops at the first bad row.
pub fn read_teams_csv<R: Read>(reader: R) -> Result<Vec<NewTeam>, ImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers = csv_reader.headers()?.clone();

    let mut teams = Vec::new();
    for result in csv_reader.records() {
        let record = result?;
        let line = record.position().map(|p| p.line()).unwrap_or_default();
        let row: TeamRow = record.deserialize(Some(&headers))?;
        let team = row
            .into_new_team()
            .map_err(|source| ImportError::Row { line, source })?;
        teams.push(team);
    }
    log::info!("Read {} teams from CSV", teams.len());
    Ok(teams)
}
