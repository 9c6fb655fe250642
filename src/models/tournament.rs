//! Tournament: one edition with its teams, groups, standings, ties and matches.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::error::TournamentError;
use crate::models::game::{GameMatch, MatchId};
use crate::models::standings::{Group, GroupClassificationRow, GroupId};
use crate::models::team::{NewTeam, Team, TeamId};
use crate::models::tie::{Tie, TieId};

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

/// Full state of one tournament edition.
///
/// The draw, standings and advancement functions work on slices of these
/// records; the operations re-exported from [`crate::logic`] (`create_tie`,
/// `submit_match_result`, ...) read a tournament and commit to it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub name: String,
    pub year: i32,
    pub teams: Vec<Team>,
    pub groups: Vec<Group>,
    /// One row per (team, group) once the group draw has run.
    pub standings: Vec<GroupClassificationRow>,
    pub ties: Vec<Tie>,
    pub matches: Vec<GameMatch>,
}

impl Tournament {
    /// Create an empty tournament edition.
    pub fn new(name: impl Into<String>, year: i32) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            year,
            teams: Vec::new(),
            groups: Vec::new(),
            standings: Vec::new(),
            ties: Vec::new(),
            matches: Vec::new(),
        }
    }

    /// Register a team. Names are unique per country (case-insensitive) and
    /// there is at most one current champion.
    pub fn register_team(&mut self, new: NewTeam) -> Result<TeamId, TournamentError> {
        new.validate()?;
        let name = new.name.trim();
        let is_duplicate = self
            .teams
            .iter()
            .any(|t| t.country == new.country && t.name.eq_ignore_ascii_case(name));
        if is_duplicate {
            return Err(TournamentError::DuplicateTeam(name.to_string()));
        }
        if new.is_current_champion && self.teams.iter().any(|t| t.is_current_champion) {
            return Err(TournamentError::MultipleChampions);
        }
        let team = Team::from_new(self.id, new);
        let id = team.id;
        self.teams.push(team);
        Ok(id)
    }

    /// Register several teams; either all are added or none.
    pub fn register_teams(&mut self, teams: Vec<NewTeam>) -> Result<Vec<TeamId>, TournamentError> {
        let mut staged = self.clone();
        let ids = teams
            .into_iter()
            .map(|t| staged.register_team(t))
            .collect::<Result<Vec<_>, _>>()?;
        *self = staged;
        Ok(ids)
    }

    pub fn team(&self, id: TeamId) -> Result<&Team, TournamentError> {
        self.teams
            .iter()
            .find(|t| t.id == id)
            .ok_or(TournamentError::not_found("team", id))
    }

    pub fn team_mut(&mut self, id: TeamId) -> Result<&mut Team, TournamentError> {
        self.teams
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(TournamentError::not_found("team", id))
    }

    pub fn group(&self, id: GroupId) -> Result<&Group, TournamentError> {
        self.groups
            .iter()
            .find(|g| g.id == id)
            .ok_or(TournamentError::not_found("group", id))
    }

    pub fn tie(&self, id: TieId) -> Result<&Tie, TournamentError> {
        self.ties
            .iter()
            .find(|t| t.id == id)
            .ok_or(TournamentError::not_found("tie", id))
    }

    pub fn tie_mut(&mut self, id: TieId) -> Result<&mut Tie, TournamentError> {
        self.ties
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(TournamentError::not_found("tie", id))
    }

    pub fn game(&self, id: MatchId) -> Result<&GameMatch, TournamentError> {
        self.matches
            .iter()
            .find(|m| m.id == id)
            .ok_or(TournamentError::not_found("match", id))
    }

    /// The standings row of a team in a group.
    pub fn standings_row(
        &self,
        team_id: TeamId,
        group_id: GroupId,
    ) -> Result<&GroupClassificationRow, TournamentError> {
        self.standings
            .iter()
            .find(|r| r.tournament_team_id == team_id && r.group_id == group_id)
            .ok_or(TournamentError::TeamNotInGroup(team_id))
    }

    /// Teams still taking part.
    pub fn participating_teams(&self) -> Vec<Team> {
        self.teams
            .iter()
            .filter(|t| t.is_participating)
            .cloned()
            .collect()
    }
}
