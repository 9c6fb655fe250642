//! Groups and group classification rows.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::error::TournamentError;
use crate::models::team::TeamId;

/// Unique identifier for a group.
pub type GroupId = Uuid;

/// Label of the group at `index` in draw order: A, B, C, ...
pub fn group_label(index: usize) -> String {
    match u8::try_from(index) {
        Ok(i) if i < 26 => char::from(b'A' + i).to_string(),
        _ => format!("G{}", index + 1),
    }
}

/// A group of the group stage.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub id: GroupId,
    pub label: String,
    pub team_ids: Vec<TeamId>,
}

impl Group {
    pub fn new(label: impl Into<String>, team_ids: Vec<TeamId>) -> Self {
        Self {
            id: Uuid::new_v4(),
            label: label.into(),
            team_ids,
        }
    }

    pub fn contains(&self, team_id: TeamId) -> bool {
        self.team_ids.contains(&team_id)
    }
}

/// Outcome of a match from one side's point of view.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Outcome {
    Win,
    Draw,
    Loss,
}

impl Outcome {
    pub fn from_goals(goals_for: u32, goals_against: u32) -> Self {
        match goals_for.cmp(&goals_against) {
            std::cmp::Ordering::Greater => Outcome::Win,
            std::cmp::Ordering::Equal => Outcome::Draw,
            std::cmp::Ordering::Less => Outcome::Loss,
        }
    }

    pub fn points(self) -> u32 {
        match self {
            Outcome::Win => 3,
            Outcome::Draw => 1,
            Outcome::Loss => 0,
        }
    }
}

/// A team's row in its group table. Unique per (team, group).
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct GroupClassificationRow {
    pub tournament_team_id: TeamId,
    pub group_id: GroupId,
    pub matches_played: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    /// Always `goals_for - goals_against`.
    pub goal_difference: i32,
    /// Always `3 * wins + draws`.
    pub points: u32,
}

impl GroupClassificationRow {
    /// Zeroed row, created when the team is placed in the group.
    pub fn new(tournament_team_id: TeamId, group_id: GroupId) -> Self {
        Self {
            tournament_team_id,
            group_id,
            ..Self::default()
        }
    }

    /// Add one played match. Counters and derived fields move together; a
    /// total that no longer fits leaves the row unchanged.
    pub fn record(&mut self, goals_for: u32, goals_against: u32) -> Result<(), TournamentError> {
        let total_for = self
            .goals_for
            .checked_add(goals_for)
            .ok_or(TournamentError::GoalTotalOverflow)?;
        let total_against = self
            .goals_against
            .checked_add(goals_against)
            .ok_or(TournamentError::GoalTotalOverflow)?;
        let goal_difference = i32::try_from(i64::from(total_for) - i64::from(total_against))
            .map_err(|_| TournamentError::GoalTotalOverflow)?;

        let outcome = Outcome::from_goals(goals_for, goals_against);
        self.matches_played += 1;
        match outcome {
            Outcome::Win => self.wins += 1,
            Outcome::Draw => self.draws += 1,
            Outcome::Loss => self.losses += 1,
        }
        self.goals_for = total_for;
        self.goals_against = total_against;
        self.points += outcome.points();
        self.goal_difference = goal_difference;
        Ok(())
    }
}

/// A group together with its (not necessarily ranked) rows.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GroupStandings {
    pub group_id: GroupId,
    pub label: String,
    pub rows: Vec<GroupClassificationRow>,
}
