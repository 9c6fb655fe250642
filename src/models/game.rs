//! Match (game) records and the stage context each one belongs to.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::error::TournamentError;
use crate::models::standings::GroupId;
use crate::models::team::TeamId;
use crate::models::tie::{Leg, TieId, TieStage};
use crate::models::tournament::TournamentId;

/// Unique identifier for a match.
pub type MatchId = Uuid;

/// Group-stage match days run from 1 to 6.
pub const MATCH_DAYS: std::ops::RangeInclusive<u8> = 1..=6;

/// Highest goal count accepted for one side of a match or a shootout.
pub const MAX_GOALS: u32 = 99;

pub fn ensure_goals_in_range(goals: u32) -> Result<(), TournamentError> {
    if goals > MAX_GOALS {
        return Err(TournamentError::GoalsOutOfRange(goals));
    }
    Ok(())
}

#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    #[default]
    Pending,
    Finished,
    Cancelled,
}

/// Stage kind as sent by callers, before the stage-specific fields are checked.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageKind {
    GroupStage,
    QualifyingStage,
    KnockoutStage,
}

impl StageKind {
    pub fn label(self) -> &'static str {
        match self {
            StageKind::GroupStage => "group stage",
            StageKind::QualifyingStage => "qualifying stage",
            StageKind::KnockoutStage => "knockout stage",
        }
    }

    /// Whether a tie of `stage` can host matches of this kind.
    pub fn fits(self, stage: TieStage) -> bool {
        matches!(
            (self, stage),
            (StageKind::QualifyingStage, TieStage::Qualifying(_))
                | (StageKind::KnockoutStage, TieStage::Knockout(_))
        )
    }
}

/// The one stage context a match belongs to, with exactly the fields that
/// context needs.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "stage")]
pub enum MatchStage {
    GroupStage { group_id: GroupId, match_day: u8 },
    QualifyingStage { tie_id: TieId, match_type: Leg },
    KnockoutStage { tie_id: TieId, match_type: Leg },
}

impl MatchStage {
    pub fn kind(&self) -> StageKind {
        match self {
            MatchStage::GroupStage { .. } => StageKind::GroupStage,
            MatchStage::QualifyingStage { .. } => StageKind::QualifyingStage,
            MatchStage::KnockoutStage { .. } => StageKind::KnockoutStage,
        }
    }

    pub fn tie(&self) -> Option<(TieId, Leg)> {
        match *self {
            MatchStage::GroupStage { .. } => None,
            MatchStage::QualifyingStage { tie_id, match_type }
            | MatchStage::KnockoutStage { tie_id, match_type } => Some((tie_id, match_type)),
        }
    }

    pub fn group(&self) -> Option<GroupId> {
        match *self {
            MatchStage::GroupStage { group_id, .. } => Some(group_id),
            _ => None,
        }
    }
}

/// Creation input for a match, as received from callers. Stage-specific fields
/// are optional here; validation turns them into a [`MatchStage`].
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct NewMatch {
    pub stage: StageKind,
    #[serde(default)]
    pub group_id: Option<GroupId>,
    #[serde(default)]
    pub match_day: Option<u8>,
    #[serde(default)]
    pub tie_id: Option<TieId>,
    #[serde(default)]
    pub match_type: Option<Leg>,
    pub home_team_id: TeamId,
    pub away_team_id: TeamId,
    pub match_date: DateTime<Utc>,
    pub stadium: String,
}

/// Result submitted for a match. Penalties only matter for the deciding leg of
/// a level tie.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub home_goals: Option<u32>,
    pub away_goals: Option<u32>,
    pub status: MatchStatus,
    #[serde(default)]
    pub first_team_penalty_goals: Option<u32>,
    #[serde(default)]
    pub second_team_penalty_goals: Option<u32>,
}

impl MatchResult {
    pub fn finished(home_goals: u32, away_goals: u32) -> Self {
        Self {
            home_goals: Some(home_goals),
            away_goals: Some(away_goals),
            status: MatchStatus::Finished,
            first_team_penalty_goals: None,
            second_team_penalty_goals: None,
        }
    }

    pub fn with_penalties(mut self, first_team: u32, second_team: u32) -> Self {
        self.first_team_penalty_goals = Some(first_team);
        self.second_team_penalty_goals = Some(second_team);
        self
    }
}

/// A single match between a home and an away team.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GameMatch {
    pub id: MatchId,
    pub tournament_id: TournamentId,
    pub stage: MatchStage,
    pub home_team_id: TeamId,
    pub away_team_id: TeamId,
    /// None if not yet played.
    pub home_goals: Option<u32>,
    pub away_goals: Option<u32>,
    pub match_date: DateTime<Utc>,
    pub stadium: String,
    pub status: MatchStatus,
}

impl GameMatch {
    pub fn new(
        tournament_id: TournamentId,
        stage: MatchStage,
        home_team_id: TeamId,
        away_team_id: TeamId,
        match_date: DateTime<Utc>,
        stadium: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            tournament_id,
            stage,
            home_team_id,
            away_team_id,
            home_goals: None,
            away_goals: None,
            match_date,
            stadium: stadium.into(),
            status: MatchStatus::Pending,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.status == MatchStatus::Finished
    }

    pub fn involves(&self, team_id: TeamId) -> bool {
        self.home_team_id == team_id || self.away_team_id == team_id
    }

    /// Both scores, if the match has them.
    pub fn score(&self) -> Option<(u32, u32)> {
        self.home_goals.zip(self.away_goals)
    }

    /// Goals scored and conceded by `team_id`, if it played and scores exist.
    pub fn goals_of(&self, team_id: TeamId) -> Option<(u32, u32)> {
        let (home, away) = self.score()?;
        if team_id == self.home_team_id {
            Some((home, away))
        } else if team_id == self.away_team_id {
            Some((away, home))
        } else {
            None
        }
    }
}
