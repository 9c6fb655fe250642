//! Qualifying and knockout ties: a matchup between two teams over one or two legs.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::team::{QualifyingRound, TeamId};
use crate::models::tournament::TournamentId;

/// Unique identifier for a tie.
pub type TieId = Uuid;

/// Knockout round of the tournament proper.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KnockoutRound {
    RoundOf16,
    QuarterFinal,
    SemiFinal,
    Final,
}

/// Which stage a tie belongs to.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "round")]
pub enum TieStage {
    Qualifying(QualifyingRound),
    Knockout(KnockoutRound),
}

impl TieStage {
    pub fn is_final(self) -> bool {
        matches!(self, TieStage::Knockout(KnockoutRound::Final))
    }
}

/// One leg of a tie, as carried by a match's `match_type`.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Leg {
    FirstLeg,
    SecondLeg,
    SingleMatch,
}

impl fmt::Display for Leg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Leg::FirstLeg => "first leg",
            Leg::SecondLeg => "second leg",
            Leg::SingleMatch => "single match",
        };
        f.write_str(s)
    }
}

/// Penalty shootout goals, in first/second team order.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct PenaltyGoals {
    pub first_team: u32,
    pub second_team: u32,
}

impl PenaltyGoals {
    pub fn new(first_team: u32, second_team: u32) -> Self {
        Self {
            first_team,
            second_team,
        }
    }
}

/// Where a tie stands. Derived from the tie's fields, never stored.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieState {
    AwaitingFirstLeg,
    AwaitingSecondLeg,
    /// Deciding leg played and aggregate differs; winner not yet written.
    AggregateDecided,
    PenaltiesRequired,
    Completed,
}

/// Creation input for a tie.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct NewTie {
    pub stage: TieStage,
    pub first_team_id: TeamId,
    pub second_team_id: TeamId,
    /// Defaults to true for the final and false elsewhere.
    #[serde(default)]
    pub is_single_match: Option<bool>,
}

/// A qualifying or knockout tie. First/second identity is fixed at creation.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Tie {
    pub id: TieId,
    pub tournament_id: TournamentId,
    pub stage: TieStage,
    pub first_team_id: TeamId,
    pub second_team_id: TeamId,
    /// None until a leg has been recorded.
    pub first_team_aggregate_goals: Option<u32>,
    pub second_team_aggregate_goals: Option<u32>,
    pub first_leg_played: bool,
    pub second_leg_played: bool,
    pub penalties_played: bool,
    pub first_team_penalty_goals: Option<u32>,
    pub second_team_penalty_goals: Option<u32>,
    pub winner_team_id: Option<TeamId>,
    pub is_completed: bool,
    pub is_single_match: bool,
}

impl Tie {
    pub fn new(
        tournament_id: TournamentId,
        stage: TieStage,
        first_team_id: TeamId,
        second_team_id: TeamId,
        is_single_match: bool,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            tournament_id,
            stage,
            first_team_id,
            second_team_id,
            first_team_aggregate_goals: None,
            second_team_aggregate_goals: None,
            first_leg_played: false,
            second_leg_played: false,
            penalties_played: false,
            first_team_penalty_goals: None,
            second_team_penalty_goals: None,
            winner_team_id: None,
            is_completed: false,
            is_single_match,
        }
    }

    pub fn involves(&self, team_id: TeamId) -> bool {
        self.first_team_id == team_id || self.second_team_id == team_id
    }

    /// Same two teams, in either order.
    pub fn same_pair(&self, a: TeamId, b: TeamId) -> bool {
        (self.first_team_id == a && self.second_team_id == b)
            || (self.first_team_id == b && self.second_team_id == a)
    }

    /// The other team of the tie. Caller guarantees `team_id` is one side.
    pub fn opponent_of(&self, team_id: TeamId) -> TeamId {
        if self.first_team_id == team_id {
            self.second_team_id
        } else {
            self.first_team_id
        }
    }

    /// True once the leg that decides the aggregate has been played.
    pub fn deciding_leg_played(&self) -> bool {
        if self.is_single_match {
            self.first_team_aggregate_goals.is_some()
        } else {
            self.second_leg_played
        }
    }

    pub fn aggregate(&self) -> (u32, u32) {
        (
            self.first_team_aggregate_goals.unwrap_or(0),
            self.second_team_aggregate_goals.unwrap_or(0),
        )
    }

    pub fn state(&self) -> TieState {
        if self.is_completed {
            return TieState::Completed;
        }
        if self.deciding_leg_played() {
            let (first, second) = self.aggregate();
            return if first == second {
                TieState::PenaltiesRequired
            } else {
                TieState::AggregateDecided
            };
        }
        if self.first_leg_played {
            TieState::AwaitingSecondLeg
        } else {
            TieState::AwaitingFirstLeg
        }
    }
}
