//! Draw results: groups, qualifying phases and knockout brackets. These are
//! computed values; persisting them is up to the caller.

use serde::{Deserialize, Serialize};

use crate::models::standings::GroupId;
use crate::models::team::{Team, TeamId};

/// One group produced by the group-stage draw.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DrawnGroup {
    pub label: String,
    /// Sorted by bombo, pot 1 first.
    pub teams: Vec<Team>,
}

/// A side of a qualifying matchup: a drawn team, or the winner of an earlier
/// matchup that has not been played yet.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum QualifyingSlot {
    Team { team: Team },
    Placeholder { label: String },
}

impl QualifyingSlot {
    /// Text used when this slot appears inside a later placeholder.
    pub fn display_name(&self) -> String {
        match self {
            QualifyingSlot::Team { team } => team.display_name(),
            QualifyingSlot::Placeholder { label } => label.clone(),
        }
    }

    pub fn team_id(&self) -> Option<TeamId> {
        match self {
            QualifyingSlot::Team { team } => Some(team.id),
            QualifyingSlot::Placeholder { .. } => None,
        }
    }
}

/// One matchup of a qualifying phase.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QualifyingMatchup {
    pub id: String,
    pub match_number: usize,
    pub phase: u8,
    pub first: QualifyingSlot,
    pub second: QualifyingSlot,
    pub winner_placeholder: String,
}

/// Team and matchup counts per phase, for display.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct DrawSummary {
    pub total_teams: usize,
    pub phase1_teams: usize,
    pub phase2_teams: usize,
    pub phase3_teams: usize,
    pub phase1_matches: usize,
    pub phase2_matches: usize,
    pub phase3_matches: usize,
    pub qualified_to_group_stage: usize,
}

/// The complete three-phase qualifying draw.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QualifyingDraw {
    pub phase1: Vec<QualifyingMatchup>,
    pub phase2: Vec<QualifyingMatchup>,
    pub phase3: Vec<QualifyingMatchup>,
    pub summary: DrawSummary,
}

/// A team that reached the knockout stage from a group.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct KnockoutEntrant {
    pub tournament_team_id: TeamId,
    pub group_id: GroupId,
    pub group_label: String,
    /// 1 for group winners, 2 for runners-up.
    pub position: u8,
}

/// Group winners and runners-up, in group order.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct QualifiedTeams {
    pub first_place: Vec<KnockoutEntrant>,
    pub second_place: Vec<KnockoutEntrant>,
}

/// A first-round pairing of a group winner and a runner-up.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Matchup {
    pub id: String,
    pub first: KnockoutEntrant,
    pub second: KnockoutEntrant,
}

/// What feeds a bracket matchup.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Feed {
    /// First round: two known teams.
    Teams {
        first: KnockoutEntrant,
        second: KnockoutEntrant,
    },
    /// Later rounds: the winners of two earlier matchups.
    Winners { from: [String; 2] },
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct BracketMatchup {
    pub id: String,
    pub feed: Feed,
}

impl BracketMatchup {
    /// Source matchup ids, empty for first-round matchups.
    pub fn from(&self) -> &[String] {
        match &self.feed {
            Feed::Teams { .. } => &[],
            Feed::Winners { from } => from,
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Round {
    pub name: String,
    pub matchups: Vec<BracketMatchup>,
}

/// Shape of a single-elimination bracket, first round to final.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Bracket {
    pub rounds: Vec<Round>,
}

impl Bracket {
    pub fn matchup(&self, id: &str) -> Option<&BracketMatchup> {
        self.rounds
            .iter()
            .flat_map(|r| r.matchups.iter())
            .find(|m| m.id == id)
    }
}

/// A later-round matchup with whatever sides are already known.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ResolvedMatchup {
    pub id: String,
    pub first: Option<TeamId>,
    pub second: Option<TeamId>,
}
