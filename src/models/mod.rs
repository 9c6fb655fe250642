//! Data structures for the football tournament: teams, groups, ties, matches, draws.

mod draw;
mod error;
mod game;
mod standings;
mod team;
mod tie;
mod tournament;

pub use draw::{
    Bracket, BracketMatchup, DrawSummary, DrawnGroup, Feed, KnockoutEntrant, Matchup,
    QualifiedTeams, QualifyingDraw, QualifyingMatchup, QualifyingSlot, ResolvedMatchup, Round,
};
pub use error::{ErrorKind, Result, TournamentError};
pub use game::{
    ensure_goals_in_range, GameMatch, MatchId, MatchResult, MatchStage, MatchStatus, NewMatch, StageKind,
    MATCH_DAYS, MAX_GOALS,
};
pub use standings::{group_label, Group, GroupClassificationRow, GroupId, GroupStandings, Outcome};
pub use team::{Bombo, Country, NewTeam, QualifyingRound, Team, TeamId};
pub use tie::{KnockoutRound, Leg, NewTie, PenaltyGoals, Tie, TieId, TieStage, TieState};
pub use tournament::{Tournament, TournamentId};
