//! Errors raised by the tournament engine.

use std::fmt;

use uuid::Uuid;

use crate::models::team::TeamId;
use crate::models::tie::Leg;

/// Broad category of a [`TournamentError`], for callers that map errors onto
/// their own transport (HTTP status codes, CLI exit codes, ...).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    /// Malformed or inconsistent input.
    Validation,
    /// Uniqueness violation against records that already exist.
    Conflict,
    /// Illegal state transition.
    State,
    /// The group draw found no valid distribution within its budget.
    Exhaustion,
    /// A referenced record does not exist in the tournament.
    NotFound,
}

/// Errors that can occur during tournament operations.
#[derive(thiserror::Error, Clone, Debug, Eq, PartialEq)]
pub enum TournamentError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("field {field} is not allowed for {stage} matches")]
    ForbiddenField {
        field: &'static str,
        stage: &'static str,
    },

    #[error("a team cannot play against itself")]
    SelfPairing,

    #[error("team {0} does not belong to this tournament")]
    TeamNotInTournament(TeamId),

    #[error("team {0} is not a member of the referenced group")]
    TeamNotInGroup(TeamId),

    #[error("team {0} is not one of the two teams of the referenced tie")]
    TeamNotInTie(TeamId),

    #[error("team {0} has been eliminated")]
    TeamEliminated(TeamId),

    #[error("team {0} did not enter through the qualifying stage")]
    NotAQualifier(TeamId),

    #[error("bombo must be one of 1, 2, 3 or 4 (got {0})")]
    InvalidBombo(u8),

    #[error("qualifying round must be one of 1, 2 or 3 (got {0})")]
    InvalidQualifyingRound(u8),

    #[error("match day must be between 1 and 6 (got {0})")]
    InvalidMatchDay(u8),

    #[error("unknown country: {0}")]
    UnknownCountry(String),

    #[error("team name must not be empty")]
    EmptyTeamName,

    #[error("a qualifying entry stage requires the team to come from the qualifying stage")]
    EntryStageWithoutQualifying,

    #[error("only one team can be the current champion")]
    MultipleChampions,

    #[error("{context} requires exactly {expected} teams, but found {found}")]
    WrongTeamCount {
        context: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("uneven number of first ({first}) and second ({second}) place teams for knockout draw")]
    UnbalancedKnockoutEntrants { first: usize, second: usize },

    #[error("some groups don't have enough teams for knockout phase: {}", .0.join(", "))]
    GroupsTooSmall(Vec<String>),

    #[error("a bracket needs a power-of-two number of matchups (got {0})")]
    InvalidBracketSize(usize),

    #[error("match type does not fit the referenced tie")]
    MatchTypeMismatch,

    #[error("match stage does not fit the referenced tie")]
    StageMismatch,

    #[error("second leg must reverse the home and away teams of the first leg")]
    HomeAwayNotReversed,

    #[error("goal count must be between 0 and 99 (got {0})")]
    GoalsOutOfRange(u32),

    #[error("goal totals exceed the supported range")]
    GoalTotalOverflow,

    #[error("home and away goals are required to finish a match")]
    MissingScore,

    #[error("match {0} does not belong to this stage record")]
    UnrelatedMatch(Uuid),

    #[error("a matchup between these teams already exists in this stage (regardless of team order)")]
    DuplicateMatchup,

    #[error("team {0} is already participating in another matchup of this stage")]
    TeamAlreadyCommitted(TeamId),

    #[error("a team named {0} from that country is already registered")]
    DuplicateTeam(String),

    #[error("an identical fixture already exists")]
    DuplicateFixture,

    #[error("{0} has already been played")]
    LegAlreadyPlayed(Leg),

    #[error("the first leg has not been played yet")]
    FirstLegNotPlayed,

    #[error("match {0} is already finished")]
    MatchAlreadyFinished(Uuid),

    #[error("match {0} was cancelled")]
    MatchCancelled(Uuid),

    #[error("match {0} is not finished")]
    MatchNotFinished(Uuid),

    #[error("tie is already completed")]
    TieAlreadyCompleted,

    #[error("penalties are not required for this tie")]
    PenaltiesNotRequired,

    #[error("a penalty shootout cannot end level ({0}-{0}); provide valid, non-tied penalty scores")]
    PenaltyShootoutDrawn(u32),

    #[error("groups have already been drawn for this tournament")]
    GroupsAlreadyDrawn,

    #[error("could not generate a valid group stage draw after {attempts} attempts")]
    DrawInfeasible { attempts: usize },

    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: Uuid },
}

impl TournamentError {
    pub fn kind(&self) -> ErrorKind {
        use TournamentError::*;
        match self {
            DuplicateMatchup | TeamAlreadyCommitted(_) | DuplicateTeam(_) | DuplicateFixture => {
                ErrorKind::Conflict
            }
            LegAlreadyPlayed(_)
            | FirstLegNotPlayed
            | MatchAlreadyFinished(_)
            | MatchCancelled(_)
            | MatchNotFinished(_)
            | TieAlreadyCompleted
            | PenaltiesNotRequired
            | PenaltyShootoutDrawn(_)
            | GroupsAlreadyDrawn => ErrorKind::State,
            DrawInfeasible { .. } => ErrorKind::Exhaustion,
            NotFound { .. } => ErrorKind::NotFound,
            _ => ErrorKind::Validation,
        }
    }

    pub(crate) fn not_found(entity: &'static str, id: Uuid) -> Self {
        TournamentError::NotFound { entity, id }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorKind::Validation => "validation",
            ErrorKind::Conflict => "conflict",
            ErrorKind::State => "state",
            ErrorKind::Exhaustion => "exhaustion",
            ErrorKind::NotFound => "not_found",
        };
        f.write_str(s)
    }
}

pub type Result<T> = std::result::Result<T, TournamentError>;
