//! Football tournament engine: group and qualifying draws, knockout brackets,
//! group standings and two-legged tie advancement, with CSV team import.

pub mod import;
pub mod logic;
pub mod models;

pub use logic::{
    apply_match_result, build_bracket_shape, compute_group_draw, compute_qualifying_draw,
    create_match, create_tie, group_tables, knockout_draw, record_leg_result, record_tie_penalties,
    run_group_draw, run_qualifying_draw, submit_match_result, validate_match_creation,
    validate_tie_creation, TieResolution,
};
pub use models::{
    Bombo, Country, ErrorKind, GameMatch, MatchId, MatchResult, NewMatch, NewTeam, NewTie, Team,
    TeamId, Tie, TieId, Tournament, TournamentError, TournamentId,
};
