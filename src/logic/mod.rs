//! Tournament engine: draws, standings, tie advancement and the checks that
//! guard them, plus the operations that apply them to a [`crate::Tournament`].

mod advancement;
mod bracket;
mod group_draw;
mod progress;
mod qualifying_draw;
mod ranking;
mod standings;
mod validation;

pub use advancement::{record_leg_result, record_penalties, TieResolution};
pub use bracket::{
    build_bracket_shape, draw_knockout_matchups, draw_knockout_matchups_with,
    extract_qualified_teams,
};
pub use group_draw::{compute_group_draw, compute_group_draw_with, is_valid_placement, GroupDrawOptions};
pub use progress::{
    create_match, create_tie, group_tables, knockout_draw, knockout_draw_with, record_tie_penalties,
    run_group_draw, run_group_draw_with, run_qualifying_draw, run_qualifying_draw_with,
    submit_match_result,
};
pub use qualifying_draw::{
    compute_qualifying_draw, compute_qualifying_draw_with, PHASE1_TEAMS, PHASE2_DIRECT_TEAMS,
    QUALIFIED_TO_GROUP_STAGE,
};
pub use ranking::{compare_rows, rank_group, sort_rows};
pub use standings::{apply_group_match, apply_match_result};
pub use validation::{
    ensure_distinct_teams, ensure_no_conflicting_tie, ensure_team_in_tournament,
    validate_match_creation, validate_result_submission, validate_tie_creation, MatchContext,
    TieContext,
};
