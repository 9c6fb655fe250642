//! Group tables from finished group-stage matches.
//!
//! Every check runs before a row is touched, so a rejected match leaves the
//! rows as they were. Applying the same match twice is the caller's concern.

use crate::models::{
    ensure_goals_in_range, GameMatch, GroupClassificationRow, MatchStage, TournamentError,
};

/// Add one finished group match to the row of one of its teams.
pub fn apply_match_result(
    row: &mut GroupClassificationRow,
    game: &GameMatch,
) -> Result<(), TournamentError> {
    let (scored, conceded) = goals_for_row(row, game)?;
    row.record(scored, conceded)
}

/// Add a finished group match to both team rows, or to neither.
pub fn apply_group_match(
    home_row: &mut GroupClassificationRow,
    away_row: &mut GroupClassificationRow,
    game: &GameMatch,
) -> Result<(), TournamentError> {
    if home_row.tournament_team_id != game.home_team_id {
        return Err(TournamentError::UnrelatedMatch(game.id));
    }
    if away_row.tournament_team_id != game.away_team_id {
        return Err(TournamentError::UnrelatedMatch(game.id));
    }
    let home = goals_for_row(home_row, game)?;
    let away = goals_for_row(away_row, game)?;
    let mut home_staged = home_row.clone();
    let mut away_staged = away_row.clone();
    home_staged.record(home.0, home.1)?;
    away_staged.record(away.0, away.1)?;
    *home_row = home_staged;
    *away_row = away_staged;
    Ok(())
}

/// Goals scored and conceded by the row's team, once the match is known to
/// count for that row.
fn goals_for_row(
    row: &GroupClassificationRow,
    game: &GameMatch,
) -> Result<(u32, u32), TournamentError> {
    let MatchStage::GroupStage { group_id, .. } = game.stage else {
        return Err(TournamentError::UnrelatedMatch(game.id));
    };
    if group_id != row.group_id {
        return Err(TournamentError::UnrelatedMatch(game.id));
    }
    if !game.is_finished() {
        return Err(TournamentError::MatchNotFinished(game.id));
    }
    let (home, away) = game.score().ok_or(TournamentError::MissingScore)?;
    ensure_goals_in_range(home)?;
    ensure_goals_in_range(away)?;
    game.goals_of(row.tournament_team_id)
        .ok_or(TournamentError::UnrelatedMatch(game.id))
}
