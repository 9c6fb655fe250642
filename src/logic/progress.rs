//! Operations that move a [`Tournament`] forward.
//!
//! These glue the engine functions to the tournament's records. Anything that
//! touches more than one record is staged on a copy of the tournament and
//! committed only if every step succeeds.

use log::info;
use rand::Rng;

use crate::logic::advancement::{record_leg_result, record_penalties, TieResolution};
use crate::logic::bracket::{build_bracket_shape, draw_knockout_matchups_with, extract_qualified_teams};
use crate::logic::group_draw::{compute_group_draw_with, GroupDrawOptions};
use crate::logic::qualifying_draw::compute_qualifying_draw_with;
use crate::logic::ranking::rank_group;
use crate::logic::standings::apply_group_match;
use crate::logic::validation::{
    validate_match_creation, validate_result_submission, validate_tie_creation, MatchContext,
    TieContext,
};
use crate::models::{
    Bracket, DrawnGroup, Group, GroupClassificationRow, GroupStandings, MatchId, MatchResult,
    MatchStage, MatchStatus, NewMatch, NewTie, PenaltyGoals, QualifyingDraw, TieId, Tournament,
    TournamentError,
};

/// Draw the participating teams into groups and create a zeroed standings row
/// for every team.
pub fn run_group_draw(tournament: &mut Tournament) -> Result<Vec<DrawnGroup>, TournamentError> {
    run_group_draw_with(tournament, GroupDrawOptions::default(), &mut rand::thread_rng())
}

pub fn run_group_draw_with<R: Rng + ?Sized>(
    tournament: &mut Tournament,
    options: GroupDrawOptions,
    rng: &mut R,
) -> Result<Vec<DrawnGroup>, TournamentError> {
    if !tournament.groups.is_empty() {
        return Err(TournamentError::GroupsAlreadyDrawn);
    }
    let drawn = compute_group_draw_with(&tournament.participating_teams(), options, rng)?;

    for drawn_group in &drawn {
        let group = Group::new(
            drawn_group.label.clone(),
            drawn_group.teams.iter().map(|t| t.id).collect(),
        );
        tournament.standings.extend(
            group
                .team_ids
                .iter()
                .map(|team_id| GroupClassificationRow::new(*team_id, group.id)),
        );
        tournament.groups.push(group);
    }
    info!("Tournament {}: {} groups drawn", tournament.id, drawn.len());
    Ok(drawn)
}

/// Qualifying draw over the participating teams. The result is returned, not
/// stored: its later phases hold placeholders, not teams.
pub fn run_qualifying_draw(tournament: &Tournament) -> Result<QualifyingDraw, TournamentError> {
    run_qualifying_draw_with(tournament, &mut rand::thread_rng())
}

pub fn run_qualifying_draw_with<R: Rng + ?Sized>(
    tournament: &Tournament,
    rng: &mut R,
) -> Result<QualifyingDraw, TournamentError> {
    compute_qualifying_draw_with(&tournament.participating_teams(), rng)
}

pub fn create_tie(tournament: &mut Tournament, new: &NewTie) -> Result<TieId, TournamentError> {
    let ctx = TieContext {
        tournament_id: tournament.id,
        teams: &tournament.teams,
        ties: &tournament.ties,
    };
    let tie = validate_tie_creation(new, &ctx)?;
    let id = tie.id;
    tournament.ties.push(tie);
    Ok(id)
}

pub fn create_match(tournament: &mut Tournament, new: &NewMatch) -> Result<MatchId, TournamentError> {
    let ctx = MatchContext {
        tournament_id: tournament.id,
        teams: &tournament.teams,
        groups: &tournament.groups,
        ties: &tournament.ties,
        matches: &tournament.matches,
    };
    let game = validate_match_creation(new, &ctx)?;
    let id = game.id;
    tournament.matches.push(game);
    Ok(id)
}

/// Store a match result and everything it implies.
///
/// A finished group match updates both standings rows. A finished tie match
/// records the leg; when that decides the tie, the loser stops participating
/// and the resolution is returned. Cancelling only changes the status.
pub fn submit_match_result(
    tournament: &mut Tournament,
    match_id: MatchId,
    result: &MatchResult,
) -> Result<Option<TieResolution>, TournamentError> {
    let mut game = tournament.game(match_id)?.clone();
    validate_result_submission(&game, result)?;
    game.home_goals = result.home_goals;
    game.away_goals = result.away_goals;
    game.status = result.status;

    let mut staged = tournament.clone();
    let mut resolution = None;
    if game.status == MatchStatus::Finished {
        match game.stage {
            MatchStage::GroupStage { group_id, .. } => {
                let mut home = staged.standings_row(game.home_team_id, group_id)?.clone();
                let mut away = staged.standings_row(game.away_team_id, group_id)?.clone();
                apply_group_match(&mut home, &mut away, &game)?;
                replace_row(&mut staged, home);
                replace_row(&mut staged, away);
            }
            MatchStage::QualifyingStage { tie_id, .. } | MatchStage::KnockoutStage { tie_id, .. } => {
                let penalties = result
                    .first_team_penalty_goals
                    .zip(result.second_team_penalty_goals)
                    .map(|(first, second)| PenaltyGoals::new(first, second));
                resolution = record_leg_result(staged.tie_mut(tie_id)?, &game, penalties)?;
                if let Some(r) = resolution {
                    staged.team_mut(r.eliminated)?.eliminate();
                }
            }
        }
    }

    if let Some(stored) = staged.matches.iter_mut().find(|m| m.id == match_id) {
        *stored = game;
    }
    *tournament = staged;
    Ok(resolution)
}

/// Settle a tie left level after its deciding leg.
pub fn record_tie_penalties(
    tournament: &mut Tournament,
    tie_id: TieId,
    penalties: PenaltyGoals,
) -> Result<TieResolution, TournamentError> {
    let mut staged = tournament.clone();
    let resolution = record_penalties(staged.tie_mut(tie_id)?, penalties)?;
    staged.team_mut(resolution.eliminated)?.eliminate();
    *tournament = staged;
    Ok(resolution)
}

/// Every group with its rows in ranked order.
pub fn group_tables(tournament: &Tournament) -> Vec<GroupStandings> {
    tournament
        .groups
        .iter()
        .map(|group| {
            let rows: Vec<GroupClassificationRow> = tournament
                .standings
                .iter()
                .filter(|r| r.group_id == group.id)
                .cloned()
                .collect();
            GroupStandings {
                group_id: group.id,
                label: group.label.clone(),
                rows: rank_group(&rows, &tournament.matches),
            }
        })
        .collect()
}

/// Pair group winners with runners-up and lay out the bracket to the final.
pub fn knockout_draw(tournament: &Tournament) -> Result<Bracket, TournamentError> {
    knockout_draw_with(tournament, &mut rand::thread_rng())
}

pub fn knockout_draw_with<R: Rng + ?Sized>(
    tournament: &Tournament,
    rng: &mut R,
) -> Result<Bracket, TournamentError> {
    let qualified = extract_qualified_teams(&group_tables(tournament), &tournament.matches)?;
    let matchups = draw_knockout_matchups_with(&qualified.first_place, &qualified.second_place, rng)?;
    build_bracket_shape(matchups)
}

fn replace_row(tournament: &mut Tournament, row: GroupClassificationRow) {
    if let Some(stored) = tournament
        .standings
        .iter_mut()
        .find(|r| r.tournament_team_id == row.tournament_team_id && r.group_id == row.group_id)
    {
        *stored = row;
    }
}
