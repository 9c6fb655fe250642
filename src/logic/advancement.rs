//! Tie progression: legs, aggregate goals, penalties and the winner.
//!
//! A tie moves AwaitingFirstLeg -> AwaitingSecondLeg -> (AggregateDecided |
//! PenaltiesRequired) -> Completed; single-match ties skip the second step.
//! The state is read off the tie's fields (see [`Tie::state`]).
//!
//! Both entry points work on a copy of the tie and only write it back when
//! every check has passed.

use log::info;
use serde::{Deserialize, Serialize};

use crate::models::{
    ensure_goals_in_range, GameMatch, Leg, PenaltyGoals, TeamId, Tie, TieId, TieState, TournamentError,
};

/// Outcome of a completed tie. The caller marks `eliminated` as no longer
/// participating.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TieResolution {
    pub tie_id: TieId,
    pub winner: TeamId,
    pub eliminated: TeamId,
}

/// Record a finished match as a leg of `tie`.
///
/// Returns the resolution when this leg decides the tie. A level aggregate
/// after the deciding leg needs `penalties`; without them the tie waits in
/// [`TieState::PenaltiesRequired`] for [`record_penalties`].
pub fn record_leg_result(
    tie: &mut Tie,
    game: &GameMatch,
    penalties: Option<PenaltyGoals>,
) -> Result<Option<TieResolution>, TournamentError> {
    let leg = match game.stage.tie() {
        Some((tie_id, leg)) if tie_id == tie.id => leg,
        _ => return Err(TournamentError::UnrelatedMatch(game.id)),
    };
    if !game.stage.kind().fits(tie.stage) {
        return Err(TournamentError::StageMismatch);
    }
    if tie.is_completed {
        return Err(TournamentError::TieAlreadyCompleted);
    }
    if !game.is_finished() {
        return Err(TournamentError::MatchNotFinished(game.id));
    }
    let (home, away) = game.score().ok_or(TournamentError::MissingScore)?;
    ensure_goals_in_range(home)?;
    ensure_goals_in_range(away)?;
    let (first_goals, second_goals) = if game.home_team_id == tie.first_team_id
        && game.away_team_id == tie.second_team_id
    {
        (home, away)
    } else if game.home_team_id == tie.second_team_id && game.away_team_id == tie.first_team_id {
        (away, home)
    } else if !tie.involves(game.home_team_id) {
        return Err(TournamentError::TeamNotInTie(game.home_team_id));
    } else {
        return Err(TournamentError::TeamNotInTie(game.away_team_id));
    };
    check_leg(tie, leg)?;

    let mut staged = tie.clone();
    let (first_total, second_total) = staged.aggregate();
    staged.first_team_aggregate_goals = Some(add_goals(first_total, first_goals)?);
    staged.second_team_aggregate_goals = Some(add_goals(second_total, second_goals)?);
    match leg {
        Leg::FirstLeg | Leg::SingleMatch => staged.first_leg_played = true,
        Leg::SecondLeg => staged.second_leg_played = true,
    }

    let resolution = match (staged.state(), penalties) {
        (TieState::AggregateDecided, _) => {
            let (first, second) = staged.aggregate();
            let winner = if first > second {
                staged.first_team_id
            } else {
                staged.second_team_id
            };
            Some(complete(&mut staged, winner))
        }
        (TieState::PenaltiesRequired, Some(p)) => Some(apply_penalties(&mut staged, p)?),
        _ => None,
    };

    *tie = staged;
    Ok(resolution)
}

/// Settle a level tie with a penalty shootout.
pub fn record_penalties(
    tie: &mut Tie,
    penalties: PenaltyGoals,
) -> Result<TieResolution, TournamentError> {
    match tie.state() {
        TieState::PenaltiesRequired => {}
        TieState::Completed => return Err(TournamentError::TieAlreadyCompleted),
        _ => return Err(TournamentError::PenaltiesNotRequired),
    }
    let mut staged = tie.clone();
    let resolution = apply_penalties(&mut staged, penalties)?;
    *tie = staged;
    Ok(resolution)
}

fn check_leg(tie: &Tie, leg: Leg) -> Result<(), TournamentError> {
    match (leg, tie.is_single_match) {
        (Leg::SingleMatch, true) if tie.first_team_aggregate_goals.is_some() => {
            Err(TournamentError::LegAlreadyPlayed(leg))
        }
        (Leg::SingleMatch, true) => Ok(()),
        (Leg::FirstLeg, false) if tie.first_leg_played => Err(TournamentError::LegAlreadyPlayed(leg)),
        (Leg::FirstLeg, false) => Ok(()),
        (Leg::SecondLeg, false) if tie.second_leg_played => Err(TournamentError::LegAlreadyPlayed(leg)),
        (Leg::SecondLeg, false) if !tie.first_leg_played => Err(TournamentError::FirstLegNotPlayed),
        (Leg::SecondLeg, false) => Ok(()),
        _ => Err(TournamentError::MatchTypeMismatch),
    }
}

fn add_goals(total: u32, goals: u32) -> Result<u32, TournamentError> {
    total.checked_add(goals).ok_or(TournamentError::GoalTotalOverflow)
}

fn apply_penalties(tie: &mut Tie, penalties: PenaltyGoals) -> Result<TieResolution, TournamentError> {
    ensure_goals_in_range(penalties.first_team)?;
    ensure_goals_in_range(penalties.second_team)?;
    if penalties.first_team == penalties.second_team {
        return Err(TournamentError::PenaltyShootoutDrawn(penalties.first_team));
    }
    tie.penalties_played = true;
    tie.first_team_penalty_goals = Some(penalties.first_team);
    tie.second_team_penalty_goals = Some(penalties.second_team);
    let winner = if penalties.first_team > penalties.second_team {
        tie.first_team_id
    } else {
        tie.second_team_id
    };
    Ok(complete(tie, winner))
}

fn complete(tie: &mut Tie, winner: TeamId) -> TieResolution {
    tie.winner_team_id = Some(winner);
    tie.is_completed = true;
    let eliminated = tie.opponent_of(winner);
    info!("Tie {} decided: {} goes through, {} is eliminated", tie.id, winner, eliminated);
    TieResolution {
        tie_id: tie.id,
        winner,
        eliminated,
    }
}
