//! Integration tests for tie legs, aggregates and penalties.

mod common;

use common::leg;
use copa_tournament::logic::{record_leg_result, record_penalties};
use copa_tournament::models::{
    ErrorKind, KnockoutRound, Leg, MatchStatus, PenaltyGoals, Tie, TieStage, TieState, TournamentError,
};
use uuid::Uuid;

fn two_legged() -> Tie {
    Tie::new(
        Uuid::new_v4(),
        TieStage::Knockout(KnockoutRound::QuarterFinal),
        Uuid::new_v4(),
        Uuid::new_v4(),
        false,
    )
}

#[test]
fn aggregate_decides_two_legged_tie() {
    let mut tie = two_legged();
    let (a, b) = (tie.first_team_id, tie.second_team_id);

    let first = leg(&tie, Leg::FirstLeg, a, b, 1, 0);
    assert_eq!(record_leg_result(&mut tie, &first, None).unwrap(), None);
    assert_eq!(tie.state(), TieState::AwaitingSecondLeg);

    // A plays away in the second leg and wins 2-1.
    let second = leg(&tie, Leg::SecondLeg, b, a, 1, 2);
    let resolution = record_leg_result(&mut tie, &second, None).unwrap().unwrap();

    assert_eq!(tie.first_team_aggregate_goals, Some(3));
    assert_eq!(tie.second_team_aggregate_goals, Some(1));
    assert_eq!(resolution.winner, a);
    assert_eq!(resolution.eliminated, b);
    assert_eq!(tie.winner_team_id, Some(a));
    assert!(tie.is_completed);
    assert!(!tie.penalties_played);
    assert_eq!(tie.state(), TieState::Completed);
}

#[test]
fn leg_goals_follow_team_identity() {
    let mut tie = two_legged();
    let (a, b) = (tie.first_team_id, tie.second_team_id);

    let first = leg(&tie, Leg::FirstLeg, a, b, 1, 0);
    record_leg_result(&mut tie, &first, None).unwrap();
    let second = leg(&tie, Leg::SecondLeg, b, a, 1, 2);
    let resolution = record_leg_result(&mut tie, &second, None).unwrap().unwrap();

    assert_eq!(tie.aggregate(), (3, 1));
    assert_eq!(resolution.winner, a);
}

#[test]
fn level_aggregate_goes_to_penalties() {
    let mut tie = two_legged();
    let (a, b) = (tie.first_team_id, tie.second_team_id);

    let first = leg(&tie, Leg::FirstLeg, a, b, 1, 0);
    record_leg_result(&mut tie, &first, None).unwrap();
    let second = leg(&tie, Leg::SecondLeg, b, a, 1, 0);
    let pending = record_leg_result(&mut tie, &second, None).unwrap();
    assert_eq!(pending, None);
    assert_eq!(tie.state(), TieState::PenaltiesRequired);

    let resolution = record_penalties(&mut tie, PenaltyGoals::new(4, 5)).unwrap();
    assert_eq!(resolution.winner, b);
    assert_eq!(tie.winner_team_id, Some(b));
    assert!(tie.penalties_played);
    assert_eq!(tie.first_team_penalty_goals, Some(4));
    assert_eq!(tie.second_team_penalty_goals, Some(5));
}

#[test]
fn penalties_with_the_deciding_leg() {
    let mut tie = two_legged();
    let (a, b) = (tie.first_team_id, tie.second_team_id);

    let first = leg(&tie, Leg::FirstLeg, a, b, 1, 0);
    record_leg_result(&mut tie, &first, None).unwrap();
    let second = leg(&tie, Leg::SecondLeg, b, a, 1, 0);
    let resolution = record_leg_result(&mut tie, &second, Some(PenaltyGoals::new(5, 4)))
        .unwrap()
        .unwrap();
    assert_eq!(resolution.winner, a);
    assert!(tie.is_completed);
}

#[test]
fn drawn_shootout_is_rejected_and_tie_untouched() {
    let mut tie = two_legged();
    let (a, b) = (tie.first_team_id, tie.second_team_id);
    let first = leg(&tie, Leg::FirstLeg, a, b, 1, 0);
    record_leg_result(&mut tie, &first, None).unwrap();
    let before = tie.clone();

    let second = leg(&tie, Leg::SecondLeg, b, a, 1, 0);
    let err = record_leg_result(&mut tie, &second, Some(PenaltyGoals::new(4, 4))).unwrap_err();
    assert_eq!(err, TournamentError::PenaltyShootoutDrawn(4));
    assert_eq!(err.kind(), ErrorKind::State);
    assert_eq!(tie, before);

    record_leg_result(&mut tie, &second, None).unwrap();
    assert!(matches!(
        record_penalties(&mut tie, PenaltyGoals::new(3, 3)),
        Err(TournamentError::PenaltyShootoutDrawn(3))
    ));
    assert_eq!(tie.state(), TieState::PenaltiesRequired);
}

#[test]
fn legs_cannot_be_recorded_twice_or_out_of_order() {
    let mut tie = two_legged();
    let (a, b) = (tie.first_team_id, tie.second_team_id);

    let second = leg(&tie, Leg::SecondLeg, b, a, 0, 0);
    assert_eq!(
        record_leg_result(&mut tie, &second, None),
        Err(TournamentError::FirstLegNotPlayed)
    );

    let first = leg(&tie, Leg::FirstLeg, a, b, 2, 2);
    record_leg_result(&mut tie, &first, None).unwrap();
    let err = record_leg_result(&mut tie, &first, None).unwrap_err();
    assert_eq!(err, TournamentError::LegAlreadyPlayed(Leg::FirstLeg));
    assert_eq!(tie.aggregate(), (2, 2));
}

#[test]
fn completed_tie_rejects_everything() {
    let mut tie = two_legged();
    let (a, b) = (tie.first_team_id, tie.second_team_id);
    let first = leg(&tie, Leg::FirstLeg, a, b, 3, 0);
    record_leg_result(&mut tie, &first, None).unwrap();
    let second = leg(&tie, Leg::SecondLeg, b, a, 0, 0);
    record_leg_result(&mut tie, &second, None).unwrap();
    assert!(tie.is_completed);

    let extra = leg(&tie, Leg::SecondLeg, b, a, 5, 0);
    assert_eq!(
        record_leg_result(&mut tie, &extra, None),
        Err(TournamentError::TieAlreadyCompleted)
    );
    assert_eq!(
        record_penalties(&mut tie, PenaltyGoals::new(5, 3)),
        Err(TournamentError::TieAlreadyCompleted)
    );
}

#[test]
fn single_match_final() {
    let mut tie = Tie::new(
        Uuid::new_v4(),
        TieStage::Knockout(KnockoutRound::Final),
        Uuid::new_v4(),
        Uuid::new_v4(),
        true,
    );
    let (a, b) = (tie.first_team_id, tie.second_team_id);
    assert_eq!(tie.state(), TieState::AwaitingFirstLeg);

    let two_legs = leg(&tie, Leg::FirstLeg, a, b, 1, 0);
    assert_eq!(
        record_leg_result(&mut tie, &two_legs, None),
        Err(TournamentError::MatchTypeMismatch)
    );

    let final_match = leg(&tie, Leg::SingleMatch, a, b, 0, 2);
    let resolution = record_leg_result(&mut tie, &final_match, None).unwrap().unwrap();
    assert_eq!(resolution.winner, b);
    assert_eq!(resolution.eliminated, a);
}

#[test]
fn penalties_before_the_deciding_leg_are_refused() {
    let mut tie = two_legged();
    assert_eq!(
        record_penalties(&mut tie, PenaltyGoals::new(5, 4)),
        Err(TournamentError::PenaltiesNotRequired)
    );
}

#[test]
fn unfinished_or_foreign_matches_are_refused() {
    let mut tie = two_legged();
    let (a, b) = (tie.first_team_id, tie.second_team_id);

    let mut pending = leg(&tie, Leg::FirstLeg, a, b, 1, 0);
    pending.status = MatchStatus::Pending;
    assert!(matches!(
        record_leg_result(&mut tie, &pending, None),
        Err(TournamentError::MatchNotFinished(_))
    ));

    let other = two_legged();
    let foreign = leg(&other, Leg::FirstLeg, other.first_team_id, other.second_team_id, 1, 0);
    assert!(matches!(
        record_leg_result(&mut tie, &foreign, None),
        Err(TournamentError::UnrelatedMatch(_))
    ));

    let stranger = Uuid::new_v4();
    let wrong_team = leg(&tie, Leg::FirstLeg, a, stranger, 1, 0);
    assert_eq!(
        record_leg_result(&mut tie, &wrong_team, None),
        Err(TournamentError::TeamNotInTie(stranger))
    );
    assert_eq!(tie.state(), TieState::AwaitingFirstLeg);
}

#[test]
fn oversized_leg_scores_leave_the_tie_untouched() {
    let mut tie = two_legged();
    let (a, b) = (tie.first_team_id, tie.second_team_id);

    let huge = leg(&tie, Leg::FirstLeg, a, b, u32::MAX, 0);
    assert_eq!(
        record_leg_result(&mut tie, &huge, None),
        Err(TournamentError::GoalsOutOfRange(u32::MAX))
    );
    assert_eq!(tie.state(), TieState::AwaitingFirstLeg);

    let first = leg(&tie, Leg::FirstLeg, a, b, 1, 0);
    record_leg_result(&mut tie, &first, None).unwrap();
    let second = leg(&tie, Leg::SecondLeg, b, a, 1, 0);
    let before = tie.clone();
    assert_eq!(
        record_leg_result(&mut tie, &second, Some(PenaltyGoals::new(100, 3))),
        Err(TournamentError::GoalsOutOfRange(100))
    );
    assert_eq!(tie, before);
}
