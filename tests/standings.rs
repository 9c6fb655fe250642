//! Integration tests for group standings updates.

mod common;

use common::finished_group_match;
use copa_tournament::logic::{apply_group_match, apply_match_result};
use copa_tournament::models::{ErrorKind, GroupClassificationRow, MatchStatus, TournamentError, MAX_GOALS};
use proptest::prelude::*;
use uuid::Uuid;

#[test]
fn home_win_updates_both_rows() {
    let group = Uuid::new_v4();
    let (home, away) = (Uuid::new_v4(), Uuid::new_v4());
    let mut home_row = GroupClassificationRow::new(home, group);
    let mut away_row = GroupClassificationRow::new(away, group);

    let game = finished_group_match(group, home, away, 2, 1);
    apply_group_match(&mut home_row, &mut away_row, &game).unwrap();

    assert_eq!(home_row.matches_played, 1);
    assert_eq!(home_row.wins, 1);
    assert_eq!(home_row.points, 3);
    assert_eq!(home_row.goal_difference, 1);
    assert_eq!(away_row.losses, 1);
    assert_eq!(away_row.points, 0);
    assert_eq!(away_row.goal_difference, -1);
    assert_eq!((away_row.goals_for, away_row.goals_against), (1, 2));
}

#[test]
fn draw_gives_one_point_each() {
    let group = Uuid::new_v4();
    let (home, away) = (Uuid::new_v4(), Uuid::new_v4());
    let mut row = GroupClassificationRow::new(away, group);
    apply_match_result(&mut row, &finished_group_match(group, home, away, 1, 1)).unwrap();
    assert_eq!((row.draws, row.points, row.goal_difference), (1, 1, 0));
}

#[test]
fn unfinished_match_leaves_row_untouched() {
    let group = Uuid::new_v4();
    let (home, away) = (Uuid::new_v4(), Uuid::new_v4());
    let mut game = finished_group_match(group, home, away, 3, 0);
    game.status = MatchStatus::Pending;

    let mut row = GroupClassificationRow::new(home, group);
    let before = row.clone();
    assert!(matches!(
        apply_match_result(&mut row, &game),
        Err(TournamentError::MatchNotFinished(_))
    ));
    assert_eq!(row, before);
}

#[test]
fn rows_of_other_groups_or_teams_are_rejected() {
    let group = Uuid::new_v4();
    let (home, away) = (Uuid::new_v4(), Uuid::new_v4());
    let game = finished_group_match(group, home, away, 3, 0);

    let mut wrong_group = GroupClassificationRow::new(home, Uuid::new_v4());
    assert!(matches!(
        apply_match_result(&mut wrong_group, &game),
        Err(TournamentError::UnrelatedMatch(_))
    ));

    let mut bystander = GroupClassificationRow::new(Uuid::new_v4(), group);
    assert!(matches!(
        apply_match_result(&mut bystander, &game),
        Err(TournamentError::UnrelatedMatch(_))
    ));
}

#[test]
fn mismatched_pair_updates_neither_row() {
    let group = Uuid::new_v4();
    let (home, away) = (Uuid::new_v4(), Uuid::new_v4());
    let game = finished_group_match(group, home, away, 2, 2);

    // Rows passed in the wrong order.
    let mut home_row = GroupClassificationRow::new(away, group);
    let mut away_row = GroupClassificationRow::new(home, group);
    assert!(apply_group_match(&mut home_row, &mut away_row, &game).is_err());
    assert_eq!(home_row.matches_played + away_row.matches_played, 0);
}

#[test]
fn oversized_score_is_refused_before_any_row_moves() {
    let group = Uuid::new_v4();
    let (home, away) = (Uuid::new_v4(), Uuid::new_v4());
    let game = finished_group_match(group, home, away, 3_000_000_000, 0);

    let mut home_row = GroupClassificationRow::new(home, group);
    let mut away_row = GroupClassificationRow::new(away, group);
    let err = apply_group_match(&mut home_row, &mut away_row, &game).unwrap_err();
    assert_eq!(err, TournamentError::GoalsOutOfRange(3_000_000_000));
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert_eq!(home_row, GroupClassificationRow::new(home, group));
    assert_eq!(away_row, GroupClassificationRow::new(away, group));
}

#[test]
fn goal_difference_never_wraps() {
    let mut row = GroupClassificationRow::new(Uuid::new_v4(), Uuid::new_v4());
    let before = row.clone();
    assert_eq!(row.record(3_000_000_000, 0), Err(TournamentError::GoalTotalOverflow));
    assert_eq!(row, before);

    row.record(MAX_GOALS, 0).unwrap();
    assert_eq!(row.goal_difference, 99);
}

proptest! {
    #[test]
    fn independent_matches_commute(
        a in (0u32..8, 0u32..8),
        b in (0u32..8, 0u32..8),
        team_at_home_in_b in any::<bool>(),
    ) {
        let group = Uuid::new_v4();
        let (team, rival1, rival2) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
        let first = finished_group_match(group, team, rival1, a.0, a.1);
        let second = if team_at_home_in_b {
            finished_group_match(group, team, rival2, b.0, b.1)
        } else {
            finished_group_match(group, rival2, team, b.0, b.1)
        };

        let mut forward = GroupClassificationRow::new(team, group);
        apply_match_result(&mut forward, &first).unwrap();
        apply_match_result(&mut forward, &second).unwrap();

        let mut backward = GroupClassificationRow::new(team, group);
        apply_match_result(&mut backward, &second).unwrap();
        apply_match_result(&mut backward, &first).unwrap();

        prop_assert_eq!(&forward, &backward);
        prop_assert_eq!(forward.points, 3 * forward.wins + forward.draws);
        prop_assert_eq!(forward.goal_difference, forward.goals_for as i32 - forward.goals_against as i32);
    }
}
