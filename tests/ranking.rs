//! Integration tests for group table ordering.

mod common;

use std::cmp::Ordering;

use common::finished_group_match;
use copa_tournament::logic::{compare_rows, rank_group, sort_rows};
use copa_tournament::models::{GroupClassificationRow, GroupId, TeamId};
use uuid::Uuid;

fn row(group_id: GroupId, points: u32, goal_difference: i32, goals_for: u32) -> GroupClassificationRow {
    GroupClassificationRow {
        points,
        goal_difference,
        goals_for,
        goals_against: (goals_for as i32 - goal_difference) as u32,
        ..GroupClassificationRow::new(Uuid::new_v4(), group_id)
    }
}

fn ids(rows: &[GroupClassificationRow]) -> Vec<TeamId> {
    rows.iter().map(|r| r.tournament_team_id).collect()
}

#[test]
fn points_then_goal_difference() {
    let g = Uuid::new_v4();
    let first = row(g, 9, 5, 7);
    let second = row(g, 6, 2, 5);
    let third = row(g, 6, 1, 6);
    let fourth = row(g, 3, -1, 2);

    let mut rows = vec![fourth.clone(), third.clone(), first.clone(), second.clone()];
    sort_rows(&mut rows);
    assert_eq!(ids(&rows), ids(&[first.clone(), second.clone(), third.clone(), fourth.clone()]));

    // Same input, same output.
    let mut again = vec![fourth, third, first, second];
    sort_rows(&mut again);
    assert_eq!(ids(&again), ids(&rows));
}

#[test]
fn goals_for_breaks_equal_goal_difference() {
    let g = Uuid::new_v4();
    let fewer = row(g, 4, 1, 3);
    let more = row(g, 4, 1, 5);
    assert_eq!(compare_rows(&more, &fewer), Ordering::Less);
    assert_eq!(compare_rows(&fewer, &more), Ordering::Greater);
}

#[test]
fn fully_level_rows_keep_input_order() {
    let g = Uuid::new_v4();
    let a = row(g, 3, 0, 2);
    let b = row(g, 3, 0, 2);
    assert_eq!(compare_rows(&a, &b), Ordering::Equal);

    let ranked = rank_group(&[a.clone(), b.clone()], &[]);
    assert_eq!(ids(&ranked), ids(&[a, b]));
}

#[test]
fn head_to_head_decides_level_rows() {
    let g = Uuid::new_v4();
    let a = row(g, 4, 1, 4);
    let b = row(g, 4, 1, 4);
    let other = row(g, 7, 3, 6);

    // b beat a when they met.
    let meeting = finished_group_match(g, a.tournament_team_id, b.tournament_team_id, 0, 1);
    let ranked = rank_group(&[a.clone(), b.clone(), other.clone()], &[meeting]);
    assert_eq!(ids(&ranked), ids(&[other, b, a]));
}

#[test]
fn head_to_head_ignores_other_groups() {
    let g = Uuid::new_v4();
    let a = row(g, 4, 1, 4);
    let b = row(g, 4, 1, 4);

    let elsewhere = finished_group_match(Uuid::new_v4(), a.tournament_team_id, b.tournament_team_id, 0, 1);
    let ranked = rank_group(&[a.clone(), b.clone()], &[elsewhere]);
    assert_eq!(ids(&ranked), ids(&[a, b]));
}
