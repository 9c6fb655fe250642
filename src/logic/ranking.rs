//! Group table ordering: points, then goal difference, then goals for.
//!
//! [`compare_rows`] is the plain comparator. [`rank_group`] sorts a whole
//! group and breaks remaining ties head-to-head: points, then goal difference,
//! counted only over finished group matches between the level teams. Rows
//! that are still level after that keep their input order.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::models::{GameMatch, GroupClassificationRow, MatchStage, Outcome, TeamId};

/// Points desc, goal difference desc, goals for desc.
pub fn compare_rows(a: &GroupClassificationRow, b: &GroupClassificationRow) -> Ordering {
    b.points
        .cmp(&a.points)
        .then_with(|| b.goal_difference.cmp(&a.goal_difference))
        .then_with(|| b.goals_for.cmp(&a.goals_for))
}

/// Stable sort by [`compare_rows`] only.
pub fn sort_rows(rows: &mut [GroupClassificationRow]) {
    rows.sort_by(compare_rows);
}

/// Rank a group's rows, using `matches` for the head-to-head tie-break.
/// Matches outside the group or not yet finished are ignored.
pub fn rank_group(rows: &[GroupClassificationRow], matches: &[GameMatch]) -> Vec<GroupClassificationRow> {
    let mut ranked = rows.to_vec();
    sort_rows(&mut ranked);

    let mut start = 0;
    while start < ranked.len() {
        let mut end = start + 1;
        while end < ranked.len() && compare_rows(&ranked[start], &ranked[end]) == Ordering::Equal {
            end += 1;
        }
        if end - start > 1 {
            break_tie_head_to_head(&mut ranked[start..end], matches);
        }
        start = end;
    }
    ranked
}

#[derive(Clone, Copy, Default)]
struct HeadToHead {
    points: u32,
    goal_difference: i64,
}

fn break_tie_head_to_head(level: &mut [GroupClassificationRow], matches: &[GameMatch]) {
    let group_id = level[0].group_id;
    let ids: Vec<TeamId> = level.iter().map(|r| r.tournament_team_id).collect();
    let mut table: HashMap<TeamId, HeadToHead> = ids.iter().map(|id| (*id, HeadToHead::default())).collect();

    let between_level_teams = matches.iter().filter(|m| {
        m.is_finished()
            && matches!(m.stage, MatchStage::GroupStage { group_id: g, .. } if g == group_id)
            && ids.contains(&m.home_team_id)
            && ids.contains(&m.away_team_id)
    });
    for m in between_level_teams {
        let Some((home, away)) = m.score() else {
            continue;
        };
        for (team, scored, conceded) in [(m.home_team_id, home, away), (m.away_team_id, away, home)] {
            if let Some(entry) = table.get_mut(&team) {
                entry.points += Outcome::from_goals(scored, conceded).points();
                entry.goal_difference += i64::from(scored) - i64::from(conceded);
            }
        }
    }

    level.sort_by(|a, b| {
        let ha = table[&a.tournament_team_id];
        let hb = table[&b.tournament_team_id];
        hb.points
            .cmp(&ha.points)
            .then_with(|| hb.goal_difference.cmp(&ha.goal_difference))
    });
}
