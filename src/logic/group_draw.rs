//! Group-stage draw: constrained random assignment of teams to groups.
//!
//! Constraints per group: every bombo at most once, and no two teams from the
//! same country unless one of them entered through the qualifying stage. The
//! current champion is placed in group A before anything else.
//!
//! Each attempt orders the teams hardest-first (champion, then crowded
//! countries, then higher bombo number), with random order among equals, and
//! drops every team into a random group that still accepts it. An attempt
//! that strands a team is thrown away. Running out of attempts is an expected
//! outcome reported as [`TournamentError::DrawInfeasible`].

use std::cmp::Reverse;
use std::collections::HashMap;

use log::{debug, info, warn};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::models::{group_label, Country, DrawnGroup, Team, TournamentError};

/// Attempts between two progress log lines.
const LOG_INTERVAL: usize = 10;

/// Shape and search budget of a group draw.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct GroupDrawOptions {
    pub group_count: usize,
    pub group_size: usize,
    /// Full restarts before giving up.
    pub max_attempts: usize,
    /// Placements tried within one attempt.
    pub max_placements: usize,
}

impl Default for GroupDrawOptions {
    fn default() -> Self {
        Self {
            group_count: 8,
            group_size: 4,
            max_attempts: 100,
            max_placements: 1000,
        }
    }
}

impl GroupDrawOptions {
    pub fn required_teams(&self) -> usize {
        self.group_count * self.group_size
    }
}

/// Draw 32 teams into 8 groups of 4 with the thread RNG.
pub fn compute_group_draw(teams: &[Team]) -> Result<Vec<DrawnGroup>, TournamentError> {
    compute_group_draw_with(teams, GroupDrawOptions::default(), &mut rand::thread_rng())
}

/// Draw with explicit options and RNG.
pub fn compute_group_draw_with<R: Rng + ?Sized>(
    teams: &[Team],
    options: GroupDrawOptions,
    rng: &mut R,
) -> Result<Vec<DrawnGroup>, TournamentError> {
    let expected = options.required_teams();
    if teams.len() != expected {
        return Err(TournamentError::WrongTeamCount {
            context: "the group stage draw",
            expected,
            found: teams.len(),
        });
    }
    if teams.iter().filter(|t| t.is_current_champion).count() > 1 {
        return Err(TournamentError::MultipleChampions);
    }

    for attempt in 0..options.max_attempts {
        if let Some(groups) = assign_teams_to_groups(teams, &options, rng) {
            info!(
                "Group stage draw found a valid distribution after {} attempt(s)",
                attempt + 1
            );
            return Ok(finish_groups(groups));
        }
        if attempt % LOG_INTERVAL == 0 {
            debug!("Attempt {}: searching for a valid distribution...", attempt + 1);
        }
    }

    warn!(
        "Group stage draw exhausted {} attempts without a valid distribution",
        options.max_attempts
    );
    Err(TournamentError::DrawInfeasible {
        attempts: options.max_attempts,
    })
}

/// Whether `team` may join `group` without breaking the bombo or country rule.
pub fn is_valid_placement(group: &[&Team], team: &Team) -> bool {
    group.iter().all(|existing| {
        existing.bombo != team.bombo
            && (existing.country != team.country
                || existing.is_from_qualifying_stage
                || team.is_from_qualifying_stage)
    })
}

/// One attempt. Returns None if some team could not be placed.
fn assign_teams_to_groups<'a, R: Rng + ?Sized>(
    teams: &'a [Team],
    options: &GroupDrawOptions,
    rng: &mut R,
) -> Option<Vec<Vec<&'a Team>>> {
    let mut order = sort_by_constraints(teams, rng);
    let mut groups: Vec<Vec<&Team>> = vec![Vec::with_capacity(options.group_size); options.group_count];

    if let Some(pos) = order.iter().position(|t| t.is_current_champion) {
        let champion = order.remove(pos);
        groups[0].push(champion);
    }

    let mut placements = 0;
    for team in order {
        placements += 1;
        if placements > options.max_placements {
            return None;
        }
        let valid: Vec<usize> = groups
            .iter()
            .enumerate()
            .filter(|(_, g)| g.len() < options.group_size && is_valid_placement(g, team))
            .map(|(i, _)| i)
            .collect();
        let &idx = valid.choose(rng)?;
        groups[idx].push(team);
    }

    groups
        .iter()
        .all(|g| g.len() == options.group_size)
        .then_some(groups)
}

/// Hardest-to-place teams first; shuffled beforehand so equals land in random order.
fn sort_by_constraints<'a, R: Rng + ?Sized>(teams: &'a [Team], rng: &mut R) -> Vec<&'a Team> {
    let mut country_count: HashMap<Country, usize> = HashMap::new();
    for t in teams.iter().filter(|t| !t.is_from_qualifying_stage) {
        *country_count.entry(t.country).or_default() += 1;
    }

    let mut order: Vec<&Team> = teams.iter().collect();
    order.shuffle(rng);
    order.sort_by_key(|t| {
        let crowding = if t.is_from_qualifying_stage {
            0
        } else {
            country_count.get(&t.country).copied().unwrap_or(0)
        };
        (Reverse(t.is_current_champion), Reverse(crowding), Reverse(t.bombo))
    });
    order
}

fn finish_groups(groups: Vec<Vec<&Team>>) -> Vec<DrawnGroup> {
    groups
        .into_iter()
        .enumerate()
        .map(|(i, group)| {
            let mut teams: Vec<Team> = group.into_iter().cloned().collect();
            teams.sort_by_key(|t| t.bombo);
            DrawnGroup {
                label: group_label(i),
                teams,
            }
        })
        .collect()
}
