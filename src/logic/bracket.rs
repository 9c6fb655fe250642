//! Knockout stage: who goes through from the groups, how they are paired,
//! and the single-elimination bracket those pairings lead into.
//!
//! The bracket is a shape only. Winners are never simulated; a caller that
//! knows results can ask [`Bracket::resolve`] which later-round sides are set.

use std::collections::HashMap;

use log::info;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::logic::ranking::rank_group;
use crate::models::{
    Bracket, BracketMatchup, Feed, GameMatch, GroupStandings, KnockoutEntrant, Matchup,
    QualifiedTeams, ResolvedMatchup, Round, TeamId, TournamentError,
};

/// Group winners and runners-up, ranked with the head-to-head tie-break.
pub fn extract_qualified_teams(
    groups: &[GroupStandings],
    matches: &[GameMatch],
) -> Result<QualifiedTeams, TournamentError> {
    let too_small: Vec<String> = groups
        .iter()
        .filter(|g| g.rows.len() < 2)
        .map(|g| g.label.clone())
        .collect();
    if !too_small.is_empty() {
        return Err(TournamentError::GroupsTooSmall(too_small));
    }

    let mut qualified = QualifiedTeams::default();
    for group in groups {
        let ranked = rank_group(&group.rows, matches);
        let entrant = |position: u8| KnockoutEntrant {
            tournament_team_id: ranked[usize::from(position) - 1].tournament_team_id,
            group_id: group.group_id,
            group_label: group.label.clone(),
            position,
        };
        qualified.first_place.push(entrant(1));
        qualified.second_place.push(entrant(2));
    }
    Ok(qualified)
}

/// Pair every group winner with a random runner-up.
pub fn draw_knockout_matchups(
    first: &[KnockoutEntrant],
    second: &[KnockoutEntrant],
) -> Result<Vec<Matchup>, TournamentError> {
    draw_knockout_matchups_with(first, second, &mut rand::thread_rng())
}

pub fn draw_knockout_matchups_with<R: Rng + ?Sized>(
    first: &[KnockoutEntrant],
    second: &[KnockoutEntrant],
    rng: &mut R,
) -> Result<Vec<Matchup>, TournamentError> {
    if first.len() != second.len() {
        return Err(TournamentError::UnbalancedKnockoutEntrants {
            first: first.len(),
            second: second.len(),
        });
    }

    let mut winners = first.to_vec();
    let mut runners_up = second.to_vec();
    winners.shuffle(rng);
    runners_up.shuffle(rng);

    let count = winners.len();
    let matchups: Vec<Matchup> = winners
        .into_iter()
        .zip(runners_up)
        .enumerate()
        .map(|(i, (first, second))| Matchup {
            id: matchup_id(count, i),
            first,
            second,
        })
        .collect();
    info!("Knockout draw produced {} matchups", matchups.len());
    Ok(matchups)
}

/// Build every round from the first-round matchups down to the final.
/// Consecutive matchups feed the same next-round matchup.
pub fn build_bracket_shape(matchups: Vec<Matchup>) -> Result<Bracket, TournamentError> {
    let count = matchups.len();
    if count == 0 || !count.is_power_of_two() {
        return Err(TournamentError::InvalidBracketSize(count));
    }

    let first_round = Round {
        name: round_name(count),
        matchups: matchups
            .into_iter()
            .map(|m| BracketMatchup {
                id: m.id,
                feed: Feed::Teams {
                    first: m.first,
                    second: m.second,
                },
            })
            .collect(),
    };

    let mut rounds = vec![first_round];
    loop {
        let previous: Vec<String> = match rounds.last() {
            Some(round) if round.matchups.len() > 1 => {
                round.matchups.iter().map(|m| m.id.clone()).collect()
            }
            _ => break,
        };
        let size = previous.len() / 2;
        let matchups = previous
            .chunks(2)
            .enumerate()
            .map(|(i, pair)| BracketMatchup {
                id: matchup_id(size, i),
                feed: Feed::Winners {
                    from: [pair[0].clone(), pair[1].clone()],
                },
            })
            .collect();
        rounds.push(Round {
            name: round_name(size),
            matchups,
        });
    }

    Ok(Bracket { rounds })
}

impl Bracket {
    /// Sides of every later-round matchup that are known from `winners`
    /// (matchup id to winning team).
    pub fn resolve(&self, winners: &HashMap<String, TeamId>) -> Vec<ResolvedMatchup> {
        self.rounds
            .iter()
            .skip(1)
            .flat_map(|r| r.matchups.iter())
            .map(|m| {
                let side = |i: usize| m.from().get(i).and_then(|id| winners.get(id)).copied();
                ResolvedMatchup {
                    id: m.id.clone(),
                    first: side(0),
                    second: side(1),
                }
            })
            .collect()
    }
}

fn round_prefix(matchups: usize) -> String {
    match matchups {
        8 => "R16".to_string(),
        4 => "QF".to_string(),
        2 => "SF".to_string(),
        1 => "F".to_string(),
        n => format!("R{}", n * 2),
    }
}

/// `R16_1`, `QF_3`, ... and a bare `F` for the final.
fn matchup_id(round_size: usize, index: usize) -> String {
    if round_size == 1 {
        round_prefix(1)
    } else {
        format!("{}_{}", round_prefix(round_size), index + 1)
    }
}

fn round_name(matchups: usize) -> String {
    match matchups {
        8 => "Round of 16".to_string(),
        4 => "Quarterfinals".to_string(),
        2 => "Semifinals".to_string(),
        1 => "Final".to_string(),
        n => format!("Round of {}", n * 2),
    }
}
