//! Three-phase qualifying draw.
//!
//! Phase 1 seeds the six round-one entrants into two pots of three. Phase 2
//! takes the thirteen round-two entrants plus the three phase-1 winners and
//! plays a seeded 8 vs 8 draw. Phase 3 pairs the eight phase-2 winners into
//! four ties whose winners go to the group stage.

use log::info;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::models::{
    DrawSummary, QualifyingDraw, QualifyingMatchup, QualifyingRound, QualifyingSlot, Team,
    TournamentError,
};

pub const PHASE1_TEAMS: usize = 6;
pub const PHASE2_DIRECT_TEAMS: usize = 13;
/// Seeded teams in phase 2's first pot.
const PHASE2_SEEDED: usize = 8;
/// Winners of phase 3 that reach the group stage.
pub const QUALIFIED_TO_GROUP_STAGE: usize = 4;

/// Run the full qualifying draw with the thread RNG.
pub fn compute_qualifying_draw(teams: &[Team]) -> Result<QualifyingDraw, TournamentError> {
    compute_qualifying_draw_with(teams, &mut rand::thread_rng())
}

pub fn compute_qualifying_draw_with<R: Rng + ?Sized>(
    teams: &[Team],
    rng: &mut R,
) -> Result<QualifyingDraw, TournamentError> {
    let qualifiers: Vec<&Team> = teams.iter().filter(|t| t.is_from_qualifying_stage).collect();
    let entering = |round: QualifyingRound| {
        let mut entrants: Vec<&Team> = qualifiers
            .iter()
            .copied()
            .filter(|t| t.qualifying_entry_stage == Some(round))
            .collect();
        sort_by_ranking(&mut entrants);
        entrants
    };
    let phase1_teams = entering(QualifyingRound::First);
    let phase2_teams = entering(QualifyingRound::Second);

    check_count("phase 1 of the qualifying draw", PHASE1_TEAMS, phase1_teams.len())?;
    check_count("phase 2 of the qualifying draw", PHASE2_DIRECT_TEAMS, phase2_teams.len())?;

    let phase1 = draw_phase1(&phase1_teams, rng);
    let phase2 = draw_phase2(&phase2_teams, &phase1, rng);
    let phase3 = draw_phase3(&phase2, rng);

    info!(
        "Qualifying draw complete: {} + {} + {} matchups",
        phase1.len(),
        phase2.len(),
        phase3.len()
    );

    let summary = DrawSummary {
        total_teams: qualifiers.len(),
        phase1_teams: phase1_teams.len(),
        phase2_teams: phase2_teams.len() + phase1.len(),
        phase3_teams: phase2.len(),
        phase1_matches: phase1.len(),
        phase2_matches: phase2.len(),
        phase3_matches: phase3.len(),
        qualified_to_group_stage: QUALIFIED_TO_GROUP_STAGE,
    };
    Ok(QualifyingDraw {
        phase1,
        phase2,
        phase3,
        summary,
    })
}

/// Best ranking first; unranked teams after all ranked ones, in input order.
fn sort_by_ranking(teams: &mut [&Team]) {
    teams.sort_by_key(|t| (t.ranking.is_none(), t.ranking));
}

fn check_count(context: &'static str, expected: usize, found: usize) -> Result<(), TournamentError> {
    if found == expected {
        Ok(())
    } else {
        Err(TournamentError::WrongTeamCount {
            context,
            expected,
            found,
        })
    }
}

fn draw_phase1<R: Rng + ?Sized>(ranked: &[&Team], rng: &mut R) -> Vec<QualifyingMatchup> {
    let (top, bottom) = ranked.split_at(PHASE1_TEAMS / 2);
    let mut pot_a = slots(top);
    let mut pot_b = slots(bottom);
    pot_a.shuffle(rng);
    pot_b.shuffle(rng);
    pair_pots(1, pot_a, pot_b, winner_of)
}

fn draw_phase2<R: Rng + ?Sized>(
    ranked: &[&Team],
    phase1: &[QualifyingMatchup],
    rng: &mut R,
) -> Vec<QualifyingMatchup> {
    let (seeded, rest) = ranked.split_at(PHASE2_SEEDED);
    let mut pot1 = slots(seeded);
    let mut pot2 = slots(rest);
    pot2.extend(phase1.iter().map(|m| QualifyingSlot::Placeholder {
        label: m.winner_placeholder.clone(),
    }));
    pot1.shuffle(rng);
    pot2.shuffle(rng);
    pair_pots(2, pot1, pot2, winner_of)
}

fn draw_phase3<R: Rng + ?Sized>(phase2: &[QualifyingMatchup], rng: &mut R) -> Vec<QualifyingMatchup> {
    let mut winners: Vec<QualifyingSlot> = phase2
        .iter()
        .map(|m| QualifyingSlot::Placeholder {
            label: m.winner_placeholder.clone(),
        })
        .collect();
    winners.shuffle(rng);

    let mut firsts = Vec::with_capacity(winners.len() / 2);
    let mut seconds = Vec::with_capacity(winners.len() / 2);
    let mut iter = winners.into_iter();
    while let (Some(a), Some(b)) = (iter.next(), iter.next()) {
        firsts.push(a);
        seconds.push(b);
    }
    pair_pots(3, firsts, seconds, |a, b| format!("Qualified to Groups: {}", winner_of(a, b)))
}

fn slots(teams: &[&Team]) -> Vec<QualifyingSlot> {
    teams
        .iter()
        .map(|t| QualifyingSlot::Team { team: (*t).clone() })
        .collect()
}

fn winner_of(first: &QualifyingSlot, second: &QualifyingSlot) -> String {
    format!("Winner of {} vs {}", first.display_name(), second.display_name())
}

fn pair_pots(
    phase: u8,
    firsts: Vec<QualifyingSlot>,
    seconds: Vec<QualifyingSlot>,
    placeholder: impl Fn(&QualifyingSlot, &QualifyingSlot) -> String,
) -> Vec<QualifyingMatchup> {
    firsts
        .into_iter()
        .zip(seconds)
        .enumerate()
        .map(|(i, (first, second))| QualifyingMatchup {
            id: format!("phase{}-match-{}", phase, i + 1),
            match_number: i + 1,
            phase,
            winner_placeholder: placeholder(&first, &second),
            first,
            second,
        })
        .collect()
}
