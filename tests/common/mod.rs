//! Fixtures shared by the integration tests.
#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use copa_tournament::models::{
    Bombo, Country, GameMatch, GroupId, Leg, MatchStage, MatchStatus, NewTeam, QualifyingRound,
    Team, TeamId, Tie,
};
use uuid::Uuid;

pub fn team(name: &str, country: Country, bombo: u8) -> Team {
    Team::from_new(
        Uuid::new_v4(),
        NewTeam::new(name, country, Bombo::new(bombo).unwrap()),
    )
}

pub fn qualifier(name: &str, country: Country, round: QualifyingRound, ranking: Option<u32>) -> Team {
    let mut new = NewTeam::new(name, country, Bombo::new(4).unwrap());
    new.is_from_qualifying_stage = true;
    new.qualifying_entry_stage = Some(round);
    new.ranking = ranking;
    Team::from_new(Uuid::new_v4(), new)
}

/// 32 teams, 8 per bombo. Country of team `i` in bombo `b` is the
/// `(i + b) % 10`th country, so a valid draw exists.
pub fn draw_pool() -> Vec<NewTeam> {
    let countries = Country::all();
    let mut pool = Vec::new();
    for b in 0..4u8 {
        for i in 0..8usize {
            let country = countries[(i + b as usize) % countries.len()];
            pool.push(NewTeam::new(
                format!("club {} {}", b + 1, i + 1),
                country,
                Bombo::new(b + 1).unwrap(),
            ));
        }
    }
    pool
}

pub fn draw_pool_teams() -> Vec<Team> {
    let tournament_id = Uuid::new_v4();
    draw_pool()
        .into_iter()
        .map(|new| Team::from_new(tournament_id, new))
        .collect()
}

pub fn kickoff() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 4, 1, 19, 30, 0).unwrap()
}

pub fn finished_group_match(group_id: GroupId, home: TeamId, away: TeamId, home_goals: u32, away_goals: u32) -> GameMatch {
    let stage = MatchStage::GroupStage { group_id, match_day: 1 };
    finish(GameMatch::new(Uuid::new_v4(), stage, home, away, kickoff(), "Estadio Monumental"), home_goals, away_goals)
}

/// A finished knockout match for `tie`.
pub fn leg(tie: &Tie, match_type: Leg, home: TeamId, away: TeamId, home_goals: u32, away_goals: u32) -> GameMatch {
    let stage = MatchStage::KnockoutStage { tie_id: tie.id, match_type };
    finish(GameMatch::new(tie.tournament_id, stage, home, away, kickoff(), "Maracanã"), home_goals, away_goals)
}

fn finish(mut game: GameMatch, home_goals: u32, away_goals: u32) -> GameMatch {
    game.home_goals = Some(home_goals);
    game.away_goals = Some(away_goals);
    game.status = MatchStatus::Finished;
    game
}
