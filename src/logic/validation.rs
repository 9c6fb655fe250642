//! Consistency checks for creating ties and matches and for submitting results.
//!
//! Nothing here mutates. Each `validate_*` function either returns the record
//! ready to be stored or the first rule it breaks.

use crate::models::{
    ensure_goals_in_range, GameMatch, Group, Leg, MatchResult, MatchStage, MatchStatus, NewMatch,
    NewTie, StageKind, Team, TeamId, Tie, TieStage, TournamentError, TournamentId, MATCH_DAYS,
};

/// Records a new tie is checked against.
#[derive(Clone, Copy, Debug)]
pub struct TieContext<'a> {
    pub tournament_id: TournamentId,
    pub teams: &'a [Team],
    pub ties: &'a [Tie],
}

/// Records a new match is checked against.
#[derive(Clone, Copy, Debug)]
pub struct MatchContext<'a> {
    pub tournament_id: TournamentId,
    pub teams: &'a [Team],
    pub groups: &'a [Group],
    pub ties: &'a [Tie],
    pub matches: &'a [GameMatch],
}

pub fn ensure_team_in_tournament(teams: &[Team], team_id: TeamId) -> Result<&Team, TournamentError> {
    teams
        .iter()
        .find(|t| t.id == team_id)
        .ok_or(TournamentError::TeamNotInTournament(team_id))
}

pub fn ensure_distinct_teams(first: TeamId, second: TeamId) -> Result<(), TournamentError> {
    if first == second {
        Err(TournamentError::SelfPairing)
    } else {
        Ok(())
    }
}

/// Same pair in either order, or either team already in another tie of `stage`.
pub fn ensure_no_conflicting_tie(
    ties: &[Tie],
    stage: TieStage,
    first: TeamId,
    second: TeamId,
) -> Result<(), TournamentError> {
    let in_stage = || ties.iter().filter(|t| t.stage == stage);
    if in_stage().any(|t| t.same_pair(first, second)) {
        return Err(TournamentError::DuplicateMatchup);
    }
    for team in [first, second] {
        if in_stage().any(|t| t.involves(team)) {
            return Err(TournamentError::TeamAlreadyCommitted(team));
        }
    }
    Ok(())
}

/// Check a new tie and build it. `is_single_match` defaults to true for the
/// final only.
pub fn validate_tie_creation(new: &NewTie, ctx: &TieContext<'_>) -> Result<Tie, TournamentError> {
    ensure_distinct_teams(new.first_team_id, new.second_team_id)?;
    for team_id in [new.first_team_id, new.second_team_id] {
        let team = ensure_team_in_tournament(ctx.teams, team_id)?;
        if !team.is_participating {
            return Err(TournamentError::TeamEliminated(team_id));
        }
        if matches!(new.stage, TieStage::Qualifying(_)) && !team.is_from_qualifying_stage {
            return Err(TournamentError::NotAQualifier(team_id));
        }
    }
    ensure_no_conflicting_tie(ctx.ties, new.stage, new.first_team_id, new.second_team_id)?;

    let is_single_match = new.is_single_match.unwrap_or(new.stage.is_final());
    Ok(Tie::new(
        ctx.tournament_id,
        new.stage,
        new.first_team_id,
        new.second_team_id,
        is_single_match,
    ))
}

/// Check a new match against its stage context and build it.
pub fn validate_match_creation(
    new: &NewMatch,
    ctx: &MatchContext<'_>,
) -> Result<GameMatch, TournamentError> {
    ensure_distinct_teams(new.home_team_id, new.away_team_id)?;
    ensure_team_in_tournament(ctx.teams, new.home_team_id)?;
    ensure_team_in_tournament(ctx.teams, new.away_team_id)?;

    let stage = match new.stage {
        StageKind::GroupStage => group_stage(new, ctx)?,
        StageKind::QualifyingStage | StageKind::KnockoutStage => tie_stage(new, ctx)?,
    };

    let duplicate = ctx.matches.iter().any(|m| {
        m.status != MatchStatus::Cancelled
            && m.stage == stage
            && m.home_team_id == new.home_team_id
            && m.away_team_id == new.away_team_id
    });
    if duplicate {
        return Err(TournamentError::DuplicateFixture);
    }

    Ok(GameMatch::new(
        ctx.tournament_id,
        stage,
        new.home_team_id,
        new.away_team_id,
        new.match_date,
        new.stadium.trim(),
    ))
}

/// A finished or cancelled match is frozen; finishing one needs both scores.
pub fn validate_result_submission(game: &GameMatch, result: &MatchResult) -> Result<(), TournamentError> {
    match game.status {
        MatchStatus::Finished => return Err(TournamentError::MatchAlreadyFinished(game.id)),
        MatchStatus::Cancelled => return Err(TournamentError::MatchCancelled(game.id)),
        MatchStatus::Pending => {}
    }
    if result.status == MatchStatus::Finished && (result.home_goals.is_none() || result.away_goals.is_none()) {
        return Err(TournamentError::MissingScore);
    }
    [
        result.home_goals,
        result.away_goals,
        result.first_team_penalty_goals,
        result.second_team_penalty_goals,
    ]
    .into_iter()
    .flatten()
    .try_for_each(ensure_goals_in_range)?;
    match (result.first_team_penalty_goals, result.second_team_penalty_goals) {
        (Some(_), None) => Err(TournamentError::MissingField("second_team_penalty_goals")),
        (None, Some(_)) => Err(TournamentError::MissingField("first_team_penalty_goals")),
        _ => Ok(()),
    }
}

fn forbid<T>(value: &Option<T>, field: &'static str, kind: StageKind) -> Result<(), TournamentError> {
    match value {
        Some(_) => Err(TournamentError::ForbiddenField {
            field,
            stage: kind.label(),
        }),
        None => Ok(()),
    }
}

fn group_stage(new: &NewMatch, ctx: &MatchContext<'_>) -> Result<MatchStage, TournamentError> {
    forbid(&new.tie_id, "tie_id", new.stage)?;
    forbid(&new.match_type, "match_type", new.stage)?;
    let group_id = new.group_id.ok_or(TournamentError::MissingField("group_id"))?;
    let match_day = new.match_day.ok_or(TournamentError::MissingField("match_day"))?;
    if !MATCH_DAYS.contains(&match_day) {
        return Err(TournamentError::InvalidMatchDay(match_day));
    }

    let group = ctx
        .groups
        .iter()
        .find(|g| g.id == group_id)
        .ok_or(TournamentError::NotFound {
            entity: "group",
            id: group_id,
        })?;
    for team_id in [new.home_team_id, new.away_team_id] {
        if !group.contains(team_id) {
            return Err(TournamentError::TeamNotInGroup(team_id));
        }
    }
    Ok(MatchStage::GroupStage { group_id, match_day })
}

fn tie_stage(new: &NewMatch, ctx: &MatchContext<'_>) -> Result<MatchStage, TournamentError> {
    forbid(&new.group_id, "group_id", new.stage)?;
    forbid(&new.match_day, "match_day", new.stage)?;
    let tie_id = new.tie_id.ok_or(TournamentError::MissingField("tie_id"))?;
    let match_type = new.match_type.ok_or(TournamentError::MissingField("match_type"))?;

    let tie = ctx
        .ties
        .iter()
        .find(|t| t.id == tie_id)
        .ok_or(TournamentError::NotFound {
            entity: "tie",
            id: tie_id,
        })?;
    if !new.stage.fits(tie.stage) {
        return Err(TournamentError::StageMismatch);
    }
    for team_id in [new.home_team_id, new.away_team_id] {
        if !tie.involves(team_id) {
            return Err(TournamentError::TeamNotInTie(team_id));
        }
    }
    if tie.is_completed {
        return Err(TournamentError::TieAlreadyCompleted);
    }

    let fits_tie = match match_type {
        Leg::SingleMatch => tie.is_single_match,
        Leg::FirstLeg | Leg::SecondLeg => !tie.is_single_match,
    };
    if !fits_tie {
        return Err(TournamentError::MatchTypeMismatch);
    }
    let played = match match_type {
        Leg::FirstLeg => tie.first_leg_played,
        Leg::SecondLeg => tie.second_leg_played,
        Leg::SingleMatch => tie.first_team_aggregate_goals.is_some(),
    };
    if played {
        return Err(TournamentError::LegAlreadyPlayed(match_type));
    }

    let scheduled = |leg: Leg| {
        ctx.matches
            .iter()
            .filter(|m| m.status != MatchStatus::Cancelled)
            .find(|m| m.stage.tie() == Some((tie_id, leg)))
    };
    if scheduled(match_type).is_some() {
        return Err(TournamentError::DuplicateFixture);
    }
    if match_type == Leg::SecondLeg {
        let first_leg = scheduled(Leg::FirstLeg).ok_or(TournamentError::FirstLegNotPlayed)?;
        if first_leg.home_team_id != new.away_team_id || first_leg.away_team_id != new.home_team_id {
            return Err(TournamentError::HomeAwayNotReversed);
        }
    }

    Ok(match new.stage {
        StageKind::QualifyingStage => MatchStage::QualifyingStage { tie_id, match_type },
        _ => MatchStage::KnockoutStage { tie_id, match_type },
    })
}
