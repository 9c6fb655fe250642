//! REST handlers. Every tournament route looks the tournament up, runs one
//! library operation under the write lock and maps its error kind to a status.

use actix_web::{
    get, post, put,
    http::StatusCode,
    web::{Data, Json, Path},
    HttpResponse, Responder,
};
use copa_tournament::import::{read_teams_csv, ImportError};
use copa_tournament::logic::{
    create_match, create_tie, group_tables, knockout_draw, record_tie_penalties, run_group_draw,
    run_qualifying_draw, submit_match_result,
};
use copa_tournament::models::{MatchResult, NewMatch, NewTeam, NewTie, PenaltyGoals};
use copa_tournament::{Country, ErrorKind, MatchId, Team, TieId, Tournament, TournamentError, TournamentId};
use serde::{Deserialize, Serialize};

use crate::config::ServerConfig;
use crate::AppState;

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct CreateTournamentBody {
    name: String,
    year: i32,
}

#[derive(Deserialize)]
struct TournamentPath {
    id: TournamentId,
}

#[derive(Deserialize)]
struct MatchPath {
    id: TournamentId,
    match_id: MatchId,
}

#[derive(Deserialize)]
struct TiePath {
    id: TournamentId,
    tie_id: TieId,
}

/// A team as returned to clients, with its logo as a full URL.
#[derive(Serialize)]
struct TeamView<'a> {
    #[serde(flatten)]
    team: &'a Team,
    logo_url: Option<String>,
}

fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::Validation => StatusCode::BAD_REQUEST,
        ErrorKind::Conflict | ErrorKind::State => StatusCode::CONFLICT,
        ErrorKind::Exhaustion => StatusCode::UNPROCESSABLE_ENTITY,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
    }
}

fn error_body(kind: ErrorKind, message: String) -> HttpResponse {
    HttpResponse::build(status_for(kind)).json(serde_json::json!({
        "error": message,
        "kind": kind.to_string(),
    }))
}

fn error_response(e: &TournamentError) -> HttpResponse {
    error_body(e.kind(), e.to_string())
}

fn import_error_response(e: &ImportError) -> HttpResponse {
    error_body(e.kind(), e.to_string())
}

fn no_tournament() -> HttpResponse {
    error_body(ErrorKind::NotFound, "No tournament".to_string())
}

/// Run `op` on tournament `id` under the write lock and serialize its result.
async fn with_tournament<T, F>(state: &AppState, id: TournamentId, op: F) -> HttpResponse
where
    T: Serialize,
    F: FnOnce(&mut Tournament) -> Result<T, TournamentError>,
{
    let mut store = state.write().await;
    let Some(tournament) = store.get_mut(&id) else {
        return no_tournament();
    };
    match op(tournament) {
        Ok(value) => HttpResponse::Ok().json(value),
        Err(e) => {
            log::debug!("Tournament {}: rejected ({}): {}", id, e.kind(), e);
            error_response(&e)
        }
    }
}

#[get("/api/health")]
pub async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "copa-tournament",
    })
}

#[get("/api/countries")]
pub async fn api_countries() -> impl Responder {
    HttpResponse::Ok().json(Country::all())
}

#[post("/api/tournaments")]
pub async fn api_create_tournament(state: AppState, body: Json<CreateTournamentBody>) -> HttpResponse {
    let tournament = Tournament::new(body.name.trim(), body.year);
    let response = HttpResponse::Ok().json(&tournament);
    log::info!("Created tournament {} ({} {})", tournament.id, tournament.name, tournament.year);
    state.write().await.insert(tournament.id, tournament);
    response
}

#[get("/api/tournaments/{id}")]
pub async fn api_get_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    with_tournament(&state, path.id, |t| Ok(t.clone())).await
}

#[get("/api/tournaments/{id}/teams")]
pub async fn api_list_teams(
    state: AppState,
    config: Data<ServerConfig>,
    path: Path<TournamentPath>,
) -> HttpResponse {
    let store = state.read().await;
    let Some(tournament) = store.get(&path.id) else {
        return no_tournament();
    };
    let teams: Vec<TeamView> = tournament
        .teams
        .iter()
        .map(|team| TeamView {
            team,
            logo_url: team.logo.as_deref().map(|logo| config.logo_url(logo)),
        })
        .collect();
    HttpResponse::Ok().json(teams)
}

#[post("/api/tournaments/{id}/teams")]
pub async fn api_register_team(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<NewTeam>,
) -> HttpResponse {
    let new = body.into_inner();
    with_tournament(&state, path.id, move |t| t.register_team(new)).await
}

/// Body is the CSV text; all rows are registered or none.
#[post("/api/tournaments/{id}/teams/import")]
pub async fn api_import_teams(state: AppState, path: Path<TournamentPath>, body: String) -> HttpResponse {
    let teams = match read_teams_csv(body.as_bytes()) {
        Ok(teams) => teams,
        Err(e) => {
            log::debug!("Tournament {}: CSV import rejected: {}", path.id, e);
            return import_error_response(&e);
        }
    };
    with_tournament(&state, path.id, move |t| t.register_teams(teams)).await
}

#[post("/api/tournaments/{id}/group-draw")]
pub async fn api_group_draw(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    with_tournament(&state, path.id, run_group_draw).await
}

#[get("/api/tournaments/{id}/qualifying-draw")]
pub async fn api_qualifying_draw(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    with_tournament(&state, path.id, |t| run_qualifying_draw(t)).await
}

#[post("/api/tournaments/{id}/ties")]
pub async fn api_create_tie(state: AppState, path: Path<TournamentPath>, body: Json<NewTie>) -> HttpResponse {
    with_tournament(&state, path.id, |t| create_tie(t, &body)).await
}

#[post("/api/tournaments/{id}/ties/{tie_id}/penalties")]
pub async fn api_record_penalties(
    state: AppState,
    path: Path<TiePath>,
    body: Json<PenaltyGoals>,
) -> HttpResponse {
    let penalties = body.into_inner();
    with_tournament(&state, path.id, |t| record_tie_penalties(t, path.tie_id, penalties)).await
}

#[post("/api/tournaments/{id}/matches")]
pub async fn api_create_match(state: AppState, path: Path<TournamentPath>, body: Json<NewMatch>) -> HttpResponse {
    with_tournament(&state, path.id, |t| create_match(t, &body)).await
}

#[put("/api/tournaments/{id}/matches/{match_id}/result")]
pub async fn api_submit_result(
    state: AppState,
    path: Path<MatchPath>,
    body: Json<MatchResult>,
) -> HttpResponse {
    with_tournament(&state, path.id, |t| submit_match_result(t, path.match_id, &body)).await
}

#[get("/api/tournaments/{id}/standings")]
pub async fn api_standings(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    with_tournament(&state, path.id, |t| Ok(group_tables(t))).await
}

#[get("/api/tournaments/{id}/knockout-draw")]
pub async fn api_knockout_draw(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    with_tournament(&state, path.id, |t| knockout_draw(t)).await
}
