//! Single binary web server exposing the bracket engine as a JSON REST API.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default. Override with env: HOST, PORT, RUST_LOG.

use actix_web::{
    get, post, put,
    web::{Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use knockout_bracket_web::{
    BracketEngine, Entrant, EventCategory, EventFormat, EventId, InMemoryStore, MatchId, Member, Participant,
    Roster, ServerConfig, SlotId, TournamentError,
};
use serde::Deserialize;
use std::sync::Arc;

type AppState = Data<BracketEngine<InMemoryStore, Roster>>;

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct CreateEventBody {
    name: String,
    #[serde(default)]
    format: EventFormat,
    #[serde(default)]
    category: Option<EventCategory>,
}

/// One roster line as posted by the coordinator.
#[derive(Deserialize)]
struct ParticipantBody {
    id: String,
    #[serde(default)]
    seed: u32,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    members: Vec<Member>,
}

#[derive(Deserialize)]
struct GenerateBody {
    participants: Vec<ParticipantBody>,
}

#[derive(Deserialize)]
struct RecordWinnerBody {
    winner: SlotId,
}

/// Path segment: event id (e.g. /api/events/{id})
#[derive(Deserialize)]
struct EventPath {
    id: EventId,
}

/// Path segments: event id and round number (e.g. /api/events/{id}/rounds/{round}/finish)
#[derive(Deserialize)]
struct EventRoundPath {
    id: EventId,
    round: u32,
}

#[derive(Deserialize)]
struct MatchPath {
    match_id: MatchId,
}

fn error_response(e: TournamentError) -> HttpResponse {
    let body = serde_json::json!({ "error": e.to_string() });
    match e {
        TournamentError::NotFound(_) => HttpResponse::NotFound().json(body),
        TournamentError::InvalidInput(_)
        | TournamentError::InvalidState { .. }
        | TournamentError::RoundIncomplete { .. } => HttpResponse::BadRequest().json(body),
        TournamentError::AlreadyCompleted(_)
        | TournamentError::RoundAlreadyAdvanced { .. }
        | TournamentError::Conflict(_) => HttpResponse::Conflict().json(body),
        TournamentError::Storage(_) => {
            log::error!("{}", e);
            HttpResponse::InternalServerError().json(body)
        }
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "knockout-bracket-web",
    })
}

/// Create a new event (returns it with id; client stores id for subsequent requests).
#[post("/api/events")]
async fn api_create_event(state: AppState, body: Json<CreateEventBody>) -> HttpResponse {
    match state
        .create_event(&body.name, body.format, body.category)
        .await
    {
        Ok(event) => HttpResponse::Ok().json(event),
        Err(e) => error_response(e),
    }
}

/// Every event, oldest first.
#[get("/api/events")]
async fn api_list_events(state: AppState) -> HttpResponse {
    match state.list_events().await {
        Ok(events) => HttpResponse::Ok().json(events),
        Err(e) => error_response(e),
    }
}

#[get("/api/events/{id}")]
async fn api_get_event(state: AppState, path: Path<EventPath>) -> HttpResponse {
    match state.get_event(path.id).await {
        Ok(event) => HttpResponse::Ok().json(event),
        Err(e) => error_response(e),
    }
}

/// Open a drawn event for play.
#[post("/api/events/{id}/start")]
async fn api_start_event(state: AppState, path: Path<EventPath>) -> HttpResponse {
    match state.start_event(path.id).await {
        Ok(event) => HttpResponse::Ok().json(event),
        Err(e) => error_response(e),
    }
}

/// Draw round 1 (replaces every existing round of the event).
#[post("/api/events/{id}/generate")]
async fn api_generate_bracket(
    state: AppState,
    path: Path<EventPath>,
    body: Json<GenerateBody>,
) -> HttpResponse {
    let event = match state.get_event(path.id).await {
        Ok(event) => event,
        Err(e) => return error_response(e),
    };
    let body = body.into_inner();
    let mut participants = Vec::with_capacity(body.participants.len());
    let mut entrants = Vec::with_capacity(body.participants.len());
    for p in body.participants {
        let slot = event.format.slot(p.id.trim());
        participants.push(Participant::new(slot.clone(), p.seed));
        entrants.push((
            slot,
            Entrant {
                name: p.name,
                members: p.members,
            },
        ));
    }

    match state
        .generate_named_bracket(event.id, &participants, entrants)
        .await
    {
        Ok(summary) => HttpResponse::Ok().json(summary),
        Err(e) => error_response(e),
    }
}

/// Record the winner of one match. The round only advances via the finish endpoint.
#[put("/api/matches/{match_id}/winner")]
async fn api_record_winner(
    state: AppState,
    path: Path<MatchPath>,
    body: Json<RecordWinnerBody>,
) -> HttpResponse {
    match state
        .record_winner(path.match_id, body.into_inner().winner)
        .await
    {
        Ok(game) => HttpResponse::Ok().json(game),
        Err(e) => error_response(e),
    }
}

/// Finish a round: create the next one, or complete the event when one winner remains.
#[post("/api/events/{id}/rounds/{round}/finish")]
async fn api_finish_round(state: AppState, path: Path<EventRoundPath>) -> HttpResponse {
    match state.finish_round(path.id, path.round).await {
        Ok(outcome) => HttpResponse::Ok().json(outcome),
        Err(e) => error_response(e),
    }
}

/// Bracket by round; future rounds stay hidden until the previous round is finished.
#[get("/api/events/{id}/bracket")]
async fn api_get_bracket(state: AppState, path: Path<EventPath>) -> HttpResponse {
    match state.bracket(path.id).await {
        Ok(view) => HttpResponse::Ok().json(view),
        Err(e) => error_response(e),
    }
}

/// Coordinator list: matches still to be played in live events.
#[get("/api/matches/pending")]
async fn api_pending_matches(state: AppState) -> HttpResponse {
    match state.pending_matches().await {
        Ok(pending) => HttpResponse::Ok().json(pending),
        Err(e) => error_response(e),
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let config = ServerConfig::from_env();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or(config.log_filter.as_str()));
    for warning in &config.warnings {
        log::warn!("{}", warning);
    }

    let bind = (config.host.as_str(), config.port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let engine = BracketEngine::new(Arc::new(InMemoryStore::new()), Arc::new(Roster::new()));
    let state = Data::new(engine);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(api_health)
            .service(api_create_event)
            .service(api_list_events)
            .service(api_get_event)
            .service(api_start_event)
            .service(api_generate_bracket)
            .service(api_record_winner)
            .service(api_finish_round)
            .service(api_get_bracket)
            .service(api_pending_matches)
    })
    .bind(bind)?
    .run()
    .await
}
