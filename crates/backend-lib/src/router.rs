// ============================
// netguessr-backend-lib/src/router.rs
// ============================
//! HTTP surface: celeb lookups, the solo guessing game, and party endpoints.
//!
//! Handlers stay thin. They resolve the caller's session (minting one on
//! first contact), validate the untrusted request fields, and delegate to
//! the party service or celeb directory. All identity resolution lives
//! here; the core only ever sees resolved ids.
use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use netguessr_common::{
    Celeb, CreatePartyRequest, GameStart, GuessRequest, GuessResult, JoinPartyRequest,
    LeavePartyRequest,
};

use crate::celebs::parse_net_worth;
use crate::error::AppError;
use crate::scoring::score_guess;
use crate::session::PlayerSession;
use crate::AppState;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "netguessr_sid";

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/celeb/random", get(celeb_random))
        .route("/celeb/{name}", get(celeb_by_name))
        .route("/game/start", get(game_start))
        .route("/game/submit", post(game_submit))
        .route("/game/restart", get(game_restart))
        .route("/party/create", post(party_create))
        .route("/party/join", post(party_join))
        .route("/party/leave", post(party_leave))
        .route("/party/info", get(party_info))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

fn cookie_token(headers: &HeaderMap) -> Option<String> {
    let cookies = headers.get(header::COOKIE)?.to_str().ok()?;
    cookies.split(';').find_map(|pair| {
        pair.trim()
            .strip_prefix(SESSION_COOKIE)
            .and_then(|rest| rest.strip_prefix('='))
            .map(str::to_string)
    })
}

/// Resolve the caller's session token, minting a fresh session on first
/// contact (or for a stale cookie). The second element is the Set-Cookie
/// value to attach when one was minted.
fn resolve_session(
    state: &AppState,
    headers: &HeaderMap,
) -> Result<(String, Option<HeaderValue>), AppError> {
    if let Some(token) = cookie_token(headers) {
        if state.sessions.get(&token).is_some() {
            return Ok((token, None));
        }
    }
    let token = state.sessions.create();
    let cookie = format!("{SESSION_COOKIE}={token}; Path=/; HttpOnly");
    let value = HeaderValue::from_str(&cookie).map_err(|e| AppError::Internal(e.to_string()))?;
    Ok((token, Some(value)))
}

fn session_of(state: &AppState, token: &str) -> Result<PlayerSession, AppError> {
    state
        .sessions
        .get(token)
        .ok_or_else(|| AppError::Internal("session vanished".to_string()))
}

fn with_session_cookie(mut response: Response, cookie: Option<HeaderValue>) -> Response {
    if let Some(value) = cookie {
        response.headers_mut().append(header::SET_COOKIE, value);
    }
    response
}

async fn index() -> &'static str {
    "Hello, World!"
}

async fn celeb_random(State(state): State<AppState>) -> Result<Json<Celeb>, AppError> {
    state
        .celebs
        .random()
        .map(Json)
        .ok_or_else(|| AppError::Internal("celeb dataset is empty".to_string()))
}

async fn celeb_by_name(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<Celeb>, AppError> {
    state
        .celebs
        .get(&name)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("no such celeb: {name}")))
}

/// Start (or continue) a solo game: pick a random celeb into the session
/// and report the current solo score.
async fn game_start(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let (token, cookie) = resolve_session(&state, &headers)?;
    let celeb = state
        .celebs
        .random()
        .ok_or_else(|| AppError::Internal("celeb dataset is empty".to_string()))?;

    state
        .sessions
        .update(&token, |s| s.celeb = Some(celeb.name.clone()));
    let score = session_of(&state, &token)?.solo_score;

    let body = GameStart {
        celeb_name: celeb.name,
        celeb_image_url: celeb.image,
        score,
    };
    Ok(with_session_cookie(Json(body).into_response(), cookie))
}

/// Score a guess against the session's current celeb. Points land on the
/// solo score always, and on the caller's party member when they are in a
/// party, which is also the moment that party gets pruned.
async fn game_submit(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<GuessRequest>,
) -> Result<Response, AppError> {
    let (token, cookie) = resolve_session(&state, &headers)?;
    let session = session_of(&state, &token)?;

    let Some(celeb) = session
        .celeb
        .as_deref()
        .and_then(|name| state.celebs.get(name))
    else {
        let body = Json(json!({
            "message": "You are not currently in a game.",
            "statcode": "nogame",
        }));
        return Ok(with_session_cookie(
            (StatusCode::BAD_REQUEST, body).into_response(),
            cookie,
        ));
    };

    let net_worth = parse_net_worth(&celeb.networth)?;
    let outcome = score_guess(req.guess, net_worth);

    state
        .sessions
        .update(&token, |s| s.solo_score += outcome.points);
    let score = session.solo_score + outcome.points;

    if let Some(code) = session.party_code.as_deref() {
        state.parties.submit_score(&session.user_id, code, outcome.points);
    }

    let body = GuessResult {
        message: outcome.message.to_string(),
        statcode: outcome.statcode.to_string(),
        score,
        celeb_data: Some(celeb),
    };
    Ok(with_session_cookie(Json(body).into_response(), cookie))
}

async fn game_restart(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let (token, cookie) = resolve_session(&state, &headers)?;
    state.sessions.update(&token, |s| {
        s.celeb = None;
        s.solo_score = 0;
    });
    Ok(with_session_cookie("OK".into_response(), cookie))
}

#[axum::debug_handler]
async fn party_create(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<CreatePartyRequest>,
) -> Result<Response, AppError> {
    let (token, cookie) = resolve_session(&state, &headers)?;
    let session = session_of(&state, &token)?;

    let created = state.parties.create_room(
        &session.user_id,
        session.party_code.as_deref(),
        &req.passcode,
        req.display_name.as_deref(),
    );
    state
        .sessions
        .update(&token, |s| s.party_code = Some(created.room_code.clone()));

    Ok(with_session_cookie(Json(created).into_response(), cookie))
}

async fn party_join(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<JoinPartyRequest>,
) -> Result<Response, AppError> {
    let (token, cookie) = resolve_session(&state, &headers)?;
    if req.code.is_empty() {
        return Err(AppError::BadRequest("missing room code".to_string()));
    }
    let session = session_of(&state, &token)?;

    let ack = state.parties.join_room(
        &session.user_id,
        session.party_code.as_deref(),
        &req.code,
        &req.passcode,
        req.display_name.as_deref(),
    )?;
    state
        .sessions
        .update(&token, |s| s.party_code = Some(req.code.clone()));

    Ok(with_session_cookie(Json(ack).into_response(), cookie))
}

async fn party_leave(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<LeavePartyRequest>,
) -> Result<Response, AppError> {
    let (token, cookie) = resolve_session(&state, &headers)?;
    let session = session_of(&state, &token)?;

    let code = req
        .code
        .or_else(|| session.party_code.clone())
        .ok_or_else(|| AppError::BadRequest("not in a party and no code supplied".to_string()))?;

    let ack = state.parties.leave_room(&session.user_id, &code);
    state.sessions.update(&token, |s| {
        if s.party_code.as_deref() == Some(code.as_str()) {
            s.party_code = None;
        }
    });

    Ok(with_session_cookie(Json(ack).into_response(), cookie))
}

async fn party_info(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let (token, cookie) = resolve_session(&state, &headers)?;
    let session = session_of(&state, &token)?;

    let code = session
        .party_code
        .clone()
        .ok_or_else(|| AppError::BadRequest("not in a party".to_string()))?;

    let info = state.parties.room_info(&session.user_id, &code)?;
    Ok(with_session_cookie(Json(info).into_response(), cookie))
}
