//! HTTP API over the game service.
//!
//! Each caller is identified by the `session_id` path segment. Bodies and
//! responses are JSON.

use axum::{
    Json, Router,
    body::Body,
    extract::{Path, State},
    http::{Request, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument, warn};

use crate::games::guessing::{GuessError, GuessOutcome, Message, SessionView, StartOutcome};
use crate::leaderboard::{LeaderboardEntry, LeaderboardError};
use crate::service::GameService;

/// Body of a start request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StartRequest {
    /// `easy`, `medium`, or `hard`. Anything else plays medium.
    #[serde(default)]
    pub difficulty: Option<String>,
}

/// A guess as sent by the client: JSON number or free text.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawGuess {
    /// A JSON number, possibly non-integral.
    Number(serde_json::Number),
    /// Text typed by the player.
    Text(String),
}

impl RawGuess {
    fn into_text(self) -> String {
        match self {
            RawGuess::Number(n) => n.to_string(),
            RawGuess::Text(s) => s,
        }
    }
}

/// Body of a guess request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuessRequest {
    /// The guess.
    pub guess: RawGuess,
}

/// Whether a caller has a game in progress.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameStatusResponse {
    /// True while a game is in progress.
    pub in_progress: bool,
    /// The game, when in progress.
    pub view: Option<SessionView>,
}

/// Messages-only response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessagesResponse {
    /// Player-facing messages.
    pub messages: Vec<Message>,
}

/// Error response carrying player-facing messages.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    messages: Vec<Message>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(MessagesResponse {
                messages: self.messages,
            }),
        )
            .into_response()
    }
}

impl From<GuessError> for ApiError {
    fn from(err: GuessError) -> Self {
        let status = match &err {
            GuessError::NoActiveSession => StatusCode::CONFLICT,
            GuessError::InvalidInput(_) => StatusCode::UNPROCESSABLE_ENTITY,
            GuessError::Unrecorded { error, .. } => {
                error!(%error, "Failed to record score");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self {
            status,
            messages: err.messages(),
        }
    }
}

impl From<LeaderboardError> for ApiError {
    fn from(err: LeaderboardError) -> Self {
        error!(error = %err, "Leaderboard unavailable");
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            messages: vec![Message::error("Leaderboard unavailable.")],
        }
    }
}

/// Builds the API router.
pub fn router(service: GameService) -> Router {
    Router::new()
        .route("/games/{session_id}", get(get_game))
        .route("/games/{session_id}/start", post(start_game))
        .route("/games/{session_id}/guess", post(submit_guess))
        .route("/games/{session_id}/reset", post(reset_game))
        .route("/leaderboard", get(get_leaderboard))
        .layer(middleware::from_fn(log_request))
        .with_state(service)
}

async fn log_request(req: Request<Body>, next: Next) -> Response {
    let method = req.method().clone();
    let uri = req.uri().clone();
    let response = next.run(req).await;
    let status = response.status();
    if status.is_server_error() {
        warn!(%method, %uri, %status, "Request failed");
    } else {
        info!(%method, %uri, %status, "Request handled");
    }
    response
}

#[instrument(skip(service))]
async fn get_game(
    State(service): State<GameService>,
    Path(session_id): Path<String>,
) -> Json<GameStatusResponse> {
    let view = service.session_view(&session_id);
    Json(GameStatusResponse {
        in_progress: view.is_some(),
        view,
    })
}

/// The body is optional; without one the default difficulty is played.
#[instrument(skip(service, req))]
async fn start_game(
    State(service): State<GameService>,
    Path(session_id): Path<String>,
    req: Option<Json<StartRequest>>,
) -> Json<StartOutcome> {
    let req = req.map(|Json(req)| req).unwrap_or_default();
    Json(service.start_game(&session_id, req.difficulty.as_deref()))
}

#[instrument(skip(service, req))]
async fn submit_guess(
    State(service): State<GameService>,
    Path(session_id): Path<String>,
    Json(req): Json<GuessRequest>,
) -> Result<Json<GuessOutcome>, ApiError> {
    let raw = req.guess.into_text();
    let outcome = service.submit_guess(&session_id, &raw)?;
    Ok(Json(outcome))
}

#[instrument(skip(service))]
async fn reset_game(
    State(service): State<GameService>,
    Path(session_id): Path<String>,
) -> Json<MessagesResponse> {
    Json(MessagesResponse {
        messages: vec![service.reset_game(&session_id)],
    })
}

#[instrument(skip(service))]
async fn get_leaderboard(
    State(service): State<GameService>,
) -> Result<Json<Vec<LeaderboardEntry>>, ApiError> {
    Ok(Json(service.leaderboard()?))
}

/// Serves the API on `host:port` until the process exits.
///
/// # Errors
///
/// Returns an I/O error if the listener cannot bind or the server fails.
#[instrument(skip(service))]
pub async fn serve(service: GameService, host: &str, port: u16) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind((host, port)).await?;
    info!("Server ready at http://{}:{}/", host, port);
    axum::serve(listener, router(service)).await
}
