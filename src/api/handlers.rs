//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use tracing::{error, info, warn};

use crate::{
    error::{AnswerError, DispatchError},
    events::{Command, ConfirmationToken},
    services::PendingPrompt,
    state::AppState,
};
use super::responses::{AnswerRequest, AnswerResponse, ApiResponse, HealthResponse, StatusResponse};

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<T>)>;

/// Route a command through the dispatcher and turn the outcome into a response
async fn run_command(state: &AppState, command: Command, message: &str) -> ApiResult<ApiResponse> {
    match state.send_command(command).await {
        Ok(snapshot) => {
            info!("{} endpoint called - {}", command.name(), snapshot.label);
            Ok(Json(ApiResponse::ok(message.to_string(), snapshot)))
        }
        Err(DispatchError::Rejected(e)) => {
            warn!("{} rejected: {}", command.name(), e);
            let status = if e.is_out_of_range() {
                StatusCode::UNPROCESSABLE_ENTITY
            } else {
                StatusCode::CONFLICT
            };
            Err((status, Json(ApiResponse::error(e.to_string(), state.snapshot()))))
        }
        Err(e @ DispatchError::Closed) => {
            error!("Failed to run {}: {}", command.name(), e);
            Err((
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ApiResponse::error(e.to_string(), state.snapshot())),
            ))
        }
    }
}

/// Handle POST /start - Start the current work phase
pub async fn start_handler(State(state): State<Arc<AppState>>) -> ApiResult<ApiResponse> {
    run_command(&state, Command::Start, "Work started").await
}

/// Handle POST /pause - Freeze the running countdown
pub async fn pause_handler(State(state): State<Arc<AppState>>) -> ApiResult<ApiResponse> {
    run_command(&state, Command::Pause, "Timer paused").await
}

/// Handle POST /resume - Continue a paused countdown
pub async fn resume_handler(State(state): State<Arc<AppState>>) -> ApiResult<ApiResponse> {
    run_command(&state, Command::Resume, "Timer resumed").await
}

/// Handle POST /toggle - Start, pause or resume depending on the current state
pub async fn toggle_handler(State(state): State<Arc<AppState>>) -> ApiResult<ApiResponse> {
    run_command(&state, Command::Toggle, "Timer toggled").await
}

/// Handle POST /stop - End the current session immediately
pub async fn stop_handler(State(state): State<Arc<AppState>>) -> ApiResult<ApiResponse> {
    run_command(&state, Command::Stop, "Session stopped").await
}

/// Handle POST /session/:idx - Jump to a session
pub async fn select_session_handler(
    State(state): State<Arc<AppState>>,
    Path(idx): Path<usize>,
) -> ApiResult<ApiResponse> {
    run_command(&state, Command::SelectSession(idx), "Session selected").await
}

/// Handle POST /phase/:idx - Jump to a work phase of the current session
pub async fn select_phase_handler(
    State(state): State<Arc<AppState>>,
    Path(idx): Path<usize>,
) -> ApiResult<ApiResponse> {
    run_command(&state, Command::SelectPhase(idx), "Phase selected").await
}

/// Handle GET /confirmations - List outstanding prompts
pub async fn list_confirmations_handler(State(state): State<Arc<AppState>>) -> Json<Vec<PendingPrompt>> {
    Json(state.pending_confirmations())
}

/// Handle POST /confirmations/:token - Answer a prompt explicitly
pub async fn answer_handler(
    State(state): State<Arc<AppState>>,
    Path(token): Path<u64>,
    Json(request): Json<AnswerRequest>,
) -> ApiResult<AnswerResponse> {
    let token = ConfirmationToken(token);
    match state.answer(token, request.option) {
        Ok(()) => Ok(Json(AnswerResponse::new(
            "ok",
            format!("Answered '{}'", request.option),
            token,
        ))),
        Err(e) => {
            let status = match e {
                AnswerError::UnknownToken(_) => StatusCode::GONE,
                AnswerError::InvalidOption { .. } => StatusCode::UNPROCESSABLE_ENTITY,
                AnswerError::DispatcherClosed => {
                    error!("Failed to deliver answer for {}: {}", token, e);
                    StatusCode::SERVICE_UNAVAILABLE
                }
            };
            warn!("Answer for {} refused: {}", token, e);
            Err((status, Json(AnswerResponse::new("error", e.to_string(), token))))
        }
    }
}

/// Handle GET /status - Current timer snapshot and server info
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let (last_action, last_action_time) = state.get_last_action();

    Json(StatusResponse {
        timer: state.snapshot(),
        pending_confirmations: state.pending_confirmations(),
        hints: state.hints,
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    })
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
