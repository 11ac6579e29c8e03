//! HTTP API module
//!
//! This module contains the control endpoints that stand in for the timer's buttons.

pub mod handlers;
pub mod responses;

use std::sync::Arc;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use handlers::*;

/// Create the HTTP router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/start", post(start_handler))
        .route("/pause", post(pause_handler))
        .route("/resume", post(resume_handler))
        .route("/toggle", post(toggle_handler))
        .route("/stop", post(stop_handler))
        .route("/session/:idx", post(select_session_handler))
        .route("/phase/:idx", post(select_phase_handler))
        .route("/confirmations", get(list_confirmations_handler))
        .route("/confirmations/:token", post(answer_handler))
        .route("/status", get(status_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
