//! API request and response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    config::DisplayHints,
    events::{ConfirmOption, ConfirmationToken},
    services::PendingPrompt,
    state::Snapshot,
};

/// API response structure for command endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub timer: Snapshot,
}

impl ApiResponse {
    /// Create a new API response
    pub fn new(status: String, message: String, timer: Snapshot) -> Self {
        Self {
            status,
            message,
            timestamp: Utc::now(),
            timer,
        }
    }

    /// Create a success response
    pub fn ok(message: String, timer: Snapshot) -> Self {
        Self::new("ok".to_string(), message, timer)
    }

    /// Create an error response
    pub fn error(message: String, timer: Snapshot) -> Self {
        Self::new("error".to_string(), message, timer)
    }
}

/// Body of `POST /confirmations/:token`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerRequest {
    pub option: ConfirmOption,
}

/// Response to a confirmation answer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerResponse {
    pub status: String,
    pub message: String,
    pub token: ConfirmationToken,
    pub timestamp: DateTime<Utc>,
}

impl AnswerResponse {
    pub fn new(status: &str, message: String, token: ConfirmationToken) -> Self {
        Self {
            status: status.to_string(),
            message,
            token,
            timestamp: Utc::now(),
        }
    }
}

/// Status response with the full timer snapshot
#[derive(Debug, Clone, Serialize)]
pub struct StatusResponse {
    pub timer: Snapshot,
    pub pending_confirmations: Vec<PendingPrompt>,
    pub hints: DisplayHints,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
