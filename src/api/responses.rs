//! API response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    state::{ActiveTimer, StartOutcome},
    view::BoardView,
};

/// API response structure for board actions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub board: BoardView,
}

impl ApiResponse {
    /// Create a new API response
    pub fn new(status: String, message: String, board: BoardView) -> Self {
        Self {
            status,
            message,
            timestamp: Utc::now(),
            board,
        }
    }

    /// Create a response for a start request
    pub fn start(id: &str, outcome: StartOutcome, board: BoardView) -> Self {
        match outcome {
            StartOutcome::Started => Self::new("active".to_string(), format!("Timer {} started", id), board),
            StartOutcome::Ignored => Self::new(
                "ignored".to_string(),
                format!("Timer {} not started, another timer is active", id),
                board,
            ),
            StartOutcome::Unknown => Self::new(
                "unknown".to_string(),
                format!("Timer {} is not on the board", id),
                board,
            ),
        }
    }

    /// Create a response for a board reset
    pub fn reset(board: BoardView) -> Self {
        Self::new("reset".to_string(), "Board restored".to_string(), board)
    }
}

/// Status response with the active timer and completion totals
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub active: Option<ActiveTimer>,
    pub completed: usize,
    pub remaining: usize,
    pub total: usize,
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
