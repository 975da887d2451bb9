//! HTTP endpoint handlers

use std::{convert::Infallible, sync::Arc};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{
        sse::{Event, KeepAlive, Sse},
        Json,
    },
};
use futures::stream::{self, Stream};
use tracing::{debug, error, info};

use crate::state::{AppState, StartOutcome};
use super::responses::{ApiResponse, HealthResponse, StatusResponse};
use crate::view::BoardView;

fn internal_error(context: &str, e: String) -> StatusCode {
    error!("{}: {}", context, e);
    StatusCode::INTERNAL_SERVER_ERROR
}

/// Handle GET /board - Return the current board
pub async fn board_handler(State(state): State<Arc<AppState>>) -> Result<Json<BoardView>, StatusCode> {
    state
        .board()
        .map(Json)
        .map_err(|e| internal_error("Failed to build board", e))
}

/// Handle POST /timers/:id/start - Ask to start a timer
///
/// A request made while another timer runs is answered with status
/// "ignored" and changes nothing.
pub async fn start_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse>, StatusCode> {
    let outcome = state
        .start_timer(&id)
        .map_err(|e| internal_error("Failed to start timer", e))?;

    if outcome == StartOutcome::Unknown {
        debug!("Start requested for unknown timer {}", id);
        return Err(StatusCode::NOT_FOUND);
    }

    let board = state
        .board()
        .map_err(|e| internal_error("Failed to build board", e))?;
    Ok(Json(ApiResponse::start(&id, outcome, board)))
}

/// Handle POST /reset - Restore the initial board
pub async fn reset_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    state
        .reset()
        .map_err(|e| internal_error("Failed to reset board", e))?;
    info!("Reset endpoint called - board restored");

    let board = state
        .board()
        .map_err(|e| internal_error("Failed to build board", e))?;
    Ok(Json(ApiResponse::reset(board)))
}

/// Handle GET /status - Return the active timer and totals
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Result<Json<StatusResponse>, StatusCode> {
    let session = state
        .get_session()
        .map_err(|e| internal_error("Failed to get session", e))?;
    let active = state
        .active_timer()
        .map_err(|e| internal_error("Failed to get active timer", e))?;

    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        active,
        completed: session.completed_count(),
        remaining: session.remaining_count(),
        total: session.total_initial(),
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    }))
}

/// Handle GET /events - Stream a board event on every change
///
/// The first event carries the board as it is when the client connects.
pub async fn events_handler(
    State(state): State<Arc<AppState>>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let mut rx = state.board_update_tx.subscribe();
    rx.mark_changed();

    let events = stream::unfold(rx, |mut rx| async move {
        rx.changed().await.ok()?;
        let board = rx.borrow_and_update().clone();
        let event = match serde_json::to_string(&board) {
            Ok(data) => Event::default().event("board").data(data),
            Err(e) => {
                error!("Failed to serialize board event: {}", e);
                Event::default().comment("serialization failed")
            }
        };
        Some((Ok(event), rx))
    });

    Sse::new(events).keep_alive(KeepAlive::default())
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
