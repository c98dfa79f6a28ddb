//! Work-timer endpoints

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::{TimerStatus, WorkTimerService};
use crate::interfaces::http::common::{error_response, ApiResponse};

#[derive(Clone)]
pub struct TimerHandlerState {
    pub timer: Arc<WorkTimerService>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TimerStatusDto {
    pub running: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
    pub elapsed_secs: u64,
}

impl From<TimerStatus> for TimerStatusDto {
    fn from(s: TimerStatus) -> Self {
        Self {
            running: s.running,
            started_at: s.started_at,
            elapsed_secs: s.elapsed_secs,
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/timer/start",
    tag = "Timer",
    responses(
        (status = 200, description = "Timer running (idempotent)", body = ApiResponse<TimerStatusDto>),
        (status = 500, description = "Timer could not be persisted")
    )
)]
pub async fn start_timer(
    State(state): State<TimerHandlerState>,
) -> Result<Json<ApiResponse<TimerStatusDto>>, (StatusCode, Json<ApiResponse<TimerStatusDto>>)> {
    match state.timer.start().await {
        Ok(status) => Ok(Json(ApiResponse::success(status.into()))),
        Err(e) => Err(error_response(&e)),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/timer",
    tag = "Timer",
    responses((status = 200, description = "Current timer state", body = ApiResponse<TimerStatusDto>))
)]
pub async fn get_timer(State(state): State<TimerHandlerState>) -> Json<ApiResponse<TimerStatusDto>> {
    Json(ApiResponse::success(state.timer.status().await.into()))
}

#[utoipa::path(
    post,
    path = "/api/v1/timer/stop",
    tag = "Timer",
    responses((status = 200, description = "Final elapsed time", body = ApiResponse<TimerStatusDto>))
)]
pub async fn stop_timer(
    State(state): State<TimerHandlerState>,
) -> Json<ApiResponse<TimerStatusDto>> {
    Json(ApiResponse::success(state.timer.stop().await.into()))
}
