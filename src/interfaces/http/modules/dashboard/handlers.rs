//! Dashboard endpoint: recent activity and chart-shaped counts

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::reports::{summarize, ReportFilter};
use crate::application::{ReportService, SessionService};
use crate::interfaces::http::common::{error_response, ApiResponse};
use crate::interfaces::http::modules::reports::ReportDto;

#[derive(Clone)]
pub struct DashboardHandlerState {
    pub reports: Arc<ReportService>,
    pub session: Arc<SessionService>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StatusCountDto {
    pub status: String,
    pub count: usize,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FormTypeCountDto {
    pub form_type: String,
    pub count: usize,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DashboardDto {
    pub total: usize,
    pub by_status: Vec<StatusCountDto>,
    pub by_form_type: Vec<FormTypeCountDto>,
    pub recent: Vec<ReportDto>,
}

#[utoipa::path(
    get,
    path = "/api/v1/dashboard",
    tag = "Dashboard",
    responses((status = 200, description = "Activity summary", body = ApiResponse<DashboardDto>))
)]
pub async fn get_dashboard(
    State(state): State<DashboardHandlerState>,
) -> Result<Json<ApiResponse<DashboardDto>>, (StatusCode, Json<ApiResponse<DashboardDto>>)> {
    let reports = state
        .reports
        .list_reports(ReportFilter::default())
        .await
        .map_err(|e| error_response(&e))?;

    let role = state.session.current_profile().await.role;
    let summary = summarize(&reports);

    Ok(Json(ApiResponse::success(DashboardDto {
        total: summary.total,
        by_status: summary
            .by_status
            .into_iter()
            .map(|(status, count)| StatusCountDto {
                status: status.as_str().to_string(),
                count,
            })
            .collect(),
        by_form_type: summary
            .by_form_type
            .into_iter()
            .map(|(form_type, count)| FormTypeCountDto {
                form_type: form_type.as_str().to_string(),
                count,
            })
            .collect(),
        recent: summary
            .recent
            .into_iter()
            .map(|r| ReportDto::for_role(r, role))
            .collect(),
    })))
}
