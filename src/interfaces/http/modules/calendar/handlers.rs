//! Calendar endpoint: scheduled visits grouped by day

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::reports::{scheduled_visits, ReportFilter};
use crate::application::ReportService;
use crate::interfaces::http::common::{error_response, ApiResponse};

#[derive(Clone)]
pub struct CalendarHandlerState {
    pub reports: Arc<ReportService>,
}

#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct CalendarParams {
    /// First day of the range (inclusive), YYYY-MM-DD
    pub from: NaiveDate,
    /// Last day of the range (inclusive), YYYY-MM-DD
    pub to: NaiveDate,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct VisitDto {
    pub report_id: String,
    pub form_type: String,
    pub location: String,
    pub equipment_model: String,
    pub status: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CalendarDayDto {
    #[schema(value_type = String, format = Date)]
    pub date: NaiveDate,
    pub visits: Vec<VisitDto>,
}

#[utoipa::path(
    get,
    path = "/api/v1/calendar",
    tag = "Calendar",
    params(CalendarParams),
    responses(
        (status = 200, description = "Scheduled visits grouped by day", body = ApiResponse<Vec<CalendarDayDto>>),
        (status = 400, description = "Invalid range")
    )
)]
pub async fn get_calendar(
    State(state): State<CalendarHandlerState>,
    Query(params): Query<CalendarParams>,
) -> Result<Json<ApiResponse<Vec<CalendarDayDto>>>, (StatusCode, Json<ApiResponse<Vec<CalendarDayDto>>>)>
{
    if params.from > params.to {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error("'from' must not be after 'to'")),
        ));
    }

    let reports = state
        .reports
        .list_reports(ReportFilter::default())
        .await
        .map_err(|e| error_response(&e))?;

    let days = scheduled_visits(&reports, params.from, params.to)
        .into_iter()
        .map(|day| CalendarDayDto {
            date: day.date,
            visits: day
                .visits
                .into_iter()
                .map(|v| VisitDto {
                    report_id: v.report_id,
                    form_type: v.form_type.as_str().to_string(),
                    location: v.location,
                    equipment_model: v.equipment_model,
                    status: v.status.as_str().to_string(),
                })
                .collect(),
        })
        .collect();

    Ok(Json(ApiResponse::success(days)))
}
