//! Report API handlers
//!
//! Submissions append to the report store; status changes run through the
//! workflow on behalf of the session's current profile and answer with the
//! re-read list.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use super::dto::{
    parse_status, ChangeStatusRequest, ListReportsParams, ReportDto, SubmitInspectionRequest,
    SubmitMaintenanceRequest, SubmitRepairRequest, SubmitWorkOrderRequest, SubmittedDto,
};
use crate::application::reports::ReportFilter;
use crate::application::{ReportService, SessionService};
use crate::domain::{DomainError, FormType};
use crate::interfaces::http::common::{error_response, ApiResponse, ValidatedJson};

#[derive(Clone)]
pub struct ReportHandlerState {
    pub reports: Arc<ReportService>,
    pub session: Arc<SessionService>,
}

type HandlerResult<T> = Result<Json<ApiResponse<T>>, (StatusCode, Json<ApiResponse<T>>)>;

fn build_filter(params: ListReportsParams) -> Result<ReportFilter, DomainError> {
    let form_type = params
        .form_type
        .as_deref()
        .map(|s| {
            FormType::parse(s)
                .ok_or_else(|| DomainError::Validation(format!("Unknown form type '{s}'")))
        })
        .transpose()?;
    let status = params.status.as_deref().map(parse_status).transpose()?;
    Ok(ReportFilter { form_type, status })
}

#[utoipa::path(
    get,
    path = "/api/v1/reports",
    tag = "Reports",
    params(ListReportsParams),
    responses(
        (status = 200, description = "Report list, newest first", body = ApiResponse<Vec<ReportDto>>),
        (status = 400, description = "Unknown filter value")
    )
)]
pub async fn list_reports(
    State(state): State<ReportHandlerState>,
    Query(params): Query<ListReportsParams>,
) -> HandlerResult<Vec<ReportDto>> {
    let filter = build_filter(params).map_err(|e| error_response(&e))?;
    let role = state.session.current_profile().await.role;

    match state.reports.list_reports(filter).await {
        Ok(reports) => Ok(Json(ApiResponse::success(
            reports
                .into_iter()
                .map(|r| ReportDto::for_role(r, role))
                .collect(),
        ))),
        Err(e) => Err(error_response(&e)),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/reports/{id}",
    tag = "Reports",
    params(("id" = String, Path, description = "Report ID")),
    responses(
        (status = 200, description = "Report details", body = ApiResponse<ReportDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_report(
    State(state): State<ReportHandlerState>,
    Path(id): Path<String>,
) -> HandlerResult<ReportDto> {
    let role = state.session.current_profile().await.role;
    match state.reports.get_report(&id).await {
        Ok(report) => Ok(Json(ApiResponse::success(ReportDto::for_role(report, role)))),
        Err(e) => Err(error_response(&e)),
    }
}

#[utoipa::path(
    put,
    path = "/api/v1/reports/{id}/status",
    tag = "Reports",
    params(("id" = String, Path, description = "Report ID")),
    request_body = ChangeStatusRequest,
    responses(
        (status = 200, description = "Status changed; re-read report list", body = ApiResponse<Vec<ReportDto>>),
        (status = 403, description = "Acting role is read-only"),
        (status = 404, description = "Not found"),
        (status = 409, description = "Report is completed and locked")
    )
)]
pub async fn change_status(
    State(state): State<ReportHandlerState>,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<ChangeStatusRequest>,
) -> HandlerResult<Vec<ReportDto>> {
    let requested = parse_status(&request.status).map_err(|e| error_response(&e))?;
    let role = state.session.current_profile().await.role;

    match state.reports.change_status(role, &id, requested).await {
        Ok(reports) => Ok(Json(ApiResponse::success(
            reports
                .into_iter()
                .map(|r| ReportDto::for_role(r, role))
                .collect(),
        ))),
        Err(e) => Err(error_response(&e)),
    }
}

// ── Submissions (one endpoint per form type) ────────────────────

type SubmitResult =
    Result<(StatusCode, Json<ApiResponse<SubmittedDto>>), (StatusCode, Json<ApiResponse<SubmittedDto>>)>;

fn submitted(id: String) -> (StatusCode, Json<ApiResponse<SubmittedDto>>) {
    (StatusCode::CREATED, Json(ApiResponse::success(SubmittedDto { id })))
}

#[utoipa::path(
    post,
    path = "/api/v1/reports/maintenance",
    tag = "Reports",
    request_body = SubmitMaintenanceRequest,
    responses(
        (status = 201, description = "Report created", body = ApiResponse<SubmittedDto>),
        (status = 422, description = "Validation error")
    )
)]
pub async fn submit_maintenance(
    State(state): State<ReportHandlerState>,
    ValidatedJson(request): ValidatedJson<SubmitMaintenanceRequest>,
) -> SubmitResult {
    let form = request.into_form().map_err(|e| error_response(&e))?;
    match state.reports.submit_maintenance(form).await {
        Ok(id) => Ok(submitted(id)),
        Err(e) => Err(error_response(&e)),
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/reports/repair",
    tag = "Reports",
    request_body = SubmitRepairRequest,
    responses(
        (status = 201, description = "Report created", body = ApiResponse<SubmittedDto>),
        (status = 422, description = "Validation error")
    )
)]
pub async fn submit_repair(
    State(state): State<ReportHandlerState>,
    ValidatedJson(request): ValidatedJson<SubmitRepairRequest>,
) -> SubmitResult {
    match state.reports.submit_repair(request.into_form()).await {
        Ok(id) => Ok(submitted(id)),
        Err(e) => Err(error_response(&e)),
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/reports/inspection",
    tag = "Reports",
    request_body = SubmitInspectionRequest,
    responses(
        (status = 201, description = "Report created", body = ApiResponse<SubmittedDto>),
        (status = 422, description = "Validation error")
    )
)]
pub async fn submit_inspection(
    State(state): State<ReportHandlerState>,
    ValidatedJson(request): ValidatedJson<SubmitInspectionRequest>,
) -> SubmitResult {
    match state.reports.submit_inspection(request.into_form()).await {
        Ok(id) => Ok(submitted(id)),
        Err(e) => Err(error_response(&e)),
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/reports/work-orders",
    tag = "Reports",
    request_body = SubmitWorkOrderRequest,
    responses(
        (status = 201, description = "Report created", body = ApiResponse<SubmittedDto>),
        (status = 422, description = "Validation error")
    )
)]
pub async fn submit_work_order(
    State(state): State<ReportHandlerState>,
    ValidatedJson(request): ValidatedJson<SubmitWorkOrderRequest>,
) -> SubmitResult {
    let form = request.into_form().map_err(|e| error_response(&e))?;
    match state.reports.submit_work_order(form).await {
        Ok(id) => Ok(submitted(id)),
        Err(e) => Err(error_response(&e)),
    }
}
