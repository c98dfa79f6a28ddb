//! AI advisory endpoints
//!
//! Both operations are single-shot: one prompt invocation, full structured
//! answer or a user-visible failure. Nothing is retried.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::{AdvisoryProvider, FormSuggestionInput, TroubleshootInput};
use crate::interfaces::http::common::{error_response, ApiResponse, ValidatedJson};

#[derive(Clone)]
pub struct AdvisoryHandlerState {
    pub advisory: Arc<dyn AdvisoryProvider>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SuggestFormRequest {
    #[validate(length(min = 1, max = 120))]
    pub location: String,
    #[validate(length(min = 1, max = 80))]
    pub equipment_model: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SuggestFormDto {
    /// One of: maintenance, repair, inspection, work-order
    pub suggested_form: String,
    pub reasoning: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct TroubleshootRequest {
    #[validate(length(min = 1, max = 80))]
    pub equipment_model: String,
    #[validate(length(min = 1, max = 2000))]
    pub problem_description: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TroubleshootDto {
    pub potential_causes: Vec<String>,
    pub diagnostic_steps: Vec<String>,
    pub recommended_parts: Vec<String>,
}

#[utoipa::path(
    post,
    path = "/api/v1/advisory/suggest-form",
    tag = "Advisory",
    request_body = SuggestFormRequest,
    responses(
        (status = 200, description = "Suggested form type", body = ApiResponse<SuggestFormDto>),
        (status = 422, description = "Validation error"),
        (status = 502, description = "Advisory request failed")
    )
)]
pub async fn suggest_form(
    State(state): State<AdvisoryHandlerState>,
    ValidatedJson(request): ValidatedJson<SuggestFormRequest>,
) -> Result<Json<ApiResponse<SuggestFormDto>>, (StatusCode, Json<ApiResponse<SuggestFormDto>>)> {
    let input = FormSuggestionInput {
        location: request.location,
        equipment_model: request.equipment_model,
    };

    match state.advisory.suggest_form(input).await {
        Ok(suggestion) => Ok(Json(ApiResponse::success(SuggestFormDto {
            suggested_form: suggestion.suggested_form.as_str().to_string(),
            reasoning: suggestion.reasoning,
        }))),
        Err(e) => Err(error_response(&e)),
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/advisory/troubleshoot",
    tag = "Advisory",
    request_body = TroubleshootRequest,
    responses(
        (status = 200, description = "Troubleshooting guidance", body = ApiResponse<TroubleshootDto>),
        (status = 422, description = "Validation error"),
        (status = 502, description = "Advisory request failed")
    )
)]
pub async fn troubleshoot(
    State(state): State<AdvisoryHandlerState>,
    ValidatedJson(request): ValidatedJson<TroubleshootRequest>,
) -> Result<Json<ApiResponse<TroubleshootDto>>, (StatusCode, Json<ApiResponse<TroubleshootDto>>)> {
    let input = TroubleshootInput {
        equipment_model: request.equipment_model,
        problem_description: request.problem_description,
    };

    match state.advisory.troubleshoot(input).await {
        Ok(guide) => Ok(Json(ApiResponse::success(TroubleshootDto {
            potential_causes: guide.potential_causes,
            diagnostic_steps: guide.diagnostic_steps,
            recommended_parts: guide.recommended_parts,
        }))),
        Err(e) => Err(error_response(&e)),
    }
}
