//! Session and user-directory API handlers
//!
//! Thin wrappers delegating to `SessionService`.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};

use super::dto::{CreateUserRequest, LoginRequest, ProfileDto, UpdateProfileRequest};
use crate::application::session::CreateUserData;
use crate::application::SessionService;
use crate::domain::UserRole;
use crate::interfaces::http::common::{error_response, ApiResponse, ValidatedJson};

#[derive(Clone)]
pub struct SessionHandlerState {
    pub session: Arc<SessionService>,
}

#[utoipa::path(
    post,
    path = "/api/v1/session/login",
    tag = "Session",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Resolved profile (admin fallback for unknown emails)", body = ApiResponse<ProfileDto>),
        (status = 422, description = "Validation error")
    )
)]
pub async fn login(
    State(state): State<SessionHandlerState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> Json<ApiResponse<ProfileDto>> {
    let profile = state.session.login(&request.email).await;
    Json(ApiResponse::success(ProfileDto::from(profile)))
}

#[utoipa::path(
    post,
    path = "/api/v1/session/logout",
    tag = "Session",
    responses((status = 200, description = "Session reset to the default administrator", body = ApiResponse<ProfileDto>))
)]
pub async fn logout(State(state): State<SessionHandlerState>) -> Json<ApiResponse<ProfileDto>> {
    let profile = state.session.logout().await;
    Json(ApiResponse::success(ProfileDto::from(profile)))
}

#[utoipa::path(
    get,
    path = "/api/v1/session/current",
    tag = "Session",
    responses((status = 200, description = "Currently active profile", body = ApiResponse<ProfileDto>))
)]
pub async fn get_current_profile(
    State(state): State<SessionHandlerState>,
) -> Json<ApiResponse<ProfileDto>> {
    let profile = state.session.current_profile().await;
    Json(ApiResponse::success(ProfileDto::from(profile)))
}

#[utoipa::path(
    get,
    path = "/api/v1/session/users",
    tag = "Session",
    responses((status = 200, description = "User directory", body = ApiResponse<Vec<ProfileDto>>))
)]
pub async fn list_users(
    State(state): State<SessionHandlerState>,
) -> Json<ApiResponse<Vec<ProfileDto>>> {
    let users = state
        .session
        .list_users()
        .await
        .into_iter()
        .map(ProfileDto::from)
        .collect();
    Json(ApiResponse::success(users))
}

#[utoipa::path(
    post,
    path = "/api/v1/session/users",
    tag = "Session",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = ApiResponse<ProfileDto>),
        (status = 400, description = "Unknown role"),
        (status = 409, description = "Email already exists"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn create_user(
    State(state): State<SessionHandlerState>,
    ValidatedJson(request): ValidatedJson<CreateUserRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ProfileDto>>), (StatusCode, Json<ApiResponse<ProfileDto>>)>
{
    let Some(role) = UserRole::parse(&request.role) else {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error(format!("Unknown role '{}'", request.role))),
        ));
    };

    let data = CreateUserData {
        email: request.email,
        name: request.name,
        phone: request.phone,
        role,
        avatar: request.avatar,
    };

    match state.session.create_user(data).await {
        Ok(profile) => Ok((
            StatusCode::CREATED,
            Json(ApiResponse::success(ProfileDto::from(profile))),
        )),
        Err(e) => Err(error_response(&e)),
    }
}

#[utoipa::path(
    put,
    path = "/api/v1/session/profile",
    tag = "Session",
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Merged profile", body = ApiResponse<ProfileDto>),
        (status = 422, description = "Validation error")
    )
)]
pub async fn update_profile(
    State(state): State<SessionHandlerState>,
    ValidatedJson(request): ValidatedJson<UpdateProfileRequest>,
) -> Json<ApiResponse<ProfileDto>> {
    let profile = state.session.update_profile(request.into()).await;
    Json(ApiResponse::success(ProfileDto::from(profile)))
}
