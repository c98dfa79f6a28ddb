//! Session and profile DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::{ProfilePatch, UserProfile};

/// Profile API representation
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProfileDto {
    pub email: String,
    pub name: String,
    pub phone: String,
    pub avatar: String,
    /// One of: admin, superuser, supervisor, user-technicians
    pub role: String,
}

impl From<UserProfile> for ProfileDto {
    fn from(p: UserProfile) -> Self {
        Self {
            email: p.email,
            name: p.name,
            phone: p.phone,
            avatar: p.avatar,
            role: p.role.as_str().to_string(),
        }
    }
}

/// Login request — resolves the email to a profile, falling back to the
/// default administrator for unknown emails.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
}

/// Create user request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateUserRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(max = 30))]
    #[serde(default)]
    pub phone: String,
    /// One of: admin, superuser, supervisor, user-technicians
    pub role: String,
    #[validate(length(max = 300))]
    pub avatar: Option<String>,
}

/// Update the currently active profile (email and role stay fixed)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(length(max = 30))]
    pub phone: Option<String>,
    #[validate(length(max = 300))]
    pub avatar: Option<String>,
}

impl From<UpdateProfileRequest> for ProfilePatch {
    fn from(r: UpdateProfileRequest) -> Self {
        Self {
            name: r.name,
            phone: r.phone,
            avatar: r.avatar,
        }
    }
}
