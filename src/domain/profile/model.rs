//! User profile domain entity

use serde::{Deserialize, Serialize};

/// Permission level of an application user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Superuser,
    Supervisor,
    #[serde(rename = "user-technicians")]
    Technician,
}

impl Default for UserRole {
    fn default() -> Self {
        Self::Technician
    }
}

impl UserRole {
    /// Roles allowed to mutate report status
    pub fn can_manage_status(&self) -> bool {
        matches!(self, Self::Admin | Self::Superuser | Self::Supervisor)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Superuser => "superuser",
            Self::Supervisor => "supervisor",
            Self::Technician => "user-technicians",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "admin" => Some(Self::Admin),
            "superuser" => Some(Self::Superuser),
            "supervisor" => Some(Self::Supervisor),
            "user-technicians" => Some(Self::Technician),
            _ => None,
        }
    }
}

/// Application user profile
///
/// `email` is the unique directory key and never changes after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub email: String,
    pub name: String,
    pub phone: String,
    pub avatar: String,
    pub role: UserRole,
}

/// Partial profile update applied to the currently active profile.
/// `None` fields are left untouched; email and role are not updatable
/// through this path.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfilePatch {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub avatar: Option<String>,
}

impl UserProfile {
    /// Merge a partial update into this profile.
    pub fn apply(&self, patch: &ProfilePatch) -> Self {
        Self {
            email: self.email.clone(),
            name: patch.name.clone().unwrap_or_else(|| self.name.clone()),
            phone: patch.phone.clone().unwrap_or_else(|| self.phone.clone()),
            avatar: patch.avatar.clone().unwrap_or_else(|| self.avatar.clone()),
            role: self.role,
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────
