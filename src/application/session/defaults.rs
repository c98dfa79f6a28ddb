//! Compiled-in default user profiles
//!
//! These seed the directory on every load: persisted custom users are
//! overlaid on top, but a default entry can never be removed.

use crate::domain::{UserProfile, UserRole};

/// Email of the designated default administrator. `login` falls back to
/// this profile for unknown emails and `logout` resets to it.
pub const DEFAULT_ADMIN_EMAIL: &str = "admin@fieldserve.app";

pub fn placeholder_avatar(email: &str) -> String {
    format!("https://i.pravatar.cc/150?u={email}")
}

pub fn default_profiles() -> Vec<UserProfile> {
    vec![
        UserProfile {
            email: DEFAULT_ADMIN_EMAIL.to_string(),
            name: "Administrador".to_string(),
            phone: "+52 555 010 0001".to_string(),
            avatar: placeholder_avatar(DEFAULT_ADMIN_EMAIL),
            role: UserRole::Admin,
        },
        UserProfile {
            email: "coordinacion@fieldserve.app".to_string(),
            name: "Coordinación de Servicio".to_string(),
            phone: "+52 555 010 0002".to_string(),
            avatar: placeholder_avatar("coordinacion@fieldserve.app"),
            role: UserRole::Superuser,
        },
        UserProfile {
            email: "supervision@fieldserve.app".to_string(),
            name: "Supervisión de Campo".to_string(),
            phone: "+52 555 010 0003".to_string(),
            avatar: placeholder_avatar("supervision@fieldserve.app"),
            role: UserRole::Supervisor,
        },
        UserProfile {
            email: "tecnico@fieldserve.app".to_string(),
            name: "Técnico de Campo".to_string(),
            phone: "+52 555 010 0004".to_string(),
            avatar: placeholder_avatar("tecnico@fieldserve.app"),
            role: UserRole::Technician,
        },
    ]
}

/// The default administrator profile.
pub fn default_admin() -> UserProfile {
    default_profiles()
        .into_iter()
        .find(|p| p.email == DEFAULT_ADMIN_EMAIL)
        .expect("default profile set always contains the administrator")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_have_unique_emails() {
        let profiles = default_profiles();
        let mut emails: Vec<&str> = profiles.iter().map(|p| p.email.as_str()).collect();
        emails.sort();
        emails.dedup();
        assert_eq!(emails.len(), profiles.len());
    }

    #[test]
    fn default_admin_is_admin() {
        assert_eq!(default_admin().role, UserRole::Admin);
    }
}
