pub mod defaults;
pub mod service;

pub use defaults::{default_admin, default_profiles, DEFAULT_ADMIN_EMAIL};
pub use service::{CreateUserData, SessionService, ACTIVE_EMAIL_KEY, DIRECTORY_KEY};
