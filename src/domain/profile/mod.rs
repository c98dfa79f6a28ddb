pub mod model;

pub use model::{ProfilePatch, UserProfile, UserRole};
