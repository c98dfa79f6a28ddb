pub mod handlers;

pub use handlers::{health_check, HealthDto};
