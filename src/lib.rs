//! # FieldServe
//!
//! Backend for a heavy-equipment field-service management application:
//! structured maintenance / repair / inspection / work-order reports, a
//! role-gated status workflow, a durable session/profile directory, and
//! AI-assisted form suggestions and troubleshooting.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: Core business entities, the status workflow and ports
//! - **application**: Use-case services (session, reports, work timer)
//! - **infrastructure**: External concerns (key-value stores, database,
//!   advisory HTTP client)
//! - **interfaces**: REST API with Swagger documentation

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;

pub use config::{default_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::{init_database, DatabaseConfig};

// Re-export API router
pub use interfaces::http::{create_api_router, AppState};
