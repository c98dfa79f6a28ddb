//! Business logic and use-case orchestration

pub mod reports;
pub mod session;
pub mod timer;

pub use reports::{ReportFilter, ReportService};
pub use session::{CreateUserData, SessionService};
pub use timer::{TimerStatus, WorkTimerService};
