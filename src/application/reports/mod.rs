pub mod calendar;
pub mod dashboard;
pub mod service;

pub use calendar::{scheduled_visits, CalendarDay, ScheduledVisit};
pub use dashboard::{summarize, DashboardSummary, RECENT_ACTIVITY_LIMIT};
pub use service::{ReportFilter, ReportService};
