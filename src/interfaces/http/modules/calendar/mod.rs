pub mod handlers;

pub use handlers::{CalendarDayDto, CalendarHandlerState, CalendarParams, VisitDto};
