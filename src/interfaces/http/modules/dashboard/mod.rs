pub mod handlers;

pub use handlers::{DashboardDto, DashboardHandlerState, FormTypeCountDto, StatusCountDto};
