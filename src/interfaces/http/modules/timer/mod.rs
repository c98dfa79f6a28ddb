pub mod handlers;

pub use handlers::{TimerHandlerState, TimerStatusDto};
