pub mod dto;
pub mod handlers;

pub use dto::{CreateUserRequest, LoginRequest, ProfileDto, UpdateProfileRequest};
pub use handlers::SessionHandlerState;
