//! Request and response data transfer objects.

pub mod request;
pub mod response;

pub use request::LoginRequest;
pub use response::{ApiResponse, HealthResponse, LoginResponse, MessageResponse, UserResponse};
