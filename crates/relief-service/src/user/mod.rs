//! User administration and self-service account operations.

pub mod admin;
pub mod service;

pub use admin::{
    AdminUserService, ApproveUserRequest, ChangeRoleRequest, CreateUserRequest,
    ResetPasswordRequest, UpdateUserRequest,
};
pub use service::{ChangePasswordRequest, RegisterRequest, UserService};
