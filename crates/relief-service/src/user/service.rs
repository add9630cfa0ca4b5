//! Self-service account operations: registration, profile, password change.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;
use validator::Validate;

use relief_auth::password::{PasswordHasher, PasswordValidator};
use relief_core::error::AppError;
use relief_database::UserStore;
use relief_entity::user::{CreateUser, User, UserRole, UserStatus};

use crate::context::RequestContext;

/// Public registration form. New accounts wait for admin approval.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Desired username.
    #[validate(length(min = 3, max = 50, message = "Username must be 3-50 characters"))]
    pub username: String,
    /// Email address.
    #[validate(email(message = "Invalid email address"))]
    pub email: Option<String>,
    /// Password.
    pub password: String,
    /// Full name.
    #[validate(length(max = 200))]
    pub full_name: Option<String>,
}

/// Password change by the account owner.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    /// Current password.
    #[validate(length(min = 1, message = "Current password is required"))]
    pub current_password: String,
    /// New password.
    pub new_password: String,
}

/// Handles operations a user performs on their own account.
#[derive(Debug, Clone)]
pub struct UserService {
    users: Arc<dyn UserStore>,
    hasher: Arc<PasswordHasher>,
    validator: Arc<PasswordValidator>,
}

impl UserService {
    /// Creates a new user service.
    pub fn new(
        users: Arc<dyn UserStore>,
        hasher: Arc<PasswordHasher>,
        validator: Arc<PasswordValidator>,
    ) -> Self {
        Self {
            users,
            hasher,
            validator,
        }
    }

    /// Registers a pending volunteer with no district.
    pub async fn register(&self, req: RegisterRequest) -> Result<User, AppError> {
        let username = req.username.trim().to_string();
        if username.len() < 3 {
            return Err(AppError::validation(
                "Username must be at least 3 characters",
            ));
        }

        self.validator.validate(&req.password, &[username.as_str()])?;
        let password_hash = self.hasher.hash_password(&req.password)?;

        let user = self
            .users
            .create(&CreateUser {
                username,
                email: req.email.map(|e| e.trim().to_string()),
                password_hash,
                full_name: req.full_name,
                role: UserRole::Volunteer,
                district: None,
                status: UserStatus::Pending,
            })
            .await?;

        info!(user_id = %user.id, "Registration received, awaiting approval");
        Ok(user)
    }

    /// The caller's own record.
    pub async fn me(&self, ctx: &RequestContext) -> Result<User, AppError> {
        self.users
            .find_by_id(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// Change the caller's password after verifying the current one.
    pub async fn change_password(
        &self,
        ctx: &RequestContext,
        req: ChangePasswordRequest,
    ) -> Result<(), AppError> {
        let user = self.me(ctx).await?;

        if !self
            .hasher
            .verify_password(&req.current_password, &user.password_hash)?
        {
            return Err(AppError::validation("Current password is incorrect"));
        }

        self.validator
            .validate_not_same(&req.current_password, &req.new_password)?;
        self.validator
            .validate(&req.new_password, &[user.username.as_str()])?;

        let hash = self.hasher.hash_password(&req.new_password)?;
        if !self.users.update_password(user.id, &hash).await? {
            return Err(AppError::not_found("User not found"));
        }

        info!(user_id = %user.id, "Password changed");
        Ok(())
    }
}
