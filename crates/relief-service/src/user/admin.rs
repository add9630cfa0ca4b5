//! Admin user management: CRUD, approvals, role and status changes,
//! password resets.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use relief_auth::password::{PasswordHasher, PasswordValidator};
use relief_auth::PolicyEvaluator;
use relief_core::error::AppError;
use relief_core::types::pagination::{PageRequest, PageResponse};
use relief_database::UserStore;
use relief_entity::access::{Action, Resource};
use relief_entity::user::{CreateUser, UpdateUser, User, UserFilter, UserRole, UserStatus};

use crate::context::RequestContext;
use crate::review::non_blank;

/// Request to create a user directly (skips the approval queue).
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateUserRequest {
    /// Username (unique).
    #[validate(length(min = 3, max = 50, message = "Username must be 3-50 characters"))]
    pub username: String,
    /// Email (unique, optional).
    #[validate(email(message = "Invalid email address"))]
    pub email: Option<String>,
    /// Initial password.
    pub password: String,
    /// Full name.
    #[validate(length(max = 200))]
    pub full_name: Option<String>,
    /// Role assignment.
    pub role: UserRole,
    /// District; required unless the role is admin.
    pub district: Option<String>,
}

/// Profile fields an admin may change.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateUserRequest {
    /// New email.
    #[validate(email(message = "Invalid email address"))]
    pub email: Option<String>,
    /// New full name.
    #[validate(length(max = 200))]
    pub full_name: Option<String>,
    /// New district.
    pub district: Option<String>,
}

/// Body of an approval.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ApproveUserRequest {
    /// District to assign. Blank is rejected.
    #[serde(default)]
    pub district: String,
}

/// Body of a role change.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ChangeRoleRequest {
    /// The new role.
    pub role: UserRole,
}

/// Body of an admin password reset.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ResetPasswordRequest {
    /// The new password.
    pub new_password: String,
}

/// Handles administrative user management operations.
#[derive(Debug, Clone)]
pub struct AdminUserService {
    users: Arc<dyn UserStore>,
    hasher: Arc<PasswordHasher>,
    validator: Arc<PasswordValidator>,
    policy: Arc<PolicyEvaluator>,
}

impl AdminUserService {
    /// Creates a new admin user service.
    pub fn new(
        users: Arc<dyn UserStore>,
        hasher: Arc<PasswordHasher>,
        validator: Arc<PasswordValidator>,
        policy: Arc<PolicyEvaluator>,
    ) -> Self {
        Self {
            users,
            hasher,
            validator,
            policy,
        }
    }

    fn authorize(&self, ctx: &RequestContext, action: Action) -> Result<(), AppError> {
        self.policy.authorize(&ctx.subject(), Resource::User, action)
    }

    async fn find(&self, user_id: Uuid) -> Result<User, AppError> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// Lists users with pagination.
    pub async fn list_users(
        &self,
        ctx: &RequestContext,
        filter: UserFilter,
        page: PageRequest,
    ) -> Result<PageResponse<User>, AppError> {
        self.authorize(ctx, Action::Read)?;
        self.users.list(&filter, &page).await
    }

    /// Lists active users only.
    pub async fn list_active_users(
        &self,
        ctx: &RequestContext,
        page: PageRequest,
    ) -> Result<PageResponse<User>, AppError> {
        let filter = UserFilter {
            status: Some(UserStatus::Active),
            ..Default::default()
        };
        self.list_users(ctx, filter, page).await
    }

    /// Gets a single user by ID.
    pub async fn get_user(&self, ctx: &RequestContext, user_id: Uuid) -> Result<User, AppError> {
        self.authorize(ctx, Action::Read)?;
        self.find(user_id).await
    }

    /// Creates an active user.
    pub async fn create_user(
        &self,
        ctx: &RequestContext,
        req: CreateUserRequest,
    ) -> Result<User, AppError> {
        self.authorize(ctx, Action::Create)?;

        let username = req.username.trim().to_string();
        if username.len() < 3 {
            return Err(AppError::validation(
                "Username must be at least 3 characters",
            ));
        }

        let district = non_blank(req.district.as_deref());
        if district.is_none() && !req.role.is_admin() {
            return Err(AppError::validation(format!(
                "District is required for the {} role",
                req.role
            )));
        }

        let email = req.email.as_deref().map(str::trim).map(str::to_string);
        let mut inputs = vec![username.as_str()];
        if let Some(email) = email.as_deref() {
            inputs.push(email);
        }
        self.validator.validate(&req.password, &inputs)?;
        let password_hash = self.hasher.hash_password(&req.password)?;

        let user = self
            .users
            .create(&CreateUser {
                username,
                email,
                password_hash,
                full_name: req.full_name,
                role: req.role,
                district,
                status: UserStatus::Active,
            })
            .await?;

        info!(
            admin_id = %ctx.user_id,
            user_id = %user.id,
            role = %user.role,
            "User created by admin"
        );
        Ok(user)
    }

    /// Updates profile fields.
    pub async fn update_user(
        &self,
        ctx: &RequestContext,
        user_id: Uuid,
        req: UpdateUserRequest,
    ) -> Result<User, AppError> {
        self.authorize(ctx, Action::Update)?;

        if req.district.as_deref().is_some_and(|d| d.trim().is_empty()) {
            return Err(AppError::validation("District cannot be blank"));
        }

        let update = UpdateUser {
            email: req.email.map(|e| e.trim().to_string()),
            full_name: req.full_name,
            district: non_blank(req.district.as_deref()),
        };

        self.users
            .update(user_id, &update)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// Approves a pending registration, assigning a district.
    pub async fn approve_user(
        &self,
        ctx: &RequestContext,
        user_id: Uuid,
        req: ApproveUserRequest,
    ) -> Result<User, AppError> {
        self.authorize(ctx, Action::Update)?;

        let district = non_blank(Some(req.district.as_str()))
            .ok_or_else(|| AppError::validation("District is required to approve a volunteer"))?;

        let user = self.find(user_id).await?;
        if user.status != UserStatus::Pending {
            return Err(AppError::conflict("Only pending users can be approved"));
        }

        let approved = self
            .users
            .update_status(
                user_id,
                UserStatus::Pending,
                UserStatus::Active,
                Some(&district),
            )
            .await?
            .ok_or_else(|| AppError::conflict("User status changed concurrently"))?;

        info!(
            admin_id = %ctx.user_id,
            user_id = %user_id,
            district = %district,
            "User approved"
        );
        Ok(approved)
    }

    /// Rejects a pending registration.
    pub async fn reject_user(&self, ctx: &RequestContext, user_id: Uuid) -> Result<User, AppError> {
        self.authorize(ctx, Action::Update)?;

        let user = self.find(user_id).await?;
        if user.status != UserStatus::Pending {
            return Err(AppError::conflict("Only pending users can be rejected"));
        }

        let rejected = self
            .users
            .update_status(user_id, UserStatus::Pending, UserStatus::Inactive, None)
            .await?
            .ok_or_else(|| AppError::conflict("User status changed concurrently"))?;

        info!(admin_id = %ctx.user_id, user_id = %user_id, "User rejected");
        Ok(rejected)
    }

    /// Soft-deletes a user.
    pub async fn deactivate_user(
        &self,
        ctx: &RequestContext,
        user_id: Uuid,
    ) -> Result<User, AppError> {
        self.authorize(ctx, Action::Delete)?;

        if ctx.user_id == user_id {
            return Err(AppError::validation("Cannot deactivate your own account"));
        }

        let user = self.find(user_id).await?;
        if user.status == UserStatus::Inactive {
            return Err(AppError::conflict("User is already inactive"));
        }

        let deactivated = self
            .users
            .update_status(user_id, user.status, UserStatus::Inactive, None)
            .await?
            .ok_or_else(|| AppError::conflict("User status changed concurrently"))?;

        info!(admin_id = %ctx.user_id, user_id = %user_id, "User deactivated");
        Ok(deactivated)
    }

    /// Restores a deactivated user.
    pub async fn activate_user(
        &self,
        ctx: &RequestContext,
        user_id: Uuid,
    ) -> Result<User, AppError> {
        self.authorize(ctx, Action::Update)?;

        let user = self.find(user_id).await?;
        if user.status != UserStatus::Inactive {
            return Err(AppError::conflict("Only inactive users can be activated"));
        }
        if !user.is_admin() && non_blank(user.district.as_deref()).is_none() {
            return Err(AppError::validation(
                "Assign a district before activating this user",
            ));
        }

        let activated = self
            .users
            .update_status(user_id, UserStatus::Inactive, UserStatus::Active, None)
            .await?
            .ok_or_else(|| AppError::conflict("User status changed concurrently"))?;

        info!(admin_id = %ctx.user_id, user_id = %user_id, "User activated");
        Ok(activated)
    }

    /// Changes a user's role. Takes effect at the user's next token refresh.
    pub async fn change_role(
        &self,
        ctx: &RequestContext,
        user_id: Uuid,
        req: ChangeRoleRequest,
    ) -> Result<User, AppError> {
        self.authorize(ctx, Action::Update)?;

        if ctx.user_id == user_id {
            return Err(AppError::validation("Cannot change your own role"));
        }

        let updated = self
            .users
            .update_role(user_id, req.role)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        info!(
            admin_id = %ctx.user_id,
            user_id = %user_id,
            role = %req.role,
            "User role changed"
        );
        Ok(updated)
    }

    /// Sets a new password for a user.
    pub async fn reset_password(
        &self,
        ctx: &RequestContext,
        user_id: Uuid,
        req: ResetPasswordRequest,
    ) -> Result<(), AppError> {
        self.authorize(ctx, Action::Update)?;

        let user = self.find(user_id).await?;
        self.validator
            .validate(&req.new_password, &[user.username.as_str()])?;
        let hash = self.hasher.hash_password(&req.new_password)?;

        if !self.users.update_password(user_id, &hash).await? {
            return Err(AppError::not_found("User not found"));
        }

        info!(admin_id = %ctx.user_id, user_id = %user_id, "Password reset by admin");
        Ok(())
    }
}
