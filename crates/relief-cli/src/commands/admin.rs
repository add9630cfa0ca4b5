//! Admin account management commands.

use clap::{Args, Subcommand};

use relief_auth::{PasswordHasher, PasswordValidator};
use relief_core::error::AppError;
use relief_database::Stores;
use relief_entity::user::{CreateUser, UserRole, UserStatus};

use crate::output;

/// Arguments for admin commands
#[derive(Debug, Args)]
pub struct AdminArgs {
    /// Admin subcommand
    #[command(subcommand)]
    pub command: AdminCommand,
}

/// Admin subcommands
#[derive(Debug, Subcommand)]
pub enum AdminCommand {
    /// Create an active admin account
    Create {
        /// Username
        #[arg(short, long)]
        username: Option<String>,
        /// Email
        #[arg(short, long)]
        email: Option<String>,
        /// Password (will prompt if not provided)
        #[arg(short, long)]
        password: Option<String>,
    },
    /// Reset a user's password
    ResetPassword {
        /// Username of the account
        #[arg(short, long)]
        username: String,
        /// New password (will prompt if not provided)
        #[arg(short, long)]
        password: Option<String>,
    },
}

fn input_error(e: dialoguer::Error) -> AppError {
    AppError::internal(format!("Input error: {e}"))
}

fn prompt_password(prompt: &str) -> Result<String, AppError> {
    dialoguer::Password::new()
        .with_prompt(prompt)
        .with_confirmation("Confirm password", "Passwords do not match")
        .interact()
        .map_err(input_error)
}

/// Execute admin commands
pub async fn execute(args: &AdminArgs, cli: &super::Cli) -> Result<(), AppError> {
    let config = cli.load_config()?;
    let pool = super::create_db_pool(&config).await?;
    let stores = Stores::postgres(pool.into_pool());
    let hasher = PasswordHasher::new(&config.auth)?;
    let validator = PasswordValidator::new(&config.auth);

    match &args.command {
        AdminCommand::Create {
            username,
            email,
            password,
        } => {
            let username = match username {
                Some(u) => u.trim().to_string(),
                None => dialoguer::Input::<String>::new()
                    .with_prompt("Admin username")
                    .interact_text()
                    .map_err(input_error)?
                    .trim()
                    .to_string(),
            };
            if username.is_empty() {
                return Err(AppError::validation("Username is required"));
            }

            let email = match email {
                Some(e) => Some(e.clone()),
                None => {
                    let e: String = dialoguer::Input::new()
                        .with_prompt("Admin email (optional)")
                        .allow_empty(true)
                        .interact_text()
                        .map_err(input_error)?;
                    if e.trim().is_empty() {
                        None
                    } else {
                        Some(e.trim().to_string())
                    }
                }
            };

            let password = match password {
                Some(p) => p.clone(),
                None => prompt_password("Admin password")?,
            };
            validator.validate(&password, &[username.as_str()])?;

            let user = stores
                .users
                .create(&CreateUser {
                    username: username.clone(),
                    email,
                    password_hash: hasher.hash_password(&password)?,
                    full_name: None,
                    role: UserRole::Admin,
                    district: None,
                    status: UserStatus::Active,
                })
                .await?;

            tracing::info!(user_id = %user.id, "Admin account created from CLI");
            output::print_success(&format!("Admin user '{username}' created"));
            output::print_kv("id", &user.id.to_string());
        }
        AdminCommand::ResetPassword { username, password } => {
            let user = stores
                .users
                .find_by_username(username)
                .await?
                .ok_or_else(|| AppError::not_found(format!("User '{username}' not found")))?;

            let password = match password {
                Some(p) => p.clone(),
                None => prompt_password("New password")?,
            };
            validator.validate(&password, &[user.username.as_str()])?;

            stores
                .users
                .update_password(user.id, &hasher.hash_password(&password)?)
                .await?;

            tracing::info!(user_id = %user.id, "Password reset from CLI");
            output::print_success(&format!("Password reset for user '{username}'"));
        }
    }

    Ok(())
}
