//! Session lifecycle manager: login, refresh and token verification.
//!
//! Sessions are stateless: nothing is recorded server-side, so logging out
//! is purely a matter of the API dropping the refresh cookie.

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};

use relief_core::error::AppError;
use relief_database::UserStore;
use relief_entity::user::{User, UserStatus};

use crate::jwt::{AccessClaims, JwtDecoder, JwtEncoder, TokenPair};
use crate::password::PasswordHasher;

/// Result of a successful login.
#[derive(Debug, Clone, Serialize)]
pub struct LoginResult {
    /// Generated token pair.
    pub tokens: TokenPair,
    /// The authenticated user.
    pub user: User,
}

/// Issues, rotates and verifies tokens.
#[derive(Clone)]
pub struct SessionManager {
    encoder: Arc<JwtEncoder>,
    decoder: Arc<JwtDecoder>,
    users: Arc<dyn UserStore>,
    hasher: Arc<PasswordHasher>,
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("encoder", &self.encoder)
            .field("decoder", &self.decoder)
            .finish_non_exhaustive()
    }
}

impl SessionManager {
    /// Creates a session manager.
    pub fn new(
        encoder: Arc<JwtEncoder>,
        decoder: Arc<JwtDecoder>,
        users: Arc<dyn UserStore>,
        hasher: Arc<PasswordHasher>,
    ) -> Self {
        Self {
            encoder,
            decoder,
            users,
            hasher,
        }
    }

    /// Mint an access + refresh pair for `user`.
    pub fn issue_tokens(&self, user: &User) -> Result<TokenPair, AppError> {
        self.encoder.generate_token_pair(user)
    }

    /// Verify credentials and issue tokens.
    ///
    /// Unknown usernames and wrong passwords produce the same error.
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResult, AppError> {
        let user = self
            .users
            .find_by_username(username.trim())
            .await?
            .ok_or_else(|| AppError::authentication("Invalid username or password"))?;

        if !self.hasher.verify_password(password, &user.password_hash)? {
            warn!(user_id = %user.id, "Login failed: wrong password");
            return Err(AppError::authentication("Invalid username or password"));
        }

        check_user_status(&user)?;

        let tokens = self.issue_tokens(&user)?;
        self.users.touch_last_login(user.id, Utc::now()).await?;

        info!(user_id = %user.id, role = %user.role, "Login successful");
        Ok(LoginResult { tokens, user })
    }

    /// Exchange a refresh token for a new pair.
    ///
    /// The user is re-read from storage, so role, district and status
    /// changes take effect at the next refresh.
    pub async fn refresh(&self, refresh_token: Option<&str>) -> Result<LoginResult, AppError> {
        let token = refresh_token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AppError::authentication("Refresh token missing"))?;

        let claims = self.decoder.decode_refresh_token(token)?;

        let user = self
            .users
            .find_by_id(claims.user_id())
            .await?
            .ok_or_else(|| AppError::authentication("User no longer exists"))?;

        check_user_status(&user)?;

        let tokens = self.issue_tokens(&user)?;
        info!(user_id = %user.id, "Refresh token rotated");
        Ok(LoginResult { tokens, user })
    }

    /// Verify a bearer access token. No storage access.
    pub fn authenticate(&self, access_token: &str) -> Result<AccessClaims, AppError> {
        self.decoder.decode_access_token(access_token)
    }
}

fn check_user_status(user: &User) -> Result<(), AppError> {
    match user.status {
        UserStatus::Active => Ok(()),
        UserStatus::Pending => Err(AppError::authorization(
            "Account is awaiting administrator approval",
        )),
        UserStatus::Inactive => Err(AppError::authorization("Account has been deactivated")),
    }
}
