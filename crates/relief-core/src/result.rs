//! Convenience result type alias for Relief Desk.

use crate::error::AppError;

/// A specialized `Result` type for Relief Desk operations.
pub type AppResult<T> = Result<T, AppError>;
