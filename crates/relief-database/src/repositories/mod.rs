//! PostgreSQL repository implementations of the store traits.

pub mod branch;
pub mod citizen;
pub mod gn_division;
pub mod relief_request;
pub mod user;

pub use branch::BranchRepository;
pub use citizen::CitizenRepository;
pub use gn_division::GnDivisionRepository;
pub use relief_request::ReliefRequestRepository;
pub use user::UserRepository;

use relief_core::error::{AppError, ErrorKind};

/// Name of the unique constraint a sqlx error violated, if any.
pub(crate) fn violated_constraint(err: &sqlx::Error) -> Option<String> {
    match err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            db_err.constraint().map(str::to_owned)
        }
        _ => None,
    }
}

/// Wrap a sqlx error with context.
pub(crate) fn db_err(context: &'static str) -> impl FnOnce(sqlx::Error) -> AppError {
    move |e| AppError::with_source(ErrorKind::Database, context, e)
}

/// `%needle%` for ILIKE with backslash, `%` and `_` in the needle taken literally,
/// matching the substring semantics of the in-memory stores.
pub(crate) fn contains_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for c in needle.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
