//! # relief-api
//!
//! HTTP API layer for Relief Desk built on Axum.
//!
//! Provides the REST endpoints under `/api`, the bearer-token extractor,
//! the refresh cookie plumbing, middleware (CORS, logging, timeouts) and
//! the mapping from [`relief_core::AppError`] to HTTP responses.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, run_server};
pub use error::{ApiError, ApiResult};
pub use state::AppState;
