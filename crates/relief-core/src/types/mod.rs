//! Core type definitions used across the Relief Desk workspace.

pub mod pagination;

pub use pagination::{PageRequest, PageResponse};
