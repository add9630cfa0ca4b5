//! # relief-entity
//!
//! Domain entity models for Relief Desk. Every struct in this crate
//! represents a database table row or a domain value object. Database
//! entities derive `sqlx::FromRow`.

pub mod access;
pub mod branch;
pub mod case;
pub mod citizen;
pub mod geo;
pub mod relief;
pub mod user;
