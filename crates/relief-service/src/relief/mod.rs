//! Relief request services.

pub mod service;

pub use service::{
    CreateReliefRequestRequest, ReliefRequestQuery, ReliefRequestService,
    UpdateReliefRequestRequest,
};
