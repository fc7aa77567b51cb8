//! Client for the job-profile review backend.

pub mod api;

#[cfg(feature = "http")]
pub mod http;

pub use api::{ApiError, ProfileScope, ReviewApi, UpdateKind};

#[cfg(feature = "http")]
pub use http::HttpReviewApi;
