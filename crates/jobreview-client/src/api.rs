//! The backend contract consumed by both apps.

use async_trait::async_trait;
use jobreview_core::{ApprovalRow, ProfileMap, ReviewerRole, Roster, Session, UpdateRequest};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[cfg(feature = "http")]
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("request failed: {0}")]
    Transport(String),

    #[error("server returned {status}: {body}")]
    Server { status: u16, body: String },

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ApiError {
    /// The `error` string of a JSON error body, if the server sent one.
    pub fn server_message(&self) -> Option<String> {
        let Self::Server { body, .. } = self else {
            return None;
        };
        let parsed: ErrorBody = serde_json::from_str(body).ok()?;
        parsed.error.filter(|e| !e.is_empty())
    }

    /// True for a non-2xx answer, false when the request never completed.
    pub fn is_server(&self) -> bool {
        matches!(self, Self::Server { .. })
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// Which profile listing to fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileScope {
    /// Reviewer listing, includes `approved_internal`.
    Internal,
    /// Admin listing.
    All,
}

impl ProfileScope {
    pub fn path(self) -> &'static str {
        match self {
            Self::Internal => "/api/internal/all-job-profiles",
            Self::All => "/api/all-job-profiles",
        }
    }
}

/// Which update endpoint receives an [`UpdateRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateKind {
    ReviewerSave,
    ReviewerApprove,
    AdminUpdate,
}

impl UpdateKind {
    pub fn path(self) -> &'static str {
        match self {
            Self::ReviewerSave => "/api/internal-review/save",
            Self::ReviewerApprove => "/api/internal-review/approve",
            Self::AdminUpdate => "/api/admin-review/update",
        }
    }
}

pub const LOGIN_PATH: &str = "/api/login";
pub const REVIEWERS_PATH: &str = "/api/reviewers-list";
pub const ADD_REVIEWER_PATH: &str = "/api/admin-reviewers/add";
pub const APPROVALS_PATH: &str = "/api/job-profile-approvals";

#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    #[serde(default)]
    pub name: String,
}

impl From<LoginResponse> for Session {
    fn from(r: LoginResponse) -> Self {
        Session {
            token: r.token,
            name: r.name,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AddReviewerRequest<'a> {
    pub name: &'a str,
    #[serde(rename = "type")]
    pub role: &'static str,
}

/// Every call but `login` carries `Authorization: Bearer <token>`.
#[async_trait]
pub trait ReviewApi: Send + Sync {
    async fn login(&self, username: &str, password: &str) -> Result<Session, ApiError>;

    async fn reviewers(&self, token: &str) -> Result<Roster, ApiError>;

    async fn profiles(&self, token: &str, scope: ProfileScope) -> Result<ProfileMap, ApiError>;

    async fn update_profile(
        &self,
        token: &str,
        kind: UpdateKind,
        request: &UpdateRequest,
    ) -> Result<(), ApiError>;

    async fn add_reviewer(
        &self,
        token: &str,
        name: &str,
        role: ReviewerRole,
    ) -> Result<(), ApiError>;

    async fn approvals(&self, token: &str) -> Result<Vec<ApprovalRow>, ApiError>;
}
