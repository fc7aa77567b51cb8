//! `reqwest` implementation of [`ReviewApi`].

use async_trait::async_trait;
use jobreview_core::{ApprovalRow, ProfileMap, ReviewerRole, Roster, Session, UpdateRequest};
use serde::de::DeserializeOwned;
use tracing::{info, warn};

use crate::api::{
    ADD_REVIEWER_PATH, APPROVALS_PATH, AddReviewerRequest, ApiError, LOGIN_PATH, LoginRequest,
    LoginResponse, ProfileScope, REVIEWERS_PATH, ReviewApi, UpdateKind,
};

/// HTTP client for the review backend.
pub struct HttpReviewApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpReviewApi {
    /// Create a client for the given backend base URL.
    ///
    /// `base_url` should be like `http://127.0.0.1:5000`; a trailing slash is
    /// dropped.
    pub fn new(base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, token: &str) -> Result<T, ApiError> {
        let url = self.url(path);
        info!(url = %url, "GET");
        let resp = self.client.get(&url).bearer_auth(token).send().await?;
        let resp = ensure_success(resp).await?;
        Ok(resp.json().await?)
    }

    async fn post_json<B: serde::Serialize + ?Sized>(
        &self,
        path: &str,
        token: &str,
        body: &B,
    ) -> Result<(), ApiError> {
        let url = self.url(path);
        info!(url = %url, "POST");
        let resp = self
            .client
            .post(&url)
            .bearer_auth(token)
            .json(body)
            .send()
            .await?;
        ensure_success(resp).await?;
        Ok(())
    }
}

async fn ensure_success(resp: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    warn!(status = status.as_u16(), "backend rejected request");
    Err(ApiError::Server {
        status: status.as_u16(),
        body,
    })
}

#[async_trait]
impl ReviewApi for HttpReviewApi {
    async fn login(&self, username: &str, password: &str) -> Result<Session, ApiError> {
        let url = self.url(LOGIN_PATH);
        info!(url = %url, username, "logging in");
        let resp = self
            .client
            .post(&url)
            .json(&LoginRequest { username, password })
            .send()
            .await?;
        let resp = ensure_success(resp).await?;
        let body: LoginResponse = resp.json().await?;
        Ok(body.into())
    }

    async fn reviewers(&self, token: &str) -> Result<Roster, ApiError> {
        let roster: Roster = self.get_json(REVIEWERS_PATH, token).await?;
        info!(
            primary = roster.primary_reviewers.len(),
            hr = roster.hr_reviewers.len(),
            managers = roster.managers.len(),
            "fetched reviewer roster"
        );
        Ok(roster)
    }

    async fn profiles(&self, token: &str, scope: ProfileScope) -> Result<ProfileMap, ApiError> {
        let profiles: ProfileMap = self.get_json(scope.path(), token).await?;
        info!(count = profiles.len(), "fetched profiles");
        Ok(profiles)
    }

    async fn update_profile(
        &self,
        token: &str,
        kind: UpdateKind,
        request: &UpdateRequest,
    ) -> Result<(), ApiError> {
        self.post_json(kind.path(), token, request).await?;
        info!(profile = %request.profile, ?kind, "profile updated");
        Ok(())
    }

    async fn add_reviewer(
        &self,
        token: &str,
        name: &str,
        role: ReviewerRole,
    ) -> Result<(), ApiError> {
        let body = AddReviewerRequest {
            name,
            role: role.wire_name(),
        };
        self.post_json(ADD_REVIEWER_PATH, token, &body).await
    }

    async fn approvals(&self, token: &str) -> Result<Vec<ApprovalRow>, ApiError> {
        let rows: Vec<ApprovalRow> = self.get_json(APPROVALS_PATH, token).await?;
        info!(count = rows.len(), "fetched approval report");
        Ok(rows)
    }
}
