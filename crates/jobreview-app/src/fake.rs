//! In-memory backend for page tests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use async_trait::async_trait;
use jobreview_client::{ApiError, ProfileScope, ReviewApi, UpdateKind};
use jobreview_core::{
    ApprovalRow, DescriptionField, Profile, ProfileMap, ReviewerRole, Roster, Session,
    UpdateRequest,
};

use crate::prompt::Prompt;

#[derive(Default)]
pub struct FakeApi {
    pub users: Mutex<HashMap<String, (String, String)>>,
    pub profiles: Mutex<ProfileMap>,
    pub roster: Mutex<Roster>,
    pub approvals: Mutex<Vec<ApprovalRow>>,
    pub updates: Mutex<Vec<(UpdateKind, UpdateRequest)>>,
    pub added: Mutex<Vec<(String, ReviewerRole)>>,
    pub tokens: Mutex<Vec<String>>,
    pub profile_fetches: AtomicU64,
    pub offline: AtomicBool,
    pub reject_updates: AtomicBool,
    pub reject_roster_add: AtomicBool,
    pub plain_login_rejection: AtomicBool,
    pub fail_profiles: AtomicBool,
    pub fail_roster: AtomicBool,
}

impl FakeApi {
    pub fn with_user(self, username: &str, password: &str, name: &str) -> Self {
        self.users.lock().unwrap().insert(
            username.to_string(),
            (password.to_string(), name.to_string()),
        );
        self
    }

    pub fn with_profile(self, name: &str, profile: Profile) -> Self {
        self.profiles
            .lock()
            .unwrap()
            .insert(name.to_string(), profile);
        self
    }

    pub fn with_roster(self, roster: Roster) -> Self {
        *self.roster.lock().unwrap() = roster;
        self
    }

    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    pub fn set_reject_updates(&self, reject: bool) {
        self.reject_updates.store(reject, Ordering::SeqCst);
    }

    /// Answer bad credentials with a 401 whose body is not JSON.
    pub fn set_plain_login_rejection(&self, plain: bool) {
        self.plain_login_rejection.store(plain, Ordering::SeqCst);
    }

    pub fn set_fail_profiles(&self, fail: bool) {
        self.fail_profiles.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_roster(&self, fail: bool) {
        self.fail_roster.store(fail, Ordering::SeqCst);
    }

    pub fn update_count(&self) -> usize {
        self.updates.lock().unwrap().len()
    }

    pub fn last_update(&self) -> Option<(UpdateKind, UpdateRequest)> {
        self.updates.lock().unwrap().last().cloned()
    }

    fn check(&self, token: &str) -> Result<(), ApiError> {
        self.tokens.lock().unwrap().push(token.to_string());
        if self.offline.load(Ordering::SeqCst) {
            return Err(ApiError::Transport("connection refused".into()));
        }
        Ok(())
    }

    fn apply(&self, kind: UpdateKind, request: &UpdateRequest) {
        let mut profiles = self.profiles.lock().unwrap();
        let Some(profile) = profiles.get_mut(&request.profile) else {
            return;
        };
        let data = &request.updated_data;
        for field in DescriptionField::ALL {
            profile
                .description
                .copy_field_from(&data.description, field);
        }
        match kind {
            UpdateKind::ReviewerSave => {}
            UpdateKind::ReviewerApprove => {
                profile.approved_internal = data.approved_internal.clone();
            }
            UpdateKind::AdminUpdate => {
                profile.primary_reviewer = data.primary_reviewer.clone();
                profile.hr_reviewer = data.hr_reviewer.clone();
                profile.hiring_manager = data.hiring_manager.clone();
                profile.vertical = data.vertical.clone();
                profile.division = data.division.clone();
                profile.subdivision = data.subdivision.clone();
            }
        }
    }
}

fn rejected() -> ApiError {
    ApiError::Server {
        status: 500,
        body: r#"{"error": "Internal Server Error"}"#.into(),
    }
}

#[async_trait]
impl ReviewApi for FakeApi {
    async fn login(&self, username: &str, password: &str) -> Result<Session, ApiError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(ApiError::Transport("connection refused".into()));
        }
        match self.users.lock().unwrap().get(username) {
            Some((pw, name)) if pw == password => Ok(Session {
                token: format!("token-{username}"),
                name: name.clone(),
            }),
            _ if self.plain_login_rejection.load(Ordering::SeqCst) => Err(ApiError::Server {
                status: 401,
                body: "Unauthorized".into(),
            }),
            _ => Err(ApiError::Server {
                status: 401,
                body: r#"{"error": "Invalid credentials"}"#.into(),
            }),
        }
    }

    async fn reviewers(&self, token: &str) -> Result<Roster, ApiError> {
        self.check(token)?;
        if self.fail_roster.load(Ordering::SeqCst) {
            return Err(rejected());
        }
        Ok(self.roster.lock().unwrap().clone())
    }

    async fn profiles(&self, token: &str, scope: ProfileScope) -> Result<ProfileMap, ApiError> {
        self.check(token)?;
        self.profile_fetches.fetch_add(1, Ordering::SeqCst);
        if self.fail_profiles.load(Ordering::SeqCst) {
            return Err(rejected());
        }
        let mut profiles = self.profiles.lock().unwrap().clone();
        if scope == ProfileScope::All {
            for p in profiles.values_mut() {
                p.approved_internal = None;
            }
        }
        Ok(profiles)
    }

    async fn update_profile(
        &self,
        token: &str,
        kind: UpdateKind,
        request: &UpdateRequest,
    ) -> Result<(), ApiError> {
        self.check(token)?;
        self.updates.lock().unwrap().push((kind, request.clone()));
        if self.reject_updates.load(Ordering::SeqCst) {
            return Err(rejected());
        }
        self.apply(kind, request);
        Ok(())
    }

    async fn add_reviewer(
        &self,
        token: &str,
        name: &str,
        role: ReviewerRole,
    ) -> Result<(), ApiError> {
        self.check(token)?;
        self.added.lock().unwrap().push((name.to_string(), role));
        if self.reject_roster_add.load(Ordering::SeqCst) {
            return Err(rejected());
        }
        Ok(())
    }

    async fn approvals(&self, token: &str) -> Result<Vec<ApprovalRow>, ApiError> {
        self.check(token)?;
        Ok(self.approvals.lock().unwrap().clone())
    }
}

/// Prompt that replays canned answers.
pub struct ScriptedPrompt {
    pub answers: Vec<Option<String>>,
    pub asked: Vec<String>,
}

impl ScriptedPrompt {
    pub fn new(answers: &[Option<&str>]) -> Self {
        Self {
            answers: answers.iter().rev().map(|a| a.map(str::to_string)).collect(),
            asked: Vec::new(),
        }
    }
}

impl Prompt for ScriptedPrompt {
    fn ask(&mut self, title: &str) -> Option<String> {
        self.asked.push(title.to_string());
        self.answers.pop().flatten()
    }
}

pub fn profile(primary: &str, hr: &str, manager: &str) -> Profile {
    let mut p = Profile {
        primary_reviewer: Some(primary.into()),
        hr_reviewer: Some(hr.into()),
        hiring_manager: Some(manager.into()),
        vertical: Some("Engineering".into()),
        division: Some("Platform".into()),
        subdivision: Some("Runtime".into()),
        ..Default::default()
    };
    p.description.set(DescriptionField::Purpose, "Old purpose");
    p.description.set(DescriptionField::Travel, "10%");
    p
}

pub fn session(name: &str) -> Session {
    Session {
        token: format!("token-{name}"),
        name: name.to_string(),
    }
}
