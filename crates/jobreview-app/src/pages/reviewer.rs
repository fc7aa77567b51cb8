//! Primary review page of the reviewer app.
//!
//! Shows the profiles the logged-in user is assigned to, filtered by approval
//! status, and drives an [`EditSession`] under [`EditPolicy::Reviewer`].

use std::sync::Arc;

use jobreview_client::{ProfileScope, ReviewApi, UpdateKind};
use jobreview_core::{
    ApprovalFilter, DescriptionField, EditError, EditPolicy, EditSession, Notice, Profile,
    ProfileMap, Roster, Session, profile_label, search_profiles, visible_profiles,
};
use tracing::{error, info, warn};

pub struct ReviewerPage {
    api: Arc<dyn ReviewApi>,
    session: Session,
    profiles: ProfileMap,
    roster: Roster,
    filter: ApprovalFilter,
    editor: EditSession,
    loading: bool,
}

impl ReviewerPage {
    pub fn new(api: Arc<dyn ReviewApi>, session: Session) -> Self {
        Self {
            api,
            session,
            profiles: ProfileMap::new(),
            roster: Roster::default(),
            filter: ApprovalFilter::All,
            editor: EditSession::new(EditPolicy::Reviewer),
            loading: true,
        }
    }

    /// Fetch profiles and the roster together. Both must succeed for either
    /// to replace what is shown.
    pub async fn load(&mut self) -> Option<Notice> {
        let token = self.session.token.as_str();
        let (profiles, roster) = tokio::join!(
            self.api.profiles(token, ProfileScope::Internal),
            self.api.reviewers(token),
        );
        self.loading = false;
        match (profiles, roster) {
            (Ok(profiles), Ok(roster)) => {
                info!(profiles = profiles.len(), "reviewer data loaded");
                self.profiles = profiles;
                self.roster = roster;
                None
            }
            (Err(e), _) | (_, Err(e)) => {
                error!(error = %e, "error fetching profiles");
                Some(Notice::error("Failed to load profiles."))
            }
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn profiles(&self) -> &ProfileMap {
        &self.profiles
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn editor(&self) -> &EditSession {
        &self.editor
    }

    pub fn filter(&self) -> ApprovalFilter {
        self.filter
    }

    /// Profiles assigned to the user that pass the approval filter.
    pub fn visible(&self) -> Vec<&str> {
        visible_profiles(&self.profiles, &self.session.name, self.filter)
    }

    pub fn search(&self, query: &str) -> Vec<&str> {
        search_profiles(&self.visible(), query)
    }

    pub fn label(&self, name: &str) -> String {
        match self.profiles.get(name) {
            Some(p) => profile_label(name, p),
            None => name.to_string(),
        }
    }

    /// Changing the filter drops the current selection.
    pub fn set_filter(&mut self, filter: ApprovalFilter) {
        self.filter = filter;
        self.editor.clear();
    }

    /// Select one of the visible profiles. Unknown names are ignored.
    pub fn select(&mut self, name: &str) -> bool {
        if !self.visible().contains(&name) {
            warn!(profile = %name, "profile not available for selection");
            return false;
        }
        let Some(profile) = self.profiles.get(name) else {
            return false;
        };
        self.editor.select(name, profile);
        true
    }

    pub fn reset_selection(&mut self) {
        self.editor.clear();
    }

    /// The selected profile as last fetched.
    pub fn selected_profile(&self) -> Option<(&str, &Profile)> {
        let name = self.editor.selected()?;
        self.profiles.get_key_value(name).map(|(n, p)| (n.as_str(), p))
    }

    pub fn toggle_edit(&mut self) -> Result<bool, EditError> {
        self.editor.toggle_main()
    }

    pub fn toggle_section(&mut self, field: DescriptionField) -> Result<bool, EditError> {
        self.editor.toggle_section(field)
    }

    pub fn edit_field(
        &mut self,
        field: DescriptionField,
        value: impl Into<String>,
    ) -> Result<(), EditError> {
        self.editor.edit_field(field, value)
    }

    /// Persist the Edit Buffer. On failure nothing changes so the user can
    /// try again.
    pub async fn save(&mut self) -> Result<Notice, EditError> {
        let request = self.editor.update_payload()?;
        let result = self
            .api
            .update_profile(&self.session.token, UpdateKind::ReviewerSave, &request)
            .await;
        match result {
            Ok(()) => {
                info!(profile = %request.profile, "changes saved");
                self.editor.commit();
                self.refresh().await;
                Ok(Notice::success("Changes saved successfully!"))
            }
            Err(e) => {
                error!(profile = %request.profile, error = %e, "error saving changes");
                Ok(Notice::error("Failed to save changes."))
            }
        }
    }

    /// Only the selected profile's primary reviewer may approve it.
    pub fn can_approve(&self) -> bool {
        let user = self.session.name.as_str();
        !user.is_empty()
            && self
                .selected_profile()
                .is_some_and(|(_, p)| p.primary_reviewer.as_deref() == Some(user))
    }

    /// Save the buffer with `approved_internal = "yes"` and return to the
    /// no-selection view.
    pub async fn approve(&mut self) -> Result<Notice, EditError> {
        if !self.can_approve() {
            return Err(EditError::NotPrimaryReviewer);
        }
        let request = self.editor.approval_payload()?;
        let result = self
            .api
            .update_profile(&self.session.token, UpdateKind::ReviewerApprove, &request)
            .await;
        match result {
            Ok(()) => {
                info!(profile = %request.profile, user = %self.session.name, "profile approved");
                self.editor.commit_approval();
                self.refresh().await;
                Ok(Notice::success("Changes approved successfully!"))
            }
            Err(e) => {
                error!(profile = %request.profile, error = %e, "error approving profile");
                Ok(Notice::error("Failed to approve changes."))
            }
        }
    }

    /// Re-fetch after a write. Failures are logged only.
    async fn refresh(&mut self) {
        if let Some(notice) = self.load().await {
            warn!(%notice, "refresh after write failed");
        }
    }
}
