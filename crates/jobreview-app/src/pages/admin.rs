//! Admin review page.
//!
//! Every profile is listed. While main-editing the admin may also reassign
//! reviewers, change organisation attributes, and grow the roster. The
//! approval report is fetched on demand and can be exported to a spreadsheet.

use std::path::Path;
use std::sync::Arc;

use chrono::NaiveDate;
use jobreview_client::{ProfileScope, ReviewApi, UpdateKind};
use jobreview_core::{
    ApprovalRow, Attribute, DescriptionField, EditError, EditPolicy, EditSession, Notice, Profile,
    ProfileMap, ReportLine, ReviewerRole, Roster, Session, distinct_attribute_values,
    search_profiles,
};
use jobreview_export::export_approvals;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::prompt::{Prompt, accepted};

/// A roster name appended locally whose create request is still in flight.
///
/// The local append is never rolled back; awaiting `handle` only tells you
/// the request has finished.
pub struct PendingRosterAdd {
    pub name: String,
    pub handle: JoinHandle<()>,
}

pub struct AdminPage {
    api: Arc<dyn ReviewApi>,
    session: Session,
    profiles: ProfileMap,
    roster: Roster,
    editor: EditSession,
    loading: bool,
    report_visible: bool,
    report: Vec<ApprovalRow>,
}

impl AdminPage {
    pub fn new(api: Arc<dyn ReviewApi>, session: Session) -> Self {
        Self {
            api,
            session,
            profiles: ProfileMap::new(),
            roster: Roster::default(),
            editor: EditSession::new(EditPolicy::Admin),
            loading: true,
            report_visible: false,
            report: Vec::new(),
        }
    }

    /// Fetch profiles and the roster in parallel. Each replaces its own data
    /// on success; a failure leaves that half empty.
    pub async fn load(&mut self) -> Option<Notice> {
        let token = self.session.token.as_str();
        let (profiles, roster) = tokio::join!(
            self.api.profiles(token, ProfileScope::All),
            self.api.reviewers(token),
        );
        self.loading = false;
        let mut failed = false;
        match profiles {
            Ok(profiles) => {
                info!(profiles = profiles.len(), "admin profiles loaded");
                self.profiles = profiles;
            }
            Err(e) => {
                error!(error = %e, "error fetching profiles");
                failed = true;
            }
        }
        match roster {
            Ok(roster) => self.roster = roster,
            Err(e) => {
                error!(error = %e, "error fetching reviewers");
                failed = true;
            }
        }
        failed.then(|| Notice::error("Failed to load profiles."))
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

    pub fn profile_names(&self) -> Vec<&str> {
        self.profiles.keys().map(String::as_str).collect()
    }

    pub fn search(&self, query: &str) -> Vec<&str> {
        search_profiles(&self.profile_names(), query)
    }

    /// Choices offered for an organisation attribute.
    pub fn attribute_options(&self, attr: Attribute) -> Vec<String> {
        distinct_attribute_values(&self.profiles, attr)
    }

    pub fn select(&mut self, name: &str) -> bool {
        let Some(profile) = self.profiles.get(name) else {
            warn!(profile = %name, "profile data not found for selected profile");
            return false;
        };
        self.editor.select(name, profile);
        true
    }

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

    pub fn set_attribute(
        &mut self,
        attr: Attribute,
        value: impl Into<String>,
    ) -> Result<(), EditError> {
        self.editor.set_attribute(attr, value)
    }

    pub fn assign_reviewer(
        &mut self,
        role: ReviewerRole,
        name: impl Into<String>,
    ) -> Result<(), EditError> {
        self.editor.assign_reviewer(role, name)
    }

    /// Ask for a new roster name, append it locally, assign it in the buffer,
    /// and send the create request in the background.
    ///
    /// Returns `Ok(None)` when the prompt is cancelled or left blank.
    pub fn add_reviewer(
        &mut self,
        role: ReviewerRole,
        prompt: &mut dyn Prompt,
    ) -> Result<Option<PendingRosterAdd>, EditError> {
        if self.editor.selected().is_none() {
            return Err(EditError::NoSelection);
        }
        if !self.editor.is_main_editable() {
            return Err(EditError::NotEditing);
        }
        let Some(name) = accepted(prompt.ask(role.prompt_title())) else {
            return Ok(None);
        };

        self.roster.append(role, name.clone());
        self.editor.assign_reviewer(role, name.clone())?;
        info!(%name, role = role.wire_name(), "reviewer added to roster");

        let api = Arc::clone(&self.api);
        let token = self.session.token.clone();
        let request_name = name.clone();
        let handle = tokio::spawn(async move {
            if let Err(e) = api.add_reviewer(&token, &request_name, role).await {
                error!(name = %request_name, role = role.wire_name(), error = %e, "failed to save reviewer");
            }
        });
        Ok(Some(PendingRosterAdd { name, handle }))
    }

    /// Persist the Edit Buffer and re-fetch the profile list.
    pub async fn save(&mut self) -> Result<Notice, EditError> {
        let request = self.editor.update_payload()?;
        let result = self
            .api
            .update_profile(&self.session.token, UpdateKind::AdminUpdate, &request)
            .await;
        match result {
            Ok(()) => {
                info!(profile = %request.profile, "admin changes saved");
                self.editor.commit();
                self.refresh_profiles().await;
                Ok(Notice::success("Changes saved successfully!"))
            }
            Err(e) => {
                error!(profile = %request.profile, error = %e, "error saving changes");
                Ok(Notice::error("Failed to save changes."))
            }
        }
    }

    async fn refresh_profiles(&mut self) {
        match self
            .api
            .profiles(&self.session.token, ProfileScope::All)
            .await
        {
            Ok(profiles) => self.profiles = profiles,
            Err(e) => warn!(error = %e, "refresh after save failed"),
        }
    }

    /// Show or hide the approval report. Showing it always re-fetches; a
    /// failed fetch keeps the rows already loaded.
    pub async fn toggle_report(&mut self) -> bool {
        self.report_visible = !self.report_visible;
        if self.report_visible {
            match self.api.approvals(&self.session.token).await {
                Ok(rows) => {
                    info!(rows = rows.len(), "approval report loaded");
                    self.report = rows;
                }
                Err(e) => error!(error = %e, "error fetching approval data"),
            }
        }
        self.report_visible
    }

    pub fn report_visible(&self) -> bool {
        self.report_visible
    }

    /// Loaded report rows shaped for the on-screen table.
    pub fn report_lines(&self) -> Vec<ReportLine> {
        self.report.iter().map(ReportLine::table_row).collect()
    }

    /// Loaded report rows shaped for the spreadsheet.
    pub fn export_lines(&self) -> Vec<ReportLine> {
        self.report.iter().map(ReportLine::export_row).collect()
    }

    /// Write the loaded report rows to `dir`.
    pub fn download_report(&self, dir: &Path, date: NaiveDate) -> Notice {
        let lines = self.export_lines();
        if lines.is_empty() {
            return Notice::info("No data to export.");
        }
        match export_approvals(&lines, dir, date) {
            Ok(path) => Notice::success(format!("Report saved to {}", path.display())),
            Err(e) => {
                error!(error = %e, "approval report export failed");
                Notice::error(format!("Export failed: {e}"))
            }
        }
    }
}
