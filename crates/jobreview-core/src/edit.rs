//! Editable form state machine.
//!
//! One [`EditSession`] tracks the selected profile, its Form State snapshot,
//! the Edit Buffer, the main edit toggle, and one edit flag per description
//! field. The reviewer and admin apps differ in how the toggles treat the
//! buffer; each is a named [`EditPolicy`] and neither is a special case of
//! the other.
//!
//! ```text
//!            select / clear (any state)
//!                    │
//!                    ▼
//!   ┌──────── Viewing ────────┐
//!   │ toggle_main      toggle_main / commit
//!   ▼                         │
//! MainEditing ── toggle_section(k) ──▶ per-field override
//! ```

use thiserror::Error;
use tracing::debug;

use crate::form::{Attribute, FormState, UpdateRequest};
use crate::profile::{APPROVED, DescriptionField, Profile};
use crate::roster::ReviewerRole;

const FIELD_COUNT: usize = DescriptionField::ALL.len();

/// How the edit toggles interact with the Edit Buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditPolicy {
    /// Entering main edit reseeds the buffer from Form State and sets every
    /// section flag to the new main value. Closing a section keeps whatever
    /// was typed into it.
    Reviewer,
    /// Entering main edit opens every section; leaving it resets the whole
    /// buffer. Closing a single section resets that field only.
    Admin,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("no profile selected")]
    NoSelection,

    #[error("not in edit mode")]
    NotEditing,

    #[error("section '{0}' is not open for editing")]
    SectionLocked(DescriptionField),

    #[error("{0} is not editable in this app")]
    NotPermitted(&'static str),

    #[error("only the profile's primary reviewer can approve it")]
    NotPrimaryReviewer,
}

#[derive(Debug, Clone)]
pub struct EditSession {
    policy: EditPolicy,
    selected: Option<String>,
    form: FormState,
    buffer: FormState,
    main_editable: bool,
    sections: [bool; FIELD_COUNT],
}

impl EditSession {
    pub fn new(policy: EditPolicy) -> Self {
        Self {
            policy,
            selected: None,
            form: FormState::default(),
            buffer: FormState::default(),
            main_editable: false,
            sections: [false; FIELD_COUNT],
        }
    }

    pub fn policy(&self) -> EditPolicy {
        self.policy
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// The last known good snapshot.
    pub fn form(&self) -> &FormState {
        &self.form
    }

    /// The working copy, meaningful while any edit flag is on.
    pub fn buffer(&self) -> &FormState {
        &self.buffer
    }

    pub fn is_main_editable(&self) -> bool {
        self.main_editable
    }

    pub fn is_section_editable(&self, field: DescriptionField) -> bool {
        self.sections[field.index()]
    }

    /// Load a profile into Form State and return to viewing.
    ///
    /// Any pending edits are dropped without confirmation.
    pub fn select(&mut self, name: &str, profile: &Profile) {
        debug!(profile = %name, dropped_edits = self.main_editable, "selecting profile");
        self.form = FormState::from_profile(profile);
        self.buffer = self.form.clone();
        self.selected = Some(name.to_string());
        self.main_editable = false;
        self.sections = [false; FIELD_COUNT];
    }

    /// Return to the no-selection view.
    pub fn clear(&mut self) {
        self.selected = None;
        self.form = FormState::default();
        self.buffer = FormState::default();
        self.main_editable = false;
        self.sections = [false; FIELD_COUNT];
    }

    /// Flip the main edit toggle. Returns the new value.
    pub fn toggle_main(&mut self) -> Result<bool, EditError> {
        self.require_selection()?;
        let entering = !self.main_editable;
        let reseed = match self.policy {
            EditPolicy::Reviewer => entering,
            EditPolicy::Admin => !entering,
        };
        if reseed {
            self.buffer = self.form.clone();
        }
        self.sections = [entering; FIELD_COUNT];
        self.main_editable = entering;
        Ok(entering)
    }

    /// Flip one section's edit flag. Returns the new value.
    pub fn toggle_section(&mut self, field: DescriptionField) -> Result<bool, EditError> {
        self.require_selection()?;
        if !self.main_editable {
            return Err(EditError::NotEditing);
        }
        let open = !self.sections[field.index()];
        self.sections[field.index()] = open;
        if !open && self.policy == EditPolicy::Admin {
            self.buffer
                .description
                .copy_field_from(&self.form.description, field);
        }
        Ok(open)
    }

    /// Write a value into the Edit Buffer. No validation; empty is allowed.
    pub fn edit_field(
        &mut self,
        field: DescriptionField,
        value: impl Into<String>,
    ) -> Result<(), EditError> {
        self.require_selection()?;
        if !self.sections[field.index()] {
            return Err(EditError::SectionLocked(field));
        }
        self.buffer.set(field, value);
        Ok(())
    }

    /// Admin only: change vertical, division, or subdivision in the buffer.
    pub fn set_attribute(
        &mut self,
        attr: Attribute,
        value: impl Into<String>,
    ) -> Result<(), EditError> {
        self.require_admin_editing("organisation attributes")?;
        self.buffer.set_attribute(attr, value);
        Ok(())
    }

    /// Admin only: point a reviewer slot in the buffer at a roster name.
    pub fn assign_reviewer(
        &mut self,
        role: ReviewerRole,
        name: impl Into<String>,
    ) -> Result<(), EditError> {
        self.require_admin_editing("reviewer assignments")?;
        self.buffer.set_reviewer(role, name);
        Ok(())
    }

    /// The save request for the current buffer, unchanged fields included.
    pub fn update_payload(&self) -> Result<UpdateRequest, EditError> {
        let profile = self.require_selection()?;
        if !self.main_editable {
            return Err(EditError::NotEditing);
        }
        Ok(UpdateRequest {
            profile: profile.to_string(),
            updated_data: self.buffer.clone(),
        })
    }

    /// Reviewer only: the current values merged with
    /// `approved_internal = "yes"`.
    ///
    /// While main-editing that is the buffer. Otherwise it is the snapshot,
    /// so a draft left behind by a cancelled edit is never submitted.
    pub fn approval_payload(&self) -> Result<UpdateRequest, EditError> {
        let profile = self.require_selection()?;
        if self.policy != EditPolicy::Reviewer {
            return Err(EditError::NotPermitted("approval"));
        }
        let source = if self.main_editable {
            &self.buffer
        } else {
            &self.form
        };
        let mut updated_data = source.clone();
        updated_data.approved_internal = Some(APPROVED.to_string());
        Ok(UpdateRequest {
            profile: profile.to_string(),
            updated_data,
        })
    }

    /// Accept the buffer as the new snapshot after a successful save.
    pub fn commit(&mut self) {
        self.form = self.buffer.clone();
        self.main_editable = false;
        self.sections = [false; FIELD_COUNT];
    }

    /// Accept an approval: commit, then drop the selection.
    pub fn commit_approval(&mut self) {
        self.commit();
        self.clear();
    }

    fn require_selection(&self) -> Result<&str, EditError> {
        self.selected.as_deref().ok_or(EditError::NoSelection)
    }

    fn require_admin_editing(&self, what: &'static str) -> Result<(), EditError> {
        self.require_selection()?;
        if self.policy != EditPolicy::Admin {
            return Err(EditError::NotPermitted(what));
        }
        if !self.main_editable {
            return Err(EditError::NotEditing);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::DescriptionField::*;

    fn profile(purpose: &str) -> Profile {
        let mut p = Profile {
            primary_reviewer: Some("Ada".into()),
            hr_reviewer: Some("Grace".into()),
            hiring_manager: Some("Linus".into()),
            vertical: Some("Engineering".into()),
            ..Default::default()
        };
        p.description.set(Purpose, purpose);
        p.description.set(Travel, "10%");
        p
    }

    fn selected(policy: EditPolicy) -> EditSession {
        let mut s = EditSession::new(policy);
        s.select("Engineer-II", &profile("Old purpose"));
        s
    }

    #[test]
    fn select_starts_viewing() {
        let s = selected(EditPolicy::Reviewer);
        assert_eq!(s.selected(), Some("Engineer-II"));
        assert!(!s.is_main_editable());
        assert!(DescriptionField::ALL.iter().all(|&f| !s.is_section_editable(f)));
        assert_eq!(s.form().get(Purpose), "Old purpose");
        assert_eq!(s.buffer(), s.form());
    }

    #[test]
    fn toggles_need_a_selection() {
        let mut s = EditSession::new(EditPolicy::Reviewer);
        assert_eq!(s.toggle_main(), Err(EditError::NoSelection));
        assert_eq!(s.toggle_section(Purpose), Err(EditError::NoSelection));
        assert_eq!(s.edit_field(Purpose, "x"), Err(EditError::NoSelection));
        assert_eq!(s.update_payload(), Err(EditError::NoSelection));
    }

    #[test]
    fn double_toggle_leaves_form_unchanged() {
        for policy in [EditPolicy::Reviewer, EditPolicy::Admin] {
            let mut s = selected(policy);
            let before = s.form().clone();
            assert_eq!(s.toggle_main(), Ok(true));
            assert_eq!(s.toggle_main(), Ok(false));
            assert_eq!(s.form(), &before);
            assert!(DescriptionField::ALL.iter().all(|&f| !s.is_section_editable(f)));
        }
    }

    #[test]
    fn entering_main_opens_every_section() {
        for policy in [EditPolicy::Reviewer, EditPolicy::Admin] {
            let mut s = selected(policy);
            s.toggle_main().unwrap();
            assert!(DescriptionField::ALL.iter().all(|&f| s.is_section_editable(f)));
        }
    }

    #[test]
    fn section_toggle_requires_main_edit() {
        for policy in [EditPolicy::Reviewer, EditPolicy::Admin] {
            let mut s = selected(policy);
            assert_eq!(s.toggle_section(Travel), Err(EditError::NotEditing));
        }
    }

    #[test]
    fn edit_requires_open_section() {
        let mut s = selected(EditPolicy::Reviewer);
        assert_eq!(
            s.edit_field(Purpose, "nope"),
            Err(EditError::SectionLocked(Purpose))
        );
        s.toggle_main().unwrap();
        s.edit_field(Purpose, "").unwrap();
        assert_eq!(s.buffer().get(Purpose), "");
        assert_eq!(s.form().get(Purpose), "Old purpose");
    }

    #[test]
    fn reviewer_section_close_keeps_buffer() {
        let mut s = selected(EditPolicy::Reviewer);
        s.toggle_main().unwrap();
        s.edit_field(Travel, "50%").unwrap();
        assert_eq!(s.toggle_section(Travel), Ok(false));
        assert_eq!(s.buffer().get(Travel), "50%");
        assert_eq!(s.toggle_section(Travel), Ok(true));
        assert_eq!(s.buffer().get(Travel), "50%");
    }

    #[test]
    fn admin_section_close_reverts_that_field_only() {
        let mut s = selected(EditPolicy::Admin);
        s.toggle_main().unwrap();
        s.edit_field(Travel, "50%").unwrap();
        s.edit_field(Purpose, "New purpose").unwrap();
        assert_eq!(s.toggle_section(Travel), Ok(false));
        assert_eq!(s.buffer().get(Travel), "10%");
        assert_eq!(s.buffer().get(Purpose), "New purpose");
        assert!(s.is_section_editable(Purpose));
    }

    #[test]
    fn reviewer_reentry_reseeds_buffer() {
        let mut s = selected(EditPolicy::Reviewer);
        s.toggle_main().unwrap();
        s.edit_field(Purpose, "draft").unwrap();
        s.toggle_main().unwrap();
        s.toggle_main().unwrap();
        assert_eq!(s.buffer().get(Purpose), "Old purpose");
    }

    #[test]
    fn admin_exit_resets_buffer() {
        let mut s = selected(EditPolicy::Admin);
        s.toggle_main().unwrap();
        s.edit_field(Purpose, "draft").unwrap();
        s.assign_reviewer(ReviewerRole::Hr, "Barbara").unwrap();
        s.toggle_main().unwrap();
        assert_eq!(s.buffer(), s.form());
    }

    #[test]
    fn commit_replaces_form_and_closes_everything() {
        let mut s = selected(EditPolicy::Reviewer);
        s.toggle_main().unwrap();
        s.edit_field(Purpose, "New purpose text").unwrap();
        let req = s.update_payload().unwrap();
        assert_eq!(req.profile, "Engineer-II");
        assert_eq!(req.updated_data.get(Purpose), "New purpose text");
        s.commit();
        assert_eq!(s.form().get(Purpose), "New purpose text");
        assert!(!s.is_main_editable());
        assert!(DescriptionField::ALL.iter().all(|&f| !s.is_section_editable(f)));
        assert_eq!(s.selected(), Some("Engineer-II"));
    }

    #[test]
    fn save_payload_requires_main_edit() {
        let s = selected(EditPolicy::Admin);
        assert_eq!(s.update_payload(), Err(EditError::NotEditing));
    }

    #[test]
    fn unchanged_buffer_still_produces_payload() {
        let mut s = selected(EditPolicy::Admin);
        s.toggle_main().unwrap();
        let req = s.update_payload().unwrap();
        assert_eq!(&req.updated_data, s.form());
    }

    #[test]
    fn approval_payload_marks_approved() {
        let mut s = selected(EditPolicy::Reviewer);
        s.toggle_main().unwrap();
        s.edit_field(Purpose, "Approved text").unwrap();
        let req = s.approval_payload().unwrap();
        assert_eq!(req.updated_data.approved_internal.as_deref(), Some("yes"));
        assert_eq!(req.updated_data.get(Purpose), "Approved text");
        assert!(s.buffer().approved_internal.is_none());
    }

    #[test]
    fn approval_without_edit_sends_snapshot() {
        let s = selected(EditPolicy::Reviewer);
        let req = s.approval_payload().unwrap();
        assert_eq!(req.updated_data.get(Purpose), "Old purpose");
        assert_eq!(req.updated_data.get(Travel), "10%");
    }

    #[test]
    fn approval_after_cancelled_edit_sends_snapshot() {
        let mut s = selected(EditPolicy::Reviewer);
        s.toggle_main().unwrap();
        s.edit_field(Purpose, "cancelled draft").unwrap();
        assert_eq!(s.toggle_main(), Ok(false));
        let req = s.approval_payload().unwrap();
        assert_eq!(req.updated_data.get(Purpose), "Old purpose");
        assert_eq!(&req.updated_data.description, &s.form().description);
    }

    #[test]
    fn admin_cannot_approve_and_reviewer_cannot_reassign() {
        let mut admin = selected(EditPolicy::Admin);
        assert_eq!(
            admin.approval_payload(),
            Err(EditError::NotPermitted("approval"))
        );
        admin.toggle_main().unwrap();
        admin.set_attribute(Attribute::Division, "Platform").unwrap();
        assert_eq!(admin.buffer().attribute(Attribute::Division), "Platform");

        let mut reviewer = selected(EditPolicy::Reviewer);
        reviewer.toggle_main().unwrap();
        assert!(matches!(
            reviewer.assign_reviewer(ReviewerRole::Primary, "Ken"),
            Err(EditError::NotPermitted(_))
        ));
    }

    #[test]
    fn admin_attribute_edits_need_main_edit() {
        let mut s = selected(EditPolicy::Admin);
        assert_eq!(
            s.assign_reviewer(ReviewerRole::Primary, "Ken"),
            Err(EditError::NotEditing)
        );
    }

    #[test]
    fn commit_approval_clears_selection() {
        let mut s = selected(EditPolicy::Reviewer);
        s.commit_approval();
        assert_eq!(s.selected(), None);
        assert!(!s.is_main_editable());
    }

    #[test]
    fn reselect_discards_pending_edits() {
        let mut s = selected(EditPolicy::Reviewer);
        s.toggle_main().unwrap();
        s.edit_field(Purpose, "unsaved").unwrap();
        s.select("Engineer-II", &profile("Old purpose"));
        assert!(!s.is_main_editable());
        assert_eq!(s.buffer().get(Purpose), "Old purpose");
    }
}
