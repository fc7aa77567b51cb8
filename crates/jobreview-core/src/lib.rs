//! Shared types for the job-profile reviewer and admin apps.

pub mod edit;
pub mod filter;
pub mod form;
pub mod notice;
pub mod profile;
pub mod report;
pub mod roster;
pub mod route;

use thiserror::Error;

pub use edit::{EditError, EditPolicy, EditSession};
pub use filter::{
    ApprovalFilter, distinct_attribute_values, profile_label, search_profiles, visible_profiles,
};
pub use form::{Attribute, FormState, UpdateRequest};
pub use notice::{Notice, NoticeLevel};
pub use profile::{Description, DescriptionField, Profile, ProfileMap};
pub use report::{ApprovalRow, REPORT_COLUMNS, ReportLine};
pub use roster::{ReviewerRole, Roster};
pub use route::{AppKind, LOGIN_PATH, Page, Route, Session, resolve_route};

/// Failure to parse a user-supplied name into one of the closed enums.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unknown description field: {0}")]
    UnknownField(String),

    #[error("unknown reviewer role: {0} (expected primary, hr, or manager)")]
    UnknownRole(String),

    #[error("unknown attribute: {0} (expected vertical, division, or subdivision)")]
    UnknownAttribute(String),

    #[error("unknown approval filter: {0} (expected all, approved, or unapproved)")]
    UnknownFilter(String),

    #[error("unknown app: {0} (expected reviewer or admin)")]
    UnknownApp(String),
}
