//! Job-profile records as served by the review backend.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ParseError;

/// Profiles keyed by their unique profile name, in name order.
pub type ProfileMap = BTreeMap<String, Profile>;

/// Value of `approved_internal` once a primary reviewer has approved.
pub const APPROVED: &str = "yes";

/// The thirteen free-text fields of a job description, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DescriptionField {
    Purpose,
    Responsibilities,
    Manager,
    Travel,
    Physical,
    WorkConditions,
    MinQualifications,
    PreferredQualifications,
    MinEducation,
    PreferredEducation,
    MinExperience,
    Certifications,
    Competencies,
}

impl DescriptionField {
    pub const ALL: [DescriptionField; 13] = [
        Self::Purpose,
        Self::Responsibilities,
        Self::Manager,
        Self::Travel,
        Self::Physical,
        Self::WorkConditions,
        Self::MinQualifications,
        Self::PreferredQualifications,
        Self::MinEducation,
        Self::PreferredEducation,
        Self::MinExperience,
        Self::Certifications,
        Self::Competencies,
    ];

    /// Wire key used in the `description` object and in `updatedData`.
    pub fn key(self) -> &'static str {
        match self {
            Self::Purpose => "purpose",
            Self::Responsibilities => "responsibilities",
            Self::Manager => "manager",
            Self::Travel => "travel",
            Self::Physical => "physical",
            Self::WorkConditions => "workconditions",
            Self::MinQualifications => "minqualifications",
            Self::PreferredQualifications => "preferredqualifications",
            Self::MinEducation => "mineducation",
            Self::PreferredEducation => "preferrededucation",
            Self::MinExperience => "minexperience",
            Self::Certifications => "certifications",
            Self::Competencies => "competencies",
        }
    }

    /// Section heading shown above the field.
    pub fn label(self) -> &'static str {
        match self {
            Self::Purpose => "Position Purpose",
            Self::Responsibilities => "Key Responsibilities",
            Self::Manager => "Direct Manager/Direct Reports",
            Self::Travel => "Travel Requirements",
            Self::Physical => "Physical Requirements",
            Self::WorkConditions => "Working Conditions",
            Self::MinQualifications => "Minimum Qualifications",
            Self::PreferredQualifications => "Preferred Qualifications",
            Self::MinEducation => "Minimum Education",
            Self::PreferredEducation => "Preferred Education",
            Self::MinExperience => "Minimum Experience",
            Self::Certifications => "Certifications",
            Self::Competencies => "Competencies",
        }
    }

    /// Position in [`DescriptionField::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for DescriptionField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for DescriptionField {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|f| f.key() == needle)
            .ok_or_else(|| ParseError::UnknownField(s.to_string()))
    }
}

/// The job-description record attached to a profile.
///
/// Every field may be missing or `null` on the wire; missing values read as
/// the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Description {
    #[serde(default)]
    pub purpose: Option<String>,
    #[serde(default)]
    pub responsibilities: Option<String>,
    #[serde(default)]
    pub manager: Option<String>,
    #[serde(default)]
    pub travel: Option<String>,
    #[serde(default)]
    pub physical: Option<String>,
    #[serde(default)]
    pub workconditions: Option<String>,
    #[serde(default)]
    pub minqualifications: Option<String>,
    #[serde(default)]
    pub preferredqualifications: Option<String>,
    #[serde(default)]
    pub mineducation: Option<String>,
    #[serde(default)]
    pub preferrededucation: Option<String>,
    #[serde(default)]
    pub minexperience: Option<String>,
    #[serde(default)]
    pub certifications: Option<String>,
    #[serde(default)]
    pub competencies: Option<String>,
}

impl Description {
    fn slot(&self, field: DescriptionField) -> &Option<String> {
        match field {
            DescriptionField::Purpose => &self.purpose,
            DescriptionField::Responsibilities => &self.responsibilities,
            DescriptionField::Manager => &self.manager,
            DescriptionField::Travel => &self.travel,
            DescriptionField::Physical => &self.physical,
            DescriptionField::WorkConditions => &self.workconditions,
            DescriptionField::MinQualifications => &self.minqualifications,
            DescriptionField::PreferredQualifications => &self.preferredqualifications,
            DescriptionField::MinEducation => &self.mineducation,
            DescriptionField::PreferredEducation => &self.preferrededucation,
            DescriptionField::MinExperience => &self.minexperience,
            DescriptionField::Certifications => &self.certifications,
            DescriptionField::Competencies => &self.competencies,
        }
    }

    fn slot_mut(&mut self, field: DescriptionField) -> &mut Option<String> {
        match field {
            DescriptionField::Purpose => &mut self.purpose,
            DescriptionField::Responsibilities => &mut self.responsibilities,
            DescriptionField::Manager => &mut self.manager,
            DescriptionField::Travel => &mut self.travel,
            DescriptionField::Physical => &mut self.physical,
            DescriptionField::WorkConditions => &mut self.workconditions,
            DescriptionField::MinQualifications => &mut self.minqualifications,
            DescriptionField::PreferredQualifications => &mut self.preferredqualifications,
            DescriptionField::MinEducation => &mut self.mineducation,
            DescriptionField::PreferredEducation => &mut self.preferrededucation,
            DescriptionField::MinExperience => &mut self.minexperience,
            DescriptionField::Certifications => &mut self.certifications,
            DescriptionField::Competencies => &mut self.competencies,
        }
    }

    pub fn get(&self, field: DescriptionField) -> &str {
        self.slot(field).as_deref().unwrap_or("")
    }

    pub fn set(&mut self, field: DescriptionField, value: impl Into<String>) {
        *self.slot_mut(field) = Some(value.into());
    }

    /// Copy one field from `other`, keeping a missing value missing.
    pub fn copy_field_from(&mut self, other: &Description, field: DescriptionField) {
        *self.slot_mut(field) = other.slot(field).clone();
    }
}

/// A job profile under review.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[serde(default)]
    pub vertical: Option<String>,
    #[serde(default)]
    pub division: Option<String>,
    #[serde(default)]
    pub subdivision: Option<String>,
    #[serde(default)]
    pub primary_reviewer: Option<String>,
    #[serde(default)]
    pub hr_reviewer: Option<String>,
    #[serde(default)]
    pub hiring_manager: Option<String>,
    /// Only served on the internal (reviewer) listing.
    #[serde(rename = "approved_internal", default)]
    pub approved_internal: Option<String>,
    #[serde(default)]
    pub description: Description,
}

impl Profile {
    /// Approved means `approved_internal` is exactly `"yes"`.
    pub fn is_approved(&self) -> bool {
        self.approved_internal.as_deref() == Some(APPROVED)
    }

    /// True if `user` is named as any of the three reviewers.
    pub fn is_assigned_to(&self, user: &str) -> bool {
        [&self.primary_reviewer, &self.hr_reviewer, &self.hiring_manager]
            .into_iter()
            .any(|r| r.as_deref() == Some(user))
    }
}
