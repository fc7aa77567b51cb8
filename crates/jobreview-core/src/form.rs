//! Form State: the flat, editable projection of a selected profile.
//!
//! The same shape serves as the read-only "last known good" snapshot and as
//! the Edit Buffer, and serialises directly as the `updatedData` object of
//! the update endpoints.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ParseError;
use crate::profile::{Description, DescriptionField, Profile};
use crate::roster::ReviewerRole;

/// Categorical attributes editable in the admin app.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attribute {
    Vertical,
    Division,
    Subdivision,
}

impl Attribute {
    pub const ALL: [Attribute; 3] = [Self::Vertical, Self::Division, Self::Subdivision];

    pub fn label(self) -> &'static str {
        match self {
            Self::Vertical => "Vertical",
            Self::Division => "Division",
            Self::Subdivision => "Sub Division",
        }
    }

    /// The attribute's value on a profile, if set.
    pub fn of(self, profile: &Profile) -> Option<&str> {
        match self {
            Self::Vertical => profile.vertical.as_deref(),
            Self::Division => profile.division.as_deref(),
            Self::Subdivision => profile.subdivision.as_deref(),
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Vertical => "vertical",
            Self::Division => "division",
            Self::Subdivision => "subdivision",
        })
    }
}

impl FromStr for Attribute {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "vertical" => Ok(Self::Vertical),
            "division" => Ok(Self::Division),
            "subdivision" => Ok(Self::Subdivision),
            _ => Err(ParseError::UnknownAttribute(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormState {
    #[serde(default)]
    pub primary_reviewer: Option<String>,
    #[serde(default)]
    pub hr_reviewer: Option<String>,
    #[serde(default)]
    pub hiring_manager: Option<String>,
    #[serde(default)]
    pub vertical: Option<String>,
    #[serde(default)]
    pub division: Option<String>,
    #[serde(default)]
    pub subdivision: Option<String>,
    #[serde(flatten)]
    pub description: Description,
    #[serde(
        rename = "approved_internal",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub approved_internal: Option<String>,
}

impl FormState {
    pub fn from_profile(profile: &Profile) -> Self {
        Self {
            primary_reviewer: profile.primary_reviewer.clone(),
            hr_reviewer: profile.hr_reviewer.clone(),
            hiring_manager: profile.hiring_manager.clone(),
            vertical: profile.vertical.clone(),
            division: profile.division.clone(),
            subdivision: profile.subdivision.clone(),
            description: profile.description.clone(),
            approved_internal: profile.approved_internal.clone(),
        }
    }

    pub fn get(&self, field: DescriptionField) -> &str {
        self.description.get(field)
    }

    pub fn set(&mut self, field: DescriptionField, value: impl Into<String>) {
        self.description.set(field, value);
    }

    pub fn attribute(&self, attr: Attribute) -> &str {
        match attr {
            Attribute::Vertical => self.vertical.as_deref(),
            Attribute::Division => self.division.as_deref(),
            Attribute::Subdivision => self.subdivision.as_deref(),
        }
        .unwrap_or("")
    }

    pub fn set_attribute(&mut self, attr: Attribute, value: impl Into<String>) {
        let slot = match attr {
            Attribute::Vertical => &mut self.vertical,
            Attribute::Division => &mut self.division,
            Attribute::Subdivision => &mut self.subdivision,
        };
        *slot = Some(value.into());
    }

    pub fn reviewer(&self, role: ReviewerRole) -> &str {
        match role {
            ReviewerRole::Primary => self.primary_reviewer.as_deref(),
            ReviewerRole::Hr => self.hr_reviewer.as_deref(),
            ReviewerRole::Manager => self.hiring_manager.as_deref(),
        }
        .unwrap_or("")
    }

    pub fn set_reviewer(&mut self, role: ReviewerRole, name: impl Into<String>) {
        let slot = match role {
            ReviewerRole::Primary => &mut self.primary_reviewer,
            ReviewerRole::Hr => &mut self.hr_reviewer,
            ReviewerRole::Manager => &mut self.hiring_manager,
        };
        *slot = Some(name.into());
    }
}

/// Body of the save, approve, and admin update endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateRequest {
    pub profile: String,
    #[serde(rename = "updatedData")]
    pub updated_data: FormState,
}
