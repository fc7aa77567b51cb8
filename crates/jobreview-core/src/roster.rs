//! Reviewer roster: the names offered in the three reviewer selectors.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ParseError;

/// Which of the three reviewer slots a name belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReviewerRole {
    Primary,
    Hr,
    Manager,
}

impl ReviewerRole {
    pub const ALL: [ReviewerRole; 3] = [Self::Primary, Self::Hr, Self::Manager];

    /// Value of `type` in the roster-add request.
    pub fn wire_name(self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Hr => "hr",
            Self::Manager => "manager",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Primary => "Primary Reviewer",
            Self::Hr => "HR Reviewer",
            Self::Manager => "Hiring Manager",
        }
    }

    /// Question asked when adding a new name for this role.
    pub fn prompt_title(self) -> &'static str {
        match self {
            Self::Primary => "Enter new Primary Reviewer name:",
            Self::Hr => "Enter new HR Reviewer name:",
            Self::Manager => "Enter new hiring manager name:",
        }
    }
}

impl fmt::Display for ReviewerRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

impl FromStr for ReviewerRole {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "primary" => Ok(Self::Primary),
            "hr" => Ok(Self::Hr),
            "manager" => Ok(Self::Manager),
            _ => Err(ParseError::UnknownRole(s.to_string())),
        }
    }
}

/// The three reviewer name lists as served by `/api/reviewers-list`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Roster {
    #[serde(default)]
    pub primary_reviewers: Vec<String>,
    #[serde(default)]
    pub hr_reviewers: Vec<String>,
    #[serde(default)]
    pub managers: Vec<String>,
}

impl Roster {
    pub fn names(&self, role: ReviewerRole) -> &[String] {
        match role {
            ReviewerRole::Primary => &self.primary_reviewers,
            ReviewerRole::Hr => &self.hr_reviewers,
            ReviewerRole::Manager => &self.managers,
        }
    }

    /// Append a name to a role's list. The roster only ever grows on the client.
    pub fn append(&mut self, role: ReviewerRole, name: impl Into<String>) {
        let list = match role {
            ReviewerRole::Primary => &mut self.primary_reviewers,
            ReviewerRole::Hr => &mut self.hr_reviewers,
            ReviewerRole::Manager => &mut self.managers,
        };
        list.push(name.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roster_parses_backend_shape() {
        let json = r#"{
            "primaryReviewers": ["Ada", "Grace"],
            "hrReviewers": ["Barbara"],
            "managers": []
        }"#;
        let r: Roster = serde_json::from_str(json).unwrap();
        assert_eq!(r.names(ReviewerRole::Primary), ["Ada", "Grace"]);
        assert_eq!(r.names(ReviewerRole::Hr), ["Barbara"]);
        assert!(r.names(ReviewerRole::Manager).is_empty());
    }

    #[test]
    fn missing_lists_default_to_empty() {
        let r: Roster = serde_json::from_str("{}").unwrap();
        assert_eq!(r, Roster::default());
    }

    #[test]
    fn append_targets_one_role() {
        let mut r = Roster::default();
        r.append(ReviewerRole::Manager, "Linus");
        assert_eq!(r.names(ReviewerRole::Manager), ["Linus"]);
        assert!(r.names(ReviewerRole::Primary).is_empty());
        assert!(r.names(ReviewerRole::Hr).is_empty());
    }

    #[test]
    fn role_wire_names() {
        assert_eq!(ReviewerRole::Primary.wire_name(), "primary");
        assert_eq!(ReviewerRole::Hr.wire_name(), "hr");
        assert_eq!(ReviewerRole::Manager.wire_name(), "manager");
        assert_eq!("HR".parse::<ReviewerRole>().unwrap(), ReviewerRole::Hr);
        assert!("recruiter".parse::<ReviewerRole>().is_err());
    }
}
