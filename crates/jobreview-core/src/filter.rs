//! Profile selector: visibility, approval filter, search, and labels.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::ParseError;
use crate::form::Attribute;
use crate::profile::{Profile, ProfileMap};

/// Approval-status filter of the reviewer app.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ApprovalFilter {
    #[default]
    All,
    Approved,
    Unapproved,
}

impl ApprovalFilter {
    pub fn matches(self, profile: &Profile) -> bool {
        match self {
            Self::All => true,
            Self::Approved => profile.is_approved(),
            Self::Unapproved => !profile.is_approved(),
        }
    }
}

impl fmt::Display for ApprovalFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::All => "all",
            Self::Approved => "approved",
            Self::Unapproved => "unapproved",
        })
    }
}

impl FromStr for ApprovalFilter {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "approved" => Ok(Self::Approved),
            "unapproved" => Ok(Self::Unapproved),
            _ => Err(ParseError::UnknownFilter(s.to_string())),
        }
    }
}

/// Profiles a reviewer may see: assigned to `user` in any role and passing
/// the approval filter. Name order.
pub fn visible_profiles<'a>(
    profiles: &'a ProfileMap,
    user: &str,
    filter: ApprovalFilter,
) -> Vec<&'a str> {
    profiles
        .iter()
        .filter(|(_, p)| p.is_assigned_to(user) && filter.matches(p))
        .map(|(name, _)| name.as_str())
        .collect()
}

/// Case-insensitive substring search over profile names. An empty query
/// keeps everything.
pub fn search_profiles<'a>(names: &[&'a str], query: &str) -> Vec<&'a str> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return names.to_vec();
    }
    names
        .iter()
        .copied()
        .filter(|name| name.to_lowercase().contains(&needle))
        .collect()
}

/// Selector label. Any non-empty approval value earns the check mark.
pub fn profile_label(name: &str, profile: &Profile) -> String {
    match profile.approved_internal.as_deref() {
        Some(v) if !v.is_empty() => format!("{name} ✅"),
        _ => name.to_string(),
    }
}

/// Distinct non-empty values of an attribute across all profiles, sorted.
pub fn distinct_attribute_values(profiles: &ProfileMap, attr: Attribute) -> Vec<String> {
    profiles
        .values()
        .filter_map(|p| attr.of(p))
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
