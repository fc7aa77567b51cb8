//! Approval status report rows.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Column headers, in order, for both the on-screen table and the export.
pub const REPORT_COLUMNS: [&str; 6] = [
    "Job Profile",
    "Primary Reviewer",
    "HR Reviewer",
    "Hiring Manager",
    "Approved?",
    "Approved DateTime",
];

const PLACEHOLDER: &str = "-";
const GMT_SUFFIX: &str = " GMT";

/// One row of `/api/job-profile-approvals`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApprovalRow {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub job_profile_name: Option<String>,
    #[serde(default)]
    pub job_profile: Option<String>,
    #[serde(default)]
    pub primary_reviewer: Option<String>,
    #[serde(default)]
    pub hr_reviewer: Option<String>,
    #[serde(default)]
    pub hiring_manager: Option<String>,
    /// String, boolean, or null depending on how the backend stored it.
    #[serde(default)]
    pub approval_internal: Option<Value>,
    #[serde(default)]
    pub approval_internal_time: Option<String>,
}

/// A report row shaped for output: one string per [`REPORT_COLUMNS`] entry.
///
/// The table and the spreadsheet differ only in the "Approved?" cell. The
/// table shows `-` for any falsy value, while the export keeps `false`, `0`
/// and empty strings and only replaces a missing value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportLine {
    pub cells: [String; 6],
}

impl ReportLine {
    /// The row as the on-screen table shows it.
    pub fn table_row(row: &ApprovalRow) -> Self {
        let approved = match &row.approval_internal {
            Some(v) if !is_falsy(v) => spell(v),
            _ => PLACEHOLDER.to_string(),
        };
        Self::with_approved(row, approved)
    }

    /// The row as the spreadsheet export writes it.
    pub fn export_row(row: &ApprovalRow) -> Self {
        let approved = match &row.approval_internal {
            None | Some(Value::Null) => PLACEHOLDER.to_string(),
            Some(v) => spell(v),
        };
        Self::with_approved(row, approved)
    }

    fn with_approved(row: &ApprovalRow, approved: String) -> Self {
        let profile = non_empty(&row.job_profile_name)
            .or_else(|| non_empty(&row.job_profile))
            .unwrap_or("")
            .to_string();
        let time = non_empty(&row.approval_internal_time)
            .map(|t| t.replacen(GMT_SUFFIX, "", 1))
            .unwrap_or_else(|| PLACEHOLDER.to_string());
        Self {
            cells: [
                profile,
                or_placeholder(&row.primary_reviewer),
                or_placeholder(&row.hr_reviewer),
                or_placeholder(&row.hiring_manager),
                approved,
                time,
            ],
        }
    }
}

fn is_falsy(v: &Value) -> bool {
    match v {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::String(s) => s.is_empty(),
        Value::Number(n) => n.as_f64().is_some_and(|f| f == 0.0 || f.is_nan()),
        Value::Array(_) | Value::Object(_) => false,
    }
}

fn spell(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn non_empty(v: &Option<String>) -> Option<&str> {
    v.as_deref().filter(|s| !s.is_empty())
}

fn or_placeholder(v: &Option<String>) -> String {
    non_empty(v).unwrap_or(PLACEHOLDER).to_string()
}
