//! Approval report as an `.xlsx` workbook.
//!
//! One sheet named `Approvals`, a bold header row with the report columns,
//! then one row per approval entry. Column widths are sized to the longest
//! cell plus two characters of padding.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use jobreview_core::{REPORT_COLUMNS, ReportLine};
use rust_xlsxwriter::{Format, Workbook};
use tracing::info;

use crate::ExportError;

const SHEET_NAME: &str = "Approvals";
const FILE_PREFIX: &str = "job-profile-approvals";
const COLUMN_PADDING: usize = 2;

/// `job-profile-approvals_YYYY-MM-DD.xlsx`
pub fn report_file_name(date: NaiveDate) -> String {
    format!("{FILE_PREFIX}_{}.xlsx", date.format("%Y-%m-%d"))
}

/// Width of each column in characters: the longer of the header and the
/// widest cell, plus padding.
pub fn column_widths(lines: &[ReportLine]) -> [usize; 6] {
    let mut widths = REPORT_COLUMNS.map(|h| h.chars().count());
    for line in lines {
        for (w, cell) in widths.iter_mut().zip(&line.cells) {
            *w = (*w).max(cell.chars().count());
        }
    }
    widths.map(|w| w + COLUMN_PADDING)
}

/// Write `lines` to `<dir>/job-profile-approvals_<date>.xlsx` and return the
/// path written.
///
/// An empty report is refused with [`ExportError::NoRows`] and no file is
/// created.
pub fn export_approvals(
    lines: &[ReportLine],
    dir: &Path,
    date: NaiveDate,
) -> Result<PathBuf, ExportError> {
    if lines.is_empty() {
        return Err(ExportError::NoRows);
    }
    if !dir.is_dir() {
        return Err(ExportError::DirectoryNotFound(dir.to_path_buf()));
    }

    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    let bold = Format::new().set_bold();
    for (col, header) in REPORT_COLUMNS.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *header, &bold)?;
    }
    for (i, line) in lines.iter().enumerate() {
        let row = (i + 1) as u32;
        for (col, cell) in line.cells.iter().enumerate() {
            sheet.write_string(row, col as u16, cell)?;
        }
    }
    for (col, width) in column_widths(lines).into_iter().enumerate() {
        sheet.set_column_width(col as u16, width as f64)?;
    }

    let path = dir.join(report_file_name(date));
    workbook.save(&path)?;
    info!(path = %path.display(), rows = lines.len(), "approval report exported");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use jobreview_core::ApprovalRow;

    fn line(profile: &str, primary: &str) -> ReportLine {
        ReportLine::export_row(&ApprovalRow {
            job_profile_name: Some(profile.into()),
            primary_reviewer: Some(primary.into()),
            ..Default::default()
        })
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 7, 1).unwrap()
    }

    #[test]
    fn file_name_carries_date() {
        assert_eq!(report_file_name(date()), "job-profile-approvals_2025-07-01.xlsx");
    }

    #[test]
    fn widths_cover_headers_and_cells() {
        let lines = [line("Senior Platform Engineer II", "Ada")];
        let w = column_widths(&lines);
        assert_eq!(w[0], "Senior Platform Engineer II".len() + 2);
        assert_eq!(w[1], "Primary Reviewer".len() + 2);
        assert_eq!(w[4], "Approved?".len() + 2);
    }

    #[test]
    fn widths_with_no_rows_are_header_widths() {
        let w = column_widths(&[]);
        assert_eq!(w[5], "Approved DateTime".len() + 2);
    }

    #[test]
    fn empty_report_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let err = export_approvals(&[], dir.path(), date()).unwrap_err();
        assert!(matches!(err, ExportError::NoRows));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn missing_directory_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        let err = export_approvals(&[line("A", "B")], &missing, date()).unwrap_err();
        assert!(matches!(err, ExportError::DirectoryNotFound(_)));
    }

    #[test]
    fn writes_workbook() {
        let dir = tempfile::tempdir().unwrap();
        let lines = [line("Engineer-II", "Ada"), line("Analyst", "Grace")];
        let path = export_approvals(&lines, dir.path(), date()).unwrap();
        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            "job-profile-approvals_2025-07-01.xlsx"
        );
        let bytes = std::fs::read(&path).unwrap();
        // xlsx is a zip container.
        assert_eq!(&bytes[..2], b"PK");
    }
}
