//! Export layer: approval report spreadsheets.

mod error;
pub use error::ExportError;

mod xlsx;
pub use xlsx::{column_widths, export_approvals, report_file_name};
