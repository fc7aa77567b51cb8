use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("no rows to export")]
    NoRows,

    #[error("export directory not found: {0}")]
    DirectoryNotFound(std::path::PathBuf),

    #[error("xlsx error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
}
