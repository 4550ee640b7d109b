//! Error types for the rowbind facade

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors from importing or exporting records
///
/// Mapping and container errors pass through unchanged, so a failed cell
/// conversion is still an [`rowbind_core::Error::Conversion`].
#[derive(Debug, Error)]
pub enum Error {
    /// Mapping error (empty source, conversion failure, ...)
    #[error(transparent)]
    Mapping(#[from] rowbind_core::Error),

    /// XLSX container error
    #[error(transparent)]
    Xlsx(#[from] rowbind_xlsx::XlsxError),

    /// CSV error
    #[error(transparent)]
    Csv(#[from] rowbind_csv::CsvError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The file extension names no supported format
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),
}

impl Error {
    /// The mapping error inside this error, if there is one
    pub fn as_mapping(&self) -> Option<&rowbind_core::Error> {
        match self {
            Error::Mapping(e) => Some(e),
            _ => None,
        }
    }
}
