//! # rowbind-xlsx
//!
//! XLSX (Office Open XML) row source and sink for rowbind.
//!
//! [`XlsxReader`] yields the rows of the first worksheet as cell text, and
//! [`XlsxWriter`] writes rows as a single worksheet of plain text cells.

pub mod error;
pub mod reader;
pub mod writer;

mod escape;

pub use error::{XlsxError, XlsxResult};
pub use reader::XlsxReader;
pub use writer::{XlsxWriteOptions, XlsxWriter};
