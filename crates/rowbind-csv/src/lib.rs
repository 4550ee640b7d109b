//! # rowbind-csv
//!
//! CSV row source and sink for rowbind.
//!
//! Every CSV field is a present cell. The header row is passed through like
//! any other row; binding it to fields is left to the mapper.

mod error;
mod options;
mod reader;
mod writer;

pub use error::{CsvError, CsvResult};
pub use options::{CsvReadOptions, CsvWriteOptions, LineTerminator};
pub use reader::CsvReader;
pub use writer::CsvWriter;
