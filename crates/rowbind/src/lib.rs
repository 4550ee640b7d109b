//! # rowbind
//!
//! Map typed records to and from spreadsheet rows.
//!
//! ## Features
//!
//! - Header-driven import: columns bind to fields by header label, in any
//!   order, and unknown columns are ignored
//! - Export with a generated or overridden header row
//! - XLSX (first worksheet) and CSV sources and sinks
//! - Conversions for strings, numbers, booleans, decimals and dates
//!
//! ## Example
//!
//! ```rust
//! use rowbind::prelude::*;
//!
//! #[derive(Debug, Default, PartialEq)]
//! struct Person {
//!     id: i32,
//!     name: String,
//!     age: Option<u8>,
//! }
//!
//! record!(Person {
//!     "Id" => id: i32,
//!     "Name" => name: String,
//!     "Age" => age: Option<u8>,
//! });
//!
//! let serializer = SheetSerializer::new();
//! let people: Vec<Person> = serializer
//!     .import_csv("Name,Id,Age\nAlice,1,30\nBob,2,\n".as_bytes())
//!     .unwrap();
//!
//! assert_eq!(people[1], Person { id: 2, name: "Bob".into(), age: None });
//!
//! // Save to file
//! // serializer.export_file(&people, "people.xlsx", None).unwrap();
//! ```

pub mod error;
pub mod prelude;
pub mod serializer;

pub use error::{Error, Result};
pub use serializer::{Format, SheetSerializer};

// Re-export core types
pub use rowbind_core::{
    cell_reference, cell_text_via_str, column_index, column_name, export, import, record,
    split_reference, to_text, to_value, CellText, Field, Getter, Record, Row, Setter, MAX_COLS,
    MAX_ROWS,
};

// Re-export I/O types
pub use rowbind_csv::{
    CsvError, CsvReadOptions, CsvReader, CsvWriteOptions, CsvWriter, LineTerminator,
};
pub use rowbind_xlsx::{XlsxError, XlsxReader, XlsxWriteOptions, XlsxWriter};

/// Errors raised by the mapper itself
pub use rowbind_core::Error as MappingError;
