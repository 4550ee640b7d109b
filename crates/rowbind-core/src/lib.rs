//! # rowbind-core
//!
//! Core mapping engine for the rowbind library.
//!
//! This crate turns rows of cell text into typed records and back, with no
//! knowledge of any file format:
//! - [`column_index`] and [`column_name`] - Column letter addressing
//! - [`Row`] - One row of present or absent cells
//! - [`CellText`] - Conversion between cell text and field values
//! - [`Record`] and [`Field`] - Per-type field descriptor tables
//! - [`import`] and [`export`] - Header-driven mapping
//!
//! ## Example
//!
//! ```rust
//! use rowbind_core::{export, import, record};
//!
//! #[derive(Debug, Default, PartialEq)]
//! struct Person {
//!     id: i32,
//!     name: String,
//! }
//!
//! record!(Person {
//!     "Id" => id: i32,
//!     "Name" => name: String,
//! });
//!
//! let people = vec![
//!     Person { id: 1, name: "Alice".into() },
//!     Person { id: 2, name: "Bob".into() },
//! ];
//!
//! let rows = export(&people, None).unwrap();
//! assert_eq!(rows[0].cell(0), Some("Id"));
//! assert_eq!(rows[2].cell(1), Some("Bob"));
//!
//! let back: Vec<Person> = import(rows).unwrap();
//! assert_eq!(back, people);
//! ```

pub mod address;
pub mod convert;
pub mod error;
pub mod mapper;
pub mod record;
pub mod row;

// Re-exports for convenience
pub use address::{cell_reference, column_index, column_name, split_reference};
pub use convert::{to_text, to_value, CellText};
pub use error::{Error, Result};
pub use mapper::{export, import};
pub use record::{Field, Getter, Record, Setter};
pub use row::Row;

/// Maximum number of columns in a worksheet (Excel limit)
pub const MAX_COLS: u32 = 16_384;

/// Maximum number of rows in a worksheet (Excel limit)
pub const MAX_ROWS: u32 = 1_048_576;
