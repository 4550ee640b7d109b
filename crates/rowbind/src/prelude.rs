//! Prelude module - common imports for rowbind users
//!
//! ```rust
//! use rowbind::prelude::*;
//! ```

pub use crate::{
    // Field tables
    record,
    CellText,
    Field,
    Record,
    // Errors
    Error,
    MappingError,
    Result,
    // Rows
    Row,
    // Import and export
    SheetSerializer,
};
