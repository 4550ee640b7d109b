//! Import and export between rows and records
//!
//! Import reads the first row as the header, binds each header cell to the
//! record field of the same name, and builds one record per remaining row.
//! Export does the reverse: one header row from the field names (or a caller
//! override) followed by one row per record.
//!
//! Binding is tolerant. Blank header cells, names with no matching field,
//! read-only fields and absent data cells are skipped without error. A cell
//! that cannot be converted fails the whole call.

use ahash::{AHashMap, AHashSet};
use log::{debug, trace};

use crate::address::column_name;
use crate::error::{Error, Result};
use crate::record::{Field, Record};
use crate::row::Row;

/// A header column resolved to a writable field
struct Binding<T: 'static> {
    column: usize,
    field: &'static Field<T>,
}

/// Reject field tables with blank or repeated column names
fn check_fields<T: Record>() -> Result<()> {
    let mut seen = AHashSet::new();
    for field in T::fields() {
        if field.name().trim().is_empty() {
            return Err(Error::InvalidField("blank field name".into()));
        }
        if !seen.insert(field.name()) {
            return Err(Error::InvalidField(format!(
                "field name '{}' appears more than once",
                field.name()
            )));
        }
    }
    Ok(())
}

/// Resolve header cells to writable fields, in column order
fn bind_header<T: Record>(header: &Row) -> Vec<Binding<T>> {
    let lookup: AHashMap<&str, &'static Field<T>> =
        T::fields().iter().map(|f| (f.name(), f)).collect();

    let mut bindings = Vec::new();
    for (column, cell) in header.cells().enumerate() {
        let name = match cell {
            Some(name) if !name.trim().is_empty() => name,
            _ => {
                debug!("Skipping blank header in column {}", column_name(column as u32 + 1));
                continue;
            }
        };

        match lookup.get(name) {
            Some(&field) if field.is_writable() => bindings.push(Binding { column, field }),
            Some(_) => debug!("Skipping read-only field '{}'", name),
            None => debug!("Skipping unknown column '{}'", name),
        }
    }
    bindings
}

/// Build records from a header row followed by data rows
///
/// Record *i* of the result comes from data row *i*. Every data row yields a
/// record, even if none of its cells bound to a field.
///
/// # Errors
///
/// - [`Error::InvalidField`] if the field table repeats or blanks a name
/// - [`Error::EmptySource`] if `rows` yields nothing
/// - [`Error::Conversion`] for the first cell that does not parse as its
///   field's type; no records are returned in that case
///
/// # Examples
/// ```
/// use rowbind_core::{import, record, Row};
///
/// #[derive(Debug, Default, PartialEq)]
/// struct Person { id: i32, name: String }
///
/// record!(Person { "Id" => id: i32, "Name" => name: String });
///
/// let rows = vec![
///     Row::from_text(["Id", "Name", "Notes"]),
///     Row::from_text(["1", "Alice", "ignored"]),
/// ];
/// let people: Vec<Person> = import(rows).unwrap();
/// assert_eq!(people, vec![Person { id: 1, name: "Alice".into() }]);
/// ```
pub fn import<T, I>(rows: I) -> Result<Vec<T>>
where
    T: Record + Default,
    I: IntoIterator<Item = Row>,
{
    check_fields::<T>()?;

    let mut rows = rows.into_iter();
    let header = rows.next().ok_or(Error::EmptySource)?;
    let bindings = bind_header::<T>(&header);

    let mut records = Vec::new();
    for (index, row) in rows.enumerate() {
        let width = header.len().min(row.len());
        let mut record = T::default();

        for binding in bindings.iter().take_while(|b| b.column < width) {
            if let Some(text) = row.cell(binding.column) {
                binding.field.write(&mut record, text)?;
            }
        }

        trace!("Imported data row {}", index + 1);
        records.push(record);
    }

    debug!(
        "Imported {} records using {} bound columns",
        records.len(),
        bindings.len()
    );
    Ok(records)
}

/// Build a header row and one data row per record
///
/// The header is `headers` if given, otherwise the names of the readable
/// fields. Cells follow field declaration order.
///
/// # Errors
///
/// - [`Error::EmptyInput`] if `records` is empty
/// - [`Error::InvalidField`] if the field table repeats or blanks a name
/// - [`Error::HeaderMismatch`] if `headers` does not name exactly one column
///   per readable field
pub fn export<T: Record>(records: &[T], headers: Option<&[String]>) -> Result<Vec<Row>> {
    if records.is_empty() {
        return Err(Error::EmptyInput);
    }
    check_fields::<T>()?;

    let fields: Vec<&Field<T>> = T::fields().iter().filter(|f| f.is_readable()).collect();

    let header = match headers {
        Some(headers) if headers.len() != fields.len() => {
            return Err(Error::HeaderMismatch {
                headers: headers.len(),
                fields: fields.len(),
            });
        }
        Some(headers) => Row::from_text(headers.iter().cloned()),
        None => Row::from_text(fields.iter().map(|f| f.name())),
    };

    let mut rows = Vec::with_capacity(records.len() + 1);
    rows.push(header);

    for record in records {
        let mut row = Row::with_capacity(fields.len());
        for field in &fields {
            row.push(field.read(record).unwrap_or_default());
        }
        rows.push(row);
    }

    debug!("Exported {} records across {} columns", records.len(), fields.len());
    Ok(rows)
}
