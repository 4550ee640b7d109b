//! Record import and export over XLSX and CSV

use std::fs::{self, File};
use std::io::{Cursor, Read, Seek, Write};
use std::path::Path;

use log::debug;

use crate::error::{Error, Result};
use rowbind_core::{export, import, Record, Row};
use rowbind_csv::{CsvReadOptions, CsvReader, CsvWriteOptions, CsvWriter};
use rowbind_xlsx::{XlsxReader, XlsxWriteOptions, XlsxWriter};

/// Supported file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Office Open XML workbook (`.xlsx`, `.xlsm`)
    Xlsx,
    /// Comma-separated values (`.csv`)
    Csv,
}

impl Format {
    /// Choose a format from a path's extension (case-insensitive)
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Format> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase());

        match extension.as_deref() {
            Some("xlsx") | Some("xlsm") => Ok(Format::Xlsx),
            Some("csv") => Ok(Format::Csv),
            _ => Err(Error::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Imports and exports records through the mapper
///
/// The first row of a source is the header row; its labels pick the fields
/// that each column fills. Export writes a header row followed by one row
/// per record.
///
/// ```rust
/// use rowbind::prelude::*;
/// use std::io::Cursor;
///
/// #[derive(Debug, Default, PartialEq)]
/// struct Person { id: i32, name: String }
///
/// record!(Person { "Id" => id: i32, "Name" => name: String });
///
/// let serializer = SheetSerializer::new();
/// let people = vec![Person { id: 1, name: "Alice".into() }];
///
/// let mut buf = Vec::new();
/// serializer.export_xlsx(&people, Cursor::new(&mut buf), None).unwrap();
///
/// let back: Vec<Person> = serializer.import_xlsx_bytes(&buf).unwrap();
/// assert_eq!(back, people);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SheetSerializer {
    csv_read: CsvReadOptions,
    csv_write: CsvWriteOptions,
    xlsx_write: XlsxWriteOptions,
}

impl SheetSerializer {
    /// Create a serializer with default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the options used when reading CSV
    pub fn with_csv_read_options(mut self, options: CsvReadOptions) -> Self {
        self.csv_read = options;
        self
    }

    /// Set the options used when writing CSV
    pub fn with_csv_write_options(mut self, options: CsvWriteOptions) -> Self {
        self.csv_write = options;
        self
    }

    /// Set the options used when writing XLSX
    pub fn with_xlsx_write_options(mut self, options: XlsxWriteOptions) -> Self {
        self.xlsx_write = options;
        self
    }

    /// Set the worksheet name used when writing XLSX
    pub fn with_sheet_name<S: Into<String>>(mut self, name: S) -> Self {
        self.xlsx_write.sheet_name = name.into();
        self
    }

    // === Import ===

    /// Import records from a file, choosing the format from its extension
    pub fn import_file<T, P>(&self, path: P) -> Result<Vec<T>>
    where
        T: Record + Default,
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let rows = match Format::from_path(path)? {
            Format::Xlsx => XlsxReader::read_file(path)?,
            Format::Csv => CsvReader::read_file(path, &self.csv_read)?,
        };
        debug!("Importing {} rows from {}", rows.len(), path.display());
        Ok(import(rows)?)
    }

    /// Import records from the first worksheet of an XLSX stream
    pub fn import_xlsx<T, R>(&self, reader: R) -> Result<Vec<T>>
    where
        T: Record + Default,
        R: Read + Seek,
    {
        Ok(import(XlsxReader::read_rows(reader)?)?)
    }

    /// Import records from XLSX bytes
    pub fn import_xlsx_bytes<T: Record + Default>(&self, bytes: &[u8]) -> Result<Vec<T>> {
        self.import_xlsx(Cursor::new(bytes))
    }

    /// Import records from a CSV stream
    pub fn import_csv<T, R>(&self, reader: R) -> Result<Vec<T>>
    where
        T: Record + Default,
        R: Read,
    {
        Ok(import(CsvReader::read_rows(reader, &self.csv_read)?)?)
    }

    // === Export ===

    /// Export records to a file, choosing the format from its extension
    ///
    /// Every row is built, and an XLSX package fully assembled, before the
    /// file is created, so a failed export leaves an existing file untouched.
    pub fn export_file<T, P>(&self, records: &[T], path: P, headers: Option<&[String]>) -> Result<()>
    where
        T: Record,
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let format = Format::from_path(path)?;
        let rows = export(records, headers)?;

        match format {
            Format::Xlsx => {
                let mut buf = Vec::new();
                XlsxWriter::write_rows(&rows, Cursor::new(&mut buf), &self.xlsx_write)?;
                fs::write(path, buf)?;
            }
            Format::Csv => {
                let file = File::create(path)?;
                CsvWriter::write_rows(&rows, file, &self.csv_write)?;
            }
        }

        debug!("Exported {} records to {}", records.len(), path.display());
        Ok(())
    }

    /// Export records as an XLSX workbook with a single worksheet
    pub fn export_xlsx<T, W>(&self, records: &[T], writer: W, headers: Option<&[String]>) -> Result<()>
    where
        T: Record,
        W: Write + Seek,
    {
        let rows = export(records, headers)?;
        XlsxWriter::write_rows(&rows, writer, &self.xlsx_write)?;
        Ok(())
    }

    /// Export records as CSV
    pub fn export_csv<T, W>(&self, records: &[T], writer: W, headers: Option<&[String]>) -> Result<()>
    where
        T: Record,
        W: Write,
    {
        let rows = export(records, headers)?;
        CsvWriter::write_rows(&rows, writer, &self.csv_write)?;
        Ok(())
    }

    /// Export records to rows without writing them anywhere
    pub fn export_rows<T: Record>(&self, records: &[T], headers: Option<&[String]>) -> Result<Vec<Row>> {
        Ok(export(records, headers)?)
    }
}
