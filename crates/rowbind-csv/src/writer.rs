//! CSV writer

use std::fs::File;
use std::io::Write;
use std::path::Path;

use log::debug;

use crate::error::CsvResult;
use crate::options::{CsvWriteOptions, LineTerminator};
use rowbind_core::Row;

/// CSV file writer
pub struct CsvWriter;

impl CsvWriter {
    /// Write rows to a CSV file
    pub fn write_file<P: AsRef<Path>>(
        rows: &[Row],
        path: P,
        options: &CsvWriteOptions,
    ) -> CsvResult<()> {
        let file = File::create(path)?;
        Self::write_rows(rows, file, options)
    }

    /// Write rows to a writer
    ///
    /// CSV has no notion of an absent cell, so absent cells are written as
    /// empty fields.
    pub fn write_rows<W: Write>(rows: &[Row], writer: W, options: &CsvWriteOptions) -> CsvResult<()> {
        let terminator = match options.line_terminator {
            LineTerminator::LF => csv::Terminator::Any(b'\n'),
            LineTerminator::CRLF => csv::Terminator::CRLF,
        };

        let mut csv_writer = csv::WriterBuilder::new()
            .delimiter(options.delimiter)
            .quote(options.quote)
            .terminator(terminator)
            .flexible(true)
            .from_writer(writer);

        for row in rows {
            csv_writer.write_record(row.cells().map(Option::unwrap_or_default))?;
        }

        csv_writer.flush()?;
        debug!("Wrote {} CSV rows", rows.len());
        Ok(())
    }
}
