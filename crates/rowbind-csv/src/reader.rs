//! CSV reader

use std::fs::File;
use std::io::Read;
use std::path::Path;

use log::debug;

use crate::error::CsvResult;
use crate::options::CsvReadOptions;
use rowbind_core::Row;

/// CSV file reader
pub struct CsvReader;

impl CsvReader {
    /// Read all rows of a CSV file
    pub fn read_file<P: AsRef<Path>>(path: P, options: &CsvReadOptions) -> CsvResult<Vec<Row>> {
        let file = File::open(path)?;
        Self::read_rows(file, options)
    }

    /// Read all rows from a reader
    ///
    /// Records may have different lengths; each becomes a row of exactly
    /// that many present cells.
    pub fn read_rows<R: Read>(reader: R, options: &CsvReadOptions) -> CsvResult<Vec<Row>> {
        let trim = if options.trim {
            csv::Trim::All
        } else {
            csv::Trim::None
        };

        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(options.delimiter)
            .quote(options.quote)
            .has_headers(false)
            .flexible(true)
            .trim(trim)
            .from_reader(reader);

        let mut rows = Vec::new();
        for result in csv_reader.records() {
            let record = result?;
            rows.push(record.iter().collect::<Row>());
        }

        debug!("Read {} CSV rows", rows.len());
        Ok(rows)
    }
}
