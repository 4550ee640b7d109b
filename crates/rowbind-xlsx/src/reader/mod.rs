//! XLSX reader

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use log::{debug, warn};
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::error::{XlsxError, XlsxResult};
use crate::escape;
use rowbind_core::{split_reference, Row, MAX_COLS};

/// XLSX file reader
///
/// Only the first worksheet is read. Every cell is returned as text: shared
/// and inline strings are resolved, numbers keep their stored text, and
/// booleans read as `TRUE`/`FALSE`.
pub struct XlsxReader;

impl XlsxReader {
    /// Read the rows of the first worksheet from a file path
    pub fn read_file<P: AsRef<Path>>(path: P) -> XlsxResult<Vec<Row>> {
        let file = File::open(path)?;
        Self::read_rows(file)
    }

    /// Read the rows of the first worksheet from a reader
    pub fn read_rows<R: Read + Seek>(reader: R) -> XlsxResult<Vec<Row>> {
        let mut archive = zip::ZipArchive::new(reader)?;

        // Verify this is an XLSX file
        if archive.by_name("[Content_Types].xml").is_err() {
            return Err(XlsxError::InvalidFormat(
                "Missing [Content_Types].xml".into(),
            ));
        }

        let shared_strings = Self::read_shared_strings(&mut archive)?;
        let sheet_path = Self::first_sheet_path(&mut archive)?;
        let rows = Self::read_worksheet(&mut archive, &sheet_path, &shared_strings)?;

        debug!("Read {} rows from {}", rows.len(), sheet_path);
        Ok(rows)
    }

    /// Read the shared strings table
    fn read_shared_strings<R: Read + Seek>(
        archive: &mut zip::ZipArchive<R>,
    ) -> XlsxResult<Vec<String>> {
        let mut strings = Vec::new();

        let file = match archive.by_name("xl/sharedStrings.xml") {
            Ok(f) => f,
            Err(_) => return Ok(strings), // No shared strings is valid
        };

        // Whitespace inside <t> is significant, so text is not trimmed
        let mut xml_reader = Reader::from_reader(BufReader::new(file));
        let mut buf = Vec::new();
        let mut current = String::new();
        let mut in_si = false;
        let mut in_t = false;
        let mut in_phonetic = false;

        loop {
            match xml_reader.read_event_into(&mut buf)? {
                Event::Start(e) => match e.local_name().as_ref() {
                    b"si" => {
                        in_si = true;
                        current.clear();
                    }
                    b"rPh" => in_phonetic = true,
                    b"t" if in_si && !in_phonetic => in_t = true,
                    _ => {}
                },
                Event::Empty(e) if e.local_name().as_ref() == b"si" => {
                    strings.push(String::new());
                }
                Event::End(e) => match e.local_name().as_ref() {
                    b"si" => {
                        strings.push(escape::decode(&current));
                        in_si = false;
                    }
                    b"rPh" => in_phonetic = false,
                    b"t" => in_t = false,
                    _ => {}
                },
                Event::Text(e) if in_t => current.push_str(&e.unescape()?),
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        Ok(strings)
    }

    /// Resolve the archive path of the first sheet listed in the workbook
    fn first_sheet_path<R: Read + Seek>(archive: &mut zip::ZipArchive<R>) -> XlsxResult<String> {
        let sheet_ids = Self::read_workbook_xml(archive)?;
        let r_id = sheet_ids.first().ok_or(XlsxError::MissingSheet)?;

        let sheet_paths = Self::read_workbook_rels(archive)?;
        sheet_paths
            .get(r_id)
            .cloned()
            .ok_or_else(|| XlsxError::MissingPart(format!("worksheet relationship {}", r_id)))
    }

    /// Read workbook.xml to get the relationship ids of its sheets, in order
    fn read_workbook_xml<R: Read + Seek>(
        archive: &mut zip::ZipArchive<R>,
    ) -> XlsxResult<Vec<String>> {
        let file = archive
            .by_name("xl/workbook.xml")
            .map_err(|_| XlsxError::MissingPart("xl/workbook.xml".into()))?;

        let mut xml_reader = Reader::from_reader(BufReader::new(file));
        xml_reader.trim_text(true);

        let mut buf = Vec::new();
        let mut sheets = Vec::new();

        loop {
            match xml_reader.read_event_into(&mut buf)? {
                Event::Empty(e) | Event::Start(e) if e.local_name().as_ref() == b"sheet" => {
                    if let Some(r_id) = attribute(&e, b"id")? {
                        sheets.push(r_id);
                    }
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        Ok(sheets)
    }

    /// Read workbook.xml.rels to get worksheet file paths by relationship id
    fn read_workbook_rels<R: Read + Seek>(
        archive: &mut zip::ZipArchive<R>,
    ) -> XlsxResult<HashMap<String, String>> {
        let file = archive
            .by_name("xl/_rels/workbook.xml.rels")
            .map_err(|_| XlsxError::MissingPart("xl/_rels/workbook.xml.rels".into()))?;

        let mut xml_reader = Reader::from_reader(BufReader::new(file));
        xml_reader.trim_text(true);

        let mut buf = Vec::new();
        let mut rels = HashMap::new();

        loop {
            match xml_reader.read_event_into(&mut buf)? {
                Event::Empty(e) | Event::Start(e)
                    if e.local_name().as_ref() == b"Relationship" =>
                {
                    let id = attribute(&e, b"Id")?;
                    let target = attribute(&e, b"Target")?;
                    let rel_type = attribute(&e, b"Type")?;

                    // Only include worksheet relationships
                    if let (Some(id), Some(target), Some(rel_type)) = (id, target, rel_type) {
                        if rel_type.ends_with("/worksheet") {
                            // Target is relative to xl/ folder
                            let full_path = match target.strip_prefix('/') {
                                Some(absolute) => absolute.to_string(),
                                None => format!("xl/{}", target),
                            };
                            rels.insert(id, full_path);
                        }
                    }
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        Ok(rels)
    }

    /// Read every row of a worksheet as cell text
    fn read_worksheet<R: Read + Seek>(
        archive: &mut zip::ZipArchive<R>,
        path: &str,
        shared_strings: &[String],
    ) -> XlsxResult<Vec<Row>> {
        let file = archive
            .by_name(path)
            .map_err(|_| XlsxError::MissingPart(path.to_string()))?;

        let mut xml_reader = Reader::from_reader(BufReader::new(file));
        let mut buf = Vec::new();
        let mut rows = Vec::new();

        let mut row: Option<Row> = None;
        let mut next_col = 0usize;
        let mut cell = CellState::default();
        let mut in_cell = false;

        loop {
            match xml_reader.read_event_into(&mut buf)? {
                Event::Start(e) => match e.local_name().as_ref() {
                    b"row" => {
                        row = Some(Row::new());
                        next_col = 0;
                    }
                    b"c" if row.is_some() => {
                        in_cell = true;
                        cell = CellState::start(&e)?;
                    }
                    b"v" if in_cell => {
                        cell.in_value = true;
                        cell.value = Some(String::new());
                    }
                    b"is" if in_cell => {
                        cell.in_inline = true;
                        cell.inline = Some(String::new());
                    }
                    b"rPh" if cell.in_inline => cell.in_phonetic = true,
                    b"t" if cell.in_inline && !cell.in_phonetic => cell.in_text = true,
                    _ => {}
                },
                Event::Empty(e) => match e.local_name().as_ref() {
                    b"row" => rows.push(Row::new()),
                    b"c" if row.is_some() => {
                        // A cell with no value occupies its position but is absent
                        let start = CellState::start(&e)?;
                        next_col = start.column(next_col)? + 1;
                    }
                    b"v" if in_cell => cell.value = Some(String::new()),
                    _ => {}
                },
                Event::Text(e) => {
                    if cell.in_value {
                        if let Some(value) = cell.value.as_mut() {
                            value.push_str(&e.unescape()?);
                        }
                    } else if cell.in_text {
                        if let Some(inline) = cell.inline.as_mut() {
                            inline.push_str(&e.unescape()?);
                        }
                    }
                }
                Event::End(e) => match e.local_name().as_ref() {
                    b"row" => {
                        if let Some(done) = row.take() {
                            rows.push(done);
                        }
                    }
                    b"c" if in_cell => {
                        in_cell = false;
                        let column = cell.column(next_col)?;
                        let text = cell.text(shared_strings)?;
                        if let Some(current) = row.as_mut() {
                            current.set(column, text);
                        }
                        next_col = column + 1;
                    }
                    b"v" => cell.in_value = false,
                    b"is" => cell.in_inline = false,
                    b"rPh" => cell.in_phonetic = false,
                    b"t" => cell.in_text = false,
                    _ => {}
                },
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        Ok(rows)
    }
}

/// Look up an attribute by local name, ignoring any namespace prefix
fn attribute(e: &BytesStart<'_>, name: &[u8]) -> XlsxResult<Option<String>> {
    for attr in e.attributes().flatten() {
        if attr.key.local_name().as_ref() == name {
            return Ok(Some(attr.unescape_value()?.into_owned()));
        }
    }
    Ok(None)
}

/// Parse state for the `<c>` element being read
#[derive(Debug, Default)]
struct CellState {
    reference: Option<String>,
    cell_type: Option<String>,
    value: Option<String>,
    inline: Option<String>,
    in_value: bool,
    in_inline: bool,
    in_phonetic: bool,
    in_text: bool,
}

impl CellState {
    fn start(e: &BytesStart<'_>) -> XlsxResult<Self> {
        Ok(Self {
            reference: attribute(e, b"r")?,
            cell_type: attribute(e, b"t")?,
            ..Self::default()
        })
    }

    /// 0-based column of this cell, falling back to `next` when the cell has
    /// no usable reference
    fn column(&self, next: usize) -> XlsxResult<usize> {
        let reference = match self.reference.as_deref() {
            Some(reference) => reference,
            None => return Ok(next),
        };

        match split_reference(reference) {
            Some((col, _)) if col > MAX_COLS => Err(XlsxError::InvalidFormat(format!(
                "cell reference '{}' is beyond the last column",
                reference
            ))),
            Some((col, _)) => Ok(col as usize - 1),
            None => {
                warn!("Unparseable cell reference '{}', placing cell by position", reference);
                Ok(next)
            }
        }
    }

    /// Resolve the cell's text, or `None` if it holds no value
    fn text(&self, shared_strings: &[String]) -> XlsxResult<Option<String>> {
        let text = match self.cell_type.as_deref() {
            Some("s") => match self.value.as_deref() {
                Some(index) => {
                    let string = index
                        .trim()
                        .parse::<usize>()
                        .ok()
                        .and_then(|i| shared_strings.get(i))
                        .ok_or_else(|| {
                            XlsxError::InvalidFormat(format!("bad shared string index '{}'", index))
                        })?;
                    Some(string.clone())
                }
                None => None,
            },
            Some("inlineStr") => self
                .inline
                .as_deref()
                .or(self.value.as_deref())
                .map(escape::decode),
            Some("b") => self.value.as_deref().map(|v| match v.trim() {
                "1" => "TRUE".to_string(),
                "0" => "FALSE".to_string(),
                other => other.to_string(),
            }),
            Some("str") => self.value.as_deref().map(escape::decode),
            _ => self.value.clone(),
        };
        Ok(text)
    }
}
