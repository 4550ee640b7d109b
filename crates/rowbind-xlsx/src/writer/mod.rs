//! XLSX writer

use std::fs::File;
use std::io::{Seek, Write};
use std::path::Path;

use log::debug;

use crate::error::{XlsxError, XlsxResult};
use crate::escape;
use rowbind_core::{cell_reference, Row, MAX_COLS, MAX_ROWS};

/// Options for writing XLSX files
#[derive(Debug, Clone)]
pub struct XlsxWriteOptions {
    /// Name of the single worksheet (default: "Sheet1")
    pub sheet_name: String,
}

impl Default for XlsxWriteOptions {
    fn default() -> Self {
        Self {
            sheet_name: "Sheet1".to_string(),
        }
    }
}

/// XLSX file writer
///
/// Writes one worksheet where every present cell is a plain inline string.
/// Absent cells are left out of the sheet.
pub struct XlsxWriter;

impl XlsxWriter {
    /// Write rows to a file path
    pub fn write_file<P: AsRef<Path>>(
        rows: &[Row],
        path: P,
        options: &XlsxWriteOptions,
    ) -> XlsxResult<()> {
        let file = File::create(path)?;
        Self::write_rows(rows, file, options)
    }

    /// Write rows to a writer
    pub fn write_rows<W: Write + Seek>(
        rows: &[Row],
        writer: W,
        options: &XlsxWriteOptions,
    ) -> XlsxResult<()> {
        Self::check_dimensions(rows)?;

        let mut zip = zip::ZipWriter::new(writer);

        Self::write_content_types(&mut zip)?;
        Self::write_root_rels(&mut zip)?;
        Self::write_workbook_xml(&mut zip, options)?;
        Self::write_workbook_rels(&mut zip)?;
        Self::write_worksheet(&mut zip, rows)?;

        zip.finish()?;
        debug!("Wrote {} rows to sheet '{}'", rows.len(), options.sheet_name);
        Ok(())
    }

    fn check_dimensions(rows: &[Row]) -> XlsxResult<()> {
        if rows.len() > MAX_ROWS as usize {
            return Err(XlsxError::InvalidFormat(format!(
                "{} rows exceed the worksheet limit of {}",
                rows.len(),
                MAX_ROWS
            )));
        }
        if let Some(widest) = rows.iter().map(Row::len).max() {
            if widest > MAX_COLS as usize {
                return Err(XlsxError::InvalidFormat(format!(
                    "{} columns exceed the worksheet limit of {}",
                    widest, MAX_COLS
                )));
            }
        }
        Ok(())
    }

    fn write_content_types<W: Write + Seek>(zip: &mut zip::ZipWriter<W>) -> XlsxResult<()> {
        let options = zip::write::SimpleFileOptions::default();
        zip.start_file("[Content_Types].xml", options)?;

        let content = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
    <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
    <Default Extension="xml" ContentType="application/xml"/>
    <Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>
    <Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>
</Types>"#;

        zip.write_all(content.as_bytes())?;
        Ok(())
    }

    fn write_root_rels<W: Write + Seek>(zip: &mut zip::ZipWriter<W>) -> XlsxResult<()> {
        let options = zip::write::SimpleFileOptions::default();
        zip.start_file("_rels/.rels", options)?;

        let content = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
    <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/>
</Relationships>"#;

        zip.write_all(content.as_bytes())?;
        Ok(())
    }

    fn write_workbook_xml<W: Write + Seek>(
        zip: &mut zip::ZipWriter<W>,
        options: &XlsxWriteOptions,
    ) -> XlsxResult<()> {
        let file_options = zip::write::SimpleFileOptions::default();
        zip.start_file("xl/workbook.xml", file_options)?;

        let content = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
    <sheets>
        <sheet name="{}" sheetId="1" r:id="rId1"/>
    </sheets>
</workbook>"#,
            quick_xml::escape::escape(options.sheet_name.as_str())
        );

        zip.write_all(content.as_bytes())?;
        Ok(())
    }

    fn write_workbook_rels<W: Write + Seek>(zip: &mut zip::ZipWriter<W>) -> XlsxResult<()> {
        let options = zip::write::SimpleFileOptions::default();
        zip.start_file("xl/_rels/workbook.xml.rels", options)?;

        let content = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
    <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/>
</Relationships>"#;

        zip.write_all(content.as_bytes())?;
        Ok(())
    }

    fn write_worksheet<W: Write + Seek>(
        zip: &mut zip::ZipWriter<W>,
        rows: &[Row],
    ) -> XlsxResult<()> {
        let options = zip::write::SimpleFileOptions::default();
        zip.start_file("xl/worksheets/sheet1.xml", options)?;

        let mut content = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
<sheetData>"#,
        );

        for (row_idx, row) in rows.iter().enumerate() {
            let row_num = row_idx as u32 + 1;
            content.push_str(&format!("\n<row r=\"{}\">", row_num));

            for (col_idx, cell) in row.cells().enumerate() {
                if let Some(text) = cell {
                    let encoded = escape::encode(text);
                    content.push_str(&format!(
                        r#"<c r="{}" t="inlineStr"><is><t xml:space="preserve">{}</t></is></c>"#,
                        cell_reference(col_idx as u32 + 1, row_num),
                        quick_xml::escape::escape(encoded.as_str())
                    ));
                }
            }

            content.push_str("</row>");
        }

        content.push_str("\n</sheetData>\n</worksheet>");

        zip.write_all(content.as_bytes())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::XlsxReader;
    use pretty_assertions::assert_eq;
    use std::io::{Cursor, Read};

    fn write(rows: &[Row], options: &XlsxWriteOptions) -> Vec<u8> {
        let mut buf = Vec::new();
        XlsxWriter::write_rows(rows, Cursor::new(&mut buf), options).unwrap();
        buf
    }

    fn part(bytes: &[u8], name: &str) -> String {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut content = String::new();
        archive
            .by_name(name)
            .unwrap()
            .read_to_string(&mut content)
            .unwrap();
        content
    }

    #[test]
    fn test_cells_are_inline_strings() {
        let rows = vec![Row::from_text(["Id", "Name"]), Row::from_text(["1", "Alice"])];
        let bytes = write(&rows, &XlsxWriteOptions::default());
        let sheet = part(&bytes, "xl/worksheets/sheet1.xml");

        assert!(sheet.contains(r#"<c r="A1" t="inlineStr"><is><t xml:space="preserve">Id</t></is></c>"#));
        assert!(sheet.contains(r#"<c r="B2" t="inlineStr"><is><t xml:space="preserve">Alice</t></is></c>"#));
        assert!(!sheet.contains("<v>"));
    }

    #[test]
    fn test_sheet_name_option() {
        let options = XlsxWriteOptions {
            sheet_name: "People & Pets".to_string(),
        };
        let bytes = write(&[Row::from_text(["x"])], &options);

        assert!(part(&bytes, "xl/workbook.xml").contains(r#"name="People &amp; Pets""#));
    }

    #[test]
    fn test_absent_cells_are_omitted() {
        let rows = vec![Row::from(vec![None, Some("B".to_string())])];
        let sheet = part(&write(&rows, &XlsxWriteOptions::default()), "xl/worksheets/sheet1.xml");

        assert!(!sheet.contains(r#"r="A1""#));
        assert!(sheet.contains(r#"r="B1""#));
    }

    #[test]
    fn test_roundtrip_through_reader() {
        let rows = vec![
            Row::from_text(["Text", "Special", "Spaces", "Control", "Underscore", "Empty"]),
            Row::from_text([
                "Hello, World!",
                "<>&\"'",
                "  both  ",
                "cr\r\nlf",
                "_x0041_",
                "",
            ]),
            Row::from_text(["Unicode: \u{1F600}", "日本語", "", "", "", ""]),
        ];
        let bytes = write(&rows, &XlsxWriteOptions::default());
        let back = XlsxReader::read_rows(Cursor::new(bytes)).unwrap();

        assert_eq!(back, rows);
    }

    #[test]
    fn test_roundtrip_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rows.xlsx");
        let rows = vec![
            Row::from_text(["Id", "Name"]),
            Row::from(vec![None, Some("Alice".to_string())]),
        ];

        XlsxWriter::write_file(&rows, &path, &XlsxWriteOptions::default()).unwrap();
        let back = XlsxReader::read_file(&path).unwrap();

        assert_eq!(back, rows);
    }

    #[test]
    fn test_too_many_columns() {
        let wide = Row::from_text(std::iter::repeat("x").take(MAX_COLS as usize + 1));
        let mut buf = Vec::new();
        let err = XlsxWriter::write_rows(&[wide], Cursor::new(&mut buf), &XlsxWriteOptions::default())
            .unwrap_err();

        assert!(matches!(err, XlsxError::InvalidFormat(_)));
        assert!(buf.is_empty());
    }
}
