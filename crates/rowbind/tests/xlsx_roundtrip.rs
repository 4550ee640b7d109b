//! End-to-end tests for XLSX import and export (records -> xlsx -> records)

use pretty_assertions::assert_eq;
use rowbind::prelude::*;
use rowbind::{MappingError, XlsxError, XlsxReader};
use std::io::{Cursor, Write};

#[derive(Debug, Clone, Default, PartialEq)]
struct Person {
    id: i32,
    name: String,
}

record!(Person {
    "Id" => id: i32,
    "Name" => name: String,
});

#[derive(Debug, Default, PartialEq)]
struct Member {
    name: String,
    age: i32,
}

record!(Member {
    "Name" => name: String,
    "Age" => age: i32,
});

fn people() -> Vec<Person> {
    vec![
        Person {
            id: 1,
            name: "Alice".into(),
        },
        Person {
            id: 2,
            name: "Bob".into(),
        },
    ]
}

fn to_xlsx<T: Record>(records: &[T]) -> Vec<u8> {
    let mut buf = Vec::new();
    SheetSerializer::new()
        .export_xlsx(records, Cursor::new(&mut buf), None)
        .unwrap();
    buf
}

/// Build a workbook holding the given sheet XML as its only worksheet
fn workbook_with_sheet(sheet_data: &str) -> Vec<u8> {
    let sheet = format!(
        r#"<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>{}</sheetData></worksheet>"#,
        sheet_data
    );
    build_package(&[
        ("[Content_Types].xml", "<Types/>"),
        (
            "xl/workbook.xml",
            r#"<workbook xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><sheets><sheet name="Data" sheetId="1" r:id="rId1"/></sheets></workbook>"#,
        ),
        (
            "xl/_rels/workbook.xml.rels",
            r#"<Relationships><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/></Relationships>"#,
        ),
        ("xl/worksheets/sheet1.xml", &sheet),
    ])
}

fn build_package(parts: &[(&str, &str)]) -> Vec<u8> {
    let mut buf = Vec::new();
    {
        let mut zip = zip::ZipWriter::new(Cursor::new(&mut buf));
        for (name, content) in parts {
            zip.start_file(*name, zip::write::SimpleFileOptions::default())
                .unwrap();
            zip.write_all(content.as_bytes()).unwrap();
        }
        zip.finish().unwrap();
    }
    buf
}

#[test]
fn test_export_produces_header_and_data_rows() {
    let bytes = to_xlsx(&people());
    let rows = XlsxReader::read_rows(Cursor::new(bytes)).unwrap();

    assert_eq!(
        rows,
        vec![
            Row::from_text(["Id", "Name"]),
            Row::from_text(["1", "Alice"]),
            Row::from_text(["2", "Bob"]),
        ]
    );
}

#[test]
fn test_roundtrip_bytes() {
    let bytes = to_xlsx(&people());
    let back: Vec<Person> = SheetSerializer::new().import_xlsx_bytes(&bytes).unwrap();

    assert_eq!(back, people());
}

#[test]
fn test_roundtrip_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("people.xlsx");
    let serializer = SheetSerializer::new().with_sheet_name("People");

    serializer.export_file(&people(), &path, None).unwrap();
    let back: Vec<Person> = serializer.import_file(&path).unwrap();

    assert_eq!(back, people());
}

#[test]
fn test_header_override() {
    let headers = vec!["Number".to_string(), "Full Name".to_string()];
    let mut buf = Vec::new();
    SheetSerializer::new()
        .export_xlsx(&people(), Cursor::new(&mut buf), Some(&headers))
        .unwrap();
    let rows = XlsxReader::read_rows(Cursor::new(buf)).unwrap();

    assert_eq!(rows[0], Row::from_text(["Number", "Full Name"]));
    assert_eq!(rows[1], Row::from_text(["1", "Alice"]));
}

#[test]
fn test_header_override_length_mismatch() {
    let headers = vec!["Only".to_string()];
    let mut buf = Vec::new();
    let err = SheetSerializer::new()
        .export_xlsx(&people(), Cursor::new(&mut buf), Some(&headers))
        .unwrap_err();

    assert!(matches!(
        err.as_mapping(),
        Some(MappingError::HeaderMismatch {
            headers: 1,
            fields: 2
        })
    ));
    assert!(buf.is_empty());
}

#[test]
fn test_columns_in_any_order_with_unknown_columns() {
    let bytes = workbook_with_sheet(
        r#"<row r="1">
            <c r="A1" t="inlineStr"><is><t>Notes</t></is></c>
            <c r="B1" t="inlineStr"><is><t>Name</t></is></c>
            <c r="C1" t="inlineStr"><is><t>Id</t></is></c>
        </row>
        <row r="2">
            <c r="A2" t="inlineStr"><is><t>ignored</t></is></c>
            <c r="B2" t="inlineStr"><is><t>Carol</t></is></c>
            <c r="C2"><v>3</v></c>
        </row>"#,
    );
    let back: Vec<Person> = SheetSerializer::new().import_xlsx_bytes(&bytes).unwrap();

    assert_eq!(
        back,
        vec![Person {
            id: 3,
            name: "Carol".into()
        }]
    );
}

#[test]
fn test_conversion_error_names_value_field_and_type() {
    let bytes = workbook_with_sheet(
        r#"<row r="1">
            <c r="A1" t="inlineStr"><is><t>Name</t></is></c>
            <c r="B1" t="inlineStr"><is><t>Age</t></is></c>
        </row>
        <row r="2">
            <c r="A2" t="inlineStr"><is><t>Dave</t></is></c>
            <c r="B2" t="inlineStr"><is><t>abc</t></is></c>
        </row>"#,
    );
    let err = SheetSerializer::new()
        .import_xlsx_bytes::<Member>(&bytes)
        .unwrap_err();

    assert_eq!(
        err.as_mapping(),
        Some(&MappingError::Conversion {
            value: "abc".into(),
            field: "Age".into(),
            type_name: "i32",
        })
    );
    let message = err.to_string();
    assert!(message.contains("abc"));
    assert!(message.contains("Age"));
    assert!(message.contains("i32"));
}

#[test]
fn test_header_only_sheet_yields_no_records() {
    let bytes = workbook_with_sheet(
        r#"<row r="1"><c r="A1" t="inlineStr"><is><t>Id</t></is></c></row>"#,
    );
    let back: Vec<Person> = SheetSerializer::new().import_xlsx_bytes(&bytes).unwrap();

    assert!(back.is_empty());
}

#[test]
fn test_empty_sheet_is_empty_source() {
    let bytes = workbook_with_sheet("");
    let err = SheetSerializer::new()
        .import_xlsx_bytes::<Person>(&bytes)
        .unwrap_err();

    assert_eq!(err.as_mapping(), Some(&MappingError::EmptySource));
}

#[test]
fn test_workbook_without_sheets() {
    let bytes = build_package(&[
        ("[Content_Types].xml", "<Types/>"),
        ("xl/workbook.xml", "<workbook><sheets/></workbook>"),
        ("xl/_rels/workbook.xml.rels", "<Relationships/>"),
    ]);
    let err = SheetSerializer::new()
        .import_xlsx_bytes::<Person>(&bytes)
        .unwrap_err();

    assert!(matches!(err, Error::Xlsx(XlsxError::MissingSheet)));
}

#[test]
fn test_export_empty_list() {
    let mut buf = Vec::new();
    let err = SheetSerializer::new()
        .export_xlsx::<Person, _>(&[], Cursor::new(&mut buf), None)
        .unwrap_err();

    assert_eq!(err.as_mapping(), Some(&MappingError::EmptyInput));
    assert!(buf.is_empty());
}

#[test]
fn test_failed_export_keeps_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("people.xlsx");
    let serializer = SheetSerializer::new();
    serializer.export_file(&people(), &path, None).unwrap();
    let before = std::fs::read(&path).unwrap();

    let err = serializer.export_file::<Person, _>(&[], &path, None).unwrap_err();

    assert_eq!(err.as_mapping(), Some(&MappingError::EmptyInput));
    assert_eq!(std::fs::read(&path).unwrap(), before);
}

#[test]
fn test_unsupported_extension() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("people.ods");

    let err = SheetSerializer::new()
        .export_file(&people(), &path, None)
        .unwrap_err();
    assert!(matches!(err, Error::UnsupportedFormat(_)));
    assert!(!path.exists());

    let err = SheetSerializer::new()
        .import_file::<Person, _>(&path)
        .unwrap_err();
    assert!(matches!(err, Error::UnsupportedFormat(_)));
}
