//! Boundary Value Tests
//!
//! 空文書、大量行、長いセル、入力サイズ上限、不正なエンコーディングなど
//! 境界条件での動作を検証します。

use tempfile::tempdir;

use hotel_codes_xlsx::{
    inspect_workbook, inspect_workbook_bytes, ConverterBuilder, MdToXlsxError, HEADERS,
};

// Helper module for generating test fixtures
mod fixtures {
    use std::fmt::Write as _;

    /// 指定行数のホテルコード表を生成
    pub fn generate_table(rows: usize) -> String {
        let mut doc = String::from(
            "| # | Hotel Code | Hotel Name | Status | Notes |\n|---|---|---|---|---|\n",
        );
        for i in 1..=rows {
            let status = if i % 3 == 0 { "Inactive" } else { "Active" };
            writeln!(doc, "| {} | `H{:06}` | Hotel {} | {} | |", i, i, i, status).unwrap();
        }
        doc
    }
}

#[test]
fn test_empty_document() {
    let converter = ConverterBuilder::new().build().unwrap();
    let table = converter.extract("").unwrap();
    assert!(table.rows.is_empty());
    assert!(!table.is_found());

    let bytes = converter.convert_to_buffer("").unwrap();
    let report = inspect_workbook_bytes(bytes).unwrap();
    assert_eq!(report.rows().len(), 1);
    assert_eq!(report.header(), HEADERS);
}

#[test]
fn test_empty_file() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("empty.md");
    std::fs::write(&input, "").unwrap();
    let output = dir.path().join("empty.xlsx");

    let summary = ConverterBuilder::new()
        .with_input_path(&input)
        .with_output_path(&output)
        .build()
        .unwrap()
        .convert()
        .unwrap();
    assert_eq!(summary.total_rows, 0);
    assert_eq!(inspect_workbook(&output).unwrap().rows().len(), 1);
}

#[test]
fn test_header_without_separator() {
    let converter = ConverterBuilder::new().build().unwrap();
    let document = "| # | Hotel Code | Hotel Name | Status | Notes |\n| 1 | `A` | B | C | D |\n";
    let table = converter.extract(document).unwrap();
    assert!(table.stats.header_found);
    assert!(!table.stats.separator_found);
    assert!(table.rows.is_empty());

    let strict = ConverterBuilder::new().require_table(true).build().unwrap();
    assert!(matches!(
        strict.extract(document),
        Err(MdToXlsxError::TableNotFound(_))
    ));
}

#[test]
fn test_large_table() {
    let document = fixtures::generate_table(5_000);
    let converter = ConverterBuilder::new().build().unwrap();

    let bytes = converter.convert_to_buffer(&document).unwrap();
    let report = inspect_workbook_bytes(bytes).unwrap();
    assert_eq!(report.data_rows().len(), 5_000);
    assert_eq!(report.data_rows()[4_999][1], "H005000");

    // 最終行（シート行5001、奇数）は背景色なし
    assert_eq!(report.cell_fill(5_000, 0), None);
    assert_eq!(report.cell_fill(4_999, 0), Some("FFF2F2F2"));
}

#[test]
fn test_very_long_cell_content() {
    let notes = "x".repeat(10_000);
    let document = format!(
        "| # | Hotel Code | Hotel Name | Status | Notes |\n|---|---|---|---|---|\n| 1 | `A` | B | C | {} |\n",
        notes
    );
    let converter = ConverterBuilder::new().build().unwrap();
    let bytes = converter.convert_to_buffer(&document).unwrap();
    let report = inspect_workbook_bytes(bytes).unwrap();
    assert_eq!(report.data_rows()[0][4].len(), 10_000);
}

#[test]
fn test_cell_at_excel_length_limit() {
    let notes = "x".repeat(32_767);
    let document = format!(
        "| # | Hotel Code | Hotel Name | Status | Notes |\n|---|---|---|---|---|\n| 1 | `A` | B | C | {} |\n",
        notes
    );
    let converter = ConverterBuilder::new().build().unwrap();
    let bytes = converter.convert_to_buffer(&document).unwrap();
    let report = inspect_workbook_bytes(bytes).unwrap();
    assert_eq!(report.data_rows()[0][4].len(), 32_767);
}

#[test]
fn test_cell_over_excel_length_limit() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("long.md");
    let document = format!(
        "| # | Hotel Code | Hotel Name | Status | Notes |\n|---|---|---|---|---|\n| 1 | `A` | B | C | {} |\n",
        "x".repeat(40_000)
    );
    std::fs::write(&input, document).unwrap();
    let output = dir.path().join("long.xlsx");

    let result = ConverterBuilder::new()
        .with_input_path(&input)
        .with_output_path(&output)
        .build()
        .unwrap()
        .convert();

    assert!(matches!(result, Err(MdToXlsxError::Xlsx(_))));
    assert!(!output.exists());
}

#[test]
fn test_unicode_cells() {
    let document = "\
| # | Hotel Code | Hotel Name | Status | Notes |
|---|---|---|---|---|
| 1 | `京都001` | ホテル・グランド | 営業中 | 🌸 季節限定 |
";
    let converter = ConverterBuilder::new().build().unwrap();
    let bytes = converter.convert_to_buffer(document).unwrap();
    let report = inspect_workbook_bytes(bytes).unwrap();
    assert_eq!(
        report.data_rows()[0],
        ["1", "京都001", "ホテル・グランド", "営業中", "🌸 季節限定"]
    );
}

#[test]
fn test_input_too_large() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("big.md");
    std::fs::write(&input, fixtures::generate_table(100)).unwrap();
    let output = dir.path().join("big.xlsx");

    let result = ConverterBuilder::new()
        .with_input_path(&input)
        .with_output_path(&output)
        .with_max_input_bytes(64)
        .build()
        .unwrap()
        .convert();

    assert!(matches!(
        result,
        Err(MdToXlsxError::InputTooLarge { max: 64, .. })
    ));
    assert!(!output.exists());
}

#[test]
fn test_invalid_bytes_for_encoding() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("broken.md");
    std::fs::write(&input, [b'|', b' ', 0xFF, 0xFE, 0xFD, b'\n']).unwrap();
    let output = dir.path().join("broken.xlsx");

    let result = ConverterBuilder::new()
        .with_input_path(&input)
        .with_output_path(&output)
        .build()
        .unwrap()
        .convert();

    assert!(matches!(result, Err(MdToXlsxError::Decode { .. })));
    assert!(!output.exists());
}

#[test]
fn test_invalid_builder_settings() {
    assert!(matches!(
        ConverterBuilder::new().with_sheet_name("").build(),
        Err(MdToXlsxError::Config(_))
    ));
    assert!(matches!(
        ConverterBuilder::new().with_sheet_name("x".repeat(32)).build(),
        Err(MdToXlsxError::Config(_))
    ));
    assert!(matches!(
        ConverterBuilder::new().with_sheet_name("Hotels/2024").build(),
        Err(MdToXlsxError::Config(_))
    ));
    assert!(matches!(
        ConverterBuilder::new().with_max_input_bytes(0).build(),
        Err(MdToXlsxError::Config(_))
    ));
    assert!(ConverterBuilder::new()
        .with_sheet_name("x".repeat(31))
        .build()
        .is_ok());
}

#[test]
fn test_corrupted_workbook_inspection() {
    let result = inspect_workbook_bytes(b"PK\x03\x04 corrupted".to_vec());
    assert!(result.is_err());
}
