//! hotel-codes-xlsx - Markdown hotel code table to styled Excel converter
//!
//! Markdownドキュメントに含まれるホテルコード一覧テーブルを抽出し、
//! ヘッダー書式・縞模様・列幅・固定ペインを設定したXLSXワークブックに変換するクレートです。
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use hotel_codes_xlsx::ConverterBuilder;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // デフォルト設定: HOTEL_CODES_LIST.md -> HOTEL_CODES_LIST.xlsx
//!     let converter = ConverterBuilder::new().build()?;
//!     let summary = converter.convert()?;
//!
//!     println!("Excel file created successfully: {}", summary.output_path.display());
//!     println!("Total hotels: {}", summary.total_rows);
//!     Ok(())
//! }
//! ```
//!
//! # Custom Configuration
//!
//! ```rust,no_run
//! use hotel_codes_xlsx::{ConverterBuilder, ExtraCellPolicy};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let converter = ConverterBuilder::new()
//!         .with_input_path("docs/hotels.md")
//!         .with_output_path("out/hotels.xlsx")
//!         .with_encoding("shift_jis")
//!         .with_extra_cells(ExtraCellPolicy::Truncate)
//!         .require_table(true) // テーブルがなければエラー
//!         .verify_output(true) // 保存後に読み戻して検証
//!         .build()?;
//!
//!     converter.convert()?;
//!     Ok(())
//! }
//! ```
//!
//! # In-memory Conversion
//!
//! ```rust
//! use hotel_codes_xlsx::{inspect_workbook_bytes, ConverterBuilder};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let markdown = "\
//! | # | Hotel Code | Hotel Name | Status | Notes |
//! |---|------------|------------|--------|-------|
//! | 1 | `ABC123` | Grand Hotel | Active | VIP |
//! ";
//!
//! let converter = ConverterBuilder::new().build()?;
//! let bytes = converter.convert_to_buffer(markdown)?;
//!
//! let report = inspect_workbook_bytes(bytes)?;
//! assert_eq!(report.data_rows()[0], ["1", "ABC123", "Grand Hotel", "Active", "VIP"]);
//! # Ok(())
//! # }
//! ```

mod api;
mod builder;
mod error;
mod extractor;
mod inspect;
mod normalizer;
mod output;
mod reader;
mod types;

// 公開API
pub use api::{
    ExtraCellPolicy, DEFAULT_ENCODING, DEFAULT_INPUT_PATH, DEFAULT_MAX_INPUT_BYTES,
    DEFAULT_SHEET_NAME, HEADERS, MIN_ROW_CELLS,
};
pub use builder::{ConversionConfig, Converter, ConverterBuilder};
pub use error::MdToXlsxError;
pub use inspect::{inspect_workbook, inspect_workbook_bytes, ColumnWidth, WorkbookReport};
pub use output::styles::{
    is_banded_row, BAND_FILL_RGB, COLUMN_WIDTHS, DATA_FONT_SIZE, HEADER_FILL_RGB,
    HEADER_FONT_SIZE, HEADER_ROW_HEIGHT,
};
pub use types::{ConversionSummary, ExtractedTable, ExtractionStats, TableRow};
