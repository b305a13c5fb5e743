//! Inspect Module
//!
//! 出力済みワークブックを読み戻し、値とレイアウトを検証するためのモジュール。
//! 値はcalamine、レイアウト（固定ペイン・列幅・行高・塗りつぶし・太字）は
//! ZIP内のXMLを直接解析して取得します。

mod layout;
mod values;

use std::io::Cursor;
use std::path::Path;

use crate::api::HEADERS;
use crate::error::MdToXlsxError;
use crate::types::TableRow;

pub use layout::ColumnWidth;

use layout::{SheetLayout, StyleTable};

/// 読み戻したワークブックの内容
///
/// # 使用例
///
/// ```rust,no_run
/// use hotel_codes_xlsx::inspect_workbook;
///
/// # fn main() -> Result<(), hotel_codes_xlsx::MdToXlsxError> {
/// let report = inspect_workbook("HOTEL_CODES_LIST.xlsx")?;
/// println!("{} rows, frozen rows: {}", report.data_rows().len(), report.frozen_rows());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct WorkbookReport {
    sheet_names: Vec<String>,
    rows: Vec<Vec<String>>,
    layout: SheetLayout,
    styles: StyleTable,
}

impl WorkbookReport {
    /// シート名一覧
    pub fn sheet_names(&self) -> &[String] {
        &self.sheet_names
    }

    /// ヘッダー行を含むすべての行（A1原点、空セルは空文字列）
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// 1行目（ヘッダー）
    pub fn header(&self) -> &[String] {
        self.rows.first().map(Vec::as_slice).unwrap_or(&[])
    }

    /// 2行目以降（データ行）
    pub fn data_rows(&self) -> &[Vec<String>] {
        self.rows.get(1..).unwrap_or(&[])
    }

    /// 固定された行数
    pub fn frozen_rows(&self) -> u32 {
        self.layout.frozen_rows
    }

    /// 固定された列数
    pub fn frozen_cols(&self) -> u32 {
        self.layout.frozen_cols
    }

    /// 固定ペインの左上セル（例: "A2"）
    pub fn frozen_top_left_cell(&self) -> Option<&str> {
        self.layout.top_left_cell.as_deref()
    }

    /// 列幅の定義一覧
    pub fn column_widths(&self) -> &[ColumnWidth] {
        &self.layout.column_widths
    }

    /// 列（0始まり）の幅
    ///
    /// 保存時に余白分が加算されるため、設定値よりわずかに大きくなります
    /// （例: 8 -> 8.7109375）。
    pub fn column_width(&self, col: u16) -> Option<f64> {
        self.layout
            .column_widths
            .iter()
            .find(|w| w.first_col <= col && col <= w.last_col)
            .map(|w| w.width)
    }

    /// 行（0始まり）の高さ。デフォルト高さの場合はNone
    pub fn row_height(&self, row: u32) -> Option<f64> {
        self.layout.row_heights.get(&row).copied()
    }

    /// セル（0始まり）の塗りつぶし色（ARGB、例: "FFF2F2F2"）
    pub fn cell_fill(&self, row: u32, col: u16) -> Option<&str> {
        let xf = *self.layout.cell_styles.get(&(row, col))?;
        self.styles.fill_color(xf)
    }

    /// セル（0始まり）が太字か
    pub fn cell_is_bold(&self, row: u32, col: u16) -> bool {
        self.layout
            .cell_styles
            .get(&(row, col))
            .map(|xf| self.styles.is_bold(*xf))
            .unwrap_or(false)
    }

    /// セル（0始まり）に書式が設定されているか
    pub fn cell_is_styled(&self, row: u32, col: u16) -> bool {
        self.layout
            .cell_styles
            .get(&(row, col))
            .is_some_and(|xf| *xf != 0)
    }

    /// 書き込んだ内容と一致するかを検証
    ///
    /// シート名、ヘッダー、データ行数、各セルの値を比較します。
    pub fn verify(&self, sheet_name: &str, rows: &[TableRow]) -> Result<(), MdToXlsxError> {
        if self.sheet_names.first().map(String::as_str) != Some(sheet_name) {
            return Err(MdToXlsxError::Verification(format!(
                "expected first sheet '{}', found {:?}",
                sheet_name, self.sheet_names
            )));
        }

        if trim_trailing_empty(self.header()) != HEADERS {
            return Err(MdToXlsxError::Verification(format!(
                "unexpected header row: {:?}",
                self.header()
            )));
        }

        if self.data_rows().len() != rows.len() {
            return Err(MdToXlsxError::Verification(format!(
                "expected {} data rows, found {}",
                rows.len(),
                self.data_rows().len()
            )));
        }

        for (idx, (read, written)) in self.data_rows().iter().zip(rows).enumerate() {
            if trim_trailing_empty(read) != trim_trailing_empty(written.cells()) {
                return Err(MdToXlsxError::Verification(format!(
                    "row {} differs: wrote {:?}, read {:?}",
                    idx + 2,
                    written.cells(),
                    read
                )));
            }
        }

        Ok(())
    }
}

fn trim_trailing_empty<S: AsRef<str>>(cells: &[S]) -> &[S] {
    let len = cells
        .iter()
        .rposition(|c| !c.as_ref().is_empty())
        .map_or(0, |pos| pos + 1);
    &cells[..len]
}

/// ファイルパスからワークブックを読み戻す
pub fn inspect_workbook<P: AsRef<Path>>(path: P) -> Result<WorkbookReport, MdToXlsxError> {
    let bytes = std::fs::read(path.as_ref())?;
    inspect_workbook_bytes(bytes)
}

/// メモリ上のXLSXバイト列からワークブックを読み戻す
pub fn inspect_workbook_bytes(bytes: Vec<u8>) -> Result<WorkbookReport, MdToXlsxError> {
    let (layout, styles) = layout::parse_layout(Cursor::new(bytes.as_slice()))?;
    let values = values::read_values(Cursor::new(bytes))?;

    // 値のない書式付きセルだけの末尾行もcalamineの範囲外になるため、XMLの行数に揃える
    let mut rows = values.rows;
    if let Some(last_row) = layout.last_row {
        let expected = last_row as usize + 1;
        if rows.len() < expected {
            rows.resize(expected, Vec::new());
        }
    }

    Ok(WorkbookReport {
        sheet_names: values.sheet_names,
        rows,
        layout,
        styles,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trim_trailing_empty() {
        let cells = ["a", "", "b", "", ""];
        assert_eq!(trim_trailing_empty(&cells), ["a", "", "b"]);
        let empty: [&str; 2] = ["", ""];
        assert!(trim_trailing_empty(&empty).is_empty());
    }

    #[test]
    fn test_inspect_rejects_non_zip() {
        let result = inspect_workbook_bytes(b"not a workbook".to_vec());
        assert!(matches!(result, Err(MdToXlsxError::Zip(_))));
    }
}
