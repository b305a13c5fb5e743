//! Workbook Builder
//!
//! 抽出済みの行からExcelワークブック（1シート）を構築する。

use rust_xlsxwriter::{ColNum, RowNum, Workbook, XlsxError};
use tracing::debug;

use crate::api::HEADERS;
use crate::error::MdToXlsxError;
use crate::output::styles::{SheetStyles, COLUMN_WIDTHS, HEADER_ROW_HEIGHT};
use crate::types::TableRow;

/// ヘッダー行 + データ行のシートを持つワークブックを構築
///
/// - 1行目: 固定ヘッダー（書式付き、行高固定）
/// - 2行目以降: データ行（A〜E列は書式付き、偶数行は背景色あり）
/// - F列以降のセルは書式なしで出力
/// - 先頭行をウィンドウ枠として固定（A2）
pub(crate) fn build_workbook(
    rows: &[TableRow],
    sheet_name: &str,
) -> Result<Workbook, MdToXlsxError> {
    let styles = SheetStyles::new();
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet_name)?;

    for (col, title) in HEADERS.iter().enumerate() {
        worksheet.write_string_with_format(0, to_col(col)?, *title, &styles.header)?;
    }

    for (idx, row) in rows.iter().enumerate() {
        // 0始まりのシート行（ヘッダーが0行目）
        let sheet_row =
            RowNum::try_from(idx + 1).map_err(|_| XlsxError::RowColumnLimitError)?;
        let format = styles.data_format(sheet_row + 1);

        for (col, value) in row.cells().iter().enumerate() {
            let col_num = to_col(col)?;
            if col < HEADERS.len() {
                worksheet.write_string_with_format(sheet_row, col_num, value, format)?;
            } else {
                worksheet.write_string(sheet_row, col_num, value)?;
            }
        }
    }

    for (col, width) in COLUMN_WIDTHS.iter().enumerate() {
        worksheet.set_column_width(to_col(col)?, *width)?;
    }
    worksheet.set_row_height(0, HEADER_ROW_HEIGHT)?;
    worksheet.set_freeze_panes(1, 0)?;

    debug!(sheet = sheet_name, rows = rows.len(), "workbook built");
    Ok(workbook)
}

fn to_col(col: usize) -> Result<ColNum, MdToXlsxError> {
    ColNum::try_from(col).map_err(|_| MdToXlsxError::Xlsx(XlsxError::RowColumnLimitError))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> TableRow {
        TableRow::new(cells.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn test_build_empty_workbook() {
        let mut workbook = build_workbook(&[], "Hotel Codes List").unwrap();
        let buffer = workbook.save_to_buffer().unwrap();
        assert!(!buffer.is_empty());
    }

    #[test]
    fn test_build_with_rows() {
        let rows = vec![
            row(&["1", "ABC123", "Grand Hotel", "Active", "VIP"]),
            row(&["2", "DEF456", "Sea View", "Inactive", "", "extra"]),
        ];
        let mut workbook = build_workbook(&rows, "Hotel Codes List").unwrap();
        assert!(workbook.save_to_buffer().is_ok());
    }

    #[test]
    fn test_invalid_sheet_name_is_rejected() {
        let result = build_workbook(&[], "bad[name]");
        assert!(matches!(result, Err(MdToXlsxError::Xlsx(_))));
    }

    #[test]
    fn test_to_col_limit() {
        assert_eq!(to_col(4).unwrap(), 4);
        assert!(to_col(usize::from(u16::MAX) + 1).is_err());
    }
}
