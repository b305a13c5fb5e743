//! Sheet Values Reader
//!
//! calamineを使用して、先頭シートのセル値を文字列グリッドとして読み戻す。

use calamine::{open_workbook_auto_from_rs, Reader, Sheets};
use regex::{Captures, Regex};
use std::borrow::Cow;
use std::io::{Read, Seek};

use crate::error::MdToXlsxError;

/// OOXMLの文字エスケープ（`_xHHHH_`）にマッチするパターン
const ESCAPE_PATTERN: &str = "_x([0-9A-Fa-f]{4})_";

/// シート名一覧と先頭シートのセル値
#[derive(Debug, Clone, Default)]
pub(crate) struct SheetValues {
    pub sheet_names: Vec<String>,
    /// A1を原点とした行列（空セルは空文字列）
    pub rows: Vec<Vec<String>>,
}

/// ワークブックを開き、先頭シートの値を読み込む
pub(crate) fn read_values<R: Read + Seek + Clone>(
    reader: R,
) -> Result<SheetValues, MdToXlsxError> {
    let mut workbook = match open_workbook_auto_from_rs(reader)? {
        Sheets::Xlsx(workbook) => workbook,
        _ => {
            return Err(MdToXlsxError::Config(
                "Only XLSX format is supported".to_string(),
            ))
        }
    };

    let sheet_names = workbook.sheet_names();
    let Some(first) = sheet_names.first() else {
        return Ok(SheetValues::default());
    };

    let range = workbook
        .worksheet_range(first)
        .map_err(calamine::Error::Xlsx)?;

    let escape = Regex::new(ESCAPE_PATTERN)?;

    // calamineの範囲は最初の使用セルから始まるため、A1原点に揃える
    let (row_offset, col_offset) = range.start().unwrap_or((0, 0));
    let mut rows: Vec<Vec<String>> = vec![Vec::new(); row_offset as usize];
    for row in range.rows() {
        let mut values = vec![String::new(); col_offset as usize];
        values.extend(
            row.iter()
                .map(|cell| unescape_text(&escape, &cell.to_string()).into_owned()),
        );
        rows.push(values);
    }

    Ok(SheetValues { sheet_names, rows })
}

/// `_xHHHH_` を対応する文字に戻す
///
/// 書き込み時は制御文字が `_x0001_` に、リテラルの `_x0041_` が `_x005F_x0041_` に
/// エスケープされる。左から1回だけ置換するため、`_x005F_x0041_` は `_x0041_` になる。
fn unescape_text<'t>(escape: &Regex, text: &'t str) -> Cow<'t, str> {
    escape.replace_all(text, |caps: &Captures<'_>| {
        u32::from_str_radix(&caps[1], 16)
            .ok()
            .and_then(char::from_u32)
            .map_or_else(|| caps[0].to_string(), String::from)
    })
}
