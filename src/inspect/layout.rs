//! Sheet Layout Parser
//!
//! XLSX内部のXML（`xl/worksheets/sheet1.xml`, `xl/styles.xml`）を直接解析し、
//! calamineでは取得できないレイアウト情報を抽出する。
//! ウィンドウ枠の固定、列幅、行高、セルごとのスタイルID、塗りつぶし色、太字。

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::collections::{BTreeMap, HashMap};
use std::io::{Read, Seek};
use zip::ZipArchive;

use crate::error::MdToXlsxError;

/// 先頭シートのXMLパス（rust_xlsxwriterはシート順に連番で出力する）
const FIRST_SHEET_PART: &str = "xl/worksheets/sheet1.xml";
const STYLES_PART: &str = "xl/styles.xml";

/// 列幅の定義（`<col min max width>`、列番号は0始まり）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnWidth {
    pub first_col: u16,
    pub last_col: u16,
    pub width: f64,
}

/// cellXfsの1エントリ
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct CellXf {
    font_id: usize,
    fill_id: usize,
}

/// 先頭シートのレイアウト情報
#[derive(Debug, Clone, Default)]
pub(crate) struct SheetLayout {
    /// 固定された行数（`<pane ySplit state="frozen">`）
    pub frozen_rows: u32,
    /// 固定された列数（`<pane xSplit state="frozen">`）
    pub frozen_cols: u32,
    /// 固定ペインの左上セル（例: "A2"）
    pub top_left_cell: Option<String>,
    pub column_widths: Vec<ColumnWidth>,
    /// 行番号（0始まり） -> 行高（ポイント）
    pub row_heights: BTreeMap<u32, f64>,
    /// (行, 列)（0始まり） -> cellXfsインデックス
    pub cell_styles: HashMap<(u32, u16), usize>,
    /// `<row>`要素が存在する最大行番号（0始まり）
    pub last_row: Option<u32>,
}

/// スタイルテーブル（styles.xml）
#[derive(Debug, Clone, Default)]
pub(crate) struct StyleTable {
    cell_xfs: Vec<CellXf>,
    /// fillId -> 前景色（ARGB）。塗りつぶしなしの場合はNone
    fills: Vec<Option<String>>,
    /// fontId -> 太字か
    bold_fonts: Vec<bool>,
}

impl StyleTable {
    /// cellXfsインデックスに対応する塗りつぶし色（例: "FFF2F2F2"）
    pub fn fill_color(&self, xf_index: usize) -> Option<&str> {
        let xf = self.cell_xfs.get(xf_index)?;
        self.fills.get(xf.fill_id)?.as_deref()
    }

    /// cellXfsインデックスのフォントが太字か
    pub fn is_bold(&self, xf_index: usize) -> bool {
        self.cell_xfs
            .get(xf_index)
            .and_then(|xf| self.bold_fonts.get(xf.font_id))
            .copied()
            .unwrap_or(false)
    }
}

/// ZIPアーカイブから先頭シートのレイアウトとスタイルテーブルを解析
pub(crate) fn parse_layout<R: Read + Seek>(
    reader: R,
) -> Result<(SheetLayout, StyleTable), MdToXlsxError> {
    let mut archive = ZipArchive::new(reader)?;
    let sheet_xml = read_part(&mut archive, FIRST_SHEET_PART)?;
    let styles_xml = read_part(&mut archive, STYLES_PART)?;

    Ok((parse_sheet_xml(&sheet_xml)?, parse_styles_xml(&styles_xml)?))
}

fn read_part<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    name: &str,
) -> Result<Vec<u8>, MdToXlsxError> {
    let mut file = archive.by_name(name)?;
    let mut content = Vec::new();
    file.read_to_end(&mut content)?;
    Ok(content)
}

/// 要素から属性値を文字列として取得
fn attr_value(e: &BytesStart<'_>, key: &[u8]) -> Result<Option<String>, MdToXlsxError> {
    for attr in e.attributes() {
        let attr = attr.map_err(|e| MdToXlsxError::Xml(format!("XML attribute error: {}", e)))?;
        if attr.key.as_ref() == key {
            return Ok(Some(std::str::from_utf8(&attr.value)?.to_string()));
        }
    }
    Ok(None)
}

/// ワークシートXMLを解析
pub(crate) fn parse_sheet_xml(xml: &[u8]) -> Result<SheetLayout, MdToXlsxError> {
    let mut reader = Reader::from_reader(xml);
    reader.trim_text(true);

    let mut layout = SheetLayout::default();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) | Event::Empty(e) => match e.name().as_ref() {
                b"pane" => {
                    // <pane ySplit="1" topLeftCell="A2" activePane="bottomLeft" state="frozen"/>
                    let frozen = attr_value(&e, b"state")?.as_deref() == Some("frozen");
                    if frozen {
                        if let Some(y) = attr_value(&e, b"ySplit")? {
                            layout.frozen_rows = y.parse::<f64>()? as u32;
                        }
                        if let Some(x) = attr_value(&e, b"xSplit")? {
                            layout.frozen_cols = x.parse::<f64>()? as u32;
                        }
                        layout.top_left_cell = attr_value(&e, b"topLeftCell")?;
                    }
                }
                b"col" => {
                    // <col min="1" max="1" width="8.7109375" customWidth="1"/>
                    let min = attr_value(&e, b"min")?;
                    let max = attr_value(&e, b"max")?;
                    let width = attr_value(&e, b"width")?;
                    if let (Some(min), Some(max), Some(width)) = (min, max, width) {
                        // Excelの列番号は1始まりなので、0始まりに変換
                        layout.column_widths.push(ColumnWidth {
                            first_col: min.parse::<u16>()?.saturating_sub(1),
                            last_col: max.parse::<u16>()?.saturating_sub(1),
                            width: width.parse::<f64>()?,
                        });
                    }
                }
                b"row" => {
                    // <row r="1" spans="1:5" ht="25" customHeight="1">
                    if let Some(r) = attr_value(&e, b"r")? {
                        let row = r.parse::<u32>()?.saturating_sub(1);
                        layout.last_row = Some(layout.last_row.map_or(row, |last| last.max(row)));
                        if let Some(ht) = attr_value(&e, b"ht")? {
                            layout.row_heights.insert(row, ht.parse::<f64>()?);
                        }
                    }
                }
                b"c" => {
                    // <c r="B3" s="2" t="s">
                    let cell_ref = attr_value(&e, b"r")?;
                    let style = attr_value(&e, b"s")?;
                    if let Some((row, col)) = cell_ref.as_deref().and_then(parse_cell_ref) {
                        let xf = match style {
                            Some(s) => s.parse::<usize>()?,
                            None => 0,
                        };
                        layout.cell_styles.insert((row, col), xf);
                    }
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(layout)
}

/// スタイルXMLを解析
pub(crate) fn parse_styles_xml(xml: &[u8]) -> Result<StyleTable, MdToXlsxError> {
    let mut reader = Reader::from_reader(xml);
    reader.trim_text(true);

    let mut table = StyleTable::default();
    let mut buf = Vec::new();
    let mut in_fonts = false;
    let mut in_fills = false;
    let mut in_cell_xfs = false;
    let mut current_bold = false;
    let mut current_fill: Option<String> = None;
    let mut solid_fill = false;

    loop {
        let event = reader.read_event_into(&mut buf)?;
        let is_empty = matches!(event, Event::Empty(_));
        match event {
            Event::Start(e) | Event::Empty(e) => match e.name().as_ref() {
                b"fonts" => in_fonts = true,
                b"fills" => in_fills = true,
                b"cellXfs" => in_cell_xfs = true,
                b"font" if in_fonts => {
                    current_bold = false;
                    if is_empty {
                        table.bold_fonts.push(false);
                    }
                }
                b"b" if in_fonts => {
                    // <b/> または <b val="0"/>
                    current_bold = attr_value(&e, b"val")?.as_deref() != Some("0");
                }
                b"fill" if in_fills => {
                    current_fill = None;
                    solid_fill = false;
                    if is_empty {
                        table.fills.push(None);
                    }
                }
                b"patternFill" if in_fills => {
                    solid_fill = attr_value(&e, b"patternType")?.as_deref() == Some("solid");
                }
                b"fgColor" if in_fills => {
                    current_fill = attr_value(&e, b"rgb")?;
                }
                b"xf" if in_cell_xfs => {
                    // <xf numFmtId="0" fontId="1" fillId="2" borderId="1" xfId="0" applyFill="1">
                    let font_id = match attr_value(&e, b"fontId")? {
                        Some(v) => v.parse::<usize>()?,
                        None => 0,
                    };
                    let fill_id = match attr_value(&e, b"fillId")? {
                        Some(v) => v.parse::<usize>()?,
                        None => 0,
                    };
                    table.cell_xfs.push(CellXf { font_id, fill_id });
                }
                _ => {}
            },
            Event::End(e) => match e.name().as_ref() {
                b"fonts" => in_fonts = false,
                b"fills" => in_fills = false,
                b"cellXfs" => in_cell_xfs = false,
                b"font" if in_fonts => table.bold_fonts.push(current_bold),
                b"fill" if in_fills => {
                    let color = if solid_fill { current_fill.take() } else { None };
                    table.fills.push(color);
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(table)
}

/// セル参照を(行, 列)に変換（例: "A1" -> (0, 0), "AB12" -> (11, 27)）
pub(crate) fn parse_cell_ref(cell_ref: &str) -> Option<(u32, u16)> {
    let split = cell_ref.find(|c: char| c.is_ascii_digit())?;
    let (letters, digits) = cell_ref.split_at(split);
    if letters.is_empty() || !letters.bytes().all(|b| b.is_ascii_uppercase()) {
        return None;
    }

    let mut col: u32 = 0;
    for b in letters.bytes() {
        col = col.checked_mul(26)?.checked_add(u32::from(b - b'A') + 1)?;
    }
    let row: u32 = digits.parse().ok()?;
    if row == 0 {
        return None;
    }

    Some((row - 1, u16::try_from(col - 1).ok()?))
}
