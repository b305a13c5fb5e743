//! Table Extractor Module
//!
//! Markdown文書から `| # | ... Hotel Code ... |` ヘッダーを持つテーブルを1つだけ抽出する。
//!
//! 走査は先頭から1行ずつ行い、各行は前後の空白を取り除いてから判定します。
//! 改行は LF、CRLF、CR のいずれも受け付けます。
//!
//! 1. `| # |` で始まり `Hotel Code` を含む行をヘッダーとして検出
//! 2. ヘッダー以降で最初の `|---` 行を区切り行としてテーブル内モードへ
//! 3. テーブル内モードでは `|` で始まる行をデータ行として収集
//! 4. テーブル内モードで `|` で始まらない行が現れたら即座に終了

use tracing::{debug, warn};

use crate::api::{ExtraCellPolicy, MIN_ROW_CELLS};
use crate::normalizer::CellNormalizer;
use crate::types::{ExtractedTable, TableRow};

const HEADER_PREFIX: &str = "| # |";
const HEADER_MARKER: &str = "Hotel Code";
const SEPARATOR_PREFIX: &str = "|---";
const CELL_DELIMITER: char = '|';

/// 走査状態
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    /// ヘッダー行を探索中
    SearchingHeader,
    /// ヘッダー検出済み、区切り行を待機中
    AwaitingSeparator,
    /// テーブル内（データ行を収集中）
    InTable,
}

/// テーブル抽出器
#[derive(Debug)]
pub(crate) struct TableExtractor<'a> {
    normalizer: &'a CellNormalizer,
    extra_cells: ExtraCellPolicy,
}

impl<'a> TableExtractor<'a> {
    pub fn new(normalizer: &'a CellNormalizer, extra_cells: ExtraCellPolicy) -> Self {
        Self {
            normalizer,
            extra_cells,
        }
    }

    /// 文書テキストからテーブルを抽出
    ///
    /// ヘッダーや区切り行が見つからない場合もエラーにはせず、
    /// 空の行リストを返します（統計情報で判別可能）。
    pub fn extract(&self, document: &str) -> ExtractedTable {
        let mut table = ExtractedTable::default();
        let mut state = ScanState::SearchingHeader;

        // CRLF と CR のみの改行を LF に揃える
        let document = document.replace("\r\n", "\n").replace('\r', "\n");

        for (line_no, raw_line) in document.split('\n').enumerate() {
            let line = raw_line.trim();

            if is_header_line(line) {
                if !table.stats.header_found {
                    debug!(line = line_no + 1, "table header found");
                }
                table.stats.header_found = true;
                if state == ScanState::SearchingHeader {
                    state = ScanState::AwaitingSeparator;
                }
                continue;
            }

            match state {
                ScanState::SearchingHeader => {}
                ScanState::AwaitingSeparator | ScanState::InTable
                    if line.starts_with(SEPARATOR_PREFIX) =>
                {
                    if state == ScanState::AwaitingSeparator {
                        debug!(line = line_no + 1, "table separator found");
                    }
                    table.stats.separator_found = true;
                    state = ScanState::InTable;
                }
                ScanState::AwaitingSeparator => {}
                ScanState::InTable if line.starts_with(CELL_DELIMITER) => {
                    if let Some(row) = self.parse_row(line, line_no + 1, &mut table) {
                        table.rows.push(row);
                    }
                }
                ScanState::InTable => {
                    debug!(line = line_no + 1, "end of table");
                    break;
                }
            }
        }

        if !table.stats.header_found {
            warn!("no '| # | ... Hotel Code' header line found; table is empty");
        } else if !table.stats.separator_found {
            warn!("table header found but no '|---' separator line follows; table is empty");
        }

        table
    }

    /// データ行を分割・正規化し、受理する場合は`TableRow`を返す
    fn parse_row(
        &self,
        line: &str,
        line_no: usize,
        table: &mut ExtractedTable,
    ) -> Option<TableRow> {
        let cells: Vec<String> = split_cells(line)
            .into_iter()
            .map(|cell| self.normalizer.normalize(cell))
            .collect();

        if cells.len() < MIN_ROW_CELLS {
            debug!(
                line = line_no,
                cells = cells.len(),
                "skipping row with fewer than {} cells",
                MIN_ROW_CELLS
            );
            table.stats.short_rows_skipped += 1;
            return None;
        }

        let mut row = TableRow::new(cells);
        if row.len() > MIN_ROW_CELLS {
            table.stats.wide_rows_seen += 1;
            match self.extra_cells {
                ExtraCellPolicy::PassThrough => {
                    debug!(line = line_no, cells = row.len(), "keeping extra cells");
                }
                ExtraCellPolicy::Truncate => {
                    debug!(line = line_no, cells = row.len(), "truncating extra cells");
                    row.truncate(MIN_ROW_CELLS);
                }
                ExtraCellPolicy::Reject => {
                    debug!(line = line_no, cells = row.len(), "rejecting wide row");
                    table.stats.wide_rows_rejected += 1;
                    return None;
                }
            }
        }

        Some(row)
    }
}

fn is_header_line(line: &str) -> bool {
    line.starts_with(HEADER_PREFIX) && line.contains(HEADER_MARKER)
}

/// `|` で分割し、先頭と末尾の断片を捨てて各セルをトリムする
///
/// 末尾に `|` がない行では最後のセルも捨てられる。
fn split_cells(line: &str) -> Vec<&str> {
    let fragments: Vec<&str> = line.split(CELL_DELIMITER).collect();
    if fragments.len() < 2 {
        return Vec::new();
    }
    fragments[1..fragments.len() - 1]
        .iter()
        .map(|cell| cell.trim())
        .collect()
}
