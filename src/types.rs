//! Types Module
//!
//! クレート全体で使用する共通データ型を定義するモジュール。

use serde::Serialize;
use std::path::PathBuf;

/// Markdownテーブルの1データ行
///
/// 先頭5セルが `#`, `Hotel Code`, `Hotel Name`, `Status`, `Notes` に対応します。
/// 6セル目以降もそのまま保持されます。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TableRow {
    cells: Vec<String>,
}

impl TableRow {
    /// セル列から行を生成
    pub fn new(cells: Vec<String>) -> Self {
        Self { cells }
    }

    /// すべてのセル
    pub fn cells(&self) -> &[String] {
        &self.cells
    }

    /// セル数
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// セルが1つもないか
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    fn field(&self, idx: usize) -> &str {
        self.cells.get(idx).map(String::as_str).unwrap_or("")
    }

    /// `#` 列
    pub fn index(&self) -> &str {
        self.field(0)
    }

    /// `Hotel Code` 列
    pub fn code(&self) -> &str {
        self.field(1)
    }

    /// `Hotel Name` 列
    pub fn name(&self) -> &str {
        self.field(2)
    }

    /// `Status` 列
    pub fn status(&self) -> &str {
        self.field(3)
    }

    /// `Notes` 列
    pub fn notes(&self) -> &str {
        self.field(4)
    }

    /// 先頭`len`セルに切り詰める
    pub(crate) fn truncate(&mut self, len: usize) {
        self.cells.truncate(len);
    }

    /// セル列を取り出す
    pub fn into_cells(self) -> Vec<String> {
        self.cells
    }
}

/// テーブル抽出時の統計情報
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ExtractionStats {
    /// ヘッダー行（`| # |` かつ `Hotel Code` を含む）を検出したか
    pub header_found: bool,

    /// 区切り行（`|---`）を検出してテーブル内モードに入ったか
    pub separator_found: bool,

    /// セル数不足で破棄した行数
    pub short_rows_skipped: usize,

    /// 5セルを超えていた行数（ポリシー適用前）
    pub wide_rows_seen: usize,

    /// ポリシーにより破棄した行数
    pub wide_rows_rejected: usize,
}

/// 抽出結果（行 + 統計）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedTable {
    /// 文書順のデータ行
    pub rows: Vec<TableRow>,

    /// 統計情報
    pub stats: ExtractionStats,
}

impl ExtractedTable {
    /// テーブル本体（区切り行以降）に到達したか
    pub fn is_found(&self) -> bool {
        self.stats.header_found && self.stats.separator_found
    }
}

/// 変換処理の結果サマリー
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversionSummary {
    /// 出力したExcelファイルのパス
    pub output_path: PathBuf,

    /// 出力シート名
    pub sheet_name: String,

    /// 出力したデータ行数（ヘッダーを除く）
    pub total_rows: usize,

    /// 抽出時の統計情報
    pub stats: ExtractionStats,
}
