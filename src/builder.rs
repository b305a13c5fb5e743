//! Builder Module
//!
//! Fluent Builder APIを提供し、`Converter`インスタンスを段階的に構築する。

use encoding_rs::Encoding;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::api::{
    ExtraCellPolicy, DEFAULT_ENCODING, DEFAULT_INPUT_PATH, DEFAULT_MAX_INPUT_BYTES,
    DEFAULT_SHEET_NAME,
};
use crate::error::MdToXlsxError;
use crate::extractor::TableExtractor;
use crate::normalizer::CellNormalizer;
use crate::types::{ConversionSummary, ExtractedTable};

/// Excelのシート名に使用できない文字
const INVALID_SHEET_NAME_CHARS: [char; 7] = ['[', ']', ':', '*', '?', '/', '\\'];

/// Excelのシート名の最大長
const MAX_SHEET_NAME_LEN: usize = 31;

/// 変換処理の設定
///
/// `ConverterBuilder`から構築するほか、JSONファイルから読み込むこともできます。
/// 省略されたフィールドはデフォルト値になります。
///
/// ```json
/// {
///   "input_path": "HOTEL_CODES_LIST.md",
///   "output_path": "out/HOTEL_CODES_LIST.xlsx",
///   "encoding": "utf-8",
///   "extra_cells": "truncate"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConversionConfig {
    /// 入力Markdownファイルのパス
    pub input_path: PathBuf,

    /// 出力Excelファイルのパス（Noneの場合は入力パスの拡張子を`.xlsx`に置換）
    pub output_path: Option<PathBuf>,

    /// 入力テキストのエンコーディング名
    pub encoding: String,

    /// 出力シート名
    pub sheet_name: String,

    /// 5列を超える行の扱い
    pub extra_cells: ExtraCellPolicy,

    /// テーブルが見つからない場合にエラーとするか
    pub require_table: bool,

    /// 入力ファイルサイズの上限（バイト）
    pub max_input_bytes: u64,

    /// 保存後にワークブックを読み戻して内容を検証するか
    pub verify_output: bool,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(DEFAULT_INPUT_PATH),
            output_path: None,
            encoding: DEFAULT_ENCODING.to_string(),
            sheet_name: DEFAULT_SHEET_NAME.to_string(),
            extra_cells: ExtraCellPolicy::PassThrough,
            require_table: false,
            max_input_bytes: DEFAULT_MAX_INPUT_BYTES,
            verify_output: false,
        }
    }
}

impl ConversionConfig {
    /// JSON文字列から設定を読み込む
    pub fn from_json_str(json: &str) -> Result<Self, MdToXlsxError> {
        serde_json::from_str(json)
            .map_err(|e| MdToXlsxError::Config(format!("Invalid configuration JSON: {}", e)))
    }

    /// JSONファイルから設定を読み込む
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, MdToXlsxError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&json)
    }

    /// 実際に使用する出力パス
    pub fn resolved_output_path(&self) -> PathBuf {
        match &self.output_path {
            Some(path) => path.clone(),
            None => self.input_path.with_extension("xlsx"),
        }
    }
}

/// Fluent Builder APIを提供する構造体
///
/// `Converter`インスタンスを段階的に構築するためのビルダーです。
/// すべての設定項目にデフォルト値が設定されており、必要な設定のみをオーバーライドできます。
///
/// # 使用例
///
/// ```rust,no_run
/// use hotel_codes_xlsx::{ConverterBuilder, ExtraCellPolicy};
///
/// # fn main() -> Result<(), hotel_codes_xlsx::MdToXlsxError> {
/// let converter = ConverterBuilder::new()
///     .with_input_path("HOTEL_CODES_LIST.md")
///     .with_output_path("HOTEL_CODES_LIST.xlsx")
///     .with_extra_cells(ExtraCellPolicy::Truncate)
///     .build()?;
/// let summary = converter.convert()?;
/// println!("Total hotels: {}", summary.total_rows);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct ConverterBuilder {
    config: ConversionConfig,
}

impl ConverterBuilder {
    /// デフォルト設定を持つビルダーインスタンスを生成する
    ///
    /// # デフォルト設定
    ///
    /// - 入力: `HOTEL_CODES_LIST.md`
    /// - 出力: 入力パスの拡張子を`.xlsx`に置換
    /// - エンコーディング: UTF-8
    /// - シート名: `Hotel Codes List`
    /// - 5列を超える行: そのまま出力
    /// - テーブル未検出: ヘッダーのみのワークブックを出力
    pub fn new() -> Self {
        Self::default()
    }

    /// 既存の設定からビルダーを生成する
    pub fn from_config(config: ConversionConfig) -> Self {
        Self { config }
    }

    pub fn with_input_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.config.input_path = path.into();
        self
    }

    pub fn with_output_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.config.output_path = Some(path.into());
        self
    }

    /// 入力テキストのエンコーディングを指定する（例: `"utf-8"`, `"shift_jis"`）
    pub fn with_encoding<S: Into<String>>(mut self, label: S) -> Self {
        self.config.encoding = label.into();
        self
    }

    pub fn with_sheet_name<S: Into<String>>(mut self, name: S) -> Self {
        self.config.sheet_name = name.into();
        self
    }

    pub fn with_extra_cells(mut self, policy: ExtraCellPolicy) -> Self {
        self.config.extra_cells = policy;
        self
    }

    /// テーブル（ヘッダー行と区切り行）が見つからない場合にエラーとするか
    ///
    /// * `false`（デフォルト）: 警告ログを出力し、ヘッダー行のみのワークブックを生成
    /// * `true`: `MdToXlsxError::TableNotFound`を返す
    pub fn require_table(mut self, require: bool) -> Self {
        self.config.require_table = require;
        self
    }

    pub fn with_max_input_bytes(mut self, max: u64) -> Self {
        self.config.max_input_bytes = max;
        self
    }

    /// 保存後に出力ファイルを読み戻し、シート名・ヘッダー・行数・セル値を検証する
    pub fn verify_output(mut self, verify: bool) -> Self {
        self.config.verify_output = verify;
        self
    }

    /// 設定を検証し、`Converter`インスタンスを生成する
    ///
    /// # 発生し得るエラー
    ///
    /// * `MdToXlsxError::Config(String)`:
    ///   * 未知のエンコーディング名
    ///   * シート名が空、31文字超、または `[]:*?/\` を含む
    ///   * 入力サイズ上限が0
    pub fn build(self) -> Result<Converter, MdToXlsxError> {
        // 1. エンコーディングの解決
        let encoding = crate::reader::resolve_encoding(&self.config.encoding)?;

        // 2. シート名の検証
        validate_sheet_name(&self.config.sheet_name)?;

        // 3. 入力サイズ上限の検証
        if self.config.max_input_bytes == 0 {
            return Err(MdToXlsxError::Config(
                "max_input_bytes must be greater than 0".to_string(),
            ));
        }

        Converter::new(self.config, encoding)
    }
}

fn validate_sheet_name(name: &str) -> Result<(), MdToXlsxError> {
    if name.trim().is_empty() {
        return Err(MdToXlsxError::Config(
            "Sheet name must not be empty".to_string(),
        ));
    }
    if name.chars().count() > MAX_SHEET_NAME_LEN {
        return Err(MdToXlsxError::Config(format!(
            "Sheet name '{}' exceeds {} characters",
            name, MAX_SHEET_NAME_LEN
        )));
    }
    if let Some(c) = name.chars().find(|c| INVALID_SHEET_NAME_CHARS.contains(c)) {
        return Err(MdToXlsxError::Config(format!(
            "Sheet name '{}' contains invalid character '{}'",
            name, c
        )));
    }
    Ok(())
}

/// 変換処理のファサード
///
/// 読み込み → テーブル抽出 → ワークブック構築 → 保存 を1回の同期処理で行います。
#[derive(Debug)]
pub struct Converter {
    config: ConversionConfig,
    encoding: &'static Encoding,
    normalizer: CellNormalizer,
}

impl Converter {
    pub(crate) fn new(
        config: ConversionConfig,
        encoding: &'static Encoding,
    ) -> Result<Self, MdToXlsxError> {
        Ok(Self {
            config,
            encoding,
            normalizer: CellNormalizer::new()?,
        })
    }

    /// 検証済みの設定
    pub fn config(&self) -> &ConversionConfig {
        &self.config
    }

    /// 設定された入力ファイルを変換し、出力ファイルに保存する
    ///
    /// # 戻り値
    ///
    /// * `Ok(ConversionSummary)` - 出力パスとデータ行数
    /// * `Err(MdToXlsxError)` - 読み込み・保存に失敗した場合（出力ファイルは作成されない）
    pub fn convert(&self) -> Result<ConversionSummary, MdToXlsxError> {
        let output_path = self.config.resolved_output_path();
        self.convert_file(&self.config.input_path, &output_path)
    }

    /// 任意の入力・出力パスで変換する
    pub fn convert_file(
        &self,
        input: &Path,
        output: &Path,
    ) -> Result<ConversionSummary, MdToXlsxError> {
        info!(input = %input.display(), output = %output.display(), "converting");

        let document =
            crate::reader::read_document(input, self.encoding, self.config.max_input_bytes)?;
        let table = self.extract(&document)?;

        let mut workbook = crate::output::build_workbook(&table.rows, &self.config.sheet_name)?;
        let buffer = workbook.save_to_buffer()?;

        // 検証に失敗した場合は出力先に何も書き込まない
        if self.config.verify_output {
            crate::inspect::inspect_workbook_bytes(buffer.clone())?
                .verify(&self.config.sheet_name, &table.rows)?;
            debug!(output = %output.display(), "output verified");
        }

        crate::output::save_workbook(&buffer, output)?;

        info!(rows = table.rows.len(), "conversion completed");
        Ok(ConversionSummary {
            output_path: output.to_path_buf(),
            sheet_name: self.config.sheet_name.clone(),
            total_rows: table.rows.len(),
            stats: table.stats,
        })
    }

    /// Markdown文字列をXLSXバイト列に変換する（ファイルI/Oなし）
    pub fn convert_to_buffer(&self, document: &str) -> Result<Vec<u8>, MdToXlsxError> {
        let table = self.extract(document)?;
        let mut workbook = crate::output::build_workbook(&table.rows, &self.config.sheet_name)?;
        Ok(workbook.save_to_buffer()?)
    }

    /// Markdown文字列からテーブルを抽出する
    ///
    /// `require_table(true)`の場合、ヘッダー行または区切り行がなければエラーを返します。
    pub fn extract(&self, document: &str) -> Result<ExtractedTable, MdToXlsxError> {
        let table =
            TableExtractor::new(&self.normalizer, self.config.extra_cells).extract(document);

        if !table.is_found() && self.config.require_table {
            let reason = if table.stats.header_found {
                "header line has no '|---' separator"
            } else {
                "no '| # | ... Hotel Code' header line"
            };
            return Err(MdToXlsxError::TableNotFound(reason.to_string()));
        }

        if table.stats.short_rows_skipped > 0 {
            warn!(
                skipped = table.stats.short_rows_skipped,
                "rows with fewer than 5 cells were skipped"
            );
        }

        Ok(table)
    }
}
