//! Normalizer Module
//!
//! Markdownセル文字列からインライン書式を取り除くモジュール。
//! 対象はインラインコード（`` `...` ``）のみ。

use regex::Regex;

use crate::error::MdToXlsxError;

/// インラインコード（バッククォート1組）にマッチするパターン
const INLINE_CODE_PATTERN: &str = r"`([^`]+)`";

/// セルノーマライザー
///
/// コンパイル済みの正規表現を保持し、セル文字列の正規化を行います。
/// 状態を持たないため、同じ入力には常に同じ出力を返します。
#[derive(Debug, Clone)]
pub(crate) struct CellNormalizer {
    inline_code: Regex,
}

impl CellNormalizer {
    /// 新しいCellNormalizerインスタンスを生成
    pub fn new() -> Result<Self, MdToXlsxError> {
        Ok(Self {
            inline_code: Regex::new(INLINE_CODE_PATTERN)?,
        })
    }

    /// セル文字列を正規化
    ///
    /// `` `text` `` を `text` に置換（1パス、ネストは再帰しない）した後、
    /// 前後の空白を取り除きます。
    ///
    /// # 使用例
    ///
    /// `` "`ABC123`" `` -> `"ABC123"`
    pub fn normalize(&self, cell: &str) -> String {
        self.inline_code.replace_all(cell, "$1").trim().to_string()
    }
}
