//! Public API Types
//!
//! 公開APIで使用する列挙型と定数を定義するモジュール。

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 出力シートのデフォルト名
pub const DEFAULT_SHEET_NAME: &str = "Hotel Codes List";

/// 入力ファイルのデフォルトパス
pub const DEFAULT_INPUT_PATH: &str = "HOTEL_CODES_LIST.md";

/// 入力テキストのデフォルトエンコーディング
pub const DEFAULT_ENCODING: &str = "utf-8";

/// 入力ファイルサイズのデフォルト上限（64 MiB）
pub const DEFAULT_MAX_INPUT_BYTES: u64 = 64 * 1024 * 1024;

/// 出力シートのヘッダー行（固定5列）
pub const HEADERS: [&str; 5] = ["#", "Hotel Code", "Hotel Name", "Status", "Notes"];

/// 1行として受理するために必要な最小セル数
pub const MIN_ROW_CELLS: usize = HEADERS.len();

/// 5列を超えるセルを持つ行の扱い
///
/// ヘッダーは常に5列のため、それを超えるセルは`Notes`列の右側に
/// 書式なしで出力されます。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[non_exhaustive]
pub enum ExtraCellPolicy {
    /// すべてのセルをそのまま出力（デフォルト）
    #[default]
    PassThrough,

    /// 先頭5セルのみを残す
    Truncate,

    /// 行ごと破棄する
    Reject,
}

impl ExtraCellPolicy {
    /// CLIやJSON設定で使用する名前
    pub fn as_str(&self) -> &'static str {
        match self {
            ExtraCellPolicy::PassThrough => "pass-through",
            ExtraCellPolicy::Truncate => "truncate",
            ExtraCellPolicy::Reject => "reject",
        }
    }
}

impl fmt::Display for ExtraCellPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExtraCellPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pass-through" | "passthrough" => Ok(ExtraCellPolicy::PassThrough),
            "truncate" => Ok(ExtraCellPolicy::Truncate),
            "reject" => Ok(ExtraCellPolicy::Reject),
            other => Err(format!(
                "unknown extra-cell policy '{}' (expected pass-through, truncate or reject)",
                other
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy_is_pass_through() {
        assert_eq!(ExtraCellPolicy::default(), ExtraCellPolicy::PassThrough);
    }

    #[test]
    fn test_policy_from_str() {
        assert_eq!(
            "pass-through".parse::<ExtraCellPolicy>(),
            Ok(ExtraCellPolicy::PassThrough)
        );
        assert_eq!(
            "Truncate".parse::<ExtraCellPolicy>(),
            Ok(ExtraCellPolicy::Truncate)
        );
        assert_eq!(" reject ".parse::<ExtraCellPolicy>(), Ok(ExtraCellPolicy::Reject));
        assert!("drop".parse::<ExtraCellPolicy>().is_err());
    }

    #[test]
    fn test_policy_display_round_trips_through_from_str() {
        for policy in [
            ExtraCellPolicy::PassThrough,
            ExtraCellPolicy::Truncate,
            ExtraCellPolicy::Reject,
        ] {
            assert_eq!(policy.to_string().parse::<ExtraCellPolicy>(), Ok(policy));
        }
    }

    #[test]
    fn test_policy_serde_uses_kebab_case() {
        let json = serde_json::to_string(&ExtraCellPolicy::PassThrough).unwrap();
        assert_eq!(json, "\"pass-through\"");

        let policy: ExtraCellPolicy = serde_json::from_str("\"truncate\"").unwrap();
        assert_eq!(policy, ExtraCellPolicy::Truncate);
    }

    #[test]
    fn test_headers_are_fixed() {
        assert_eq!(HEADERS, ["#", "Hotel Code", "Hotel Name", "Status", "Notes"]);
        assert_eq!(MIN_ROW_CELLS, 5);
    }
}
