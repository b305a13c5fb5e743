//! Error Types Module
//!
//! クレート全体で使用する構造化エラー型を定義するモジュール。
//! `thiserror`を使用して、エラーの自動変換とメッセージフォーマットを実現する。

use thiserror::Error;

/// hotel-codes-xlsxクレート全体で使用するエラー型
///
/// Markdownファイルの読み込み、テーブル抽出、ワークブック生成、保存、
/// および保存後の検証処理中に発生するすべてのエラーを統一的に扱います。
///
/// # 使用例
///
/// ```rust,no_run
/// use hotel_codes_xlsx::MdToXlsxError;
/// use std::fs::File;
///
/// fn open_markdown(path: &str) -> Result<(), MdToXlsxError> {
///     let _file = File::open(path)?;  // Ioエラーが自動的に変換される
///     Ok(())
/// }
/// ```
#[derive(Error, Debug)]
pub enum MdToXlsxError {
    /// I/O操作中に発生したエラー
    ///
    /// 入力ファイルが存在しない、読み込み権限がない、出力先ディレクトリに
    /// 書き込めない場合などに発生します。
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// 入力テキストのデコードに失敗したエラー
    ///
    /// 指定されたエンコーディングとして不正なバイト列が含まれていた場合に発生します。
    #[error("Failed to decode input as {encoding}: malformed byte sequence")]
    Decode {
        /// 使用したエンコーディング名
        encoding: String,
    },

    /// 入力ファイルがサイズ上限を超えたエラー
    #[error("Input file size exceeds maximum: {size} bytes (max: {max} bytes)")]
    InputTooLarge {
        /// 入力ファイルのサイズ
        size: u64,
        /// 許容される最大サイズ
        max: u64,
    },

    /// 設定の検証に失敗したエラー
    ///
    /// `ConverterBuilder::build()`時に、未知のエンコーディング名や
    /// Excelで使用できないシート名が指定された場合に発生します。
    ///
    /// # 例
    ///
    /// ```rust
    /// use hotel_codes_xlsx::{ConverterBuilder, MdToXlsxError};
    ///
    /// let result = ConverterBuilder::new()
    ///     .with_encoding("no-such-encoding")
    ///     .build();
    ///
    /// assert!(matches!(result, Err(MdToXlsxError::Config(_))));
    /// ```
    #[error("Configuration error: {0}")]
    Config(String),

    /// 対象テーブルが見つからなかったエラー
    ///
    /// `require_table(true)`の場合のみ発生します。デフォルトでは
    /// ヘッダー行のみのワークブックを出力します。
    #[error("Hotel code table not found: {0}")]
    TableNotFound(String),

    /// 正規表現のコンパイルエラー
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    /// ワークブックの生成・シリアライズ中に発生したエラー
    #[error("Failed to build Excel workbook: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    /// 出力済みワークブックの読み戻し中に発生したエラー（calamine由来）
    #[error("Failed to read Excel file: {0}")]
    Read(#[from] calamine::Error),

    /// ZIPアーカイブの解析エラー
    #[error("ZIP archive error: {0}")]
    Zip(String),

    /// シートXMLの解析エラー
    #[error("XML error: {0}")]
    Xml(String),

    /// UTF-8文字列の変換エラー
    #[error("UTF-8 conversion error: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    /// 数値の解析エラー（列幅・行高など）
    #[error("Number parse error: {0}")]
    ParseFloat(#[from] std::num::ParseFloatError),

    /// 整数の解析エラー（行番号・スタイルIDなど）
    #[error("Number parse error: {0}")]
    ParseInt(#[from] std::num::ParseIntError),

    /// 書き込んだ内容と読み戻した内容が一致しなかったエラー
    #[error("Verification failed: {0}")]
    Verification(String),
}

impl From<zip::result::ZipError> for MdToXlsxError {
    fn from(err: zip::result::ZipError) -> Self {
        MdToXlsxError::Zip(err.to_string())
    }
}

impl From<quick_xml::Error> for MdToXlsxError {
    fn from(err: quick_xml::Error) -> Self {
        MdToXlsxError::Xml(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_io_error() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error: MdToXlsxError = io_err.into();

        match error {
            MdToXlsxError::Io(e) => {
                assert_eq!(e.kind(), io::ErrorKind::NotFound);
                assert_eq!(e.to_string(), "File not found");
            }
            _ => panic!("Expected Io error"),
        }
    }

    #[test]
    fn test_io_error_display() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "Permission denied");
        let error: MdToXlsxError = io_err.into();

        let error_msg = error.to_string();
        assert!(error_msg.contains("IO error"));
        assert!(error_msg.contains("Permission denied"));
    }

    #[test]
    fn test_decode_error_display() {
        let error = MdToXlsxError::Decode {
            encoding: "UTF-8".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to decode input as UTF-8: malformed byte sequence"
        );
    }

    #[test]
    fn test_input_too_large_display() {
        let error = MdToXlsxError::InputTooLarge { size: 10, max: 5 };
        let error_msg = error.to_string();
        assert!(error_msg.contains("10 bytes"));
        assert!(error_msg.contains("max: 5 bytes"));
    }

    #[test]
    fn test_config_error_display() {
        let error = MdToXlsxError::Config("Unknown encoding label: 'xyz'".to_string());
        let error_msg = error.to_string();

        assert!(error_msg.starts_with("Configuration error"));
        assert!(error_msg.contains("'xyz'"));
    }

    #[test]
    fn test_xlsx_error_conversion() {
        let error: MdToXlsxError =
            rust_xlsxwriter::XlsxError::ParameterError("bad column".to_string()).into();
        assert!(matches!(error, MdToXlsxError::Xlsx(_)));
        assert!(error.to_string().starts_with("Failed to build Excel workbook"));
    }

    #[test]
    fn test_read_error_conversion() {
        let error: MdToXlsxError = calamine::Error::Msg("Corrupted file").into();
        match error {
            MdToXlsxError::Read(calamine::Error::Msg(msg)) => {
                assert_eq!(msg, "Corrupted file");
            }
            _ => panic!("Expected Read error"),
        }
    }

    // エラー変換のテスト（?演算子の動作確認）
    #[test]
    fn test_error_conversion_with_question_mark() {
        fn io_operation() -> Result<(), MdToXlsxError> {
            let _file = std::fs::File::open("nonexistent_file.md")?;
            Ok(())
        }

        match io_operation() {
            Err(MdToXlsxError::Io(_)) => {}
            _ => panic!("Expected Io error from ? operator"),
        }
    }

    #[test]
    fn test_parse_errors_convert() {
        let float_err: MdToXlsxError = "abc".parse::<f64>().unwrap_err().into();
        assert!(matches!(float_err, MdToXlsxError::ParseFloat(_)));

        let int_err: MdToXlsxError = "abc".parse::<u32>().unwrap_err().into();
        assert!(matches!(int_err, MdToXlsxError::ParseInt(_)));
    }
}
