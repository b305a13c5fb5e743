//! Reader Module
//!
//! Markdownファイルを読み込み、指定エンコーディングで文字列にデコードするモジュール。

use encoding_rs::Encoding;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

use crate::error::MdToXlsxError;

/// エンコーディング名（WHATWGラベル）から`Encoding`を解決
///
/// `"utf-8"`, `"UTF8"`, `"shift_jis"`, `"windows-1252"` などを受け付けます。
pub(crate) fn resolve_encoding(label: &str) -> Result<&'static Encoding, MdToXlsxError> {
    Encoding::for_label(label.trim().as_bytes()).ok_or_else(|| {
        MdToXlsxError::Config(format!("Unknown encoding label: '{}'", label))
    })
}

/// ファイル全体を読み込んでデコードする
///
/// ファイルハンドルはこの関数内でのみ保持され、エラー時も含めて確実に閉じられます。
pub(crate) fn read_document(
    path: &Path,
    encoding: &'static Encoding,
    max_bytes: u64,
) -> Result<String, MdToXlsxError> {
    let file = File::open(path)?;

    let size = file.metadata()?.len();
    if size > max_bytes {
        return Err(MdToXlsxError::InputTooLarge {
            size,
            max: max_bytes,
        });
    }

    // metadataのサイズは読み込み中に変わり得るため、上限+1バイトで打ち切る
    let mut bytes = Vec::with_capacity(size as usize);
    file.take(max_bytes.saturating_add(1))
        .read_to_end(&mut bytes)?;
    if bytes.len() as u64 > max_bytes {
        return Err(MdToXlsxError::InputTooLarge {
            size: bytes.len() as u64,
            max: max_bytes,
        });
    }

    debug!(path = %path.display(), bytes = bytes.len(), encoding = encoding.name(), "read input");
    decode_document(&bytes, encoding)
}

/// バイト列をデコード
///
/// BOMがある場合はBOMのエンコーディングが優先されます。
/// 不正なバイト列が含まれる場合はエラーを返します（置換文字での続行はしない）。
pub(crate) fn decode_document(
    bytes: &[u8],
    encoding: &'static Encoding,
) -> Result<String, MdToXlsxError> {
    let (text, used, had_errors) = encoding.decode(bytes);
    if had_errors {
        return Err(MdToXlsxError::Decode {
            encoding: used.name().to_string(),
        });
    }
    Ok(text.into_owned())
}
