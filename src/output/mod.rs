//! Output Module
//!
//! ワークブックの構築（書式適用を含む）と、ファイルへの保存を提供するモジュール。

pub mod styles;
mod workbook;

use std::io::Write;
use std::path::Path;
use tracing::debug;

use crate::error::MdToXlsxError;

pub(crate) use workbook::build_workbook;

/// シリアライズ済みのワークブックをファイルに保存する
///
/// 出力先と同じディレクトリの一時ファイルに書き込んでから、リネームで置き換えます。
/// 途中で失敗した場合、出力先には何も作成されません。
///
/// # 戻り値
///
/// * `Ok(())` - 保存に成功した場合
/// * `Err(MdToXlsxError)` - ディレクトリが存在しない・書き込み不可など
pub(crate) fn save_workbook(buffer: &[u8], path: &Path) -> Result<(), MdToXlsxError> {
    write_atomically(buffer, path)?;
    debug!(path = %path.display(), bytes = buffer.len(), "workbook saved");
    Ok(())
}

/// バイト列を一時ファイル経由で書き込む
fn write_atomically(bytes: &[u8], path: &Path) -> Result<(), MdToXlsxError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = tempfile::Builder::new()
        .prefix(".hotel-codes-")
        .suffix(".xlsx.tmp")
        .tempfile_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
