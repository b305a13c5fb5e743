//! Sheet Styles
//!
//! ヘッダー行・データ行の書式と、列幅・行高などの固定レイアウト値。

use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, FormatPattern};

/// ヘッダー行の背景色
pub const HEADER_FILL_RGB: u32 = 0x366092;

/// 偶数行（シート行番号が2, 4, 6, …）の背景色
pub const BAND_FILL_RGB: u32 = 0xF2F2F2;

/// ヘッダー行のフォントサイズ
pub const HEADER_FONT_SIZE: f64 = 12.0;

/// データ行のフォントサイズ
pub const DATA_FONT_SIZE: f64 = 11.0;

/// ヘッダー行の高さ（ポイント）
pub const HEADER_ROW_HEIGHT: f64 = 25.0;

/// 列幅（文字数単位）: A=#, B=Hotel Code, C=Hotel Name, D=Status, E=Notes
pub const COLUMN_WIDTHS: [f64; 5] = [8.0, 15.0, 25.0, 12.0, 20.0];

/// シート行番号（1始まり）が縞模様の塗りつぶし対象か
///
/// データ行のインデックスではなく、シート上の絶対行番号の偶奇で決まる。
pub fn is_banded_row(sheet_row_number: u32) -> bool {
    sheet_row_number % 2 == 0
}

/// シートで使用する書式一式
#[derive(Debug, Clone)]
pub(crate) struct SheetStyles {
    pub header: Format,
    pub data: Format,
    pub banded: Format,
}

impl SheetStyles {
    pub fn new() -> Self {
        let header = Format::new()
            .set_bold()
            .set_font_color(Color::White)
            .set_font_size(HEADER_FONT_SIZE)
            .set_background_color(Color::RGB(HEADER_FILL_RGB))
            .set_pattern(FormatPattern::Solid)
            .set_align(FormatAlign::Center)
            .set_align(FormatAlign::VerticalCenter)
            .set_border(FormatBorder::Thin);

        let data = Format::new()
            .set_font_size(DATA_FONT_SIZE)
            .set_align(FormatAlign::Center)
            .set_align(FormatAlign::VerticalCenter)
            .set_text_wrap()
            .set_border(FormatBorder::Thin);

        let banded = data
            .clone()
            .set_background_color(Color::RGB(BAND_FILL_RGB))
            .set_pattern(FormatPattern::Solid);

        Self {
            header,
            data,
            banded,
        }
    }

    /// シート行番号（1始まり）に対応するデータ書式
    pub fn data_format(&self, sheet_row_number: u32) -> &Format {
        if is_banded_row(sheet_row_number) {
            &self.banded
        } else {
            &self.data
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_banding_follows_sheet_row_parity() {
        assert!(is_banded_row(2));
        assert!(!is_banded_row(3));
        assert!(is_banded_row(4));
        assert!(!is_banded_row(1));
    }

    #[test]
    fn test_data_format_selection() {
        let styles = SheetStyles::new();
        assert!(std::ptr::eq(styles.data_format(2), &styles.banded));
        assert!(std::ptr::eq(styles.data_format(3), &styles.data));
    }

    #[test]
    fn test_banded_differs_from_plain() {
        let styles = SheetStyles::new();
        assert_ne!(styles.banded, styles.data);
        assert_ne!(styles.header, styles.data);
    }

    #[test]
    fn test_column_widths() {
        assert_eq!(COLUMN_WIDTHS, [8.0, 15.0, 25.0, 12.0, 20.0]);
    }
}
