//! Excel生成（共通ライブラリ）
//!
//! 在庫一覧を1シートの表として出力する

use crate::error::{Error, Result};
use crate::form::FormField;
use crate::types::ProductRecord;
use rust_xlsxwriter::*;

/// ダウンロード時のファイル名
pub const EXCEL_FILE_NAME: &str = "inventory.xlsx";

const SHEET_NAME: &str = "Inventory";
const LAST_UPDATED_LABEL: &str = "Last Updated";

/// 列幅（文字数）
const COLUMN_WIDTHS: [f64; 9] = [14.0, 24.0, 8.0, 10.0, 8.0, 10.0, 14.0, 14.0, 22.0];

fn xlsx_error(context: &str, e: XlsxError) -> Error {
    Error::Export(format!("{}: {}", context, e))
}

/// 文字列セルの値を取得
fn text_value(record: &ProductRecord, field: FormField) -> &str {
    match field {
        FormField::ProductId => &record.product_id,
        FormField::ProductName => &record.product_name,
        FormField::Size => &record.size,
        FormField::Color => &record.color,
        FormField::Price => &record.price,
        FormField::Category => &record.category,
        FormField::Brand => &record.brand,
        FormField::Quantity => "",
    }
}

/// Excelをバッファに生成
///
/// 空リストの場合は `None`。
pub fn to_xlsx(records: &[ProductRecord]) -> Result<Option<Vec<u8>>> {
    if records.is_empty() {
        return Ok(None);
    }

    let mut workbook = Workbook::new();

    let header_format = Format::new()
        .set_bold()
        .set_background_color(Color::RGB(0xF5F5F5))
        .set_align(FormatAlign::Center)
        .set_border(FormatBorder::Thin)
        .set_border_color(Color::RGB(0xAAAAAA));

    let cell_format = Format::new()
        .set_border(FormatBorder::Hair)
        .set_border_color(Color::RGB(0xCCCCCC));

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)
        .map_err(|e| xlsx_error("シート名設定エラー", e))?;

    for (col, width) in COLUMN_WIDTHS.iter().enumerate() {
        worksheet.set_column_width(col as u16, *width)
            .map_err(|e| xlsx_error("列幅設定エラー", e))?;
    }

    // ヘッダー行
    let labels = FormField::ALL
        .iter()
        .map(|f| f.label())
        .chain(std::iter::once(LAST_UPDATED_LABEL));
    for (col, label) in labels.enumerate() {
        worksheet.write_string_with_format(0, col as u16, label, &header_format)
            .map_err(|e| xlsx_error("ヘッダー書き込みエラー", e))?;
    }
    worksheet.set_freeze_panes(1, 0)
        .map_err(|e| xlsx_error("ウィンドウ枠固定エラー", e))?;

    for (idx, record) in records.iter().enumerate() {
        let row = idx as u32 + 1;

        for (col, field) in FormField::ALL.iter().enumerate() {
            let col = col as u16;
            if *field == FormField::Quantity {
                worksheet.write_number_with_format(row, col, f64::from(record.quantity), &cell_format)
                    .map_err(|e| xlsx_error("数量書き込みエラー", e))?;
            } else {
                worksheet.write_string_with_format(row, col, text_value(record, *field), &cell_format)
                    .map_err(|e| xlsx_error("値書き込みエラー", e))?;
            }
        }

        let last_updated = record.last_updated.to_rfc3339_opts(chrono::SecondsFormat::Millis, true);
        worksheet.write_string_with_format(row, FormField::ALL.len() as u16, &last_updated, &cell_format)
            .map_err(|e| xlsx_error("更新日時書き込みエラー", e))?;
    }

    workbook.save_to_buffer()
        .map(Some)
        .map_err(|e| xlsx_error("Excel保存エラー", e))
}
