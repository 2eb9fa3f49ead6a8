//! 在庫一覧のテキスト表

use chrono::Local;
use inventory_common::{FormField, ProductRecord};

const LAST_UPDATED_LABEL: &str = "Last Updated";

/// 更新日時をローカル時刻で表示
pub fn format_last_updated(record: &ProductRecord) -> String {
    record
        .last_updated
        .with_timezone(&Local)
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}

fn cell(record: &ProductRecord, field: FormField) -> String {
    match field {
        FormField::ProductId => record.product_id.clone(),
        FormField::ProductName => record.product_name.clone(),
        FormField::Size => record.size.clone(),
        FormField::Color => record.color.clone(),
        FormField::Quantity => record.quantity.to_string(),
        FormField::Price => record.price.clone(),
        FormField::Category => record.category.clone(),
        FormField::Brand => record.brand.clone(),
    }
}

/// 表示幅（全角文字は2桁として数える）
fn display_width(s: &str) -> usize {
    s.chars().map(|c| if c.is_ascii() { 1 } else { 2 }).sum()
}

fn pad(s: &str, width: usize) -> String {
    let fill = width.saturating_sub(display_width(s));
    format!("{}{}", s, " ".repeat(fill))
}

/// 一覧表を組み立てる（見出し・区切り線・各行）
pub fn render_table(records: &[ProductRecord]) -> String {
    let header: Vec<String> = FormField::ALL
        .iter()
        .map(|f| f.label().to_string())
        .chain(std::iter::once(LAST_UPDATED_LABEL.to_string()))
        .collect();

    let rows: Vec<Vec<String>> = records
        .iter()
        .map(|r| {
            FormField::ALL
                .iter()
                .map(|f| cell(r, *f))
                .chain(std::iter::once(format_last_updated(r)))
                .collect()
        })
        .collect();

    let mut widths: Vec<usize> = header.iter().map(|h| display_width(h)).collect();
    for row in &rows {
        for (i, value) in row.iter().enumerate() {
            widths[i] = widths[i].max(display_width(value));
        }
    }

    let format_row = |row: &[String]| -> String {
        row.iter()
            .zip(&widths)
            .map(|(v, w)| pad(v, *w))
            .collect::<Vec<_>>()
            .join(" | ")
            .trim_end()
            .to_string()
    };

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(format_row(&header));
    lines.push(
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("-+-"),
    );
    for row in &rows {
        lines.push(format_row(row));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use inventory_common::timestamp_now;

    #[test]
    fn test_render_table_shape() {
        let records = vec![
            ProductRecord {
                product_id: "P1".into(),
                product_name: "Shirt".into(),
                quantity: 5,
                last_updated: timestamp_now(),
                ..Default::default()
            },
            ProductRecord {
                product_id: "P2".into(),
                product_name: "ジーンズ".into(),
                quantity: 12,
                last_updated: timestamp_now(),
                ..Default::default()
            },
        ];

        let table = render_table(&records);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("Product ID | Name "));
        assert!(lines[0].ends_with("Last Updated"));
        assert!(lines[1].starts_with("-----------"));
        assert!(lines[2].starts_with("P1         | Shirt "));
        assert!(lines[3].contains("ジーンズ"));
    }

    #[test]
    fn test_display_width() {
        assert_eq!(display_width("abc"), 3);
        assert_eq!(display_width("在庫"), 4);
    }
}
