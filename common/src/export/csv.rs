//! CSV生成
//!
//! 1行目は先頭レコードのフィールド名（保存形式と同じ順）、
//! 2行目以降は各レコードの値をダブルクォートで囲んで出力する。

use crate::error::{Error, Result};
use crate::types::ProductRecord;
use serde_json::Value;

/// ダウンロード時のファイル名
pub const CSV_FILE_NAME: &str = "inventory.csv";

/// ダウンロード時のMIMEタイプ
pub const CSV_MIME_TYPE: &str = "text/csv;charset=utf-8";

const DELIMITER: &str = ",";

/// レコード一覧をCSVテキストに変換
///
/// 空リストの場合は `None`（エクスポートしない）。
pub fn to_csv(records: &[ProductRecord]) -> Result<Option<String>> {
    let Some(first) = records.first() else {
        return Ok(None);
    };

    let header: Vec<String> = match serde_json::to_value(first)? {
        Value::Object(map) => map.keys().cloned().collect(),
        other => return Err(Error::Export(format!("record is not an object: {}", other))),
    };

    let mut lines = Vec::with_capacity(records.len() + 1);
    lines.push(header.join(DELIMITER));

    for record in records {
        let value = serde_json::to_value(record)?;
        let row: Vec<String> = header
            .iter()
            .map(|key| quote_field(&value_to_string(value.get(key).unwrap_or(&Value::Null))))
            .collect();
        lines.push(row.join(DELIMITER));
    }

    Ok(Some(lines.join("\n")))
}

/// ダブルクォートで囲み、内部の `"` は `""` にする
fn quote_field(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

fn value_to_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
