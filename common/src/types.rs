//! 在庫レコードの型定義
//!
//! CLIとWeb(WASM)で共有される型:
//! - ProductRecord: 在庫1行分（永続化・エクスポートの単位）

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// 在庫レコード
///
/// フィールド順はJSON保存時・CSVヘッダーの列順になる。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductRecord {
    pub product_id: String,

    pub product_name: String,

    pub size: String,

    pub color: String,

    /// 旧データの `null`（数値変換失敗）や負数は 0 として読み込む
    #[serde(deserialize_with = "deserialize_quantity")]
    pub quantity: u32,

    /// 入力されたまま保持（数値として解釈しない）
    pub price: String,

    pub category: String,

    pub brand: String,

    pub last_updated: DateTime<Utc>,
}

impl ProductRecord {
    /// 数量を増減する（0未満にはならない）
    pub fn adjust_quantity(&mut self, delta: i64, now: DateTime<Utc>) {
        self.quantity = clamp_quantity(i64::from(self.quantity).saturating_add(delta));
        self.last_updated = now;
    }
}

/// 現在時刻（ミリ秒精度）
pub fn timestamp_now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

fn clamp_quantity(value: i64) -> u32 {
    value.clamp(0, i64::from(u32::MAX)) as u32
}

fn deserialize_quantity<'de, D>(deserializer: D) -> std::result::Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<i64>::deserialize(deserializer)?;
    Ok(value.map(clamp_quantity).unwrap_or(0))
}
