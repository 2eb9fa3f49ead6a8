//! 在庫スナップショットの永続化
//!
//! 固定キーに在庫リスト全体をJSON配列として保存する。
//! 変更のたびに全件を書き直す（差分追記はしない）。

use crate::error::{Error, Result};
use crate::storage::KeyValueStorage;
use crate::types::ProductRecord;

/// 既定の保存キー
pub const STORAGE_KEY: &str = "inventory_data";

/// 破損データ退避用キーの接尾辞
const CORRUPT_SUFFIX: &str = ".corrupt";

/// ストレージ上の1スロットを読み書きするアダプタ
#[derive(Debug)]
pub struct PersistenceAdapter<S> {
    storage: S,
    key: String,
}

impl<S: KeyValueStorage> PersistenceAdapter<S> {
    /// 既定キー（`inventory_data`）で作成
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, STORAGE_KEY)
    }

    pub fn with_key(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// 破損データの退避先キー
    pub fn corrupt_key(&self) -> String {
        format!("{}{}", self.key, CORRUPT_SUFFIX)
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    /// 生の保存値を取得（空文字列は未保存として扱う）
    pub fn load_raw(&self) -> Result<Option<String>> {
        let raw = self.storage.get_item(&self.key)?;
        Ok(raw.filter(|v| !v.trim().is_empty()))
    }

    /// スナップショットを読み込み
    ///
    /// - 未保存: `Ok(None)`
    /// - JSON配列として読めない: `Error::CorruptState`
    pub fn load(&self) -> Result<Option<Vec<ProductRecord>>> {
        let Some(raw) = self.load_raw()? else {
            tracing::debug!(key = %self.key, "no persisted snapshot");
            return Ok(None);
        };

        let records = parse_snapshot(&raw).map_err(|source| Error::CorruptState {
            key: self.key.clone(),
            source,
        })?;
        tracing::debug!(key = %self.key, count = records.len(), "snapshot loaded");
        Ok(Some(records))
    }

    /// スナップショット全体を上書き保存
    pub fn save(&mut self, records: &[ProductRecord]) -> Result<()> {
        let json = serde_json::to_string(records)?;
        self.storage.set_item(&self.key, &json)?;
        tracing::debug!(key = %self.key, count = records.len(), bytes = json.len(), "snapshot saved");
        Ok(())
    }

    /// 読めなかった生データを `<key>.corrupt` に退避
    pub fn backup_corrupt(&mut self, raw: &str) -> Result<()> {
        let backup_key = self.corrupt_key();
        self.storage.set_item(&backup_key, raw)
    }

    /// 保存スロットを削除
    pub fn clear(&mut self) -> Result<()> {
        self.storage.remove_item(&self.key)
    }
}

fn parse_snapshot(raw: &str) -> std::result::Result<Vec<ProductRecord>, serde_json::Error> {
    serde_json::from_str(raw)
}
