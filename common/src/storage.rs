//! キー・バリュー型ストレージの抽象化
//!
//! ブラウザの `localStorage` と同じ形（文字列キー → 文字列値）に揃え、
//! CLI（ファイル）・WASM（localStorage）・テスト（メモリ）で差し替える。

use crate::error::{Error, Result};
use std::collections::HashMap;

/// オリジン単位の永続キー・バリュー領域
pub trait KeyValueStorage {
    /// 値を取得（存在しなければ `None`）
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// 値を上書き保存
    fn set_item(&mut self, key: &str, value: &str) -> Result<()>;

    /// 値を削除（存在しなくてもエラーにしない）
    fn remove_item(&mut self, key: &str) -> Result<()>;
}

impl<S: KeyValueStorage + ?Sized> KeyValueStorage for Box<S> {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set_item(key, value)
    }

    fn remove_item(&mut self, key: &str) -> Result<()> {
        (**self).remove_item(key)
    }
}

/// メモリ上のストレージ
///
/// `with_quota` で容量上限を設定すると、ブラウザの QuotaExceededError と
/// 同様に書き込みを拒否する。
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
    quota: Option<usize>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// 容量上限（キー+値のバイト数合計）付きで作成
    pub fn with_quota(quota: usize) -> Self {
        Self {
            items: HashMap::new(),
            quota: Some(quota),
        }
    }

    /// 保存済みのバイト数合計
    pub fn used_bytes(&self) -> usize {
        self.items.iter().map(|(k, v)| k.len() + v.len()).sum()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        if let Some(quota) = self.quota {
            let current = self.items.get(key).map(|v| key.len() + v.len()).unwrap_or(0);
            let needed = self.used_bytes() - current + key.len() + value.len();
            if needed > quota {
                return Err(Error::Persistence(format!(
                    "quota exceeded: {} bytes needed, {} allowed",
                    needed, quota
                )));
            }
        }
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<()> {
        self.items.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_storage_set_get_remove() {
        let mut storage = MemoryStorage::new();
        assert_eq!(storage.get_item("k").unwrap(), None);

        storage.set_item("k", "v1").unwrap();
        storage.set_item("k", "v2").unwrap();
        assert_eq!(storage.get_item("k").unwrap().as_deref(), Some("v2"));
        assert_eq!(storage.len(), 1);

        storage.remove_item("k").unwrap();
        assert!(storage.is_empty());
        storage.remove_item("k").expect("存在しないキーの削除は成功扱い");
    }

    #[test]
    fn test_memory_storage_quota_exceeded() {
        let mut storage = MemoryStorage::with_quota(10);
        storage.set_item("k", "12345").unwrap();

        let err = storage.set_item("k2", "123456789").unwrap_err();
        assert!(matches!(err, Error::Persistence(_)));
        assert_eq!(storage.get_item("k2").unwrap(), None);
    }

    #[test]
    fn test_memory_storage_quota_counts_overwrite_once() {
        let mut storage = MemoryStorage::with_quota(10);
        storage.set_item("k", "123456789").unwrap();
        // 同じキーの上書きは旧値の分を差し引いて判定
        storage.set_item("k", "987654321").unwrap();
        assert_eq!(storage.used_bytes(), 10);
    }

    #[test]
    fn test_boxed_storage() {
        let mut storage: Box<dyn KeyValueStorage> = Box::new(MemoryStorage::new());
        storage.set_item("k", "v").unwrap();
        assert_eq!(storage.get_item("k").unwrap().as_deref(), Some("v"));
    }
}
