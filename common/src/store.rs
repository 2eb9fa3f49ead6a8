//! 在庫ストア
//!
//! 在庫レコードの順序付きリストを保持する唯一の状態。
//! 変更が確定するたびに `PersistenceAdapter` で全件を保存する。
//!
//! 同じ `productId` の追加は拒否するが、旧データに重複IDが残っている場合は
//! 数量変更が一致した全レコードに適用される。

use crate::error::{Error, Result, ValidationError};
use crate::persistence::PersistenceAdapter;
use crate::storage::KeyValueStorage;
use crate::types::{timestamp_now, ProductRecord};

/// 変更操作の結果
///
/// 保存に失敗してもメモリ上の変更は維持される（`persist_error` で通知）。
#[derive(Debug)]
pub struct Mutation {
    /// 変更されたレコード数
    pub affected: usize,
    /// 保存失敗時のエラー
    pub persist_error: Option<Error>,
}

impl Mutation {
    fn unchanged() -> Self {
        Self {
            affected: 0,
            persist_error: None,
        }
    }

    pub fn is_persisted(&self) -> bool {
        self.persist_error.is_none()
    }
}

/// 在庫ストア
#[derive(Debug)]
pub struct InventoryStore<S> {
    records: Vec<ProductRecord>,
    adapter: PersistenceAdapter<S>,
    startup_issue: Option<Error>,
    /// 起動時に読めなかった保存データを上書きしないためのロック
    slot_locked: bool,
}

impl<S: KeyValueStorage> InventoryStore<S> {
    /// 保存済みスナップショットから初期化
    ///
    /// 読み込みに失敗しても起動は止めず、空リストで開始する。
    /// 破損データは `<key>.corrupt` に退避してから上書きされるようにする。
    /// 内容を取得できなかった場合は退避できないため、`clear` されるまで保存しない。
    pub fn initialize(mut adapter: PersistenceAdapter<S>) -> Self {
        let mut slot_locked = false;
        let (records, startup_issue) = match adapter.load() {
            Ok(Some(records)) => (records, None),
            Ok(None) => (Vec::new(), None),
            Err(err @ Error::CorruptState { .. }) => {
                tracing::warn!(error = %err, "persisted inventory is unreadable, starting empty");
                if let Ok(Some(raw)) = adapter.load_raw() {
                    if let Err(backup_err) = adapter.backup_corrupt(&raw) {
                        tracing::warn!(error = %backup_err, "failed to back up corrupt inventory");
                    }
                }
                (Vec::new(), Some(err))
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to read persisted inventory, keeping it untouched");
                slot_locked = true;
                (Vec::new(), Some(err))
            }
        };

        Self {
            records,
            adapter,
            startup_issue,
            slot_locked,
        }
    }

    /// 起動時に回復したエラー（あれば）
    pub fn startup_issue(&self) -> Option<&Error> {
        self.startup_issue.as_ref()
    }

    /// 保存データを読めずに上書きを止めているか
    pub fn is_slot_locked(&self) -> bool {
        self.slot_locked
    }

    /// レコードを末尾に追加
    ///
    /// `productId` / `productName` が空白のみの場合も未入力として拒否する。
    pub fn add(&mut self, record: ProductRecord) -> Result<Mutation> {
        if record.product_id.trim().is_empty() {
            return Err(ValidationError::MissingProductId.into());
        }
        if record.product_name.trim().is_empty() {
            return Err(ValidationError::MissingProductName.into());
        }
        if self.find(&record.product_id).is_some() {
            return Err(ValidationError::DuplicateProductId(record.product_id).into());
        }

        tracing::debug!(product_id = %record.product_id, "adding product");
        self.records.push(record);
        Ok(self.commit(1))
    }

    /// `id` に一致する全レコードの数量を `delta` だけ増減
    pub fn adjust_quantity(&mut self, id: &str, delta: i64) -> Mutation {
        let now = timestamp_now();
        let mut affected = 0;
        for record in self.records.iter_mut().filter(|r| r.product_id == id) {
            record.adjust_quantity(delta, now);
            affected += 1;
        }

        if affected == 0 {
            tracing::debug!(product_id = %id, "no product matched quantity adjustment");
            return Mutation::unchanged();
        }
        self.commit(affected)
    }

    pub fn increment(&mut self, id: &str) -> Mutation {
        self.adjust_quantity(id, 1)
    }

    pub fn decrement(&mut self, id: &str) -> Mutation {
        self.adjust_quantity(id, -1)
    }

    /// 全件を削除し保存スロットも消す（上書きロックも解除）
    pub fn clear(&mut self) -> Result<()> {
        self.records.clear();
        self.adapter.clear()?;
        self.slot_locked = false;
        Ok(())
    }

    /// 現在のリストのコピー
    pub fn snapshot(&self) -> Vec<ProductRecord> {
        self.records.clone()
    }

    pub fn records(&self) -> &[ProductRecord] {
        &self.records
    }

    pub fn find(&self, id: &str) -> Option<&ProductRecord> {
        self.records.iter().find(|r| r.product_id == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// 全レコードの数量合計
    pub fn total_quantity(&self) -> u64 {
        self.records.iter().map(|r| u64::from(r.quantity)).sum()
    }

    pub fn adapter(&self) -> &PersistenceAdapter<S> {
        &self.adapter
    }

    pub fn into_adapter(self) -> PersistenceAdapter<S> {
        self.adapter
    }

    fn commit(&mut self, affected: usize) -> Mutation {
        if self.slot_locked {
            tracing::warn!(key = %self.adapter.key(), "unreadable persisted inventory is locked, change kept in memory only");
            return Mutation {
                affected,
                persist_error: Some(Error::SlotLocked {
                    key: self.adapter.key().to_string(),
                }),
            };
        }

        let persist_error = match self.adapter.save(&self.records) {
            Ok(()) => None,
            Err(err) => {
                tracing::warn!(error = %err, "inventory changed in memory but was not persisted");
                Some(err)
            }
        };
        Mutation {
            affected,
            persist_error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::STORAGE_KEY;
    use crate::storage::MemoryStorage;

    fn new_store() -> InventoryStore<MemoryStorage> {
        InventoryStore::initialize(PersistenceAdapter::new(MemoryStorage::new()))
    }

    fn record(id: &str, quantity: u32) -> ProductRecord {
        ProductRecord {
            product_id: id.to_string(),
            product_name: format!("Product {}", id),
            quantity,
            last_updated: timestamp_now(),
            ..Default::default()
        }
    }

    #[test]
    fn test_initialize_empty() {
        let store = new_store();
        assert!(store.is_empty());
        assert!(store.startup_issue().is_none());
    }

    #[test]
    fn test_initialize_from_persisted_snapshot() {
        let mut adapter = PersistenceAdapter::new(MemoryStorage::new());
        adapter.save(&[record("A", 1), record("B", 2)]).unwrap();

        let store = InventoryStore::initialize(adapter);
        let ids: Vec<&str> = store.records().iter().map(|r| r.product_id.as_str()).collect();
        assert_eq!(ids, vec!["A", "B"]);
    }

    #[test]
    fn test_initialize_not_json_falls_back_to_empty() {
        let mut storage = MemoryStorage::new();
        storage.set_item(STORAGE_KEY, "not json").unwrap();

        let store = InventoryStore::initialize(PersistenceAdapter::new(storage));

        assert!(store.is_empty());
        assert!(matches!(store.startup_issue(), Some(Error::CorruptState { .. })));
        // 元データは退避されている
        let backup = store.adapter().storage().get_item("inventory_data.corrupt").unwrap();
        assert_eq!(backup.as_deref(), Some("not json"));
    }

    /// 読み込みだけ失敗するストレージ
    #[derive(Debug, Default)]
    struct UnreadableStorage {
        inner: MemoryStorage,
    }

    impl KeyValueStorage for UnreadableStorage {
        fn get_item(&self, _key: &str) -> Result<Option<String>> {
            Err(Error::Persistence("read failed".to_string()))
        }

        fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
            self.inner.set_item(key, value)
        }

        fn remove_item(&mut self, key: &str) -> Result<()> {
            self.inner.remove_item(key)
        }
    }

    #[test]
    fn test_unreadable_slot_is_not_overwritten() {
        let mut storage = UnreadableStorage::default();
        storage.inner.set_item(STORAGE_KEY, "previous data").unwrap();

        let mut store = InventoryStore::initialize(PersistenceAdapter::new(storage));
        assert!(store.is_slot_locked());
        assert!(matches!(store.startup_issue(), Some(Error::Persistence(_))));

        let mutation = store.add(record("A", 1)).unwrap();
        assert!(matches!(mutation.persist_error, Some(Error::SlotLocked { .. })));
        assert_eq!(store.len(), 1);
        assert_eq!(
            store.adapter().storage().inner.get_item(STORAGE_KEY).unwrap().as_deref(),
            Some("previous data")
        );

        // 明示的に消した後は保存できる
        store.clear().unwrap();
        assert!(!store.is_slot_locked());
        let mutation = store.add(record("B", 1)).unwrap();
        assert!(mutation.is_persisted());
        assert!(store.adapter().storage().inner.get_item(STORAGE_KEY).unwrap().is_some());
    }

    #[test]
    fn test_add_whitespace_only_id_is_missing() {
        let mut store = new_store();
        let err = store.add(record("  ", 1)).unwrap_err();
        assert_eq!(err.as_validation(), Some(&ValidationError::MissingProductId));
        assert!(store.is_empty());
    }

    #[test]
    fn test_add_preserves_insertion_order() {
        let mut store = new_store();
        for id in ["C", "A", "B", "D"] {
            let mutation = store.add(record(id, 1)).unwrap();
            assert_eq!(mutation.affected, 1);
            assert!(mutation.is_persisted());
        }

        let ids: Vec<String> = store.snapshot().into_iter().map(|r| r.product_id).collect();
        assert_eq!(ids, vec!["C", "A", "B", "D"]);
        assert_eq!(store.len(), 4);
    }

    #[test]
    fn test_add_persists_full_snapshot() {
        let mut store = new_store();
        store.add(record("A", 1)).unwrap();
        store.add(record("B", 2)).unwrap();

        let persisted = store.adapter().load().unwrap().unwrap();
        assert_eq!(persisted, store.snapshot());
    }

    #[test]
    fn test_add_empty_id_or_name_leaves_list_unchanged() {
        let mut store = new_store();
        store.add(record("A", 1)).unwrap();

        let err = store.add(record("", 1)).unwrap_err();
        assert_eq!(err.as_validation(), Some(&ValidationError::MissingProductId));

        let nameless = ProductRecord { product_name: String::new(), ..record("B", 1) };
        let err = store.add(nameless).unwrap_err();
        assert_eq!(err.as_validation(), Some(&ValidationError::MissingProductName));

        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_add_duplicate_id_rejected() {
        let mut store = new_store();
        store.add(record("A", 1)).unwrap();

        let err = store.add(record("A", 9)).unwrap_err();
        assert_eq!(
            err.as_validation(),
            Some(&ValidationError::DuplicateProductId("A".to_string()))
        );
        assert_eq!(store.len(), 1);
        assert_eq!(store.records()[0].quantity, 1);
    }

    #[test]
    fn test_adjust_quantity_never_negative() {
        let mut store = new_store();
        store.add(record("P1", 0)).unwrap();

        let mutation = store.adjust_quantity("P1", -1);
        assert_eq!(mutation.affected, 1);
        assert_eq!(store.find("P1").unwrap().quantity, 0);

        let _ = store.adjust_quantity("P1", 3);
        let _ = store.adjust_quantity("P1", -10);
        assert_eq!(store.find("P1").unwrap().quantity, 0);
    }

    #[test]
    fn test_adjust_quantity_matches_formula() {
        for (start, delta) in [(5u32, 1i64), (5, -1), (5, -5), (5, -6), (0, 7), (2, -100)] {
            let mut store = new_store();
            store.add(record("P", start)).unwrap();
            let _ = store.adjust_quantity("P", delta);
            let expected = (i64::from(start) + delta).max(0) as u32;
            assert_eq!(store.find("P").unwrap().quantity, expected, "start={} delta={}", start, delta);
        }
    }

    #[test]
    fn test_adjust_quantity_refreshes_timestamp() {
        let mut store = new_store();
        let mut old = record("P1", 1);
        old.last_updated = Default::default();
        store.add(old).unwrap();

        let before = timestamp_now();
        let _ = store.increment("P1");
        let updated = store.find("P1").unwrap();

        assert_eq!(updated.quantity, 2);
        assert!(updated.last_updated >= before);
    }

    #[test]
    fn test_adjust_quantity_unknown_id_leaves_list_unchanged() {
        let mut store = new_store();
        store.add(record("A", 4)).unwrap();
        let before = store.snapshot();

        let mutation = store.decrement("missing");

        assert_eq!(mutation.affected, 0);
        assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn test_adjust_quantity_only_touches_matching_records() {
        let mut store = new_store();
        store.add(record("A", 4)).unwrap();
        store.add(record("B", 4)).unwrap();
        let b_before = store.find("B").unwrap().clone();

        let _ = store.increment("A");

        assert_eq!(store.find("A").unwrap().quantity, 5);
        assert_eq!(store.find("B").unwrap(), &b_before);
    }

    #[test]
    fn test_adjust_quantity_applies_to_all_legacy_duplicates() {
        let mut adapter = PersistenceAdapter::new(MemoryStorage::new());
        adapter.save(&[record("DUP", 1), record("X", 1), record("DUP", 5)]).unwrap();
        let mut store = InventoryStore::initialize(adapter);

        let mutation = store.increment("DUP");

        assert_eq!(mutation.affected, 2);
        let quantities: Vec<u32> = store.records().iter().map(|r| r.quantity).collect();
        assert_eq!(quantities, vec![2, 1, 6]);
    }

    #[test]
    fn test_snapshot_is_idempotent_and_detached() {
        let mut store = new_store();
        store.add(record("A", 1)).unwrap();

        let first = store.snapshot();
        let second = store.snapshot();
        assert_eq!(first, second);

        let _ = store.increment("A");
        assert_eq!(first[0].quantity, 1);
    }

    #[test]
    fn test_persistence_failure_keeps_memory_state() {
        let adapter = PersistenceAdapter::new(MemoryStorage::with_quota(16));
        let mut store = InventoryStore::initialize(adapter);

        let mutation = store.add(record("A", 1)).unwrap();

        assert!(!mutation.is_persisted());
        assert!(matches!(mutation.persist_error, Some(Error::Persistence(_))));
        assert_eq!(store.len(), 1);

        let mutation = store.increment("A");
        assert_eq!(mutation.affected, 1);
        assert!(!mutation.is_persisted());
        assert_eq!(store.find("A").unwrap().quantity, 2);
    }

    #[test]
    fn test_total_quantity() {
        let mut store = new_store();
        store.add(record("A", 3)).unwrap();
        store.add(record("B", 4)).unwrap();
        assert_eq!(store.total_quantity(), 7);
    }

    #[test]
    fn test_clear() {
        let mut store = new_store();
        store.add(record("A", 3)).unwrap();
        store.clear().unwrap();

        assert!(store.is_empty());
        assert!(store.adapter().load().unwrap().is_none());
    }
}
