//! ファイルベースのキー・バリューストレージ
//!
//! データディレクトリ1つがブラウザのオリジンに相当する。
//! キーごとに `<dir>/<key>.json` を1ファイル使う。

use inventory_common::{Error, InventoryStore, KeyValueStorage, PersistenceAdapter, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

const FILE_EXTENSION: &str = "json";

#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// 保存先ディレクトリを指定して作成（ディレクトリは書き込み時に作る）
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// キーに対応するファイルパス
    pub fn path_for(&self, key: &str) -> Result<PathBuf> {
        if key.is_empty() || key.contains(['/', '\\']) || key == "." || key == ".." {
            return Err(Error::Persistence(format!("invalid storage key: {:?}", key)));
        }
        Ok(self.dir.join(format!("{}.{}", key, FILE_EXTENSION)))
    }
}

/// データディレクトリ上の在庫ストアを開く
pub fn open_store(dir: impl Into<PathBuf>, key: &str) -> InventoryStore<FileStorage> {
    InventoryStore::initialize(PersistenceAdapter::with_key(FileStorage::new(dir), key))
}

/// 保存データを削除し、削除したファイルのパスを返す
pub fn clear_store(store: &mut InventoryStore<FileStorage>) -> Result<PathBuf> {
    let adapter = store.adapter();
    let path = adapter.storage().path_for(adapter.key())?;
    store.clear()?;
    Ok(path)
}

impl KeyValueStorage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Error::Persistence(format!("{}: {}", path.display(), e))),
        }
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        let tmp_path = path.with_extension(format!("{}.tmp", FILE_EXTENSION));

        let write = || -> std::io::Result<()> {
            fs::create_dir_all(&self.dir)?;
            fs::write(&tmp_path, value)?;
            fs::rename(&tmp_path, &path)
        };

        write().map_err(|e| {
            let _ = fs::remove_file(&tmp_path);
            Error::Persistence(format!("{}: {}", path.display(), e))
        })
    }

    fn remove_item(&mut self, key: &str) -> Result<()> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Error::Persistence(format!("{}: {}", path.display(), e))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_key_is_none() {
        let dir = tempdir().expect("Failed to create temp dir");
        let storage = FileStorage::new(dir.path());
        assert_eq!(storage.get_item("inventory_data").unwrap(), None);
    }

    #[test]
    fn test_set_creates_directory_and_overwrites() {
        let dir = tempdir().expect("Failed to create temp dir");
        let mut storage = FileStorage::new(dir.path().join("nested").join("origin"));

        storage.set_item("inventory_data", "[1]").unwrap();
        storage.set_item("inventory_data", "[2]").unwrap();

        assert_eq!(storage.get_item("inventory_data").unwrap().as_deref(), Some("[2]"));
        assert!(storage.dir().join("inventory_data.json").exists());
        assert!(!storage.dir().join("inventory_data.json.tmp").exists());
    }

    #[test]
    fn test_remove_item() {
        let dir = tempdir().expect("Failed to create temp dir");
        let mut storage = FileStorage::new(dir.path());

        storage.set_item("k", "v").unwrap();
        storage.remove_item("k").unwrap();
        storage.remove_item("k").expect("2回目の削除も成功扱い");
        assert_eq!(storage.get_item("k").unwrap(), None);
    }

    #[test]
    fn test_clear_store_failure_is_reported() {
        let dir = tempdir().expect("Failed to create temp dir");
        // ファイルの代わりにディレクトリがあると削除できない
        fs::create_dir_all(dir.path().join("inventory_data.json").join("inner")).unwrap();

        let mut store = open_store(dir.path(), "inventory_data");
        assert!(matches!(clear_store(&mut store), Err(Error::Persistence(_))));
    }

    #[test]
    fn test_clear_store_returns_removed_path() {
        let dir = tempdir().expect("Failed to create temp dir");
        fs::write(dir.path().join("inventory_data.json"), "[]").unwrap();
        let mut store = open_store(dir.path(), "inventory_data");

        let path = clear_store(&mut store).expect("削除失敗");
        assert_eq!(path, dir.path().join("inventory_data.json"));
        assert!(!path.exists());
    }

    #[test]
    fn test_invalid_keys_rejected() {
        let storage = FileStorage::new("/tmp");
        for key in ["", "..", "a/b", "a\\b"] {
            assert!(matches!(storage.path_for(key), Err(Error::Persistence(_))), "{:?}", key);
        }
    }
}
