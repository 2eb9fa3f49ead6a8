use crate::error::{InventoryError, Result};
use inventory_common::{export::CSV_FILE_NAME, STORAGE_KEY};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// データディレクトリを上書きする環境変数
pub const DATA_DIR_ENV: &str = "INVENTORY_DATA_DIR";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub data_dir: Option<PathBuf>,
    pub storage_key: String,
    pub csv_file_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            storage_key: STORAGE_KEY.into(),
            csv_file_name: CSV_FILE_NAME.into(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| InventoryError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("inventory-keeper").join("config.json"))
    }

    /// 在庫データの保存先ディレクトリ
    ///
    /// 優先順: 環境変数 > 設定ファイル > OS標準のデータディレクトリ
    pub fn resolve_data_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = std::env::var_os(DATA_DIR_ENV).filter(|v| !v.is_empty()) {
            return Ok(PathBuf::from(dir));
        }

        if let Some(dir) = &self.data_dir {
            return Ok(dir.clone());
        }

        dirs::data_dir()
            .map(|d| d.join("inventory-keeper"))
            .ok_or_else(|| InventoryError::Config("データディレクトリが見つかりません".into()))
    }

    pub fn set_data_dir(&mut self, dir: PathBuf) -> Result<()> {
        self.data_dir = Some(dir);
        self.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.storage_key, "inventory_data");
        assert_eq!(config.csv_file_name, "inventory.csv");
        assert!(config.data_dir.is_none());
    }

    #[test]
    fn test_partial_config_file_uses_defaults() {
        let config: Config = serde_json::from_str(r#"{"data_dir": "/tmp/inv"}"#)
            .expect("デシリアライズ失敗");
        assert_eq!(config.data_dir, Some(PathBuf::from("/tmp/inv")));
        assert_eq!(config.storage_key, "inventory_data");
    }
}
