//! エラー型定義

use thiserror::Error;

/// 入力検証エラー
///
/// 検証に失敗した操作はインベントリを変更しない。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("productId is required")]
    MissingProductId,

    #[error("productName is required")]
    MissingProductName,

    #[error("quantity must be a non-negative integer, got {0:?}")]
    InvalidQuantity(String),

    #[error("productId already exists: {0}")]
    DuplicateProductId(String),

    #[error("unknown form field: {0}")]
    UnknownField(String),
}

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Corrupt state at '{key}': {source}")]
    CorruptState {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("Persisted inventory at '{key}' could not be read; not overwriting it until storage is cleared")]
    SlotLocked { key: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Export error: {0}")]
    Export(String),
}

impl Error {
    /// 検証エラーなら中身を返す
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            Error::Validation(v) => Some(v),
            _ => None,
        }
    }
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
