use thiserror::Error;

#[derive(Error, Debug)]
pub enum InventoryError {
    #[error(transparent)]
    Inventory(#[from] inventory_common::Error),

    #[error("設定エラー: {0}")]
    Config(String),

    #[error("商品が見つかりません: {0}")]
    ProductNotFound(String),

    #[error("入力エラー: {0}")]
    Prompt(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),
}

impl From<inventory_common::ValidationError> for InventoryError {
    fn from(e: inventory_common::ValidationError) -> Self {
        InventoryError::Inventory(e.into())
    }
}

impl From<dialoguer::Error> for InventoryError {
    fn from(e: dialoguer::Error) -> Self {
        InventoryError::Prompt(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, InventoryError>;
