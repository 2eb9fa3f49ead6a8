//! Inventory Common Library
//!
//! CLIとWeb(WASM)で共有される在庫レコードの型・状態管理・永続化・エクスポート

pub mod types;
pub mod error;
pub mod storage;
pub mod persistence;
pub mod store;
pub mod form;
pub mod export;

pub use types::{timestamp_now, ProductRecord};
pub use error::{Error, Result, ValidationError};
pub use storage::{KeyValueStorage, MemoryStorage};
pub use persistence::{PersistenceAdapter, STORAGE_KEY};
pub use store::{InventoryStore, Mutation};
pub use form::{FormField, FormState};
