//! Export core modules shared across CLI and WASM wrappers.

pub mod csv;

#[cfg(feature = "excel")]
pub mod excel_core;

pub use csv::{to_csv, CSV_FILE_NAME, CSV_MIME_TYPE};
