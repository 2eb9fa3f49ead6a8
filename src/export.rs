//! 在庫一覧のファイル出力

use crate::cli::ExportFormat;
use crate::error::Result;
use inventory_common::export::to_csv;
#[cfg(feature = "excel")]
use inventory_common::export::excel_core::{to_xlsx, EXCEL_FILE_NAME};
use inventory_common::ProductRecord;
use std::path::{Path, PathBuf};

fn output_path_for_format(output: &Path, file_name: &str, extension: &str) -> PathBuf {
    if output.is_dir() || output.extension().is_none() {
        output.join(file_name)
    } else {
        output.with_extension(extension)
    }
}

/// CSVを書き出す（空リストなら何もしない）
pub fn write_csv(records: &[ProductRecord], output: &Path, file_name: &str) -> Result<Option<PathBuf>> {
    let Some(csv) = to_csv(records)? else {
        return Ok(None);
    };
    let path = output_path_for_format(output, file_name, "csv");
    ensure_parent(&path)?;
    std::fs::write(&path, csv)?;
    Ok(Some(path))
}

/// Excelを書き出す（空リストなら何もしない）
#[cfg(feature = "excel")]
pub fn write_excel(records: &[ProductRecord], output: &Path) -> Result<Option<PathBuf>> {
    let Some(bytes) = to_xlsx(records)? else {
        return Ok(None);
    };
    let path = output_path_for_format(output, EXCEL_FILE_NAME, "xlsx");
    ensure_parent(&path)?;
    std::fs::write(&path, bytes)?;
    Ok(Some(path))
}

#[cfg(not(feature = "excel"))]
pub fn write_excel(_records: &[ProductRecord], _output: &Path) -> Result<Option<PathBuf>> {
    Err(crate::error::InventoryError::Config(
        "Excel出力は無効です（excel featureを有効にしてビルドしてください）".into(),
    ))
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    Ok(())
}

pub fn export_records(
    records: &[ProductRecord],
    format: &ExportFormat,
    output: &Path,
    csv_file_name: &str,
) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();

    if matches!(format, ExportFormat::Csv | ExportFormat::Both) {
        println!("- CSVを生成中...");
        if let Some(path) = write_csv(records, output, csv_file_name)? {
            println!("✔ CSV出力: {}", path.display());
            written.push(path);
        }
    }

    if matches!(format, ExportFormat::Excel | ExportFormat::Both) {
        println!("- Excelを生成中...");
        if let Some(path) = write_excel(records, output)? {
            println!("✔ Excel出力: {}", path.display());
            written.push(path);
        }
    }

    Ok(written)
}

