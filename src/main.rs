use clap::Parser;
use inventory_common::{InventoryStore, KeyValueStorage, Mutation};
use inventory_keeper::{cli, config, error, export, prompt, storage, table};
use cli::{Cli, Commands};
use config::Config;
use error::{InventoryError, Result};
use storage::FileStorage;
use tracing_subscriber::EnvFilter;

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// 保存に失敗した変更を警告表示
fn report_mutation(mutation: &Mutation) {
    if let Some(err) = &mutation.persist_error {
        eprintln!("⚠ 変更は保存されませんでした: {}", err);
    }
}

fn adjust(store: &mut InventoryStore<FileStorage>, id: &str, delta: i64) -> Result<()> {
    let mutation = store.adjust_quantity(id, delta);
    if mutation.affected == 0 {
        return Err(InventoryError::ProductNotFound(id.to_string()));
    }
    report_mutation(&mutation);

    if let Some(record) = store.find(id) {
        println!(
            "✔ {} ({}) の数量: {}{}",
            record.product_id,
            record.product_name,
            record.quantity,
            if mutation.affected > 1 { format!(" [{}件に適用]", mutation.affected) } else { String::new() }
        );
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::load()?;
    let data_dir = config.resolve_data_dir()?;
    tracing::debug!(data_dir = %data_dir.display(), key = %config.storage_key, "opening inventory");

    let mut store = storage::open_store(&data_dir, &config.storage_key);
    if let Some(issue) = store.startup_issue() {
        if store.is_slot_locked() {
            eprintln!("⚠ 保存データを読み込めませんでした。元のファイルは残したまま、変更は保存しません: {}", issue);
            eprintln!("  内容を確認してから `inventory storage --clear` で削除すると保存を再開します");
        } else {
            eprintln!("⚠ 保存データを読み込めなかったため退避して空の在庫で開始します: {}", issue);
        }
    }

    match cli.command {
        Commands::Add { fields, interactive } => {
            println!("🧾 inventory - 商品追加\n");

            let mut form = fields.to_form();
            if interactive || !fields.has_required() {
                prompt::fill_form_interactive(&mut form)?;
            }

            let mutation = form.submit(&mut store)?;
            report_mutation(&mutation);

            if let Some(record) = store.records().last() {
                println!("✔ 追加しました: {} ({}) 数量 {}", record.product_id, record.product_name, record.quantity);
            }
            println!("  登録件数: {}", store.len());
        }

        Commands::Adjust { id, delta } => {
            adjust(&mut store, &id, delta)?;
        }

        Commands::Inc { id } => {
            adjust(&mut store, &id, 1)?;
        }

        Commands::Dec { id } => {
            adjust(&mut store, &id, -1)?;
        }

        Commands::List => {
            println!("📦 在庫一覧\n");

            if store.is_empty() {
                println!("登録された商品はありません");
            } else {
                println!("{}", table::render_table(store.records()));
                println!("\n{}件 / 数量合計 {}", store.len(), store.total_quantity());
            }
        }

        Commands::Export { format, output } => {
            println!("📄 inventory - エクスポート\n");

            if store.is_empty() {
                println!("登録された商品がないため出力しません");
                return Ok(());
            }

            let output = output.unwrap_or_else(|| std::path::PathBuf::from("."));
            let snapshot = store.snapshot();
            export::export_records(&snapshot, &format, &output, &config.csv_file_name)?;

            println!("\n✅ エクスポート完了");
        }

        Commands::Config { set_data_dir, show } => {
            let mut config = config;

            if let Some(dir) = set_data_dir {
                config.set_data_dir(dir)?;
                println!("✔ データ保存先を設定しました");
            }

            if show {
                println!("設定:");
                println!("  設定ファイル: {}", Config::config_path()?.display());
                println!("  データ保存先: {}", config.resolve_data_dir()?.display());
                println!("  保存キー: {}", config.storage_key);
                println!("  CSVファイル名: {}", config.csv_file_name);
            }
        }

        Commands::Storage { clear, info } => {
            let adapter = store.adapter();
            let slot_path = adapter.storage().path_for(adapter.key())?;

            if info || !clear {
                // デフォルトまたは--info: 情報表示
                println!("保存データ情報:");
                println!("  パス: {}", slot_path.display());
                println!("  件数: {}", store.len());
                if store.is_slot_locked() {
                    println!("  状態: 読み込めないため上書き停止中");
                }
                if let Ok(meta) = std::fs::metadata(&slot_path) {
                    println!("  サイズ: {} bytes", meta.len());
                }
                let corrupt_key = adapter.corrupt_key();
                if adapter.storage().get_item(&corrupt_key)?.is_some() {
                    println!("  破損データの退避: {}", adapter.storage().path_for(&corrupt_key)?.display());
                }
            }

            if clear {
                match storage::clear_store(&mut store) {
                    Ok(path) => println!("✔ 保存データを削除しました: {}", path.display()),
                    Err(e) => {
                        eprintln!("✖ 保存データ削除エラー: {}", e);
                        std::process::exit(1);
                    }
                }
            }
        }
    }

    Ok(())
}
