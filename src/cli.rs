use clap::{Args, Parser, Subcommand};
use inventory_common::{FormField, FormState};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "inventory")]
#[command(about = "在庫レコード管理・CSVエクスポートツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 商品を追加
    Add {
        #[command(flatten)]
        fields: ProductArgs,

        /// 対話的に入力（ID・商品名が未指定の場合も対話モード）
        #[arg(short, long)]
        interactive: bool,
    },

    /// 数量を増減（負数で減算）
    Adjust {
        /// 商品ID
        #[arg(required = true)]
        id: String,

        /// 増減量
        #[arg(required = true, allow_hyphen_values = true)]
        delta: i64,
    },

    /// 数量を1増やす
    Inc {
        /// 商品ID
        #[arg(required = true)]
        id: String,
    },

    /// 数量を1減らす（0未満にはならない）
    Dec {
        /// 商品ID
        #[arg(required = true)]
        id: String,
    },

    /// 在庫一覧を表示
    List,

    /// 在庫一覧をCSV/Excelに出力
    Export {
        /// 出力形式 (csv/excel/both)
        #[arg(short, long, default_value = "csv")]
        format: ExportFormat,

        /// 出力ファイル/ディレクトリ（デフォルト: カレント）
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// 設定を表示/編集
    Config {
        /// データ保存先ディレクトリを設定
        #[arg(long)]
        set_data_dir: Option<PathBuf>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },

    /// 保存データ管理
    Storage {
        /// 保存データを削除
        #[arg(long)]
        clear: bool,

        /// 保存データ情報を表示
        #[arg(long)]
        info: bool,
    },
}

/// フォーム8項目のオプション
#[derive(Args, Debug, Default, Clone)]
pub struct ProductArgs {
    /// 商品ID
    #[arg(long)]
    pub product_id: Option<String>,

    /// 商品名
    #[arg(long)]
    pub product_name: Option<String>,

    /// サイズ
    #[arg(long)]
    pub size: Option<String>,

    /// 色
    #[arg(long)]
    pub color: Option<String>,

    /// 数量（0以上の整数）
    #[arg(long)]
    pub quantity: Option<String>,

    /// 価格（入力どおり保存）
    #[arg(long)]
    pub price: Option<String>,

    /// カテゴリ
    #[arg(long)]
    pub category: Option<String>,

    /// ブランド
    #[arg(long)]
    pub brand: Option<String>,
}

impl ProductArgs {
    fn value(&self, field: FormField) -> Option<&String> {
        match field {
            FormField::ProductId => self.product_id.as_ref(),
            FormField::ProductName => self.product_name.as_ref(),
            FormField::Size => self.size.as_ref(),
            FormField::Color => self.color.as_ref(),
            FormField::Quantity => self.quantity.as_ref(),
            FormField::Price => self.price.as_ref(),
            FormField::Category => self.category.as_ref(),
            FormField::Brand => self.brand.as_ref(),
        }
    }

    /// 指定された項目だけを反映したフォーム
    pub fn to_form(&self) -> FormState {
        let mut form = FormState::new();
        for field in FormField::ALL {
            if let Some(value) = self.value(field) {
                form.set_field(field, value.clone());
            }
        }
        form
    }

    /// 必須項目（ID・商品名）が揃っているか
    pub fn has_required(&self) -> bool {
        self.product_id.is_some() && self.product_name.is_some()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ExportFormat {
    #[default]
    Csv,
    Excel,
    Both,
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "excel" | "xlsx" => Ok(ExportFormat::Excel),
            "both" => Ok(ExportFormat::Both),
            _ => Err(format!("Unknown format: {}. Use csv, excel, or both", s)),
        }
    }
}
