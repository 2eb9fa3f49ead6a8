//! メインアプリケーションコンポーネント

use leptos::prelude::*;
use crate::components::{
    header::Header,
    product_form::ProductForm,
    inventory_table::InventoryTable,
    export_buttons::ExportButtons,
    notice_banner::NoticeBanner,
};
use crate::download::download_text;
use crate::storage::BrowserStorage;
use inventory_common::export::{to_csv, CSV_FILE_NAME, CSV_MIME_TYPE};
use inventory_common::{
    FormState, InventoryStore, KeyValueStorage, MemoryStorage, Mutation, PersistenceAdapter,
};

type AppStore = InventoryStore<Box<dyn KeyValueStorage>>;

/// 通知の種類
#[derive(Clone, Copy, PartialEq)]
pub enum NoticeKind {
    Warning,
    Error,
}

impl NoticeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NoticeKind::Warning => "warning",
            NoticeKind::Error => "error",
        }
    }
}

/// 画面上部に出す通知
#[derive(Clone, PartialEq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    fn warning(message: impl Into<String>) -> Self {
        let message = message.into();
        gloo::console::warn!(message.clone());
        Self { kind: NoticeKind::Warning, message }
    }

    fn error(message: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Error, message: message.into() }
    }
}

/// localStorage上のストアを開く（使えなければメモリのみ）
fn open_store() -> (AppStore, Option<Notice>) {
    let (storage, notice) = match BrowserStorage::local() {
        Ok(storage) => (Box::new(storage) as Box<dyn KeyValueStorage>, None),
        Err(err) => (
            Box::new(MemoryStorage::new()) as Box<dyn KeyValueStorage>,
            Some(Notice::warning(format!("保存領域を利用できません。再読み込みで内容は失われます: {}", err))),
        ),
    };

    let store = InventoryStore::initialize(PersistenceAdapter::new(storage));
    let notice = notice.or_else(|| {
        store.startup_issue().map(|err| {
            if store.is_slot_locked() {
                Notice::warning(format!("保存データを読み込めませんでした。元のデータを守るため変更は保存されません: {}", err))
            } else {
                Notice::warning(format!("保存データを読み込めなかったため空の在庫で開始しました: {}", err))
            }
        })
    });
    (store, notice)
}

fn mutation_notice(mutation: &Mutation) -> Option<Notice> {
    mutation
        .persist_error
        .as_ref()
        .map(|err| Notice::warning(format!("変更は保存されませんでした: {}", err)))
}

/// メインアプリケーションコンポーネント
#[component]
pub fn App() -> impl IntoView {
    let (store, startup_notice) = open_store();
    let (records, set_records) = signal(store.snapshot());
    let store = StoredValue::new_local(store);

    let (form, set_form) = signal(FormState::new());
    let (notice, set_notice) = signal(startup_notice);

    let refresh = move || {
        if let Some(snapshot) = store.try_with_value(|s| s.snapshot()) {
            set_records.set(snapshot);
        }
    };

    // 商品追加ハンドラ
    let on_add = move |_| {
        let mut pending = form.get_untracked();
        match store.try_update_value(|s| pending.submit(s)) {
            Some(Ok(mutation)) => {
                set_form.set(pending);
                set_notice.set(mutation_notice(&mutation));
                refresh();
            }
            Some(Err(err)) => set_notice.set(Some(Notice::error(err.to_string()))),
            None => {}
        }
    };

    // 数量増減ハンドラ
    let on_adjust = move |id: String, delta: i64| {
        if let Some(mutation) = store.try_update_value(|s| s.adjust_quantity(&id, delta)) {
            set_notice.set(mutation_notice(&mutation));
            refresh();
        }
    };

    // CSV出力ハンドラ
    let on_download_csv = move |_| {
        let csv = records.with_untracked(|r| to_csv(r));
        match csv {
            Ok(Some(csv)) => {
                if let Err(e) = download_text(&csv, CSV_FILE_NAME, CSV_MIME_TYPE) {
                    set_notice.set(Some(Notice::error(format!("CSVを保存できませんでした: {:?}", e))));
                }
            }
            Ok(None) => {}
            Err(err) => set_notice.set(Some(Notice::error(err.to_string()))),
        }
    };

    view! {
        <div class="App container">
            <Header />

            <NoticeBanner notice=notice set_notice=set_notice />

            <ProductForm form=form set_form=set_form on_add=on_add />

            <h3>"📦 Product Inventory"</h3>
            <ExportButtons records=records on_download_csv=on_download_csv />

            <InventoryTable records=records on_adjust=on_adjust />
        </div>
    }
}
