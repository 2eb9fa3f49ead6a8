//! エクスポートボタンコンポーネント

use leptos::prelude::*;
use inventory_common::ProductRecord;

#[component]
pub fn ExportButtons<FC>(
    records: ReadSignal<Vec<ProductRecord>>,
    on_download_csv: FC,
) -> impl IntoView
where
    FC: Fn(()) + 'static + Clone,
{
    let has_records = move || !records.with(|r| r.is_empty());

    view! {
        <div class="export-buttons">
            <button
                class="btn btn-secondary"
                disabled=move || !has_records()
                on:click={
                    let on_download_csv = on_download_csv.clone();
                    move |_| on_download_csv(())
                }
            >
                "Download CSV"
            </button>
        </div>
    }
}
