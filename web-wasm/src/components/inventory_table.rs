//! 在庫一覧テーブルコンポーネント

use leptos::prelude::*;
use inventory_common::{FormField, ProductRecord};
use wasm_bindgen::JsValue;

const LAST_UPDATED_LABEL: &str = "Last Updated";
const ACTIONS_LABEL: &str = "Actions";

/// 更新日時をブラウザのロケールで表示
fn format_last_updated(record: &ProductRecord) -> String {
    let iso = record.last_updated.to_rfc3339();
    let date = js_sys::Date::new(&JsValue::from_str(&iso));
    date.to_locale_string("default", &JsValue::UNDEFINED).into()
}

fn cell(record: &ProductRecord, field: FormField) -> String {
    match field {
        FormField::ProductId => record.product_id.clone(),
        FormField::ProductName => record.product_name.clone(),
        FormField::Size => record.size.clone(),
        FormField::Color => record.color.clone(),
        FormField::Quantity => record.quantity.to_string(),
        FormField::Price => record.price.clone(),
        FormField::Category => record.category.clone(),
        FormField::Brand => record.brand.clone(),
    }
}

#[component]
pub fn InventoryTable<FA>(
    records: ReadSignal<Vec<ProductRecord>>,
    on_adjust: FA,
) -> impl IntoView
where
    FA: Fn(String, i64) + 'static + Clone + Send,
{
    view! {
        <table class="inventory-table">
            <thead>
                <tr>
                    {FormField::ALL
                        .into_iter()
                        .map(|f| f.label())
                        .chain([LAST_UPDATED_LABEL, ACTIONS_LABEL])
                        .map(|label| view! { <th>{label}</th> })
                        .collect_view()}
                </tr>
            </thead>
            <tbody>
                // 旧データでは同じIDが複数あり得るので行番号もキーに含める
                <For
                    each=move || records.get().into_iter().enumerate()
                    key=|(idx, record)| (*idx, record.product_id.clone(), record.quantity, record.last_updated)
                    children=move |(_, record)| {
                        let on_increment = on_adjust.clone();
                        let on_decrement = on_adjust.clone();
                        let id_increment = record.product_id.clone();
                        let id_decrement = record.product_id.clone();

                        view! {
                            <tr>
                                {FormField::ALL
                                    .into_iter()
                                    .map(|f| view! { <td>{cell(&record, f)}</td> })
                                    .collect_view()}
                                <td>{format_last_updated(&record)}</td>
                                <td>
                                    <button on:click=move |_| on_increment(id_increment.clone(), 1)>"+"</button>
                                    <button on:click=move |_| on_decrement(id_decrement.clone(), -1)>"−"</button>
                                </td>
                            </tr>
                        }
                    }
                />
            </tbody>
        </table>
    }
}
