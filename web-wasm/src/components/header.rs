//! ヘッダーコンポーネント

use leptos::prelude::*;

#[component]
pub fn Header() -> impl IntoView {
    view! {
        <header class="header">
            <h2>"🧾 Clothing Inventory Manager"</h2>
        </header>
    }
}
