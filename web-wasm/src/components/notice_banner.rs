//! 通知バナーコンポーネント

use leptos::prelude::*;
use crate::app::Notice;

#[component]
pub fn NoticeBanner(
    notice: ReadSignal<Option<Notice>>,
    set_notice: WriteSignal<Option<Notice>>,
) -> impl IntoView {
    move || {
        notice.get().map(|n| {
            view! {
                <div class=format!("notice notice-{}", n.kind.as_str()) role="alert">
                    <span>{n.message}</span>
                    <button class="notice-close" on:click=move |_| set_notice.set(None)>"×"</button>
                </div>
            }
        })
    }
}
