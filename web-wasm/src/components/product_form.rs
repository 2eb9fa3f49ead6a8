//! 商品入力フォームコンポーネント

use leptos::prelude::*;
use inventory_common::{FormField, FormState};

#[component]
pub fn ProductForm<F>(
    form: ReadSignal<FormState>,
    set_form: WriteSignal<FormState>,
    on_add: F,
) -> impl IntoView
where
    F: Fn(()) + 'static + Clone,
{
    view! {
        <div class="product-form">
            {FormField::ALL
                .into_iter()
                .map(|field| {
                    view! {
                        <input
                            name=field.as_str()
                            placeholder=field.as_str()
                            required=field.is_required()
                            prop:value=move || form.with(|f| f.get(field).to_string())
                            on:input=move |ev| {
                                let value = event_target_value(&ev);
                                set_form.update(|f| f.set_field(field, value));
                            }
                        />
                    }
                })
                .collect_view()}

            <button
                class="btn btn-primary"
                on:click={
                    let on_add = on_add.clone();
                    move |_| on_add(())
                }
            >
                "Add Product"
            </button>
        </div>
    }
}
