//! ブラウザのファイル保存

use gloo::timers::callback::Timeout;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

/// クリック後にオブジェクトURLを破棄するまでの待ち時間
const REVOKE_DELAY_MS: u32 = 1_000;

/// テキストをBlobにして `<a download>` 経由で保存させる
pub fn download_text(content: &str, file_name: &str, mime_type: &str) -> Result<(), JsValue> {
    let parts = js_sys::Array::of1(&JsValue::from_str(content));
    let options = BlobPropertyBag::new();
    options.set_type(mime_type);
    let blob = Blob::new_with_str_sequence_and_options(&parts, &options)?;

    let url = Url::create_object_url_with_blob(&blob)?;
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("document is not available"))?;

    let anchor: HtmlAnchorElement = document.create_element("a")?.dyn_into()?;
    anchor.set_href(&url);
    anchor.set_download(file_name);
    anchor.click();

    // すぐに破棄するとダウンロードが中断されるブラウザがある
    Timeout::new(REVOKE_DELAY_MS, move || {
        if let Err(e) = Url::revoke_object_url(&url) {
            gloo::console::warn!(format!("failed to revoke object URL: {:?}", e));
        }
    })
    .forget();
    Ok(())
}
