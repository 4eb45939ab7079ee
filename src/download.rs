//! Browser Download Plumbing
//!
//! Wraps the Blob + object-URL + anchor-click dance used to hand an
//! in-memory workbook to the browser's download manager.

use wasm_bindgen::{JsCast, JsValue};

const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Trigger a client-side download of `bytes` under `file_name`.
pub fn download_xlsx(bytes: &[u8], file_name: &str) -> Result<(), String> {
    download_bytes(bytes, file_name, XLSX_MIME).map_err(|e| format!("{:?}", e))
}

fn download_bytes(bytes: &[u8], file_name: &str, mime: &str) -> Result<(), JsValue> {
    let array = js_sys::Array::new();
    array.push(&js_sys::Uint8Array::from(bytes).buffer());
    let props = web_sys::BlobPropertyBag::new();
    props.set_type(mime);
    let blob = web_sys::Blob::new_with_buffer_source_sequence_and_options(&array, &props)?;
    let url = web_sys::Url::create_object_url_with_blob(&blob)?;

    let document = web_sys::window()
        .ok_or_else(|| JsValue::from_str("no window"))?
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let anchor = document
        .create_element("a")?
        .dyn_into::<web_sys::HtmlAnchorElement>()?;
    anchor.set_href(&url);
    anchor.set_download(file_name);
    anchor.click();
    web_sys::Url::revoke_object_url(&url)?;
    Ok(())
}
