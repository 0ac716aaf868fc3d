//! Browser download of generated files.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

use crate::{AppError, AppResult};

/// MIME type of the cleaned export.
pub const CSV_MIME: &str = "text/csv;charset=utf-8";

/// Offer `content` as a file download named `file_name`.
pub fn download_text(file_name: &str, content: &str, mime: &str) -> AppResult<()> {
    let parts = js_sys::Array::of1(&JsValue::from_str(content));
    let options = BlobPropertyBag::new();
    options.set_type(mime);

    let blob = Blob::new_with_str_sequence_and_options(&parts, &options)
        .map_err(|e| AppError::Browser(format!("Failed to create Blob: {:?}", e)))?;
    let url = Url::create_object_url_with_blob(&blob)
        .map_err(|e| AppError::Browser(format!("Failed to create object URL: {:?}", e)))?;

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| AppError::Browser("No document".to_string()))?;

    let anchor: HtmlAnchorElement = document
        .create_element("a")
        .map_err(|e| AppError::Browser(format!("Failed to create link: {:?}", e)))?
        .dyn_into()
        .map_err(|_| AppError::Browser("Element is not an anchor".to_string()))?;

    anchor.set_href(&url);
    anchor.set_download(file_name);
    anchor.click();

    Url::revoke_object_url(&url)
        .map_err(|e| AppError::Browser(format!("Failed to revoke object URL: {:?}", e)))?;

    log::info!("💾 Download started: {}", file_name);
    Ok(())
}
