//! Saving conversion results through the browser.
//!
//! The bytes are wrapped in a `Blob`, exposed through an object URL and
//! handed to a throwaway `<a download>` element. Only meaningful on
//! `wasm32-unknown-unknown`.

use recast_core::ConversionResult;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{BlobPropertyBag, Document, HtmlAnchorElement};

/// Errors that can occur when starting a download.
#[derive(Debug, thiserror::Error)]
pub enum DownloadError {
    /// `window` or `document` (or its body) is missing.
    #[error("no {0} available")]
    NoDom(&'static str),

    /// A browser API call returned an error.
    #[error("browser API error: {0}")]
    JsError(String),
}

impl From<JsValue> for DownloadError {
    fn from(value: JsValue) -> Self {
        Self::JsError(format!("{value:?}"))
    }
}

/// Offer a conversion result for download as `converted-image.<ext>`,
/// typed with the result's own MIME type.
///
/// # Errors
///
/// Returns a [`DownloadError`] if the page has no document or a
/// browser API call fails.
pub fn download_result(result: &ConversionResult) -> Result<(), DownloadError> {
    trigger_download(&result.bytes, &result.download_name(), result.mime_type())
}

/// Save `data` under `filename`.
///
/// # Errors
///
/// Returns a [`DownloadError`] if the page has no document or a
/// browser API call fails (`Blob` creation, `URL.createObjectURL`,
/// element creation).
pub fn trigger_download(data: &[u8], filename: &str, mime_type: &str) -> Result<(), DownloadError> {
    let document = web_sys::window()
        .ok_or(DownloadError::NoDom("window"))?
        .document()
        .ok_or(DownloadError::NoDom("document"))?;

    let url = ObjectUrl::new(data, mime_type)?;
    click_link(&document, url.as_str(), filename)
}

/// An object URL for an in-memory `Blob`, revoked on drop.
struct ObjectUrl(String);

impl ObjectUrl {
    fn new(data: &[u8], mime_type: &str) -> Result<Self, DownloadError> {
        let parts = js_sys::Array::of1(&js_sys::Uint8Array::from(data));
        let opts = BlobPropertyBag::new();
        opts.set_type(mime_type);
        let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &opts)?;
        Ok(Self(web_sys::Url::create_object_url_with_blob(&blob)?))
    }

    fn as_str(&self) -> &str {
        &self.0
    }
}

impl Drop for ObjectUrl {
    fn drop(&mut self) {
        // The browser has already taken its own reference by the time
        // the link was clicked.
        let _ = web_sys::Url::revoke_object_url(&self.0);
    }
}

/// Attach a temporary `<a href=url download=filename>` to the body,
/// click it, and detach it again.
fn click_link(document: &Document, url: &str, filename: &str) -> Result<(), DownloadError> {
    let anchor: HtmlAnchorElement = document
        .create_element("a")?
        .dyn_into()
        .map_err(|e| DownloadError::JsError(format!("not an anchor: {e:?}")))?;
    anchor.set_href(url);
    anchor.set_download(filename);

    let body = document.body().ok_or(DownloadError::NoDom("document body"))?;
    body.append_child(&anchor)?;
    anchor.click();
    let _ = body.remove_child(&anchor);

    Ok(())
}
