//! File download via object URLs.
//!
//! Dioxus has no built-in file download API.  This module triggers
//! downloads by programmatically clicking a temporary `<a download>`
//! element that points at an object URL.
//!
//! All functions in this module require a browser environment
//! (`wasm32-unknown-unknown` target).

use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;

use crate::raster::{ObjectUrl, RasterError};

/// Errors that can occur when triggering a file download.
#[derive(Debug, thiserror::Error)]
pub enum DownloadError {
    /// A browser API call returned an error.
    #[error("browser API error: {0}")]
    JsError(String),

    /// The bytes could not be wrapped in an object URL.
    #[error(transparent)]
    Url(#[from] RasterError),
}

impl From<JsValue> for DownloadError {
    fn from(value: JsValue) -> Self {
        Self::JsError(format!("{value:?}"))
    }
}

/// Offer `bytes` to the user as `filename`.
///
/// The object URL lives only for the duration of the click.
///
/// # Errors
///
/// Returns [`DownloadError::Url`] if the blob cannot be created and
/// [`DownloadError::JsError`] if the anchor cannot be clicked.
pub fn download_bytes(bytes: &[u8], mime_type: &str, filename: &str) -> Result<(), DownloadError> {
    let url = ObjectUrl::from_bytes(bytes, mime_type)?;
    trigger_download(url.as_str(), filename)
}

/// Offer the resource at `href` to the user as `filename`.
///
/// The caller owns `href` (typically an [`ObjectUrl`](crate::ObjectUrl))
/// and decides when it is revoked; this function only borrows it.
///
/// # Errors
///
/// Returns [`DownloadError::JsError`] if any browser API call fails
/// (e.g., missing `document.body`, element creation).
pub fn trigger_download(href: &str, filename: &str) -> Result<(), DownloadError> {
    let window =
        web_sys::window().ok_or_else(|| DownloadError::JsError("no global window".into()))?;
    let document = window
        .document()
        .ok_or_else(|| DownloadError::JsError("no document".into()))?;

    let anchor: web_sys::HtmlAnchorElement = document
        .create_element("a")?
        .dyn_into::<web_sys::HtmlAnchorElement>()
        .map_err(|e| DownloadError::JsError(format!("failed to cast element: {e:?}")))?;

    anchor.set_href(href);
    anchor.set_download(filename);

    let body = document
        .body()
        .ok_or_else(|| DownloadError::JsError("no document body".into()))?;
    body.append_child(&anchor)?;
    anchor.click();

    // The download has started; a failed removal is not a failed download.
    let _ = body.remove_child(&anchor);

    Ok(())
}
