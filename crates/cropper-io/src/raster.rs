//! Object URLs for in-memory image bytes.
//!
//! Wraps `URL.createObjectURL` in an owning handle. The browser keeps
//! the underlying Blob alive until the URL is revoked, so every handle
//! revokes its URL when dropped. Replacing a stored [`ObjectUrl`] (for
//! example with a newer crop) therefore releases the previous buffer.

use wasm_bindgen::JsValue;
use web_sys::BlobPropertyBag;

/// Errors that can occur while creating an object URL.
#[derive(Debug, thiserror::Error)]
pub enum RasterError {
    /// There were no bytes to wrap.
    #[error("refusing to create an object URL for empty data")]
    Empty,

    /// A browser API call returned an error.
    #[error("browser API error: {0}")]
    JsError(String),
}

impl From<JsValue> for RasterError {
    fn from(value: JsValue) -> Self {
        Self::JsError(format!("{value:?}"))
    }
}

/// An object URL that is revoked on drop.
///
/// Deliberately not `Clone`: exactly one owner decides when the URL
/// dies. Share it behind an `Rc` if several components need it.
#[derive(Debug)]
pub struct ObjectUrl(String);

impl ObjectUrl {
    /// Create a Blob of type `mime_type` from `bytes` and return its
    /// object URL.
    ///
    /// # Errors
    ///
    /// Returns [`RasterError::Empty`] if `bytes` is empty.
    /// Returns [`RasterError::JsError`] if Blob or URL creation fails.
    pub fn from_bytes(bytes: &[u8], mime_type: &str) -> Result<Self, RasterError> {
        if bytes.is_empty() {
            return Err(RasterError::Empty);
        }

        let uint8_array = js_sys::Uint8Array::from(bytes);
        let parts = js_sys::Array::new();
        parts.push(&uint8_array);

        let opts = BlobPropertyBag::new();
        opts.set_type(mime_type);
        let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &opts)?;

        let url = web_sys::Url::create_object_url_with_blob(&blob)?;
        Ok(Self(url))
    }

    /// The `blob:` URL, for `src` and `href` attributes.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Drop for ObjectUrl {
    fn drop(&mut self) {
        // Best-effort: the page may already be unloading.
        let _ = web_sys::Url::revoke_object_url(&self.0);
    }
}
