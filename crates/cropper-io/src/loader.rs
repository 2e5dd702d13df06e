//! Turning uploaded bytes into something the crop stage can show.

use std::rc::Rc;

use cropper_core::{CropError, SourceImage};
use dioxus::html::MountedData;

use crate::raster::{ObjectUrl, RasterError};

/// A decoded image together with the object URL that displays it.
#[derive(Debug)]
pub struct LoadedImage {
    /// Pixels and extents used for cropping.
    pub source: SourceImage,
    /// URL for the `<img>` element, revoked when dropped.
    pub url: ObjectUrl,
}

/// Errors that can occur while loading an uploaded file.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The file is not a decodable image.
    #[error(transparent)]
    Decode(#[from] CropError),

    /// The decoded image could not be handed to the browser.
    #[error("could not display image: {0}")]
    Display(#[from] RasterError),
}

/// Decode `bytes` for a container `container_width` pixels wide and
/// create the display URL.
///
/// Nothing is created unless both steps succeed.
///
/// # Errors
///
/// Returns [`LoadError::Decode`] for unreadable files and
/// [`LoadError::Display`] if the object URL cannot be created.
pub fn load_image(bytes: &[u8], container_width: Option<f64>) -> Result<LoadedImage, LoadError> {
    let source = SourceImage::decode(bytes, container_width)?;
    let url = ObjectUrl::from_bytes(bytes, source.mime_type())?;
    Ok(LoadedImage { source, url })
}

/// Current rendered width of a mounted element, if it can be measured.
#[allow(clippy::future_not_send)] // WASM is single-threaded; MountedData is !Send
pub async fn measure_width(element: Option<Rc<MountedData>>) -> Option<f64> {
    let element = element?;
    let rect = element.get_client_rect().await.ok()?;
    Some(rect.size.width).filter(|w| *w > 0.0)
}
