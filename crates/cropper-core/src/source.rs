//! Image loading: decode a selected file and work out how large it
//! will be drawn.
//!
//! The layout renders the image with `max-width: 100%; height: auto`,
//! so an image wider than its container is scaled down proportionally
//! and a narrower one is shown at its natural size.

use image::{DynamicImage, ImageFormat};

use crate::types::{CropError, Dimensions, Size};

/// A decoded image plus its natural and displayed extents.
///
/// Immutable once created. Loading another file builds a new
/// `SourceImage` rather than modifying this one.
#[derive(Debug, Clone)]
pub struct SourceImage {
    image: DynamicImage,
    natural: Dimensions,
    displayed: Size,
    format: Option<ImageFormat>,
}

impl SourceImage {
    /// Decode `bytes` and size the result for a container
    /// `container_width` CSS pixels wide.
    ///
    /// Pass `None` when the container has not been measured; the image
    /// is then displayed at its natural size.
    ///
    /// # Errors
    ///
    /// Returns [`CropError::EmptyInput`] if `bytes` is empty.
    /// Returns [`CropError::ImageDecode`] if the data is not an image
    /// the decoder understands.
    /// Returns [`CropError::EmptyImage`] if the image has no pixels.
    pub fn decode(bytes: &[u8], container_width: Option<f64>) -> Result<Self, CropError> {
        if bytes.is_empty() {
            return Err(CropError::EmptyInput);
        }

        let format = image::guess_format(bytes).ok();
        let image = image::load_from_memory(bytes).map_err(CropError::ImageDecode)?;
        Self::from_image(image, format, container_width)
    }

    /// Wrap an already decoded image.
    ///
    /// # Errors
    ///
    /// Returns [`CropError::EmptyImage`] if the image has no pixels.
    pub fn from_image(
        image: DynamicImage,
        format: Option<ImageFormat>,
        container_width: Option<f64>,
    ) -> Result<Self, CropError> {
        let natural = Dimensions::new(image.width(), image.height());
        if natural.is_empty() {
            return Err(CropError::EmptyImage);
        }
        Ok(Self {
            image,
            natural,
            displayed: fit_width(natural, container_width),
            format,
        })
    }

    /// The decoded pixels.
    #[must_use]
    pub const fn image(&self) -> &DynamicImage {
        &self.image
    }

    /// Intrinsic pixel dimensions.
    #[must_use]
    pub const fn natural(&self) -> Dimensions {
        self.natural
    }

    /// Rendered extent in CSS pixels.
    #[must_use]
    pub const fn displayed(&self) -> Size {
        self.displayed
    }

    /// MIME type for displaying the original bytes.
    #[must_use]
    pub fn mime_type(&self) -> &'static str {
        self.format
            .map_or("application/octet-stream", |f| f.to_mime_type())
    }
}

/// Rendered size of an image `natural` pixels large in a container
/// `container_width` wide.
///
/// Never upscales. Unknown, zero, or non-finite container widths leave
/// the natural size unchanged.
#[must_use]
pub fn fit_width(natural: Dimensions, container_width: Option<f64>) -> Size {
    let size = natural.to_size();
    match container_width {
        Some(cw) if cw.is_finite() && cw > 0.0 && cw < size.width => {
            Size::new(cw, size.height * cw / size.width)
        }
        _ => size,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn png(width: u32, height: u32) -> Vec<u8> {
        let img = image::RgbaImage::from_fn(width, height, |x, y| {
            image::Rgba([(x % 256) as u8, (y % 256) as u8, 0, 255])
        });
        let mut buf = Vec::new();
        let encoder = image::codecs::png::PngEncoder::new(&mut buf);
        image::ImageEncoder::write_image(
            encoder,
            img.as_raw(),
            img.width(),
            img.height(),
            image::ExtendedColorType::Rgba8,
        )
        .unwrap();
        buf
    }

    #[test]
    fn empty_input_returns_error() {
        let result = SourceImage::decode(&[], None);
        assert!(matches!(result, Err(CropError::EmptyInput)));
    }

    #[test]
    fn corrupt_bytes_return_decode_error() {
        let result = SourceImage::decode(&[0xFF, 0xFE, 0x00, 0x01], None);
        assert!(matches!(result, Err(CropError::ImageDecode(_))));
    }

    #[test]
    fn records_natural_dimensions_and_format() {
        let source = SourceImage::decode(&png(64, 48), None).unwrap();
        assert_eq!(source.natural(), Dimensions::new(64, 48));
        assert_eq!(source.displayed(), Size::new(64.0, 48.0));
        assert_eq!(source.mime_type(), "image/png");
    }

    #[test]
    fn wide_image_is_scaled_to_container() {
        let source = SourceImage::decode(&png(200, 100), Some(50.0)).unwrap();
        assert_eq!(source.displayed(), Size::new(50.0, 25.0));
        assert_eq!(source.natural(), Dimensions::new(200, 100));
    }

    #[test]
    fn narrow_image_is_not_upscaled() {
        let size = fit_width(Dimensions::new(300, 200), Some(800.0));
        assert_eq!(size, Size::new(300.0, 200.0));
    }

    #[test]
    fn unusable_container_width_is_ignored() {
        let natural = Dimensions::new(300, 200);
        assert_eq!(fit_width(natural, Some(0.0)), natural.to_size());
        assert_eq!(fit_width(natural, Some(f64::NAN)), natural.to_size());
        assert_eq!(fit_width(natural, None), natural.to_size());
    }

    #[test]
    fn zero_sized_image_is_rejected() {
        let empty = DynamicImage::new_rgba8(0, 10);
        let result = SourceImage::from_image(empty, None, None);
        assert!(matches!(result, Err(CropError::EmptyImage)));
    }
}
