//! Map the on-screen crop to natural resolution, rasterize it, and
//! encode the result.
//!
//! Horizontal and vertical scale are computed independently. The
//! output has the *displayed* crop size, so a crop on a scaled-down
//! image is resampled to what the user saw on screen rather than
//! exported at full resolution.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageEncoder, RgbImage, RgbaImage};
use serde::{Deserialize, Serialize};

use crate::config::{CropConfig, ResampleFilter};
use crate::region::CropRegion;
use crate::source::SourceImage;
use crate::types::{CropError, Dimensions, Size};

/// Natural pixels per displayed pixel, per axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleFactors {
    /// `natural_width / displayed_width`.
    pub x: f64,
    /// `natural_height / displayed_height`.
    pub y: f64,
}

impl ScaleFactors {
    /// Scale factors from `displayed` space to `natural` space.
    ///
    /// An axis with no displayed extent maps 1:1.
    #[must_use]
    pub fn between(natural: Dimensions, displayed: Size) -> Self {
        let ratio = |n: u32, d: f64| {
            if d > 0.0 && d.is_finite() {
                f64::from(n) / d
            } else {
                1.0
            }
        };
        Self {
            x: ratio(natural.width, displayed.width),
            y: ratio(natural.height, displayed.height),
        }
    }

    /// Map a displayed-space region into natural space.
    #[must_use]
    pub fn to_natural(self, region: CropRegion) -> NaturalRect {
        NaturalRect {
            x: region.x * self.x,
            y: region.y * self.y,
            width: region.width * self.x,
            height: region.height * self.y,
        }
    }
}

/// A rectangle in natural (full-resolution) coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NaturalRect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Horizontal extent.
    pub width: f64,
    /// Vertical extent.
    pub height: f64,
}

impl NaturalRect {
    /// Snap to whole pixels and intersect with an image of size
    /// `image`.
    ///
    /// Returns `None` if nothing of the rectangle remains.
    #[must_use]
    pub fn to_pixels(self, image: Dimensions) -> Option<PixelRect> {
        let (x0, x1) = snap_span(self.x, self.width, image.width);
        let (y0, y1) = snap_span(self.y, self.height, image.height);
        if x1 <= x0 || y1 <= y0 {
            return None;
        }
        Some(PixelRect {
            x: x0,
            y: y0,
            width: x1 - x0,
            height: y1 - y0,
        })
    }
}

/// A rectangle of whole pixels inside an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelRect {
    /// Left column.
    pub x: u32,
    /// Top row.
    pub y: u32,
    /// Number of columns.
    pub width: u32,
    /// Number of rows.
    pub height: u32,
}

impl PixelRect {
    /// Width and height.
    #[must_use]
    pub const fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.width, self.height)
    }
}

/// The encoded result of a crop.
///
/// Holds no reference to the image it was cut from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CroppedArtifact {
    /// Encoded JPEG bytes. Never empty.
    pub bytes: Vec<u8>,
    /// Pixel dimensions of the encoded image.
    pub dimensions: Dimensions,
    /// The natural-resolution pixels the crop was sampled from.
    pub source_rect: PixelRect,
}

impl CroppedArtifact {
    /// MIME type of [`bytes`](Self::bytes).
    pub const MIME_TYPE: &'static str = "image/jpeg";
}

/// Output pixel dimensions for a displayed crop: the on-screen size
/// rounded to whole pixels.
#[must_use]
pub fn output_size(region: CropRegion) -> Dimensions {
    Dimensions::new(round_to_u32(region.width), round_to_u32(region.height))
}

/// Sample `source_rect` of `image` into a `dest`-sized RGB raster.
///
/// Transparent pixels are composited onto black, matching how a
/// browser canvas exports to JPEG.
///
/// # Errors
///
/// Returns [`CropError::Rasterize`] if `dest` is empty or
/// `source_rect` does not overlap the image.
pub fn rasterize_region(
    image: &DynamicImage,
    source_rect: NaturalRect,
    dest: Dimensions,
    filter: ResampleFilter,
) -> Result<(RgbImage, PixelRect), CropError> {
    if dest.is_empty() {
        return Err(CropError::Rasterize(format!(
            "destination size {}x{} is empty",
            dest.width, dest.height
        )));
    }
    let natural = Dimensions::new(image.width(), image.height());
    let pixels = source_rect.to_pixels(natural).ok_or_else(|| {
        CropError::Rasterize(format!(
            "source rectangle {source_rect:?} does not overlap the {}x{} image",
            natural.width, natural.height
        ))
    })?;

    let cropped = image.crop_imm(pixels.x, pixels.y, pixels.width, pixels.height);
    let scaled = if pixels.dimensions() == dest {
        cropped
    } else {
        cropped.resize_exact(dest.width, dest.height, filter.to_image_filter())
    };

    Ok((flatten_onto_black(&scaled.to_rgba8()), pixels))
}

/// Encode an RGB raster as JPEG.
///
/// # Errors
///
/// Returns [`CropError::Encode`] if the encoder fails and
/// [`CropError::Rasterize`] if it produces no bytes.
pub fn encode_jpeg(rgb: &RgbImage, quality: u8) -> Result<Vec<u8>, CropError> {
    let mut cursor = Cursor::new(Vec::new());
    let encoder = JpegEncoder::new_with_quality(&mut cursor, quality);
    encoder
        .write_image(
            rgb.as_raw(),
            rgb.width(),
            rgb.height(),
            image::ExtendedColorType::Rgb8,
        )
        .map_err(CropError::Encode)?;

    let bytes = cursor.into_inner();
    if bytes.is_empty() {
        return Err(CropError::Rasterize("encoder produced zero bytes".into()));
    }
    Ok(bytes)
}

/// Crop `region` (displayed space) out of `source` and encode it.
///
/// # Errors
///
/// Returns [`CropError::Rasterize`] or [`CropError::Encode`] if no
/// usable pixels come out. The caller keeps whatever artifact it
/// already had.
pub fn extract(
    source: &SourceImage,
    region: CropRegion,
    config: &CropConfig,
) -> Result<CroppedArtifact, CropError> {
    let scale = ScaleFactors::between(source.natural(), source.displayed());
    let natural_rect = scale.to_natural(region);
    let dest = output_size(region);

    let (rgb, source_rect) = rasterize_region(source.image(), natural_rect, dest, config.resample)?;
    let bytes = encode_jpeg(&rgb, config.effective_jpeg_quality())?;

    Ok(CroppedArtifact {
        bytes,
        dimensions: dest,
        source_rect,
    })
}

fn flatten_onto_black(rgba: &RgbaImage) -> RgbImage {
    RgbImage::from_fn(rgba.width(), rgba.height(), |x, y| {
        let [r, g, b, a] = rgba.get_pixel(x, y).0;
        let over_black = |c: u8| u8::try_from(u16::from(c) * u16::from(a) / 255).unwrap_or(u8::MAX);
        image::Rgb([over_black(r), over_black(g), over_black(b)])
    })
}

/// Round `[start, start + len)` to whole pixels, limited to `[0, max]`.
fn snap_span(start: f64, len: f64, max: u32) -> (u32, u32) {
    let max = f64::from(max);
    let lo = start.round().max(0.0).min(max);
    let hi = (start + len).round().max(0.0).min(max);
    (round_to_u32(lo), round_to_u32(hi))
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn round_to_u32(v: f64) -> u32 {
    // `as` saturates: NaN and negatives become 0.
    v.round() as u32
}
