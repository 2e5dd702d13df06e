//! Shared types for the cropper core.

use std::ops::Sub;

use serde::{Deserialize, Serialize};

/// Re-export so downstream crates can hold decoded images without
/// depending on `image` directly.
pub use image::{DynamicImage, ImageFormat, RgbImage};

/// A position in displayed (on-screen) coordinate space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal position in CSS pixels.
    pub x: f64,
    /// Vertical position in CSS pixels.
    pub y: f64,
}

impl Point {
    /// Create a new point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Sub for Point {
    type Output = Delta;

    fn sub(self, rhs: Self) -> Delta {
        Delta {
            dx: self.x - rhs.x,
            dy: self.y - rhs.y,
        }
    }
}

/// Pointer displacement since the start of a gesture.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Delta {
    /// Horizontal displacement (positive = right).
    pub dx: f64,
    /// Vertical displacement (positive = down).
    pub dy: f64,
}

impl Delta {
    /// Create a new delta.
    #[must_use]
    pub const fn new(dx: f64, dy: f64) -> Self {
        Self { dx, dy }
    }
}

/// Extent of the image as rendered, in CSS pixels.
///
/// May be fractional and may differ from the natural [`Dimensions`]
/// when the layout scales the image down.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    /// Rendered width.
    pub width: f64,
    /// Rendered height.
    pub height: f64,
}

impl Size {
    /// Create a new size.
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Image dimensions in whole pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Dimensions {
    /// Create new dimensions.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Returns `true` if either axis is zero.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// The same extent as a floating-point [`Size`].
    #[must_use]
    pub fn to_size(self) -> Size {
        Size::new(f64::from(self.width), f64::from(self.height))
    }
}

/// Errors produced while loading or cropping an image.
///
/// Geometry that would violate the crop region invariants is never an
/// error: it is clamped by [`crate::Bounds::clamp`].
#[derive(Debug, thiserror::Error)]
pub enum CropError {
    /// The selected file was empty.
    #[error("input image data is empty")]
    EmptyInput,

    /// The selected file could not be decoded as an image.
    #[error("failed to decode image: {0}")]
    ImageDecode(#[source] image::ImageError),

    /// The image decoded but has no pixels.
    #[error("image has zero width or height")]
    EmptyImage,

    /// Rasterizing the crop produced no pixel data.
    #[error("crop produced no pixel data: {0}")]
    Rasterize(String),

    /// Encoding the cropped pixels failed.
    #[error("failed to encode cropped image: {0}")]
    Encode(#[source] image::ImageError),
}

impl CropError {
    /// Returns `true` for errors raised while decoding a selected file.
    ///
    /// These leave any previously loaded image in place.
    #[must_use]
    pub const fn is_decode_failure(&self) -> bool {
        matches!(
            self,
            Self::EmptyInput | Self::ImageDecode(_) | Self::EmptyImage
        )
    }
}
