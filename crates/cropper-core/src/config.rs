//! Tunable parameters for cropping and export.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Resampling filter used when the natural-resolution crop is scaled
/// to the on-screen crop size.
///
/// Ordered from fastest/lowest-quality to slowest/highest-quality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ResampleFilter {
    /// Nearest-neighbor: fastest, blocky artifacts.
    Nearest,
    /// Bilinear interpolation: fast, decent quality.
    #[default]
    Triangle,
    /// Bicubic (Catmull-Rom): moderate speed, good quality.
    CatmullRom,
    /// Gaussian: moderate speed, smooth output.
    Gaussian,
    /// Lanczos with 3 lobes: slowest, sharpest.
    Lanczos3,
}

impl ResampleFilter {
    /// Convert to the `image` crate's `FilterType`.
    #[must_use]
    pub const fn to_image_filter(self) -> image::imageops::FilterType {
        match self {
            Self::Nearest => image::imageops::FilterType::Nearest,
            Self::Triangle => image::imageops::FilterType::Triangle,
            Self::CatmullRom => image::imageops::FilterType::CatmullRom,
            Self::Gaussian => image::imageops::FilterType::Gaussian,
            Self::Lanczos3 => image::imageops::FilterType::Lanczos3,
        }
    }
}

impl fmt::Display for ResampleFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nearest => f.write_str("Nearest"),
            Self::Triangle => f.write_str("Triangle"),
            Self::CatmullRom => f.write_str("CatmullRom"),
            Self::Gaussian => f.write_str("Gaussian"),
            Self::Lanczos3 => f.write_str("Lanczos3"),
        }
    }
}

/// Configuration for the crop session.
///
/// Missing fields fall back to their defaults when deserialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CropConfig {
    /// Smallest allowed crop width and height in displayed pixels.
    pub min_size: f64,

    /// Width and height of the crop region placed over a newly
    /// loaded image, before clamping to the image bounds.
    pub default_size: f64,

    /// JPEG quality for the exported artifact (1-100).
    pub jpeg_quality: u8,

    /// Filter used to scale the natural-resolution crop to the
    /// displayed crop size.
    pub resample: ResampleFilter,

    /// File name offered when the artifact is downloaded.
    pub output_filename: String,

    /// File extensions advertised by the file picker in addition to
    /// `image/*`.
    ///
    /// Advisory only: anything the decoder recognizes is accepted.
    pub accepted_extensions: Vec<String>,
}

impl CropConfig {
    /// Default minimum crop size.
    pub const DEFAULT_MIN_SIZE: f64 = 50.0;
    /// Default initial crop size.
    pub const DEFAULT_SIZE: f64 = 200.0;
    /// Quality browsers use for `canvas.toBlob(.., "image/jpeg")`.
    pub const DEFAULT_JPEG_QUALITY: u8 = 92;
    /// Default download file name.
    pub const DEFAULT_OUTPUT_FILENAME: &'static str = "cropped-image.jpeg";
    /// Default extensions offered by the file picker.
    pub const DEFAULT_EXTENSIONS: &'static [&'static str] =
        &["png", "jpg", "jpeg", "gif", "bmp", "webp"];

    /// The `accept` attribute value for an `<input type="file">`.
    ///
    /// Always starts with `image/*`; the extensions pick up files whose
    /// MIME type the platform does not report.
    #[must_use]
    pub fn accept_attribute(&self) -> String {
        std::iter::once("image/*".to_owned())
            .chain(self.accepted_extensions.iter().map(|ext| format!(".{ext}")))
            .collect::<Vec<_>>()
            .join(",")
    }

    /// JPEG quality clamped to the range the encoder accepts.
    #[must_use]
    pub fn effective_jpeg_quality(&self) -> u8 {
        self.jpeg_quality.clamp(1, 100)
    }
}

impl Default for CropConfig {
    fn default() -> Self {
        Self {
            min_size: Self::DEFAULT_MIN_SIZE,
            default_size: Self::DEFAULT_SIZE,
            jpeg_quality: Self::DEFAULT_JPEG_QUALITY,
            resample: ResampleFilter::default(),
            output_filename: Self::DEFAULT_OUTPUT_FILENAME.to_owned(),
            accepted_extensions: Self::DEFAULT_EXTENSIONS
                .iter()
                .map(|&ext| ext.to_owned())
                .collect(),
        }
    }
}
