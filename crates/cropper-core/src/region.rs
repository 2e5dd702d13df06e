//! The crop rectangle and the single clamp that keeps it valid.
//!
//! Every gesture proposes a candidate rectangle and passes it through
//! [`Bounds::clamp`]. No other code adjusts a [`CropRegion`] to fit
//! the image, so the invariants below hold from one place:
//!
//! - `0 <= x` and `x + width <= bounds.width`
//! - `0 <= y` and `y + height <= bounds.height`
//! - `width >= min` and `height >= min`
//!
//! where `min` is the configured minimum size, lowered to the image
//! extent on an axis where the image itself is smaller than that.

use serde::{Deserialize, Serialize};

use crate::types::Size;

/// A crop rectangle in displayed coordinate space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CropRegion {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Horizontal extent.
    pub width: f64,
    /// Vertical extent.
    pub height: f64,
}

impl CropRegion {
    /// Create a new region. No clamping is applied.
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge (`x + width`).
    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge (`y + height`).
    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

/// The area a crop region must stay inside: the displayed image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    size: Size,
    min_size: f64,
}

impl Bounds {
    /// Bounds for an image rendered at `size`, with the given minimum
    /// crop size.
    ///
    /// Negative or non-finite extents are treated as zero.
    #[must_use]
    pub fn new(size: Size, min_size: f64) -> Self {
        Self {
            size: Size::new(non_negative(size.width), non_negative(size.height)),
            min_size: non_negative(min_size),
        }
    }

    /// The displayed image extent.
    #[must_use]
    pub const fn size(&self) -> Size {
        self.size
    }

    /// Effective minimum width: the configured minimum, or the image
    /// width if that is smaller.
    #[must_use]
    pub fn min_width(&self) -> f64 {
        self.min_size.min(self.size.width)
    }

    /// Effective minimum height.
    #[must_use]
    pub fn min_height(&self) -> f64 {
        self.min_size.min(self.size.height)
    }

    /// Return the nearest region to `candidate` that satisfies every
    /// invariant.
    ///
    /// Size is clamped first, then position, so a rectangle pushed past
    /// an edge slides back inside instead of shrinking. Applying the
    /// clamp to its own output returns the same region.
    #[must_use]
    pub fn clamp(&self, candidate: CropRegion) -> CropRegion {
        let width = bounded(candidate.width, self.min_width(), self.size.width);
        let height = bounded(candidate.height, self.min_height(), self.size.height);
        let x = bounded(candidate.x, 0.0, self.size.width - width);
        let y = bounded(candidate.y, 0.0, self.size.height - height);
        CropRegion::new(x, y, width, height)
    }

    /// A `default_size` square centered on the image, clamped to fit.
    #[must_use]
    pub fn centered(&self, default_size: f64) -> CropRegion {
        let width = bounded(default_size, self.min_width(), self.size.width);
        let height = bounded(default_size, self.min_height(), self.size.height);
        CropRegion::new(
            (self.size.width - width) / 2.0,
            (self.size.height - height) / 2.0,
            width,
            height,
        )
    }

    /// Whether `region` already satisfies every invariant.
    #[must_use]
    pub fn contains(&self, region: &CropRegion) -> bool {
        region.x >= 0.0
            && region.y >= 0.0
            && region.right() <= self.size.width
            && region.bottom() <= self.size.height
            && region.width >= self.min_width()
            && region.height >= self.min_height()
    }
}

/// Clamp `value` into `[lo, hi]`, preferring `hi` if the range is
/// inverted. NaN maps to `lo`.
pub(crate) fn bounded(value: f64, lo: f64, hi: f64) -> f64 {
    value.max(lo).min(hi)
}

fn non_negative(value: f64) -> f64 {
    if value.is_finite() { value.max(0.0) } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds() -> Bounds {
        Bounds::new(Size::new(500.0, 400.0), 50.0)
    }

    fn sample_candidates() -> Vec<CropRegion> {
        let coords = [-1e6, -75.0, -0.5, 0.0, 10.0, 123.4, 450.0, 499.0, 800.0, 1e6];
        let sizes = [-20.0, 0.0, 49.9, 50.0, 120.0, 399.0, 400.0, 700.0];
        let mut out = Vec::new();
        for &x in &coords {
            for &y in &coords {
                for &w in &sizes {
                    for &h in &sizes {
                        out.push(CropRegion::new(x, y, w, h));
                    }
                }
            }
        }
        out
    }

    #[test]
    fn clamp_is_idempotent() {
        let b = bounds();
        for candidate in sample_candidates() {
            let once = b.clamp(candidate);
            assert_eq!(b.clamp(once), once, "candidate {candidate:?}");
        }
    }

    #[test]
    fn clamp_output_satisfies_invariants() {
        let b = bounds();
        for candidate in sample_candidates() {
            let r = b.clamp(candidate);
            assert!(b.contains(&r), "candidate {candidate:?} clamped to {r:?}");
        }
    }

    #[test]
    fn valid_region_is_unchanged() {
        let r = CropRegion::new(10.0, 20.0, 100.0, 60.0);
        assert_eq!(bounds().clamp(r), r);
    }

    #[test]
    fn region_past_right_edge_slides_back() {
        let r = bounds().clamp(CropRegion::new(450.0, 0.0, 100.0, 100.0));
        assert_eq!(r, CropRegion::new(400.0, 0.0, 100.0, 100.0));
    }

    #[test]
    fn undersized_region_grows_to_minimum() {
        let r = bounds().clamp(CropRegion::new(10.0, 10.0, 5.0, -30.0));
        assert_eq!(r, CropRegion::new(10.0, 10.0, 50.0, 50.0));
    }

    #[test]
    fn oversized_region_is_limited_to_image() {
        let r = bounds().clamp(CropRegion::new(-10.0, -10.0, 900.0, 900.0));
        assert_eq!(r, CropRegion::new(0.0, 0.0, 500.0, 400.0));
    }

    #[test]
    fn non_finite_candidate_is_clamped() {
        let r = bounds().clamp(CropRegion::new(f64::NAN, f64::INFINITY, f64::NAN, 80.0));
        assert!(bounds().contains(&r));
        assert_eq!(r, CropRegion::new(0.0, 320.0, 50.0, 80.0));
    }

    #[test]
    fn image_smaller_than_minimum_uses_image_extent() {
        let b = Bounds::new(Size::new(30.0, 300.0), 50.0);
        let r = b.clamp(CropRegion::new(5.0, 5.0, 10.0, 10.0));
        assert_eq!(r, CropRegion::new(0.0, 5.0, 30.0, 50.0));
        assert!(b.contains(&r));
    }

    #[test]
    fn centered_default_fits_large_image() {
        let r = bounds().centered(200.0);
        assert_eq!(r, CropRegion::new(150.0, 100.0, 200.0, 200.0));
    }

    #[test]
    fn centered_default_shrinks_to_small_image() {
        let b = Bounds::new(Size::new(120.0, 80.0), 50.0);
        let r = b.centered(200.0);
        assert_eq!(r, CropRegion::new(0.0, 0.0, 120.0, 80.0));
    }
}
