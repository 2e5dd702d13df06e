//! Session state for one cropping widget.
//!
//! [`CropSession`] ties the loaded image, the crop region, the gesture
//! controller, and the latest artifact together so the invariants
//! spanning them hold: a new image always resets the region and drops
//! the old artifact, and a failed crop never replaces a good one.

use crate::config::CropConfig;
use crate::extract::{self, CroppedArtifact};
use crate::gesture::{GestureController, GestureKind};
use crate::region::{Bounds, CropRegion};
use crate::source::SourceImage;
use crate::types::{CropError, Dimensions, Point};

/// Identifies one image load so a slow load cannot overwrite a newer
/// one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LoadTicket(u64);

/// A download offered to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Export<'a> {
    /// Suggested file name.
    pub filename: &'a str,
    /// MIME type of `bytes`.
    pub mime_type: &'static str,
    /// Encoded image.
    pub bytes: &'a [u8],
    /// Pixel size of the encoded image.
    pub dimensions: Dimensions,
}

/// Everything the widget remembers between events.
#[derive(Debug, Clone, Default)]
pub struct CropSession {
    config: CropConfig,
    source: Option<SourceImage>,
    region: CropRegion,
    gestures: GestureController,
    artifact: Option<CroppedArtifact>,
    generation: u64,
}

impl CropSession {
    /// An empty session.
    #[must_use]
    pub fn new(config: CropConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// The session configuration.
    #[must_use]
    pub const fn config(&self) -> &CropConfig {
        &self.config
    }

    /// The loaded image, if any.
    #[must_use]
    pub const fn source(&self) -> Option<&SourceImage> {
        self.source.as_ref()
    }

    /// The current crop rectangle in displayed coordinates.
    ///
    /// Meaningless until an image is loaded.
    #[must_use]
    pub const fn region(&self) -> CropRegion {
        self.region
    }

    /// The most recent successful crop.
    #[must_use]
    pub const fn artifact(&self) -> Option<&CroppedArtifact> {
        self.artifact.as_ref()
    }

    /// Whether a gesture is in progress.
    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        self.gestures.is_active()
    }

    /// The active gesture's kind, if any.
    #[must_use]
    pub fn active_gesture(&self) -> Option<GestureKind> {
        self.gestures.active().map(|g| g.kind)
    }

    /// Bounds of the loaded image.
    #[must_use]
    pub fn bounds(&self) -> Option<Bounds> {
        self.source
            .as_ref()
            .map(|s| Bounds::new(s.displayed(), self.config.min_size))
    }

    /// Number of loads started so far.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Start an asynchronous load. Any load started earlier becomes
    /// stale.
    pub const fn begin_load(&mut self) -> LoadTicket {
        self.generation += 1;
        LoadTicket(self.generation)
    }

    /// Whether `ticket` belongs to the most recent load.
    #[must_use]
    pub const fn is_current(&self, ticket: LoadTicket) -> bool {
        ticket.0 == self.generation
    }

    /// Finish a load started with [`begin_load`](Self::begin_load).
    ///
    /// Returns `Ok(true)` if the image was installed and `Ok(false)` if
    /// the ticket is stale, in which case the outcome (including any
    /// error) is discarded.
    ///
    /// # Errors
    ///
    /// Returns the decode error for a current ticket. The previously
    /// loaded image, region, and artifact are left untouched.
    pub fn complete_load(
        &mut self,
        ticket: LoadTicket,
        outcome: Result<SourceImage, CropError>,
    ) -> Result<bool, CropError> {
        if !self.is_current(ticket) {
            return Ok(false);
        }
        self.install(outcome?);
        Ok(true)
    }

    /// Replace the image immediately, superseding any pending load.
    pub fn load(&mut self, source: SourceImage) {
        self.generation += 1;
        self.install(source);
    }

    fn install(&mut self, source: SourceImage) {
        let bounds = Bounds::new(source.displayed(), self.config.min_size);
        self.region = bounds.centered(self.config.default_size);
        self.source = Some(source);
        self.artifact = None;
        let _ = self.gestures.cancel();
    }

    /// Pointer pressed on the crop rectangle (`Move`) or a handle.
    ///
    /// Returns `false` if no image is loaded or a gesture is already
    /// running.
    pub fn press(&mut self, kind: GestureKind, pointer: Point) -> bool {
        if self.source.is_none() {
            return false;
        }
        self.gestures.press(kind, pointer, self.region)
    }

    /// Pointer moved during a gesture. Returns `true` if the region
    /// changed.
    pub fn pointer_moved(&mut self, pointer: Point) -> bool {
        let Some(bounds) = self.bounds() else {
            return false;
        };
        match self.gestures.drag(pointer, &bounds) {
            Some(region) if region != self.region => {
                self.region = region;
                true
            }
            _ => false,
        }
    }

    /// Pointer released. The region already reflects the last move.
    pub fn pointer_released(&mut self) -> bool {
        self.gestures.release()
    }

    /// The gesture was interrupted by the platform (e.g. the pointer
    /// was captured elsewhere). Restores the region it started from.
    pub fn pointer_cancelled(&mut self) -> bool {
        match self.gestures.cancel() {
            Some(start) => {
                self.region = start;
                true
            }
            None => false,
        }
    }

    /// Crop the current region and keep the result as the artifact.
    ///
    /// # Errors
    ///
    /// Returns [`CropError::Rasterize`] if no image is loaded or the
    /// crop yields no pixels, and [`CropError::Encode`] if encoding
    /// fails. The previous artifact stays available either way.
    pub fn crop(&mut self) -> Result<&CroppedArtifact, CropError> {
        let source = self
            .source
            .as_ref()
            .ok_or_else(|| CropError::Rasterize("no image loaded".into()))?;
        let artifact = extract::extract(source, self.region, &self.config)?;
        Ok(&*self.artifact.insert(artifact))
    }

    /// The download to offer, or `None` if nothing has been cropped.
    #[must_use]
    pub fn export(&self) -> Option<Export<'_>> {
        self.artifact.as_ref().map(|a| Export {
            filename: &self.config.output_filename,
            mime_type: CroppedArtifact::MIME_TYPE,
            bytes: &a.bytes,
            dimensions: a.dimensions,
        })
    }
}
