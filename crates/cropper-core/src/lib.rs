//! cropper-core: crop geometry, pointer gestures, and pixel extraction
//! (sans-IO).
//!
//! A user loads an image, drags a rectangle over it, and exports the
//! pixels under the rectangle as a JPEG. This crate holds all of the
//! logic for that:
//!
//! - [`source`] decodes the selected file and computes its displayed size
//! - [`region`] owns the crop rectangle and the one clamp that keeps it
//!   inside the image
//! - [`gesture`] turns press/drag/release sequences into candidate
//!   rectangles
//! - [`extract`] maps the rectangle to natural resolution, resamples,
//!   and encodes
//! - [`session`] wires the above into the state of one widget
//!
//! This crate has **no I/O dependencies**: it takes byte slices and
//! pointer coordinates and returns values. All browser interaction
//! lives in `cropper-io`.

pub mod config;
pub mod extract;
pub mod gesture;
pub mod region;
pub mod session;
pub mod source;
pub mod types;

pub use config::{CropConfig, ResampleFilter};
pub use extract::{CroppedArtifact, NaturalRect, PixelRect, ScaleFactors, extract};
pub use gesture::{Gesture, GestureController, GestureKind, Handle};
pub use region::{Bounds, CropRegion};
pub use session::{CropSession, Export, LoadTicket};
pub use source::SourceImage;
pub use types::{CropError, Delta, Dimensions, Point, Size};
