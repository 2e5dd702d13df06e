//! cropper-io: Browser I/O and Dioxus component library.
//!
//! Handles file uploads, object URLs for decoded and cropped images,
//! Blob downloads, console logging, and provides the interactive crop
//! stage and export panel for the cropper web application.

pub mod components;
pub mod console;
pub mod download;
pub mod loader;
pub mod raster;

pub use components::{CropPreview, CropStage, ExportPanel, FileUpload};
pub use loader::{LoadError, LoadedImage};
pub use raster::ObjectUrl;
