//! Dioxus UI components for cropper.
//!
//! Provides the file upload zone, the interactive crop stage with its
//! gesture capture layer, and the crop/download panel.

mod crop_stage;
mod export;
mod upload;

pub use crop_stage::CropStage;
pub use export::{CropPreview, ExportPanel};
pub use upload::FileUpload;
