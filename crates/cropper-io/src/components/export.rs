//! Crop and download controls with a preview of the last crop.

use std::rc::Rc;

use cropper_core::Dimensions;
use dioxus::prelude::*;
use dioxus_free_icons::Icon;
use dioxus_free_icons::icons::ld_icons::{LdCrop, LdDownload};

use crate::raster::ObjectUrl;

/// What the browser shows of the latest crop.
///
/// Display only. Downloads read the bytes from the session so the file
/// always matches the most recent crop.
#[derive(Debug)]
pub struct CropPreview {
    /// URL of the encoded artifact, revoked when this value is dropped.
    pub url: ObjectUrl,
    /// Pixel dimensions of the artifact.
    pub dimensions: Dimensions,
}

/// Props for the [`ExportPanel`] component.
#[derive(Props, Clone)]
pub struct ExportPanelProps {
    /// Preview of the latest crop, if it could be displayed.
    /// Wrapped in `Rc` so re-renders compare by pointer.
    preview: Option<Rc<CropPreview>>,
    /// Whether an image is loaded; cropping needs one.
    can_crop: bool,
    /// Whether a crop exists to download.
    can_download: bool,
    /// A crop is being computed.
    busy: bool,
    /// Crop button pressed.
    on_crop: EventHandler<()>,
    /// Download button pressed.
    on_download: EventHandler<()>,
}

impl PartialEq for ExportPanelProps {
    fn eq(&self, other: &Self) -> bool {
        let preview_eq = match (&self.preview, &other.preview) {
            (Some(a), Some(b)) => Rc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        };
        preview_eq
            && self.can_crop == other.can_crop
            && self.can_download == other.can_download
            && self.busy == other.busy
            && self.on_crop == other.on_crop
            && self.on_download == other.on_download
    }
}

/// "Crop Image" button, preview of the result, and "Download" button.
#[component]
pub fn ExportPanel(props: ExportPanelProps) -> Element {
    let on_crop = props.on_crop;
    let on_download = props.on_download;
    let crop_enabled = props.can_crop && !props.busy;
    let crop_label = if props.busy { "Cropping..." } else { "Crop Image" };
    let preview = props.preview.as_ref().map(|p| {
        (
            p.url.as_str().to_owned(),
            format!("{} x {} px, JPEG", p.dimensions.width, p.dimensions.height),
        )
    });

    rsx! {
        div { class: "export-panel",
            if props.can_crop {
                button {
                    class: if crop_enabled { "btn btn-primary btn-wide" } else { "btn btn-disabled btn-wide" },
                    disabled: !crop_enabled,
                    onclick: move |_| on_crop.call(()),
                    Icon { width: 20, height: 20, icon: LdCrop }
                    "{crop_label}"
                }
            }

            if props.can_download {
                div { class: "cropped-result",
                    h3 { class: "heading", "Cropped Image" }
                    if let Some((url, caption)) = preview {
                        img {
                            src: "{url}",
                            alt: "Cropped",
                            class: "cropped-image",
                        }
                        p { class: "text-muted", "{caption}" }
                    }
                    button {
                        class: "btn btn-success btn-wide",
                        onclick: move |_| on_download.call(()),
                        Icon { width: 20, height: 20, icon: LdDownload }
                        "Download Cropped Image"
                    }
                }
            }
        }
    }
}
