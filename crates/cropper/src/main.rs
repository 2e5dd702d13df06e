use std::rc::Rc;

use cropper_core::{CropConfig, CropSession, GestureKind, Point};
use cropper_io::loader::{self, LoadError, LoadedImage};
use cropper_io::{CropPreview, CropStage, ExportPanel, FileUpload, ObjectUrl, console, download};
use dioxus::prelude::*;

/// Stylesheet for the page, inlined so no asset server is needed.
const STYLE: &str = include_str!("../assets/cropper.css");

/// Formats listed under the upload button.
const FORMAT_HINT: &str = "PNG, JPEG, GIF, BMP, WebP";

fn main() {
    console_error_panic_hook::set_once();
    dioxus::launch(app);
}

/// Root application component.
///
/// Owns the [`CropSession`] and the object URLs that display its image
/// and its latest crop, and wires them to the upload, crop stage, and
/// export components.
#[allow(clippy::too_many_lines)]
fn app() -> Element {
    // --- Application state ---
    let mut session = use_signal(|| CropSession::new(CropConfig::default()));
    let mut image_url = use_signal(|| Option::<ObjectUrl>::None);
    let mut preview = use_signal(|| Option::<Rc<CropPreview>>::None);
    let mut error = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| false);
    let mut cropping = use_signal(|| false);
    let mut container = use_signal(|| Option::<Rc<MountedData>>::None);

    // --- File upload handler ---
    // Each upload takes a ticket; a load that finishes after a newer
    // one started is discarded, so the last selected file always wins.
    let on_upload = move |(bytes, name): (Vec<u8>, String)| {
        let ticket = session.write().begin_load();
        loading.set(true);

        spawn(async move {
            // Yield so the "Loading..." state paints before decoding
            // blocks the thread.
            gloo_timers::future::TimeoutFuture::new(0).await;

            let width = loader::measure_width(container()).await;
            if !session.peek().is_current(ticket) {
                return;
            }

            let outcome = loader::load_image(&bytes, width);
            let mut state = session.write();
            match outcome {
                Ok(LoadedImage { source, url }) => {
                    let natural = source.natural();
                    let displayed = source.displayed();
                    if matches!(state.complete_load(ticket, Ok(source)), Ok(true)) {
                        image_url.set(Some(url));
                        preview.set(None);
                        error.set(None);
                        console::info(&format!(
                            "loaded {name}: {}x{} px, displayed at {:.0}x{:.0}",
                            natural.width, natural.height, displayed.width, displayed.height,
                        ));
                    }
                }
                Err(LoadError::Decode(e)) => {
                    if let Err(e) = state.complete_load(ticket, Err(e)) {
                        console::warn(&format!("failed to load {name}: {e}"));
                        error.set(Some(format!("Could not load {name}: {e}")));
                    }
                }
                Err(e) => {
                    console::error(&format!("failed to display {name}: {e}"));
                    error.set(Some(format!("Could not load {name}: {e}")));
                }
            }
            drop(state);
            loading.set(false);
        });
    };

    // --- Gesture handlers ---
    let on_press = move |(kind, pointer): (GestureKind, Point)| {
        session.write().press(kind, pointer);
    };
    let on_move = move |pointer: Point| {
        session.write().pointer_moved(pointer);
    };
    let on_release = move |()| {
        session.write().pointer_released();
    };
    // Also fired when the capture layer unmounts after a normal release.
    let on_cancel = move |()| {
        if session.peek().is_dragging() {
            session.write().pointer_cancelled();
        }
    };

    // --- Crop handler ---
    let on_crop = move |()| {
        if cropping() {
            return;
        }
        cropping.set(true);

        spawn(async move {
            gloo_timers::future::TimeoutFuture::new(0).await;

            let started = web_time::Instant::now();
            let mut state = session.write();
            let outcome = state.crop().map(|artifact| artifact.dimensions);
            let shown = state
                .export()
                .map(|export| ObjectUrl::from_bytes(export.bytes, export.mime_type));
            drop(state);

            match (outcome, shown) {
                (Ok(dimensions), Some(Ok(url))) => {
                    console::info(&format!(
                        "cropped {}x{} in {:?}",
                        dimensions.width,
                        dimensions.height,
                        started.elapsed(),
                    ));
                    preview.set(Some(Rc::new(CropPreview { url, dimensions })));
                    error.set(None);
                }
                (Ok(_), Some(Err(e))) => {
                    // The crop can still be downloaded; only the preview is missing.
                    console::error(&format!("failed to display crop: {e}"));
                    preview.set(None);
                    error.set(Some(format!("Could not show the cropped image: {e}")));
                }
                (Ok(_), None) => {}
                (Err(e), _) => {
                    // The previous crop, if any, stays available.
                    console::warn(&format!("crop failed: {e}"));
                    error.set(Some(format!("Crop failed: {e}")));
                }
            }
            cropping.set(false);
        });
    };

    // --- Download handler ---
    // Filename, MIME type, and bytes all come from the session's latest
    // crop.
    let on_download = move |()| {
        let state = session.peek();
        let Some(export) = state.export() else {
            return;
        };
        match download::download_bytes(export.bytes, export.mime_type, export.filename) {
            Ok(()) => console::info(&format!(
                "downloaded {} ({} bytes)",
                export.filename,
                export.bytes.len()
            )),
            Err(e) => {
                console::error(&format!("download failed: {e}"));
                error.set(Some(format!("Download failed: {e}")));
            }
        }
    };

    // --- Derived view state ---
    let state = session.read();
    let displayed = state.source().map(cropper_core::SourceImage::displayed);
    let region = state.region();
    let active = state.active_gesture();
    let can_download = state.artifact().is_some();
    let accept = state.config().accept_attribute();
    drop(state);
    let url = image_url.read().as_ref().map(|u| u.as_str().to_owned());

    // --- Layout ---
    rsx! {
        style { dangerous_inner_html: STYLE }

        div { class: "page",
            div { class: "card",
                header { class: "card-header",
                    h1 { class: "title", "Image Cropper" }
                    p { class: "text-muted",
                        "Load an image, drag the rectangle over the part you want, and download it."
                    }
                }

                div { class: "card-body",
                    FileUpload {
                        on_upload: on_upload,
                        accept: accept,
                        hint: FORMAT_HINT.to_owned(),
                    }

                    if let Some(ref err) = error() {
                        div { class: "error-box",
                            p { class: "text-error", "{err}" }
                        }
                    }

                    if loading() {
                        p { class: "text-secondary pulse", "Loading..." }
                    }

                    div {
                        class: "stage-container",
                        onmounted: move |evt: MountedEvent| container.set(Some(evt.data())),

                        if let (Some(displayed), Some(url)) = (displayed, url) {
                            CropStage {
                                image_url: url,
                                displayed: displayed,
                                region: region,
                                active: active,
                                on_press: on_press,
                                on_move: on_move,
                                on_release: on_release,
                                on_cancel: on_cancel,
                            }
                        } else if !loading() {
                            p { class: "text-placeholder", "Upload an image to get started" }
                        }
                    }

                    ExportPanel {
                        preview: preview(),
                        can_crop: displayed.is_some(),
                        can_download: can_download,
                        busy: cropping(),
                        on_crop: on_crop,
                        on_download: on_download,
                    }
                }
            }
        }
    }
}
