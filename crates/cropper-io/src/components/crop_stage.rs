//! The interactive crop stage: image, crop rectangle, corner handles.
//!
//! Pressing inside the rectangle starts a move, pressing a handle
//! starts a resize. Once a gesture is active a transparent layer
//! covering the whole viewport is mounted on top of everything. It
//! receives every pointer move and the final release even when the
//! pointer leaves the image, and it is unmounted as soon as the
//! gesture ends by any path (release, cancel, leaving the window, or a
//! new image resetting the session). Unmounting it mid-gesture cancels
//! the gesture.
//!
//! Touch and pen input is implicitly captured by the element that got
//! `pointerdown`, so those moves never reach the capture layer. They
//! bubble from the rectangle or handle up to the stage, which forwards
//! them while a gesture is active.

use cropper_core::{CropRegion, GestureKind, Handle, Point, Size};
use dioxus::prelude::*;

/// Props for the [`CropStage`] component.
#[derive(Props, Clone, PartialEq)]
pub struct CropStageProps {
    /// Object URL of the loaded image.
    image_url: String,
    /// Size the image is drawn at.
    displayed: Size,
    /// Current crop rectangle in displayed coordinates.
    region: CropRegion,
    /// The gesture in progress, if any.
    active: Option<GestureKind>,
    /// Pointer pressed on the rectangle or a handle.
    on_press: EventHandler<(GestureKind, Point)>,
    /// Pointer moved while a gesture is active.
    on_move: EventHandler<Point>,
    /// Pointer released or left the window.
    on_release: EventHandler<()>,
    /// The platform cancelled the pointer stream.
    on_cancel: EventHandler<()>,
}

/// Image with a draggable, resizable crop rectangle.
#[component]
pub fn CropStage(props: CropStageProps) -> Element {
    let Size { width, height } = props.displayed;
    let CropRegion {
        x,
        y,
        width: crop_width,
        height: crop_height,
    } = props.region;
    let image_url = props.image_url;
    let image_style = format!("width: {width}px; height: {height}px;");
    let region_style =
        format!("left: {x}px; top: {y}px; width: {crop_width}px; height: {crop_height}px;");
    let handles = Handle::ALL.map(|h| {
        (
            h,
            format!("{h:?}"),
            format!("crop-handle {}", handle_class(h)),
            format!("cursor: {};", h.cursor()),
        )
    });
    let on_press = props.on_press;
    let on_move = props.on_move;
    let on_release = props.on_release;
    let on_cancel = props.on_cancel;
    let gesture_active = props.active.is_some();

    rsx! {
        div {
            class: "crop-stage",
            style: "{image_style}",
            onpointermove: move |evt: PointerEvent| {
                if gesture_active {
                    evt.prevent_default();
                    on_move.call(pointer_position(&evt));
                }
            },
            onpointerup: move |_| {
                if gesture_active {
                    on_release.call(());
                }
            },
            onpointercancel: move |_| {
                if gesture_active {
                    on_cancel.call(());
                }
            },

            img {
                src: "{image_url}",
                alt: "Original",
                class: "crop-image",
                draggable: "false",
                style: "{image_style}",
            }

            div {
                class: "crop-region",
                style: "{region_style}",
                onpointerdown: move |evt: PointerEvent| {
                    evt.prevent_default();
                    on_press.call((GestureKind::Move, pointer_position(&evt)));
                },

                div { class: "crop-border" }
                div { class: "crop-shade" }
                div { class: "crop-outline" }

                for (handle, key, class, cursor_style) in handles {
                    div {
                        key: "{key}",
                        class: "{class}",
                        style: "{cursor_style}",
                        onpointerdown: move |evt: PointerEvent| {
                            evt.prevent_default();
                            evt.stop_propagation();
                            on_press.call((GestureKind::Resize(handle), pointer_position(&evt)));
                        },
                    }
                }
            }
        }

        if let Some(kind) = props.active {
            GestureCapture {
                cursor: gesture_cursor(kind),
                on_move: on_move,
                on_release: on_release,
                on_cancel: on_cancel,
            }
        }
    }
}

/// Full-viewport layer that owns the pointer while a gesture runs.
#[component]
fn GestureCapture(
    cursor: &'static str,
    on_move: EventHandler<Point>,
    on_release: EventHandler<()>,
    on_cancel: EventHandler<()>,
) -> Element {
    let style = format!("cursor: {cursor};");

    // No-op once the gesture has ended normally.
    use_drop(move || on_cancel.call(()));

    rsx! {
        div {
            class: "gesture-capture",
            style: "{style}",
            onpointermove: move |evt: PointerEvent| {
                evt.prevent_default();
                on_move.call(pointer_position(&evt));
            },
            onpointerup: move |_| on_release.call(()),
            onpointerleave: move |_| on_release.call(()),
            onpointercancel: move |_| on_cancel.call(()),
        }
    }
}

/// Pointer position in viewport coordinates.
///
/// Gestures only use differences between positions, so the reference
/// frame does not need to match the image.
fn pointer_position(evt: &PointerEvent) -> Point {
    let p = evt.client_coordinates();
    Point::new(p.x, p.y)
}

const fn handle_class(handle: Handle) -> &'static str {
    match handle {
        Handle::TopLeft => "crop-handle-nw",
        Handle::BottomRight => "crop-handle-se",
    }
}

const fn gesture_cursor(kind: GestureKind) -> &'static str {
    match kind {
        GestureKind::Move => "move",
        GestureKind::Resize(handle) => handle.cursor(),
    }
}
