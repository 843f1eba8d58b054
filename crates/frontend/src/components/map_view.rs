use dioxus::html::geometry::WheelDelta;
use dioxus::html::input_data::MouseButton;
use dioxus::prelude::*;
use waypoint_shared::models::Position;
use waypoint_shared::viewport::{Viewport, ZoomDirection};

use crate::api::MarkerData;

const MAP_CONTAINER_ID: &str = "map-viewport";

/// Drag threshold in pixels — movement below this is treated as a tap.
const DRAG_THRESHOLD: f64 = 3.0;

/// Touch drag threshold — larger than mouse because touch is less precise.
const TOUCH_DRAG_THRESHOLD: f64 = 8.0;

/// Tap hit radius around a marker, in screen pixels.
const TAP_RADIUS_PX: f64 = 48.0;

// ---------------------------------------------------------------------------
// DOM helpers
// ---------------------------------------------------------------------------

/// Get the bounding client rect of the map container element.
fn container_rect() -> Option<web_sys::DomRect> {
    let document = web_sys::window()?.document()?;
    let element = document.get_element_by_id(MAP_CONTAINER_ID)?;
    Some(element.get_bounding_client_rect())
}

/// Client coordinates to container-relative coordinates.
fn container_point(client_x: f64, client_y: f64) -> Option<(f64, f64)> {
    let rect = container_rect()?;
    Some((client_x - rect.left(), client_y - rect.top()))
}

// ---------------------------------------------------------------------------
// Pure helpers (unit-testable without a DOM)
// ---------------------------------------------------------------------------

/// Convert a wheel delta (pixels / lines / pages) to a uniform pixel-like value.
fn wheel_delta_y(delta: WheelDelta) -> f64 {
    match delta {
        WheelDelta::Pixels(d) => d.y,
        WheelDelta::Lines(d) => d.y * 40.0,
        WheelDelta::Pages(d) => d.y * 400.0,
    }
}

/// Distance between two client-coordinate points (for drag threshold checks).
fn point_distance(a: (f64, f64), b: (f64, f64)) -> f64 {
    let dx = a.0 - b.0;
    let dy = a.1 - b.1;
    (dx * dx + dy * dy).sqrt()
}

/// Hit-test a tap at container coordinates against the marker list.
///
/// The tap point is mapped back to image space through the inverse
/// transform; the nearest marker within `TAP_RADIUS_PX` screen pixels
/// wins.
fn marker_hit(
    markers: &[MarkerData],
    viewport: &Viewport,
    container_x: f64,
    container_y: f64,
) -> Option<String> {
    let tap = viewport.image_position(Position {
        x: container_x,
        y: container_y,
    });
    let threshold = TAP_RADIUS_PX / viewport.scale();

    let mut best_id = None;
    let mut best_dist = threshold;
    for marker in markers {
        let dx = marker.position.x - tap.x;
        let dy = marker.position.y - tap.y;
        let dist = (dx * dx + dy * dy).sqrt();
        if dist < best_dist {
            best_dist = dist;
            best_id = Some(marker.id.clone());
        }
    }
    best_id
}

// ---------------------------------------------------------------------------
// Component
// ---------------------------------------------------------------------------

#[component]
pub fn MapView(
    image_url: String,
    image_width: f64,
    image_height: f64,
    markers: Vec<MarkerData>,
    on_marker_tap: EventHandler<String>,
) -> Element {
    // The engine owns the (scale, translate) triple; every handler below
    // only feeds it events and re-renders from its output.
    let mut viewport = use_signal(|| Viewport::new(1.0, 1.0, image_width, image_height));

    // Measure the container after mount. The parent keys this component
    // on the image dimensions, so a (re)resolved image re-creates it.
    use_effect(move || {
        if let Some(rect) = container_rect() {
            viewport.set(Viewport::new(
                rect.width(),
                rect.height(),
                image_width,
                image_height,
            ));
        }
    });

    // Drag state (mouse)
    let mut is_dragging = use_signal(|| false);
    let mut did_drag = use_signal(|| false);
    let mut drag_start = use_signal(|| (0.0_f64, 0.0_f64));

    // Touch state
    let mut touch_start_pos = use_signal(|| None::<(f64, f64)>);
    let mut touch_did_pan = use_signal(|| false);
    let mut is_pinching = use_signal(|| false);

    let markers_for_mouse = markers.clone();
    let markers_for_touch = markers.clone();

    let transform = viewport.read().transform();
    let transform_style = format!(
        "transform: {}; transform-origin: 0 0; width: {}px; height: {}px;",
        transform.to_css(),
        image_width,
        image_height
    );
    let dragging = *is_dragging.read();
    let container_class = if dragging {
        "map-container dragging"
    } else {
        "map-container"
    };

    rsx! {
        div {
            id: MAP_CONTAINER_ID,
            class: "{container_class}",

            onwheel: move |evt: Event<WheelData>| {
                evt.prevent_default();

                let delta_y = wheel_delta_y(evt.data().delta());
                let direction = if delta_y < 0.0 {
                    ZoomDirection::In
                } else {
                    ZoomDirection::Out
                };
                let client = evt.data().client_coordinates();
                let Some((cx, cy)) = container_point(client.x, client.y) else {
                    return;
                };
                viewport.write().wheel_zoom(cx, cy, direction);
            },

            onmousedown: move |evt: Event<MouseData>| {
                // Only track drag/tap for the left mouse button
                if evt.trigger_button() != Some(MouseButton::Primary) {
                    return;
                }
                let client = evt.client_coordinates();
                is_dragging.set(true);
                did_drag.set(false);
                drag_start.set((client.x, client.y));
                viewport.write().begin_pan(client.x, client.y);
            },

            onmousemove: move |evt: Event<MouseData>| {
                if !*is_dragging.read() {
                    return;
                }
                let client = evt.client_coordinates();
                let start = *drag_start.read();

                if !*did_drag.read()
                    && point_distance(start, (client.x, client.y)) > DRAG_THRESHOLD
                {
                    did_drag.set(true);
                }
                if *did_drag.read() {
                    viewport.write().update_pan(client.x, client.y);
                }
            },

            onmouseup: move |evt: Event<MouseData>| {
                let was_dragging = *is_dragging.read();
                let was_drag = *did_drag.read();
                is_dragging.set(false);
                viewport.write().end_pan();

                // A mouseup without drag movement = a tap
                if was_dragging && !was_drag {
                    let client = evt.client_coordinates();
                    if let Some((cx, cy)) = container_point(client.x, client.y) {
                        let hit = marker_hit(&markers_for_mouse, &viewport.read(), cx, cy);
                        if let Some(id) = hit {
                            on_marker_tap.call(id);
                        }
                    }
                }
            },

            onmouseleave: move |_| {
                is_dragging.set(false);
                viewport.write().end_pan();
            },

            ondoubleclick: move |evt: Event<MouseData>| {
                evt.prevent_default();
                viewport.write().reset();
            },

            onresize: move |_| {
                if let Some(rect) = container_rect() {
                    viewport.write().resize(rect.width(), rect.height());
                }
            },

            // --- Touch event handlers ---

            ontouchstart: move |evt: Event<TouchData>| {
                evt.prevent_default();
                let touches = evt.data().touches();
                if touches.len() == 1 {
                    // Single finger: pan, and track the start for tap detection
                    let t = &touches[0];
                    let client = t.client_coordinates();
                    touch_start_pos.set(Some((client.x, client.y)));
                    touch_did_pan.set(false);
                    viewport.write().begin_pan(client.x, client.y);
                } else if touches.len() >= 2 {
                    // Two fingers: pinch-to-zoom
                    let a = touches[0].client_coordinates();
                    let b = touches[1].client_coordinates();
                    let (Some(pa), Some(pb)) =
                        (container_point(a.x, a.y), container_point(b.x, b.y))
                    else {
                        return;
                    };
                    is_pinching.set(true);
                    viewport.write().begin_pinch(pa.0, pa.1, pb.0, pb.1);
                    // Cancel any tap tracking
                    touch_start_pos.set(None);
                    touch_did_pan.set(true);
                }
            },

            ontouchmove: move |evt: Event<TouchData>| {
                evt.prevent_default();
                let touches = evt.data().touches();

                if *is_pinching.read() && touches.len() >= 2 {
                    let a = touches[0].client_coordinates();
                    let b = touches[1].client_coordinates();
                    let (Some(pa), Some(pb)) =
                        (container_point(a.x, a.y), container_point(b.x, b.y))
                    else {
                        return;
                    };
                    viewport.write().update_pinch(pa.0, pa.1, pb.0, pb.1);
                } else if touches.len() == 1 {
                    let t = &touches[0];
                    let client = t.client_coordinates();
                    if let Some(start) = *touch_start_pos.read() {
                        if !*touch_did_pan.read()
                            && point_distance(start, (client.x, client.y)) > TOUCH_DRAG_THRESHOLD
                        {
                            touch_did_pan.set(true);
                        }
                        if *touch_did_pan.read() {
                            viewport.write().update_pan(client.x, client.y);
                        }
                    }
                }
            },

            ontouchend: move |evt: Event<TouchData>| {
                evt.prevent_default();
                let remaining = evt.data().touches().len();

                if *is_pinching.read() {
                    // Wait for all fingers to lift before resetting pinch state
                    if remaining == 0 {
                        is_pinching.set(false);
                        viewport.write().end_pinch();
                        touch_start_pos.set(None);
                    }
                    return;
                }

                // Single-finger tap: no pan occurred and all fingers are up
                if remaining == 0 && !*touch_did_pan.read() {
                    if let Some(start) = *touch_start_pos.read() {
                        if let Some((cx, cy)) = container_point(start.0, start.1) {
                            let hit = marker_hit(&markers_for_touch, &viewport.read(), cx, cy);
                            if let Some(id) = hit {
                                on_marker_tap.call(id);
                            }
                        }
                    }
                }

                if remaining == 0 {
                    viewport.write().end_pan();
                    touch_start_pos.set(None);
                }
            },

            ontouchcancel: move |_evt: Event<TouchData>| {
                touch_start_pos.set(None);
                touch_did_pan.set(false);
                is_pinching.set(false);
                viewport.write().end_pan();
            },

            // Image layer — the engine's transform applies to map + markers together
            div {
                class: "map-layer",
                style: "{transform_style}",

                img {
                    class: "map-image",
                    src: "{image_url}",
                    draggable: "false",
                    alt: "Map",
                }

                for marker in &markers {
                    div {
                        class: "map-marker",
                        style: "left: {marker.position.x}px; top: {marker.position.y}px;",
                        img { src: "/static/{marker.image}", draggable: "false", alt: "{marker.title}" }
                    }
                }
            }

            button {
                class: "reset-view",
                onclick: move |_| {
                    // Re-measure in case the layout changed since mount
                    if let Some(rect) = container_rect() {
                        viewport.write().resize(rect.width(), rect.height());
                    } else {
                        viewport.write().reset();
                    }
                },
                "Reset view"
            }
        }
    }
}
