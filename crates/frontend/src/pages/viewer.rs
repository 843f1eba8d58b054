use dioxus::prelude::*;
use waypoint_shared::viewport::{DEFAULT_IMAGE_HEIGHT, DEFAULT_IMAGE_WIDTH};

use crate::api::{self, MarkerData};
use crate::components::map_view::MapView;
use crate::components::marker_popup::MarkerPopup;
use crate::components::toast::Toast;

#[component]
pub fn Viewer() -> Element {
    let map_image = use_resource(api::fetch_map_image);
    let markers = use_resource(api::fetch_markers);

    let mut toast_message = use_signal(|| None::<String>);
    let mut popup_marker = use_signal(|| None::<MarkerData>);

    use_effect(move || {
        if matches!(map_image.read().as_ref(), Some(Err(_))) {
            toast_message.set(Some("Map details unavailable, using defaults".to_string()));
        }
    });

    use_effect(move || {
        if matches!(markers.read().as_ref(), Some(Err(_))) {
            toast_message.set(Some("Could not load markers".to_string()));
        }
    });

    // Map metadata failures fall back to known defaults so the viewer
    // still comes up; the effect above raises the notice.
    let map_state = map_image.read();
    let (file_name, width, height) = match map_state.as_ref() {
        None => {
            return rsx! {
                div { class: "viewer loading", "Loading map\u{2026}" }
            };
        }
        Some(Ok(map)) => (map.file_name.clone(), map.width, map.height),
        Some(Err(_)) => (
            "map.jpg".to_string(),
            DEFAULT_IMAGE_WIDTH,
            DEFAULT_IMAGE_HEIGHT,
        ),
    };
    drop(map_state);

    let marker_list: Vec<MarkerData> = match markers.read().as_ref() {
        Some(Ok(list)) => list.clone(),
        Some(Err(_)) | None => Vec::new(),
    };

    let image_url = api::static_asset_url(&file_name);
    let markers_for_tap = marker_list.clone();

    rsx! {
        div { class: "viewer",
            MapView {
                // Remount when the resolved dimensions change so the
                // viewport is measured and fitted fresh.
                key: "{width}x{height}",
                image_url,
                image_width: width,
                image_height: height,
                markers: marker_list,
                on_marker_tap: move |id: String| {
                    let hit = markers_for_tap.iter().find(|m| m.id == id).cloned();
                    if let Some(marker) = hit {
                        popup_marker.set(Some(marker));
                    }
                },
            }

            if let Some(marker) = popup_marker.read().clone() {
                MarkerPopup {
                    marker,
                    on_close: move |_| popup_marker.set(None),
                    on_notice: move |text: String| toast_message.set(Some(text)),
                }
            }

            Toast { message: toast_message }
        }
    }
}
