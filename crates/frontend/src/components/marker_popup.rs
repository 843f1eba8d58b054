use dioxus::prelude::*;
use wasm_bindgen::JsCast;

use crate::api::{static_asset_url, MarkerData};

const POPUP_VIDEO_ID: &str = "popup-video";

/// Pause the popup's video element and rewind it to the start.
///
/// Closing the overlay only unmounts the DOM node on the next render;
/// stopping playback explicitly avoids audio continuing in the meantime.
fn stop_video() {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    let Some(element) = document.get_element_by_id(POPUP_VIDEO_ID) else {
        return;
    };
    if let Ok(media) = element.dyn_into::<web_sys::HtmlMediaElement>() {
        let _ = media.pause();
        media.set_current_time(0.0);
    }
}

#[component]
pub fn MarkerPopup(
    marker: MarkerData,
    on_close: EventHandler<()>,
    on_notice: EventHandler<String>,
) -> Element {
    let mut show_video = use_signal(|| false);

    let video_url = marker.video_url.clone();
    let has_video = video_url.is_some();

    let close = move |_| {
        stop_video();
        show_video.set(false);
        on_close.call(());
    };

    rsx! {
        div {
            class: "popup-backdrop",
            onclick: close,

            div {
                class: "popup-card",
                // Keep clicks inside the card from reaching the backdrop
                onclick: move |evt| evt.stop_propagation(),

                button { class: "popup-close", onclick: close, "\u{00d7}" }

                img {
                    class: "popup-image",
                    src: static_asset_url(&marker.image),
                    alt: "{marker.title}",
                }
                h2 { class: "popup-title", "{marker.title}" }
                p { class: "popup-description", "{marker.description}" }

                button {
                    class: "popup-video-button",
                    onclick: move |_| {
                        if has_video {
                            show_video.set(true);
                        } else {
                            on_notice.call("No video available for this location".to_string());
                        }
                    },
                    "Watch video"
                }

                if *show_video.read() {
                    if let Some(url) = video_url.clone() {
                        div { class: "video-overlay",
                            video {
                                id: POPUP_VIDEO_ID,
                                class: "popup-video",
                                src: "{url}",
                                controls: true,
                                autoplay: true,
                            }
                            button {
                                class: "video-close",
                                onclick: move |_| {
                                    stop_video();
                                    show_video.set(false);
                                },
                                "Close video"
                            }
                        }
                    }
                }
            }
        }
    }
}
