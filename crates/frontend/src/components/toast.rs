use dioxus::prelude::*;
use gloo_timers::future::TimeoutFuture;

const TOAST_DURATION_MS: u32 = 2500;

/// Transient notification banner. Setting the signal to `Some(text)`
/// shows the toast; it clears itself after a short delay.
#[component]
pub fn Toast(message: Signal<Option<String>>) -> Element {
    use_effect(move || {
        if message.read().is_some() {
            let mut message = message;
            spawn(async move {
                TimeoutFuture::new(TOAST_DURATION_MS).await;
                message.set(None);
            });
        }
    });

    rsx! {
        if let Some(text) = message.read().clone() {
            div { class: "toast", "{text}" }
        }
    }
}
