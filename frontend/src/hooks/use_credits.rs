use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{window, CustomEvent};
use yew::prelude::*;

use shared::constants::CREDIT_COOKIE_KEY;

use crate::base::CREDIT_UPDATE_EVENT;
use crate::cookies::get_cookie;

/// Tracks the credit balance for display: seeded from the persisted
/// cookie, kept current by credit-update events.
#[hook]
pub fn use_credits() -> UseStateHandle<i64> {
    let balance = use_state(|| {
        get_cookie(CREDIT_COOKIE_KEY)
            .and_then(|v| v.parse::<i64>().ok())
            .unwrap_or(0)
    });

    {
        let balance = balance.clone();
        use_effect(move || {
            let cb = balance.clone();

            let listener = Closure::wrap(Box::new(move |e: CustomEvent| {
                if let Some(new_total) = e.detail().as_f64() {
                    cb.set(new_total as i64);
                }
            }) as Box<dyn FnMut(CustomEvent)>);

            if let Some(window) = window() {
                let _ = window.add_event_listener_with_callback(
                    CREDIT_UPDATE_EVENT,
                    listener.as_ref().unchecked_ref(),
                );
            }

            // Keep the listener alive for the component lifetime.
            let cleanup_listener = listener;

            move || {
                if let Some(window) = window() {
                    let _ = window.remove_event_listener_with_callback(
                        CREDIT_UPDATE_EVENT,
                        cleanup_listener.as_ref().unchecked_ref(),
                    );
                }
            }
        });
    }

    balance
}
