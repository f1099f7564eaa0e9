use wasm_bindgen::JsValue;
use web_sys::{window, CustomEvent, CustomEventInit};

pub const CREDIT_UPDATE_EVENT: &str = "creditUpdate";

/// Broadcasts the new balance so every listener (the credit display) can
/// pick it up without threading handles through the component tree.
pub fn dispatch_credit_event(balance: i64) {
    if let Some(window) = window() {
        let event_init = CustomEventInit::new();
        event_init.set_detail(&JsValue::from_f64(balance as f64));
        if let Ok(event) = CustomEvent::new_with_event_init_dict(CREDIT_UPDATE_EVENT, &event_init) {
            let _ = window.dispatch_event(&event);
        }
    }
}
