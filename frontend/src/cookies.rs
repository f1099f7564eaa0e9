use wasm_bindgen::JsCast;
use web_sys::{window, HtmlDocument};

use shared::ledger::CreditStore;

fn html_document() -> Option<HtmlDocument> {
    window()?.document()?.dyn_into::<HtmlDocument>().ok()
}

/// Reads one cookie by name.
pub fn get_cookie(key: &str) -> Option<String> {
    let cookie = html_document()?.cookie().ok()?;
    cookie.split(';').find_map(|item| {
        let (name, value) = item.trim().split_once('=')?;
        (name == key).then(|| value.to_string())
    })
}

/// Writes one cookie with a day-based expiry.
pub fn set_cookie(key: &str, value: &str, ttl_days: u32) {
    let Some(document) = html_document() else {
        log::warn!("no document, cookie {} not written", key);
        return;
    };

    let expires = js_sys::Date::new_0();
    expires.set_date(expires.get_date() + ttl_days);

    let cookie = format!("{}={}; path=/; expires={};", key, value, expires.to_utc_string());
    if document.set_cookie(&cookie).is_err() {
        log::warn!("failed to write cookie {}", key);
    }
}

/// Cookie-backed persistence for the credit ledger.
#[derive(Debug, Default, Clone, Copy)]
pub struct CookieStore;

impl CreditStore for CookieStore {
    fn get(&self, key: &str) -> Option<String> {
        get_cookie(key)
    }

    fn set(&mut self, key: &str, value: &str, ttl_days: u32) {
        set_cookie(key, value, ttl_days);
    }
}
