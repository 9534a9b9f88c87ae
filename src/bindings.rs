//! bindings.rs
//!
//! Low-level wasm-bindgen bindings to Midtrans Snap (`snap.js`).
//!
//! Snap installs a single global, `window.snap`, whose `pay(token, options)`
//! opens the hosted payment popup. Higher-level wrappers live in `snap.rs`.

use wasm_bindgen::prelude::*;
use web_sys::js_sys::{Object, Reflect};

/// Name of the global object installed by snap.js.
pub const SNAP_GLOBAL: &str = "snap";

#[wasm_bindgen]
extern "C" {
    /// Raw `window.snap` handle.
    #[derive(Debug, Clone)]
    pub type JsSnap;

    /// `snap.pay(token, { onSuccess, onPending, onError, onClose })` → `()`
    #[wasm_bindgen(method, catch, js_name = pay)]
    pub fn pay(this: &JsSnap, token: &str, options: &Object) -> Result<(), JsValue>;
}

/// `true` once snap.js has run and `window.snap` exists.
pub fn snap_loaded() -> bool {
    web_sys::window()
        .and_then(|win| Reflect::has(&win, &JsValue::from_str(SNAP_GLOBAL)).ok())
        .unwrap_or(false)
}

/// The `window.snap` handle, if the script has loaded.
pub fn snap_handle() -> Option<JsSnap> {
    let win = web_sys::window()?;
    let value = Reflect::get(&win, &JsValue::from_str(SNAP_GLOBAL)).ok()?;
    if value.is_undefined() || value.is_null() {
        None
    } else {
        Some(value.unchecked_into::<JsSnap>())
    }
}
