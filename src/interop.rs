//! interop.rs
//!
//! Custom Yew hook to load Midtrans Snap (`snap.js`) at runtime.
//!
//! # Overview
//! `use_snapjs()` injects a single
//! `<script id="midtrans-snap" src="…/snap.js" data-client-key="…" async>`
//! into `<head>` on first use. It returns `false` until the script's `load`
//! event fires, then `true` on every later call.
//!
//! # Usage
//! ```rust,ignore
//! use yew::prelude::*;
//! use kelas_santai::use_snapjs;
//!
//! #[function_component(App)]
//! fn app() -> Html {
//!     let snap_ready = use_snapjs();
//!     html! {
//!         if snap_ready {
//!             <p>{"Snap loaded"}</p>
//!         } else {
//!             <p>{"Loading Snap..."}</p>
//!         }
//!     }
//! }
//! ```

use wasm_bindgen::{prelude::Closure, JsCast};
use web_sys::HtmlScriptElement;
use yew::functional::hook;
use yew::prelude::*;

use crate::bindings::snap_loaded;
use crate::config::AppConfig;

/// Id of the injected `<script>`, so it is added only once per page.
pub const SNAP_SCRIPT_ID: &str = "midtrans-snap";

/// Load snap.js exactly once and track readiness.
///
/// Script location and client key come from [`AppConfig::from_env`].
#[hook]
pub fn use_snapjs() -> bool {
    let loaded = use_state(snap_loaded);

    {
        let loaded = loaded.clone();
        use_effect_with((), move |_| {
            if !*loaded {
                let config = AppConfig::from_env();
                let on_load = Callback::from(move |_: ()| loaded.set(true));
                if let Err(err) = inject_snap_script(&config, on_load) {
                    log::error!("could not load snap.js: {:?}", err);
                }
            }
            || ()
        });
    }

    *loaded
}

fn inject_snap_script(config: &AppConfig, on_load: Callback<()>) -> Result<(), wasm_bindgen::JsValue> {
    let document = gloo_utils::document();

    // Another component already added it; just wait for the global.
    if let Some(existing) = document.get_element_by_id(SNAP_SCRIPT_ID) {
        if snap_loaded() {
            on_load.emit(());
        } else if let Ok(script) = existing.dyn_into::<HtmlScriptElement>() {
            attach_onload(&script, on_load);
        }
        return Ok(());
    }

    let script: HtmlScriptElement = document.create_element("script")?.unchecked_into();
    script.set_id(SNAP_SCRIPT_ID);
    script.set_src(&config.snap_url);
    script.set_async(true);
    script.set_attribute("data-client-key", &config.snap_client_key)?;
    attach_onload(&script, on_load);

    log::debug!("injecting {}", config.snap_url);
    gloo_utils::head().append_child(&script)?;
    Ok(())
}

fn attach_onload(script: &HtmlScriptElement, on_load: Callback<()>) {
    let onload = Closure::<dyn FnMut()>::new(move || {
        log::info!("snap.js loaded");
        on_load.emit(());
    });
    script
        .add_event_listener_with_callback("load", onload.as_ref().unchecked_ref())
        .unwrap_or_else(|err| log::warn!("could not watch snap.js load: {:?}", err));
    // Leak so it lives until the load event.
    onload.forget();
}
