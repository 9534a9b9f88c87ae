//! snap.rs
//!
//! High-level adapter over the Snap payment popup.
//!
//! Snap reports back through four separate JS callbacks. This module folds them
//! into one typed channel: every call to [`PaymentWidget::pay`] takes a single
//! `Callback<SnapOutcome>` that receives `Success`, `Pending`, `Error` or
//! `Closed`. The checkout flow then reacts to outcomes without knowing anything
//! about JS.
//!
//! # Example Usage
//! ```rust,ignore
//! use kelas_santai::{PaymentWidget, SnapOutcome, SnapWidget};
//!
//! let on_outcome = Callback::from(|outcome: SnapOutcome| {
//!     log::info!("snap finished: {:?}", outcome);
//! });
//! if let Err(err) = SnapWidget.pay("abc123", on_outcome) {
//!     log::error!("could not open snap: {}", err);
//! }
//! ```

use serde::Deserialize;
use serde_wasm_bindgen::from_value;
use wasm_bindgen::prelude::Closure;
use wasm_bindgen::JsValue;
use web_sys::js_sys::{Object, Reflect};
use yew::Callback;

use crate::bindings::snap_handle;
use crate::error::SnapError;

/// Transaction summary Snap passes to its result callbacks.
#[derive(Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default)]
pub struct SnapResult {
    pub order_id: Option<String>,
    pub transaction_id: Option<String>,
    pub transaction_status: Option<String>,
    pub status_code: Option<String>,
    pub status_message: Option<String>,
    pub gross_amount: Option<String>,
    pub payment_type: Option<String>,
}

/// How a Snap popup session ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SnapOutcome {
    /// Payment settled.
    Success(SnapResult),
    /// The user picked a method that settles later (bank transfer, store...).
    Pending(SnapResult),
    /// Snap reported a failed transaction.
    Error(SnapResult),
    /// The popup was closed before any of the above.
    Closed,
}

impl SnapOutcome {
    pub fn name(&self) -> &'static str {
        match self {
            SnapOutcome::Success(_) => "success",
            SnapOutcome::Pending(_) => "pending",
            SnapOutcome::Error(_) => "error",
            SnapOutcome::Closed => "closed",
        }
    }

    pub fn result(&self) -> Option<&SnapResult> {
        match self {
            SnapOutcome::Success(r) | SnapOutcome::Pending(r) | SnapOutcome::Error(r) => Some(r),
            SnapOutcome::Closed => None,
        }
    }
}

/// Something that can take a session token and report how payment went.
pub trait PaymentWidget {
    fn pay(&self, token: &str, on_outcome: Callback<SnapOutcome>) -> Result<(), SnapError>;
}

/// The real Midtrans Snap popup on `window.snap`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SnapWidget;

impl PaymentWidget for SnapWidget {
    fn pay(&self, token: &str, on_outcome: Callback<SnapOutcome>) -> Result<(), SnapError> {
        let snap = snap_handle().ok_or(SnapError::NotLoaded)?;
        let options = outcome_options(on_outcome)?;
        log::info!("opening snap for token {}", token);
        snap.pay(token, &options).map_err(js_to_snap_error)
    }
}

/// Build the `{ onSuccess, onPending, onError, onClose }` object for `snap.pay`.
fn outcome_options(on_outcome: Callback<SnapOutcome>) -> Result<Object, SnapError> {
    let options = Object::new();
    let on_close = on_outcome.clone();

    let result_handler = |wrap: fn(SnapResult) -> SnapOutcome| {
        let on_outcome = on_outcome.clone();
        Closure::<dyn FnMut(JsValue)>::new(move |value: JsValue| {
            on_outcome.emit(wrap(decode_result(value)));
        })
        .into_js_value()
    };

    let handlers = [
        ("onSuccess", result_handler(SnapOutcome::Success)),
        ("onPending", result_handler(SnapOutcome::Pending)),
        ("onError", result_handler(SnapOutcome::Error)),
        (
            "onClose",
            Closure::<dyn FnMut()>::new(move || on_close.emit(SnapOutcome::Closed))
                .into_js_value(),
        ),
    ];

    for (name, handler) in handlers {
        Reflect::set(&options, &JsValue::from_str(name), &handler).map_err(js_to_snap_error)?;
    }
    Ok(options)
}

/// Snap's result objects vary by payment type; keep what we recognise.
fn decode_result(value: JsValue) -> SnapResult {
    from_value::<SnapResult>(value).unwrap_or_else(|err| {
        log::debug!("unrecognised snap result: {}", err);
        SnapResult::default()
    })
}

fn js_to_snap_error(value: JsValue) -> SnapError {
    SnapError::Js(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn snap_result_tolerates_partial_objects() {
        let result: SnapResult = serde_json::from_value(json!({
            "order_id": "KS-001",
            "transaction_status": "settlement",
            "gross_amount": "499000.00",
            "fraud_status": "accept"
        }))
        .unwrap();
        assert_eq!(result.order_id.as_deref(), Some("KS-001"));
        assert_eq!(result.transaction_status.as_deref(), Some("settlement"));
        assert_eq!(result.payment_type, None);
    }

    #[test]
    fn outcome_names_and_results() {
        let pending = SnapOutcome::Pending(SnapResult {
            payment_type: Some("bank_transfer".into()),
            ..SnapResult::default()
        });
        assert_eq!(pending.name(), "pending");
        assert_eq!(
            pending.result().and_then(|r| r.payment_type.as_deref()),
            Some("bank_transfer")
        );
        assert_eq!(SnapOutcome::Closed.result(), None);
    }
}
