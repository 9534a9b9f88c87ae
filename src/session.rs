//! session.rs
//!
//! Client-side session state: the bearer token cookie and the pending Snap
//! token in local storage.
//!
//! The checkout flow only ever talks to a [`SessionStore`], so it can run
//! against the browser ([`BrowserSession`]) or against memory
//! ([`MemorySession`]) in tests.

use std::cell::RefCell;

use wasm_bindgen::JsCast;
use web_sys::{HtmlDocument, Storage};

use crate::auth::{live_claims, AuthClaims};

/// Local-storage key holding the Snap token of an unfinished cart payment.
pub const PENDING_PAYMENT_KEY: &str = "snap_token_cart";

/// Which login the session belongs to; each has its own cookie.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionKind {
    User,
    Admin,
}

impl SessionKind {
    pub fn cookie_name(self) -> &'static str {
        match self {
            SessionKind::User => "token",
            SessionKind::Admin => "admin_token",
        }
    }
}

/// Access to the auth token and the persisted payment session.
///
/// Writes take `&self`: both backends are single-threaded and interior-mutable.
pub trait SessionStore {
    /// Bearer token of the signed-in user, if any.
    fn auth_token(&self) -> Option<String>;

    /// Snap token of a payment the user has not finished.
    fn pending_payment(&self) -> Option<String>;

    /// Remember `token` as the pending payment, replacing any previous one.
    fn store_pending_payment(&self, token: &str);

    /// Forget the pending payment. Must be a no-op when there is none.
    fn clear_pending_payment(&self);
}

/// Browser-backed session using `document.cookie` and `localStorage`.
#[derive(Clone, Debug)]
pub struct BrowserSession {
    kind: SessionKind,
}

impl BrowserSession {
    pub fn new(kind: SessionKind) -> Self {
        Self { kind }
    }

    pub fn user() -> Self {
        Self::new(SessionKind::User)
    }

    /// Decoded claims of the current token, if it is still valid.
    pub fn claims(&self) -> Option<AuthClaims> {
        let token = self.raw_cookie()?;
        live_claims(&token, now_secs())
    }

    fn html_document() -> Option<HtmlDocument> {
        gloo_utils::document().dyn_into::<HtmlDocument>().ok()
    }

    fn raw_cookie(&self) -> Option<String> {
        let cookies = Self::html_document()?.cookie().ok()?;
        cookie_value(&cookies, self.kind.cookie_name())
    }

    fn expire_cookie(&self) {
        let Some(document) = Self::html_document() else {
            return;
        };
        let expired = format!("{}=; Max-Age=0; path=/", self.kind.cookie_name());
        if let Err(err) = document.set_cookie(&expired) {
            log::warn!("could not clear {} cookie: {:?}", self.kind.cookie_name(), err);
        }
    }

    fn storage() -> Option<Storage> {
        match gloo_utils::window().local_storage() {
            Ok(storage) => storage,
            Err(err) => {
                log::warn!("localStorage unavailable: {:?}", err);
                None
            }
        }
    }
}

impl SessionStore for BrowserSession {
    fn auth_token(&self) -> Option<String> {
        let token = self.raw_cookie()?;
        if live_claims(&token, now_secs()).is_some() {
            Some(token)
        } else {
            self.expire_cookie();
            None
        }
    }

    fn pending_payment(&self) -> Option<String> {
        Self::storage()?
            .get_item(PENDING_PAYMENT_KEY)
            .ok()
            .flatten()
            .filter(|token| !token.is_empty())
    }

    fn store_pending_payment(&self, token: &str) {
        let Some(storage) = Self::storage() else {
            return;
        };
        if let Err(err) = storage.set_item(PENDING_PAYMENT_KEY, token) {
            log::warn!("could not persist pending payment: {:?}", err);
        }
    }

    fn clear_pending_payment(&self) {
        let Some(storage) = Self::storage() else {
            return;
        };
        if let Err(err) = storage.remove_item(PENDING_PAYMENT_KEY) {
            log::warn!("could not clear pending payment: {:?}", err);
        }
    }
}

fn now_secs() -> i64 {
    (web_sys::js_sys::Date::now() / 1000.0) as i64
}

/// Value of cookie `name` in a `document.cookie` string, percent-decoded.
pub fn cookie_value(cookies: &str, name: &str) -> Option<String> {
    cookies
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| {
            urlencoding::decode(value)
                .map(|v| v.into_owned())
                .unwrap_or_else(|_| value.to_string())
        })
        .filter(|value| !value.is_empty())
}

/// In-memory session for tests and non-browser hosts.
#[derive(Debug, Default)]
pub struct MemorySession {
    auth: RefCell<Option<String>>,
    pending: RefCell<Option<String>>,
}

impl MemorySession {
    pub fn signed_in(token: &str) -> Self {
        Self {
            auth: RefCell::new(Some(token.to_string())),
            pending: RefCell::new(None),
        }
    }

    pub fn signed_out() -> Self {
        Self::default()
    }

    pub fn sign_out(&self) {
        self.auth.replace(None);
    }
}

impl SessionStore for MemorySession {
    fn auth_token(&self) -> Option<String> {
        self.auth.borrow().clone()
    }

    fn pending_payment(&self) -> Option<String> {
        self.pending.borrow().clone()
    }

    fn store_pending_payment(&self, token: &str) {
        self.pending.replace(Some(token.to_string()));
    }

    fn clear_pending_payment(&self) {
        self.pending.replace(None);
    }
}
