//! Error types shared by the API client, the checkout flow and the Snap adapter.

use thiserror::Error;

/// Failure of a single call to the course service.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request never produced a response (offline, CORS, DNS...).
    #[error("network error: {0}")]
    Network(String),

    /// The backend answered with a non-2xx status or `success: false`.
    #[error("request rejected (status {}): {}", .status, .message.as_deref().unwrap_or("no message"))]
    Rejected {
        status: u16,
        message: Option<String>,
    },

    /// The body was not the JSON envelope we expect.
    #[error("malformed response: {0}")]
    Decode(String),

    /// The envelope was fine but a required field was absent.
    #[error("response is missing `{0}`")]
    MissingField(&'static str),
}

impl ApiError {
    /// The backend's own message, when it sent one.
    pub fn backend_message(&self) -> Option<&str> {
        match self {
            ApiError::Rejected { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}

impl From<gloo_net::Error> for ApiError {
    fn from(err: gloo_net::Error) -> Self {
        match err {
            gloo_net::Error::SerdeError(e) => ApiError::Decode(e.to_string()),
            other => ApiError::Network(other.to_string()),
        }
    }
}

/// Why a user action in the cart or course page could not go ahead.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CheckoutError {
    /// No usable auth token; nothing was sent.
    #[error("not signed in")]
    NotSignedIn,

    /// Checkout was attempted with nothing in the cart; nothing was sent.
    #[error("cart is empty")]
    EmptyCart,

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Failure to hand a token to the Snap popup.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SnapError {
    /// `window.snap` is not there yet.
    #[error("snap.js is not loaded")]
    NotLoaded,

    /// `snap.pay` threw synchronously.
    #[error("snap.pay failed: {0}")]
    Js(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_display_falls_back_without_message() {
        let err = ApiError::Rejected { status: 500, message: None };
        assert_eq!(err.to_string(), "request rejected (status 500): no message");
        assert_eq!(err.backend_message(), None);
    }

    #[test]
    fn checkout_error_wraps_api_error_transparently() {
        let err: CheckoutError = ApiError::Network("offline".into()).into();
        assert_eq!(err.to_string(), "network error: offline");
    }
}
