//! checkout.rs
//!
//! Checkout orchestration for the cart page.
//!
//! The flow is:
//! 1. [`begin_checkout`] checks the session, posts the cart as a payment intent,
//!    and pulls the Snap token out of the returned `direct_url`. The token is
//!    persisted before the popup opens, so a reload can offer to resume.
//! 2. [`open_payment`] hands the token to a [`PaymentWidget`].
//! 3. [`apply_outcome`] reacts to whatever the widget reports. It is pure apart
//!    from the session writes, and repeating an outcome is harmless.
//!
//! [`resume_payment`] and [`cancel_payment`] back the "continue" and "cancel"
//! buttons shown while a token is persisted.

use yew::Callback;

use crate::api::CourseBackend;
use crate::cart::Cart;
use crate::error::{ApiError, CheckoutError, SnapError};
use crate::notice::Notice;
use crate::session::SessionStore;
use crate::snap::{PaymentWidget, SnapOutcome};

/// Route of the cart page, used as the sign-in return target.
pub const CART_PATH: &str = "/cart";

/// What the page should do after a payment intent was created.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CheckoutStart {
    /// The token is persisted; open the popup with it.
    OpenWidget { token: String },
    /// No token could be read from the URL; navigate to it instead.
    Redirect { url: String },
}

/// The Snap token is the last path segment of the backend's `direct_url`,
/// e.g. `https://app.midtrans.com/snap/v4/redirection/abc123` → `abc123`.
pub fn session_token_from_url(direct_url: &str) -> Option<&str> {
    let path = direct_url.split(['?', '#']).next().unwrap_or_default();
    path.rsplit('/').next().filter(|segment| !segment.is_empty())
}

/// Create a payment for everything in `cart`.
///
/// Nothing is sent when the user is signed out or the cart is empty.
pub async fn begin_checkout<S, B>(session: &S, backend: &B, cart: &Cart) -> Result<CheckoutStart, CheckoutError>
where
    S: SessionStore + ?Sized,
    B: CourseBackend + ?Sized,
{
    let auth = session.auth_token().ok_or(CheckoutError::NotSignedIn)?;
    if cart.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }

    let items = cart.payment_items();
    log::info!("creating payment for {} courses ({})", items.len(), cart.formatted_total());
    let direct_url = backend.create_payment(&auth, &items).await?;

    match session_token_from_url(&direct_url) {
        Some(token) => {
            if let Some(previous) = session.pending_payment().filter(|p| p != token) {
                log::warn!("replacing pending payment {} with {}", previous, token);
            }
            session.store_pending_payment(token);
            Ok(CheckoutStart::OpenWidget {
                token: token.to_string(),
            })
        }
        None => {
            log::warn!("no snap token in {}, redirecting", direct_url);
            Ok(CheckoutStart::Redirect { url: direct_url })
        }
    }
}

/// Open the payment popup for `token`.
pub fn open_payment<W>(widget: &W, token: &str, on_outcome: Callback<SnapOutcome>) -> Result<(), SnapError>
where
    W: PaymentWidget + ?Sized,
{
    widget.pay(token, on_outcome).map_err(|err| {
        log::error!("could not open payment for {}: {}", token, err);
        err
    })
}

/// Update the cart and session for a widget outcome and say what to tell the user.
///
/// Only `Success` ends the session. `Pending`, `Error` and `Closed` keep the
/// token so the cart keeps offering to continue the payment.
pub fn apply_outcome<S>(session: &S, cart: &mut Cart, outcome: &SnapOutcome) -> Notice
where
    S: SessionStore + ?Sized,
{
    log::info!(
        "payment outcome {} (order {:?})",
        outcome.name(),
        outcome.result().and_then(|r| r.order_id.as_deref())
    );

    match outcome {
        SnapOutcome::Success(_) => {
            cart.clear();
            session.clear_pending_payment();
            Notice::success("Pembayaran berhasil!")
                .with_description("Terima kasih telah membeli kelas ini.")
        }
        SnapOutcome::Pending(_) => Notice::info("Pembayaran tertunda")
            .with_description("Silakan selesaikan pembayaran Anda."),
        SnapOutcome::Error(_) => Notice::error("Pembayaran gagal")
            .with_description("Terjadi kesalahan saat memproses pembayaran."),
        SnapOutcome::Closed => Notice::warning("Jendela pembayaran ditutup")
            .with_description("Anda belum menyelesaikan pembayaran."),
    }
}

/// Reopen the popup for the persisted token.
///
/// Returns the resumed token, or `None` when nothing was pending.
pub fn resume_payment<S, W>(
    session: &S,
    widget: &W,
    on_outcome: Callback<SnapOutcome>,
) -> Result<Option<String>, SnapError>
where
    S: SessionStore + ?Sized,
    W: PaymentWidget + ?Sized,
{
    let Some(token) = session.pending_payment() else {
        return Ok(None);
    };
    log::info!("resuming payment {}", token);
    open_payment(widget, &token, on_outcome)?;
    Ok(Some(token))
}

/// Forget the persisted token. The backend is not told.
pub fn cancel_payment<S>(session: &S) -> Notice
where
    S: SessionStore + ?Sized,
{
    if let Some(token) = session.pending_payment() {
        log::info!("cancelling pending payment {}", token);
    }
    session.clear_pending_payment();
    Notice::info("Pembayaran dibatalkan")
        .with_description("Anda dapat memproses ulang pembayaran kapan saja.")
}

/// Notice for a checkout that failed before the popup opened.
pub fn checkout_failure_notice(err: &CheckoutError) -> Notice {
    match err {
        CheckoutError::Api(ApiError::Network(_)) | CheckoutError::Api(ApiError::Decode(_)) => {
            Notice::error("Gagal melakukan checkout!")
                .with_description("Silakan coba lagi atau hubungi admin.")
        }
        other => Notice::for_error(
            other,
            "Gagal memproses pembayaran",
            "Terjadi kesalahan saat checkout.",
            CART_PATH,
        ),
    }
}
