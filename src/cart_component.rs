//! A drop-in Yew cart page with Snap checkout.
//!
//! The component loads the user's unpaid enrollments, lets them remove
//! courses, and runs checkout through the Snap popup. While a payment token is
//! persisted it swaps the buy button for "continue" and "cancel".

use yew::prelude::*;

use crate::api::HttpBackend;
use crate::cart::{load_cart, remove_from_cart, Cart};
use crate::checkout::{
    apply_outcome, begin_checkout, cancel_payment, checkout_failure_notice, open_payment,
    resume_payment, CheckoutStart, CART_PATH,
};
use crate::components::{navigate, Button, CartItemRow, NoticeBanner};
use crate::config::AppConfig;
use crate::error::CheckoutError;
use crate::interop::use_snapjs;
use crate::models::CourseId;
use crate::notice::Notice;
use crate::price::format_idr;
use crate::session::{BrowserSession, SessionStore};
use crate::snap::{SnapOutcome, SnapWidget};

/// Properties for [`CartPage`].
///
/// * `catalog_path`: where "browse courses" leads when the cart is empty.
/// * `on_paid`: invoked after Snap reports a successful payment.
#[derive(Properties, PartialEq, Clone)]
pub struct CartPageProps {
    #[prop_or_else(|| "/courses".to_string())]
    pub catalog_path: String,
    #[prop_or_default]
    pub on_paid: Callback<()>,
}

/// Yew function component rendering the cart, its summary and checkout.
///
/// 1. Signed-out visitors are sent to the sign-in page, returning to `/cart`.
/// 2. Pending enrollments are fetched once; a failed fetch shows an empty cart.
/// 3. Checkout persists the Snap token before opening the popup, so a reload
///    offers to continue the same payment.
#[function_component(CartPage)]
pub fn cart_page(props: &CartPageProps) -> Html {
    let snap_ready = use_snapjs();
    let backend = use_memo((), |_| HttpBackend::default());
    let session = use_memo((), |_| BrowserSession::user());

    let cart = use_state(Cart::default);
    let loading = use_state(|| true);
    let busy = use_state(|| false);
    let pending = use_state(|| None::<String>);
    let notice = use_state(|| None::<Notice>);

    // Load cart and any unfinished payment on mount
    {
        let backend = backend.clone();
        let session = session.clone();
        let cart = cart.clone();
        let loading = loading.clone();
        let pending = pending.clone();
        use_effect_with((), move |_| {
            pending.set(session.pending_payment());
            wasm_bindgen_futures::spawn_local(async move {
                match load_cart(session.as_ref(), backend.as_ref()).await {
                    Ok(loaded) => {
                        cart.set(loaded);
                        loading.set(false);
                    }
                    Err(CheckoutError::NotSignedIn) => {
                        navigate(&AppConfig::from_env().login_redirect(CART_PATH));
                    }
                    Err(err) => {
                        log::warn!("cart load failed: {}", err);
                        loading.set(false);
                    }
                }
            });
            || ()
        });
    }

    let on_outcome = {
        let session = session.clone();
        let cart = cart.clone();
        let pending = pending.clone();
        let notice = notice.clone();
        let on_paid = props.on_paid.clone();
        Callback::from(move |outcome: SnapOutcome| {
            let mut next = (*cart).clone();
            let message = apply_outcome(session.as_ref(), &mut next, &outcome);
            cart.set(next);
            pending.set(session.pending_payment());
            notice.set(Some(message));
            if matches!(outcome, SnapOutcome::Success(_)) {
                on_paid.emit(());
            }
        })
    };

    let on_remove = {
        let backend = backend.clone();
        let session = session.clone();
        let cart = cart.clone();
        let busy = busy.clone();
        let notice = notice.clone();
        Callback::from(move |id: CourseId| {
            if *busy {
                return;
            }
            let backend = backend.clone();
            let session = session.clone();
            let cart = cart.clone();
            let busy = busy.clone();
            let notice = notice.clone();
            busy.set(true);
            wasm_bindgen_futures::spawn_local(async move {
                match remove_from_cart(session.as_ref(), backend.as_ref(), &id).await {
                    Ok(()) => {
                        let mut next = (*cart).clone();
                        next.remove(&id);
                        cart.set(next);
                        notice.set(Some(Notice::success("Kelas berhasil dihapus")));
                    }
                    Err(err) => notice.set(Some(Notice::for_error(
                        &err,
                        "Gagal menghapus kelas",
                        "Gagal menghapus kelas",
                        CART_PATH,
                    ))),
                }
                busy.set(false);
            });
        })
    };

    let on_checkout = {
        let backend = backend.clone();
        let session = session.clone();
        let cart = cart.clone();
        let busy = busy.clone();
        let pending = pending.clone();
        let notice = notice.clone();
        let on_outcome = on_outcome.clone();
        Callback::from(move |_: MouseEvent| {
            if *busy {
                return;
            }
            let backend = backend.clone();
            let session = session.clone();
            let snapshot = (*cart).clone();
            let busy = busy.clone();
            let pending = pending.clone();
            let notice = notice.clone();
            let on_outcome = on_outcome.clone();
            busy.set(true);
            notice.set(None);
            wasm_bindgen_futures::spawn_local(async move {
                match begin_checkout(session.as_ref(), backend.as_ref(), &snapshot).await {
                    Ok(CheckoutStart::OpenWidget { token }) => {
                        pending.set(Some(token.clone()));
                        if let Err(err) = open_payment(&SnapWidget, &token, on_outcome) {
                            notice.set(Some(Notice::for_snap_error(&err)));
                        }
                    }
                    Ok(CheckoutStart::Redirect { url }) => navigate(&url),
                    Err(err) => notice.set(Some(checkout_failure_notice(&err))),
                }
                busy.set(false);
            });
        })
    };

    let on_continue = {
        let session = session.clone();
        let pending = pending.clone();
        let notice = notice.clone();
        let on_outcome = on_outcome.clone();
        Callback::from(move |_: MouseEvent| {
            match resume_payment(session.as_ref(), &SnapWidget, on_outcome.clone()) {
                Ok(Some(_)) => {}
                Ok(None) => pending.set(None),
                Err(err) => notice.set(Some(Notice::for_snap_error(&err))),
            }
        })
    };

    let on_cancel = {
        let session = session.clone();
        let pending = pending.clone();
        let notice = notice.clone();
        Callback::from(move |_: MouseEvent| {
            notice.set(Some(cancel_payment(session.as_ref())));
            pending.set(None);
        })
    };

    let on_dismiss = {
        let notice = notice.clone();
        Callback::from(move |_: ()| notice.set(None))
    };

    if *loading {
        return html! { <div class="ks-spinner" aria-busy="true" /> };
    }

    let banner = html! { <NoticeBanner notice={(*notice).clone()} {on_dismiss} /> };

    if cart.is_empty() {
        let catalog = props.catalog_path.clone();
        let browse = Callback::from(move |_: MouseEvent| navigate(&catalog));
        return html! {
            <div class="ks-cart">
                { banner }
                <div class="ks-cart-empty">
                    <h2>{ "Keranjang Anda Kosong" }</h2>
                    <p class="ks-muted">{ "Jangan lupa isi dengan ilmu bermanfaat!" }</p>
                    <Button label="Lihat Katalog Kelas" onclick={browse} />
                </div>
            </div>
        };
    }

    let rows = cart.items().iter().map(|item| {
        html! {
            <CartItemRow
                key={item.id.to_string()}
                item={item.clone()}
                on_remove={on_remove.clone()}
                disabled={*busy}
            />
        }
    });

    let total = cart.formatted_total();
    let pay_disabled = !snap_ready || *busy;

    html! {
        <div class="ks-cart">
            { banner }
            <h1>{ "Keranjang Saya" }</h1>
            <div class="ks-cart-grid">
                <div class="ks-cart-items">{ for rows }</div>
                <div class="ks-cart-summary">
                    <h2>{ "Rincian Pembayaran" }</h2>
                    <div class="ks-row">
                        <span class="ks-muted">{ format!("Total Harga ({} kelas)", cart.len()) }</span>
                        <span>{ total.clone() }</span>
                    </div>
                    <div class="ks-row">
                        <span class="ks-muted">{ "Diskon" }</span>
                        <span>{ format!("- {}", format_idr(0)) }</span>
                    </div>
                    <div class="ks-row ks-total">
                        <span>{ "Total Tagihan" }</span>
                        <span>{ total }</span>
                    </div>
                    if pending.is_some() {
                        <Button label="Lanjutkan Pembayaran" onclick={on_continue} disabled={pay_disabled} />
                        <Button
                            label="Batalkan Pembayaran"
                            onclick={on_cancel}
                            class={classes!("ks-button-outline")}
                        />
                    } else {
                        <Button
                            label={if *busy { "Memproses…" } else { "Beli Sekarang" }}
                            onclick={on_checkout}
                            disabled={pay_disabled}
                        />
                    }
                    <p class="ks-muted ks-small">
                        { "Dengan membeli, Anda menyetujui Syarat & Ketentuan kami." }
                    </p>
                </div>
            </div>
        </div>
    }
}

