//! cart.rs
//!
//! The cart view model: unpaid enrollments and their total.
//!
//! The cart is never cached; it is rebuilt from `GET /user-courses/pending`
//! each time the page mounts. A failed fetch degrades to an empty cart.

use crate::api::CourseBackend;
use crate::error::{ApiError, CheckoutError};
use crate::models::{CartItem, CourseId, PaymentItem};
use crate::price::format_idr;
use crate::session::SessionStore;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    pub fn new(items: Vec<CartItem>) -> Self {
        Self { items }
    }

    /// Cart from a fetch result; any failure yields an empty cart.
    pub fn from_fetch(result: Result<Vec<CartItem>, ApiError>) -> Self {
        match result {
            Ok(items) => Self::new(items),
            Err(err) => {
                log::info!("cart fetch failed, showing empty cart: {}", err);
                Self::default()
            }
        }
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of item prices, in rupiah.
    pub fn total(&self) -> i64 {
        self.items.iter().map(|item| item.price).sum()
    }

    pub fn formatted_total(&self) -> String {
        format_idr(self.total())
    }

    /// Remove the item with `id`, keeping the others in order.
    pub fn remove(&mut self, id: &CourseId) -> Option<CartItem> {
        let index = self.items.iter().position(|item| &item.id == id)?;
        Some(self.items.remove(index))
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Payment request body: one `{course_id}` per item.
    pub fn payment_items(&self) -> Vec<PaymentItem> {
        self.items
            .iter()
            .map(|item| PaymentItem {
                course_id: item.id.clone(),
            })
            .collect()
    }
}

/// Fetch the signed-in user's cart.
pub async fn load_cart<S, B>(session: &S, backend: &B) -> Result<Cart, CheckoutError>
where
    S: SessionStore + ?Sized,
    B: CourseBackend + ?Sized,
{
    let token = session.auth_token().ok_or(CheckoutError::NotSignedIn)?;
    Ok(Cart::from_fetch(backend.pending_courses(&token).await))
}

/// Ask the backend to drop `id` from the cart.
///
/// The caller removes the item locally once this succeeds.
pub async fn remove_from_cart<S, B>(session: &S, backend: &B, id: &CourseId) -> Result<(), CheckoutError>
where
    S: SessionStore + ?Sized,
    B: CourseBackend + ?Sized,
{
    let token = session.auth_token().ok_or(CheckoutError::NotSignedIn)?;
    backend.remove_pending(&token, id).await?;
    log::info!("removed course {} from cart", id);
    Ok(())
}

#[cfg(test)]
pub(crate) fn item(id: &str, price: i64) -> CartItem {
    CartItem {
        id: CourseId::from(id),
        title: format!("Kelas {}", id),
        mentor: "Mentor".to_string(),
        price,
        image: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeBackend;
    use crate::session::MemorySession;
    use futures::executor::block_on;

    #[test]
    fn total_is_sum_of_prices() {
        let cart = Cart::new(vec![item("a", 499_000), item("b", 399_000), item("c", 349_000)]);
        assert_eq!(cart.total(), 1_247_000);
        assert_eq!(cart.formatted_total(), "Rp 1.247.000");
        assert_eq!(Cart::default().formatted_total(), "Rp 0");
    }

    #[test]
    fn remove_keeps_relative_order() {
        let mut cart = Cart::new(vec![item("a", 1), item("b", 2), item("c", 3), item("d", 4)]);
        let removed = cart.remove(&CourseId::from("b")).unwrap();
        assert_eq!(removed.id, CourseId::from("b"));
        let ids: Vec<_> = cart.items().iter().map(|i| i.id.to_string()).collect();
        assert_eq!(ids, ["a", "c", "d"]);
        assert!(cart.remove(&CourseId::from("zzz")).is_none());
        assert_eq!(cart.len(), 3);
    }

    #[test]
    fn failed_fetch_degrades_to_empty() {
        let cart = Cart::from_fetch(Err(ApiError::Network("offline".into())));
        assert!(cart.is_empty());
    }

    #[test]
    fn payment_items_follow_cart() {
        let cart = Cart::new(vec![item("a", 1), item("b", 2)]);
        let ids: Vec<_> = cart.payment_items().into_iter().map(|p| p.course_id).collect();
        assert_eq!(ids, [CourseId::from("a"), CourseId::from("b")]);
    }

    #[test]
    fn load_cart_requires_sign_in() {
        let backend = FakeBackend::default();
        let result = block_on(load_cart(&MemorySession::signed_out(), &backend));
        assert_eq!(result, Err(CheckoutError::NotSignedIn));
        assert_eq!(backend.calls(), 0);
    }

    #[test]
    fn load_cart_lists_pending_enrollments() {
        let backend = FakeBackend::with_pending(vec![item("a", 100_000), item("b", 250_000)]);
        let cart = block_on(load_cart(&MemorySession::signed_in("tok"), &backend)).unwrap();
        assert_eq!(cart.len(), 2);
        assert_eq!(cart.total(), 350_000);
        assert_eq!(backend.tokens(), ["tok"]);
    }

    #[test]
    fn load_cart_swallows_backend_failure() {
        let backend = FakeBackend::default();
        backend.fail_pending(ApiError::Rejected { status: 404, message: None });
        let cart = block_on(load_cart(&MemorySession::signed_in("tok"), &backend)).unwrap();
        assert!(cart.is_empty());
    }

    #[test]
    fn remove_from_cart_calls_backend_with_id() {
        let backend = FakeBackend::default();
        let session = MemorySession::signed_in("tok");
        block_on(remove_from_cart(&session, &backend, &CourseId::from("b"))).unwrap();
        assert_eq!(backend.removed(), [CourseId::from("b")]);
    }

    #[test]
    fn failed_remove_leaves_cart_untouched() {
        let backend = FakeBackend::default();
        backend.fail_remove(ApiError::Rejected {
            status: 500,
            message: Some("Gagal menghapus".into()),
        });
        let session = MemorySession::signed_in("tok");
        let mut cart = Cart::new(vec![item("a", 1), item("b", 2)]);
        let before = cart.clone();

        let id = CourseId::from("b");
        let result = block_on(remove_from_cart(&session, &backend, &id));
        assert!(matches!(result, Err(CheckoutError::Api(ApiError::Rejected { status: 500, .. }))));
        if result.is_ok() {
            cart.remove(&id);
        }
        assert_eq!(cart, before);
        assert!(backend.removed().is_empty());
    }
}
