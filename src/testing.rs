//! Recording fakes for the backend and the payment widget.

use std::cell::{Cell, RefCell};

use async_trait::async_trait;
use yew::Callback;

use crate::api::CourseBackend;
use crate::error::{ApiError, SnapError};
use crate::models::{CartItem, Course, CourseId, PaymentItem};
use crate::snap::{PaymentWidget, SnapOutcome};

#[derive(Default)]
pub struct FakeBackend {
    calls: Cell<usize>,
    pending: RefCell<Option<Result<Vec<CartItem>, ApiError>>>,
    payment: RefCell<Option<Result<String, ApiError>>>,
    enroll: RefCell<Option<Result<(), ApiError>>>,
    remove: RefCell<Option<ApiError>>,
    removed: RefCell<Vec<CourseId>>,
    payment_bodies: RefCell<Vec<Vec<PaymentItem>>>,
    tokens: RefCell<Vec<String>>,
}

impl FakeBackend {
    pub fn calls(&self) -> usize {
        self.calls.get()
    }

    pub fn with_pending(items: Vec<CartItem>) -> Self {
        let backend = Self::default();
        backend.pending.replace(Some(Ok(items)));
        backend
    }

    pub fn fail_pending(&self, err: ApiError) {
        self.pending.replace(Some(Err(err)));
    }

    pub fn answer_payment(&self, result: Result<String, ApiError>) {
        self.payment.replace(Some(result));
    }

    pub fn fail_remove(&self, err: ApiError) {
        self.remove.replace(Some(err));
    }

    pub fn answer_enroll(&self, result: Result<(), ApiError>) {
        self.enroll.replace(Some(result));
    }

    pub fn removed(&self) -> Vec<CourseId> {
        self.removed.borrow().clone()
    }

    pub fn payment_bodies(&self) -> Vec<Vec<PaymentItem>> {
        self.payment_bodies.borrow().clone()
    }

    pub fn tokens(&self) -> Vec<String> {
        self.tokens.borrow().clone()
    }

    fn record(&self, token: &str) {
        self.calls.set(self.calls.get() + 1);
        self.tokens.borrow_mut().push(token.to_string());
    }
}

#[async_trait(?Send)]
impl CourseBackend for FakeBackend {
    async fn pending_courses(&self, token: &str) -> Result<Vec<CartItem>, ApiError> {
        self.record(token);
        self.pending.borrow().clone().unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn remove_pending(&self, token: &str, course_id: &CourseId) -> Result<(), ApiError> {
        self.record(token);
        if let Some(err) = self.remove.borrow().clone() {
            return Err(err);
        }
        self.removed.borrow_mut().push(course_id.clone());
        Ok(())
    }

    async fn create_payment(&self, token: &str, items: &[PaymentItem]) -> Result<String, ApiError> {
        self.record(token);
        self.payment_bodies.borrow_mut().push(items.to_vec());
        self.payment
            .borrow()
            .clone()
            .unwrap_or_else(|| Err(ApiError::Network("no answer configured".into())))
    }

    async fn enroll(&self, token: &str, _course_id: &CourseId) -> Result<(), ApiError> {
        self.record(token);
        self.enroll.borrow().clone().unwrap_or(Ok(()))
    }

    async fn course(&self, _course_id: &str) -> Result<Course, ApiError> {
        self.calls.set(self.calls.get() + 1);
        Err(ApiError::MissingField("data"))
    }
}

/// Widget that records the tokens it was asked to open and keeps the
/// outcome callback so tests can fire outcomes by hand.
#[derive(Default)]
pub struct FakeWidget {
    pub opened: RefCell<Vec<String>>,
    pub callback: RefCell<Option<Callback<SnapOutcome>>>,
    pub unavailable: Cell<bool>,
}

impl FakeWidget {
    pub fn fire(&self, outcome: SnapOutcome) {
        if let Some(callback) = self.callback.borrow().as_ref() {
            callback.emit(outcome);
        }
    }
}

impl PaymentWidget for FakeWidget {
    fn pay(&self, token: &str, on_outcome: Callback<SnapOutcome>) -> Result<(), SnapError> {
        if self.unavailable.get() {
            return Err(SnapError::NotLoaded);
        }
        self.opened.borrow_mut().push(token.to_string());
        self.callback.replace(Some(on_outcome));
        Ok(())
    }
}
