//! api.rs
//!
//! Client for the Kelas Santai course service.
//!
//! [`CourseBackend`] is the seam the cart and checkout flows depend on;
//! [`HttpBackend`] implements it with `gloo-net` against the REST API:
//!
//! | Call                 | Endpoint                                   |
//! |----------------------|--------------------------------------------|
//! | `pending_courses`    | `GET /user-courses/pending`                |
//! | `remove_pending`     | `DELETE /user-courses/delete?course_id=…`  |
//! | `create_payment`     | `POST /user-courses/payment`               |
//! | `enroll`             | `POST /user-courses/enroll`                |
//! | `course`             | `GET /courses/{id}`                        |
//!
//! Every endpoint answers with a `{success, message, data}` envelope. A non-2xx
//! status or `success: false` becomes [`ApiError::Rejected`] carrying the
//! backend's message, so callers can show it verbatim.

use async_trait::async_trait;
use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;

use crate::config::AppConfig;
use crate::error::ApiError;
use crate::models::{
    CartItem, Course, CourseId, EnrollRequest, Envelope, PaymentItem, PaymentResponse,
};

/// Operations the front-end needs from the course service.
///
/// Futures are `?Send`: everything runs on the browser's single thread.
#[async_trait(?Send)]
pub trait CourseBackend {
    /// Courses the user enrolled in but has not paid for.
    async fn pending_courses(&self, token: &str) -> Result<Vec<CartItem>, ApiError>;

    /// Drop an unpaid enrollment.
    async fn remove_pending(&self, token: &str, course_id: &CourseId) -> Result<(), ApiError>;

    /// Create a payment for `items` and return the hosted checkout URL.
    async fn create_payment(&self, token: &str, items: &[PaymentItem]) -> Result<String, ApiError>;

    /// Enroll the user in a course; it then shows up as pending.
    async fn enroll(&self, token: &str, course_id: &CourseId) -> Result<(), ApiError>;

    /// Public course detail with its curriculum in lesson order.
    async fn course(&self, course_id: &str) -> Result<Course, ApiError>;
}

/// [`CourseBackend`] over HTTP.
#[derive(Clone, Debug, PartialEq)]
pub struct HttpBackend {
    config: AppConfig,
}

impl HttpBackend {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    fn bearer(token: &str) -> String {
        format!("Bearer {}", token)
    }
}

impl Default for HttpBackend {
    fn default() -> Self {
        Self::new(AppConfig::from_env())
    }
}

async fn read_body(response: Response) -> Result<(u16, String), ApiError> {
    let status = response.status();
    let body = response.text().await?;
    Ok((status, body))
}

#[async_trait(?Send)]
impl CourseBackend for HttpBackend {
    async fn pending_courses(&self, token: &str) -> Result<Vec<CartItem>, ApiError> {
        let url = self.config.endpoint("user-courses/pending");
        log::debug!("GET {}", url);
        let response = Request::get(&url)
            .header("Authorization", &Self::bearer(token))
            .send()
            .await?;
        let (status, body) = read_body(response).await?;
        let envelope: Envelope<Vec<CartItem>> = decode_envelope(status, &body)?;
        Ok(envelope.data.unwrap_or_default())
    }

    async fn remove_pending(&self, token: &str, course_id: &CourseId) -> Result<(), ApiError> {
        let url = self.config.endpoint("user-courses/delete");
        let id = course_id.to_string();
        log::debug!("DELETE {}?course_id={}", url, id);
        let response = Request::delete(&url)
            .query([("course_id", id.as_str())])
            .header("Authorization", &Self::bearer(token))
            .send()
            .await?;
        let (status, body) = read_body(response).await?;
        decode_envelope::<serde_json::Value>(status, &body).map(|_| ())
    }

    async fn create_payment(&self, token: &str, items: &[PaymentItem]) -> Result<String, ApiError> {
        let url = self.config.endpoint("user-courses/payment");
        log::debug!("POST {} ({} items)", url, items.len());
        let response = Request::post(&url)
            .header("Authorization", &Self::bearer(token))
            .json(items)?
            .send()
            .await?;
        let (status, body) = read_body(response).await?;
        decode_payment(status, &body)
    }

    async fn enroll(&self, token: &str, course_id: &CourseId) -> Result<(), ApiError> {
        let url = self.config.endpoint("user-courses/enroll");
        log::debug!("POST {} course_id={}", url, course_id);
        let response = Request::post(&url)
            .header("Authorization", &Self::bearer(token))
            .json(&EnrollRequest { course_id: course_id.clone() })?
            .send()
            .await?;
        let (status, body) = read_body(response).await?;
        decode_envelope::<serde_json::Value>(status, &body).map(|_| ())
    }

    async fn course(&self, course_id: &str) -> Result<Course, ApiError> {
        let url = self.config.endpoint(&format!("courses/{}", urlencoding::encode(course_id)));
        log::debug!("GET {}", url);
        let response = Request::get(&url).send().await?;
        let (status, body) = read_body(response).await?;
        let envelope: Envelope<Course> = decode_envelope(status, &body)?;
        let mut course = envelope.data.ok_or(ApiError::MissingField("data"))?;
        course.sort_curriculum();
        Ok(course)
    }
}

fn is_success_status(status: u16) -> bool {
    (200..300).contains(&status)
}

/// Turn a raw status and body into a successful envelope or an [`ApiError`].
pub fn decode_envelope<T: DeserializeOwned>(status: u16, body: &str) -> Result<Envelope<T>, ApiError> {
    let parsed = serde_json::from_str::<Envelope<T>>(body);
    match parsed {
        Ok(envelope) if is_success_status(status) && envelope.success => Ok(envelope),
        Ok(envelope) => Err(ApiError::Rejected {
            status,
            message: envelope.reason(),
        }),
        // Error pages are not always JSON; keep the status at least.
        Err(_) if !is_success_status(status) => Err(ApiError::Rejected { status, message: None }),
        Err(err) => Err(ApiError::Decode(err.to_string())),
    }
}

/// Decode a payment-creation response down to its `direct_url`.
pub fn decode_payment(status: u16, body: &str) -> Result<String, ApiError> {
    let parsed = serde_json::from_str::<PaymentResponse>(body);
    match parsed {
        Ok(response) if is_success_status(status) && response.success => match response.direct_url() {
            Some(url) => Ok(url.to_string()),
            // No link to pay with; treat it as a refusal so the message reaches the user.
            None => Err(ApiError::Rejected {
                status,
                message: response.message.filter(|m| !m.trim().is_empty()),
            }),
        },
        Ok(response) => Err(ApiError::Rejected {
            status,
            message: response.message.filter(|m| !m.trim().is_empty()),
        }),
        Err(_) if !is_success_status(status) => Err(ApiError::Rejected { status, message: None }),
        Err(err) => Err(ApiError::Decode(err.to_string())),
    }
}
