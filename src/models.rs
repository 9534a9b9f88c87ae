//! models.rs
//!
//! Wire types for the Kelas Santai course service.
//!
//! The backend is loose about shapes: course ids arrive as strings (uuids) or
//! numbers, and the same field can show up under two names depending on the
//! endpoint. The types here absorb that so the rest of the crate does not.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A course identifier, kept in whatever JSON type the backend used.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
#[serde(untagged)]
pub enum CourseId {
    Text(String),
    Number(i64),
}

impl fmt::Display for CourseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CourseId::Text(s) => f.write_str(s),
            CourseId::Number(n) => write!(f, "{}", n),
        }
    }
}

impl From<&str> for CourseId {
    fn from(value: &str) -> Self {
        CourseId::Text(value.to_string())
    }
}

impl From<i64> for CourseId {
    fn from(value: i64) -> Self {
        CourseId::Number(value)
    }
}

pub const DEFAULT_MENTOR: &str = "Expert Mentor";
pub const PLACEHOLDER_IMAGE: &str = "/images/placeholder.png";

/// One unpaid enrollment, as listed by `GET /user-courses/pending`.
#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(from = "RawCartItem")]
pub struct CartItem {
    pub id: CourseId,
    pub title: String,
    /// Display name of the mentor.
    pub mentor: String,
    /// Price in rupiah.
    pub price: i64,
    pub image: Option<String>,
}

impl CartItem {
    /// Image to render, falling back to the bundled placeholder.
    pub fn image_or_placeholder(&self) -> &str {
        self.image.as_deref().unwrap_or(PLACEHOLDER_IMAGE)
    }
}

#[derive(Deserialize)]
struct RawCartItem {
    id: CourseId,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    mentor_name: Option<String>,
    #[serde(default)]
    mentor: Option<String>,
    #[serde(default)]
    price: i64,
    #[serde(default)]
    picture: Option<String>,
    #[serde(default)]
    image: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl From<RawCartItem> for CartItem {
    fn from(raw: RawCartItem) -> Self {
        CartItem {
            id: raw.id,
            title: non_empty(raw.title)
                .or_else(|| non_empty(raw.name))
                .unwrap_or_default(),
            mentor: non_empty(raw.mentor_name)
                .or_else(|| non_empty(raw.mentor))
                .unwrap_or_else(|| DEFAULT_MENTOR.to_string()),
            price: raw.price,
            image: non_empty(raw.picture).or_else(|| non_empty(raw.image)),
        }
    }
}

/// One record of the body posted to `/user-courses/payment`.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct PaymentItem {
    pub course_id: CourseId,
}

/// Body of `POST /user-courses/enroll`.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct EnrollRequest {
    pub course_id: CourseId,
}

/// The `{success, message, data}` envelope every endpoint answers with.
///
/// `error` is read too because failed enrollments put their reason there.
#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct Envelope<T> {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    /// Whatever explanation the backend gave, `message` first.
    pub fn reason(&self) -> Option<String> {
        non_empty(self.message.clone()).or_else(|| non_empty(self.error.clone()))
    }
}

/// Body of a payment-creation response.
///
/// `direct_url` has been seen both inside `data` and at the top level.
#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct PaymentResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<PaymentLink>,
    #[serde(default)]
    pub direct_url: Option<String>,
}

#[derive(Deserialize, Clone, Debug, PartialEq, Default)]
pub struct PaymentLink {
    #[serde(default)]
    pub direct_url: Option<String>,
}

impl PaymentResponse {
    pub fn direct_url(&self) -> Option<&str> {
        self.data
            .as_ref()
            .and_then(|d| d.direct_url.as_deref())
            .or(self.direct_url.as_deref())
            .filter(|url| !url.trim().is_empty())
    }
}

/// A lesson in a course's curriculum.
#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct CurriculumEntry {
    #[serde(default)]
    pub id: Option<CourseId>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Position within the course.
    #[serde(default)]
    pub no_urut: Option<i64>,
}

/// Course detail, from `GET /courses/{id}`.
#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct Course {
    pub id: CourseId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub price: i64,
    #[serde(default)]
    pub level: String,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub picture: Option<String>,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub total_jp: i64,
    #[serde(default)]
    pub mentor_name: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub silabus: String,
    #[serde(default)]
    pub garis_besar: String,
    #[serde(default)]
    pub status: String,
    #[serde(default, rename = "curiculum")]
    pub curriculum: Vec<CurriculumEntry>,
}

impl Course {
    pub fn display_title(&self) -> &str {
        if self.title.trim().is_empty() {
            &self.name
        } else {
            &self.title
        }
    }

    /// Order lessons by `no_urut`; unnumbered lessons keep their order at the end.
    pub fn sort_curriculum(&mut self) {
        self.curriculum
            .sort_by_key(|entry| entry.no_urut.unwrap_or(i64::MAX));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn cart_item_prefers_picture_and_mentor_name() {
        let item: CartItem = serde_json::from_value(json!({
            "id": "9a537bca",
            "title": "Mastering React.js & Next.js",
            "mentor": "Rizky",
            "mentor_name": "Ir. Rizky Ramadhan, M.Kom",
            "price": 499000,
            "image": "/img/a.png",
            "picture": "/img/b.png"
        }))
        .unwrap();
        assert_eq!(item.id, CourseId::from("9a537bca"));
        assert_eq!(item.mentor, "Ir. Rizky Ramadhan, M.Kom");
        assert_eq!(item.image.as_deref(), Some("/img/b.png"));
    }

    #[test]
    fn cart_item_defaults_for_sparse_rows() {
        let item: CartItem =
            serde_json::from_value(json!({ "id": 7, "name": "UI/UX", "price": 399000 })).unwrap();
        assert_eq!(item.id, CourseId::Number(7));
        assert_eq!(item.title, "UI/UX");
        assert_eq!(item.mentor, DEFAULT_MENTOR);
        assert_eq!(item.image_or_placeholder(), PLACEHOLDER_IMAGE);
    }

    #[test]
    fn course_id_serializes_back_in_source_type() {
        let body = serde_json::to_value(vec![
            PaymentItem { course_id: CourseId::from("abc") },
            PaymentItem { course_id: CourseId::from(3) },
        ])
        .unwrap();
        assert_eq!(body, json!([{ "course_id": "abc" }, { "course_id": 3 }]));
    }

    #[test]
    fn payment_response_finds_direct_url_in_either_place() {
        let nested: PaymentResponse = serde_json::from_value(json!({
            "success": true,
            "data": { "direct_url": "https://app.midtrans.com/snap/v4/redirection/abc123" }
        }))
        .unwrap();
        assert_eq!(
            nested.direct_url(),
            Some("https://app.midtrans.com/snap/v4/redirection/abc123")
        );

        let flat: PaymentResponse =
            serde_json::from_value(json!({ "success": true, "direct_url": "https://x/y/z" }))
                .unwrap();
        assert_eq!(flat.direct_url(), Some("https://x/y/z"));

        let none: PaymentResponse =
            serde_json::from_value(json!({ "success": true, "data": {} })).unwrap();
        assert_eq!(none.direct_url(), None);
    }

    #[test]
    fn envelope_reason_prefers_message_then_error() {
        let env: Envelope<()> =
            serde_json::from_value(json!({ "success": false, "message": "", "error": "Already enrolled" }))
                .unwrap();
        assert_eq!(env.reason().as_deref(), Some("Already enrolled"));
    }

    #[test]
    fn curriculum_sorts_by_position_with_unnumbered_last() {
        let mut course: Course = serde_json::from_value(json!({
            "id": "c",
            "title": "Course",
            "curiculum": [
                { "name": "intro-late", "no_urut": 3 },
                { "name": "loose" },
                { "name": "first", "no_urut": 1 },
                { "name": "second", "no_urut": 2 }
            ]
        }))
        .unwrap();
        course.sort_curriculum();
        let names: Vec<_> = course.curriculum.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["first", "second", "intro-late", "loose"]);
    }
}
