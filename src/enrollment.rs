//! Enrolling in a course from its detail page.
//!
//! Enrollment puts the course in the cart as a pending (unpaid) enrollment;
//! payment then goes through the cart checkout.

use crate::api::CourseBackend;
use crate::error::{ApiError, CheckoutError};
use crate::models::CourseId;
use crate::notice::Notice;
use crate::session::SessionStore;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnrollStatus {
    Enrolled,
    /// The backend says the user already has this course.
    AlreadyEnrolled,
}

impl EnrollStatus {
    pub fn notice(self) -> Notice {
        match self {
            EnrollStatus::Enrolled => {
                Notice::success("Berhasil mendaftar kelas!").with_description("Selamat belajar!")
            }
            EnrollStatus::AlreadyEnrolled => Notice::info("Anda sudah terdaftar")
                .with_description("Anda sudah mengambil kelas ini sebelumnya."),
        }
    }
}

/// Route of a course's detail page.
pub fn course_path(course_id: &CourseId) -> String {
    format!("/courses/{}", course_id)
}

fn is_already_enrolled(err: &ApiError) -> bool {
    err.backend_message()
        .map(|m| m.to_lowercase().contains("already enrolled"))
        .unwrap_or(false)
}

/// Enroll the signed-in user in `course_id`.
///
/// Nothing is sent when signed out.
pub async fn enroll_course<S, B>(session: &S, backend: &B, course_id: &CourseId) -> Result<EnrollStatus, CheckoutError>
where
    S: SessionStore + ?Sized,
    B: CourseBackend + ?Sized,
{
    let token = session.auth_token().ok_or(CheckoutError::NotSignedIn)?;
    match backend.enroll(&token, course_id).await {
        Ok(()) => {
            log::info!("enrolled in course {}", course_id);
            Ok(EnrollStatus::Enrolled)
        }
        Err(err) if is_already_enrolled(&err) => {
            log::info!("course {} already enrolled", course_id);
            Ok(EnrollStatus::AlreadyEnrolled)
        }
        Err(err) => {
            log::warn!("enrollment in {} failed: {}", course_id, err);
            Err(err.into())
        }
    }
}

/// Notice for a failed enrollment.
pub fn enroll_failure_notice(err: &CheckoutError, course_id: &CourseId) -> Notice {
    Notice::for_error(
        err,
        "Gagal mendaftar kelas",
        "Terjadi kesalahan pada server.",
        &course_path(course_id),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notice::{NoticeAction, NoticeLevel};
    use crate::session::MemorySession;
    use crate::testing::FakeBackend;
    use futures::executor::block_on;

    #[test]
    fn signed_out_enrollment_sends_nothing() {
        let backend = FakeBackend::default();
        let id = CourseId::from("42");
        let err = block_on(enroll_course(&MemorySession::signed_out(), &backend, &id)).unwrap_err();
        assert_eq!(err, CheckoutError::NotSignedIn);
        assert_eq!(backend.calls(), 0);
        assert_eq!(
            enroll_failure_notice(&err, &id).action,
            Some(NoticeAction::SignIn { return_to: "/courses/42".into() })
        );
    }

    #[test]
    fn successful_enrollment() {
        let backend = FakeBackend::default();
        let session = MemorySession::signed_in("tok");
        let status = block_on(enroll_course(&session, &backend, &CourseId::from(3))).unwrap();
        assert_eq!(status, EnrollStatus::Enrolled);
        assert_eq!(status.notice().level, NoticeLevel::Success);
        assert_eq!(backend.tokens(), ["tok"]);
    }

    #[test]
    fn already_enrolled_is_informational() {
        let backend = FakeBackend::default();
        backend.answer_enroll(Err(ApiError::Rejected {
            status: 409,
            message: Some("User Already Enrolled in this course".into()),
        }));
        let session = MemorySession::signed_in("tok");
        let status = block_on(enroll_course(&session, &backend, &CourseId::from(3))).unwrap();
        assert_eq!(status, EnrollStatus::AlreadyEnrolled);
        assert_eq!(status.notice().level, NoticeLevel::Info);
    }

    #[test]
    fn other_rejections_surface_backend_message() {
        let backend = FakeBackend::default();
        backend.answer_enroll(Err(ApiError::Rejected {
            status: 500,
            message: Some("Course is closed".into()),
        }));
        let session = MemorySession::signed_in("tok");
        let id = CourseId::from(3);
        let err = block_on(enroll_course(&session, &backend, &id)).unwrap_err();
        let notice = enroll_failure_notice(&err, &id);
        assert_eq!(notice.title, "Gagal mendaftar kelas");
        assert_eq!(notice.description.as_deref(), Some("Course is closed"));
    }

    #[test]
    fn unreachable_server_says_so() {
        let backend = FakeBackend::default();
        backend.answer_enroll(Err(ApiError::Network("failed to fetch".into())));
        let session = MemorySession::signed_in("tok");
        let id = CourseId::from(3);
        let err = block_on(enroll_course(&session, &backend, &id)).unwrap_err();
        assert_eq!(err, CheckoutError::Api(ApiError::Network("failed to fetch".into())));
        let notice = enroll_failure_notice(&err, &id);
        assert_eq!(notice.level, NoticeLevel::Error);
        assert_eq!(
            notice.description.as_deref(),
            Some("Gagal menghubungi server. Periksa koneksi internet anda.")
        );
    }
}
