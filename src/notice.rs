//! User-facing notices shown as page toasts.

use crate::error::{ApiError, CheckoutError, SnapError};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Info,
    Warning,
    Error,
}

impl NoticeLevel {
    pub fn css_class(self) -> &'static str {
        match self {
            NoticeLevel::Success => "ks-notice ks-notice-success",
            NoticeLevel::Info => "ks-notice ks-notice-info",
            NoticeLevel::Warning => "ks-notice ks-notice-warning",
            NoticeLevel::Error => "ks-notice ks-notice-error",
        }
    }
}

/// Follow-up a notice can offer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NoticeAction {
    /// Go to the sign-in page and come back to `return_to`.
    SignIn { return_to: String },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub description: Option<String>,
    pub action: Option<NoticeAction>,
}

impl Notice {
    pub fn new(level: NoticeLevel, title: impl Into<String>) -> Self {
        Self {
            level,
            title: title.into(),
            description: None,
            action: None,
        }
    }

    pub fn success(title: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Success, title)
    }

    pub fn info(title: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Info, title)
    }

    pub fn warning(title: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Warning, title)
    }

    pub fn error(title: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Error, title)
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_action(mut self, action: NoticeAction) -> Self {
        self.action = Some(action);
        self
    }

    /// The "please sign in" prompt, returning to `return_to` afterwards.
    pub fn sign_in(return_to: &str) -> Self {
        Notice::error("Silakan masuk terlebih dahulu")
            .with_description("Anda harus memiliki akun untuk mendaftar kelas.")
            .with_action(NoticeAction::SignIn {
                return_to: return_to.to_string(),
            })
    }

    /// Notice for a failed action titled `title`, with `fallback` when the
    /// backend gave no reason.
    pub fn for_error(err: &CheckoutError, title: &str, fallback: &str, return_to: &str) -> Self {
        match err {
            CheckoutError::NotSignedIn => Notice::sign_in(return_to),
            CheckoutError::EmptyCart => Notice::warning("Keranjang Anda kosong")
                .with_description("Tambahkan kelas sebelum melakukan pembayaran."),
            CheckoutError::Api(ApiError::Network(_)) => Notice::error(title)
                .with_description("Gagal menghubungi server. Periksa koneksi internet anda."),
            CheckoutError::Api(api) => Notice::error(title)
                .with_description(api.backend_message().unwrap_or(fallback).to_string()),
        }
    }

    pub fn for_snap_error(err: &SnapError) -> Self {
        match err {
            SnapError::NotLoaded => Notice::error("Pembayaran belum siap")
                .with_description("Modul pembayaran masih dimuat, silakan coba lagi."),
            SnapError::Js(_) => Notice::error("Pembayaran gagal")
                .with_description("Terjadi kesalahan saat membuka jendela pembayaran."),
        }
    }
}
