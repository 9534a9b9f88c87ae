//! config.rs
//!
//! Build-time configuration for the Kelas Santai client.
//!
//! Everything is resolved with `option_env!` when the wasm bundle is built, so
//! a deployment sets the variables below in the environment of `trunk build`:
//!
//! | Variable                        | Default                                  |
//! |---------------------------------|------------------------------------------|
//! | `KELAS_SANTAI_API_URL`          | `http://localhost:4000/api/v1`           |
//! | `KELAS_SANTAI_SNAP_URL`         | `https://app.midtrans.com/snap/snap.js`  |
//! | `KELAS_SANTAI_SNAP_CLIENT_KEY`  | empty                                    |
//! | `KELAS_SANTAI_LOGIN_PATH`       | `/login`                                 |

pub const DEFAULT_API_URL: &str = "http://localhost:4000/api/v1";
pub const DEFAULT_SNAP_URL: &str = "https://app.midtrans.com/snap/snap.js";
pub const DEFAULT_LOGIN_PATH: &str = "/login";

/// Resolved client configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    /// REST API base, without a trailing slash.
    pub api_url: String,
    /// Location of the Snap checkout script.
    pub snap_url: String,
    /// Public client key passed to Snap as `data-client-key`.
    pub snap_client_key: String,
    /// Route of the sign-in page.
    pub login_path: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::new(
            option_env!("KELAS_SANTAI_API_URL"),
            option_env!("KELAS_SANTAI_SNAP_URL"),
            option_env!("KELAS_SANTAI_SNAP_CLIENT_KEY"),
            option_env!("KELAS_SANTAI_LOGIN_PATH"),
        )
    }

    /// Build a config from optional overrides; blank values fall back to defaults.
    pub fn new(
        api_url: Option<&str>,
        snap_url: Option<&str>,
        snap_client_key: Option<&str>,
        login_path: Option<&str>,
    ) -> Self {
        fn pick(value: Option<&str>, default: &str) -> String {
            value
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .unwrap_or(default)
                .to_string()
        }

        Self {
            api_url: pick(api_url, DEFAULT_API_URL).trim_end_matches('/').to_string(),
            snap_url: pick(snap_url, DEFAULT_SNAP_URL),
            snap_client_key: snap_client_key.unwrap_or_default().trim().to_string(),
            login_path: pick(login_path, DEFAULT_LOGIN_PATH),
        }
    }

    /// Join an API path onto the base URL.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_url, path.trim_start_matches('/'))
    }

    /// Sign-in URL that sends the user back to `return_to` afterwards.
    pub fn login_redirect(&self, return_to: &str) -> String {
        format!(
            "{}?redirect_to={}",
            self.login_path,
            urlencoding::encode(return_to)
        )
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new(None, None, None, None)
    }
}
