//! Session cookie configuration.

use serde::{Deserialize, Serialize};

/// Names and attributes of the two session cookies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CookieConfig {
    /// Cookie carrying the access token.
    #[serde(default = "default_access_name")]
    pub access_name: String,
    /// Cookie carrying the refresh token.
    #[serde(default = "default_refresh_name")]
    pub refresh_name: String,
    /// Sets the `Secure` attribute. Enable in production.
    #[serde(default)]
    pub secure: bool,
    /// Cookie path scope.
    #[serde(default = "default_path")]
    pub path: String,
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            access_name: default_access_name(),
            refresh_name: default_refresh_name(),
            secure: false,
            path: default_path(),
        }
    }
}

fn default_access_name() -> String {
    "accessToken".to_string()
}

fn default_refresh_name() -> String {
    "refreshToken".to_string()
}

fn default_path() -> String {
    "/".to_string()
}
