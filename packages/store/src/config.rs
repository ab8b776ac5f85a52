//! # Client configuration: `kitchen-saver.toml`
//!
//! Settings the browser client needs before it can talk to anyone: where the
//! backend lives and how long transient UI states last. The web binary embeds
//! the file at build time (filename: [`ClientConfig::filename`]).
//!
//! ## Structure
//!
//! ```toml
//! [api]
//! base_url = "http://localhost:8080"   # backend origin, "/api" is appended
//!
//! [ui]
//! notice_dismiss_ms = 3000   # how long error/success banners stay up
//! gate_debounce_ms = 0       # minimum time a gate stays in its loading state
//! ```
//!
//! ## Types
//!
//! | Struct | Purpose |
//! |--------|---------|
//! | [`ClientConfig`] | Top-level config with TOML (de)serialisation and a base-URL override. |
//! | [`ApiConfig`] | Backend origin. |
//! | [`UiConfig`] | Notice lifetime and gate debounce. |
//!
//! All structs have production defaults, so a missing or empty file is the
//! default configuration.

use serde::{Deserialize, Serialize};

/// Top-level client configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

/// Backend location.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Origin of the backend, without the `/api` suffix.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

/// Timing of transient UI states.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_notice_dismiss_ms")]
    pub notice_dismiss_ms: u64,
    /// 0 lets gates decide on first render.
    #[serde(default)]
    pub gate_debounce_ms: u64,
}

fn default_notice_dismiss_ms() -> u64 {
    3_000
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            notice_dismiss_ms: default_notice_dismiss_ms(),
            gate_debounce_ms: 0,
        }
    }
}

impl ClientConfig {
    /// Builder method to point the client at another backend.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.api.base_url = base_url.into();
        self
    }

    /// The REST root: the base URL with `/api` appended.
    pub fn api_root(&self) -> String {
        format!("{}/api", self.api.base_url.trim_end_matches('/'))
    }

    /// The well-known filename for the config file.
    pub fn filename() -> &'static str {
        "kitchen-saver.toml"
    }

    /// Parse from TOML string.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Serialize to TOML string.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}
