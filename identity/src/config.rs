//! Hosted service configuration.

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

use serde::{Deserialize, Serialize};

pub const URL_VAR: &str = "SUPABASE_URL";
pub const ANON_KEY_VAR: &str = "SUPABASE_ANON_KEY";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("missing environment variable {var}")]
    Missing { var: &'static str },
    #[error("SUPABASE_URL must be an http(s) URL, got '{0}'")]
    InvalidUrl(String),
}

/// Project URL plus the public (anon) API key. Both are safe to ship to the
/// browser; row-level security does the gating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupabaseConfig {
    #[serde(rename = "supabase_url")]
    pub url: String,
    #[serde(rename = "supabase_anon_key")]
    pub anon_key: String,
}

impl SupabaseConfig {
    /// Read `SUPABASE_URL` and `SUPABASE_ANON_KEY` at runtime.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_values(
            std::env::var(URL_VAR).ok().as_deref(),
            std::env::var(ANON_KEY_VAR).ok().as_deref(),
        )
    }

    /// Values baked in at compile time, for builds that cannot read the
    /// environment (wasm).
    pub fn from_build_env() -> Result<Self, ConfigError> {
        Self::from_values(option_env!("SUPABASE_URL"), option_env!("SUPABASE_ANON_KEY"))
    }

    /// Validate raw values. Blank counts as missing; a trailing slash on the
    /// URL is dropped.
    pub fn from_values(url: Option<&str>, anon_key: Option<&str>) -> Result<Self, ConfigError> {
        let url = present(url).ok_or(ConfigError::Missing { var: URL_VAR })?;
        let anon_key = present(anon_key).ok_or(ConfigError::Missing { var: ANON_KEY_VAR })?;
        if !(url.starts_with("https://") || url.starts_with("http://")) {
            return Err(ConfigError::InvalidUrl(url.to_owned()));
        }
        Ok(Self { url: url.trim_end_matches('/').to_owned(), anon_key: anon_key.to_owned() })
    }

    /// `<url>/auth/v1<path>`
    #[must_use]
    pub fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1{path}", self.url)
    }

    /// `<url>/rest/v1/<table>`
    #[must_use]
    pub fn rest_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{table}", self.url)
    }
}

fn present(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|v| !v.is_empty())
}
