//! Same-origin calls to the host server.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR): stubs returning errors, since the only caller is the
//! browser startup path.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use identity::SupabaseConfig;

/// Served by the host with the runtime `SUPABASE_URL` / `SUPABASE_ANON_KEY`.
pub const PUBLIC_CONFIG_ENDPOINT: &str = "/api/public-config";

#[cfg(any(test, feature = "hydrate"))]
fn config_request_failed_message(status: u16) -> String {
    format!("public config request failed: {status}")
}

/// Prefer the host's runtime config; fall back to values baked in at build time.
#[cfg(any(test, feature = "hydrate"))]
fn choose_config<F>(fetched: Result<SupabaseConfig, String>, fallback: F) -> Result<SupabaseConfig, String>
where
    F: FnOnce() -> Result<SupabaseConfig, identity::config::ConfigError>,
{
    match fetched {
        Ok(config) => Ok(config),
        Err(fetch_err) => {
            tracing::warn!(error = %fetch_err, "runtime config unavailable; using build-time values");
            fallback().map_err(|e| format!("{e} (runtime config: {fetch_err})"))
        }
    }
}

/// Fetch and validate the service config from [`PUBLIC_CONFIG_ENDPOINT`].
///
/// # Errors
///
/// Returns an error string if the request fails, the host answers non-OK
/// (503 when it has no config), or the values are invalid.
pub async fn fetch_public_config() -> Result<SupabaseConfig, String> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::get(PUBLIC_CONFIG_ENDPOINT)
            .send()
            .await
            .map_err(|e| e.to_string())?;
        if !resp.ok() {
            return Err(config_request_failed_message(resp.status()));
        }
        let raw: SupabaseConfig = resp.json().await.map_err(|e| e.to_string())?;
        SupabaseConfig::from_values(Some(&raw.url), Some(&raw.anon_key)).map_err(|e| e.to_string())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        Err("not available on server".to_owned())
    }
}

/// Config the browser should use, runtime first.
///
/// # Errors
///
/// Returns an error string when neither source yields a usable config.
#[cfg(feature = "hydrate")]
pub async fn resolve_config() -> Result<SupabaseConfig, String> {
    choose_config(fetch_public_config().await, SupabaseConfig::from_build_env)
}
