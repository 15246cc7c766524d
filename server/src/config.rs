//! Server configuration parsed from environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

use identity::SupabaseConfig;
use identity::config::ConfigError;

pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, thiserror::Error)]
pub enum ServerConfigError {
    #[error("invalid PORT '{0}'")]
    InvalidPort(String),
    #[error(transparent)]
    Supabase(#[from] ConfigError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    /// `None` when the auth service is not configured; the app still serves,
    /// but `/api/public-config` answers 503.
    pub supabase: Option<SupabaseConfig>,
}

impl ServerConfig {
    /// Build from the process environment.
    ///
    /// Optional:
    /// - `PORT`: default 3000
    /// - `SUPABASE_URL` + `SUPABASE_ANON_KEY`: both or neither
    pub fn from_env() -> Result<Self, ServerConfigError> {
        Self::from_parts(std::env::var("PORT").ok().as_deref(), SupabaseConfig::from_env())
    }

    /// A missing Supabase variable disables auth; a malformed one is fatal.
    pub fn from_parts(
        port: Option<&str>,
        supabase: Result<SupabaseConfig, ConfigError>,
    ) -> Result<Self, ServerConfigError> {
        let port = match port.map(str::trim).filter(|p| !p.is_empty()) {
            Some(raw) => raw.parse().map_err(|_| ServerConfigError::InvalidPort(raw.to_owned()))?,
            None => DEFAULT_PORT,
        };
        let supabase = match supabase {
            Ok(config) => Some(config),
            Err(ConfigError::Missing { var }) => {
                tracing::warn!(%var, "auth service not configured; sign-in disabled");
                None
            }
            Err(e) => return Err(e.into()),
        };
        Ok(Self { port, supabase })
    }
}
