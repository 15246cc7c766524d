use super::*;

fn supabase() -> Result<SupabaseConfig, ConfigError> {
    SupabaseConfig::from_values(Some("https://abc.supabase.co/"), Some("anon"))
}

#[test]
fn port_defaults_when_absent_or_blank() {
    assert_eq!(ServerConfig::from_parts(None, supabase()).unwrap().port, DEFAULT_PORT);
    assert_eq!(ServerConfig::from_parts(Some("  "), supabase()).unwrap().port, DEFAULT_PORT);
}

#[test]
fn port_parses_override() {
    assert_eq!(ServerConfig::from_parts(Some("8080"), supabase()).unwrap().port, 8080);
}

#[test]
fn invalid_port_is_an_error() {
    let err = ServerConfig::from_parts(Some("http"), supabase()).unwrap_err();
    assert!(matches!(err, ServerConfigError::InvalidPort(ref p) if p == "http"));
    assert_eq!(err.to_string(), "invalid PORT 'http'");
}

#[test]
fn supabase_config_is_kept() {
    let cfg = ServerConfig::from_parts(None, supabase()).unwrap();
    assert_eq!(cfg.supabase.map(|s| s.url), Some("https://abc.supabase.co".to_owned()));
}

#[test]
fn missing_supabase_disables_auth() {
    let missing = SupabaseConfig::from_values(None, Some("anon"));
    let cfg = ServerConfig::from_parts(None, missing).unwrap();
    assert!(cfg.supabase.is_none());
}

#[test]
fn malformed_supabase_url_is_fatal() {
    let bad = SupabaseConfig::from_values(Some("abc.supabase.co"), Some("anon"));
    let err = ServerConfig::from_parts(None, bad).unwrap_err();
    assert!(matches!(err, ServerConfigError::Supabase(ConfigError::InvalidUrl(_))));
}
