//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. The
//! server holds no user data; it only knows the public auth service config
//! it hands to browsers.

use std::sync::Arc;

use identity::SupabaseConfig;

/// Clone is required by Axum; inner fields are Arc-wrapped.
#[derive(Clone, Default)]
pub struct AppState {
    pub supabase: Option<Arc<SupabaseConfig>>,
}

impl AppState {
    #[must_use]
    pub fn new(supabase: Option<SupabaseConfig>) -> Self {
        Self { supabase: supabase.map(Arc::new) }
    }
}
