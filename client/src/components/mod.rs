//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components read shared auth state from Leptos context; pages compose them.

pub mod dashboard_layout;
pub mod profile_card;
pub mod role_guard;
pub mod text_field;
