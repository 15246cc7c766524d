//! Authentication and role-scoped access for StudentConnect.
//!
//! Shared by the browser client and the host server. Nothing in here touches
//! the DOM or a specific async runtime: service futures are `?Send` and run
//! on whatever local executor the caller provides.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`store`] | [`AuthStore`]: published auth state plus login, signup, logout and profile update |
//! | [`bridge`] | [`SessionBridge`]: sole writer of auth state, driven by service events |
//! | [`guard`] | Route-guard decisions for role-scoped and guest-only pages |
//! | [`routing`] | Route constants, dashboard mapping, welcome text |
//! | [`service`] | [`IdentityService`] trait, sessions and auth events |
//! | [`supabase`] | HTTP implementation of the service |
//! | [`profile`] | Profile rows, the role-tagged [`User`], patches |
//! | [`signup`] | Signup payloads and validation |
//! | [`state`] | [`AuthState`] snapshot |
//! | [`storage`] | Session persistence seam |
//! | [`config`] | Service URL and public key |
//! | [`error`] | [`ServiceError`] and [`AuthError`] |

pub mod bridge;
pub mod config;
pub mod error;
pub mod guard;
pub mod profile;
pub mod routing;
pub mod service;
pub mod signup;
pub mod state;
pub mod storage;
pub mod store;
pub mod supabase;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use bridge::SessionBridge;
pub use config::SupabaseConfig;
pub use error::{AuthError, ServiceError};
pub use guard::GuardState;
pub use profile::{CompanyProfile, CompanySize, ContactPerson, ProfilePatch, Role, StudentProfile, User};
pub use service::IdentityService;
pub use signup::{CompanySignupData, SignupData, StudentSignupData};
pub use state::AuthState;
pub use store::{AuthStore, SignupOutcome};
pub use supabase::SupabaseClient;
