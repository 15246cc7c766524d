//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration and delegates rendering details
//! to `components`. Access control sits at the page boundary through
//! `RoleGuard` and `GuestOnly`.

pub mod company_dashboard;
pub mod landing;
pub mod login;
pub mod signup;
pub mod student_dashboard;
