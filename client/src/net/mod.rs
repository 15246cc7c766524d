//! Networking and browser persistence.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` talks to the host server; `storage` keeps the auth session in
//! `localStorage`. Calls to the auth service itself go through `identity`.

pub mod api;
pub mod storage;
