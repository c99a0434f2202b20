//! Clients for external HTTP APIs
//!
//! Each external service gets its own submodule built on the shared
//! rate-limited client in `client`.

pub mod client;
pub mod tmpfiles;
