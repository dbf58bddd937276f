//! Networking: the HTTP transport seam, wire DTOs, the authentication
//! operation, and authorized REST helpers.

pub mod api;
pub mod auth;
pub mod http;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;
