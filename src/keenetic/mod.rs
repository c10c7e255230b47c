//! Keenetic NDM web API client module
//!
//! This module provides the challenge-response login, the cookie-carrying
//! session client and the RCI queries whose responses feed the exporter.

mod client;
mod digest;
mod query;
pub mod types;

// Re-export public types and functions
pub use client::{KeeneticClient, SessionCookie};
pub use digest::credential_digest;
pub use query::{Query, SystemQuery, TrafficQuery};
pub use types::{SystemSnapshot, TrafficStat};
