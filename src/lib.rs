// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! # Keenetic Exporter
//!
//! Prometheus exporter for Keenetic routers.
//!
//! This library logs into the router's NDM web interface with its
//! challenge-response scheme, polls the RCI endpoint on fixed periods and
//! exposes the results in Prometheus format.
//!
//! ## Main modules
//! - `api`: HTTP API handlers
//! - `collector`: poll scheduling
//! - `config`: configuration management
//! - `error`: error types
//! - `keenetic`: router session client and queries
//! - `metrics`: metric extraction and registry
//! - `prelude`: commonly used types and traits

mod api;
mod collector;
mod config;
mod error;
mod keenetic;
mod metrics;
pub mod prelude;

// Re-export commonly used types
/// Application configuration
pub use config::{Config, NamedEndpoint, RouterConfig};

/// Application error and result type
pub use error::{AppError, Result};

/// HTTP API router and state
pub use api::{AppState, create_router};

/// Poll loops
pub use collector::{PollLoops, start_poll_loops};

/// Metrics registry and labels
pub use metrics::{MetricsRegistry, QueryLabels};

/// Keenetic session client, queries and response types
pub use keenetic::{
    KeeneticClient, Query, SessionCookie, SystemQuery, SystemSnapshot, TrafficQuery, TrafficStat,
    credential_digest, types,
};
