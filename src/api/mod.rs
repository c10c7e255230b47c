// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! HTTP API module for Keenetic Exporter
//!
//! Provides REST API endpoints for health checks and Prometheus metrics export.
//!
//! # Endpoints
//! - `GET /health`: health check
//! - `GET /metrics`: Prometheus metrics

pub mod handlers;

use axum::{Router, routing::get};
use std::sync::Arc;

use crate::config::Config;
use crate::metrics::MetricsRegistry;

/// Application state shared with endpoints
pub struct AppState {
    pub config: Config,
    pub metrics: MetricsRegistry,
}

/// Creates the main Axum router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/metrics", get(handlers::metrics_handler))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{NamedEndpoint, RouterConfig};

    fn test_config() -> Config {
        Config {
            server_addr: "127.0.0.1:2112".to_string(),
            router: RouterConfig::new("http://192.168.1.1", "admin", "password"),
            interfaces: vec![NamedEndpoint::new("wan", "ISP")],
            devices: Vec::new(),
            system_interval_secs: 4,
            traffic_interval_secs: 2,
        }
    }

    #[test]
    fn test_create_router() {
        let metrics = MetricsRegistry::new();
        let app_state = Arc::new(AppState {
            config: test_config(),
            metrics,
        });

        let _router = create_router(app_state);
    }

    #[test]
    fn test_app_state_creation() {
        let state = AppState {
            config: test_config(),
            metrics: MetricsRegistry::new(),
        };

        assert_eq!(state.config.server_addr, "127.0.0.1:2112");
        assert_eq!(state.config.traffic_interval_secs, 2);
    }
}
