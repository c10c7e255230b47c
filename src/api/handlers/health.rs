// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::api::AppState;
use crate::metrics::QueryLabels;

/// Health check endpoint response structure
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub system_polls: u64,
    pub traffic_polls: u64,
}

/// GET /health
///
/// Returns "ok", the application version and how many polls of each
/// family have succeeded so far.
pub async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let response = HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        system_polls: state
            .metrics
            .poll_success_count(&QueryLabels::new("system")),
        traffic_polls: state
            .metrics
            .poll_success_count(&QueryLabels::new("traffic")),
    };

    (StatusCode::OK, Json(response))
}
