// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Exposition and poll bookkeeping helpers

use crate::error::{AppError, Result};
use crate::metrics::labels::QueryLabels;
use prometheus_client::encoding::text::encode;

use super::MetricsRegistry;

impl MetricsRegistry {
    pub async fn encode_metrics(&self) -> Result<String> {
        let registry = self.registry.lock().await;
        let mut buffer = String::new();
        encode(&mut buffer, &registry).map_err(|e| AppError::Metrics(e.to_string()))?;
        Ok(buffer)
    }

    /// Initialize poll counters for a query to zero
    ///
    /// Makes `keenetic_poll_*` series visible before the first tick completes.
    pub fn initialize_query_metrics(&self, labels: &QueryLabels) {
        let _ = self.poll_success.get_or_create(labels);
        let _ = self.poll_errors.get_or_create(labels);
        let _ = self.poll_duration_milliseconds.get_or_create(labels);
    }

    pub fn record_poll_success(&self, labels: &QueryLabels) {
        self.poll_success.get_or_create(labels).inc();
    }

    pub fn record_poll_error(&self, labels: &QueryLabels) {
        self.poll_errors.get_or_create(labels).inc();
    }

    pub fn record_poll_duration(&self, labels: &QueryLabels, duration_secs: f64) {
        #[allow(clippy::cast_possible_truncation)]
        let millis = (duration_secs * 1000.0).round() as i64;
        self.poll_duration_milliseconds
            .get_or_create(labels)
            .set(millis);
    }

    /// Successful poll count, used by the health check
    pub fn poll_success_count(&self, labels: &QueryLabels) -> u64 {
        self.poll_success.get_or_create(labels).get()
    }
}
