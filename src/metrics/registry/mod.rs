// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Metrics registry and update logic

mod init;
mod scrape;
mod update;

use crate::metrics::labels::{
    DeviceLabels, InterfaceLabels, MemoryLabels, QueryLabels, SignalLabels, SystemInfoLabels,
};
use prometheus_client::metrics::counter::Counter;
use prometheus_client::metrics::family::Family;
use prometheus_client::metrics::gauge::Gauge;
use prometheus_client::registry::Registry;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Handle set over every exported metric
///
/// Built once at startup and cloned into the poll loops and the HTTP state;
/// clones share the same underlying series.
#[derive(Clone)]
pub struct MetricsRegistry {
    registry: Arc<Mutex<Registry>>,
    // system snapshot
    cpu_load: Gauge,
    mem_usage: Family<MemoryLabels, Gauge>,
    uptime_seconds: Gauge,
    swap_usage: Family<MemoryLabels, Gauge>,
    system_info: Family<SystemInfoLabels, Gauge>,
    internet_available: Gauge,
    // traffic
    interface_bytes: Family<InterfaceLabels, Gauge>,
    device_traffic_bytes: Family<DeviceLabels, Gauge>,
    device_signal_rssi: Family<SignalLabels, Gauge>,
    // poll status
    poll_success: Family<QueryLabels, Counter>,
    poll_errors: Family<QueryLabels, Counter>,
    poll_duration_milliseconds: Family<QueryLabels, Gauge>,
    prev_system_info: Arc<Mutex<Option<SystemInfoLabels>>>,
}

impl Default for MetricsRegistry {
    fn default() -> Self {
        Self::new()
    }
}
