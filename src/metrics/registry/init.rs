// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Registry initialization and metric registration

use crate::metrics::labels::{
    DeviceLabels, InterfaceLabels, MemoryLabels, QueryLabels, SignalLabels, SystemInfoLabels,
};
use prometheus_client::metrics::counter::Counter;
use prometheus_client::metrics::family::Family;
use prometheus_client::metrics::gauge::Gauge;
use prometheus_client::registry::Registry;
use std::sync::Arc;
use tokio::sync::Mutex;

use super::MetricsRegistry;

impl MetricsRegistry {
    pub fn new() -> Self {
        let mut registry = Registry::default();

        let cpu_load = Gauge::default();
        registry.register("keenetic_cpu_load", "Current load of the CPU", cpu_load.clone());
        let mem_usage = Family::<MemoryLabels, Gauge>::default();
        registry.register(
            "keenetic_mem_usage",
            "Memory usage in kilobytes by type (total, cache, free, buffers)",
            mem_usage.clone(),
        );
        let uptime_seconds = Gauge::default();
        registry.register(
            "keenetic_uptime_seconds",
            "System uptime in seconds",
            uptime_seconds.clone(),
        );
        let swap_usage = Family::<MemoryLabels, Gauge>::default();
        registry.register(
            "keenetic_swap_usage",
            "Swap usage in kilobytes by type (total, free)",
            swap_usage.clone(),
        );
        let system_info = Family::<SystemInfoLabels, Gauge>::default();
        registry.register(
            "keenetic_system_info",
            "Static system info (value=1)",
            system_info.clone(),
        );
        let internet_available = Gauge::default();
        registry.register(
            "keenetic_internet_available",
            "Internet connectivity check result (1=available,0=unavailable)",
            internet_available.clone(),
        );

        let interface_bytes = Family::<InterfaceLabels, Gauge>::default();
        registry.register(
            "keenetic_interface_bytes",
            "Bytes counted on interface by direction",
            interface_bytes.clone(),
        );
        let device_traffic_bytes = Family::<DeviceLabels, Gauge>::default();
        registry.register(
            "keenetic_device_traffic_bytes",
            "Traffic of a client device by direction",
            device_traffic_bytes.clone(),
        );
        let device_signal_rssi = Family::<SignalLabels, Gauge>::default();
        registry.register(
            "keenetic_device_signal_rssi",
            "Wi-Fi signal strength of a client device in dBm",
            device_signal_rssi.clone(),
        );

        let poll_success = Family::<QueryLabels, Counter>::default();
        registry.register(
            "keenetic_poll_success",
            "Successful polls per query",
            poll_success.clone(),
        );
        let poll_errors = Family::<QueryLabels, Counter>::default();
        registry.register(
            "keenetic_poll_errors",
            "Failed polls per query",
            poll_errors.clone(),
        );
        let poll_duration_milliseconds = Family::<QueryLabels, Gauge>::default();
        registry.register(
            "keenetic_poll_duration_milliseconds",
            "Duration of last poll in milliseconds",
            poll_duration_milliseconds.clone(),
        );

        Self {
            registry: Arc::new(Mutex::new(registry)),
            cpu_load,
            mem_usage,
            uptime_seconds,
            swap_usage,
            system_info,
            internet_available,
            interface_bytes,
            device_traffic_bytes,
            device_signal_rssi,
            poll_success,
            poll_errors,
            poll_duration_milliseconds,
            prev_system_info: Arc::new(Mutex::new(None)),
        }
    }
}
