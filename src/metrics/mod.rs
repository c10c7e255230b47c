// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Metrics registry and update module for Keenetic Exporter
//!
//! Contains types for labels, parsers, and Prometheus metrics registry.

mod labels;
mod parsers;
mod registry;

#[cfg(test)]
mod tests;

/// Labels for memory, interfaces, devices, system info and polls
pub use labels::{
    DeviceLabels, InterfaceLabels, MemoryLabels, QueryLabels, RX, SignalLabels, SystemInfoLabels,
    TX,
};

/// Lenient numeric parsing used during extraction
pub use parsers::parse_uptime_seconds;

/// Prometheus metrics registry
pub use registry::MetricsRegistry;
