// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Prelude module for convenient imports
//!
//! This module re-exports commonly used types and traits for convenient use.
//! Users of the library can import everything they need with:
//!
//! ```rust
//! use keenetic_exporter::prelude::*;
//! ```

// Core types
pub use crate::config::{Config, NamedEndpoint, RouterConfig};
pub use crate::error::{AppError, Result};

// Metrics types
pub use crate::metrics::{
    DeviceLabels, InterfaceLabels, MemoryLabels, MetricsRegistry, QueryLabels, SignalLabels,
    SystemInfoLabels,
};

// Keenetic client
pub use crate::keenetic::{
    KeeneticClient, Query, SessionCookie, SystemQuery, SystemSnapshot, TrafficQuery, TrafficStat,
};
