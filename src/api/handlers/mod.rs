// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Request handlers for the exporter endpoints

mod health;
mod metrics;

pub use health::health_check;
pub use metrics::metrics_handler;
