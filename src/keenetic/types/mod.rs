// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Decoded response shapes of the RCI queries

mod snapshot;
mod traffic;

pub use snapshot::*;
pub use traffic::{
    AttributeSeries, DataPoint, DeviceBar, InterfaceCounters, InterfaceStatList, TrafficChart,
    TrafficHotspot, TrafficIp, TrafficShow, TrafficStat,
};
