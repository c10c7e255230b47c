// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Response shape of the interface/device traffic query

use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TrafficStat {
    pub show: TrafficShow,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TrafficShow {
    pub interface: InterfaceStatList,
    pub ip: TrafficIp,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct InterfaceStatList {
    pub stat: Vec<InterfaceCounters>,
}

/// Counters of one interface
///
/// The router answers without naming the interface; `name` is filled in from
/// the configured list after decoding.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct InterfaceCounters {
    #[serde(skip)]
    pub name: String,
    pub rxpackets: u64,
    pub rx_multicast_packets: u64,
    pub rx_broadcast_packets: u64,
    pub rxbytes: u64,
    pub rxerrors: u64,
    pub rxdropped: u64,
    pub txpackets: u64,
    pub tx_multicast_packets: u64,
    pub tx_broadcast_packets: u64,
    pub txbytes: u64,
    pub txerrors: u64,
    pub txdropped: u64,
    pub timestamp: String,
    pub last_overflow: String,
    pub rxspeed: u64,
    pub txspeed: u64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TrafficIp {
    pub hotspot: TrafficHotspot,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TrafficHotspot {
    pub chart: TrafficChart,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TrafficChart {
    pub bar: Vec<DeviceBar>,
}

/// Per-device traffic chart
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DeviceBar {
    #[serde(skip)]
    pub name: String,
    pub mac: String,
    pub bars: Vec<AttributeSeries>,
    pub multicast: bool,
    pub others: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AttributeSeries {
    pub attribute: String,
    pub data: Vec<DataPoint>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default)]
pub struct DataPoint {
    pub t: i64,
    pub v: i64,
}

impl AttributeSeries {
    /// Sum of all data points in the series
    pub fn total(&self) -> i64 {
        self.data.iter().map(|point| point.v).sum()
    }
}
