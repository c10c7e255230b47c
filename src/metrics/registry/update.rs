// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Metric extraction from decoded query responses
//!
//! Every sample is a gauge overwrite; nothing is accumulated across ticks.

use crate::config::NamedEndpoint;
use crate::keenetic::types::{Host, SystemSnapshot, TrafficStat};
use crate::metrics::labels::{
    DeviceLabels, InterfaceLabels, MemoryLabels, RX, SignalLabels, SystemInfoLabels, TX,
};
use crate::metrics::parsers::parse_uptime_seconds;

use super::MetricsRegistry;

impl MetricsRegistry {
    /// Update load, memory, uptime and client signal from a system snapshot
    ///
    /// `devices` names Wi-Fi clients by MAC; unmatched clients fall back to
    /// the name the router knows them by.
    pub async fn update_system(&self, snapshot: &SystemSnapshot, devices: &[NamedEndpoint]) {
        let system = &snapshot.show.system;

        self.cpu_load.set(system.cpuload);
        self.uptime_seconds.set(parse_uptime_seconds(&system.uptime));
        for (kind, value) in [
            ("total", system.memtotal),
            ("cache", system.memcache),
            ("free", system.memfree),
            ("buffers", system.membuffers),
        ] {
            self.mem_usage.get_or_create(&MemoryLabels::new(kind)).set(value);
        }
        for (kind, value) in [("total", system.swaptotal), ("free", system.swapfree)] {
            self.swap_usage.get_or_create(&MemoryLabels::new(kind)).set(value);
        }

        self.internet_available
            .set(i64::from(snapshot.show.internet.status.internet));

        for host in &snapshot.show.ip.hotspot.host {
            if host.rssi == 0 {
                continue;
            }
            let labels = SignalLabels {
                device: host_label(host, devices),
            };
            self.device_signal_rssi.get_or_create(&labels).set(host.rssi);
        }

        let info_labels = SystemInfoLabels {
            model: snapshot.show.version.model.clone(),
            release: snapshot.show.version.release.clone(),
            hostname: system.hostname.clone(),
        };
        let mut prev = self.prev_system_info.lock().await;
        if let Some(old) = prev.as_ref() {
            if *old != info_labels {
                self.system_info.get_or_create(old).set(0);
            }
        }
        self.system_info.get_or_create(&info_labels).set(1);
        *prev = Some(info_labels);
    }

    /// Update interface and per-device byte gauges from a traffic response
    ///
    /// Entries the router returned beyond the configured lists have no
    /// display name and are skipped; they would all share one empty label.
    pub fn update_traffic(&self, stat: &TrafficStat) {
        let unnamed = stat
            .show
            .interface
            .stat
            .iter()
            .filter(|c| c.name.is_empty())
            .count();
        if unnamed > 0 {
            tracing::debug!("Skipping {} unnamed interface stat entries", unnamed);
        }
        for counters in stat.show.interface.stat.iter().filter(|c| !c.name.is_empty()) {
            for (direction, bytes) in [(RX, counters.rxbytes), (TX, counters.txbytes)] {
                let labels = InterfaceLabels {
                    interface: counters.name.clone(),
                    direction: direction.to_string(),
                };
                self.interface_bytes
                    .get_or_create(&labels)
                    .set(clamp_to_i64(bytes));
            }
        }

        for bar in &stat.show.ip.hotspot.chart.bar {
            if bar.name.is_empty() {
                tracing::debug!("Skipping unnamed traffic chart for {}", bar.mac);
                continue;
            }
            for series in &bar.bars {
                let Some(direction) = attribute_direction(&series.attribute) else {
                    tracing::trace!(
                        "Ignoring chart attribute '{}' for device '{}'",
                        series.attribute,
                        bar.name
                    );
                    continue;
                };
                let labels = DeviceLabels {
                    device: bar.name.clone(),
                    direction: direction.to_string(),
                };
                self.device_traffic_bytes
                    .get_or_create(&labels)
                    .set(series.total());
            }
        }
    }
}

fn attribute_direction(attribute: &str) -> Option<&'static str> {
    match attribute {
        "rxbytes" => Some(RX),
        "txbytes" => Some(TX),
        _ => None,
    }
}

fn host_label(host: &Host, devices: &[NamedEndpoint]) -> String {
    if let Some(device) = devices
        .iter()
        .find(|d| d.code.eq_ignore_ascii_case(&host.mac))
    {
        return device.name.clone();
    }
    [&host.name, &host.hostname, &host.mac]
        .into_iter()
        .find(|s| !s.is_empty())
        .cloned()
        .unwrap_or_default()
}

fn clamp_to_i64(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn host(mac: &str, name: &str, hostname: &str) -> Host {
        Host {
            mac: mac.to_string(),
            name: name.to_string(),
            hostname: hostname.to_string(),
            rssi: -60,
            ..Host::default()
        }
    }

    #[test]
    fn test_host_label_prefers_configured_name() {
        let devices = vec![NamedEndpoint::new("phone", "AA:BB:CC:DD:EE:FF")];
        assert_eq!(
            host_label(&host("aa:bb:cc:dd:ee:ff", "router-name", ""), &devices),
            "phone"
        );
    }

    #[test]
    fn test_host_label_fallbacks() {
        assert_eq!(host_label(&host("11:22", "tv", "tv-host"), &[]), "tv");
        assert_eq!(host_label(&host("11:22", "", "tv-host"), &[]), "tv-host");
        assert_eq!(host_label(&host("11:22", "", ""), &[]), "11:22");
    }

    #[test]
    fn test_attribute_direction() {
        assert_eq!(attribute_direction("rxbytes"), Some(RX));
        assert_eq!(attribute_direction("txbytes"), Some(TX));
        assert_eq!(attribute_direction("rxpackets"), None);
    }
}
