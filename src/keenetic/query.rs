// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! RCI queries: request bodies and their decoded responses

use serde::de::DeserializeOwned;
use serde_json::json;
use std::sync::OnceLock;

use crate::config::NamedEndpoint;
use crate::error::Result;

use super::types::{SystemSnapshot, TrafficStat};

/// One request/response pair against `POST /rci/`
pub trait Query: Send + Sync {
    type Response: DeserializeOwned + Send;

    /// Short name used in logs and poll metrics
    fn name(&self) -> &'static str;

    /// JSON request body
    fn request_body(&self) -> &str;

    /// Decodes the response body
    ///
    /// # Errors
    ///
    /// Returns a decode error if the body is not valid JSON of the expected shape.
    fn decode(&self, body: &[u8]) -> Result<Self::Response> {
        Ok(serde_json::from_slice(body)?)
    }
}

/// Fixed request covering the whole status tree
const SYSTEM_QUERY_BODY: &str = r#"{"show":{"clock":{"date":{}},"internet":{"status":{}},"version":{},"system":{},"interface":{},"ip":{"name-server":{},"hotspot":{"details":"wireless"}},"ndns":{},"acme":{},"ping-check":{},"cifs":{},"dlna":{},"torrent":{"status":{}},"usb":{},"media":{}},"whoami":{}}"#;

/// System snapshot: version, load, memory, interfaces, clients, services
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemQuery;

impl Query for SystemQuery {
    type Response = SystemSnapshot;

    fn name(&self) -> &'static str {
        "system"
    }

    fn request_body(&self) -> &str {
        SYSTEM_QUERY_BODY
    }
}

/// Per-interface counters and per-device traffic charts
///
/// The request names the configured interfaces and devices in order; the
/// response lists them in the same order without naming them, so names are
/// restored positionally after decoding.
#[derive(Debug, Default)]
pub struct TrafficQuery {
    interfaces: Vec<NamedEndpoint>,
    devices: Vec<NamedEndpoint>,
    body: OnceLock<String>,
}

impl TrafficQuery {
    pub fn new(interfaces: Vec<NamedEndpoint>, devices: Vec<NamedEndpoint>) -> Self {
        Self {
            interfaces,
            devices,
            body: OnceLock::new(),
        }
    }

    /// Display name of the `k`-th requested interface, empty if out of range
    pub fn interface_name(&self, k: usize) -> &str {
        self.interfaces.get(k).map_or("", |e| e.name.as_str())
    }

    /// Display name of the `k`-th requested device, empty if out of range
    pub fn device_name(&self, k: usize) -> &str {
        self.devices.get(k).map_or("", |e| e.name.as_str())
    }

    fn build_body(&self) -> String {
        let stat: Vec<_> = self
            .interfaces
            .iter()
            .map(|e| json!({ "name": e.code }))
            .collect();
        let items = self
            .devices
            .iter()
            .map(|e| e.code.as_str())
            .collect::<Vec<_>>()
            .join(",");

        json!({
            "show": {
                "interface": { "stat": stat },
                "ip": {
                    "hotspot": {
                        "chart": {
                            "items": items,
                            "detail": 0,
                            "attributes": "rxbytes,txbytes",
                        }
                    }
                }
            }
        })
        .to_string()
    }
}

impl Query for TrafficQuery {
    type Response = TrafficStat;

    fn name(&self) -> &'static str {
        "traffic"
    }

    fn request_body(&self) -> &str {
        self.body.get_or_init(|| self.build_body())
    }

    fn decode(&self, body: &[u8]) -> Result<TrafficStat> {
        let mut stat: TrafficStat = serde_json::from_slice(body)?;
        for (k, counters) in stat.show.interface.stat.iter_mut().enumerate() {
            counters.name = self.interface_name(k).to_string();
        }
        for (k, bar) in stat.show.ip.hotspot.chart.bar.iter_mut().enumerate() {
            bar.name = self.device_name(k).to_string();
        }
        Ok(stat)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn endpoints(pairs: &[(&str, &str)]) -> Vec<NamedEndpoint> {
        pairs
            .iter()
            .map(|(name, code)| NamedEndpoint::new(*name, *code))
            .collect()
    }

    #[test]
    fn test_system_body_is_valid_json() {
        let value: serde_json::Value = serde_json::from_str(SystemQuery.request_body()).unwrap();
        assert_eq!(value["show"]["ip"]["hotspot"]["details"], "wireless");
        assert!(value["whoami"].is_object());
    }

    #[test]
    fn test_traffic_body_is_memoized() {
        let query = TrafficQuery::new(endpoints(&[("wan", "ISP")]), Vec::new());
        let first = query.request_body().as_ptr();
        let second = query.request_body().as_ptr();
        assert_eq!(first, second);
    }

    #[test]
    fn test_traffic_body_escapes_codes() {
        let query = TrafficQuery::new(endpoints(&[("odd", "a\"b")]), Vec::new());
        let value: serde_json::Value = serde_json::from_str(query.request_body()).unwrap();
        assert_eq!(value["show"]["interface"]["stat"][0]["name"], "a\"b");
    }

    #[test]
    fn test_traffic_body_without_endpoints() {
        let query = TrafficQuery::new(Vec::new(), Vec::new());
        let value: serde_json::Value = serde_json::from_str(query.request_body()).unwrap();
        assert_eq!(value["show"]["interface"]["stat"], json!([]));
        assert_eq!(value["show"]["ip"]["hotspot"]["chart"]["items"], "");
    }

    #[test]
    fn test_out_of_range_names_are_empty() {
        let query = TrafficQuery::new(endpoints(&[("wan", "ISP")]), Vec::new());
        assert_eq!(query.interface_name(0), "wan");
        assert_eq!(query.interface_name(1), "");
        assert_eq!(query.device_name(0), "");
    }

    #[test]
    fn test_malformed_body_is_decode_error() {
        let result = SystemQuery.decode(b"<html>login</html>");
        assert!(matches!(result, Err(crate::AppError::Decode(_))));
    }
}
