// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Unit tests for metrics extraction from decoded responses

#[cfg(test)]
mod test {
    use crate::config::NamedEndpoint;
    use crate::keenetic::{Query, SystemQuery, TrafficQuery};
    use crate::metrics::MetricsRegistry;

    #[tokio::test]
    async fn test_extract_from_decoded_system_body() {
        let body = br#"{"show":{"system":{"cpuload":42,"memtotal":1000,"memfree":300,"membuffers":50,"memcache":150,"uptime":"86400"}}}"#;
        let snapshot = SystemQuery.decode(body).unwrap();

        let registry = MetricsRegistry::new();
        registry.update_system(&snapshot, &[]).await;
        let encoded = registry.encode_metrics().await.unwrap();

        assert!(encoded.contains("keenetic_cpu_load 42"));
        assert!(encoded.contains("keenetic_uptime_seconds 86400"));
        assert!(encoded.contains("keenetic_mem_usage{type=\"total\"} 1000"));
        assert!(encoded.contains("keenetic_mem_usage{type=\"free\"} 300"));
        assert!(encoded.contains("keenetic_mem_usage{type=\"buffers\"} 50"));
        assert!(encoded.contains("keenetic_mem_usage{type=\"cache\"} 150"));
    }

    #[tokio::test]
    async fn test_extract_malformed_uptime() {
        let body = br#"{"show":{"system":{"cpuload":1,"uptime":"abc"}}}"#;
        let snapshot = SystemQuery.decode(body).unwrap();

        let registry = MetricsRegistry::new();
        registry.update_system(&snapshot, &[]).await;
        let encoded = registry.encode_metrics().await.unwrap();

        assert!(encoded.contains("keenetic_uptime_seconds 0"));
    }

    #[tokio::test]
    async fn test_extract_from_decoded_traffic_body() {
        let query = TrafficQuery::new(
            vec![
                NamedEndpoint::new("wan", "ISP"),
                NamedEndpoint::new("lan", "Bridge0"),
            ],
            vec![NamedEndpoint::new("phone", "aa:bb:cc:dd:ee:ff")],
        );
        let body = br#"{"show":{
            "interface":{"stat":[{"rxbytes":100,"txbytes":200},{"rxbytes":300,"txbytes":400}]},
            "ip":{"hotspot":{"chart":{"bar":[{"mac":"aa:bb:cc:dd:ee:ff","bars":[
                {"attribute":"rxbytes","data":[{"t":1,"v":10},{"t":2,"v":15}]},
                {"attribute":"txbytes","data":[{"t":1,"v":7}]}
            ]}]}}}
        }}"#;
        let stat = query.decode(body).unwrap();

        let registry = MetricsRegistry::new();
        registry.update_traffic(&stat);
        let encoded = registry.encode_metrics().await.unwrap();

        assert!(encoded.contains("keenetic_interface_bytes{interface=\"wan\",direction=\"rx\"} 100"));
        assert!(encoded.contains("keenetic_interface_bytes{interface=\"lan\",direction=\"tx\"} 400"));
        assert!(
            encoded.contains("keenetic_device_traffic_bytes{device=\"phone\",direction=\"rx\"} 25")
        );
        assert!(
            encoded.contains("keenetic_device_traffic_bytes{device=\"phone\",direction=\"tx\"} 7")
        );
    }
}
