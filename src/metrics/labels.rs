//! Label types for Prometheus metrics

use prometheus_client::encoding::EncodeLabelSet;

/// `direction` label value for received bytes
pub const RX: &str = "rx";
/// `direction` label value for transmitted bytes
pub const TX: &str = "tx";

#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelSet)]
pub struct MemoryLabels {
    pub r#type: String,
}

#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelSet)]
pub struct InterfaceLabels {
    pub interface: String,
    pub direction: String,
}

#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelSet)]
pub struct DeviceLabels {
    pub device: String,
    pub direction: String,
}

#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelSet)]
pub struct SignalLabels {
    pub device: String,
}

#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelSet)]
pub struct SystemInfoLabels {
    pub model: String,
    pub release: String,
    pub hostname: String,
}

#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelSet)]
pub struct QueryLabels {
    pub query: String,
}

impl MemoryLabels {
    pub fn new(kind: &str) -> Self {
        Self {
            r#type: kind.to_string(),
        }
    }
}

impl QueryLabels {
    pub fn new(query: &str) -> Self {
        Self {
            query: query.to_string(),
        }
    }
}
