// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Response shape of the system snapshot query
//!
//! Mirrors the NDM status tree. Every field defaults when absent, so a
//! firmware that reports only part of the tree still decodes. Objects keyed
//! by firmware-specific names (interfaces, ports, disks, probed hosts) are
//! kept as maps.

use serde::Deserialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SystemSnapshot {
    pub whoami: Whoami,
    pub show: SnapshotShow,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Whoami {
    pub user: String,
    pub agent: String,
    pub host: String,
    pub mac: String,
    #[serde(rename = "where")]
    pub location: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SnapshotShow {
    pub version: Version,
    pub system: SystemStatus,
    pub media: BTreeMap<String, Media>,
    pub interface: BTreeMap<String, InterfaceStatus>,
    pub ip: IpStatus,
    pub acme: AcmeStatus,
    pub cifs: CifsStatus,
    pub dlna: DlnaStatus,
    pub torrent: TorrentStatus,
    pub ndns: NdnsStatus,
    pub internet: InternetStatus,
    pub ping_check: PingCheckStatus,
    pub clock: ClockStatus,
    pub usb: UsbStatus,
}

// ── Version / system ─────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Version {
    pub release: String,
    pub sandbox: String,
    pub title: String,
    pub arch: String,
    pub ndm: BuildStamp,
    pub bsp: BuildStamp,
    pub ndw: NdwVersion,
    pub manufacturer: String,
    pub vendor: String,
    pub series: String,
    pub model: String,
    pub hw_version: String,
    pub hw_id: String,
    pub device: String,
    pub region: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BuildStamp {
    pub exact: String,
    pub cdate: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NdwVersion {
    pub version: String,
    pub features: String,
    pub components: String,
}

/// Load and memory figures; memory values are in kilobytes
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SystemStatus {
    pub hostname: String,
    pub domainname: String,
    pub cpuload: i64,
    pub memory: String,
    pub swap: String,
    pub memtotal: i64,
    pub memfree: i64,
    pub membuffers: i64,
    pub memcache: i64,
    pub swaptotal: i64,
    pub swapfree: i64,
    /// Seconds since boot, reported as a decimal string
    pub uptime: String,
}

// ── Storage ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Media {
    pub usb: MediaUsb,
    pub state: String,
    pub manufacturer: String,
    pub product: String,
    pub serial: String,
    pub size: String,
    pub partition: Vec<Partition>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MediaUsb {
    pub port: i64,
    pub version: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Partition {
    pub uuid: String,
    pub label: String,
    pub fstype: String,
    pub state: String,
    pub total: String,
    pub free: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UsbStatus {
    pub device: BTreeMap<String, UsbDevice>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct UsbDevice {
    #[serde(rename = "DEVICE")]
    pub device: String,
    #[serde(rename = "DEVPATH")]
    pub devpath: String,
    pub manufacturer: String,
    pub product: String,
    pub serial: String,
    pub subsystem: String,
    pub port: String,
    pub power_control: String,
    pub usb_version: String,
}

// ── Interfaces ───────────────────────────────────────────────────────

/// Status of one interface of any kind (ethernet, Wi-Fi, bridge, tunnel)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct InterfaceStatus {
    pub id: String,
    pub index: i64,
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    pub interface_name: String,
    pub link: String,
    pub connected: String,
    pub state: String,
    pub role: Vec<String>,
    pub mtu: i64,
    pub tx_queue_length: i64,
    pub address: String,
    pub mask: String,
    pub uptime: i64,
    pub global: bool,
    pub defaultgw: bool,
    pub priority: i64,
    pub security_level: String,
    pub mac: String,
    pub auth_type: String,
    pub encryption: String,
    pub ssid: String,
    pub group: String,
    pub usedby: Vec<String>,
    pub via: String,
    pub ap: String,
    pub hwstate: String,
    pub bitrate: i64,
    pub channel: i64,
    pub temperature: i64,
    pub speed: String,
    pub duplex: String,
    pub port: Option<PortSet>,
    pub bridge: Option<Bridge>,
    pub wireguard: Option<WireguardStatus>,
}

/// Switch ports behind an interface
///
/// Multi-port interfaces report a map keyed by port number, single-port
/// uplinks report the port object itself.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PortSet {
    Many(BTreeMap<String, PortStatus>),
    Single(PortStatus),
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct PortStatus {
    pub id: String,
    pub index: i64,
    pub interface_name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub link: String,
    pub role: Vec<PortRole>,
    pub speed: String,
    pub duplex: String,
    pub auto_negotiation: String,
    pub flow_control: String,
    pub eee: String,
    pub last_change: String,
    pub last_overflow: String,
    pub public: bool,
    pub transceiver: String,
    pub sfp_combo: bool,
    pub link_group: LinkGroup,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PortRole {
    #[serde(rename = "for")]
    pub target: String,
    pub role: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LinkGroup {
    pub supported: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Bridge {
    pub interface: Vec<BridgeMember>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BridgeMember {
    pub link: bool,
    pub inherited: String,
    pub interface: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct WireguardStatus {
    pub public_key: String,
    pub listen_port: i64,
    pub status: String,
    pub peer: Vec<WireguardPeer>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct WireguardPeer {
    pub public_key: String,
    pub local: String,
    pub local_port: i64,
    pub via: String,
    pub remote: String,
    pub remote_port: i64,
    pub rxbytes: i64,
    pub txbytes: i64,
    pub last_handshake: i64,
    pub online: bool,
}

// ── IP: name servers and clients ─────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct IpStatus {
    pub name_server: NameServerList,
    pub hotspot: HostList,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NameServerList {
    pub server: Vec<NameServer>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NameServer {
    pub address: String,
    pub port: String,
    pub domain: String,
    pub global: i64,
    pub service: String,
    pub interface: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct HostList {
    pub host: Vec<Host>,
}

/// A known client; Wi-Fi fields are zero for wired hosts
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Host {
    pub mac: String,
    pub via: String,
    pub ip: String,
    pub hostname: String,
    pub name: String,
    pub interface: HostInterface,
    pub registered: bool,
    pub access: String,
    pub schedule: String,
    pub active: bool,
    pub rxbytes: i64,
    pub txbytes: i64,
    pub first_seen: i64,
    pub last_seen: i64,
    pub link: String,
    pub ssid: String,
    pub ap: String,
    pub authenticated: bool,
    pub txrate: i64,
    pub uptime: i64,
    pub ht: i64,
    pub mode: String,
    pub gi: i64,
    pub rssi: i64,
    pub mcs: i64,
    pub txss: i64,
    pub ebf: bool,
    pub dl_mu: bool,
    pub security: String,
    pub traffic_shape: TrafficShape,
    pub roam: String,
    pub dhcp: DhcpLease,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct HostInterface {
    pub id: String,
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TrafficShape {
    pub rx: i64,
    pub tx: i64,
    pub mode: String,
    pub schedule: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DhcpLease {
    pub expires: i64,
}

// ── Services ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct AcmeStatus {
    pub server_enabled: bool,
    pub real_time: bool,
    pub ndns_domain: String,
    pub ndns_domain_acme: bool,
    pub ndns_domain_error: bool,
    pub default_domain: String,
    pub account_pending: bool,
    pub account_running: bool,
    pub get_pending: bool,
    pub get_running: bool,
    pub revoke_pending: bool,
    pub revoke_running: bool,
    pub reissue_queue_size: i64,
    pub revoke_queue_size: i64,
    pub retries: i64,
    pub checker_timer: i64,
    pub apply_timer: i64,
    pub acme_account: String,
    pub next_try_ta: i64,
    pub jitter: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct CifsStatus {
    pub enabled: bool,
    pub automount: bool,
    pub permissive: bool,
    pub map_hidden: bool,
    pub share: Vec<CifsShare>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CifsShare {
    pub mount: String,
    pub label: String,
    pub timemachine: bool,
    pub description: String,
    pub active: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DlnaStatus {
    pub running: bool,
    pub directory: BTreeMap<String, DlnaDirectory>,
    pub db: DlnaDirectory,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct DlnaDirectory {
    pub name: String,
    pub media_type: String,
    pub mounted: bool,
    pub found: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TorrentStatus {
    pub status: TorrentState,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct TorrentState {
    pub state: String,
    pub rpc_port: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NdnsStatus {
    pub name: String,
    pub booked: String,
    pub domain: String,
    pub address: String,
    pub address6: String,
    pub updated: bool,
    pub access: String,
    pub access6: String,
    pub xns: String,
    pub ttp: NdnsTtp,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NdnsTtp {
    pub direct: bool,
    pub interface: String,
    pub address: String,
}

// ── Connectivity checks ──────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct InternetStatus {
    pub status: InternetCheck,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct InternetCheck {
    pub checked: String,
    pub enabled: bool,
    pub reliable: bool,
    pub gateway_accessible: bool,
    pub dns_accessible: bool,
    pub host_accessible: bool,
    pub captive_accessible: bool,
    pub internet: bool,
    pub gateway: GatewayCheck,
    pub captive: CaptiveCheck,
    pub hosts: BTreeMap<String, HostCheck>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GatewayCheck {
    pub interface: String,
    pub address: String,
    pub failures: i64,
    pub accessible: bool,
    pub excluded: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CaptiveCheck {
    pub response: String,
    pub location: String,
    pub failures: i64,
    pub resolved: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct HostCheck {
    pub failures: i64,
    pub resolved: bool,
    pub accessible: bool,
    pub response: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PingCheckStatus {
    pub pingcheck: Vec<PingCheckProfile>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PingCheckProfile {
    pub profile: String,
    pub interface: BTreeMap<String, PingCheckResult>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PingCheckResult {
    pub successcount: i64,
    pub failcount: i64,
    pub status: String,
    pub ipcache: Vec<IpCacheEntry>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct IpCacheEntry {
    pub host: String,
    pub addresses: Vec<String>,
}

// ── Clock ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ClockStatus {
    pub date: ClockDate,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ClockDate {
    pub weekday: i64,
    pub day: i64,
    pub month: i64,
    pub year: i64,
    pub hour: i64,
    pub min: i64,
    pub sec: i64,
    pub msec: i64,
    pub dst: String,
    pub tz: Vec<TimeZone>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TimeZone {
    pub locality: String,
    pub stdoffset: i64,
    pub dstoffset: i64,
    pub usesdst: bool,
    pub rule: String,
    pub custom: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_decodes_to_defaults() {
        let snapshot: SystemSnapshot = serde_json::from_str("{}").unwrap();
        assert_eq!(snapshot.show.system.cpuload, 0);
        assert!(snapshot.show.system.uptime.is_empty());
        assert!(snapshot.show.interface.is_empty());
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let json = r#"{"show":{"system":{"cpuload":7,"firmware-extra":{"x":1}},"brand-new":[]}}"#;
        let snapshot: SystemSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.show.system.cpuload, 7);
    }

    #[test]
    fn test_interfaces_keyed_by_name() {
        let json = r#"{"show":{"interface":{
            "GigabitEthernet0": {"id":"GigabitEthernet0","type":"GigabitEthernet",
                "port":{"1":{"id":"GigabitEthernet0/0","link":"up","role":[{"for":"ISP","role":"inet"}]},
                        "2":{"id":"GigabitEthernet0/1","link":"down"}}},
            "ISP": {"id":"ISP","type":"Vlan","connected":"yes","uptime":3600,
                "port":{"id":"GigabitEthernet1","transceiver":"SFP","sfp-combo":true}},
            "OpenVPN0": {"id":"OpenVPN0","role":["misc"],"defaultgw":false},
            "Home": {"id":"Bridge0","bridge":{"interface":[{"link":true,"interface":"AccessPoint"}]}}
        }}}"#;
        let snapshot: SystemSnapshot = serde_json::from_str(json).unwrap();
        let interfaces = &snapshot.show.interface;
        assert_eq!(interfaces.len(), 4);

        match &interfaces["GigabitEthernet0"].port {
            Some(PortSet::Many(ports)) => {
                assert_eq!(ports.len(), 2);
                assert_eq!(ports["1"].role[0].target, "ISP");
                assert_eq!(ports["2"].link, "down");
            }
            other => panic!("expected port map, got {other:?}"),
        }
        match &interfaces["ISP"].port {
            Some(PortSet::Single(port)) => {
                assert_eq!(port.transceiver, "SFP");
                assert!(port.sfp_combo);
            }
            other => panic!("expected single port, got {other:?}"),
        }
        assert_eq!(interfaces["ISP"].uptime, 3600);
        assert_eq!(interfaces["OpenVPN0"].role, vec!["misc".to_string()]);
        let bridge = interfaces["Home"].bridge.as_ref().unwrap();
        assert!(bridge.interface[0].link);
    }

    #[test]
    fn test_wireless_hosts() {
        let json = r#"{"show":{"ip":{"hotspot":{"host":[
            {"mac":"aa:bb:cc:dd:ee:ff","name":"phone","rssi":-55,"ssid":"home","dl-mu":true},
            {"mac":"11:22:33:44:55:66","hostname":"nas","rxbytes":10}
        ]}}}}"#;
        let snapshot: SystemSnapshot = serde_json::from_str(json).unwrap();
        let hosts = &snapshot.show.ip.hotspot.host;
        assert_eq!(hosts.len(), 2);
        assert_eq!(hosts[0].rssi, -55);
        assert!(hosts[0].dl_mu);
        assert_eq!(hosts[1].rssi, 0);
        assert_eq!(hosts[1].hostname, "nas");
    }

    #[test]
    fn test_service_sections() {
        let json = r#"{"show":{
            "version":{"release":"3.7.4","model":"Giga","hw_id":"KN-1010","ndm":{"exact":"3.7.4-0"}},
            "internet":{"status":{"internet":true,"hosts":{"google.com":{"accessible":true}}}},
            "ping-check":{"pingcheck":[{"profile":"default","interface":{"ISP":{"successcount":5,"status":"pass"}}}]},
            "dlna":{"running":true,"directory":{"uuid:/download":{"media-type":"video","mounted":true}}},
            "torrent":{"status":{"state":"running","rpc-port":8090}},
            "usb":{"device":{"Media0":{"DEVICE":"sda","usb-version":"3.0"}}}
        },"whoami":{"user":"admin","where":"lan"}}"#;
        let snapshot: SystemSnapshot = serde_json::from_str(json).unwrap();
        let show = &snapshot.show;
        assert_eq!(show.version.hw_id, "KN-1010");
        assert_eq!(show.version.ndm.exact, "3.7.4-0");
        assert!(show.internet.status.internet);
        assert!(show.internet.status.hosts["google.com"].accessible);
        assert_eq!(show.ping_check.pingcheck[0].interface["ISP"].successcount, 5);
        assert!(show.dlna.directory["uuid:/download"].mounted);
        assert_eq!(show.torrent.status.rpc_port, 8090);
        assert_eq!(show.usb.device["Media0"].usb_version, "3.0");
        assert_eq!(snapshot.whoami.location, "lan");
    }
}
