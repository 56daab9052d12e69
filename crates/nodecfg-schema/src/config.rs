//! Typed node configuration at the current schema version
//!
//! Field names follow the on-disk TOML keys. Sections present since the
//! legacy baseline are required; sections and fields introduced later carry
//! serde defaults so a migrated legacy file decodes cleanly.

use serde::{Deserialize, Serialize};

/// Root of the node configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeConfig {
    /// Schema version the file is written against
    #[serde(rename = "Version")]
    pub version: String,

    /// Node role and storage
    #[serde(rename = "General")]
    pub general: GeneralConfig,

    /// Network membership
    #[serde(rename = "Network")]
    pub network: NetworkConfig,

    /// Peer-to-peer listener
    #[serde(rename = "P2P")]
    pub p2p: P2pConfig,

    /// HTTP RPC endpoint
    #[serde(rename = "HTTP")]
    pub http: HttpConfig,

    /// Websocket RPC endpoint
    #[serde(rename = "WS", default)]
    pub ws: WsConfig,

    /// RPC rate limiting
    #[serde(rename = "RPCOpt")]
    pub rpc_opt: RpcOptConfig,

    /// Validator key material
    #[serde(rename = "BLSKeys")]
    pub bls_keys: BlsConfig,

    /// Transaction pool
    #[serde(rename = "TxPool", default)]
    pub tx_pool: TxPoolConfig,

    /// Profiler endpoint
    #[serde(rename = "Pprof", default)]
    pub pprof: PprofConfig,

    /// Log output
    #[serde(rename = "Log")]
    pub log: LogConfig,

    /// Stream sync
    #[serde(rename = "Sync")]
    pub sync: SyncConfig,

    /// DNS-based sync
    #[serde(rename = "DNSSync")]
    pub dns_sync: DnsSyncConfig,

    /// Metrics exporter, absent when the network has none
    #[serde(rename = "Prometheus", default, skip_serializing_if = "Option::is_none")]
    pub prometheus: Option<PrometheusConfig>,
}

/// Node role and storage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneralConfig {
    #[serde(rename = "NodeType")]
    pub node_type: String,
    #[serde(rename = "NoStaking")]
    pub no_staking: bool,
    #[serde(rename = "ShardID")]
    pub shard_id: i32,
    #[serde(rename = "IsArchival")]
    pub is_archival: bool,
    #[serde(rename = "DataDir")]
    pub data_dir: String,
}

/// Network membership
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Name parsed by [`crate::NetworkType::parse`]
    #[serde(rename = "NetworkType")]
    pub network_type: String,
    #[serde(rename = "BootNodes", default)]
    pub boot_nodes: Vec<String>,
}

/// Peer-to-peer listener
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct P2pConfig {
    #[serde(rename = "Port")]
    pub port: u16,
    #[serde(rename = "IP")]
    pub ip: String,
    #[serde(rename = "KeyFile")]
    pub key_file: String,
}

/// HTTP RPC endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpConfig {
    #[serde(rename = "Enabled")]
    pub enabled: bool,
    #[serde(rename = "IP")]
    pub ip: String,
    #[serde(rename = "Port")]
    pub port: u16,
    #[serde(rename = "RosettaEnabled", default)]
    pub rosetta_enabled: bool,
    #[serde(rename = "RosettaPort")]
    pub rosetta_port: u16,
}

/// Websocket RPC endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WsConfig {
    #[serde(rename = "Enabled")]
    pub enabled: bool,
    #[serde(rename = "IP")]
    pub ip: String,
    #[serde(rename = "Port")]
    pub port: u16,
}

impl Default for WsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            ip: "127.0.0.1".to_string(),
            port: 9800,
        }
    }
}

/// RPC rate limiting
///
/// The `RateLimterEnabled` key keeps the spelling used by released files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RpcOptConfig {
    #[serde(rename = "DebugEnabled", default)]
    pub debug_enabled: bool,
    #[serde(rename = "RateLimterEnabled")]
    pub rate_limiter_enabled: bool,
    #[serde(rename = "RequestsPerSecond")]
    pub requests_per_second: u32,
}

/// Validator key material
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlsConfig {
    #[serde(rename = "KeyDir")]
    pub key_dir: String,
    #[serde(rename = "KeyFiles", default)]
    pub key_files: Vec<String>,
    #[serde(rename = "MaxKeys")]
    pub max_keys: i32,
    #[serde(rename = "PassEnabled")]
    pub pass_enabled: bool,
    #[serde(rename = "PassSrcType")]
    pub pass_src_type: String,
    #[serde(rename = "PassFile", default)]
    pub pass_file: String,
    #[serde(rename = "SavePassphrase")]
    pub save_passphrase: bool,
    #[serde(rename = "KMSEnabled")]
    pub kms_enabled: bool,
    #[serde(rename = "KMSConfigSrcType")]
    pub kms_config_src_type: String,
    #[serde(rename = "KMSConfigFile", default)]
    pub kms_config_file: String,
}

/// Transaction pool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxPoolConfig {
    #[serde(rename = "BlacklistFile")]
    pub blacklist_file: String,
}

impl Default for TxPoolConfig {
    fn default() -> Self {
        Self {
            blacklist_file: "./.hmy/blacklist.txt".to_string(),
        }
    }
}

/// Profiler endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PprofConfig {
    #[serde(rename = "Enabled")]
    pub enabled: bool,
    #[serde(rename = "ListenAddr")]
    pub listen_addr: String,
}

impl Default for PprofConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            listen_addr: "127.0.0.1:6060".to_string(),
        }
    }
}

/// Log output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    #[serde(rename = "Folder")]
    pub folder: String,
    #[serde(rename = "FileName")]
    pub file_name: String,
    #[serde(rename = "RotateSize")]
    pub rotate_size: i32,
    #[serde(rename = "Verbosity")]
    pub verbosity: i32,
}

/// Stream sync tuning
///
/// Missing keys decode as zero, so a partial legacy `Sync` table still loads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Run the stream sync protocol
    #[serde(rename = "Enabled")]
    pub enabled: bool,
    /// Run the block downloader
    #[serde(rename = "Downloader")]
    pub downloader: bool,
    #[serde(rename = "Concurrency")]
    pub concurrency: u32,
    #[serde(rename = "MinPeers")]
    pub min_peers: u32,
    #[serde(rename = "InitStreams")]
    pub init_streams: u32,
    #[serde(rename = "DiscSoftLowCap")]
    pub disc_soft_low_cap: u32,
    #[serde(rename = "DiscHardLowCap")]
    pub disc_hard_low_cap: u32,
    #[serde(rename = "DiscHighCap")]
    pub disc_high_cap: u32,
    #[serde(rename = "DiscBatch")]
    pub disc_batch: u32,
}

/// DNS-based sync
///
/// Ports are signed: legacy files derive `Port` by subtracting a fixed
/// offset from the node port, which can go below zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnsSyncConfig {
    /// Port of the DNS sync peers
    #[serde(rename = "Port")]
    pub port: i64,
    /// DNS zone used for peer discovery
    #[serde(rename = "Zone", default)]
    pub zone: String,
    #[serde(rename = "LegacySyncing", default)]
    pub legacy_syncing: bool,
    /// Act as a DNS sync client
    #[serde(rename = "Client")]
    pub client: bool,
    /// Serve DNS sync requests
    #[serde(rename = "Server")]
    pub server: bool,
    #[serde(rename = "ServerPort")]
    pub server_port: i64,
}

/// Metrics exporter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrometheusConfig {
    #[serde(rename = "Enabled")]
    pub enabled: bool,
    #[serde(rename = "IP")]
    pub ip: String,
    #[serde(rename = "Port")]
    pub port: u16,
    #[serde(rename = "EnablePush")]
    pub enable_push: bool,
    #[serde(rename = "Gateway")]
    pub gateway: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BuiltinDefaults, DefaultsProvider, NetworkType};
    use pretty_assertions::assert_eq;

    #[test]
    fn default_config_survives_toml() {
        let config = BuiltinDefaults.node_config(&NetworkType::Testnet);
        let text = toml::to_string(&config).unwrap();
        let parsed: NodeConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn prometheus_omitted_when_none() {
        let config = BuiltinDefaults.node_config(&NetworkType::Localnet);
        assert!(config.prometheus.is_none());
        let text = toml::to_string(&config).unwrap();
        assert!(!text.contains("[Prometheus]"));
    }

    #[test]
    fn partial_sync_table_decodes() {
        let sync: SyncConfig = toml::from_str("Downloader = true").unwrap();
        assert!(sync.downloader);
        assert!(!sync.enabled);
        assert_eq!(sync.concurrency, 0);
    }

    #[test]
    fn rate_limiter_key_spelling() {
        let text = toml::to_string(&RpcOptConfig {
            debug_enabled: false,
            rate_limiter_enabled: true,
            requests_per_second: 1000,
        })
        .unwrap();
        assert!(text.contains("RateLimterEnabled = true"));
    }
}
