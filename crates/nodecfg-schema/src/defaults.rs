//! Reference configurations per network
//!
//! [`DefaultsProvider`] is the read-only source of backfill values for
//! migration and of fresh configurations for new nodes.

use crate::config::{
    BlsConfig, DnsSyncConfig, GeneralConfig, HttpConfig, LogConfig, NetworkConfig, NodeConfig,
    P2pConfig, PprofConfig, PrometheusConfig, RpcOptConfig, SyncConfig, TxPoolConfig, WsConfig,
};
use crate::network::NetworkType;

/// Current schema version
pub const CURRENT_VERSION: &str = "2.0.0";

/// Default DNS sync port
pub const DEFAULT_DNS_PORT: i64 = 6000;

/// Offset between a legacy node's listening port and its DNS sync port
pub const SYNCING_PORT_DIFFERENCE: i64 = 3000;

/// Source of fully populated reference configurations
pub trait DefaultsProvider: Send + Sync + std::fmt::Debug {
    /// Complete configuration for a network
    fn node_config(&self, network: &NetworkType) -> NodeConfig;

    /// Stream sync section for a network
    fn sync_config(&self, network: &NetworkType) -> SyncConfig {
        self.node_config(network).sync
    }

    /// DNS sync section for a network
    fn dns_sync_config(&self, network: &NetworkType) -> DnsSyncConfig {
        self.node_config(network).dns_sync
    }
}

/// Defaults shipped with the node
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinDefaults;

impl DefaultsProvider for BuiltinDefaults {
    fn node_config(&self, network: &NetworkType) -> NodeConfig {
        NodeConfig {
            version: CURRENT_VERSION.to_string(),
            general: GeneralConfig {
                node_type: "validator".to_string(),
                no_staking: false,
                shard_id: -1,
                is_archival: false,
                data_dir: "./".to_string(),
            },
            network: NetworkConfig {
                network_type: network.as_str().to_string(),
                boot_nodes: boot_nodes(network),
            },
            p2p: P2pConfig {
                port: 9000,
                ip: "0.0.0.0".to_string(),
                key_file: "./.hmykey".to_string(),
            },
            http: HttpConfig {
                enabled: true,
                ip: "127.0.0.1".to_string(),
                port: 9500,
                rosetta_enabled: false,
                rosetta_port: 9700,
            },
            ws: WsConfig::default(),
            rpc_opt: RpcOptConfig {
                debug_enabled: false,
                rate_limiter_enabled: true,
                requests_per_second: 1000,
            },
            bls_keys: BlsConfig {
                key_dir: "./.hmy/blskeys".to_string(),
                key_files: Vec::new(),
                max_keys: 10,
                pass_enabled: true,
                pass_src_type: "auto".to_string(),
                pass_file: String::new(),
                save_passphrase: false,
                kms_enabled: false,
                kms_config_src_type: "shared".to_string(),
                kms_config_file: String::new(),
            },
            tx_pool: TxPoolConfig::default(),
            pprof: PprofConfig::default(),
            log: LogConfig {
                folder: "./latest".to_string(),
                file_name: "node.log".to_string(),
                rotate_size: 100,
                verbosity: 3,
            },
            sync: sync_for(network),
            dns_sync: dns_sync_for(network),
            prometheus: prometheus_for(network),
        }
    }
}

fn boot_nodes(network: &NetworkType) -> Vec<String> {
    let hosts: &[&str] = match network {
        NetworkType::Mainnet => &["bootnode-0.t.hmny.io", "bootnode-1.t.hmny.io"],
        NetworkType::Testnet => &["bootnode-0.b.hmny.io"],
        NetworkType::Localnet | NetworkType::Custom(_) => &[],
        _ => &["bootnode-0.ps.hmny.io"],
    };
    hosts
        .iter()
        .map(|host| format!("/dnsaddr/{host}"))
        .collect()
}

fn sync_for(network: &NetworkType) -> SyncConfig {
    match network {
        NetworkType::Mainnet => SyncConfig {
            enabled: false,
            downloader: false,
            concurrency: 6,
            min_peers: 6,
            init_streams: 8,
            disc_soft_low_cap: 8,
            disc_hard_low_cap: 6,
            disc_high_cap: 128,
            disc_batch: 8,
        },
        NetworkType::Testnet => SyncConfig {
            enabled: true,
            downloader: true,
            concurrency: 4,
            min_peers: 4,
            init_streams: 4,
            disc_soft_low_cap: 4,
            disc_hard_low_cap: 4,
            disc_high_cap: 1024,
            disc_batch: 8,
        },
        NetworkType::Localnet => SyncConfig {
            enabled: true,
            downloader: false,
            concurrency: 4,
            min_peers: 0,
            init_streams: 0,
            disc_soft_low_cap: 0,
            disc_hard_low_cap: 0,
            disc_high_cap: 1024,
            disc_batch: 8,
        },
        _ => SyncConfig {
            enabled: true,
            downloader: true,
            concurrency: 2,
            min_peers: 2,
            init_streams: 2,
            disc_soft_low_cap: 2,
            disc_hard_low_cap: 2,
            disc_high_cap: 1024,
            disc_batch: 3,
        },
    }
}

fn dns_sync_for(network: &NetworkType) -> DnsSyncConfig {
    let (zone, client) = match network {
        NetworkType::Mainnet => ("t.hmny.io", true),
        NetworkType::Testnet => ("b.hmny.io", true),
        NetworkType::Localnet | NetworkType::Custom(_) => ("", false),
        _ => ("ps.hmny.io", false),
    };
    DnsSyncConfig {
        port: DEFAULT_DNS_PORT,
        zone: zone.to_string(),
        legacy_syncing: false,
        client,
        server: true,
        server_port: DEFAULT_DNS_PORT,
    }
}

fn prometheus_for(network: &NetworkType) -> Option<PrometheusConfig> {
    if matches!(network, NetworkType::Localnet) {
        return None;
    }
    Some(PrometheusConfig {
        enabled: true,
        ip: "0.0.0.0".to_string(),
        port: 9900,
        enable_push: false,
        gateway: "https://gateway.harmony.one".to_string(),
    })
}

impl NodeConfig {
    /// Fresh configuration for a network from the builtin defaults
    #[must_use]
    pub fn default_for(network: &NetworkType) -> Self {
        BuiltinDefaults.node_config(network)
    }
}
