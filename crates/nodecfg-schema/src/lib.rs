//! nodecfg Schema
//!
//! The current node configuration schema and the reference configurations
//! each network starts from.
//!
//! - [`NodeConfig`]: typed configuration at [`CURRENT_VERSION`]
//! - [`NetworkType`]: deployment network, with alias resolution
//! - [`DefaultsProvider`] / [`BuiltinDefaults`]: per-network reference values

#![warn(unreachable_pub)]
#![allow(missing_docs)]

mod config;
mod defaults;
mod network;

pub use config::{
    BlsConfig, DnsSyncConfig, GeneralConfig, HttpConfig, LogConfig, NetworkConfig, NodeConfig,
    P2pConfig, PprofConfig, PrometheusConfig, RpcOptConfig, SyncConfig, TxPoolConfig, WsConfig,
};
pub use defaults::{
    BuiltinDefaults, DefaultsProvider, CURRENT_VERSION, DEFAULT_DNS_PORT, SYNCING_PORT_DIFFERENCE,
};
pub use network::NetworkType;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
