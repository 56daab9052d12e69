//! Testing utilities for nodecfg workspace
//!
//! Shared fixtures: legacy configuration files and current-version configs.

#![allow(missing_docs)]

use nodecfg_document::{Document, Value};
use nodecfg_schema::{NetworkType, NodeConfig};

/// Builder for a legacy (`1.0.4`-era) configuration file
///
/// Every field the baseline schema requires is always written; the optional
/// legacy keys are only written when set.
#[derive(Debug, Clone)]
pub struct LegacyConfig {
    pub version: String,
    pub network: String,
    pub dns_zone: Option<String>,
    pub dns_port: Option<i64>,
    pub legacy_syncing: Option<bool>,
    pub downloader: Option<bool>,
    pub legacy_client: Option<bool>,
    pub legacy_server: Option<bool>,
    pub legacy_server_port: Option<i64>,
}

impl LegacyConfig {
    pub fn new(network: &str) -> Self {
        Self {
            version: "1.0.4".to_string(),
            network: network.to_string(),
            dns_zone: None,
            dns_port: None,
            legacy_syncing: None,
            downloader: None,
            legacy_client: None,
            legacy_server: None,
            legacy_server_port: None,
        }
    }

    /// Shape of a file written by a released 1.0.4 node
    pub fn released(network: &str) -> Self {
        Self::new(network)
            .with_dns_zone("t.hmny.io")
            .with_dns_port(9000)
            .with_legacy_syncing(false)
    }

    pub fn with_version(mut self, version: &str) -> Self {
        self.version = version.to_string();
        self
    }

    pub fn with_dns_zone(mut self, zone: &str) -> Self {
        self.dns_zone = Some(zone.to_string());
        self
    }

    pub fn with_dns_port(mut self, port: i64) -> Self {
        self.dns_port = Some(port);
        self
    }

    pub fn with_legacy_syncing(mut self, enabled: bool) -> Self {
        self.legacy_syncing = Some(enabled);
        self
    }

    pub fn with_downloader(mut self, enabled: bool) -> Self {
        self.downloader = Some(enabled);
        self
    }

    pub fn with_legacy_client(mut self, enabled: bool) -> Self {
        self.legacy_client = Some(enabled);
        self
    }

    pub fn with_legacy_server(mut self, enabled: bool) -> Self {
        self.legacy_server = Some(enabled);
        self
    }

    pub fn with_legacy_server_port(mut self, port: i64) -> Self {
        self.legacy_server_port = Some(port);
        self
    }

    pub fn to_document(&self) -> Document {
        let mut doc = Document::default();
        doc.set_version(self.version.as_str());

        doc.set("General.NodeType", "validator");
        doc.set("General.NoStaking", false);
        doc.set("General.ShardID", -1);
        doc.set("General.IsArchival", false);
        doc.set("General.DataDir", "./");

        doc.set("Network.NetworkType", self.network.as_str());
        doc.set(
            "Network.BootNodes",
            Value::Array(vec![Value::from("/dnsaddr/bootnode-0.t.hmny.io")]),
        );
        if let Some(zone) = &self.dns_zone {
            doc.set("Network.DNSZone", zone.as_str());
        }
        if let Some(port) = self.dns_port {
            doc.set("Network.DNSPort", port);
        }
        if let Some(syncing) = self.legacy_syncing {
            doc.set("Network.LegacySyncing", syncing);
        }

        doc.set("P2P.Port", 9000);
        doc.set("P2P.KeyFile", "./.hmykey");

        doc.set("HTTP.Enabled", true);
        doc.set("HTTP.IP", "127.0.0.1");
        doc.set("HTTP.Port", 9500);

        doc.set("BLSKeys.KeyDir", "./.hmy/blskeys");
        doc.set("BLSKeys.KeyFiles", Value::Array(Vec::new()));
        doc.set("BLSKeys.MaxKeys", 10);
        doc.set("BLSKeys.PassEnabled", true);
        doc.set("BLSKeys.PassSrcType", "auto");
        doc.set("BLSKeys.PassFile", "");
        doc.set("BLSKeys.SavePassphrase", false);
        doc.set("BLSKeys.KMSEnabled", false);
        doc.set("BLSKeys.KMSConfigSrcType", "shared");
        doc.set("BLSKeys.KMSConfigFile", "");

        doc.set("Log.Folder", "./latest");
        doc.set("Log.FileName", "validator.log");
        doc.set("Log.RotateSize", 100);
        doc.set("Log.Verbosity", 3);

        if let Some(downloader) = self.downloader {
            doc.set("Sync.Downloader", downloader);
        }
        if let Some(client) = self.legacy_client {
            doc.set("Sync.LegacyClient", client);
        }
        if let Some(server) = self.legacy_server {
            doc.set("Sync.LegacyServer", server);
        }
        if let Some(port) = self.legacy_server_port {
            doc.set("Sync.LegacyServerPort", port);
        }
        doc
    }

    pub fn to_toml(&self) -> String {
        self.to_document().to_string()
    }
}

/// Legacy file as a released node on `network` wrote it
pub fn legacy_config(network: &str) -> String {
    LegacyConfig::released(network).to_toml()
}

/// Current-version file for `network`
pub fn current_config(network: &NetworkType) -> String {
    toml::to_string(&NodeConfig::default_for(network)).unwrap()
}

