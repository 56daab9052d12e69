//! Upgrade from the legacy baseline (`1.0.4`) to `2.0.0`
//!
//! 2.0.0 splits DNS-based sync settings out of `Network` and `Sync` into a
//! dedicated `DNSSync` table, introduces stream sync, and adds sections
//! older files never carried. Missing sections are backfilled from the
//! network's reference configuration.

use std::sync::Arc;

use nodecfg_document::{Document, Lookup};
use nodecfg_schema::{
    DefaultsProvider, DnsSyncConfig, NetworkType, NodeConfig, DEFAULT_DNS_PORT,
    SYNCING_PORT_DIFFERENCE,
};
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::MigrationError;
use crate::step::MigrationStep;
use crate::version::LEGACY_BASELINE_VERSION;

/// Version stamped by [`V2UpgradeStep`]
pub const V2_VERSION: &str = "2.0.0";

/// Baseline-to-2.0.0 field transformer
#[derive(Debug, Clone)]
pub struct V2UpgradeStep {
    defaults: Arc<dyn DefaultsProvider>,
}

impl V2UpgradeStep {
    /// Create with the provider backfill values are read from
    #[must_use]
    pub fn new(defaults: Arc<dyn DefaultsProvider>) -> Self {
        Self { defaults }
    }
}

impl MigrationStep for V2UpgradeStep {
    fn source_version(&self) -> &str {
        LEGACY_BASELINE_VERSION
    }

    fn target_version(&self) -> &str {
        V2_VERSION
    }

    fn apply(&self, mut document: Document) -> Result<Document, MigrationError> {
        let network = match document.lookup_str("Network.NetworkType") {
            Lookup::Present(name) => NetworkType::parse(name),
            Lookup::Absent => {
                return Err(MigrationError::InvalidField {
                    path: "Network.NetworkType",
                    expected: "string",
                    found: None,
                })
            }
            Lookup::Mismatched { found } => {
                return Err(MigrationError::InvalidField {
                    path: "Network.NetworkType",
                    expected: "string",
                    found: Some(found),
                })
            }
        };
        let defaults = self.defaults.node_config(&network);

        backfill_missing(&mut document, &defaults)?;
        split_dns_sync(&mut document, &defaults.dns_sync);
        enable_stream_sync(&mut document);

        document.set_version(V2_VERSION);
        Ok(document)
    }
}

/// Sections and keys older files lack entirely
///
/// Anything already stored at these paths is kept, whatever its type.
fn backfill_missing(document: &mut Document, defaults: &NodeConfig) -> Result<(), MigrationError> {
    backfill(document, "Sync", &defaults.sync)?;
    backfill(document, "HTTP.RosettaPort", &defaults.http.rosetta_port)?;
    backfill(document, "RPCOpt.RateLimterEnabled", &defaults.rpc_opt.rate_limiter_enabled)?;
    backfill(document, "RPCOpt.RequestsPerSecond", &defaults.rpc_opt.requests_per_second)?;
    backfill(document, "P2P.IP", &defaults.p2p.ip)?;

    if let Some(prometheus) = &defaults.prometheus {
        backfill(document, "Prometheus", prometheus)?;
    }
    Ok(())
}

fn backfill<T: Serialize>(document: &mut Document, path: &str, value: &T) -> Result<(), MigrationError> {
    if document.contains(path) {
        return Ok(());
    }
    debug!("Backfilling {} from defaults", path);
    document
        .set_serialized(path, value)
        .map_err(MigrationError::Encode)
}

/// Move DNS sync settings into the `DNSSync` table
fn split_dns_sync(document: &mut Document, defaults: &DnsSyncConfig) {
    match document.lookup_str("Network.DNSZone").map(str::to_owned) {
        Lookup::Present(zone) => document.set("DNSSync.Zone", zone),
        Lookup::Mismatched { found } => mismatched("Network.DNSZone", "string", found),
        Lookup::Absent => {}
    }

    // Legacy files store the node's listening port; DNS sync peers listen
    // a fixed offset below it.
    let port = match document.lookup_int("Network.DNSPort") {
        Lookup::Present(port) => port.saturating_sub(SYNCING_PORT_DIFFERENCE),
        Lookup::Mismatched { found } => {
            mismatched("Network.DNSPort", "integer", found);
            DEFAULT_DNS_PORT
        }
        Lookup::Absent => DEFAULT_DNS_PORT,
    };
    document.set("DNSSync.Port", port);

    match document.lookup_bool("Network.LegacySyncing") {
        Lookup::Present(syncing) => document.set("DNSSync.LegacySyncing", syncing),
        Lookup::Mismatched { found } => mismatched("Network.LegacySyncing", "boolean", found),
        Lookup::Absent => {}
    }

    let client = match document.lookup_bool("Sync.LegacyClient") {
        Lookup::Present(client) => client,
        Lookup::Mismatched { found } => {
            mismatched("Sync.LegacyClient", "boolean", found);
            defaults.client
        }
        Lookup::Absent => defaults.client,
    };
    document.set("DNSSync.Client", client);

    // Falls back to the client flag, not the server flag. Released nodes
    // behave this way, so it is kept until the server default is settled.
    let server = match document.lookup_bool("Sync.LegacyServer") {
        Lookup::Present(server) => server,
        Lookup::Mismatched { found } => {
            mismatched("Sync.LegacyServer", "boolean", found);
            defaults.client
        }
        Lookup::Absent => defaults.client,
    };
    document.set("DNSSync.Server", server);

    let server_port = match document.lookup_int("Sync.LegacyServerPort") {
        Lookup::Present(port) => port,
        Lookup::Mismatched { found } => {
            mismatched("Sync.LegacyServerPort", "integer", found);
            defaults.server_port
        }
        Lookup::Absent => defaults.server_port,
    };
    document.set("DNSSync.ServerPort", server_port);
}

/// Nodes that ran the downloader switch to the stream sync protocol
fn enable_stream_sync(document: &mut Document) {
    match document.lookup_bool("Sync.Downloader") {
        Lookup::Present(true) => document.set("Sync.Enabled", true),
        Lookup::Present(false) | Lookup::Absent => {}
        Lookup::Mismatched { found } => mismatched("Sync.Downloader", "boolean", found),
    }
}

fn mismatched(path: &str, expected: &str, found: &str) {
    warn!("Ignoring {}: expected {}, found {}", path, expected, found);
}
