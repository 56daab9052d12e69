use std::sync::Arc;

use nodecfg_document::{Document, Lookup};
use nodecfg_migrate::{
    parse_version, ConfigMigrator, FnStep, MigrationChain, MigrationError, MigrationRegistry,
    VersionResolver, LEGACY_BASELINE_VERSION, TARGET_VERSION,
};
use nodecfg_schema::{BuiltinDefaults, DefaultsProvider, NetworkType, NodeConfig, DEFAULT_DNS_PORT};
use nodecfg_test_utils::{current_config, legacy_config, LegacyConfig};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn migrator() -> ConfigMigrator {
    ConfigMigrator::with_defaults(Arc::new(BuiltinDefaults)).unwrap()
}

#[test]
fn test_released_legacy_file_upgrades() {
    let migrated = migrator()
        .migrate_bytes(legacy_config("mainnet").as_bytes())
        .unwrap();

    assert!(migrated.was_migrated());
    assert_eq!(migrated.migrated_from, "1.0.4");
    assert_eq!(migrated.config.version, TARGET_VERSION);
    assert_eq!(migrated.config.dns_sync.zone, "t.hmny.io");
    assert_eq!(migrated.config.dns_sync.port, 6000);
    assert_eq!(migrated.config.http.rosetta_port, 9700);
    assert_eq!(migrated.config.p2p.ip, "0.0.0.0");
    assert!(migrated.config.rpc_opt.rate_limiter_enabled);
    assert_eq!(
        migrated.config.sync,
        BuiltinDefaults.sync_config(&NetworkType::Mainnet)
    );
}

#[test]
fn test_current_file_bypasses_migration() {
    let text = current_config(&NetworkType::Testnet);
    let migrated = migrator().migrate_bytes(text.as_bytes()).unwrap();

    assert!(!migrated.was_migrated());
    assert_eq!(migrated.config, NodeConfig::default_for(&NetworkType::Testnet));
    assert_eq!(migrated.document, text.parse::<Document>().unwrap());
}

#[test]
fn test_pre_baseline_version_clamps() {
    let text = LegacyConfig::released("testnet").with_version("1.0.0").to_toml();
    let migrated = migrator().migrate_bytes(text.as_bytes()).unwrap();

    assert_eq!(migrated.migrated_from, "1.0.0");
    assert_eq!(migrated.steps.len(), 1);
    assert_eq!(migrated.steps[0].from, "1.0.4");
    assert_eq!(migrated.config.version, TARGET_VERSION);
}

#[test]
fn test_unknown_future_version_fails() {
    let text = LegacyConfig::released("mainnet").with_version("9.9.9").to_toml();
    let err = migrator().migrate_bytes(text.as_bytes()).unwrap_err();
    assert!(matches!(err, MigrationError::UnrecognizedVersion { ref version } if version == "9.9.9"));
}

#[test]
fn test_missing_version_fails() {
    let mut doc = LegacyConfig::released("mainnet").to_document();
    doc.remove("Version");
    let err = migrator().migrate_document(doc).unwrap_err();
    assert!(matches!(err, MigrationError::MissingVersion { found: None }));
}

#[test]
fn test_dns_port_at_offset_becomes_zero() {
    let text = LegacyConfig::released("mainnet").with_dns_port(3000).to_toml();
    let migrated = migrator().migrate_bytes(text.as_bytes()).unwrap();
    assert_eq!(migrated.config.dns_sync.port, 0);
}

#[test]
fn test_out_of_range_legacy_ports_still_decode() {
    let text = LegacyConfig::released("mainnet").with_dns_port(2999).to_toml();
    let migrated = migrator().migrate_bytes(text.as_bytes()).unwrap();
    assert_eq!(migrated.config.dns_sync.port, -1);

    let text = LegacyConfig::released("mainnet")
        .with_dns_port(0)
        .with_legacy_server_port(70_000)
        .to_toml();
    let migrated = migrator().migrate_bytes(text.as_bytes()).unwrap();
    assert_eq!(migrated.config.dns_sync.port, -3000);
    assert_eq!(migrated.config.dns_sync.server_port, 70_000);
}

#[test]
fn test_missing_dns_port_uses_default() {
    let text = LegacyConfig::new("mainnet").to_toml();
    let migrated = migrator().migrate_bytes(text.as_bytes()).unwrap();
    assert_eq!(migrated.config.dns_sync.port, DEFAULT_DNS_PORT);
    assert_eq!(migrated.config.dns_sync.zone, "");
}

#[test]
fn test_downloader_drives_stream_sync() {
    let on = LegacyConfig::released("mainnet").with_downloader(true).to_toml();
    let migrated = migrator().migrate_bytes(on.as_bytes()).unwrap();
    assert!(migrated.config.sync.enabled);
    assert!(migrated.config.sync.downloader);

    // a partial Sync table is kept as-is, missing keys decode as zero
    let off = LegacyConfig::released("mainnet").with_downloader(false).to_toml();
    let migrated = migrator().migrate_bytes(off.as_bytes()).unwrap();
    assert!(!migrated.config.sync.enabled);
    assert_eq!(migrated.config.sync.concurrency, 0);
}

#[test]
fn test_legacy_server_falls_back_to_client_default() {
    let defaults = BuiltinDefaults.dns_sync_config(&NetworkType::Pangaea);
    assert_ne!(defaults.client, defaults.server);

    let text = LegacyConfig::released("pangaea").to_toml();
    let migrated = migrator().migrate_bytes(text.as_bytes()).unwrap();
    assert_eq!(migrated.config.dns_sync.server, defaults.client);
    assert_eq!(migrated.config.dns_sync.client, defaults.client);

    let text = LegacyConfig::released("pangaea")
        .with_legacy_server(true)
        .with_legacy_client(true)
        .with_legacy_server_port(6100)
        .to_toml();
    let migrated = migrator().migrate_bytes(text.as_bytes()).unwrap();
    assert!(migrated.config.dns_sync.server);
    assert!(migrated.config.dns_sync.client);
    assert_eq!(migrated.config.dns_sync.server_port, 6100);
}

#[test]
fn test_unmodelled_keys_survive_in_document() {
    let mut doc = LegacyConfig::released("mainnet").to_document();
    doc.set("Custom.Note", "kept");
    let migrated = migrator().migrate_document(doc).unwrap();
    assert_eq!(migrated.document.lookup_str("Custom.Note"), Lookup::Present("kept"));
    assert_eq!(migrated.document.lookup_str("Network.DNSZone"), Lookup::Present("t.hmny.io"));
}

#[test]
fn test_chain_continues_past_builtin_step() {
    fn to_2_1(mut doc: Document) -> Result<Document, MigrationError> {
        doc.set("Extra.Added", true);
        doc.set_version("2.1.0");
        Ok(doc)
    }

    let registry = MigrationRegistry::builder()
        .register(nodecfg_migrate::V2UpgradeStep::new(Arc::new(BuiltinDefaults)))
        .register(FnStep::new("2.0.0", "2.1.0", to_2_1))
        .build()
        .unwrap();
    let migrator = ConfigMigrator::new(MigrationChain::new(registry))
        .with_target("2.1")
        .unwrap();

    let migrated = migrator
        .migrate_bytes(legacy_config("testnet").as_bytes())
        .unwrap();
    assert_eq!(migrated.steps.len(), 2);
    assert_eq!(migrated.config.version, "2.1.0");
    assert_eq!(migrated.document.lookup_bool("Extra.Added"), Lookup::Present(true));
}

fn network_name() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        Just("mainnet"),
        Just("testnet"),
        Just("pangaea"),
        Just("partner"),
        Just("stressnet"),
        Just("devnet"),
        Just("localnet"),
        Just("stk"),
    ]
}

proptest! {
    #[test]
    fn prop_legacy_documents_reach_current_schema(
        network in network_name(),
        version in prop_oneof![Just("1.0.4"), Just("1.0.0"), Just("1.0"), Just("0.9.1")],
        dns_port in proptest::option::of(-100_000i64..=1_000_000),
        zone in proptest::option::of("[a-z]{1,8}\\.hmny\\.io"),
        legacy_syncing in proptest::option::of(any::<bool>()),
        downloader in proptest::option::of(any::<bool>()),
        legacy_client in proptest::option::of(any::<bool>()),
        legacy_server in proptest::option::of(any::<bool>()),
        legacy_server_port in proptest::option::of(-100_000i64..=10_000_000),
    ) {
        let fixture = LegacyConfig {
            dns_zone: zone,
            dns_port,
            legacy_syncing,
            downloader,
            legacy_client,
            legacy_server,
            legacy_server_port,
            ..LegacyConfig::new(network).with_version(version)
        };

        let migrated = migrator().migrate_bytes(fixture.to_toml().as_bytes());
        prop_assert!(migrated.is_ok(), "{:?}", migrated.as_ref().err());
        let migrated = migrated.unwrap();
        let defaults = BuiltinDefaults.node_config(&NetworkType::parse(network));

        prop_assert_eq!(&migrated.config.version, TARGET_VERSION);
        prop_assert_eq!(migrated.steps.len(), 1);
        prop_assert_eq!(
            migrated.config.dns_sync.port,
            dns_port.map_or(DEFAULT_DNS_PORT, |port| port - 3000)
        );
        prop_assert_eq!(
            migrated.config.dns_sync.server_port,
            legacy_server_port.unwrap_or(defaults.dns_sync.server_port)
        );
        prop_assert_eq!(
            migrated.config.dns_sync.server,
            legacy_server.unwrap_or(defaults.dns_sync.client)
        );
        if downloader == Some(true) {
            prop_assert!(migrated.config.sync.enabled);
        }
        prop_assert_eq!(migrated.config.prometheus.is_some(), defaults.prometheus.is_some());
    }

    #[test]
    fn prop_resolved_keys_never_predate_baseline(
        major in 0u64..4,
        minor in 0u64..12,
        patch in proptest::option::of(0u64..12),
    ) {
        let declared = match patch {
            Some(patch) => format!("{major}.{minor}.{patch}"),
            None => format!("{major}.{minor}"),
        };
        let key = VersionResolver::legacy().resolve(&declared).unwrap();
        let key = parse_version(&key).unwrap();
        let declared = parse_version(&declared).unwrap();
        let baseline = parse_version(LEGACY_BASELINE_VERSION).unwrap();

        prop_assert!(key >= baseline);
        prop_assert_eq!(key == declared, declared >= baseline);
    }
}
