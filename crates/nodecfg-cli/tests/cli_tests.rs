use std::fs;

use nodecfg_cli::{cli, run};
use nodecfg_document::{Document, Lookup};
use nodecfg_test_utils::{legacy_config, LegacyConfig};
use pretty_assertions::assert_eq;

fn run_args(args: &[&str]) -> anyhow::Result<String> {
    let matches = cli::command().try_get_matches_from(args)?;
    run(&matches)
}

#[test]
fn test_migrate_output_then_check_is_up_to_date() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("legacy.toml");
    let output = dir.path().join("current.toml");
    fs::write(&input, legacy_config("testnet")).unwrap();

    let printed = run_args(&[
        "nodecfg",
        "migrate",
        input.to_str().unwrap(),
        "--output",
        output.to_str().unwrap(),
    ])
    .unwrap();
    assert_eq!(printed, "");

    let report = run_args(&["nodecfg", "check", output.to_str().unwrap(), "--json"]).unwrap();
    let report: serde_json::Value = serde_json::from_str(&report).unwrap();
    assert_eq!(report["up_to_date"], true);
    assert_eq!(report["target_version"], "2.0.0");
    assert_eq!(report["upgradable_versions"][0], "1.0.4");

    // the input is never rewritten
    let original: Document = fs::read_to_string(&input).unwrap().parse().unwrap();
    assert_eq!(original.version(), Lookup::Present("1.0.4"));
}

#[test]
fn test_get_reads_migrated_values() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("node.toml");
    let legacy = LegacyConfig::released("localnet")
        .with_dns_port(3000)
        .with_downloader(true)
        .to_toml();
    fs::write(&input, legacy).unwrap();
    let path = input.to_str().unwrap();

    assert_eq!(run_args(&["nodecfg", "get", path, "DNSSync.Port"]).unwrap(), "0");
    assert_eq!(run_args(&["nodecfg", "get", path, "Sync.Enabled"]).unwrap(), "true");
    assert_eq!(run_args(&["nodecfg", "get", path, "Version"]).unwrap(), "2.0.0");
}

#[test]
fn test_invalid_file_fails_with_context() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("broken.toml");
    fs::write(&input, "[Network\nNetworkType = ").unwrap();

    let err = run_args(&["nodecfg", "check", input.to_str().unwrap()]).unwrap_err();
    let message = format!("{err:#}");
    assert!(message.contains("config file parse error"), "{message}");
}

#[test]
fn test_dump_default_accepts_aliases() {
    let text = run_args(&["nodecfg", "dump-default", "-n", "stk"]).unwrap();
    let doc: Document = text.parse().unwrap();
    assert_eq!(doc.lookup_str("Network.NetworkType"), Lookup::Present("pangaea"));
}
