//! End-to-end tests for the `syncrag` binary
//!
//! Each test writes a config and catalog into a temporary directory and
//! runs the built binary against them.

use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

fn syncrag(config: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_syncrag"))
        .arg("--config")
        .arg(config)
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("run syncrag")
}

/// Sets up `<tmp>/root` with one of the two catalog files present
fn fixture() -> (TempDir, std::path::PathBuf) {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().join("root");
    std::fs::create_dir_all(root.join("papers")).unwrap();
    std::fs::write(root.join("papers/rag.pdf"), b"pdf").unwrap();
    std::fs::write(root.join("stray.txt"), b"?").unwrap();

    let catalog = tmp.path().join("catalog.yaml");
    std::fs::write(
        &catalog,
        "path: /kb\nchildren:\n  - path: /kb/papers\n    children:\n      - path: /kb/papers/rag.pdf\n      - path: /kb/papers/sync.pdf\n",
    )
    .unwrap();

    let config = tmp.path().join("config.yaml");
    std::fs::write(
        &config,
        format!(
            "sync:\n  root: {}\n  catalog: {}\nlogging:\n  level: warn\n",
            root.display(),
            catalog.display()
        ),
    )
    .unwrap();

    (tmp, config)
}

#[test]
fn test_status_json_reports_tree_and_untracked() {
    let (_tmp, config) = fixture();

    let output = syncrag(&config, &["--json", "status"]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["synchronized"], false);
    assert_eq!(json["provider"]["name"], "AnythingLLM");
    assert_eq!(json["summary"]["counts"]["synchronized"], 1);
    assert_eq!(json["summary"]["counts"]["not_synchronized"], 1);
    assert_eq!(json["untracked"], serde_json::json!(["stray.txt"]));
    assert_eq!(json["tree"]["status"], "synchronized_with_warning");
}

#[test]
fn test_status_human_output_lists_nodes() {
    let (_tmp, config) = fixture();

    let output = syncrag(&config, &["status"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("rag.pdf  [synchronized]"));
    assert!(stdout.contains("sync.pdf  [not_synchronized]"));
    assert!(stdout.contains("? stray.txt"));
}

#[test]
fn test_status_missing_catalog_fails() {
    let (tmp, config) = fixture();
    let missing = tmp.path().join("nope.yaml");

    let output = syncrag(&config, &["status", "--catalog", missing.to_str().unwrap()]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to load catalog"));
}

#[test]
fn test_providers_show_one() {
    let (_tmp, config) = fixture();

    let output = syncrag(&config, &["--json", "providers", "anythingllm"]);
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["name"], "AnythingLLM");
    assert_eq!(json["type"], "LLM & RAG proxy");
}

#[test]
fn test_config_validate_json() {
    let (_tmp, config) = fixture();

    let output = syncrag(&config, &["--json", "config", "validate"]);
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["valid"], true);
    assert_eq!(json["exists"], true);
}
