use std::{env, fs};

use reconview_server::config::loader::load_config;

#[test]
fn config_parsing_and_env_overrides_and_validation() {
    // Create a temporary TOML configuration file
    let dir = tempfile::tempdir().expect("tmp dir");
    let path = dir.path().join("reconview.toml");

    let toml_content = r#"
[server]
host = "127.0.0.1"
port = 8081

[upstream]
endpoint = "http://reconciler.internal:8000/reconcile"
timeout_ms = 2500

[page]
title = "Vendor Invoices"

[logging]
level = "debug"
"#;
    fs::write(&path, toml_content).expect("write toml");

    // 1) Valid config parses
    let cfg = load_config(path.to_str()).expect("should parse config");
    assert_eq!(cfg.server.port, 8081);
    assert_eq!(cfg.upstream.endpoint, "http://reconciler.internal:8000/reconcile");
    assert_eq!(cfg.upstream.timeout_ms, 2500);
    assert_eq!(cfg.page.title, "Vendor Invoices");
    assert_eq!(cfg.logging.level.to_ascii_lowercase(), "debug");

    // 2) Env override should win over file
    unsafe {
        env::set_var("RECONVIEW__UPSTREAM__TIMEOUT_MS", "900");
    }
    let cfg_env = load_config(path.to_str()).expect("should parse config with env overrides");
    assert_eq!(cfg_env.upstream.timeout_ms, 900);
    // cleanup env var
    unsafe {
        env::remove_var("RECONVIEW__UPSTREAM__TIMEOUT_MS");
    }

    // 3) Invalid endpoint scheme should error
    let invalid_path = dir.path().join("invalid.toml");
    let invalid_toml = r#"
[upstream]
endpoint = "file:///etc/passwd"
"#;
    fs::write(&invalid_path, invalid_toml).expect("write invalid toml");
    let err = load_config(invalid_path.to_str()).expect_err("expected validation error");
    assert!(err.contains("http or https"));
}

#[test]
fn missing_config_file_uses_defaults() {
    let dir = tempfile::tempdir().expect("tmp dir");
    let path = dir.path().join("does-not-exist.toml");

    let cfg = load_config(path.to_str()).expect("defaults should load");
    assert_eq!(cfg.upstream.endpoint, "http://localhost:8000/reconcile");
    assert_eq!(cfg.server.port, 8080);
    assert_eq!(cfg.page.title, "Invoice Reconciliation Results");
}

#[test]
fn host_name_is_rejected_instead_of_binding_everywhere() {
    let dir = tempfile::tempdir().expect("tmp dir");
    let path = dir.path().join("reconview.toml");
    fs::write(&path, "[server]\nhost = \"localhost\"\n").expect("write toml");

    let err = load_config(path.to_str()).expect_err("expected validation error");
    assert!(err.contains("server.host must be an IP address"), "{err}");
}
