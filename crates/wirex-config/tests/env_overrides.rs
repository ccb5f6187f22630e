// SPDX-License-Identifier: MIT OR Apache-2.0
//! Environment overrides for `wirex-config`.
//!
//! Env vars are process-global, so every test here runs serially.

use serial_test::serial;
use std::io::Write;
use wirex_config::{AppConfig, LogFormat, RemoteReadConfig, apply_env_overrides, load_config};

/// Sets WIREX_* vars and removes them again on drop.
struct EnvGuard {
    keys: Vec<&'static str>,
}

impl EnvGuard {
    fn new(pairs: &[(&'static str, &str)]) -> Self {
        let keys: Vec<&'static str> = pairs.iter().map(|(k, _)| *k).collect();
        for (k, v) in pairs {
            // SAFETY: tests in this file run serially.
            unsafe { std::env::set_var(k, v) };
        }
        Self { keys }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for k in &self.keys {
            // SAFETY: restoring env to previous state on drop.
            unsafe { std::env::remove_var(k) };
        }
    }
}

#[test]
#[serial]
fn overrides_replace_file_values() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "service_name = \"from-file\"\nlog_level = \"warn\"").unwrap();

    let _env = EnvGuard::new(&[
        ("WIREX_SERVICE_NAME", "from-env"),
        ("WIREX_LOG_FORMAT", "JSON"),
    ]);
    let cfg = load_config(Some(file.path())).unwrap();
    assert_eq!(cfg.service_name, "from-env");
    assert_eq!(cfg.log_level, "warn");
    assert_eq!(cfg.log_format, LogFormat::Json);
}

#[test]
#[serial]
fn unknown_log_format_is_ignored() {
    let _env = EnvGuard::new(&[("WIREX_LOG_FORMAT", "yaml")]);
    let mut cfg = AppConfig::default();
    apply_env_overrides(&mut cfg);
    assert_eq!(cfg.log_format, LogFormat::Text);
}

#[test]
#[serial]
fn remote_read_address_creates_section() {
    let _env = EnvGuard::new(&[("WIREX_REMOTE_READ_ADDRESS", "http://mimir:8080")]);
    let cfg = load_config(None).unwrap();
    assert_eq!(
        cfg.remote_read,
        Some(RemoteReadConfig::new("http://mimir:8080"))
    );
}

#[test]
#[serial]
fn remote_read_address_keeps_other_settings() {
    let _env = EnvGuard::new(&[("WIREX_REMOTE_READ_ADDRESS", "https://other")]);
    let mut cfg = AppConfig {
        remote_read: Some(RemoteReadConfig {
            timeout_secs: 3,
            ..RemoteReadConfig::new("http://first")
        }),
        ..Default::default()
    };
    apply_env_overrides(&mut cfg);
    let rr = cfg.remote_read.unwrap();
    assert_eq!(rr.address, "https://other");
    assert_eq!(rr.timeout_secs, 3);
}

#[test]
#[serial]
fn no_env_means_defaults() {
    let cfg = load_config(None).unwrap();
    assert_eq!(cfg, AppConfig::default());
}
