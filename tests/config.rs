//! Server configuration defaults and overrides.

use knockout_bracket_web::ServerConfig;
use std::collections::HashMap;

fn config_from(pairs: &[(&str, &str)]) -> ServerConfig {
    let env: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    ServerConfig::from_lookup(|key| env.get(key).cloned())
}

#[test]
fn defaults_listen_on_all_interfaces() {
    let config = config_from(&[]);
    assert_eq!(config, ServerConfig::default());
    assert_eq!(config.host, "0.0.0.0");
    assert_eq!(config.port, 8080);
    assert_eq!(config.log_filter, "info");
}

#[test]
fn environment_overrides_defaults() {
    let config = config_from(&[("HOST", "127.0.0.1"), ("PORT", "9000"), ("RUST_LOG", "debug")]);
    assert_eq!(config.host, "127.0.0.1");
    assert_eq!(config.port, 9000);
    assert_eq!(config.log_filter, "debug");
    assert!(config.warnings.is_empty());
}

#[test]
fn invalid_port_falls_back() {
    let config = config_from(&[("PORT", "not-a-port"), ("HOST", "  ")]);
    assert_eq!(config.port, 8080);
    assert_eq!(config.host, "0.0.0.0");
    assert_eq!(config.warnings.len(), 1);
    assert!(config.warnings[0].contains("not-a-port"));
}
