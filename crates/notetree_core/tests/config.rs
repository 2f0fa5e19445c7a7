use notetree_core::config::DEFAULT_REQUEST_TIMEOUT;
use notetree_core::{default_log_level, AppConfig, ConfigError};
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars = pairs
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect::<HashMap<_, _>>();
    move |key: &str| vars.get(key).cloned()
}

#[test]
fn empty_environment_yields_offline_defaults() {
    let config = AppConfig::from_lookup(lookup(&[])).unwrap();
    assert_eq!(config.api_base_url, None);
    assert_eq!(config.request_timeout, DEFAULT_REQUEST_TIMEOUT);
    assert_eq!(config.log_level, default_log_level());
    assert_eq!(config.log_dir, None);
    assert_eq!(config.db_path, None);
}

#[test]
fn all_variables_are_read_and_trimmed() {
    let config = AppConfig::from_lookup(lookup(&[
        ("NOTETREE_API_BASE_URL", " http://localhost:8080/ "),
        ("NOTETREE_TIMEOUT_SECS", "3"),
        ("NOTETREE_LOG_LEVEL", "WARNING"),
        ("NOTETREE_LOG_DIR", "/var/log/notetree"),
        ("NOTETREE_DB_PATH", "notes.db"),
    ]))
    .unwrap();

    assert_eq!(
        config.api_base_url.as_deref(),
        Some("http://localhost:8080/")
    );
    assert_eq!(config.request_timeout, Duration::from_secs(3));
    assert_eq!(config.log_level, "warn");
    assert_eq!(config.log_dir, Some(PathBuf::from("/var/log/notetree")));
    assert_eq!(config.db_path, Some(PathBuf::from("notes.db")));
}

#[test]
fn blank_values_count_as_unset() {
    let config = AppConfig::from_lookup(lookup(&[
        ("NOTETREE_API_BASE_URL", "   "),
        ("NOTETREE_TIMEOUT_SECS", ""),
    ]))
    .unwrap();
    assert_eq!(config.api_base_url, None);
    assert_eq!(config.request_timeout, DEFAULT_REQUEST_TIMEOUT);
}

#[test]
fn invalid_values_are_reported() {
    assert_eq!(
        AppConfig::from_lookup(lookup(&[("NOTETREE_TIMEOUT_SECS", "0")])).unwrap_err(),
        ConfigError::InvalidTimeout {
            value: "0".to_string()
        }
    );
    assert!(matches!(
        AppConfig::from_lookup(lookup(&[("NOTETREE_LOG_LEVEL", "loud")])).unwrap_err(),
        ConfigError::InvalidLogLevel(_)
    ));
    assert!(matches!(
        AppConfig::from_lookup(lookup(&[("NOTETREE_LOG_DIR", "logs")])).unwrap_err(),
        ConfigError::RelativeLogDir(_)
    ));
}
