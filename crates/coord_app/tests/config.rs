use std::fs;
use std::sync::Once;
use std::time::Duration;

use coord_app::platform::{AppConfig, ConfigError};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(coord_logging::initialize_for_tests);
}

#[test]
fn missing_file_gives_defaults() {
    init_logging();
    let dir = tempfile::tempdir().expect("tempdir");
    let mut config = AppConfig::load_or_default(Some(dir.path().join("absent.ron").as_path()));
    // The environment may carry an override; compare everything else.
    config.convert_path = AppConfig::default().convert_path;
    assert_eq!(config, AppConfig::default());
}

#[test]
fn partial_file_keeps_other_defaults() {
    init_logging();
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("coord.ron");
    fs::write(&path, "(base_url: \"http://geo.internal:9000\", url_debounce_ms: 100)").expect("write");

    let config = AppConfig::from_ron(&path).expect("config");
    assert_eq!(config.base_url, "http://geo.internal:9000");
    assert_eq!(config.url_debounce_ms, 100);
    assert_eq!(config.conversion_debounce_ms, 350);
    assert_eq!(config.query_param, "location");

    let settings = config.pipeline_settings();
    assert_eq!(settings.url_debounce, Duration::from_millis(100));
    assert_eq!(settings.conversion_debounce, Duration::from_millis(350));
}

#[test]
fn broken_file_is_a_parse_error() {
    init_logging();
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("coord.ron");
    fs::write(&path, "(base_url: ").expect("write");

    assert!(matches!(
        AppConfig::from_ron(&path),
        Err(ConfigError::Parse { .. })
    ));
    let mut config = AppConfig::load_or_default(Some(path.as_path()));
    config.convert_path = AppConfig::default().convert_path;
    assert_eq!(config, AppConfig::default());
}

#[test]
fn saved_config_loads_back() {
    init_logging();
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("coord.ron");
    let config = AppConfig {
        convert_path: "/v2/convert".to_string(),
        request_timeout_ms: 2_000,
        ..AppConfig::default()
    };
    fs::write(&path, config.to_ron().expect("ron")).expect("write");

    assert_eq!(AppConfig::from_ron(&path).expect("config"), config);
}

#[test]
fn env_override_replaces_convert_path_unless_blank() {
    let mut config = AppConfig::default();
    config.apply_env_override(Some("  ".to_string()));
    assert_eq!(config.convert_path, "/api/map");
    config.apply_env_override(Some("/geo/api/map".to_string()));
    assert_eq!(config.convert_path, "/geo/api/map");
    assert_eq!(config.client_settings().convert_path, "/geo/api/map");
}

#[test]
fn client_settings_carry_timeouts_and_limits() {
    let config = AppConfig {
        request_timeout_ms: 1_500,
        max_body_bytes: 4096,
        ..AppConfig::default()
    };
    let settings = config.client_settings();
    assert_eq!(settings.request_timeout, Duration::from_millis(1_500));
    assert_eq!(settings.max_bytes, 4096);
    assert_eq!(settings.query_param, "location");
}
