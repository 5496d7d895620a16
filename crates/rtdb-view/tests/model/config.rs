//! ViewerConfig tests.

use std::time::Duration;

use rtdb_view::config::{DEFAULT_CONTINUOUS_THRESHOLD, DEFAULT_PAGE_SIZE};
use rtdb_view::{ViewError, ViewerConfig};

#[test]
fn defaults() {
    let config = ViewerConfig::default();

    assert_eq!(config.default_page_size, DEFAULT_PAGE_SIZE);
    assert_eq!(config.page_size(), 50);
    assert_eq!(config.continuous_threshold, DEFAULT_CONTINUOUS_THRESHOLD);
    assert!(config.optimistic_continuous);
    assert_eq!(config.reprobe_interval(), None);
}

#[test]
fn empty_json_is_default() {
    assert_eq!(ViewerConfig::from_json("{}").unwrap(), ViewerConfig::default());
}

#[test]
fn camel_case_fields() {
    let config = ViewerConfig::from_json(
        r#"{
            "defaultPageSize": 20,
            "continuousThreshold": 500,
            "optimisticContinuous": false,
            "reprobeIntervalMs": 30000
        }"#,
    )
    .unwrap();

    assert_eq!(config.page_size(), 20);
    assert_eq!(config.continuous_threshold, 500);
    assert!(!config.optimistic_continuous);
    assert_eq!(config.reprobe_interval(), Some(Duration::from_secs(30)));
}

#[test]
fn reprobe_interval_ms_field_name() {
    let config = ViewerConfig::from_json(r#"{ "reprobeIntervalMs": 250 }"#).unwrap();
    assert_eq!(config.reprobe_interval_ms, Some(250));
    assert_eq!(config.page_size(), DEFAULT_PAGE_SIZE.get());
}

#[test]
fn zero_page_size_is_rejected() {
    let err = ViewerConfig::from_json(r#"{ "defaultPageSize": 0 }"#).unwrap_err();
    assert!(matches!(err, ViewError::Config(_)));
}

#[test]
fn malformed_json_is_a_config_error() {
    let err = ViewerConfig::from_json("not json").unwrap_err();
    assert!(matches!(err, ViewError::Config(_)));
    assert!(err.to_string().starts_with("Invalid viewer configuration"));
}
