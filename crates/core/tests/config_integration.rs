//! scanpost.toml 통합 설정 테스트
//!
//! - scanpost.toml.example 파싱 테스트
//! - 파일 로딩 / 누락 파일 에러 테스트
//! - 환경변수 우선순위 테스트

use std::fs;

use serial_test::serial;
use tempfile::TempDir;

use scanpost_core::config::ScanpostConfig;
use scanpost_core::error::{ConfigError, ScanpostError};

// =============================================================================
// scanpost.toml.example 파싱 테스트
// =============================================================================

#[test]
fn example_config_parses_successfully() {
    let content = include_str!("../../../scanpost.toml.example");
    let config = ScanpostConfig::parse(content).expect("example config should parse");

    assert_eq!(config.general.log_level, "info");
    assert_eq!(config.general.log_format, "pretty");
    assert_eq!(config.kafka.brokers, vec!["localhost:9092"]);
    assert_eq!(config.kafka.topic, "trivy-reports");
    assert!(config.kafka.message_key.is_none());
    assert_eq!(config.kafka.client_id, "scanpost");
}

#[test]
fn example_config_passes_validation() {
    let content = include_str!("../../../scanpost.toml.example");
    let config = ScanpostConfig::parse(content).expect("should parse");
    config
        .validate()
        .expect("example config should pass validation");
}

// =============================================================================
// 파일 로딩 테스트
// =============================================================================

#[tokio::test]
async fn from_file_reads_partial_config() {
    let temp_dir = TempDir::new().expect("should create temp dir");
    let path = temp_dir.path().join("scanpost.toml");
    fs::write(&path, "[kafka]\ntopic = \"scans\"\n").expect("should write config");

    let config = ScanpostConfig::from_file(&path)
        .await
        .expect("partial config should load");

    assert_eq!(config.kafka.topic, "scans");
    assert!(config.kafka.brokers.is_empty(), "brokers left for CLI/env");
    assert_eq!(config.general.log_level, "info");
}

#[tokio::test]
async fn from_file_missing_file_is_file_not_found() {
    let result = ScanpostConfig::from_file("/nonexistent/scanpost.toml").await;
    assert!(matches!(
        result,
        Err(ScanpostError::Config(ConfigError::FileNotFound { .. }))
    ));
}

#[tokio::test]
async fn from_file_malformed_toml_is_parse_error() {
    let temp_dir = TempDir::new().expect("should create temp dir");
    let path = temp_dir.path().join("bad.toml");
    fs::write(&path, "[kafka\ntopic = \"x\"\n").expect("should write config");

    let result = ScanpostConfig::from_file(&path).await;
    assert!(matches!(
        result,
        Err(ScanpostError::Config(ConfigError::ParseFailed { .. }))
    ));
}

#[test]
fn wrong_field_type_is_parse_error() {
    let result = ScanpostConfig::parse("[kafka]\nbrokers = \"localhost:9092\"\n");
    assert!(result.is_err(), "brokers must be an array in TOML");
}

// =============================================================================
// 환경변수 우선순위 테스트
// =============================================================================

#[test]
#[serial]
fn env_overrides_file_values() {
    let mut config = ScanpostConfig::parse(
        r#"
[general]
log_level = "info"

[kafka]
brokers = ["file:9092"]
topic = "from-file"
"#,
    )
    .expect("should parse");

    unsafe {
        std::env::set_var("SCANPOST_KAFKA_TOPIC", "from-env");
        std::env::set_var("SCANPOST_KAFKA_BROKERS", "env-1:9092,env-2:9092");
        std::env::set_var("SCANPOST_KAFKA_MESSAGE_KEY", "trivy");
        std::env::set_var("SCANPOST_GENERAL_LOG_LEVEL", "debug");
    }
    config.apply_env_overrides();
    unsafe {
        std::env::remove_var("SCANPOST_KAFKA_TOPIC");
        std::env::remove_var("SCANPOST_KAFKA_BROKERS");
        std::env::remove_var("SCANPOST_KAFKA_MESSAGE_KEY");
        std::env::remove_var("SCANPOST_GENERAL_LOG_LEVEL");
    }

    assert_eq!(config.kafka.topic, "from-env");
    assert_eq!(config.kafka.brokers, vec!["env-1:9092", "env-2:9092"]);
    assert_eq!(config.kafka.message_key.as_deref(), Some("trivy"));
    assert_eq!(config.general.log_level, "debug");
    config.validate().expect("overridden config should be valid");
}

#[test]
#[serial]
fn unset_env_leaves_file_values() {
    let mut config =
        ScanpostConfig::parse("[kafka]\ntopic = \"from-file\"\n").expect("should parse");
    unsafe { std::env::remove_var("SCANPOST_KAFKA_TOPIC") };
    config.apply_env_overrides();
    assert_eq!(config.kafka.topic, "from-file");
}
