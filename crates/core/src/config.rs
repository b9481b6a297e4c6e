//! 설정 관리: scanpost.toml 파싱 및 런타임 설정
//!
//! [`ScanpostConfig`]는 로깅과 Kafka 발행 설정을 담는 최상위 구조체입니다.
//!
//! # 설정 로딩 우선순위
//! 1. CLI 인자 (최고 우선)
//! 2. 환경변수 (`SCANPOST_KAFKA_TOPIC=trivy-reports` 형식)
//! 3. 설정 파일 (`scanpost.toml`, 선택)
//! 4. 기본값 (`Default` 구현)
//!
//! # 사용 예시
//! ```no_run
//! # async fn example() -> Result<(), scanpost_core::error::ScanpostError> {
//! use scanpost_core::config::ScanpostConfig;
//!
//! let mut config = ScanpostConfig::from_file("scanpost.toml").await?;
//! config.apply_env_overrides();
//! config.validate()?;
//!
//! // TOML 문자열에서 직접 파싱
//! let config = ScanpostConfig::parse("[kafka]\ntopic = \"trivy\"")?;
//! # Ok(())
//! # }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ScanpostError};

/// Kafka 토픽 이름 최대 길이
const MAX_TOPIC_LEN: usize = 249;

/// Scanpost 통합 설정
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScanpostConfig {
    /// 일반 설정
    #[serde(default)]
    pub general: GeneralConfig,
    /// Kafka 발행 설정
    #[serde(default)]
    pub kafka: KafkaConfig,
}

impl ScanpostConfig {
    /// TOML 파일에서 설정을 읽습니다 (환경변수 오버라이드, 검증 없음).
    ///
    /// 필수 값이 CLI 인자로 나중에 채워질 수 있으므로 검증은 호출자가 합니다.
    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self, ScanpostError> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "loading configuration file");
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ScanpostError::Config(ConfigError::FileNotFound {
                    path: path.display().to_string(),
                })
            } else {
                ScanpostError::Io(e)
            }
        })?;
        Self::parse(&content)
    }

    /// TOML 문자열에서 설정을 파싱합니다.
    pub fn parse(toml_str: &str) -> Result<Self, ScanpostError> {
        toml::from_str(toml_str).map_err(|e| {
            ScanpostError::Config(ConfigError::ParseFailed {
                reason: e.to_string(),
            })
        })
    }

    /// 환경변수로 설정값을 오버라이드합니다.
    ///
    /// 환경변수 네이밍 규칙: `SCANPOST_{SECTION}_{FIELD}`
    /// 예: `SCANPOST_KAFKA_BROKERS=kafka-1:9092,kafka-2:9092`
    pub fn apply_env_overrides(&mut self) {
        // General
        override_string(&mut self.general.log_level, "SCANPOST_GENERAL_LOG_LEVEL");
        override_string(&mut self.general.log_format, "SCANPOST_GENERAL_LOG_FORMAT");

        // Kafka
        override_csv(&mut self.kafka.brokers, "SCANPOST_KAFKA_BROKERS");
        override_string(&mut self.kafka.topic, "SCANPOST_KAFKA_TOPIC");
        override_opt_string(&mut self.kafka.message_key, "SCANPOST_KAFKA_MESSAGE_KEY");
        override_string(&mut self.kafka.client_id, "SCANPOST_KAFKA_CLIENT_ID");
    }

    /// 설정값의 유효성을 검증합니다.
    pub fn validate(&self) -> Result<(), ScanpostError> {
        self.general.validate()?;
        self.kafka.validate()?;
        Ok(())
    }
}

/// 일반 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// 로그 레벨 (trace, debug, info, warn, error)
    pub log_level: String,
    /// 로그 형식 (json, pretty)
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_owned(),
            log_format: "pretty".to_owned(),
        }
    }
}

impl GeneralConfig {
    /// 로깅 설정을 검증합니다.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "general.log_level".to_owned(),
                reason: format!("must be one of: {}", valid_levels.join(", ")),
            });
        }

        let valid_formats = ["json", "pretty"];
        if !valid_formats.contains(&self.log_format.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "general.log_format".to_owned(),
                reason: format!("must be one of: {}", valid_formats.join(", ")),
            });
        }

        Ok(())
    }
}

/// Kafka 발행 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KafkaConfig {
    /// 브로커 주소 목록 (`host:port`)
    pub brokers: Vec<String>,
    /// 발행 대상 토픽
    pub topic: String,
    /// 메시지 키 (없으면 키 없이 발행)
    pub message_key: Option<String>,
    /// Kafka 클라이언트 ID
    pub client_id: String,
}

impl Default for KafkaConfig {
    fn default() -> Self {
        Self {
            brokers: Vec::new(),
            topic: String::new(),
            message_key: None,
            client_id: "scanpost".to_owned(),
        }
    }
}

impl KafkaConfig {
    /// Kafka 설정을 검증합니다.
    ///
    /// 토픽과 브로커는 필수이며, 설정 파일·환경변수·CLI 중 하나로 채워져야 합니다.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.topic.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "kafka.topic".to_owned(),
                reason: "topic is required".to_owned(),
            });
        }

        if self.topic.len() > MAX_TOPIC_LEN {
            return Err(ConfigError::InvalidValue {
                field: "kafka.topic".to_owned(),
                reason: format!("must be at most {MAX_TOPIC_LEN} characters"),
            });
        }

        if !self
            .topic
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
        {
            return Err(ConfigError::InvalidValue {
                field: "kafka.topic".to_owned(),
                reason: format!(
                    "'{}' contains characters outside [A-Za-z0-9._-]",
                    self.topic
                ),
            });
        }

        if self.brokers.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "kafka.brokers".to_owned(),
                reason: "brokers are required".to_owned(),
            });
        }

        if self.brokers.iter().any(|b| b.trim().is_empty()) {
            return Err(ConfigError::InvalidValue {
                field: "kafka.brokers".to_owned(),
                reason: "broker address must not be empty".to_owned(),
            });
        }

        if self.message_key.as_deref() == Some("") {
            return Err(ConfigError::InvalidValue {
                field: "kafka.message_key".to_owned(),
                reason: "must not be empty when set".to_owned(),
            });
        }

        if self.client_id.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "kafka.client_id".to_owned(),
                reason: "must not be empty".to_owned(),
            });
        }

        Ok(())
    }
}

/// 쉼표로 구분된 브로커 목록을 파싱합니다.
///
/// 각 항목의 앞뒤 공백을 제거하고 빈 항목은 버립니다.
pub fn parse_broker_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect()
}

// --- 환경변수 오버라이드 헬퍼 ---

fn override_string(target: &mut String, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        *target = val;
    }
}

fn override_opt_string(target: &mut Option<String>, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        *target = if val.is_empty() { None } else { Some(val) };
    }
}

fn override_csv(target: &mut Vec<String>, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        *target = parse_broker_list(&val);
    }
}
