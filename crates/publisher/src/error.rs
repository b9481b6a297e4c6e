//! 발행 에러 타입
//!
//! [`PublisherError`]는 브로커 연결, 메시지 전송, 발행 설정에서 발생하는 에러를 나타냅니다.
//! 재시도하지 않으며 호출자는 실행을 중단합니다.

/// 리포트 발행 에러
#[derive(Debug, thiserror::Error)]
pub enum PublisherError {
    /// 브로커 연결 실패 (메타데이터 조회 포함)
    #[error("failed to connect to kafka brokers [{brokers}]: {reason}")]
    Connect {
        /// 쉼표로 연결한 브로커 목록
        brokers: String,
        /// 실패 사유
        reason: String,
    },

    /// 메시지 전송 실패
    #[error("failed to send report to kafka topic '{topic}': {reason}")]
    Send {
        /// 대상 토픽
        topic: String,
        /// 실패 사유
        reason: String,
    },

    /// 발행 설정 에러
    #[error("publisher config error: {field}: {reason}")]
    Config {
        /// 설정 필드명
        field: String,
        /// 에러 사유
        reason: String,
    },
}

impl From<scanpost_core::ConfigError> for PublisherError {
    fn from(err: scanpost_core::ConfigError) -> Self {
        match err {
            scanpost_core::ConfigError::InvalidValue { field, reason } => {
                Self::Config { field, reason }
            }
            other => Self::Config {
                field: "kafka".to_owned(),
                reason: other.to_string(),
            },
        }
    }
}
