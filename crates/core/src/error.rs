//! 에러 타입: 도메인별 에러 정의

/// Scanpost 최상위 에러 타입
#[derive(Debug, thiserror::Error)]
pub enum ScanpostError {
    /// 설정 관련 에러
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// 리포트 디코딩/인코딩 에러
    #[error("report error: {0}")]
    Report(#[from] ReportError),

    /// I/O 에러
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// 설정 관련 에러
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// 설정 파일을 찾을 수 없음
    #[error("config file not found: {path}")]
    FileNotFound { path: String },

    /// 설정 파싱 실패
    #[error("failed to parse config: {reason}")]
    ParseFailed { reason: String },

    /// 유효하지 않은 설정 값
    #[error("invalid config value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

/// 리포트 처리 에러
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// 입력이 비어 있음
    #[error("failed to decode report: input is empty")]
    EmptyInput,

    /// JSON 디코딩 실패
    #[error("failed to decode report: {reason}")]
    Decode { reason: String },

    /// JSON 재인코딩 실패
    #[error("failed to marshal report: {reason}")]
    Encode { reason: String },
}
