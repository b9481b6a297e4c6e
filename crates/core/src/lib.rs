//! Scanpost 공통 크레이트
//!
//! 스캔 리포트 스키마, 심각도 집계, 설정, 도메인 에러를 제공합니다.
//! Kafka 발행은 `scanpost-publisher`, 명령줄 도구는 `scanpost-cli`가 담당합니다.
//!
//! ```text
//! stdin --> Report::from_slice --> Report::to_vec --> (publisher)
//!                  |
//!                  +--> SeveritySummary --> (presenter)
//! ```

pub mod config;
pub mod error;
pub mod report;
pub mod summary;

// --- 주요 타입 re-export ---

// 에러
pub use error::{ConfigError, ReportError, ScanpostError};

// 설정
pub use config::{GeneralConfig, KafkaConfig, ScanpostConfig};

// 리포트
pub use report::{Report, ScanResult, Vulnerability};

// 집계
pub use summary::{SeverityCounts, SeveritySummary, TotalCounts};
