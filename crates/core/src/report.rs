//! 스캔 리포트 스키마: Trivy JSON 리포트의 디코딩/재인코딩
//!
//! 집계에 필요한 필드만 타입으로 모델링하고, 나머지 필드는 `extra`에
//! 원본 그대로 보존하여 재인코딩 시 데이터가 유실되지 않도록 합니다.
//!
//! # 사용 예시
//! ```
//! use scanpost_core::report::Report;
//!
//! let input = br#"{"Results":[{"Target":"app","Vulnerabilities":[{"Severity":"HIGH"}]}]}"#;
//! let report = Report::from_slice(input).unwrap();
//! assert_eq!(report.results[0].target, "app");
//! assert_eq!(report.vulnerability_count(), 1);
//! ```

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::error::ReportError;
use crate::summary::SeveritySummary;

/// 디코딩된 스캔 리포트
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Report {
    #[serde(
        rename = "SchemaVersion",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub schema_version: Option<i64>,

    #[serde(
        rename = "ArtifactName",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub artifact_name: Option<String>,

    #[serde(
        rename = "ArtifactType",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub artifact_type: Option<String>,

    /// 스캔 대상별 결과 (입력 순서 유지)
    #[serde(
        rename = "Results",
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub results: Vec<ScanResult>,

    /// 모델링하지 않은 나머지 필드
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// 하나의 스캔 대상에 대한 결과
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScanResult {
    /// 스캔 대상 식별자 (이미지, 파일 경로 등)
    #[serde(rename = "Target", default, deserialize_with = "null_as_default")]
    pub target: String,

    #[serde(rename = "Class", default, skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,

    #[serde(rename = "Type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    #[serde(
        rename = "Vulnerabilities",
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub vulnerabilities: Vec<Vulnerability>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// 탐지된 취약점 한 건
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Vulnerability {
    #[serde(
        rename = "VulnerabilityID",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub vulnerability_id: Option<String>,

    #[serde(rename = "PkgName", default, skip_serializing_if = "Option::is_none")]
    pub pkg_name: Option<String>,

    #[serde(
        rename = "InstalledVersion",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub installed_version: Option<String>,

    #[serde(
        rename = "FixedVersion",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub fixed_version: Option<String>,

    /// 심각도 라벨. 누락 시 빈 문자열이며, 알 수 없는 값도 그대로 유지합니다.
    #[serde(
        rename = "Severity",
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub severity: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Report {
    /// 바이트 스트림에서 첫 번째 JSON 값을 리포트로 디코딩합니다.
    ///
    /// 첫 번째 값 뒤에 남은 바이트는 무시합니다.
    ///
    /// # Errors
    ///
    /// - `ReportError::EmptyInput`: 입력이 비어 있거나 공백뿐인 경우
    /// - `ReportError::Decode`: JSON 형식이 아니거나 스키마와 맞지 않는 경우
    pub fn from_slice(input: &[u8]) -> Result<Self, ReportError> {
        let mut stream = serde_json::Deserializer::from_slice(input).into_iter::<Self>();
        match stream.next() {
            Some(Ok(report)) => {
                let trailing = &input[stream.byte_offset()..];
                if trailing.iter().any(|b| !b.is_ascii_whitespace()) {
                    tracing::debug!(
                        trailing_bytes = trailing.len(),
                        "ignoring input after the first JSON value"
                    );
                }
                Ok(report)
            }
            Some(Err(e)) => Err(ReportError::Decode {
                reason: e.to_string(),
            }),
            None => Err(ReportError::EmptyInput),
        }
    }

    /// 리포트를 compact JSON으로 재인코딩합니다.
    pub fn to_vec(&self) -> Result<Vec<u8>, ReportError> {
        serde_json::to_vec(self).map_err(|e| ReportError::Encode {
            reason: e.to_string(),
        })
    }

    /// 전체 취약점 개수
    pub fn vulnerability_count(&self) -> usize {
        self.results.iter().map(|r| r.vulnerabilities.len()).sum()
    }

    /// 대상별/심각도별 집계를 계산합니다.
    pub fn summarize(&self) -> SeveritySummary {
        SeveritySummary::from_results(&self.results)
    }
}

/// `null`을 기본값으로 취급합니다.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "SchemaVersion": 2,
        "CreatedAt": "2024-05-01T10:00:00Z",
        "ArtifactName": "alpine:3.19",
        "ArtifactType": "container_image",
        "Metadata": {"OS": {"Family": "alpine", "Name": "3.19.1"}},
        "Results": [
            {
                "Target": "alpine:3.19 (alpine 3.19.1)",
                "Class": "os-pkgs",
                "Type": "alpine",
                "Vulnerabilities": [
                    {
                        "VulnerabilityID": "CVE-2024-0727",
                        "PkgName": "libssl3",
                        "InstalledVersion": "3.1.4-r2",
                        "FixedVersion": "3.1.4-r5",
                        "Severity": "MEDIUM",
                        "CVSS": {"nvd": {"V3Score": 5.5}}
                    }
                ]
            }
        ]
    }"#;

    #[test]
    fn decodes_trivy_report() {
        let report = Report::from_slice(SAMPLE.as_bytes()).unwrap();
        assert_eq!(report.schema_version, Some(2));
        assert_eq!(report.artifact_name.as_deref(), Some("alpine:3.19"));
        assert_eq!(report.results.len(), 1);

        let result = &report.results[0];
        assert_eq!(result.target, "alpine:3.19 (alpine 3.19.1)");
        assert_eq!(result.class.as_deref(), Some("os-pkgs"));
        assert_eq!(result.kind.as_deref(), Some("alpine"));

        let vuln = &result.vulnerabilities[0];
        assert_eq!(vuln.vulnerability_id.as_deref(), Some("CVE-2024-0727"));
        assert_eq!(vuln.severity, "MEDIUM");
        assert!(vuln.extra.contains_key("CVSS"));
    }

    #[test]
    fn unmodelled_fields_survive_reencoding() {
        let report = Report::from_slice(SAMPLE.as_bytes()).unwrap();
        let encoded = report.to_vec().unwrap();
        let value: Value = serde_json::from_slice(&encoded).unwrap();

        assert_eq!(value["CreatedAt"], "2024-05-01T10:00:00Z");
        assert_eq!(value["Metadata"]["OS"]["Family"], "alpine");
        assert_eq!(
            value["Results"][0]["Vulnerabilities"][0]["CVSS"]["nvd"]["V3Score"],
            5.5
        );
        assert_eq!(value["Results"][0]["Type"], "alpine");
    }

    #[test]
    fn missing_severity_decodes_as_empty_label() {
        let input = br#"{"Results":[{"Target":"app","Vulnerabilities":[{"VulnerabilityID":"CVE-1"}]}]}"#;
        let report = Report::from_slice(input).unwrap();
        assert_eq!(report.results[0].vulnerabilities[0].severity, "");
    }

    #[test]
    fn null_lists_decode_as_empty() {
        let input = br#"{"Results":[{"Target":"app","Vulnerabilities":null}]}"#;
        let report = Report::from_slice(input).unwrap();
        assert!(report.results[0].vulnerabilities.is_empty());

        let report = Report::from_slice(br#"{"Results":null}"#).unwrap();
        assert!(report.results.is_empty());
    }

    #[test]
    fn unknown_severity_passes_through() {
        let input = br#"{"Results":[{"Target":"app","Vulnerabilities":[{"Severity":"NEGLIGIBLE"}]}]}"#;
        let report = Report::from_slice(input).unwrap();
        assert_eq!(report.results[0].vulnerabilities[0].severity, "NEGLIGIBLE");
    }

    #[test]
    fn empty_input_is_rejected() {
        assert!(matches!(
            Report::from_slice(b""),
            Err(ReportError::EmptyInput)
        ));
        assert!(matches!(
            Report::from_slice(b"  \n\t "),
            Err(ReportError::EmptyInput)
        ));
    }

    #[test]
    fn malformed_json_is_decode_error() {
        let err = Report::from_slice(b"{\"Results\": [").unwrap_err();
        assert!(matches!(err, ReportError::Decode { .. }));
        assert!(err.to_string().starts_with("failed to decode report"));
    }

    #[test]
    fn wrong_shape_is_decode_error() {
        assert!(matches!(
            Report::from_slice(b"[1, 2, 3]"),
            Err(ReportError::Decode { .. })
        ));
        assert!(matches!(
            Report::from_slice(br#"{"Results": "nope"}"#),
            Err(ReportError::Decode { .. })
        ));
    }

    #[test]
    fn trailing_bytes_after_first_value_are_ignored() {
        let input = b"{\"Results\":[{\"Target\":\"app\"}]}\n{\"second\": true}";
        let report = Report::from_slice(input).unwrap();
        assert_eq!(report.results.len(), 1);
        assert!(!report.extra.contains_key("second"));
    }

    #[test]
    fn empty_report_encodes_without_results_key() {
        let report = Report::from_slice(b"{}").unwrap();
        assert_eq!(report.to_vec().unwrap(), b"{}");
    }

    #[test]
    fn vulnerability_count_spans_all_results() {
        let input = br#"{"Results":[
            {"Target":"a","Vulnerabilities":[{"Severity":"LOW"},{"Severity":"HIGH"}]},
            {"Target":"b"},
            {"Target":"c","Vulnerabilities":[{"Severity":"LOW"}]}
        ]}"#;
        let report = Report::from_slice(input).unwrap();
        assert_eq!(report.vulnerability_count(), 3);
        assert_eq!(report.summarize().grand_total(), 3);
    }

    #[test]
    fn float_scores_survive_decode_and_reencode() {
        let input = br#"{"Results":[{"Target":"app","Vulnerabilities":[
            {"Severity":"CRITICAL","CVSS":{"nvd":{"V3Score":9007199254740993.0}}}
        ]}]}"#;
        let exact: f64 = "9007199254740993.0".parse().unwrap();

        let report = Report::from_slice(input).unwrap();
        let score = &report.results[0].vulnerabilities[0].extra["CVSS"]["nvd"]["V3Score"];
        assert_eq!(score.as_f64(), Some(exact));

        let republished = Report::from_slice(&report.to_vec().unwrap()).unwrap();
        let score = &republished.results[0].vulnerabilities[0].extra["CVSS"]["nvd"]["V3Score"];
        assert_eq!(score.as_f64(), Some(exact));
    }
}
