//! 심각도 집계: 대상별/심각도별 취약점 개수
//!
//! [`SeveritySummary`]는 리포트의 결과 목록을 한 번 순회하여 두 개의 매핑을 만듭니다.
//!
//! - [`SeverityCounts`]: 대상 → (심각도 → 개수)
//! - [`TotalCounts`]: 심각도 → 전체 개수
//!
//! 두 매핑 모두 `BTreeMap`이므로 순회 순서가 결정적입니다. 표시용 심각도 컬럼
//! 순서는 [`SeveritySummary::severities`]가 정합니다.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::report::ScanResult;

/// 대상 → (심각도 → 개수)
pub type SeverityCounts = BTreeMap<String, BTreeMap<String, usize>>;

/// 심각도 → 전체 개수
pub type TotalCounts = BTreeMap<String, usize>;

/// Trivy 심각도 라벨의 표시 순서 (높은 순)
const SEVERITY_RANK: [&str; 5] = ["CRITICAL", "HIGH", "MEDIUM", "LOW", "UNKNOWN"];

/// 리포트 전체의 심각도 집계
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SeveritySummary {
    by_target: SeverityCounts,
    totals: TotalCounts,
}

impl SeveritySummary {
    /// 결과 목록에서 집계를 계산합니다.
    ///
    /// 취약점이 없는 대상도 빈 매핑으로 등록되며, 같은 대상이 여러 번 나오면
    /// 하나의 매핑에 누적됩니다.
    pub fn from_results(results: &[ScanResult]) -> Self {
        let mut summary = Self::default();
        for result in results {
            summary.record(
                &result.target,
                result.vulnerabilities.iter().map(|v| v.severity.as_str()),
            );
        }
        summary
    }

    /// 한 대상의 심각도 라벨들을 누적합니다.
    pub fn record<'a>(&mut self, target: &str, severities: impl IntoIterator<Item = &'a str>) {
        let counts = self.by_target.entry(target.to_owned()).or_default();
        for severity in severities {
            *counts.entry(severity.to_owned()).or_insert(0) += 1;
            *self.totals.entry(severity.to_owned()).or_insert(0) += 1;
        }
    }

    /// 대상별 집계
    pub fn by_target(&self) -> &SeverityCounts {
        &self.by_target
    }

    /// 심각도별 전체 집계
    pub fn totals(&self) -> &TotalCounts {
        &self.totals
    }

    /// 대상 목록 (사전순)
    pub fn targets(&self) -> impl Iterator<Item = &str> {
        self.by_target.keys().map(String::as_str)
    }

    /// 모든 대상에 나타난 심각도의 합집합 (표시 순서)
    ///
    /// Trivy 라벨은 `CRITICAL`, `HIGH`, `MEDIUM`, `LOW`, `UNKNOWN` 순이며,
    /// 그 밖의 라벨(빈 문자열 포함)은 그 뒤에 사전순으로 옵니다.
    pub fn severities(&self) -> Vec<String> {
        let union: BTreeSet<&String> = self.by_target.values().flat_map(|c| c.keys()).collect();
        let mut severities: Vec<String> = union.into_iter().cloned().collect();
        severities.sort_by(|a, b| compare_severity(a, b));
        severities
    }

    /// 특정 대상/심각도의 개수. 없으면 0
    pub fn count(&self, target: &str, severity: &str) -> usize {
        self.by_target
            .get(target)
            .and_then(|c| c.get(severity))
            .copied()
            .unwrap_or(0)
    }

    /// 특정 심각도의 전체 개수. 없으면 0
    pub fn total(&self, severity: &str) -> usize {
        self.totals.get(severity).copied().unwrap_or(0)
    }

    /// 모든 심각도 합계
    pub fn grand_total(&self) -> usize {
        self.totals.values().sum()
    }
}

/// 심각도 라벨 비교 (알려진 라벨은 순위, 나머지는 사전순)
pub fn compare_severity(a: &str, b: &str) -> Ordering {
    let rank = |s: &str| SEVERITY_RANK.iter().position(|r| *r == s);
    match (rank(a), rank(b)) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}
