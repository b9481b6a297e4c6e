#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use scanpost_core::summary::SeveritySummary;

/// 퍼저용 구조적 스캔 결과
#[derive(Arbitrary, Debug)]
struct FuzzResult {
    target: String,
    severities: Vec<String>,
}

fuzz_target!(|input: Vec<FuzzResult>| {
    let mut summary = SeveritySummary::default();
    // 결과 수 제한 (퍼징 성능)
    for result in input.iter().take(100) {
        summary.record(&result.target, result.severities.iter().map(String::as_str));
    }

    let severities = summary.severities();

    // 열 합계 = 셀 합
    for severity in &severities {
        let column: usize = summary.targets().map(|t| summary.count(t, severity)).sum();
        assert_eq!(column, summary.total(severity));
    }

    // 전체 합계 = 열 합계의 합
    let grand: usize = severities.iter().map(|s| summary.total(s)).sum();
    assert_eq!(grand, summary.grand_total());

    // 열 순서는 결정적이며 중복이 없다
    let mut sorted = severities.clone();
    sorted.sort_by(|a, b| scanpost_core::summary::compare_severity(a, b));
    sorted.dedup();
    assert_eq!(sorted, severities);
});
