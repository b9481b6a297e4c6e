#![no_main]

use libfuzzer_sys::fuzz_target;
use scanpost_core::report::Report;
use serde_json::Value;

fuzz_target!(|data: &[u8]| {
    let Ok(report) = Report::from_slice(data) else {
        return;
    };

    // 디코딩된 리포트는 항상 다시 인코딩되고, 같은 값으로 돌아와야 한다
    let encoded = report.to_vec().expect("decoded report must re-encode");
    let again = Report::from_slice(&encoded).expect("re-encoded report must decode");
    assert_eq!(again, report);

    // 모델링하지 않은 필드는 원본 입력의 값 그대로 발행되어야 한다
    let original = serde_json::Deserializer::from_slice(data)
        .into_iter::<Value>()
        .next()
        .and_then(Result::ok);
    let published: Value = serde_json::from_slice(&encoded).expect("published bytes are JSON");
    if let (Some(Value::Object(original)), Value::Object(published)) = (original, published) {
        for (key, value) in &report.extra {
            assert_eq!(original.get(key), Some(value));
            assert_eq!(published.get(key), Some(value));
        }
    }

    let summary = report.summarize();
    assert_eq!(summary.grand_total(), report.vulnerability_count());
});
