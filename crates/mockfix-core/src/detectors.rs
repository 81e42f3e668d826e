//! fetch mock 检测器
use regex::Regex;
use std::ffi::OsStr;

use crate::error::{MockfixError, Result};
use crate::prefilter::MarkerPrefilter;
use crate::rules::DetectorSpec;
use crate::types::Classification;

/// 判定单个测试文件是否仍使用旧的 fetch mock 写法
pub struct MockDetector {
    prefilter: MarkerPrefilter,
    legacy: Regex,
    suffixes: Vec<String>,
}

impl MockDetector {
    /// 从检测器配置构建（旧写法正则编译失败视为致命错误）
    pub fn from_spec(spec: &DetectorSpec) -> Result<Self> {
        let legacy = Regex::new(&spec.legacy_pattern).map_err(|source| MockfixError::Pattern {
            id: "detector.legacy_pattern".to_string(),
            source,
        })?;
        let prefilter = MarkerPrefilter::new(&spec.marker, &spec.compliant_marker)?;
        Ok(Self { prefilter, legacy, suffixes: spec.suffixes.clone() })
    }

    /// 文件名是否以任一识别的后缀结尾（按字节比较，非 UTF-8 文件名同样适用）
    pub fn is_test_file(&self, file_name: &OsStr) -> bool {
        let name = file_name.as_encoded_bytes();
        self.suffixes.iter().any(|s| name.ends_with(s.as_bytes()))
    }

    /// 判定规则：
    /// - 无 mock 标记 → NoMocks
    /// - 旧写法正则命中且全文无合规标记 → NeedsFix
    /// - 其余 → Compliant（合规标记优先于旧写法）
    pub fn classify(&self, text: &str) -> Classification {
        let hits = self.prefilter.hits(text);
        if !hits.marker {
            return Classification::NoMocks;
        }
        if !hits.compliant && self.legacy.is_match(text) {
            Classification::NeedsFix
        } else {
            Classification::Compliant
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detector() -> MockDetector {
        MockDetector::from_spec(&DetectorSpec::default()).unwrap()
    }

    const LEGACY: &str = r#"
global.fetch = vi.fn(() =>
  Promise.resolve({
    ok: true,
    json: () => Promise.resolve({ data: [] }),
  })
);
"#;

    #[test]
    fn legacy_mock_without_headers_needs_fix() {
        assert_eq!(detector().classify(LEGACY), Classification::NeedsFix);
    }

    #[test]
    fn headers_anywhere_wins_over_legacy_pattern() {
        let text = format!("{LEGACY}\nconst other = {{ headers: {{}} }};\n");
        assert_eq!(detector().classify(&text), Classification::Compliant);
    }

    #[test]
    fn marker_without_legacy_shape_is_compliant() {
        let text = "global.fetch = vi.fn(() => mockResponse());";
        assert_eq!(detector().classify(text), Classification::Compliant);
    }

    #[test]
    fn legacy_shape_without_marker_is_ignored() {
        let text = "window.fetch = vi.fn(() => Promise.resolve({ json: () => ({}) }));";
        assert_eq!(detector().classify(text), Classification::NoMocks);
    }

    #[test]
    fn repeated_legacy_mocks_yield_one_classification() {
        let text = format!("{LEGACY}{LEGACY}{LEGACY}");
        assert_eq!(detector().classify(&text), Classification::NeedsFix);
    }

    #[test]
    fn suffix_matching() {
        let d = detector();
        assert!(d.is_test_file(OsStr::new("weatherApi.test.js")));
        assert!(d.is_test_file(OsStr::new("App.test.jsx")));
        assert!(!d.is_test_file(OsStr::new("App.spec.js")));
        assert!(!d.is_test_file(OsStr::new("test.js.map")));
    }

    #[test]
    fn bad_legacy_pattern_is_rejected() {
        let spec = DetectorSpec { legacy_pattern: "Promise\\.resolve(".to_string(), ..DetectorSpec::default() };
        let err = MockDetector::from_spec(&spec).err().unwrap();
        assert!(matches!(err, MockfixError::Pattern { .. }));
    }
}
