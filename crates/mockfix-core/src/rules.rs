//! 规则文件加载（TOML）与内置规则
use serde::Deserialize;
use std::path::Path;

use crate::error::{MockfixError, Result};

/// 默认标记字面量：出现即说明文件安装了 fetch mock
pub const DEFAULT_MARKER: &str = "global.fetch";
/// 旧写法：`Promise.resolve({ ... json: ...`（缺少响应头）
pub const DEFAULT_LEGACY_PATTERN: &str = r"Promise\.resolve\(\s*\{[^}]*json:";
/// 新写法标记：全文任意位置出现即视为已修复
pub const DEFAULT_COMPLIANT_MARKER: &str = "headers:";
/// 识别的测试文件后缀
pub const DEFAULT_SUFFIXES: [&str; 2] = [".test.js", ".test.jsx"];

/// 检测器配置（规则文件 `[detector]` 段，字段均可省略）
#[derive(Debug, Clone, Deserialize)]
pub struct DetectorSpec {
    #[serde(default = "default_marker")]
    pub marker: String,
    #[serde(default = "default_legacy_pattern")]
    pub legacy_pattern: String,
    #[serde(default = "default_compliant_marker")]
    pub compliant_marker: String,
    #[serde(default = "default_suffixes")]
    pub suffixes: Vec<String>,
}

fn default_marker() -> String { DEFAULT_MARKER.to_string() }
fn default_legacy_pattern() -> String { DEFAULT_LEGACY_PATTERN.to_string() }
fn default_compliant_marker() -> String { DEFAULT_COMPLIANT_MARKER.to_string() }
fn default_suffixes() -> Vec<String> { DEFAULT_SUFFIXES.iter().map(|s| s.to_string()).collect() }

impl Default for DetectorSpec {
    fn default() -> Self {
        Self {
            marker: default_marker(),
            legacy_pattern: default_legacy_pattern(),
            compliant_marker: default_compliant_marker(),
            suffixes: default_suffixes(),
        }
    }
}

/// 单条替换规则的配置（支持 pattern 或 regex 字段）
#[derive(Debug, Clone, Deserialize)]
struct ReplacementEntry {
    pub id: String,
    #[serde(default)]
    pub pattern: Option<String>,
    #[serde(default)]
    pub regex: Option<String>,
    pub replacement: String,
}

/// 顶层规则文件结构
#[derive(Debug, Clone, Deserialize)]
struct RuleFile {
    #[serde(default)]
    pub detector: Option<DetectorSpec>,
    #[serde(default)]
    pub replacements: Option<Vec<ReplacementEntry>>,
}

/// 归一化后的替换规则：按列表顺序依次执行
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplacementRule {
    pub id: String,
    pub pattern: String,
    pub replacement: String,
}

impl ReplacementRule {
    fn new(id: &str, pattern: &str, replacement: &str) -> Self {
        Self { id: id.to_string(), pattern: pattern.to_string(), replacement: replacement.to_string() }
    }
}

/// 归一化后的规则集合
#[derive(Debug, Clone)]
pub struct RuleSet {
    pub detector: DetectorSpec,
    pub replacements: Vec<ReplacementRule>,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self { detector: DetectorSpec::default(), replacements: builtin_replacements() }
    }
}

impl RuleSet {
    /// 有路径则加载规则文件，否则使用内置规则
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => load_rule_set(p),
            None => Ok(Self::default()),
        }
    }
}

/// 从 TOML 规则文件加载；缺省的段回落到内置规则
fn load_rule_set(path: &Path) -> Result<RuleSet> {
    let txt = std::fs::read_to_string(path)
        .map_err(|source| MockfixError::Read { path: path.to_path_buf(), source })?;
    parse_rule_set(&txt).map_err(|source| MockfixError::RuleFile { path: path.to_path_buf(), source })
}

fn parse_rule_set(txt: &str) -> std::result::Result<RuleSet, toml::de::Error> {
    let parsed: RuleFile = toml::from_str(txt)?;
    let detector = parsed.detector.unwrap_or_default();

    let replacements = match parsed.replacements {
        Some(entries) => {
            let mut out = Vec::new();
            for e in entries {
                // 兼容两种字段名：pattern 或 regex
                let pattern = match (e.pattern, e.regex) {
                    (Some(p), _) => p,
                    (None, Some(r)) => r,
                    _ => continue,
                };
                out.push(ReplacementRule { id: e.id, pattern, replacement: e.replacement });
            }
            out
        }
        None => builtin_replacements(),
    };

    Ok(RuleSet { detector, replacements })
}

/// 内置替换规则：weatherApi.test.js 中旧的 axios 风格断言 → apiRequest 风格
pub(crate) fn builtin_replacements() -> Vec<ReplacementRule> {
    vec![
        // getHourlyForecast
        ReplacementRule::new(
            "hourly-48",
            r"expect\(apiRequest\)\.toHaveBeenCalledWith\('/weather/hourly/Boston', \{\s*params: \{ hours: 48 \},\s*\}\);",
            "expect(apiRequest).toHaveBeenCalledWith('/weather/hourly/Boston?hours=48', { method: 'GET' });",
        ),
        ReplacementRule::new(
            "hourly-72",
            r"expect\(apiRequest\)\.toHaveBeenCalledWith\('/weather/hourly/Boston', \{\s*params: \{ hours: 72 \},\s*\}\);",
            "expect(apiRequest).toHaveBeenCalledWith('/weather/hourly/Boston?hours=72', { method: 'GET' });",
        ),
        // getAllLocations
        ReplacementRule::new(
            "locations-page-1",
            r"expect\(apiRequest\)\.toHaveBeenCalledWith\('/locations', \{\s*params: \{ page: 1, limit: 50 \},\s*\}\);",
            "expect(apiRequest).toHaveBeenCalledWith('/locations?page=1&limit=50', { method: 'GET' });",
        ),
        ReplacementRule::new(
            "locations-page-2",
            r"expect\(apiRequest\)\.toHaveBeenCalledWith\('/locations', \{\s*params: \{ page: 2, limit: 25 \},\s*\}\);",
            "expect(apiRequest).toHaveBeenCalledWith('/locations?page=2&limit=25', { method: 'GET' });",
        ),
        // geocodeLocation
        ReplacementRule::new(
            "geocode-london",
            r"expect\(apiRequest\)\.toHaveBeenCalledWith\('/locations/geocode', \{\s*params: \{ address: 'London, UK', limit: 10 \},\s*\}\);",
            "expect(apiRequest).toHaveBeenCalledWith('/locations/geocode?address=London%2C+UK&limit=10', { method: 'GET' });",
        ),
        ReplacementRule::new(
            "geocode-paris",
            r"expect\(apiRequest\)\.toHaveBeenCalledWith\('/locations/geocode', \{\s*params: \{ address: 'Paris, France', limit: 5 \},\s*\}\);",
            "expect(apiRequest).toHaveBeenCalledWith('/locations/geocode?address=Paris%2C+France&limit=5', { method: 'GET' });",
        ),
        // reverseGeocode
        ReplacementRule::new(
            "reverse-london",
            r"expect\(apiRequest\)\.toHaveBeenCalledWith\('/locations/reverse', \{\s*params: \{ lat: 51\.5074, lon: -0\.1278 \},\s*\}\);",
            "expect(apiRequest).toHaveBeenCalledWith('/locations/reverse?lat=51.5074&lon=-0.1278', { method: 'GET' });",
        ),
        ReplacementRule::new(
            "reverse-sydney",
            r"expect\(apiRequest\)\.toHaveBeenCalledWith\('/locations/reverse', \{\s*params: \{ lat: -33\.8688, lon: 151\.2093 \},\s*\}\);",
            "expect(apiRequest).toHaveBeenCalledWith('/locations/reverse?lat=-33.8688&lon=151.2093', { method: 'GET' });",
        ),
        // getPopularLocations
        ReplacementRule::new(
            "popular",
            r"expect\(apiRequest\)\.toHaveBeenCalledWith\('/locations/popular'\);",
            "expect(apiRequest).toHaveBeenCalledWith('/locations/popular', { method: 'GET' });",
        ),
        // testApiConnection
        ReplacementRule::new(
            "health",
            r"expect\(apiRequest\)\.toHaveBeenCalledWith\('/health'\);",
            "expect(apiRequest).toHaveBeenCalledWith('/health', { method: 'GET' });",
        ),
    ]
}
