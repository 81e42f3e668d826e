//! 扫描/改写选项与统计信息（模块）
use std::path::PathBuf;

/// 扫描选项
#[derive(Debug, Clone, Default)]
pub struct ScanOptions {
    /// 规则文件路径（TOML）；为空则使用内置检测规则
    pub rules_path: Option<PathBuf>,
}

/// 改写选项
#[derive(Debug, Clone, Default)]
pub struct RewriteOptions {
    /// 规则文件路径（TOML）；为空则使用内置替换规则
    pub rules_path: Option<PathBuf>,
    /// 只打印 diff，不写回文件
    pub dry_run: bool,
}

/// 扫描统计信息（便于 CLI 打印与测试断言）
#[derive(Debug, Default, Clone)]
pub struct ScanStats {
    /// 匹配后缀的测试文件总数
    pub files_found: usize,
    pub files_compliant: usize,
    pub files_without_mocks: usize,
    pub read_errors: usize,
    /// 需要修复的文件（按扫描顺序）
    pub needing_fix: Vec<PathBuf>,
}

impl ScanStats {
    pub fn files_needing_fix(&self) -> usize {
        self.needing_fix.len()
    }
}

/// 改写统计信息
#[derive(Debug, Default, Clone)]
pub struct RewriteStats {
    /// 尝试执行的规则数（无论是否命中）
    pub rules_attempted: usize,
    /// 每条规则的命中次数，与规则顺序一一对应
    pub matches_per_rule: Vec<usize>,
    /// 改写后内容是否与原文不同
    pub changed: bool,
    /// 是否实际写回了文件（dry-run 时为 false）
    pub written: bool,
}

impl RewriteStats {
    pub fn total_matches(&self) -> usize {
        self.matches_per_rule.iter().sum()
    }
}
