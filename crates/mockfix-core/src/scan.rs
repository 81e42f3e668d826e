//! 扫描主流程：遍历目录、逐文件判定、输出报告
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::detectors::MockDetector;
use crate::error::Result;
use crate::options::{ScanOptions, ScanStats};
use crate::rules::RuleSet;
use crate::types::Classification;

/// 汇总分隔线宽度
const RULE_WIDTH: usize = 80;

/// 扫描 `root` 下的测试文件并把报告写入 `out`
/// - 只读：不修改任何文件
/// - 单文件读取失败只输出警告，不中断扫描
/// - 文件按路径排序，输出顺序可复现
pub fn scan_and_report(root: &Path, out: &mut dyn Write, opts: &ScanOptions) -> Result<ScanStats> {
    let rules = RuleSet::load(opts.rules_path.as_deref())?;
    let detector = MockDetector::from_spec(&rules.detector)?;

    let files = collect_test_files(root, &detector);
    let mut stats = ScanStats { files_found: files.len(), ..ScanStats::default() };

    writeln!(out, "Found {} test files\n", files.len())?;

    for path in files {
        let content = match std::fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) => {
                stats.read_errors += 1;
                writeln!(out, "⚠️  Error reading {}: {}", path.display(), e)?;
                continue;
            }
        };

        let class = detector.classify(&content);
        debug!(path = %path.display(), ?class, "classified");
        match class {
            Classification::NoMocks => stats.files_without_mocks += 1,
            Classification::NeedsFix => {
                writeln!(out, "❌ {}", path.display())?;
                writeln!(out, "   Found fetch mocks without headers")?;
                stats.needing_fix.push(path);
            }
            Classification::Compliant => {
                stats.files_compliant += 1;
                writeln!(out, "✅ {}", path.display())?;
                writeln!(out, "   Already has proper fetch mocks")?;
            }
        }
    }

    writeln!(out, "\n{}", "=".repeat(RULE_WIDTH))?;
    writeln!(out, "Files needing fix: {}", stats.files_needing_fix())?;
    for p in &stats.needing_fix {
        writeln!(out, "  - {}", p.display())?;
    }

    Ok(stats)
}

/// 递归收集匹配后缀的文件；遍历错误（含根目录不存在）直接跳过
/// 不跟随目录链接；指向非目录的链接（含失效链接）按文件收集
fn collect_test_files(root: &Path, detector: &MockDetector) -> Vec<PathBuf> {
    if !root.is_dir() {
        warn!(root = %root.display(), "scan root is not a directory");
    }

    let mut files: Vec<PathBuf> = Vec::new();
    for entry in WalkDir::new(root) {
        let entry = match entry { Ok(e) => e, Err(_) => continue };
        let ft = entry.file_type();
        let is_file = ft.is_file() || (ft.is_symlink() && !entry.path().is_dir());
        if is_file && detector.is_test_file(entry.file_name()) {
            files.push(entry.into_path());
        }
    }
    files.sort();
    files
}
