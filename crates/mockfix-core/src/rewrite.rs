//! 单文件改写：按顺序执行替换规则，原子写回
use regex::{NoExpand, Regex, RegexBuilder};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::{MockfixError, Result};
use crate::options::{RewriteOptions, RewriteStats};
use crate::rules::{ReplacementRule, RuleSet};

/// 编译后的替换规则
pub(crate) struct CompiledRule {
    pub(crate) id: String,
    regex: Regex,
    replacement: String,
}

/// 编译全部规则：多行 + `.` 匹配换行；任一正则非法即失败
pub(crate) fn compile_rules(rules: &[ReplacementRule]) -> Result<Vec<CompiledRule>> {
    rules
        .iter()
        .map(|r| {
            let regex = RegexBuilder::new(&r.pattern)
                .multi_line(true)
                .dot_matches_new_line(true)
                .build()
                .map_err(|source| MockfixError::Pattern { id: r.id.clone(), source })?;
            Ok(CompiledRule { id: r.id.clone(), regex, replacement: r.replacement.clone() })
        })
        .collect()
}

/// 依次对“当前文本”做全局替换；返回新文本与每条规则的命中次数
/// 替换文本按字面插入，不展开 `$name`
pub(crate) fn apply_rules(text: &str, rules: &[CompiledRule]) -> (String, Vec<usize>) {
    let mut current = text.to_string();
    let mut counts = Vec::with_capacity(rules.len());
    for rule in rules {
        let n = rule.regex.find_iter(&current).count();
        if n > 0 {
            current = rule.regex.replace_all(&current, NoExpand(rule.replacement.as_str())).into_owned();
        }
        debug!(rule = %rule.id, matches = n, "rule applied");
        counts.push(n);
    }
    (current, counts)
}

/// 改写 `target` 并把结果说明写入 `out`
/// - 读/写失败为致命错误，原样向上返回
/// - 报告的是“尝试执行的规则数”，而非实际命中数
/// - dry-run 时仅输出统一 diff，不触碰文件
pub fn rewrite_file(target: &Path, out: &mut dyn Write, opts: &RewriteOptions) -> Result<RewriteStats> {
    let rules = RuleSet::load(opts.rules_path.as_deref())?;
    let compiled = compile_rules(&rules.replacements)?;

    let content = std::fs::read_to_string(target)
        .map_err(|source| MockfixError::Read { path: target.to_path_buf(), source })?;

    let (updated, matches_per_rule) = apply_rules(&content, &compiled);
    let mut stats = RewriteStats {
        rules_attempted: compiled.len(),
        matches_per_rule,
        changed: updated != content,
        written: false,
    };

    let name = target
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| target.display().to_string());

    if opts.dry_run {
        write_diff(out, target, &content, &updated)?;
        writeln!(out, "Dry run: {} not modified", name)?;
    } else {
        write_atomic(target, &updated)?;
        stats.written = true;
        writeln!(out, "✅ Fixed {} expectations!", name)?;
    }
    writeln!(out, "Applied {} replacements", stats.rules_attempted)?;
    debug!(total_matches = stats.total_matches(), changed = stats.changed, "rewrite finished");

    Ok(stats)
}

/// 统一 diff 输出（dry-run 专用）
fn write_diff(out: &mut dyn Write, path: &Path, original: &str, updated: &str) -> Result<()> {
    let label = path.display().to_string();
    let diff = similar::TextDiff::from_lines(original, updated);
    write!(out, "{}", diff.unified_diff().context_radius(3).header(&label, &label))?;
    Ok(())
}

/// 原子写回：同目录临时文件 → 写入并 fsync → 继承原权限 → rename 覆盖
/// 符号链接先解析到真实文件，写穿链接而不替换链接本身
/// 任一步失败时临时文件随 drop 删除，原文件保持不变
pub(crate) fn write_atomic(path: &Path, data: &str) -> Result<()> {
    let write_err = |source| MockfixError::Write { path: path.to_path_buf(), source };
    let resolved = std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    let dir = match resolved.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(write_err)?;
    tmp.write_all(data.as_bytes()).map_err(write_err)?;
    tmp.as_file().sync_all().map_err(write_err)?;
    if let Ok(md) = std::fs::metadata(&resolved) {
        std::fs::set_permissions(tmp.path(), md.permissions()).map_err(write_err)?;
    }
    tmp.persist(&resolved).map_err(|e| write_err(e.error))?;
    Ok(())
}
