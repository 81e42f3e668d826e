//! 错误类型（基于 thiserror）
use std::path::PathBuf;
use thiserror::Error;

/// 核心库统一错误类型
#[derive(Debug, Error)]
pub enum MockfixError {
    /// 读取目标文件失败（改写器中为致命错误）
    #[error("failed to read '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// 写回目标文件失败（临时文件、同步或重命名任一步）
    #[error("failed to write '{}': {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// 规则文件 TOML 解析失败
    #[error("invalid rule file '{}': {source}", .path.display())]
    RuleFile {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// 规则中的正则无法编译
    #[error("invalid pattern in rule '{id}': {source}")]
    Pattern {
        id: String,
        #[source]
        source: regex::Error,
    },

    /// 标记字面量自动机构建失败
    #[error("failed to build marker automaton: {0}")]
    Markers(#[from] aho_corasick::BuildError),

    /// 报告输出（stdout 等）写入失败
    #[error("failed to write report: {0}")]
    Report(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, MockfixError>;
