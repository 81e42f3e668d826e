//! 字面量预筛（Aho-Corasick）
//!
//! 一次遍历同时确认“mock 标记”与“合规标记”是否出现，
//! 只有出现 mock 标记的文件才需要运行旧写法正则。

use aho_corasick::{AhoCorasick, AhoCorasickBuilder, MatchKind};

use crate::error::Result;

/// 模式下标（与构建顺序一致）
const MARKER: usize = 0;
const COMPLIANT: usize = 1;

/// 单个文件的字面量命中情况
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct MarkerHits {
    pub(crate) marker: bool,
    pub(crate) compliant: bool,
}

/// 预筛计划：两个字面量共用一个自动机
pub(crate) struct MarkerPrefilter {
    ac: AhoCorasick,
}

impl MarkerPrefilter {
    pub(crate) fn new(marker: &str, compliant_marker: &str) -> Result<Self> {
        // Standard 语义才支持重叠遍历；两个标记可能互为前后缀
        let ac = AhoCorasickBuilder::new()
            .match_kind(MatchKind::Standard)
            .build([marker, compliant_marker])?;
        Ok(Self { ac })
    }

    /// 扫描全文；两个标记都已命中时提前结束
    pub(crate) fn hits(&self, text: &str) -> MarkerHits {
        let mut hits = MarkerHits::default();
        for m in self.ac.find_overlapping_iter(text) {
            match m.pattern().as_usize() {
                MARKER => hits.marker = true,
                COMPLIANT => hits.compliant = true,
                _ => {}
            }
            if hits.marker && hits.compliant { break; }
        }
        hits
    }
}
