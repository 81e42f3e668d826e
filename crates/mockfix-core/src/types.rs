//! 判定结果类型

/// 单个测试文件的判定结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// 存在 `global.fetch` mock，且响应对象带 `json` 字段而全文无 `headers:`
    NeedsFix,
    /// 存在 mock，但已是新写法（或根本没有旧写法）
    Compliant,
    /// 未出现标记字面量，不做进一步判断
    NoMocks,
}
