//! 测试套件维护工具核心库
//!
//! 两个互不依赖的单遍文本工具：
//! - 扫描器：遍历目录中的测试文件，找出仍使用旧 fetch mock 写法（有 `json` 无 `headers:`）的文件，只读。
//! - 改写器：对单个测试文件按顺序执行一组正则替换，把旧的调用断言改成新形式，原子写回。
//!
//! 两者均为单线程同步执行；报告写入调用方提供的 `Write`，日志走 `tracing`。

mod error;
mod options;
mod types;
mod prefilter;
mod detectors;
mod rules;
mod scan;
mod rewrite;

pub use error::{MockfixError, Result};
pub use options::{RewriteOptions, RewriteStats, ScanOptions, ScanStats};
pub use scan::scan_and_report;
pub use rewrite::rewrite_file;
