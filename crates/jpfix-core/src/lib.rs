//! 日文编码修正核心库
//!
//! 设计要点：
//! - 单线程、单次遍历：逐个文件检测编码、解码、判断是否含日文、按需改写为 UTF-8。
//! - 纯 ASCII 文件直接跳过；已是 UTF-8 的日文文件不做任何改动。
//! - 编码猜测为可替换策略：统计型检测器（chardetng，可选 feature）或固定候选列表回退。
//! - 结果统计以显式累加器（`ScanStats`）返回，不使用全局状态。

mod options;
mod error;
mod types;
mod script;
mod detect;
mod preview;
mod process;
mod walk;
mod report;
mod scan;

pub use options::{parse_exts, DetectorKind, ExtFilter, FixOptions, ScanStats, DEFAULT_EXTS};
pub use error::FixError;
pub use types::{Outcome, ReportItem, Status};
pub use script::contains_japanese;
pub use detect::{select_detector, strict_decode, EncodingDetector, FallbackDetector, fallback_candidates};
#[cfg(feature = "chardetng")]
pub use detect::StatisticalDetector;
pub use preview::{truncate_preview, unified_diff, PREVIEW_LIMIT};
pub use process::{backup_path, classify, process_file, Classified};
pub use walk::iter_files;
pub use report::JsonReport;
pub use scan::{scan_and_report, NOT_FOUND_MESSAGE};
