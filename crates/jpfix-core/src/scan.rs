//! 扫描主流程：遍历 → 逐文件处理 → 文本报告（可选 JSON 报告）
use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;
use tracing::debug;

use crate::detect::EncodingDetector;
use crate::options::{FixOptions, ScanStats};
use crate::preview::{truncate_preview, PREVIEW_LIMIT};
use crate::process::process_file;
use crate::report::JsonReport;
use crate::types::ReportItem;
use crate::walk::iter_files;

/// 未发现任何问题文件时的汇总提示
pub const NOT_FOUND_MESSAGE: &str = "問題ありそうな日本語ファイルは見つかりませんでした。";

/// 扫描 `root` 并把报告写入 `out`
/// - 仅 convert / fail-to-decode / unknown 逐行输出；ok-utf8 与 no-japanese 静默
/// - check 模式附带截断到 2000 字符的 diff 预览
/// - 读写失败立即中止（不做逐文件隔离）
pub fn scan_and_report(
    root: &Path,
    opts: &FixOptions,
    detector: &dyn EncodingDetector,
    out: &mut dyn Write,
    mut report: Option<&mut JsonReport<Box<dyn Write>>>,
) -> Result<ScanStats> {
    let mut stats = ScanStats::default();

    for path in iter_files(root, &opts.exts) {
        if opts.is_skipped(&path) {
            debug!(path = %path.display(), "excluded from scan");
            continue;
        }
        stats.files_visited += 1;
        let outcome = process_file(&path, detector, opts)
            .with_context(|| format!("processing {}", path.display()))?;
        let Some(outcome) = outcome else {
            stats.skipped_ascii += 1;
            continue;
        };

        stats.record(outcome.status);
        if outcome.rewritten { stats.rewritten += 1; }
        if outcome.backup.is_some() { stats.backups += 1; }
        if !outcome.status.is_reported() {
            continue;
        }

        writeln!(
            out,
            "[{}] {} (detected: {})",
            outcome.status,
            path.display(),
            outcome.encoding_name().unwrap_or("none")
        )?;
        if opts.check() {
            if let Some(diff) = outcome.diff.as_deref().filter(|d| !d.is_empty()) {
                let (shown, trimmed) = truncate_preview(diff, PREVIEW_LIMIT);
                writeln!(out, "--- preview diff ---")?;
                writeln!(out, "{}", shown)?;
                if trimmed {
                    writeln!(out, "...diff trimmed...")?;
                }
            }
        }
        if outcome.rewritten {
            if outcome.backup.is_some() {
                writeln!(out, " -> converted to UTF-8 (backup created)")?;
            } else {
                writeln!(out, " -> converted to UTF-8")?;
            }
        }

        if let Some(report) = report.as_deref_mut() {
            let path_str = path.to_string_lossy();
            let backup_str = outcome.backup.as_ref().map(|b| b.to_string_lossy());
            report.push(&ReportItem {
                path: &path_str,
                status: outcome.status,
                encoding: outcome.encoding_name(),
                rewritten: outcome.rewritten,
                backup: backup_str.as_deref(),
            })?;
        }
    }

    if !stats.any_issue() {
        writeln!(out, "{}", NOT_FOUND_MESSAGE)?;
    }
    Ok(stats)
}
