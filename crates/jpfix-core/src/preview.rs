//! 转换预览（统一 diff）
use similar::{ChangeTag, TextDiff};
use std::fmt::Write;
use std::path::Path;

/// check 模式下预览的最大字符数
pub const PREVIEW_LIMIT: usize = 2000;

/// 生成统一 diff：左侧为原字节按 UTF-8（有损）读出的样子，右侧为正确解码后的文本。
/// 两侧一致时返回空字符串。
pub fn unified_diff(path: &Path, encoding: &str, old: &str, new: &str) -> String {
    let diff = TextDiff::from_lines(old, new);
    let mut out = String::new();
    let mut hunks = diff.unified_diff();
    let hunks = hunks.context_radius(3);

    for (i, hunk) in hunks.iter_hunks().enumerate() {
        if i == 0 {
            writeln!(out, "--- {} (read as UTF-8)", path.display()).ok();
            writeln!(out, "+++ {} (decoded as {}, re-encoded UTF-8)", path.display(), encoding).ok();
        }
        writeln!(out, "{}", hunk.header()).ok();
        for change in hunk.iter_changes() {
            let sign = match change.tag() {
                ChangeTag::Delete => '-',
                ChangeTag::Insert => '+',
                ChangeTag::Equal => ' ',
            };
            writeln!(out, "{}{}", sign, strip_line_ending(change.value())).ok();
        }
    }

    // 与逐行输出保持一致：末尾不带换行
    if out.ends_with('\n') {
        out.pop();
    }
    out
}

fn strip_line_ending(line: &str) -> &str {
    line.strip_suffix("\r\n")
        .or_else(|| line.strip_suffix('\n'))
        .unwrap_or(line)
}

/// 按字符数截断预览；返回截断后的文本以及是否发生了截断
pub fn truncate_preview(diff: &str, limit: usize) -> (&str, bool) {
    match diff.char_indices().nth(limit) {
        Some((idx, _)) => (&diff[..idx], true),
        None => (diff, false),
    }
}
