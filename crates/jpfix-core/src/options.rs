//! 运行选项、扩展名过滤与统计信息（模块）
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::types::Status;

/// 默认扫描的扩展名（小写，带前导点）
pub const DEFAULT_EXTS: &[&str] = &[
    ".c", ".cpp", ".h", ".hpp", ".ino", ".py", ".md", ".txt", ".json", ".yaml", ".yml",
];

/// 扩展名过滤器；集合为空时匹配所有文件
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtFilter {
    exts: BTreeSet<String>,
}

impl ExtFilter {
    pub fn new<I, S>(exts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let exts = exts
            .into_iter()
            .filter_map(|e| normalize_ext(e.as_ref()))
            .collect();
        Self { exts }
    }

    /// 默认扩展名集合
    pub fn default_set() -> Self {
        Self::new(DEFAULT_EXTS.iter().copied())
    }

    pub fn is_empty(&self) -> bool {
        self.exts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.exts.iter().map(String::as_str)
    }

    /// 按文件名最后一个点后的后缀匹配（大小写不敏感）
    /// 以点开头且无其他点的文件名（如 `.bashrc`）视为无扩展名
    pub fn matches(&self, path: &Path) -> bool {
        if self.exts.is_empty() {
            return true;
        }
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) => self.exts.contains(&format!(".{}", ext.to_lowercase())),
            None => false,
        }
    }
}

fn normalize_ext(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(format!(".{}", trimmed.trim_start_matches('.').to_lowercase()))
}

/// 解析逗号分隔的扩展名列表，例如 `"c,.CPP,md"`
pub fn parse_exts(list: &str) -> ExtFilter {
    ExtFilter::new(list.split(','))
}

/// 编码检测策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DetectorKind {
    /// 统计型检测器可用则用之，否则回退
    #[default]
    Auto,
    /// 强制使用统计型检测器（未编译时降级为回退）
    Statistical,
    /// 固定候选列表：UTF-8 → Shift_JIS → EUC-JP → ISO-2022-JP
    Fallback,
}

/// 运行选项
#[derive(Debug, Clone)]
pub struct FixOptions {
    /// 是否实际改写文件；为 false 时即为 check（预览）模式
    pub apply: bool,
    /// 改写前是否复制 `<path>.bak`（仅在 apply 时生效）
    pub backup: bool,
    /// 扩展名过滤
    pub exts: ExtFilter,
    /// 编码检测策略
    pub detector: DetectorKind,
    /// 不参与扫描的文件（已规范化的绝对路径），例如落在扫描根目录内的 JSON 报告
    pub skip_paths: Vec<PathBuf>,
}

impl FixOptions {
    pub fn check(&self) -> bool {
        !self.apply
    }

    /// 路径是否在排除列表中；按规范化路径比较
    pub fn is_skipped(&self, path: &Path) -> bool {
        if self.skip_paths.is_empty() {
            return false;
        }
        match std::fs::canonicalize(path) {
            Ok(p) => self.skip_paths.contains(&p),
            Err(_) => false,
        }
    }
}

impl Default for FixOptions {
    fn default() -> Self {
        Self {
            apply: false,
            backup: false,
            exts: ExtFilter::default_set(),
            detector: DetectorKind::Auto,
            skip_paths: Vec::new(),
        }
    }
}

/// 扫描统计（显式累加器，由扫描循环返回）
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ScanStats {
    pub files_visited: usize,
    pub skipped_ascii: usize,
    pub ok_utf8: usize,
    pub no_japanese: usize,
    pub convert: usize,
    pub fail_to_decode: usize,
    pub unknown: usize,
    pub rewritten: usize,
    pub backups: usize,
}

impl ScanStats {
    pub(crate) fn record(&mut self, status: Status) {
        match status {
            Status::OkUtf8 => self.ok_utf8 += 1,
            Status::NoJapanese => self.no_japanese += 1,
            Status::Convert => self.convert += 1,
            Status::FailToDecode => self.fail_to_decode += 1,
            Status::Unknown => self.unknown += 1,
        }
    }

    /// 是否发现需要报告的文件（convert / fail-to-decode / unknown）
    pub fn any_issue(&self) -> bool {
        self.convert + self.fail_to_decode + self.unknown > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_exts_normalizes_case_and_dots() {
        let f = parse_exts("c,.CPP, md ,,");
        let got: Vec<&str> = f.iter().collect();
        assert_eq!(got, vec![".c", ".cpp", ".md"]);
    }

    #[test]
    fn matches_is_case_insensitive() {
        let f = parse_exts(".txt");
        assert!(f.matches(Path::new("dir/note.TXT")));
        assert!(!f.matches(Path::new("dir/note.rs")));
        assert!(!f.matches(Path::new("dir/Makefile")));
        assert!(!f.matches(Path::new("dir/.txt")));
    }

    #[test]
    fn empty_filter_matches_everything() {
        let f = parse_exts("");
        assert!(f.is_empty());
        assert!(f.matches(Path::new("anything")));
        assert!(f.matches(Path::new("a.bin")));
    }

    #[test]
    fn default_set_has_all_default_exts() {
        let f = ExtFilter::default_set();
        for e in DEFAULT_EXTS {
            assert!(f.matches(Path::new(&format!("x{}", e))));
        }
        assert!(f.matches(Path::new("sketch.INO")));
    }

    #[test]
    fn any_issue_counts_only_reported_statuses() {
        let mut s = ScanStats::default();
        s.record(Status::OkUtf8);
        s.record(Status::NoJapanese);
        assert!(!s.any_issue());
        s.record(Status::Unknown);
        assert!(s.any_issue());
    }
}
