//! 目录遍历与扩展名过滤
use std::path::{Path, PathBuf};
use tracing::warn;
use walkdir::WalkDir;

use crate::options::ExtFilter;

/// 递归遍历 `root`，惰性产出扩展名匹配的普通文件路径
/// - 同一目录内按文件名排序，保证输出可复现
/// - 无法读取的目录项记录告警后跳过
/// - 不跟随符号链接，指向文件的符号链接也不产出：--apply 会覆盖写入，不应改动链接目标（它可能在根目录之外）
pub fn iter_files(root: &Path, exts: &ExtFilter) -> impl Iterator<Item = PathBuf> {
    let exts = exts.clone();
    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(e) => Some(e),
            Err(err) => {
                warn!(error = %err, "skipping unreadable entry");
                None
            }
        })
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(move |p| exts.matches(p))
}
