//! 错误类型
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// 文件读写失败。解码问题不算错误，均以 `Status` 表达。
#[derive(Debug, Error)]
pub enum FixError {
    #[error("failed to read {}", path.display())]
    Read { path: PathBuf, #[source] source: io::Error },
    #[error("failed to write backup {}", path.display())]
    Backup { path: PathBuf, #[source] source: io::Error },
    #[error("failed to write {}", path.display())]
    Write { path: PathBuf, #[source] source: io::Error },
}
