//! 单文件处理：检测 → 解码 → 日文判定 → （可选）备份并改写为 UTF-8
use encoding_rs::{Encoding, UTF_8};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::detect::{strict_decode, EncodingDetector};
use crate::error::FixError;
use crate::options::FixOptions;
use crate::preview::unified_diff;
use crate::script::contains_japanese;
use crate::types::{Outcome, Status};

/// 纯判定结果（不涉及 IO）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classified {
    pub status: Status,
    pub encoding: Option<&'static Encoding>,
    /// 仅 `convert` 时给出：正确解码后的文本（即改写后的 UTF-8 内容）
    pub converted: Option<String>,
}

impl Classified {
    fn bare(status: Status, encoding: Option<&'static Encoding>) -> Self {
        Self { status, encoding, converted: None }
    }
}

/// 对原始字节做判定；纯 ASCII 返回 None（跳过）
pub fn classify(bytes: &[u8], detector: &dyn EncodingDetector) -> Option<Classified> {
    if bytes.is_ascii() {
        return None;
    }
    let Some(enc) = detector.detect(bytes) else {
        return Some(Classified::bare(Status::Unknown, None));
    };
    let Some(decoded) = strict_decode(enc, bytes) else {
        return Some(Classified::bare(Status::FailToDecode, Some(enc)));
    };

    let japanese = contains_japanese(&decoded);
    let classified = if japanese && enc == UTF_8 {
        Classified::bare(Status::OkUtf8, Some(enc))
    } else if japanese {
        Classified { status: Status::Convert, encoding: Some(enc), converted: Some(decoded.into_owned()) }
    } else {
        Classified::bare(Status::NoJapanese, Some(enc))
    };
    Some(classified)
}

/// 备份路径：在完整文件名后追加 `.bak`（`a.txt` → `a.txt.bak`）
pub fn backup_path(path: &Path) -> PathBuf {
    let mut s: OsString = path.as_os_str().to_owned();
    s.push(".bak");
    PathBuf::from(s)
}

/// 处理单个文件
/// - 纯 ASCII：返回 Ok(None)
/// - `convert` 且 `opts.apply`：先按需备份，再覆盖写入 UTF-8
/// - 读写失败以 `FixError` 返回，由调用方决定是否中止
pub fn process_file(path: &Path, detector: &dyn EncodingDetector, opts: &FixOptions) -> Result<Option<Outcome>, FixError> {
    let bytes = fs::read(path).map_err(|source| FixError::Read { path: path.to_path_buf(), source })?;

    let Some(classified) = classify(&bytes, detector) else {
        debug!(path = %path.display(), "ascii only, skipped");
        return Ok(None);
    };
    debug!(
        path = %path.display(),
        status = %classified.status,
        encoding = classified.encoding.map(|e| e.name()),
        detector = detector.name(),
        "classified"
    );

    let Classified { status, encoding, converted } = classified;
    let mut outcome = Outcome { status, encoding, diff: None, rewritten: false, backup: None };

    if let (Some(text), Some(enc)) = (converted, encoding) {
        if opts.apply {
            if opts.backup {
                let bak = backup_path(path);
                fs::copy(path, &bak).map_err(|source| FixError::Backup { path: bak.clone(), source })?;
                outcome.backup = Some(bak);
            }
            fs::write(path, text.as_bytes()).map_err(|source| FixError::Write { path: path.to_path_buf(), source })?;
            outcome.rewritten = true;
        }
        let old_view = String::from_utf8_lossy(&bytes);
        outcome.diff = Some(unified_diff(path, enc.name(), &old_view, &text));
    }

    Ok(Some(outcome))
}
