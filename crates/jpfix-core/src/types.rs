//! 公共类型（对外暴露）
use encoding_rs::Encoding;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// 单个文件的处理结论
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    /// 已是 UTF-8 且含日文，无需处理
    OkUtf8,
    /// 解码成功但不含日文，保持原样
    NoJapanese,
    /// 含日文且非 UTF-8，建议（或已）转换
    Convert,
    /// 猜到了编码但按该编码解码失败
    FailToDecode,
    /// 非 ASCII 内容却猜不出编码
    Unknown,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::OkUtf8 => "ok-utf8",
            Status::NoJapanese => "no-japanese",
            Status::Convert => "convert",
            Status::FailToDecode => "fail-to-decode",
            Status::Unknown => "unknown",
        }
    }

    /// 是否需要在报告中逐行列出
    pub fn is_reported(&self) -> bool {
        matches!(self, Status::Convert | Status::FailToDecode | Status::Unknown)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 文件处理结果
#[derive(Debug, Clone)]
pub struct Outcome {
    pub status: Status,
    /// 检测到的编码；`unknown` 时为空
    pub encoding: Option<&'static Encoding>,
    /// 预览 diff（仅 `convert`）
    pub diff: Option<String>,
    /// 是否已改写为 UTF-8
    pub rewritten: bool,
    /// 若创建了备份，备份文件路径
    pub backup: Option<PathBuf>,
}

impl Outcome {
    pub fn encoding_name(&self) -> Option<&'static str> {
        self.encoding.map(|e| e.name())
    }
}

/// JSON 报告中的单个元素
#[derive(Debug, Clone, Serialize)]
pub struct ReportItem<'a> {
    pub path: &'a str,
    pub status: Status,
    pub encoding: Option<&'static str>,
    pub rewritten: bool,
    pub backup: Option<&'a str>,
}
