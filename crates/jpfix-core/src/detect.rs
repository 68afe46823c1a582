//! 编码检测（策略：统计型 / 固定候选回退）
use encoding_rs::{Encoding, EUC_JP, ISO_2022_JP, SHIFT_JIS, UTF_8};
use std::borrow::Cow;
use tracing::debug;

use crate::options::DetectorKind;

/// 回退检测的候选编码，顺序即优先级（UTF-8 优先，其次三种日文旧编码）
/// 调整顺序会改变歧义字节序列的检测结果
pub fn fallback_candidates() -> [&'static Encoding; 4] {
    [UTF_8, SHIFT_JIS, EUC_JP, ISO_2022_JP]
}

/// “根据字节猜测编码”的能力
pub trait EncodingDetector {
    /// 检测器名称（日志用）
    fn name(&self) -> &'static str;
    /// 给出最可能的编码；无法判断时返回 None
    fn detect(&self, bytes: &[u8]) -> Option<&'static Encoding>;
}

/// 严格解码：遇到非法序列即失败，不做 BOM 处理
pub fn strict_decode<'a>(encoding: &'static Encoding, bytes: &'a [u8]) -> Option<Cow<'a, str>> {
    encoding.decode_without_bom_handling_and_without_replacement(bytes)
}

/// 按固定候选列表依次尝试严格解码，返回第一个成功的编码
#[derive(Debug, Default, Clone, Copy)]
pub struct FallbackDetector;

impl EncodingDetector for FallbackDetector {
    fn name(&self) -> &'static str {
        "fallback"
    }

    fn detect(&self, bytes: &[u8]) -> Option<&'static Encoding> {
        fallback_candidates()
            .into_iter()
            .find(|enc| strict_decode(enc, bytes).is_some())
    }
}

/// 基于 chardetng 的统计型检测器；任何猜测结果都被接受
#[cfg(feature = "chardetng")]
#[derive(Debug, Default, Clone, Copy)]
pub struct StatisticalDetector;

#[cfg(feature = "chardetng")]
impl EncodingDetector for StatisticalDetector {
    fn name(&self) -> &'static str {
        "chardetng"
    }

    fn detect(&self, bytes: &[u8]) -> Option<&'static Encoding> {
        let mut det = chardetng::EncodingDetector::new();
        det.feed(bytes, true);
        Some(det.guess(None, true))
    }
}

/// 按策略选择检测器；统计型不可用时降级为回退，不报错
pub fn select_detector(kind: DetectorKind) -> Box<dyn EncodingDetector> {
    let det: Box<dyn EncodingDetector> = match kind {
        DetectorKind::Fallback => Box::new(FallbackDetector),
        DetectorKind::Auto | DetectorKind::Statistical => statistical_or_fallback(kind),
    };
    debug!(detector = det.name(), "encoding detector selected");
    det
}

#[cfg(feature = "chardetng")]
fn statistical_or_fallback(_kind: DetectorKind) -> Box<dyn EncodingDetector> {
    Box::new(StatisticalDetector)
}

#[cfg(not(feature = "chardetng"))]
fn statistical_or_fallback(kind: DetectorKind) -> Box<dyn EncodingDetector> {
    if kind == DetectorKind::Statistical {
        tracing::warn!("statistical detector not compiled in, using fallback candidates");
    }
    Box::new(FallbackDetector)
}
