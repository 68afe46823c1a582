//! JSON 报告（流式写出 JSON 数组）
use anyhow::Result;
use std::io::Write;

use crate::types::ReportItem;

/// 以 `[`、`,`、`]` 手工分隔，逐条写出，不在内存中累积
pub struct JsonReport<W: Write> {
    out: W,
    first: bool,
}

impl<W: Write> JsonReport<W> {
    /// 写入数组起始符
    pub fn begin(mut out: W) -> Result<Self> {
        write!(out, "[")?;
        Ok(Self { out, first: true })
    }

    pub fn push(&mut self, item: &ReportItem<'_>) -> Result<()> {
        if !self.first { write!(self.out, ",")?; } else { self.first = false; }
        serde_json::to_writer(&mut self.out, item)?;
        Ok(())
    }

    /// 写入数组结束符并冲刷，返回底层 writer
    pub fn finish(mut self) -> Result<W> {
        write!(self.out, "]")?;
        self.out.flush()?;
        Ok(self.out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Status;

    #[test]
    fn writes_a_json_array() {
        let mut report = JsonReport::begin(Vec::new()).unwrap();
        report
            .push(&ReportItem { path: "a.txt", status: Status::Convert, encoding: Some("Shift_JIS"), rewritten: true, backup: Some("a.txt.bak") })
            .unwrap();
        report
            .push(&ReportItem { path: "b.txt", status: Status::Unknown, encoding: None, rewritten: false, backup: None })
            .unwrap();
        let buf = report.finish().unwrap();

        let v: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(v[0]["status"], "convert");
        assert_eq!(v[0]["encoding"], "Shift_JIS");
        assert_eq!(v[0]["backup"], "a.txt.bak");
        assert_eq!(v[1]["status"], "unknown");
        assert!(v[1]["encoding"].is_null());
    }

    #[test]
    fn empty_report_is_empty_array() {
        let buf = JsonReport::begin(Vec::new()).unwrap().finish().unwrap();
        assert_eq!(buf, b"[]");
    }
}
