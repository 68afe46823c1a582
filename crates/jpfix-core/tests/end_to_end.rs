use encoding_rs::SHIFT_JIS;
use jpfix_core::{
    backup_path, scan_and_report, select_detector, strict_decode, DetectorKind, FallbackDetector, FixOptions,
    NOT_FOUND_MESSAGE,
};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const A_TEXT: &str = "// センサー初期化\nvoid setup() {\n  // 日本語のコメント\n}\n";
const C_TEXT: &str = "# 使い方\n\nこのファイルは UTF-8 です。\n";

fn fixture() -> (TempDir, Vec<u8>) {
    let dir = tempfile::tempdir().unwrap();
    let (sjis, _, unmappable) = SHIFT_JIS.encode(A_TEXT);
    assert!(!unmappable);
    let sjis = sjis.into_owned();
    fs::write(dir.path().join("a.txt"), &sjis).unwrap();
    fs::write(dir.path().join("b.py"), "print('ascii only')\n").unwrap();
    fs::write(dir.path().join("c.md"), C_TEXT).unwrap();
    (dir, sjis)
}

fn run(root: &Path, opts: &FixOptions) -> String {
    let mut out = Vec::new();
    scan_and_report(root, opts, &FallbackDetector, &mut out, None).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn check_reports_only_the_legacy_file() {
    let (dir, sjis) = fixture();

    let text = run(dir.path(), &FixOptions::default());
    let headers: Vec<&str> = text.lines().filter(|l| l.starts_with('[')).collect();
    assert_eq!(headers.len(), 1);
    assert!(headers[0].starts_with("[convert] "));
    assert!(headers[0].contains("a.txt"));
    assert!(headers[0].ends_with("(detected: Shift_JIS)"));
    assert!(!text.contains("b.py"));
    assert!(!text.contains("c.md"));
    assert!(text.contains("--- preview diff ---"));
    assert!(!text.contains(NOT_FOUND_MESSAGE));

    // check 模式不改动任何文件
    assert_eq!(fs::read(dir.path().join("a.txt")).unwrap(), sjis);
    assert!(!backup_path(&dir.path().join("a.txt")).exists());
}

#[test]
fn apply_with_backup_rewrites_and_keeps_original() {
    let (dir, sjis) = fixture();
    let a = dir.path().join("a.txt");

    let opts = FixOptions { apply: true, backup: true, ..FixOptions::default() };
    let text = run(dir.path(), &opts);
    assert!(text.contains(" -> converted to UTF-8 (backup created)"));
    assert!(!text.contains("--- preview diff ---"));

    assert_eq!(fs::read(backup_path(&a)).unwrap(), sjis);
    let rewritten = fs::read(&a).unwrap();
    let original_decoded = strict_decode(SHIFT_JIS, &sjis).unwrap();
    assert_eq!(std::str::from_utf8(&rewritten).unwrap(), original_decoded);
    assert_eq!(fs::read_to_string(dir.path().join("c.md")).unwrap(), C_TEXT);

    // 第二遍：已全部为 UTF-8，输出汇总提示
    let opts = FixOptions { apply: true, ..FixOptions::default() };
    assert_eq!(run(dir.path(), &opts), format!("{}\n", NOT_FOUND_MESSAGE));
}

#[test]
fn apply_without_backup_creates_no_bak() {
    let (dir, _) = fixture();
    let a = dir.path().join("a.txt");

    let opts = FixOptions { apply: true, ..FixOptions::default() };
    let text = run(dir.path(), &opts);
    assert!(text.contains(" -> converted to UTF-8\n"));
    assert!(!backup_path(&a).exists());
    assert_eq!(fs::read(&a).unwrap(), A_TEXT.as_bytes());
}

#[test]
fn default_detector_handles_the_scenario() {
    let (dir, _) = fixture();
    let detector = select_detector(DetectorKind::Auto);
    let mut out = Vec::new();
    let stats = scan_and_report(dir.path(), &FixOptions::default(), detector.as_ref(), &mut out, None).unwrap();
    assert_eq!(stats.files_visited, 3);
    assert_eq!(stats.skipped_ascii, 1);
    assert_eq!(stats.ok_utf8, 1);
    assert_eq!(stats.convert, 1);
}
