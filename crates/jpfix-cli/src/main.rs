use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use jpfix_core::{parse_exts, scan_and_report, select_detector, DetectorKind, FixOptions, JsonReport, DEFAULT_EXTS};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use tracing::info;

/// 命令行入口（基于 clap）
#[derive(Parser, Debug)]
#[command(name = "jpfix", version, about = "检测并修复非 UTF-8 编码的日文文本文件")]
struct Cli {
    /// 扫描根目录
    #[arg(long, default_value = ".")]
    root: PathBuf,

    /// 仅预览（未指定 --apply 时的默认行为）
    #[arg(long)]
    check: bool,

    /// 实际改写为 UTF-8
    #[arg(long)]
    apply: bool,

    /// 改写前创建 <文件>.bak 备份（需配合 --apply）
    #[arg(long)]
    backup: bool,

    /// 逗号分隔的扩展名列表；传空字符串则扫描所有文件
    #[arg(long, default_value_t = default_exts())]
    exts: String,

    /// 编码检测器：auto（有统计型则用之）、chardet、fallback
    #[arg(long, value_enum, default_value_t = DetectorArg::Auto)]
    detector: DetectorArg,

    /// 额外输出 JSON 报告（数组）到该文件
    #[arg(long)]
    report: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum DetectorArg {
    Auto,
    Chardet,
    Fallback,
}

impl From<DetectorArg> for DetectorKind {
    fn from(arg: DetectorArg) -> Self {
        match arg {
            DetectorArg::Auto => DetectorKind::Auto,
            DetectorArg::Chardet => DetectorKind::Statistical,
            DetectorArg::Fallback => DetectorKind::Fallback,
        }
    }
}

fn default_exts() -> String {
    let mut exts = DEFAULT_EXTS.to_vec();
    exts.sort_unstable();
    exts.join(",")
}

fn main() -> Result<()> {
    // 初始化日志（支持通过 RUST_LOG 控制等级，例如 info、debug）
    init_tracing();
    let cli = Cli::parse();

    let mut opts = build_options(&cli);
    // 与 --apply 同时给出时以 --apply 为准
    if cli.check && cli.apply {
        info!("--check ignored because --apply was given");
    }
    let root = std::path::absolute(&cli.root).with_context(|| format!("resolve root {}", cli.root.display()))?;
    let detector = select_detector(opts.detector);
    info!(root = %root.display(), apply = opts.apply, backup = opts.backup, detector = detector.name(), "starting scan");

    let mut report = match &cli.report {
        Some(path) => {
            let file = File::create(path).with_context(|| format!("create report file {}", path.display()))?;
            // 报告可能落在扫描根目录内，避免把写了一半的报告当作输入
            opts.skip_paths.push(std::fs::canonicalize(path).with_context(|| format!("resolve report file {}", path.display()))?);
            let writer: Box<dyn Write> = Box::new(BufWriter::new(file));
            Some(JsonReport::begin(writer).context("write report header")?)
        }
        None => None,
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let stats = scan_and_report(&root, &opts, detector.as_ref(), &mut out, report.as_mut()).context("scan failed")?;
    out.flush().ok();

    if let Some(report) = report {
        report.finish().context("finish report")?;
    }

    info!(
        files_visited = stats.files_visited,
        skipped_ascii = stats.skipped_ascii,
        convert = stats.convert,
        fail_to_decode = stats.fail_to_decode,
        unknown = stats.unknown,
        rewritten = stats.rewritten,
        backups = stats.backups,
        "scan finished"
    );
    Ok(())
}

fn build_options(cli: &Cli) -> FixOptions {
    FixOptions {
        apply: cli.apply,
        backup: cli.backup,
        exts: parse_exts(&cli.exts),
        detector: cli.detector.into(),
        skip_paths: Vec::new(),
    }
}

fn init_tracing() {
    use tracing_subscriber::{EnvFilter, FmtSubscriber};
    // 日志写 stderr，报告独占 stdout
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder().with_env_filter(env_filter).with_writer(io::stderr).finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}
