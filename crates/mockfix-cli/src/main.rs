use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use mockfix_core::{rewrite_file, scan_and_report, RewriteOptions, ScanOptions};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::info;

/// 命令行入口（基于 clap）
#[derive(Parser, Debug)]
#[command(name = "mockfix", version, about = "前端测试套件维护工具：fetch mock 审计与断言改写")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// 扫描测试文件，列出缺少响应头的 fetch mock（只读）
    Scan {
        /// 扫描根目录
        #[arg(long, default_value = "frontend/src")]
        root: PathBuf,

        /// 规则文件路径（TOML）；不指定则使用内置规则
        #[arg(long)]
        rules: Option<PathBuf>,
    },
    /// 按顺序执行替换规则，原地改写单个测试文件
    Rewrite {
        /// 目标测试文件
        #[arg(long, default_value = "frontend/src/services/weatherApi.test.js")]
        target: PathBuf,

        /// 规则文件路径（TOML）；不指定则使用内置规则
        #[arg(long)]
        rules: Option<PathBuf>,

        /// 只打印 diff，不写回文件
        #[arg(long)]
        dry_run: bool,
    },
}

fn main() -> Result<()> {
    // 初始化日志（支持通过 RUST_LOG 控制等级，例如 info、debug）
    init_tracing();
    let cli = Cli::parse();

    // 报告走 stdout，日志走 stderr
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Scan { root, rules } => {
            info!(?root, "starting scan");
            let opts = ScanOptions { rules_path: rules };
            let stats = scan_and_report(&root, &mut out, &opts).context("scan failed")?;
            info!(
                files_found = stats.files_found,
                files_needing_fix = stats.files_needing_fix(),
                read_errors = stats.read_errors,
                "scan finished"
            );
        }
        Commands::Rewrite { target, rules, dry_run } => {
            info!(?target, dry_run, "starting rewrite");
            let opts = RewriteOptions { rules_path: rules, dry_run };
            let stats = rewrite_file(&target, &mut out, &opts)
                .with_context(|| format!("rewrite of {} failed", target.display()))?;
            info!(rules_attempted = stats.rules_attempted, changed = stats.changed, "rewrite finished");
        }
    }

    out.flush().ok();
    Ok(())
}

fn init_tracing() {
    use tracing_subscriber::{EnvFilter, FmtSubscriber};
    // 支持通过环境变量 RUST_LOG 控制日志等级，如：RUST_LOG=debug
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}
