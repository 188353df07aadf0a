//! 计分卡提取命令行入口
//!
//! 进度和日志通过 tracing 输出到 stderr，stdout 只有结果目录提示和聚合 JSON。

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use scorecard_extract::utils::logging;
use scorecard_extract::{App, Config};

/// 从计分卡图片中批量提取计分表
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// 图片目录（默认取 INPUT_DIR 或 images）
    input_dir: Option<PathBuf>,

    /// 同时处理的图片数量（默认取 MAX_CONCURRENT_IMAGES 或 1）
    #[arg(long)]
    concurrency: Option<usize>,

    /// 显示详细日志
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn apply(self, config: &mut Config) {
        if let Some(input_dir) = self.input_dir {
            config.input_dir = input_dir;
        }
        if let Some(concurrency) = self.concurrency {
            config.max_concurrent_images = concurrency;
        }
        if self.verbose {
            config.verbose_logging = true;
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // 加载配置
    let mut config = Config::from_env();
    Cli::parse().apply(&mut config);

    // 初始化日志
    logging::init(config.verbose_logging);

    // 初始化并运行应用
    let report = App::initialize(config)?.run().await?;

    println!(
        "Tables extracted and saved to {}/ folder",
        report.output_dir.display()
    );
    println!("{}", serde_json::to_string_pretty(&report.results)?);

    Ok(())
}
