/// 日志工具模块
///
/// 提供日志初始化以及格式化输出的辅助函数。日志写到 stderr，
/// stdout 只留给最终的聚合 JSON。
use std::path::Path;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::orchestrator::ProcessingStats;

/// 初始化日志
///
/// `RUST_LOG` 优先；否则默认 `info`，`verbose` 时为 `debug`
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 计分卡提取启动 - {}", config.gemini_model_name);
    info!("📁 输入目录: {}", config.input_dir.display());
    info!("📂 输出目录: {}", config.output_dir().display());
    info!(
        "💰 单价: 输入 {} / 输出 {} (每百万 tokens)",
        config.input_cost_per_million, config.output_cost_per_million
    );
    info!("{}", "=".repeat(60));
}

/// 记录图片扫描结果
///
/// # 参数
/// - `total`: 图片总数
/// - `max_concurrent`: 最大并发数
pub fn log_images_found(total: usize, max_concurrent: usize) {
    info!("✓ 找到 {} 张待处理的图片", total);
    if max_concurrent > 1 {
        info!("📋 最多同时处理 {} 张", max_concurrent);
    }
}

/// 打印最终统计信息
pub fn print_final_stats(stats: &ProcessingStats, output_dir: &Path) {
    info!("{}", "=".repeat(60));
    info!("📊 全部处理完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 成功: {}/{}", stats.success, stats.total);
    info!("❌ 失败: {}", stats.failed);
    info!(
        "🔢 Tokens: 输入 {} / 输出 {} / 合计 {}",
        stats.usage.input_tokens, stats.usage.output_tokens, stats.usage.total_tokens
    );
    info!("💰 总费用: {:.6}", stats.total_cost);
    info!("{}", "=".repeat(60));
    info!("结果已保存至: {}", output_dir.display());
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大字符数
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("short", 10), "short");
        assert_eq!(truncate_text("计分卡提取工具", 3), "计分卡...");
    }
}
