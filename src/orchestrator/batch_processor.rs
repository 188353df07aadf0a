//! 批量图片处理器 - 编排层
//!
//! ## 核心功能
//!
//! 1. **应用初始化**：根据配置创建推理客户端和处理流程
//! 2. **图片扫描**：列出输入目录中所有计分卡图片
//! 3. **输出目录**：在任何写入之前创建一次（已存在不报错）
//! 4. **并发控制**：使用 Semaphore 限制同时处理的图片数量，默认 1（顺序处理）
//! 5. **结果合并**：所有任务结束后再合并进聚合结果，失败的图片不出现在结果里
//! 6. **全局统计**：成功/失败数量、token 与费用合计
//!
//! 单张图片的失败不会中断批次，也不会影响其他图片的结果文件。

use anyhow::{Context, Result};
use futures::future::join_all;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{error, info, warn};

use crate::clients::GeminiClient;
use crate::config::Config;
use crate::error::ExtractError;
use crate::models::{discover_images, AggregateResults, UsageStats};
use crate::services::{ExtractionService, InferenceService, ResultWriter};
use crate::utils::logging::{log_images_found, log_startup, print_final_stats};
use crate::workflow::{ImageCtx, ImageFlow, ImageOutcome};

/// 应用主结构
pub struct App<S> {
    config: Config,
    flow: Arc<ImageFlow<S>>,
}

/// 处理统计
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ProcessingStats {
    pub success: usize,
    pub failed: usize,
    pub total: usize,
    pub usage: UsageStats,
    pub total_cost: f64,
}

/// 一次运行的结果
#[derive(Debug)]
pub struct RunReport {
    /// 文件名 → 提取结果（只含成功的图片）
    pub results: AggregateResults,
    /// 处理失败的文件名
    pub failed: Vec<String>,
    pub stats: ProcessingStats,
    pub output_dir: PathBuf,
}

impl App<GeminiClient> {
    /// 使用 Gemini 客户端初始化应用
    pub fn initialize(config: Config) -> Result<Self> {
        let client = GeminiClient::new(&config).context("推理客户端初始化失败")?;
        info!("🤖 推理客户端已就绪，模型: {}", client.model_name());
        Ok(Self::with_service(config, client))
    }
}

impl<S: InferenceService + 'static> App<S> {
    /// 使用任意推理服务初始化应用
    pub fn with_service(config: Config, service: S) -> Self {
        let extraction_service = ExtractionService::new(service, config.pricing());
        let result_writer = ResultWriter::new(config.output_dir());
        let flow = Arc::new(ImageFlow::new(extraction_service, result_writer));
        Self { config, flow }
    }

    /// 运行应用主逻辑
    pub async fn run(&self) -> Result<RunReport> {
        log_startup(&self.config);

        let images = discover_images(&self.config.input_dir, &self.config.image_extension)
            .await
            .context("扫描输入目录失败")?;

        let writer = self.flow.result_writer();
        writer
            .ensure_dir()
            .await
            .context("无法创建输出目录")?;
        let output_dir = writer.output_dir().to_path_buf();

        if images.is_empty() {
            warn!(
                "⚠️ {} 中没有找到 *.{} 图片",
                self.config.input_dir.display(),
                self.config.image_extension
            );
        } else {
            log_images_found(images.len(), self.concurrency());
        }

        let outcomes = self.process_all_images(images).await?;

        let mut report = RunReport {
            results: AggregateResults::new(),
            failed: Vec::new(),
            stats: ProcessingStats {
                total: outcomes.len(),
                ..Default::default()
            },
            output_dir,
        };

        for (ctx, outcome) in outcomes {
            match outcome {
                ImageOutcome::Success(result) => {
                    report.stats.success += 1;
                    report.stats.usage.input_tokens += result.usage.input_tokens;
                    report.stats.usage.output_tokens += result.usage.output_tokens;
                    report.stats.usage.total_tokens += result.usage.total_tokens;
                    report.stats.total_cost += result.cost.total_cost;
                    report.results.insert(ctx.file_name, result);
                }
                ImageOutcome::Failed(_) => {
                    report.stats.failed += 1;
                    report.failed.push(ctx.file_name);
                }
            }
        }

        print_final_stats(&report.stats, &report.output_dir);

        Ok(report)
    }

    fn concurrency(&self) -> usize {
        self.config.max_concurrent_images.max(1)
    }

    /// 处理所有图片，按扫描顺序返回每张图片的结果
    async fn process_all_images(
        &self,
        images: Vec<PathBuf>,
    ) -> Result<Vec<(ImageCtx, ImageOutcome)>> {
        let semaphore = Arc::new(Semaphore::new(self.concurrency()));
        let total = images.len();
        let mut handles = Vec::with_capacity(total);

        for (idx, path) in images.iter().enumerate() {
            let ctx = ImageCtx::new(path, idx + 1, total);
            let permit = semaphore.clone().acquire_owned().await?;
            let flow = Arc::clone(&self.flow);

            let task_ctx = ctx.clone();
            let handle = tokio::spawn(async move {
                let _permit = permit;
                flow.run(&task_ctx).await
            });
            handles.push((ctx, handle));
        }

        let (contexts, handles): (Vec<_>, Vec<_>) = handles.into_iter().unzip();
        let joined = join_all(handles).await;

        let mut outcomes = Vec::with_capacity(total);
        for (ctx, joined) in contexts.into_iter().zip(joined) {
            match joined {
                Ok(outcome) => outcomes.push((ctx, outcome)),
                Err(e) => {
                    // 任务 panic 只算作该图片失败
                    error!("{} 任务执行失败: {}", ctx, e);
                    let outcome = ImageOutcome::Failed(ExtractError::TaskAborted(e.to_string()));
                    outcomes.push((ctx, outcome));
                }
            }
        }

        Ok(outcomes)
    }
}
