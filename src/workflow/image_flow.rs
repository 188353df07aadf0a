//! 图片处理流程 - 流程层
//!
//! 核心职责：定义"一张图片"的完整处理流程
//!
//! 流程顺序：
//! 1. 提取计分表（读图 → 推理 → 计费）
//! 2. 写入 `<输出目录>/<图片名>.json`
//!
//! 任何一步失败都只体现在本图片的 [`ImageOutcome::Failed`] 上

use tracing::{error, info};

use crate::error::{ExtractError, ExtractResult};
use crate::models::ExtractionResult;
use crate::services::{ExtractionService, InferenceService, ResultWriter};
use crate::workflow::image_ctx::ImageCtx;

/// 单张图片的处理结果
#[derive(Debug)]
pub enum ImageOutcome {
    /// 处理成功，结果已写入文件
    Success(ExtractionResult),
    /// 处理失败，该图片不进入聚合结果
    Failed(ExtractError),
}

/// 图片处理流程
///
/// - 不持有批量信息
/// - 只依赖业务能力（services）
pub struct ImageFlow<S> {
    extraction_service: ExtractionService<S>,
    result_writer: ResultWriter,
}

impl<S: InferenceService> ImageFlow<S> {
    pub fn new(extraction_service: ExtractionService<S>, result_writer: ResultWriter) -> Self {
        Self {
            extraction_service,
            result_writer,
        }
    }

    pub fn result_writer(&self) -> &ResultWriter {
        &self.result_writer
    }

    pub async fn run(&self, ctx: &ImageCtx) -> ImageOutcome {
        info!("{} 📷 正在处理 {}...", ctx, ctx.path.display());

        match self.extract_and_write(ctx).await {
            Ok(result) => {
                info!(
                    "{} ✓ 提取完成: {} 位玩家, {} tokens, 费用 {:.6}",
                    ctx,
                    result.data.player_count(),
                    result.usage.total_tokens,
                    result.cost.total_cost
                );
                ImageOutcome::Success(result)
            }
            Err(e) => {
                error!("{} ❌ 处理 {} 失败: {}", ctx, ctx.path.display(), e);
                ImageOutcome::Failed(e)
            }
        }
    }

    async fn extract_and_write(&self, ctx: &ImageCtx) -> ExtractResult<ExtractionResult> {
        let result = self.extraction_service.extract(&ctx.path).await?;
        self.result_writer.write(&ctx.path, &result).await?;
        Ok(result)
    }
}
