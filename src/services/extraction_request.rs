//! 提取请求构建 - 业务能力层
//!
//! 一张图片对应一个请求：固定提示词 + 图片 + 计分表 schema

use crate::models::{ResponseSchema, SCORE_TABLE_SCHEMA};
use crate::services::image_encoder::ImagePayload;

/// 固定提示词
pub const EXTRACTION_INSTRUCTION: &str = "Extract the scoring table from this Wingspan game image. \
For each row labeled 'Multi-player', 'Vogels', 'Bonuskaarten', '\"Einde ronde\"-Doelen', 'Eieren', \
'Voedsel op kaarten', 'Weggestopte kaarten', 'Totaal', return the list of values. \
For Multi-player return strings, for all others return numbers.";

/// 要求服务返回 JSON 而不是自由文本
pub const RESPONSE_MIME_TYPE: &str = "application/json";

/// 提取请求
///
/// 关闭扩展推理（thinking budget = 0）以降低延迟和费用
#[derive(Debug, Clone)]
pub struct ExtractionRequest {
    instruction: &'static str,
    image: ImagePayload,
    schema: ResponseSchema,
    thinking_budget: u32,
}

impl ExtractionRequest {
    pub fn new(image: ImagePayload) -> Self {
        Self {
            instruction: EXTRACTION_INSTRUCTION,
            image,
            schema: SCORE_TABLE_SCHEMA,
            thinking_budget: 0,
        }
    }

    pub fn instruction(&self) -> &str {
        self.instruction
    }

    pub fn image(&self) -> &ImagePayload {
        &self.image
    }

    pub fn schema(&self) -> &ResponseSchema {
        &self.schema
    }

    pub fn thinking_budget(&self) -> u32 {
        self.thinking_budget
    }

    pub fn response_mime_type(&self) -> &'static str {
        RESPONSE_MIME_TYPE
    }
}
