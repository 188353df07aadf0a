//! 推理服务接口
//!
//! 外部多模态模型只通过这个 trait 接入，方便替换实现或在测试中 mock

use std::future::Future;

use crate::error::ServiceError;
use crate::models::UsageStats;
use crate::services::extraction_request::ExtractionRequest;

/// 推理服务的一次响应
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InferenceResponse {
    /// 符合 schema 的 JSON 文本
    pub text: String,
    pub usage: UsageStats,
}

/// 推理服务
///
/// 实现方只发一次请求，不做重试
pub trait InferenceService: Send + Sync {
    fn generate(
        &self,
        request: &ExtractionRequest,
    ) -> impl Future<Output = Result<InferenceResponse, ServiceError>> + Send;
}
