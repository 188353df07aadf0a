//! 计分表提取服务 - 业务能力层
//!
//! 只负责"一张图片 → 一份提取结果"，不关心文件写入和批量流程
//!
//! 步骤：读图片 → 构建请求 → 调用推理服务 → 解析计分表 → 计算费用

use std::path::Path;
use tracing::{debug, warn};

use crate::error::{ExtractError, ExtractResult};
use crate::models::{CostEstimate, ExtractionResult, Pricing, ScoreTable};
use crate::services::extraction_request::ExtractionRequest;
use crate::services::image_encoder::read_image;
use crate::services::inference::InferenceService;

/// 计分表提取服务
pub struct ExtractionService<S> {
    service: S,
    pricing: Pricing,
}

impl<S: InferenceService> ExtractionService<S> {
    pub fn new(service: S, pricing: Pricing) -> Self {
        Self { service, pricing }
    }

    /// 提取单张图片的计分表
    pub async fn extract(&self, image_path: &Path) -> ExtractResult<ExtractionResult> {
        let image = read_image(image_path).await?;
        let request = ExtractionRequest::new(image);

        let response = self.service.generate(&request).await?;
        debug!(
            "推理完成: 输入 {} / 输出 {} tokens",
            response.usage.input_tokens, response.usage.output_tokens
        );

        let data: ScoreTable = serde_json::from_str(&response.text)
            .map_err(|source| ExtractError::InvalidPayload { source })?;

        let misaligned = data.misaligned_rows();
        if !misaligned.is_empty() {
            warn!(
                "{}: 以下行的列数与玩家数 ({}) 不一致: {:?}",
                image_path.display(),
                data.player_count(),
                misaligned
            );
        }

        let cost = CostEstimate::compute(&response.usage, &self.pricing);

        Ok(ExtractionResult {
            data,
            usage: response.usage,
            cost,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ServiceError;
    use crate::models::UsageStats;
    use crate::services::inference::InferenceResponse;

    struct FixedService {
        text: &'static str,
    }

    impl InferenceService for FixedService {
        async fn generate(
            &self,
            request: &ExtractionRequest,
        ) -> Result<InferenceResponse, ServiceError> {
            assert_eq!(request.image().mime_type, "image/png");
            Ok(InferenceResponse {
                text: self.text.to_string(),
                usage: UsageStats {
                    input_tokens: 1_000,
                    output_tokens: 200,
                    total_tokens: 1_200,
                },
            })
        }
    }

    const TABLE: &str = r#"{"multi_player":["Alice","Bob"],"vogels":[5,7],"bonuskaarten":[3,4],
        "einde_ronde_doelen":[8,6],"eieren":[10,12],"voedsel_op_kaarten":[2,0],
        "weggestopte_kaarten":[4,5],"totaal":[32,34]}"#;

    fn write_image(dir: &Path) -> std::path::PathBuf {
        let path = dir.join("round1.png");
        std::fs::write(&path, b"png").unwrap();
        path
    }

    #[tokio::test]
    async fn test_extract_computes_cost() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_image(dir.path());
        let service = ExtractionService::new(FixedService { text: TABLE }, Pricing::default());

        let result = service.extract(&path).await.unwrap();

        assert_eq!(result.data.multi_player, vec!["Alice", "Bob"]);
        assert_eq!(result.usage.total_tokens, 1_200);
        assert!((result.cost.input_cost - 0.0001).abs() < 1e-12);
        assert!((result.cost.output_cost - 0.00008).abs() < 1e-12);
    }

    #[tokio::test]
    async fn test_non_conforming_payload() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_image(dir.path());
        let service = ExtractionService::new(
            FixedService {
                text: r#"{"multi_player":["Alice"]}"#,
            },
            Pricing::default(),
        );

        let err = service.extract(&path).await.unwrap_err();
        assert!(matches!(err, ExtractError::InvalidPayload { .. }));
    }

    #[tokio::test]
    async fn test_missing_image_skips_service() {
        let dir = tempfile::tempdir().unwrap();
        let service = ExtractionService::new(FixedService { text: TABLE }, Pricing::default());

        let err = service
            .extract(&dir.path().join("missing.png"))
            .await
            .unwrap_err();
        assert!(matches!(err, ExtractError::FileAccess { .. }));
    }
}
