/// Gemini API 客户端
///
/// 通过 `generateContent` REST 接口实现 [`InferenceService`]
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{ConfigError, ServiceError};
use crate::models::UsageStats;
use crate::services::{ExtractionRequest, InferenceResponse, InferenceService};
use crate::utils::logging::truncate_text;

/// 错误信息在日志中的最大长度
const MAX_ERROR_MESSAGE_LEN: usize = 300;

/// Gemini 客户端
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    api_base_url: String,
    model_name: String,
}

impl GeminiClient {
    /// 创建新的 Gemini 客户端
    ///
    /// API 密钥为空时直接失败，而不是等到第一次请求才鉴权失败
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        if config.gemini_api_key.trim().is_empty() {
            return Err(ConfigError::MissingApiKey {
                var_name: "GEMINI_API_KEY".to_string(),
            });
        }

        let http = reqwest::Client::builder()
            .build()
            .map_err(ConfigError::HttpClient)?;

        Ok(Self {
            http,
            api_key: config.gemini_api_key.clone(),
            api_base_url: config.gemini_api_base_url.clone(),
            model_name: config.gemini_model_name.clone(),
        })
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.api_base_url.trim_end_matches('/'),
            self.model_name
        )
    }
}

impl InferenceService for GeminiClient {
    async fn generate(
        &self,
        request: &ExtractionRequest,
    ) -> Result<InferenceResponse, ServiceError> {
        debug!("调用 Gemini API，模型: {}", self.model_name);

        let body = GenerateContentRequest::from_extraction(request);

        let response = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                warn!("Gemini API 调用失败: {}", e);
                ServiceError::request_failed(&self.model_name, e)
            })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ServiceError::request_failed(&self.model_name, e))?;

        if !status.is_success() {
            return Err(ServiceError::BadResponse {
                status: status.as_u16(),
                message: error_message(&text),
            });
        }

        debug!("Gemini API 调用成功");

        parse_generate_response(&text, &self.model_name)
    }
}

// ========== 请求体 ==========

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig<'a>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Part<'a> {
    Text {
        text: &'a str,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData<'a>,
    },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineData<'a> {
    mime_type: &'a str,
    data: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig<'a> {
    thinking_config: ThinkingConfig,
    response_mime_type: &'a str,
    response_schema: serde_json::Value,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ThinkingConfig {
    thinking_budget: u32,
}

impl<'a> GenerateContentRequest<'a> {
    fn from_extraction(request: &'a ExtractionRequest) -> Self {
        let image = request.image();
        Self {
            contents: vec![Content {
                role: "user",
                parts: vec![
                    Part::Text {
                        text: request.instruction(),
                    },
                    Part::InlineData {
                        inline_data: InlineData {
                            mime_type: image.mime_type,
                            data: image.to_base64(),
                        },
                    },
                ],
            }],
            generation_config: GenerationConfig {
                thinking_config: ThinkingConfig {
                    thinking_budget: request.thinking_budget(),
                },
                response_mime_type: request.response_mime_type(),
                response_schema: request.schema().to_json(),
            },
        }
    }
}

// ========== 响应体 ==========

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
    #[serde(default)]
    thought: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    #[serde(default)]
    prompt_token_count: u64,
    #[serde(default)]
    candidates_token_count: u64,
    #[serde(default)]
    total_token_count: u64,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// 解析 `generateContent` 响应：第一个候选的文本 + token 用量
fn parse_generate_response(body: &str, model: &str) -> Result<InferenceResponse, ServiceError> {
    let response: GenerateContentResponse =
        serde_json::from_str(body).map_err(ServiceError::DecodeFailed)?;

    let text: String = response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter(|p| !p.thought)
                .filter_map(|p| p.text)
                .collect()
        })
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(ServiceError::EmptyResponse {
            model: model.to_string(),
        });
    }

    let usage = response.usage_metadata.unwrap_or_default();

    Ok(InferenceResponse {
        text,
        usage: UsageStats {
            input_tokens: usage.prompt_token_count,
            output_tokens: usage.candidates_token_count,
            total_tokens: usage.total_token_count,
        },
    })
}

/// 从错误响应中取出 `error.message`，取不到时返回截断后的原始响应
fn error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => envelope.error.message,
        Err(_) => truncate_text(body.trim(), MAX_ERROR_MESSAGE_LEN),
    }
}
