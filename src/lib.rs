//! # Scorecard Extract
//!
//! 批量从 Wingspan（展翅翱翔）计分卡图片中提取计分表，并记录 token 用量和费用
//!
//! ## 架构设计
//!
//! ### ① 客户端层（Clients）
//! - `clients/` - 外部推理服务的具体实现
//! - `GeminiClient` - Gemini `generateContent` 接口
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，只处理单张图片
//! - `image_encoder` - 读取图片
//! - `ExtractionRequest` - 固定提示词 + 图片 + schema
//! - `ExtractionService` - 调用推理服务、解析计分表、计算费用
//! - `ResultWriter` - 写结果 JSON
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一张图片"的完整处理流程
//! - `ImageCtx` - 上下文封装（文件名 + 序号）
//! - `ImageFlow` - 流程编排（提取 → 写入）
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/batch_processor` - 批量图片处理器，管理并发和统计
//!
//! ## 模块结构

pub mod clients;
pub mod config;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use clients::GeminiClient;
pub use config::Config;
pub use error::{ConfigError, ExtractError, ExtractResult, ServiceError};
pub use models::{AggregateResults, CostEstimate, ExtractionResult, Pricing, ScoreTable, UsageStats};
pub use orchestrator::{App, ProcessingStats, RunReport};
pub use services::{ExtractionRequest, InferenceResponse, InferenceService};
pub use workflow::{ImageCtx, ImageFlow, ImageOutcome};
