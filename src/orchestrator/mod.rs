//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责批量处理和流程调度。
//!
//! ### `batch_processor` - 批量图片处理器
//! - 管理应用生命周期（初始化、运行）
//! - 扫描输入目录（Vec<PathBuf>）
//! - 创建输出目录（只创建一次，在任何写入之前）
//! - 控制并发数量（Semaphore）
//! - 合并各图片的结果，输出全局统计信息
//!
//! ## 层次关系
//!
//! ```text
//! batch_processor (处理 Vec<图片>)
//!     ↓
//! workflow::ImageFlow (处理单张图片)
//!     ↓
//! services (能力层：读图 / 推理 / 写结果)
//!     ↓
//! clients (GeminiClient)
//! ```

pub mod batch_processor;

pub use batch_processor::{App, ProcessingStats, RunReport};
