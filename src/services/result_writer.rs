//! 结果写入服务 - 业务能力层
//!
//! 只负责"把一份提取结果写成 JSON 文件"，不关心流程

use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{ExtractError, ExtractResult};
use crate::models::ExtractionResult;

/// 结果写入服务
///
/// 每张图片写一个 `<输出目录>/<图片名去扩展名>.json`，已存在则覆盖
pub struct ResultWriter {
    output_dir: PathBuf,
}

impl ResultWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// 创建输出目录（已存在时不报错）
    pub async fn ensure_dir(&self) -> ExtractResult<()> {
        tokio::fs::create_dir_all(&self.output_dir)
            .await
            .map_err(|e| ExtractError::write_failed(&self.output_dir, e))
    }

    /// 图片对应的结果文件路径
    pub fn output_path_for(&self, image_path: &Path) -> PathBuf {
        let stem = image_path.file_stem().unwrap_or_default();
        let mut file_name = stem.to_os_string();
        file_name.push(".json");
        self.output_dir.join(file_name)
    }

    /// 写入结果（2 空格缩进）
    pub async fn write(
        &self,
        image_path: &Path,
        result: &ExtractionResult,
    ) -> ExtractResult<PathBuf> {
        let output_path = self.output_path_for(image_path);
        let json = serde_json::to_string_pretty(result).map_err(ExtractError::Serialize)?;

        tokio::fs::write(&output_path, json)
            .await
            .map_err(|e| ExtractError::write_failed(&output_path, e))?;

        debug!("结果已写入: {}", output_path.display());
        Ok(output_path)
    }
}
