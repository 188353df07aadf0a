//! 图片读取 - 业务能力层
//!
//! 只负责把图片文件读成可以发送给推理服务的负载

use base64::{engine::general_purpose, Engine};
use std::path::Path;
use tracing::debug;

use crate::error::{ExtractError, ExtractResult};

/// 图片负载
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePayload {
    pub bytes: Vec<u8>,
    pub mime_type: &'static str,
}

impl ImagePayload {
    /// 需要文本传输时使用的 base64 形式
    pub fn to_base64(&self) -> String {
        general_purpose::STANDARD.encode(&self.bytes)
    }
}

/// 读取图片原始字节
///
/// 文件不存在或不可读时返回 [`ExtractError::FileAccess`]，不重试
pub async fn read_image(path: &Path) -> ExtractResult<ImagePayload> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| ExtractError::file_access(path, e))?;

    debug!("读取图片 {}: {} 字节", path.display(), bytes.len());

    Ok(ImagePayload {
        bytes,
        mime_type: mime_type_for(path),
    })
}

/// 根据扩展名推断 MIME 类型
pub fn mime_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_ascii_lowercase());

    match ext.as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}
