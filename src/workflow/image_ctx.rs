//! 图片处理上下文
//!
//! 封装"我正在处理第几张图片、叫什么名字"这一信息

use std::fmt::Display;
use std::path::{Path, PathBuf};

/// 图片处理上下文
#[derive(Debug, Clone)]
pub struct ImageCtx {
    /// 图片路径
    pub path: PathBuf,

    /// 文件名（聚合结果的键）
    pub file_name: String,

    /// 图片序号（从1开始，仅用于日志显示）
    pub index: usize,

    /// 本次运行的图片总数
    pub total: usize,
}

impl ImageCtx {
    pub fn new(path: &Path, index: usize, total: usize) -> Self {
        let file_name = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        Self {
            path: path.to_path_buf(),
            file_name,
            index,
            total,
        }
    }
}

impl Display for ImageCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[图片 {}/{} {}]", self.index, self.total, self.file_name)
    }
}
