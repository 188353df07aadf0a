use std::path::PathBuf;
use thiserror::Error;

/// 单张图片处理错误
///
/// 任何一种都只影响当前图片，不会中断整个批次
#[derive(Debug, Error)]
pub enum ExtractError {
    /// 图片不存在或无法读取
    #[error("读取图片失败 ({}): {source}", .path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// 推理服务调用失败
    #[error("推理服务错误: {0}")]
    Service(#[from] ServiceError),

    /// 服务返回的 JSON 与计分表结构不符
    #[error("返回数据不符合计分表结构: {source}")]
    InvalidPayload {
        #[source]
        source: serde_json::Error,
    },

    /// 结果序列化失败
    #[error("结果序列化失败: {0}")]
    Serialize(#[source] serde_json::Error),

    /// 写入结果文件失败
    #[error("写入结果文件失败 ({}): {source}", .path.display())]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// 处理任务异常退出
    #[error("任务执行失败: {0}")]
    TaskAborted(String),
}

/// 推理服务错误
#[derive(Debug, Error)]
pub enum ServiceError {
    /// 网络请求失败
    #[error("请求失败 (模型: {model}): {source}")]
    RequestFailed {
        model: String,
        #[source]
        source: reqwest::Error,
    },

    /// 服务返回非 2xx 响应（鉴权失败、请求被拒等）
    #[error("服务返回错误响应: status={status}, message={message}")]
    BadResponse { status: u16, message: String },

    /// 响应中没有候选内容
    #[error("服务返回内容为空 (模型: {model})")]
    EmptyResponse { model: String },

    /// 响应体无法解析
    #[error("响应解析失败: {0}")]
    DecodeFailed(#[source] serde_json::Error),
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 缺少 API 密钥
    #[error("环境变量 {var_name} 未设置，无法调用推理服务")]
    MissingApiKey { var_name: String },

    /// HTTP 客户端构建失败
    #[error("HTTP 客户端初始化失败: {0}")]
    HttpClient(#[source] reqwest::Error),
}

// ========== 便捷构造函数 ==========

impl ExtractError {
    /// 创建图片读取错误
    pub fn file_access(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ExtractError::FileAccess {
            path: path.into(),
            source,
        }
    }

    /// 创建结果写入错误
    pub fn write_failed(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ExtractError::WriteFailed {
            path: path.into(),
            source,
        }
    }
}

impl ServiceError {
    /// 创建网络请求错误
    pub fn request_failed(model: impl Into<String>, source: reqwest::Error) -> Self {
        ServiceError::RequestFailed {
            model: model.into(),
            source,
        }
    }
}

/// 单张图片处理结果类型
pub type ExtractResult<T> = Result<T, ExtractError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_access_message_contains_path() {
        let err = ExtractError::file_access(
            "images/round1.png",
            std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        );
        let msg = err.to_string();
        assert!(msg.contains("images/round1.png"));
        assert!(msg.contains("no such file"));
    }

    #[test]
    fn test_service_error_converts() {
        let err: ExtractError = ServiceError::BadResponse {
            status: 401,
            message: "API key not valid".to_string(),
        }
        .into();
        assert!(matches!(err, ExtractError::Service(_)));
        assert!(err.to_string().contains("401"));
    }
}
