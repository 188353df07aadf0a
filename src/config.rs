use std::path::PathBuf;

/// 程序配置
///
/// 启动时加载一次，之后只读，按引用传给各个构造函数
#[derive(Clone, Debug)]
pub struct Config {
    /// 计分卡图片目录
    pub input_dir: PathBuf,
    /// 输出目录后缀（输出目录 = 输入目录 + 后缀）
    pub output_suffix: String,
    /// 图片扩展名（区分大小写）
    pub image_extension: String,
    /// 同时处理的图片数量
    pub max_concurrent_images: usize,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    // --- Gemini 配置 ---
    pub gemini_api_key: String,
    pub gemini_api_base_url: String,
    pub gemini_model_name: String,
    // --- 计费配置（每百万 token 的价格） ---
    pub input_cost_per_million: f64,
    pub output_cost_per_million: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("images"),
            output_suffix: "_output".to_string(),
            image_extension: "png".to_string(),
            max_concurrent_images: 1,
            verbose_logging: false,
            gemini_api_key: String::new(),
            gemini_api_base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            gemini_model_name: "gemini-2.5-flash-lite-preview-06-17".to_string(),
            input_cost_per_million: 0.1,
            output_cost_per_million: 0.4,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            input_dir: std::env::var("INPUT_DIR").map(PathBuf::from).unwrap_or(default.input_dir),
            output_suffix: std::env::var("OUTPUT_SUFFIX").unwrap_or(default.output_suffix),
            image_extension: std::env::var("IMAGE_EXTENSION").unwrap_or(default.image_extension),
            max_concurrent_images: std::env::var("MAX_CONCURRENT_IMAGES").ok().and_then(|v| v.parse().ok()).unwrap_or(default.max_concurrent_images),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
            gemini_api_key: std::env::var("GEMINI_API_KEY").unwrap_or(default.gemini_api_key),
            gemini_api_base_url: std::env::var("GEMINI_API_BASE_URL").unwrap_or(default.gemini_api_base_url),
            gemini_model_name: std::env::var("GEMINI_MODEL_NAME").unwrap_or(default.gemini_model_name),
            input_cost_per_million: std::env::var("INPUT_COST_PER_MILLION").ok().and_then(|v| v.parse().ok()).unwrap_or(default.input_cost_per_million),
            output_cost_per_million: std::env::var("OUTPUT_COST_PER_MILLION").ok().and_then(|v| v.parse().ok()).unwrap_or(default.output_cost_per_million),
        }
    }

    /// 输出目录：`<input_dir><output_suffix>`，例如 `images` → `images_output`
    pub fn output_dir(&self) -> PathBuf {
        let mut name = self.input_dir.as_os_str().to_os_string();
        name.push(&self.output_suffix);
        PathBuf::from(name)
    }

    /// 计费单价
    pub fn pricing(&self) -> crate::models::Pricing {
        crate::models::Pricing {
            input_cost_per_million: self.input_cost_per_million,
            output_cost_per_million: self.output_cost_per_million,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = Config::default();
        assert_eq!(config.input_dir, PathBuf::from("images"));
        assert_eq!(config.image_extension, "png");
        assert_eq!(config.max_concurrent_images, 1);
        assert_eq!(config.input_cost_per_million, 0.1);
        assert_eq!(config.output_cost_per_million, 0.4);
        assert!(config.gemini_api_key.is_empty());
    }

    #[test]
    fn test_output_dir_appends_suffix() {
        let config = Config {
            input_dir: PathBuf::from("data/wingspan_rounds"),
            ..Config::default()
        };
        assert_eq!(config.output_dir(), PathBuf::from("data/wingspan_rounds_output"));
    }

    #[test]
    fn test_pricing_follows_config() {
        let config = Config {
            input_cost_per_million: 0.3,
            output_cost_per_million: 2.5,
            ..Config::default()
        };
        let pricing = config.pricing();
        assert_eq!(pricing.input_cost_per_million, 0.3);
        assert_eq!(pricing.output_cost_per_million, 2.5);
    }
}
