//! 终端配置 - 收银终端的所有配置项
//!
//! # 环境变量
//!
//! 所有配置项都可以通过环境变量覆盖：
//!
//! | 环境变量 | 默认值 | 说明 |
//! |----------|--------|------|
//! | API_BASE_URL | http://localhost:8000/api | POS API 地址 |
//! | WORK_DIR | /var/lib/espresso/pos | 工作目录 |
//! | LOG_LEVEL | info | 日志级别 |
//! | LOG_DIR | (无) | 日志文件目录，未设置时仅输出到控制台 |
//! | ENVIRONMENT | development | 运行环境 |
//! | REQUEST_TIMEOUT_SECS | 30 | 请求超时(秒) |

/// Terminal configuration
#[derive(Debug, Clone)]
pub struct PosConfig {
    /// POS API base URL (including the `/api` prefix)
    pub api_base_url: String,
    /// 工作目录，存储会话记录、日志等文件
    pub work_dir: String,
    /// Log level (e.g., "info", "debug", "warn")
    pub log_level: String,
    /// Optional directory for file logging
    pub log_dir: Option<String>,
    /// 运行环境: development | staging | production
    pub environment: String,
    /// Request timeout in seconds
    pub request_timeout_secs: u64,
}

impl PosConfig {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值
    pub fn from_env() -> Self {
        Self {
            api_base_url: std::env::var("API_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:8000/api".into()),
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "/var/lib/espresso/pos".into()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok(),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            request_timeout_secs: std::env::var("REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(30),
        }
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for PosConfig {
    fn default() -> Self {
        Self::from_env()
    }
}
