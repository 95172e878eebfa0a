// ==========================================
// guías 合并系统 - 配置层
// ==========================================
// 职责: 报表版式配置、日期格式化
// 存储: 可选 JSON 文件
// ==========================================

pub mod config_manager;
pub mod date_format;
pub mod error;
pub mod report_config;

// 重导出核心配置
pub use config_manager::{ConfigManager, CONFIG_PATH_ENV};
pub use date_format::{DateFormatConfig, DateFormatter, DateLanguage};
pub use error::{ConfigError, ConfigResult};
pub use report_config::{BannerConfig, ReportConfig, SignatureConfig};
