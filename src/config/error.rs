// ==========================================
// guías 合并系统 - 配置模块错误类型
// ==========================================

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件读取失败 ({path}): {message}")]
    ReadError { path: String, message: String },

    #[error("配置文件解析失败 ({path}): {message}")]
    ParseError { path: String, message: String },

    #[error("配置值非法 (key: {key}): {message}")]
    InvalidValue { key: String, message: String },

    #[error("配置序列化失败: {0}")]
    SerializeError(#[from] serde_json::Error),
}

pub type ConfigResult<T> = Result<T, ConfigError>;
