// ==========================================
// guías 合并系统 - 渲染层错误类型
// ==========================================

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("尚未创建页面,无法绘制: {0}")]
    NoPage(String),

    #[error("坐标非法: {0}")]
    InvalidCoordinate(String),

    #[error("文档序列化失败: {0}")]
    SerializeError(String),
}

pub type RenderResult<T> = Result<T, RenderError>;
