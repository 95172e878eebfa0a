// ==========================================
// guías 合并系统 - 引擎层错误类型
// ==========================================
// 分类: 输入错误 / 分类错误 / 几何错误 / 渲染错误
// 任一错误中止整个运行,不输出部分文档
// ==========================================

use crate::config::error::ConfigError;
use crate::importer::error::ImportError;
use crate::render::error::RenderError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    // ===== 输入错误 =====
    #[error("无输入: 未提供任何 guía 批次")]
    NoSourceBatches,

    #[error("无输入: 未提供对照表")]
    MissingComparisonTable,

    // ===== 分类错误 =====
    #[error("对照表列数不足 ({source_label}): 需要至少 {required} 列,实际 {actual} 列")]
    ComparisonTableTooNarrow {
        source_label: String,
        required: usize,
        actual: usize,
    },

    // ===== 几何错误 =====
    #[error("页面几何配置非法: {0}")]
    InvalidGeometry(String),

    #[error("分页停滞 (第 {page} 页): 剩余 {remaining} 行但本页无法容纳任何一行")]
    LayoutStalled { page: usize, remaining: usize },

    #[error("表格底部偏离分页规划 (第 {page} 页): 规划 {expected},实际 {actual}")]
    TableBottomMismatch {
        page: usize,
        expected: f64,
        actual: f64,
    },

    // ===== 渲染错误 =====
    #[error("渲染失败: {0}")]
    Render(#[from] RenderError),

    // ===== 外部协作者错误 =====
    #[error(transparent)]
    Import(#[from] ImportError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl ReportError {
    /// 错误类别 (日志与调用方展示使用)
    pub fn category(&self) -> &'static str {
        match self {
            ReportError::NoSourceBatches | ReportError::MissingComparisonTable => "INPUT",
            ReportError::ComparisonTableTooNarrow { .. } => "CLASSIFICATION",
            ReportError::InvalidGeometry(_)
            | ReportError::LayoutStalled { .. }
            | ReportError::TableBottomMismatch { .. } => "GEOMETRY",
            ReportError::Render(_) => "RENDER",
            ReportError::Import(_) => "IMPORT",
            ReportError::Config(_) => "CONFIG",
        }
    }
}

/// Result 类型别名
pub type ReportResult<T> = Result<T, ReportError>;
