// ==========================================
// guías 合并系统 - 核心库
// ==========================================
// 用途: 合并多个 guía 批次,按对照表分类目的地,
//       排序后输出双列分页的 PDF 合并单
// 技术栈: Rust + calamine/csv + pdf-writer
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 引擎层 - 合并规则与版面
pub mod engine;

// 导入层 - 外部表格
pub mod importer;

// 配置层 - 版式配置
pub mod config;

// 渲染层 - 画布与 PDF
pub mod render;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::{
    ClassificationRule, ComparisonIndex, ConsolidatedBatch, PageGeometry, ShipmentRecord,
};

// 引擎
pub use engine::{
    ConsolidationEngine, ConsolidationReportService, LayoutEngine, PaginationPlanner,
    ReportError, ReportOutput, ReportRequest,
};

// 配置
pub use config::{ConfigManager, ReportConfig};

// 导入
pub use importer::{RecordSource, SourceTable, UniversalFileParser};

// 渲染
pub use render::{Canvas, PdfCanvas, RecordingCanvas};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "guías 合并系统";
