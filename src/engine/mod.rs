// ==========================================
// guías 合并系统 - 引擎层
// ==========================================
// 职责: 合并/分类/排序规则 + 分页与版面绘制
// 红线: 引擎不读文件、不关心输出格式 (经由 Canvas)
// ==========================================

pub mod classifier;
pub mod comparison_index;
pub mod consolidation;
pub mod destination_sorter;
pub mod error;
pub mod layout;
pub mod orchestrator;
pub mod pagination;

// 重导出核心引擎
pub use classifier::DestinationClassifier;
pub use comparison_index::ComparisonIndexBuilder;
pub use consolidation::ConsolidationEngine;
pub use destination_sorter::DestinationSorter;
pub use error::{ReportError, ReportResult};
pub use layout::{LayoutEngine, LayoutSummary, ReportHeader};
pub use orchestrator::{
    ConsolidationReportService, LayoutReport, ReportOutput, ReportRequest, DEFAULT_DISPATCH_TIME,
};
pub use pagination::{PagePlan, PaginationPlanner};
