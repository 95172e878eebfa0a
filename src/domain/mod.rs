// ==========================================
// guías 合并系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体、值类型、页面几何
// 红线: 不含文件读取逻辑,不含引擎逻辑
// ==========================================

pub mod geometry;
pub mod shipment;
pub mod types;

// 重导出核心类型
pub use geometry::PageGeometry;
pub use shipment::{
    parse_numeric_destination, ComparisonIndex, ConsolidatedBatch, RawRecord, RecordOrigin,
    ShipmentRecord,
};
pub use types::{ClassificationRule, TableSide};
