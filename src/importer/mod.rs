// ==========================================
// guías 合并系统 - 导入层
// ==========================================
// 职责: 读取外部表格,生成按位置访问的行
// 支持: Excel, CSV
// ==========================================

// 模块声明
pub mod error;
pub mod file_parser;
pub mod record_source_trait;
pub mod source_table;

// 重导出核心类型
pub use error::{ImportError, ImportResult};
pub use file_parser::{CsvParser, ExcelParser, UniversalFileParser};
pub use source_table::{SourceRow, SourceTable};

// 重导出 Trait 接口
pub use record_source_trait::{FileParser, RecordSource};
