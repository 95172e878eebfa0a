// ==========================================
// guías 合并系统 - 数据源 Trait
// ==========================================
// 职责: 定义记录数据源接口（不包含实现）
// ==========================================

use crate::importer::error::ImportResult;
use crate::importer::source_table::SourceTable;
use std::path::Path;

// ==========================================
// RecordSource Trait
// ==========================================
// 用途: 读取批次表格与对照表
// 实现者: UniversalFileParser
pub trait RecordSource: Send + Sync {
    /// 读取一个 guía 批次
    ///
    /// # 参数
    /// - source: 批次文件路径
    ///
    /// # 返回
    /// - Ok(SourceTable): 保持文件内行顺序的表格（至少使用 A/B/C 三列）
    /// - Err: 文件不存在、格式不支持、解析失败
    fn read_batch(&self, source: &Path) -> ImportResult<SourceTable>;

    /// 读取对照表
    ///
    /// # 说明
    /// - 对照表使用 H 列 (目的地代码) 与 M 列 (guía)
    /// - 列宽校验由分类引擎负责
    fn read_comparison_table(&self, source: &Path) -> ImportResult<SourceTable>;

    /// 按顺序读取多个批次
    ///
    /// 任一批次失败则整体失败,不返回部分结果
    fn read_batches(&self, sources: &[&Path]) -> ImportResult<Vec<SourceTable>> {
        sources.iter().map(|source| self.read_batch(source)).collect()
    }
}

// ==========================================
// FileParser Trait
// ==========================================
// 用途: 单一格式的文件解析接口
// 实现者: ExcelParser, CsvParser
pub trait FileParser: Send + Sync {
    /// 解析文件为按位置访问的表格
    ///
    /// # 说明
    /// - 无表头: 第一行即数据行
    /// - 单元格做 TRIM,整行为空的行被跳过
    fn parse_to_table(&self, file_path: &Path) -> ImportResult<SourceTable>;
}
