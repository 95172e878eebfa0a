// ==========================================
// guías 合并系统 - 对照表索引构建
// ==========================================
// 输入: 对照表 (无表头,按列位置)
// 输出: ComparisonIndex (M 列 guía → H 列目的地代码)
// 规则: M 列为空的行跳过; 重复 guía 以后出现者为准
// ==========================================

use crate::domain::shipment::ComparisonIndex;
use crate::engine::error::{ReportError, ReportResult};
use crate::importer::source_table::SourceTable;
use tracing::{debug, info, warn};

/// H 列: 目的地代码
pub const DESTINATION_CODE_COLUMN: usize = 7;

/// M 列: guía
pub const GUIDE_KEY_COLUMN: usize = 12;

/// 对照表最少列数 (A..M)
pub const MIN_COMPARISON_WIDTH: usize = GUIDE_KEY_COLUMN + 1;

// ==========================================
// ComparisonIndexBuilder
// ==========================================
pub struct ComparisonIndexBuilder;

impl ComparisonIndexBuilder {
    /// 由对照表构建索引
    ///
    /// # 返回
    /// - Ok(ComparisonIndex): 空表返回空索引
    /// - Err(ComparisonTableTooNarrow): 非空表但没有任何行到达 M 列
    pub fn build(table: &SourceTable) -> ReportResult<ComparisonIndex> {
        if table.is_empty() {
            info!(source = table.label(), "对照表为空,所有 guía 使用默认目的地");
            return Ok(ComparisonIndex::new());
        }

        let width = table.width();
        if width < MIN_COMPARISON_WIDTH {
            return Err(ReportError::ComparisonTableTooNarrow {
                source_label: table.label().to_string(),
                required: MIN_COMPARISON_WIDTH,
                actual: width,
            });
        }

        let mut index = ComparisonIndex::new();
        let mut overwritten = 0usize;
        let mut skipped = 0usize;
        for row in table.rows() {
            let key = row.cell(GUIDE_KEY_COLUMN);
            if key.is_empty() {
                skipped += 1;
                continue;
            }
            let value = row.cell(DESTINATION_CODE_COLUMN).to_string();
            if let Some(previous) = index.insert(key.to_string(), value) {
                overwritten += 1;
                debug!(guide_id = key, previous = %previous, "对照表重复 guía,覆盖旧值");
            }
        }

        if skipped > 0 {
            warn!(source = table.label(), skipped, "对照表中 M 列为空的行已跳过");
        }

        info!(
            source = table.label(),
            rows = table.len(),
            entries = index.len(),
            overwritten,
            "对照表索引构建完成"
        );
        Ok(index)
    }
}
