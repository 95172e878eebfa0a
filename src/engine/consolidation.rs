// ==========================================
// guías 合并系统 - 合并与分类引擎
// ==========================================
// 输入: N 个 guía 批次 + 1 个对照表
// 输出: ConsolidatedBatch (已分类、已排序)
// 流程: 构建索引 → 合并 → 分类 → 稳定排序
// 红线: 无输入时报错,不输出部分结果
// ==========================================

use crate::domain::shipment::{ConsolidatedBatch, RawRecord, RecordOrigin};
use crate::domain::types::ClassificationRule;
use crate::engine::classifier::DestinationClassifier;
use crate::engine::comparison_index::ComparisonIndexBuilder;
use crate::engine::destination_sorter::DestinationSorter;
use crate::engine::error::{ReportError, ReportResult};
use crate::importer::source_table::SourceTable;
use std::collections::HashMap;
use tracing::{debug, info};

// ==========================================
// ConsolidationEngine
// ==========================================
pub struct ConsolidationEngine {
    sorter: DestinationSorter,
}

impl ConsolidationEngine {
    pub fn new() -> Self {
        Self {
            sorter: DestinationSorter::new(),
        }
    }

    /// 合并、分类并排序
    ///
    /// # 参数
    /// - batches: 按上传顺序排列的批次
    /// - comparison: 对照表 (必需,可为空表)
    ///
    /// # 返回
    /// - Ok(ConsolidatedBatch): total_count == 各批次行数之和
    /// - Err(NoSourceBatches / MissingComparisonTable / ComparisonTableTooNarrow)
    pub fn consolidate(
        &self,
        batches: &[SourceTable],
        comparison: Option<&SourceTable>,
    ) -> ReportResult<ConsolidatedBatch> {
        if batches.is_empty() {
            return Err(ReportError::NoSourceBatches);
        }
        let comparison = comparison.ok_or(ReportError::MissingComparisonTable)?;

        // 1. 索引
        let index = ComparisonIndexBuilder::build(comparison)?;

        // 2. 合并
        let merged = Self::merge(batches);

        // 3. 分类
        let classifier = DestinationClassifier::new(&index);
        let classified = classifier.classify_all(merged);

        let mut rule_hits: HashMap<ClassificationRule, usize> = HashMap::new();
        for record in &classified {
            *rule_hits.entry(record.rule()).or_insert(0) += 1;
        }
        debug!(?rule_hits, "分类规则命中统计");

        // 4. 排序
        let sorted = self.sorter.sort(classified);
        let batch = ConsolidatedBatch::from_sorted(sorted);

        info!(
            batches = batches.len(),
            index_entries = index.len(),
            total_count = batch.total_count(),
            "guía 合并完成"
        );
        Ok(batch)
    }

    /// 按给定顺序拼接批次,每行只取前三列 (A/B/C)
    pub fn merge(batches: &[SourceTable]) -> Vec<RawRecord> {
        let capacity = batches.iter().map(SourceTable::len).sum();
        let mut merged = Vec::with_capacity(capacity);

        for (batch_no, table) in batches.iter().enumerate() {
            for (row_no, row) in table.rows().iter().enumerate() {
                merged.push(RawRecord {
                    guide_id: row.cell(0).to_string(),
                    field_b: row.cell(1).to_string(),
                    field_c: row.cell(2).to_string(),
                    origin: RecordOrigin { batch_no, row_no },
                });
            }
            debug!(batch_no, source = table.label(), rows = table.len(), "批次已合并");
        }

        merged
    }
}

impl Default for ConsolidationEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn batch(label: &str, rows: Vec<Vec<&str>>) -> SourceTable {
        SourceTable::from_rows(label, rows)
    }

    fn comparison(entries: &[(&str, &str)]) -> SourceTable {
        let rows = entries
            .iter()
            .map(|(guide, code)| {
                let mut cells = vec![String::new(); 13];
                cells[7] = code.to_string();
                cells[12] = guide.to_string();
                cells
            })
            .collect::<Vec<_>>();
        SourceTable::from_rows("comp", rows)
    }

    #[test]
    fn test_merge_takes_first_three_columns() {
        let batches = vec![batch("b1", vec![vec!["G1", "b", "c", "extra"], vec!["G2"]])];

        let merged = ConsolidationEngine::merge(&batches);

        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].field_c, "c");
        assert_eq!(merged[1].field_b, "");
        assert_eq!(merged[1].origin, RecordOrigin { batch_no: 0, row_no: 1 });
    }

    #[test]
    fn test_no_batches_is_input_error() {
        let engine = ConsolidationEngine::new();
        let comp = comparison(&[]);

        let result = engine.consolidate(&[], Some(&comp));

        assert!(matches!(result, Err(ReportError::NoSourceBatches)));
    }

    #[test]
    fn test_missing_comparison_is_input_error() {
        let engine = ConsolidationEngine::new();
        let batches = vec![batch("b1", vec![vec!["G1"]])];

        let result = engine.consolidate(&batches, None);

        assert!(matches!(result, Err(ReportError::MissingComparisonTable)));
    }

    #[test]
    fn test_non_numeric_keeps_merge_order() {
        let engine = ConsolidationEngine::new();
        let batches = vec![
            batch("b1", vec![vec!["A1", "x", "y"], vec!["SACO", "", ""]]),
            batch("b2", vec![vec!["QU9", "", ""]]),
        ];
        let comp = comparison(&[]);

        let result = engine.consolidate(&batches, Some(&comp)).unwrap();

        let destinations: Vec<&str> = result.records().iter().map(|r| r.destination()).collect();
        let guides: Vec<&str> = result.records().iter().map(|r| r.guide_id()).collect();
        assert_eq!(destinations, vec!["AMBATO", "AMBATO", "QUITO"]);
        assert_eq!(guides, vec!["A1", "SACO", "QU9"]);
        assert_eq!(result.total_count(), 3);
    }

    #[test]
    fn test_numeric_destination_sorted_last() {
        let engine = ConsolidationEngine::new();
        let batches = vec![
            batch("b1", vec![vec!["QU9", "", ""], vec!["A1", "x", "y"]]),
            batch("b2", vec![vec!["SACO", "", ""]]),
        ];
        let comp = comparison(&[("QU9", "5")]);

        let result = engine.consolidate(&batches, Some(&comp)).unwrap();

        let guides: Vec<&str> = result.records().iter().map(|r| r.guide_id()).collect();
        assert_eq!(guides, vec!["A1", "SACO", "QU9"]);
        assert_eq!(result.records()[2].destination(), "5");
    }
}
