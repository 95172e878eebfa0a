// ==========================================
// guías 合并系统 - 货运记录实体
// ==========================================
// 两阶段构造: RawRecord (合并产物) → ShipmentRecord (分类产物)
// 分类后的记录不可变,不存在"部分分类"的中间状态
// ==========================================

use crate::domain::types::ClassificationRule;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ==========================================
// RecordOrigin - 记录来源位置
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordOrigin {
    pub batch_no: usize, // 第几个批次文件 (从 0 开始)
    pub row_no: usize,   // 批次内行号 (从 0 开始)
}

// ==========================================
// RawRecord - 合并后、分类前的记录
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRecord {
    pub guide_id: String,
    pub field_b: String,
    pub field_c: String,
    pub origin: RecordOrigin,
}

// ==========================================
// ShipmentRecord - 已分类的货运记录
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipmentRecord {
    guide_id: String,
    field_b: String,
    field_c: String,
    destination: String,
    rule: ClassificationRule,
    origin: RecordOrigin,
}

impl ShipmentRecord {
    /// 由原始记录和分类结果生成最终记录
    pub fn classified(raw: RawRecord, destination: String, rule: ClassificationRule) -> Self {
        Self {
            guide_id: raw.guide_id,
            field_b: raw.field_b,
            field_c: raw.field_c,
            destination,
            rule,
            origin: raw.origin,
        }
    }

    pub fn guide_id(&self) -> &str {
        &self.guide_id
    }

    pub fn field_b(&self) -> &str {
        &self.field_b
    }

    pub fn field_c(&self) -> &str {
        &self.field_c
    }

    /// 分类得到的原始目的地值 (未做显示转换)
    pub fn destination(&self) -> &str {
        &self.destination
    }

    pub fn rule(&self) -> ClassificationRule {
        self.rule
    }

    pub fn origin(&self) -> RecordOrigin {
        self.origin
    }

    /// 目的地的数值排序键
    ///
    /// # 返回
    /// - Some(v): 目的地可解析为有限数值
    /// - None: 非数值 (城市名、空串等),排在所有数值记录之前
    pub fn numeric_destination(&self) -> Option<f64> {
        parse_numeric_destination(&self.destination)
    }
}

/// 解析目的地数值
///
/// 接受整数与小数写法 ("5", "5.0", " 12.5 "), 拒绝 NaN / 无穷
pub fn parse_numeric_destination(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

// ==========================================
// ComparisonIndex - guía → 目的地代码对照表
// ==========================================
// 每次运行构建一次,之后只读
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComparisonIndex {
    entries: HashMap<String, String>,
}

impl ComparisonIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// 插入映射,重复 key 以后写入者为准
    ///
    /// # 返回
    /// 被覆盖的旧值 (若有)
    pub fn insert(&mut self, guide_id: String, destination_code: String) -> Option<String> {
        self.entries.insert(guide_id, destination_code)
    }

    pub fn get(&self, guide_id: &str) -> Option<&str> {
        self.entries.get(guide_id).map(String::as_str)
    }

    /// 查询映射,未命中返回默认值
    pub fn get_or<'a>(&'a self, guide_id: &str, default: &'a str) -> &'a str {
        self.get(guide_id).unwrap_or(default)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, String)> for ComparisonIndex {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        let mut index = ComparisonIndex::new();
        for (key, value) in iter {
            index.insert(key, value);
        }
        index
    }
}

// ==========================================
// ConsolidatedBatch - 合并、分类、排序后的批次
// ==========================================
// 不变量: total_count == records.len(),顺序即最终排版顺序
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ConsolidatedBatch {
    records: Vec<ShipmentRecord>,
}

impl ConsolidatedBatch {
    /// 由已排序记录构建批次 (构建后不再重排)
    pub fn from_sorted(records: Vec<ShipmentRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[ShipmentRecord] {
        &self.records
    }

    pub fn total_count(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// 取排版区间 [start, start + len)
    pub fn slice(&self, start: usize, len: usize) -> &[ShipmentRecord] {
        let end = (start + len).min(self.records.len());
        let start = start.min(end);
        &self.records[start..end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(guide_id: &str) -> RawRecord {
        RawRecord {
            guide_id: guide_id.to_string(),
            field_b: String::new(),
            field_c: String::new(),
            origin: RecordOrigin { batch_no: 0, row_no: 0 },
        }
    }

    #[test]
    fn test_parse_numeric_destination() {
        assert_eq!(parse_numeric_destination("5"), Some(5.0));
        assert_eq!(parse_numeric_destination(" 12.5 "), Some(12.5));
        assert_eq!(parse_numeric_destination("AMBATO"), None);
        assert_eq!(parse_numeric_destination(""), None);
        assert_eq!(parse_numeric_destination("NaN"), None);
        assert_eq!(parse_numeric_destination("inf"), None);
    }

    #[test]
    fn test_classified_record_keeps_fields() {
        let record =
            ShipmentRecord::classified(raw("QU9"), "5".to_string(), ClassificationRule::QuitoPrefix);
        assert_eq!(record.guide_id(), "QU9");
        assert_eq!(record.destination(), "5");
        assert_eq!(record.numeric_destination(), Some(5.0));
        assert_eq!(record.rule(), ClassificationRule::QuitoPrefix);
    }

    #[test]
    fn test_index_last_write_wins() {
        let index: ComparisonIndex = vec![
            ("G1".to_string(), "3".to_string()),
            ("G1".to_string(), "7".to_string()),
        ]
        .into_iter()
        .collect();

        assert_eq!(index.len(), 1);
        assert_eq!(index.get("G1"), Some("7"));
        assert_eq!(index.get_or("G2", "AMBATO"), "AMBATO");
    }

    #[test]
    fn test_batch_slice_is_clamped() {
        let records = (0..3)
            .map(|i| {
                ShipmentRecord::classified(
                    raw(&format!("G{}", i)),
                    "AMBATO".to_string(),
                    ClassificationRule::Default,
                )
            })
            .collect();
        let batch = ConsolidatedBatch::from_sorted(records);

        assert_eq!(batch.total_count(), 3);
        assert_eq!(batch.slice(1, 10).len(), 2);
        assert!(batch.slice(5, 2).is_empty());
    }
}
