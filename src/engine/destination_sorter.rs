// ==========================================
// guías 合并系统 - 目的地排序引擎
// ==========================================
// 排序键: 目的地数值
// 1) 非数值目的地 (城市名/空串) 排在最前
// 2) 数值目的地按升序
// 3) 键相同的记录保持合并顺序 (稳定排序)
// 目的地值本身不做任何改写
// ==========================================

use crate::domain::shipment::ShipmentRecord;
use std::cmp::Ordering;

// ==========================================
// DestinationSorter
// ==========================================
pub struct DestinationSorter {
    // 无状态引擎
}

impl DestinationSorter {
    pub fn new() -> Self {
        Self {}
    }

    /// 稳定排序
    pub fn sort(&self, mut records: Vec<ShipmentRecord>) -> Vec<ShipmentRecord> {
        // sort_by 为稳定排序,相等键保持原相对顺序
        records.sort_by(|a, b| Self::compare_keys(a.numeric_destination(), b.numeric_destination()));
        records
    }

    /// 比较排序键
    ///
    /// None (非数值) 小于任何 Some; Some 之间按数值比较, 0 与 -0 相等
    fn compare_keys(a: Option<f64>, b: Option<f64>) -> Ordering {
        match (a, b) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            // 键已过滤为有限值,partial_cmp 总有结果
            (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        }
    }
}

impl Default for DestinationSorter {
    fn default() -> Self {
        Self::new()
    }
}
