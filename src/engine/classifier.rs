// ==========================================
// guías 合并系统 - 目的地分类引擎
// ==========================================
// 规则 (按顺序,先命中者生效):
// 1) guía == "SACO"          → AMBATO (不查对照表)
// 2) guía 以 "QU" 开头        → 对照表值,未命中为 QUITO
// 3) 其他                    → 对照表值,未命中为 AMBATO
// 红线: 每条记录都记录命中规则
// ==========================================

use crate::domain::shipment::{ComparisonIndex, RawRecord, ShipmentRecord};
use crate::domain::types::{
    ClassificationRule, DESTINATION_AMBATO, DESTINATION_QUITO, QUITO_GUIDE_PREFIX, SACO_GUIDE_ID,
};

// ==========================================
// DestinationClassifier
// ==========================================
pub struct DestinationClassifier<'a> {
    index: &'a ComparisonIndex,
}

impl<'a> DestinationClassifier<'a> {
    pub fn new(index: &'a ComparisonIndex) -> Self {
        Self { index }
    }

    /// 判定命中的规则
    pub fn rule_for(guide_id: &str) -> ClassificationRule {
        if guide_id == SACO_GUIDE_ID {
            ClassificationRule::SacoLiteral
        } else if guide_id.starts_with(QUITO_GUIDE_PREFIX) {
            ClassificationRule::QuitoPrefix
        } else {
            ClassificationRule::Default
        }
    }

    /// 解析目的地
    pub fn resolve(&self, guide_id: &str) -> (String, ClassificationRule) {
        let rule = Self::rule_for(guide_id);
        let destination = match rule {
            ClassificationRule::SacoLiteral => DESTINATION_AMBATO,
            ClassificationRule::QuitoPrefix => self.index.get_or(guide_id, DESTINATION_QUITO),
            ClassificationRule::Default => self.index.get_or(guide_id, DESTINATION_AMBATO),
        };
        (destination.to_string(), rule)
    }

    /// 分类单条记录
    pub fn classify(&self, raw: RawRecord) -> ShipmentRecord {
        let (destination, rule) = self.resolve(&raw.guide_id);
        ShipmentRecord::classified(raw, destination, rule)
    }

    /// 分类全部记录 (保持输入顺序)
    pub fn classify_all(&self, records: Vec<RawRecord>) -> Vec<ShipmentRecord> {
        records.into_iter().map(|raw| self.classify(raw)).collect()
    }
}
