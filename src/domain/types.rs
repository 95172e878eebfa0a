// ==========================================
// guías 合并系统 - 领域类型定义
// ==========================================
// 职责: 分类规则、目的地常量等值类型
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 目的地常量
// ==========================================

/// 特殊 guía 标识: 整单袋 (SACO)
pub const SACO_GUIDE_ID: &str = "SACO";

/// 基多 guía 前缀
pub const QUITO_GUIDE_PREFIX: &str = "QU";

/// 默认目的地: 安巴托
pub const DESTINATION_AMBATO: &str = "AMBATO";

/// 基多前缀 guía 的默认目的地
pub const DESTINATION_QUITO: &str = "QUITO";

// ==========================================
// 分类规则 (Classification Rule)
// ==========================================
// 按优先级命中: SacoLiteral > QuitoPrefix > Default
// 每条记录都携带命中的规则,便于追溯
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClassificationRule {
    SacoLiteral, // guía == "SACO" → AMBATO
    QuitoPrefix, // guía 以 "QU" 开头 → 对照表 / QUITO
    Default,     // 其他 → 对照表 / AMBATO
}

impl ClassificationRule {
    /// 规则是否查询对照表
    pub fn uses_index(&self) -> bool {
        !matches!(self, ClassificationRule::SacoLiteral)
    }
}

impl fmt::Display for ClassificationRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClassificationRule::SacoLiteral => write!(f, "SACO_LITERAL"),
            ClassificationRule::QuitoPrefix => write!(f, "QUITO_PREFIX"),
            ClassificationRule::Default => write!(f, "DEFAULT"),
        }
    }
}

// ==========================================
// 表格列 (Table Column)
// ==========================================
// 左右两个表格共用同一列布局
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TableSide {
    Left,
    Right,
}

impl fmt::Display for TableSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableSide::Left => write!(f, "LEFT"),
            TableSide::Right => write!(f, "RIGHT"),
        }
    }
}
