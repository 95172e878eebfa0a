// ==========================================
// guías 合并系统 - 报表配置项
// ==========================================
// 所有分区 #[serde(default)],配置文件只需写出要覆写的字段
// 默认值即原有 A4 单据版式
// ==========================================

use crate::config::date_format::DateFormatConfig;
use crate::domain::geometry::PageGeometry;
use serde::{Deserialize, Serialize};

// ==========================================
// BannerConfig - 首页抬头
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BannerConfig {
    pub title: String,
    pub title_y: f64,
    pub margin_x: f64, // 标题、页脚的左右边距
    pub date_position: (f64, f64),
    pub consolidation_position: (f64, f64),
    pub time_position: (f64, f64),
    pub packages_position: (f64, f64),
    pub footer_offset: f64, // 页脚距页面底部
}

impl Default for BannerConfig {
    fn default() -> Self {
        Self {
            title: "LDC LOGISTICA ECUADOR S.A.S.".to_string(),
            title_y: 10.0,
            margin_x: 10.0,
            date_position: (11.0, 17.0),
            consolidation_position: (11.0, 22.0),
            time_position: (110.0, 17.0),
            packages_position: (110.0, 22.0),
            footer_offset: 10.0,
        }
    }
}

// ==========================================
// SignatureConfig - 签名区
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignatureConfig {
    pub dispatcher_name: Option<String>, // 显示在发货人签名线上方
    pub dispatcher_label: String,
    pub carrier_label: String,
    pub left_x: f64,
    pub right_x: f64,
    pub line_length: f64,
    pub line_offset: f64,  // 签名线相对签名区顶部
    pub label_offset: f64, // 角色标签相对签名区顶部
}

impl Default for SignatureConfig {
    fn default() -> Self {
        Self {
            dispatcher_name: Some("Yixon Diaz".to_string()),
            dispatcher_label: "DESPACHADO POR".to_string(),
            carrier_label: "TRANSPORTISTA".to_string(),
            left_x: 40.0,
            right_x: 120.0,
            line_length: 50.0,
            line_offset: 7.0,
            label_offset: 9.0,
        }
    }
}

// ==========================================
// ReportConfig - 报表总配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub geometry: PageGeometry,
    pub banner: BannerConfig,
    pub signature: SignatureConfig,
    pub date: DateFormatConfig,
    pub column_labels: [String; 4],
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            geometry: PageGeometry::default(),
            banner: BannerConfig::default(),
            signature: SignatureConfig::default(),
            date: DateFormatConfig::default(),
            column_labels: [
                "GUIA DORADOS".to_string(),
                "GUIAS TRAMACO".to_string(),
                "MASTER".to_string(),
                "SACO".to_string(),
            ],
        }
    }
}
