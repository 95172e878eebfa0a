// ==========================================
// guías 合并系统 - 日期格式化
// ==========================================
// 显式的语言 + 格式配置,不修改进程全局 locale
// 月份名称来自固定表; 格式非法时使用回退格式
// ==========================================

use chrono::format::{Fixed, Item, StrftimeItems};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

const SPANISH_MONTHS: [&str; 12] = [
    "enero",
    "febrero",
    "marzo",
    "abril",
    "mayo",
    "junio",
    "julio",
    "agosto",
    "septiembre",
    "octubre",
    "noviembre",
    "diciembre",
];

const ENGLISH_MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// 文件名中的日期格式
pub const FILE_DATE_PATTERN: &str = "%d-%m-%Y";

// ==========================================
// DateLanguage - 月份名称语言
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DateLanguage {
    #[default]
    Spanish,
    English,
}

impl DateLanguage {
    /// 月份全称 (month: 1..=12)
    pub fn month_name(&self, month: u32) -> &'static str {
        let table = match self {
            DateLanguage::Spanish => &SPANISH_MONTHS,
            DateLanguage::English => &ENGLISH_MONTHS,
        };
        let idx = (month.clamp(1, 12) - 1) as usize;
        table[idx]
    }
}

// ==========================================
// DateFormatConfig - 日期格式配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DateFormatConfig {
    pub language: DateLanguage,
    pub pattern: String,          // strftime 格式,%B 替换为所选语言的月份名
    pub fallback_pattern: String, // pattern 非法时使用
}

impl Default for DateFormatConfig {
    fn default() -> Self {
        Self {
            language: DateLanguage::Spanish,
            pattern: "%d de %B de %Y".to_string(),
            fallback_pattern: "%d/%m/%Y".to_string(),
        }
    }
}

// ==========================================
// DateFormatter - 日期格式化器
// ==========================================
#[derive(Debug, Clone)]
pub struct DateFormatter {
    config: DateFormatConfig,
}

impl DateFormatter {
    pub fn new(config: DateFormatConfig) -> Self {
        Self { config }
    }

    /// 文档抬头中的日期
    pub fn format(&self, date: NaiveDate) -> String {
        let month = self.config.language.month_name(date.month());

        if let Some(items) = localized_items(&self.config.pattern, month) {
            return date.format_with_items(items.iter()).to_string();
        }

        tracing::warn!(
            pattern = %self.config.pattern,
            fallback = %self.config.fallback_pattern,
            "日期格式非法,使用回退格式"
        );
        match localized_items(&self.config.fallback_pattern, month) {
            Some(items) => date.format_with_items(items.iter()).to_string(),
            None => date.format("%d/%m/%Y").to_string(),
        }
    }

    /// 下载文件名中的日期 (dd-mm-yyyy)
    pub fn file_date(&self, date: NaiveDate) -> String {
        date.format(FILE_DATE_PATTERN).to_string()
    }
}

impl Default for DateFormatter {
    fn default() -> Self {
        Self::new(DateFormatConfig::default())
    }
}

/// 解析 strftime 格式并把月份全名 (%B) 换成所选语言的名称
///
/// 转义的 %% 由解析器处理,其后的字母保持原样; 格式非法时返回 None
fn localized_items<'a>(pattern: &'a str, month: &'a str) -> Option<Vec<Item<'a>>> {
    StrftimeItems::new(pattern)
        .map(|item| match item {
            Item::Error => None,
            Item::Fixed(Fixed::LongMonthName) => Some(Item::Literal(month)),
            other => Some(other),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 7).unwrap()
    }

    #[test]
    fn test_spanish_long_date() {
        let formatter = DateFormatter::default();
        assert_eq!(formatter.format(date()), "07 de marzo de 2025");
    }

    #[test]
    fn test_english_month_names() {
        let formatter = DateFormatter::new(DateFormatConfig {
            language: DateLanguage::English,
            pattern: "%B %d, %Y".to_string(),
            ..DateFormatConfig::default()
        });
        assert_eq!(formatter.format(date()), "March 07, 2025");
    }

    #[test]
    fn test_invalid_pattern_uses_fallback() {
        let formatter = DateFormatter::new(DateFormatConfig {
            pattern: "%Q bad".to_string(),
            ..DateFormatConfig::default()
        });
        assert_eq!(formatter.format(date()), "07/03/2025");
    }

    #[test]
    fn test_escaped_percent_before_month_stays_literal() {
        let formatter = DateFormatter::new(DateFormatConfig {
            pattern: "%%B %d de %B".to_string(),
            ..DateFormatConfig::default()
        });
        assert_eq!(formatter.format(date()), "%B 07 de marzo");
    }

    #[test]
    fn test_abbreviated_month_is_not_localized() {
        let formatter = DateFormatter::new(DateFormatConfig {
            pattern: "%b %d".to_string(),
            ..DateFormatConfig::default()
        });
        assert_eq!(formatter.format(date()), "Mar 07");
    }

    #[test]
    fn test_file_date() {
        let formatter = DateFormatter::default();
        assert_eq!(formatter.file_date(date()), "07-03-2025");
    }

    #[test]
    fn test_month_name_bounds() {
        assert_eq!(DateLanguage::Spanish.month_name(1), "enero");
        assert_eq!(DateLanguage::Spanish.month_name(12), "diciembre");
    }
}
