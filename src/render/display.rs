// ==========================================
// guías 合并系统 - 单元格显示格式
// ==========================================
// 只在渲染时转换,分类结果本身不被改写
// ==========================================

use crate::domain::types::DESTINATION_AMBATO;
use std::borrow::Cow;

/// SACO 列的显示文本
///
/// - 空值 → "AMBATO"
/// - 纯数字 (可带一个小数点) → 去掉小数部分的整数 ("5.0" → "5", "007" → "7")
/// - 其他 → 原样
pub fn destination_display(value: &str) -> Cow<'_, str> {
    if value.is_empty() {
        return Cow::Borrowed(DESTINATION_AMBATO);
    }
    if !is_plain_numeric(value) {
        return Cow::Borrowed(value);
    }

    let integer_part = value.split('.').next().unwrap_or("");
    let trimmed = integer_part.trim_start_matches('0');
    if trimmed.is_empty() {
        Cow::Borrowed("0")
    } else {
        Cow::Owned(trimmed.to_string())
    }
}

/// 是否仅由数字组成,最多含一个小数点,且至少一个数字
fn is_plain_numeric(value: &str) -> bool {
    let mut dots = 0;
    let mut digits = 0;
    for ch in value.chars() {
        match ch {
            '0'..='9' => digits += 1,
            '.' => dots += 1,
            _ => return false,
        }
    }
    digits > 0 && dots <= 1
}
