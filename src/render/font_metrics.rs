// ==========================================
// guías 合并系统 - 标准字体宽度表
// ==========================================
// Helvetica / Helvetica-Bold 字宽 (1/1000 em),覆盖 ASCII 32..=126
// Helvetica-Oblique 与 Helvetica 字宽相同
// ==========================================

use crate::render::canvas::{FontSpec, FontWeight};

/// 每毫米的点数
pub const PT_PER_MM: f64 = 72.0 / 25.4;

/// 表外字符的宽度
const DEFAULT_WIDTH: u16 = 556;

#[rustfmt::skip]
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,                               // '0'..'9'
    278, 278, 584, 584, 584, 556, 1015,                                             // ':'..'@'
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833,                // 'A'..'M'
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,                // 'N'..'Z'
    278, 278, 278, 469, 556, 333,                                                   // '['..'`'
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833,                // 'a'..'m'
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500,                // 'n'..'z'
    334, 260, 334, 584,                                                             // '{'..'~'
];

#[rustfmt::skip]
const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    333, 333, 584, 584, 584, 611, 975,
    722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833,
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    333, 278, 333, 584, 556, 333,
    556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889,
    611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500,
    389, 280, 389, 584,
];

fn glyph_width(ch: char, weight: FontWeight) -> u16 {
    let table = match weight {
        FontWeight::Bold => &HELVETICA_BOLD,
        FontWeight::Regular | FontWeight::Italic => &HELVETICA,
    };
    let code = ch as u32;
    if (32..=126).contains(&code) {
        table[(code - 32) as usize]
    } else {
        DEFAULT_WIDTH
    }
}

/// 文本宽度 (mm)
pub fn text_width_mm(text: &str, font: FontSpec) -> f64 {
    let units: u32 = text.chars().map(|c| glyph_width(c, font.weight) as u32).sum();
    units as f64 * font.size / 1000.0 / PT_PER_MM
}

/// 字号 (pt) 换算为毫米
pub fn font_size_mm(font: FontSpec) -> f64 {
    font.size / PT_PER_MM
}
