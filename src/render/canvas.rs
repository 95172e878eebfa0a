// ==========================================
// guías 合并系统 - 画布接口
// ==========================================
// 排版引擎只通过 Canvas 下发绘制指令,不依赖具体 PDF 库
// 坐标: 毫米,原点在页面左上角,y 向下
// ==========================================

use crate::render::error::RenderResult;
use serde::Serialize;

// ==========================================
// 样式提示
// ==========================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FontWeight {
    Regular,
    Bold,
    Italic,
}

/// 字体样式提示 (字号单位: pt)
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FontSpec {
    pub weight: FontWeight,
    pub size: f64,
}

impl FontSpec {
    pub const fn regular(size: f64) -> Self {
        Self {
            weight: FontWeight::Regular,
            size,
        }
    }

    pub const fn bold(size: f64) -> Self {
        Self {
            weight: FontWeight::Bold,
            size,
        }
    }

    pub const fn italic(size: f64) -> Self {
        Self {
            weight: FontWeight::Italic,
            size,
        }
    }
}

impl Default for FontSpec {
    fn default() -> Self {
        Self::regular(10.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::gray(0);
    pub const WHITE: Color = Color::gray(255);
    pub const HEADER_FILL: Color = Color::gray(200);

    pub const fn gray(level: u8) -> Self {
        Self {
            r: level,
            g: level,
            b: level,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Align {
    Left,
    Center,
    Right,
}

// ==========================================
// Cell - 单元格绘制指令
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell<'a> {
    pub width: f64,
    pub height: f64,
    pub text: &'a str,
    pub border: bool,
    pub fill: bool,
    pub align: Align,
}

impl<'a> Cell<'a> {
    /// 带边框、居中的表格单元格
    pub fn bordered(width: f64, height: f64, text: &'a str) -> Self {
        Self {
            width,
            height,
            text,
            border: true,
            fill: false,
            align: Align::Center,
        }
    }

    /// 无边框文本
    pub fn text(width: f64, height: f64, text: &'a str, align: Align) -> Self {
        Self {
            width,
            height,
            text,
            border: false,
            fill: false,
            align,
        }
    }

    pub fn filled(mut self) -> Self {
        self.fill = true;
        self
    }
}

// ==========================================
// Canvas Trait
// ==========================================
// 实现者: PdfCanvas (PDF 输出), RecordingCanvas (记录指令)
pub trait Canvas {
    /// 新起一页,光标回到左上角
    fn add_page(&mut self) -> RenderResult<()>;

    /// 当前页码 (从 1 开始,尚未建页时为 0)
    fn page_number(&self) -> usize;

    fn set_cursor(&mut self, x: f64, y: f64);

    /// 光标 y (版面引擎据此读取表格底部)
    fn current_y(&self) -> f64;

    fn page_width(&self) -> f64;

    fn page_height(&self) -> f64;

    fn set_font(&mut self, font: FontSpec);

    fn set_fill_color(&mut self, color: Color);

    fn set_text_color(&mut self, color: Color);

    /// 在光标处绘制单元格,之后光标 x 右移 width,y 不变
    fn draw_cell(&mut self, cell: &Cell<'_>) -> RenderResult<()>;

    fn draw_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) -> RenderResult<()>;

    /// 以当前字体测量文本宽度 (mm)
    fn measure_text_width(&self, text: &str) -> f64;

    /// 结束文档并输出字节
    fn serialize(self) -> RenderResult<Vec<u8>>
    where
        Self: Sized;
}
