// ==========================================
// guías 合并系统 - 记录型画布
// ==========================================
// 不产生 PDF,只记录每条绘制指令
// 用于试排 (dry-run) 与测试断言
// ==========================================

use crate::render::canvas::{Align, Canvas, Cell, Color, FontSpec};
use crate::render::error::{RenderError, RenderResult};
use crate::render::font_metrics::text_width_mm;
use serde::Serialize;

// ==========================================
// DrawOp - 已执行的绘制指令
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawOp {
    AddPage {
        page: usize,
    },
    Cell {
        page: usize,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        text: String,
        border: bool,
        fill: bool,
        align: Align,
        font: FontSpec,
        text_color: Color,
    },
    Line {
        page: usize,
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
    },
}

// ==========================================
// RecordingCanvas
// ==========================================
#[derive(Debug, Clone)]
pub struct RecordingCanvas {
    page_width: f64,
    page_height: f64,
    page: usize,
    x: f64,
    y: f64,
    font: FontSpec,
    text_color: Color,
    ops: Vec<DrawOp>,
}

impl RecordingCanvas {
    pub fn new(page_width: f64, page_height: f64) -> Self {
        Self {
            page_width,
            page_height,
            page: 0,
            x: 0.0,
            y: 0.0,
            font: FontSpec::default(),
            text_color: Color::BLACK,
            ops: Vec::new(),
        }
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn page_count(&self) -> usize {
        self.page
    }

    /// 所有单元格文本 (按绘制顺序)
    pub fn cell_texts(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Cell { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// 第 page 页上的指令
    pub fn ops_on_page(&self, page: usize) -> impl Iterator<Item = &DrawOp> {
        self.ops.iter().filter(move |op| match op {
            DrawOp::AddPage { page: p } => *p == page,
            DrawOp::Cell { page: p, .. } => *p == page,
            DrawOp::Line { page: p, .. } => *p == page,
        })
    }

    pub fn current_x(&self) -> f64 {
        self.x
    }

    fn require_page(&self, what: &str) -> RenderResult<usize> {
        if self.page == 0 {
            return Err(RenderError::NoPage(what.to_string()));
        }
        Ok(self.page)
    }
}

impl Canvas for RecordingCanvas {
    fn add_page(&mut self) -> RenderResult<()> {
        self.page += 1;
        self.x = 0.0;
        self.y = 0.0;
        self.ops.push(DrawOp::AddPage { page: self.page });
        Ok(())
    }

    fn page_number(&self) -> usize {
        self.page
    }

    fn set_cursor(&mut self, x: f64, y: f64) {
        self.x = x;
        self.y = y;
    }

    fn current_y(&self) -> f64 {
        self.y
    }

    fn page_width(&self) -> f64 {
        self.page_width
    }

    fn page_height(&self) -> f64 {
        self.page_height
    }

    fn set_font(&mut self, font: FontSpec) {
        self.font = font;
    }

    fn set_fill_color(&mut self, _color: Color) {}

    fn set_text_color(&mut self, color: Color) {
        self.text_color = color;
    }

    fn draw_cell(&mut self, cell: &Cell<'_>) -> RenderResult<()> {
        let page = self.require_page(cell.text)?;
        self.ops.push(DrawOp::Cell {
            page,
            x: self.x,
            y: self.y,
            width: cell.width,
            height: cell.height,
            text: cell.text.to_string(),
            border: cell.border,
            fill: cell.fill,
            align: cell.align,
            font: self.font,
            text_color: self.text_color,
        });
        self.x += cell.width;
        Ok(())
    }

    fn draw_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) -> RenderResult<()> {
        let page = self.require_page("line")?;
        self.ops.push(DrawOp::Line { page, x1, y1, x2, y2 });
        Ok(())
    }

    fn measure_text_width(&self, text: &str) -> f64 {
        text_width_mm(text, self.font)
    }

    /// 输出指令列表的 JSON
    fn serialize(self) -> RenderResult<Vec<u8>> {
        serde_json::to_vec(&self.ops).map_err(|e| RenderError::SerializeError(e.to_string()))
    }
}
