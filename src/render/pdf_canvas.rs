// ==========================================
// guías 合并系统 - PDF 画布
// ==========================================
// 基于 pdf-writer 的 Canvas 实现
// 字体: 标准 Type1 Helvetica 系列 (WinAnsiEncoding),不嵌入字体文件
// 内部坐标为毫米/左上原点,输出时换算为 pt/左下原点
// ==========================================

use crate::render::canvas::{Align, Canvas, Cell, Color, FontSpec, FontWeight};
use crate::render::error::{RenderError, RenderResult};
use crate::render::font_metrics::{font_size_mm, text_width_mm, PT_PER_MM};
use pdf_writer::{Content, Name, Pdf, Rect, Ref, Str, TextStr};
use tracing::debug;

/// 单元格文字的水平内边距 (mm)
const CELL_MARGIN: f64 = 1.0;

/// 线宽 (mm)
const LINE_WIDTH: f64 = 0.2;

const FONT_REGULAR: Name<'static> = Name(b"F1");
const FONT_BOLD: Name<'static> = Name(b"F2");
const FONT_ITALIC: Name<'static> = Name(b"F3");

const FONTS: [(Name<'static>, &[u8]); 3] = [
    (FONT_REGULAR, b"Helvetica"),
    (FONT_BOLD, b"Helvetica-Bold"),
    (FONT_ITALIC, b"Helvetica-Oblique"),
];

fn pt(mm: f64) -> f32 {
    (mm * PT_PER_MM) as f32
}

fn font_resource(weight: FontWeight) -> Name<'static> {
    match weight {
        FontWeight::Regular => FONT_REGULAR,
        FontWeight::Bold => FONT_BOLD,
        FontWeight::Italic => FONT_ITALIC,
    }
}

fn channel(value: u8) -> f32 {
    value as f32 / 255.0
}

/// 文本转 WinAnsi 字节,表外字符以 '?' 代替
fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| {
            let code = c as u32;
            if code < 256 {
                code as u8
            } else {
                b'?'
            }
        })
        .collect()
}

// ==========================================
// PdfCanvas
// ==========================================
pub struct PdfCanvas {
    page_width: f64,
    page_height: f64,
    title: Option<String>,
    pages: Vec<Content>,
    x: f64,
    y: f64,
    font: FontSpec,
    fill_color: Color,
    text_color: Color,
}

impl PdfCanvas {
    /// 创建画布 (单位 mm)
    pub fn new(page_width: f64, page_height: f64) -> Self {
        Self {
            page_width,
            page_height,
            title: None,
            pages: Vec::new(),
            x: 0.0,
            y: 0.0,
            font: FontSpec::default(),
            fill_color: Color::WHITE,
            text_color: Color::BLACK,
        }
    }

    /// 设置文档标题 (写入 PDF 文档信息)
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    fn current_content(&mut self, what: &str) -> RenderResult<&mut Content> {
        self.pages
            .last_mut()
            .ok_or_else(|| RenderError::NoPage(what.to_string()))
    }

    fn check_finite(values: &[f64]) -> RenderResult<()> {
        if values.iter().all(|v| v.is_finite()) {
            Ok(())
        } else {
            Err(RenderError::InvalidCoordinate(format!("{:?}", values)))
        }
    }
}

impl Canvas for PdfCanvas {
    fn add_page(&mut self) -> RenderResult<()> {
        self.pages.push(Content::new());
        self.x = 0.0;
        self.y = 0.0;
        Ok(())
    }

    fn page_number(&self) -> usize {
        self.pages.len()
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

    fn set_fill_color(&mut self, color: Color) {
        self.fill_color = color;
    }

    fn set_text_color(&mut self, color: Color) {
        self.text_color = color;
    }

    fn draw_cell(&mut self, cell: &Cell<'_>) -> RenderResult<()> {
        let (x, y) = (self.x, self.y);
        Self::check_finite(&[x, y, cell.width, cell.height])?;

        let page_height = self.page_height;
        let font = self.font;
        let fill = self.fill_color;
        let text_color = self.text_color;
        let text_width = self.measure_text_width(cell.text);

        let content = self.current_content(cell.text)?;

        if cell.fill || cell.border {
            if cell.fill {
                content.set_fill_rgb(channel(fill.r), channel(fill.g), channel(fill.b));
            }
            if cell.border {
                content.set_stroke_gray(0.0);
                content.set_line_width(pt(LINE_WIDTH));
            }
            content.rect(
                pt(x),
                pt(page_height - y - cell.height),
                pt(cell.width),
                pt(cell.height),
            );
            match (cell.fill, cell.border) {
                (true, true) => content.fill_nonzero_and_stroke(),
                (true, false) => content.fill_nonzero(),
                _ => content.stroke(),
            };
        }

        if !cell.text.is_empty() {
            let text_x = match cell.align {
                Align::Left => x + CELL_MARGIN,
                Align::Center => x + (cell.width - text_width) / 2.0,
                Align::Right => x + cell.width - CELL_MARGIN - text_width,
            };
            let baseline = y + 0.5 * cell.height + 0.3 * font_size_mm(font);
            let bytes = encode_win_ansi(cell.text);

            content.set_fill_rgb(
                channel(text_color.r),
                channel(text_color.g),
                channel(text_color.b),
            );
            content
                .begin_text()
                .set_font(font_resource(font.weight), font.size as f32)
                .next_line(pt(text_x), pt(page_height - baseline))
                .show(Str(&bytes))
                .end_text();
        }

        self.x += cell.width;
        Ok(())
    }

    fn draw_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) -> RenderResult<()> {
        Self::check_finite(&[x1, y1, x2, y2])?;
        let page_height = self.page_height;
        let content = self.current_content("line")?;

        content.set_stroke_gray(0.0);
        content.set_line_width(pt(LINE_WIDTH));
        content.move_to(pt(x1), pt(page_height - y1));
        content.line_to(pt(x2), pt(page_height - y2));
        content.stroke();
        Ok(())
    }

    fn measure_text_width(&self, text: &str) -> f64 {
        text_width_mm(text, self.font)
    }

    fn serialize(self) -> RenderResult<Vec<u8>> {
        if self.pages.is_empty() {
            return Err(RenderError::SerializeError("文档没有任何页面".to_string()));
        }

        let mut pdf = Pdf::new();
        let mut next_id = 1;
        let mut alloc = || {
            let id = Ref::new(next_id);
            next_id += 1;
            id
        };

        let catalog_id = alloc();
        let pages_id = alloc();
        let info_id = alloc();
        let font_ids: Vec<Ref> = FONTS.iter().map(|_| alloc()).collect();
        let page_ids: Vec<(Ref, Ref)> = self.pages.iter().map(|_| (alloc(), alloc())).collect();

        pdf.catalog(catalog_id).pages(pages_id);
        pdf.pages(pages_id)
            .kids(page_ids.iter().map(|(page_id, _)| *page_id))
            .count(page_ids.len() as i32);

        if let Some(title) = &self.title {
            pdf.document_info(info_id)
                .title(TextStr(title))
                .producer(TextStr("guide-consolidator"));
        }

        for ((_, base_font), font_id) in FONTS.iter().zip(&font_ids) {
            pdf.type1_font(*font_id)
                .base_font(Name(*base_font))
                .encoding_predefined(Name(b"WinAnsiEncoding"));
        }

        let media_box = Rect::new(0.0, 0.0, pt(self.page_width), pt(self.page_height));
        let page_count = self.pages.len();
        for (content, (page_id, content_id)) in self.pages.into_iter().zip(page_ids) {
            let data = content.finish();
            pdf.stream(content_id, &data);

            let mut page = pdf.page(page_id);
            page.media_box(media_box)
                .parent(pages_id)
                .contents(content_id);
            let mut resources = page.resources();
            let mut fonts = resources.fonts();
            for ((name, _), font_id) in FONTS.iter().zip(&font_ids) {
                fonts.pair(*name, *font_id);
            }
        }

        let bytes = pdf.finish();
        debug!(pages = page_count, bytes = bytes.len(), "PDF 序列化完成");
        Ok(bytes)
    }
}
