// ==========================================
// guías 合并系统 - 渲染层
// ==========================================
// 职责: 画布抽象、PDF 输出、字宽测量、单元格显示格式
// 红线: 不含分页决策,分页由 engine::pagination 负责
// ==========================================

pub mod canvas;
pub mod display;
pub mod error;
pub mod font_metrics;
pub mod pdf_canvas;
pub mod recording;

// 重导出核心类型
pub use canvas::{Align, Canvas, Cell, Color, FontSpec, FontWeight};
pub use display::destination_display;
pub use error::{RenderError, RenderResult};
pub use pdf_canvas::PdfCanvas;
pub use recording::{DrawOp, RecordingCanvas};
