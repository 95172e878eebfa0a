// ==========================================
// guías 合并系统 - 版面绘制引擎
// ==========================================
// 输入: ConsolidatedBatch + 分页规划 + 报表配置
// 输出: 对 Canvas 的绘制指令序列
// 内容: 首页抬头 → 各页左右表格 → 签名区 → 每页页脚
// 红线: 签名区只出现一次,位于最后一行数据之后
// ==========================================

use crate::config::report_config::ReportConfig;
use crate::domain::shipment::{ConsolidatedBatch, ShipmentRecord};
use crate::domain::types::TableSide;
use crate::engine::error::{ReportError, ReportResult};
use crate::engine::pagination::{PagePlan, PaginationPlanner};
use crate::render::canvas::{Align, Canvas, Cell, Color, FontSpec};
use crate::render::display::destination_display;
use serde::Serialize;
use tracing::{debug, info};

const TITLE_FONT: FontSpec = FontSpec::bold(17.0);
const BANNER_FIELD_FONT: FontSpec = FontSpec::bold(10.0);
const TABLE_HEADER_FONT: FontSpec = FontSpec::bold(7.0);
const TABLE_ROW_FONT: FontSpec = FontSpec::regular(5.0);
const FOOTER_FONT: FontSpec = FontSpec::italic(6.0);
const SIGNATURE_NAME_FONT: FontSpec = FontSpec::regular(10.0);
const SIGNATURE_LABEL_FONT: FontSpec = FontSpec::bold(12.0);

const TITLE_HEIGHT: f64 = 5.0;
const BANNER_FIELD_WIDTH: f64 = 40.0;
const BANNER_FIELD_HEIGHT: f64 = 5.0;
const FOOTER_HEIGHT: f64 = 4.0;
const SIGNATURE_TEXT_HEIGHT: f64 = 5.0;
const BOTTOM_TOLERANCE: f64 = 1e-6;

// ==========================================
// ReportHeader - 首页抬头内容
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportHeader {
    pub date_text: String, // 已格式化的日期
    pub consolidation_id: String,
    pub time: String,
    pub total_count: usize,
}

// ==========================================
// LayoutSummary - 绘制结果统计
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutSummary {
    pub pages: usize,
    pub rows_drawn: usize,
    pub plans: Vec<PagePlan>,
    pub signature_page: usize,
    pub signature_y: f64,
}

/// 单次排版的游标状态
#[derive(Debug, Default)]
struct LayoutCursor {
    rows_consumed: usize,
    last_left_bottom: Option<f64>, // 最近一个左表 (无左表时为右表) 的底部 y
}

// ==========================================
// LayoutEngine
// ==========================================
pub struct LayoutEngine<'a> {
    config: &'a ReportConfig,
}

impl<'a> LayoutEngine<'a> {
    pub fn new(config: &'a ReportConfig) -> Self {
        Self { config }
    }

    /// 绘制整份文档
    ///
    /// # 返回
    /// - Ok(LayoutSummary): 页数、已绘制行数、签名区位置
    /// - Err: 几何配置非法、分页停滞、画布错误
    pub fn render<C: Canvas>(
        &self,
        batch: &ConsolidatedBatch,
        header: &ReportHeader,
        canvas: &mut C,
    ) -> ReportResult<LayoutSummary> {
        let geometry = &self.config.geometry;
        let plans = PaginationPlanner::new(geometry).plan(batch.total_count())?;

        canvas.add_page()?;
        self.draw_banner(canvas, header)?;

        let mut cursor = LayoutCursor::default();

        if plans.is_empty() {
            // 无数据行: 仍输出左表表头
            self.draw_table(canvas, TableSide::Left, geometry.first_page_start_y, &[])?;
            let bottom = self.settled_bottom(canvas, geometry.first_page_start_y, 0)?;
            cursor.last_left_bottom = Some(bottom);
        }

        for plan in &plans {
            if plan.page_index > 0 {
                self.draw_footer(canvas)?;
                canvas.add_page()?;
            }

            if plan.left_rows > 0 {
                let rows = batch.slice(plan.first_row, plan.left_rows);
                self.draw_table(canvas, TableSide::Left, plan.start_y, rows)?;
                let bottom = self.settled_bottom(canvas, plan.start_y, rows.len())?;
                cursor.last_left_bottom = Some(bottom);
            }

            if plan.right_rows > 0 {
                let rows = batch.slice(plan.right_first_row(), plan.right_rows);
                self.draw_table(canvas, TableSide::Right, plan.start_y, rows)?;
                let bottom = self.settled_bottom(canvas, plan.start_y, rows.len())?;
                if plan.left_rows == 0 {
                    cursor.last_left_bottom = Some(bottom);
                }
            }

            cursor.rows_consumed += plan.rows();
            debug!(
                page = canvas.page_number(),
                rows_consumed = cursor.rows_consumed,
                "页面绘制完成"
            );
        }

        let (signature_page, signature_y) =
            self.draw_signatures(canvas, cursor.last_left_bottom.unwrap_or(0.0))?;
        self.draw_footer(canvas)?;

        let summary = LayoutSummary {
            pages: canvas.page_number(),
            rows_drawn: cursor.rows_consumed,
            plans,
            signature_page,
            signature_y,
        };
        info!(
            pages = summary.pages,
            rows_drawn = summary.rows_drawn,
            signature_page,
            "版面绘制完成"
        );
        Ok(summary)
    }

    // ==========================================
    // 首页抬头与页脚
    // ==========================================

    fn draw_banner<C: Canvas>(&self, canvas: &mut C, header: &ReportHeader) -> ReportResult<()> {
        let banner = &self.config.banner;
        let width = canvas.page_width() - 2.0 * banner.margin_x;

        canvas.set_text_color(Color::BLACK);
        canvas.set_font(TITLE_FONT);
        canvas.set_cursor(banner.margin_x, banner.title_y);
        canvas.draw_cell(&Cell::text(width, TITLE_HEIGHT, &banner.title, Align::Center))?;

        canvas.set_font(BANNER_FIELD_FONT);
        let fields = [
            (banner.date_position, format!("Fecha: {}", header.date_text)),
            (
                banner.consolidation_position,
                format!("Consolidado: {}", header.consolidation_id),
            ),
            (banner.time_position, format!("Hora: {}", header.time)),
            (
                banner.packages_position,
                format!("Paquetes entregados: {}", header.total_count),
            ),
        ];
        for ((x, y), text) in &fields {
            canvas.set_cursor(*x, *y);
            canvas.draw_cell(&Cell::text(
                BANNER_FIELD_WIDTH,
                BANNER_FIELD_HEIGHT,
                text,
                Align::Left,
            ))?;
        }
        Ok(())
    }

    fn draw_footer<C: Canvas>(&self, canvas: &mut C) -> ReportResult<()> {
        let banner = &self.config.banner;
        let width = canvas.page_width() - 2.0 * banner.margin_x;
        let text = format!("Página {}", canvas.page_number());

        canvas.set_text_color(Color::BLACK);
        canvas.set_font(FOOTER_FONT);
        let y = canvas.page_height() - banner.footer_offset;
        canvas.set_cursor(banner.margin_x, y);
        canvas.draw_cell(&Cell::text(width, FOOTER_HEIGHT, &text, Align::Center))?;
        Ok(())
    }

    // ==========================================
    // 表格
    // ==========================================

    /// 绘制表头 + 数据行,光标停在表格左下角
    fn draw_table<C: Canvas>(
        &self,
        canvas: &mut C,
        side: TableSide,
        start_y: f64,
        rows: &[ShipmentRecord],
    ) -> ReportResult<()> {
        let geometry = &self.config.geometry;
        let x = match side {
            TableSide::Left => geometry.left_table_x,
            TableSide::Right => geometry.right_table_x,
        };
        let (width, height) = (geometry.column_width, geometry.row_height);

        canvas.set_cursor(x, start_y);
        canvas.set_font(TABLE_HEADER_FONT);
        canvas.set_fill_color(Color::HEADER_FILL);
        canvas.set_text_color(Color::WHITE);
        for label in &self.config.column_labels {
            canvas.draw_cell(&Cell::bordered(width, height, label).filled())?;
        }

        canvas.set_text_color(Color::BLACK);
        canvas.set_font(TABLE_ROW_FONT);

        let mut y = start_y + height;
        for record in rows {
            canvas.set_cursor(x, y);
            for text in [record.guide_id(), record.field_b(), record.field_c()] {
                canvas.draw_cell(&Cell::bordered(width, height, text))?;
            }
            let destination = destination_display(record.destination());
            canvas.draw_cell(&Cell::bordered(width, height, &destination))?;
            y += height;
        }

        canvas.set_cursor(x, y);
        debug!(%side, start_y, rows = rows.len(), bottom = y, "表格绘制完成");
        Ok(())
    }

    /// 从画布光标读取表格底部,并与分页规划的底部核对
    fn settled_bottom<C: Canvas>(&self, canvas: &C, start_y: f64, rows: usize) -> ReportResult<f64> {
        let expected = PaginationPlanner::new(&self.config.geometry).table_bottom(start_y, rows);
        let actual = canvas.current_y();
        if (actual - expected).abs() > BOTTOM_TOLERANCE {
            return Err(ReportError::TableBottomMismatch {
                page: canvas.page_number(),
                expected,
                actual,
            });
        }
        Ok(actual)
    }

    // ==========================================
    // 签名区
    // ==========================================

    /// 绘制签名区,返回 (页码, 顶部 y)
    fn draw_signatures<C: Canvas>(
        &self,
        canvas: &mut C,
        last_left_bottom: f64,
    ) -> ReportResult<(usize, f64)> {
        let geometry = &self.config.geometry;
        let signature = &self.config.signature;

        let mut y = last_left_bottom + geometry.signature_offset;
        if y > geometry.signature_limit_y() {
            debug!(y, limit = geometry.signature_limit_y(), "签名区越界,换页");
            self.draw_footer(canvas)?;
            canvas.add_page()?;
            y = geometry.signature_restart_y;
        }

        canvas.set_text_color(Color::BLACK);
        self.draw_signature_group(
            canvas,
            signature.left_x,
            y,
            signature.dispatcher_name.as_deref(),
            &signature.dispatcher_label,
        )?;
        self.draw_signature_group(
            canvas,
            signature.right_x,
            y,
            None,
            &signature.carrier_label,
        )?;

        Ok((canvas.page_number(), y))
    }

    /// 一组签名: 可选姓名 + 横线 + 角色标签,均以横线为中心
    fn draw_signature_group<C: Canvas>(
        &self,
        canvas: &mut C,
        x: f64,
        y: f64,
        name: Option<&str>,
        label: &str,
    ) -> ReportResult<()> {
        let signature = &self.config.signature;
        let line_length = signature.line_length;

        if let Some(name) = name.filter(|n| !n.is_empty()) {
            canvas.set_font(SIGNATURE_NAME_FONT);
            let text_width = canvas.measure_text_width(name);
            canvas.set_cursor(x + (line_length - text_width) / 2.0, y);
            canvas.draw_cell(&Cell::text(text_width, SIGNATURE_TEXT_HEIGHT, name, Align::Left))?;
        }

        let line_y = y + signature.line_offset;
        canvas.draw_line(x, line_y, x + line_length, line_y)?;

        canvas.set_font(SIGNATURE_LABEL_FONT);
        let text_width = canvas.measure_text_width(label);
        canvas.set_cursor(x + (line_length - text_width) / 2.0, y + signature.label_offset);
        canvas.draw_cell(&Cell::text(text_width, SIGNATURE_TEXT_HEIGHT, label, Align::Left))?;
        Ok(())
    }
}
