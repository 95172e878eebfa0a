// ==========================================
// guías 合并系统 - 报表编排器
// ==========================================
// 用途: 协调合并引擎与版面引擎的执行顺序
// 流程: 合并/分类/排序 → 分页规划 → 绘制 → 序列化
// 红线: 单次调用同步完成,调用之间无共享可变状态
// ==========================================

use crate::config::date_format::DateFormatter;
use crate::config::report_config::ReportConfig;
use crate::domain::shipment::ConsolidatedBatch;
use crate::engine::consolidation::ConsolidationEngine;
use crate::engine::error::ReportResult;
use crate::engine::layout::{LayoutEngine, LayoutSummary, ReportHeader};
use crate::importer::source_table::SourceTable;
use crate::render::canvas::Canvas;
use crate::render::pdf_canvas::PdfCanvas;
use chrono::NaiveDate;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// 默认发货时间
pub const DEFAULT_DISPATCH_TIME: &str = "17:00";

// ==========================================
// ReportRequest - 一次生成请求
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRequest {
    pub date: NaiveDate,
    pub consolidation_id: String,
    pub time: String,
}

impl ReportRequest {
    pub fn new(date: NaiveDate, consolidation_id: impl Into<String>) -> Self {
        Self {
            date,
            consolidation_id: consolidation_id.into(),
            time: DEFAULT_DISPATCH_TIME.to_string(),
        }
    }

    pub fn with_time(mut self, time: impl Into<String>) -> Self {
        self.time = time.into();
        self
    }
}

// ==========================================
// ReportOutput - 生成结果
// ==========================================
#[derive(Debug, Clone)]
pub struct ReportOutput {
    pub file_name: String,
    pub document: Vec<u8>,
    pub total_count: usize,
    pub layout: LayoutSummary,
}

impl ReportOutput {
    /// 写入目标目录,返回完整路径
    pub fn write_to_dir(&self, dir: &Path) -> std::io::Result<PathBuf> {
        std::fs::create_dir_all(dir)?;
        let path = dir.join(&self.file_name);
        std::fs::write(&path, &self.document)?;
        info!(path = %path.display(), bytes = self.document.len(), "文档已写出");
        Ok(path)
    }
}

/// 试排结果 (不序列化文档)
#[derive(Debug, Clone, Serialize)]
pub struct LayoutReport {
    pub file_name: String,
    pub total_count: usize,
    pub layout: LayoutSummary,
}

// ==========================================
// ConsolidationReportService - 报表编排器
// ==========================================
pub struct ConsolidationReportService {
    config: ReportConfig,
    consolidation: ConsolidationEngine,
    date_formatter: DateFormatter,
}

impl ConsolidationReportService {
    /// 创建编排器实例
    ///
    /// # 参数
    /// - config: 已校验的报表配置
    pub fn new(config: ReportConfig) -> Self {
        Self {
            date_formatter: DateFormatter::new(config.date.clone()),
            consolidation: ConsolidationEngine::new(),
            config,
        }
    }

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// 下载文件名: Consolidated_<id>_<dd-mm-yyyy>.pdf
    pub fn file_name(&self, request: &ReportRequest) -> String {
        format!(
            "Consolidated_{}_{}.pdf",
            request.consolidation_id,
            self.date_formatter.file_date(request.date)
        )
    }

    /// 只执行合并阶段 (预览使用)
    pub fn consolidate(
        &self,
        batches: &[SourceTable],
        comparison: Option<&SourceTable>,
    ) -> ReportResult<ConsolidatedBatch> {
        self.consolidation.consolidate(batches, comparison)
    }

    /// 生成 PDF 文档
    ///
    /// # 返回
    /// - Ok(ReportOutput): 文档字节 + 文件名 + 总行数
    /// - Err: 任一阶段失败,不返回部分文档
    pub fn generate(
        &self,
        request: &ReportRequest,
        batches: &[SourceTable],
        comparison: Option<&SourceTable>,
    ) -> ReportResult<ReportOutput> {
        let geometry = &self.config.geometry;
        let canvas = PdfCanvas::new(geometry.page_width, geometry.page_height)
            .with_title(format!("Consolidado {}", request.consolidation_id));

        let (document, report) = self.generate_with_canvas(request, batches, comparison, canvas)?;

        info!(
            file_name = %report.file_name,
            bytes = document.len(),
            pages = report.layout.pages,
            "PDF 生成完成"
        );

        Ok(ReportOutput {
            file_name: report.file_name,
            document,
            total_count: report.total_count,
            layout: report.layout,
        })
    }

    /// 在任意画布上执行完整流程,返回序列化结果与排版统计
    pub fn generate_with_canvas<C: Canvas>(
        &self,
        request: &ReportRequest,
        batches: &[SourceTable],
        comparison: Option<&SourceTable>,
        mut canvas: C,
    ) -> ReportResult<(Vec<u8>, LayoutReport)> {
        info!(
            consolidation_id = %request.consolidation_id,
            date = %request.date,
            batches = batches.len(),
            "开始生成合并单"
        );

        // ==========================================
        // 步骤1: 合并、分类、排序
        // ==========================================
        let batch = self.consolidate(batches, comparison)?;

        // ==========================================
        // 步骤2: 分页与绘制
        // ==========================================
        let report = self.layout(request, &batch, &mut canvas)?;

        // ==========================================
        // 步骤3: 序列化
        // ==========================================
        debug!("步骤3: 序列化文档");
        let document = canvas.serialize()?;

        Ok((document, report))
    }

    /// 在画布上绘制已合并的批次 (不序列化)
    pub fn layout<C: Canvas>(
        &self,
        request: &ReportRequest,
        batch: &ConsolidatedBatch,
        canvas: &mut C,
    ) -> ReportResult<LayoutReport> {
        let header = ReportHeader {
            date_text: self.date_formatter.format(request.date),
            consolidation_id: request.consolidation_id.clone(),
            time: request.time.clone(),
            total_count: batch.total_count(),
        };

        let layout = LayoutEngine::new(&self.config).render(batch, &header, canvas)?;

        Ok(LayoutReport {
            file_name: self.file_name(request),
            total_count: batch.total_count(),
            layout,
        })
    }
}

impl Default for ConsolidationReportService {
    fn default() -> Self {
        Self::new(ReportConfig::default())
    }
}
