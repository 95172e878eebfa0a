// ==========================================
// guías 合并系统 - 命令行入口
// ==========================================
// 用途: 读取 guía 批次与对照表,生成合并单 PDF
// 输出: PDF 写入下载目录; --preview / --dry-run 输出 JSON 到 stdout
// ==========================================

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use guide_consolidator::engine::{DEFAULT_DISPATCH_TIME, LayoutReport};
use guide_consolidator::logging::{self, LogFormat};
use guide_consolidator::{
    ConfigManager, ConsolidationReportService, RecordSource, RecordingCanvas, ReportRequest,
    UniversalFileParser,
};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(
    name = "guide-consolidator",
    version,
    about = "Consolida lotes de guías y genera el PDF del consolidado"
)]
struct Opt {
    /// Fecha del consolidado (YYYY-MM-DD)
    #[arg(long)]
    date: NaiveDate,

    /// Número de consolidado
    #[arg(long)]
    consolidation: String,

    /// Hora de despacho
    #[arg(long, default_value = DEFAULT_DISPATCH_TIME)]
    time: String,

    /// Archivo de lote de guías (repetible, en orden de carga)
    #[arg(long = "base", required = true)]
    bases: Vec<PathBuf>,

    /// Tabla de comparación (columna H = destino, columna M = guía)
    #[arg(long)]
    comparison: PathBuf,

    /// Directorio de salida (por defecto: Descargas, o el directorio actual)
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Archivo de configuración JSON
    #[arg(long)]
    config: Option<PathBuf>,

    /// Imprime los primeros N registros consolidados como JSON
    #[arg(long, value_name = "N")]
    preview: Option<usize>,

    /// Solo calcula la paginación, sin escribir el PDF
    #[arg(long)]
    dry_run: bool,

    /// Logs en formato JSON
    #[arg(long)]
    json_logs: bool,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let opt = Opt::parse();

    let format = if opt.json_logs {
        LogFormat::Json
    } else {
        LogFormat::Text
    };
    logging::init_with(format, "info");

    tracing::info!(
        version = guide_consolidator::VERSION,
        "{} 启动",
        guide_consolidator::APP_NAME
    );

    // 配置
    let manager = ConfigManager::load(opt.config.as_deref()).context("load configuration")?;
    tracing::debug!(snapshot = %manager.get_config_snapshot()?, "生效配置");
    let service = ConsolidationReportService::new(manager.into_config());

    // 输入
    let parser = UniversalFileParser;
    let base_paths: Vec<&Path> = opt.bases.iter().map(PathBuf::as_path).collect();
    let batches = parser
        .read_batches(&base_paths)
        .context("read guide batches")?;
    let comparison = parser
        .read_comparison_table(&opt.comparison)
        .with_context(|| format!("read comparison table {}", opt.comparison.display()))?;

    let request = ReportRequest::new(opt.date, opt.consolidation.clone()).with_time(opt.time.clone());

    if let Some(limit) = opt.preview {
        let batch = service.consolidate(&batches, Some(&comparison))?;
        let preview = batch.slice(0, limit);
        println!("{}", serde_json::to_string_pretty(preview)?);
        if !opt.dry_run {
            return Ok(());
        }
    }

    if opt.dry_run {
        let canvas = RecordingCanvas::new(
            service.config().geometry.page_width,
            service.config().geometry.page_height,
        );
        let (_, report): (Vec<u8>, LayoutReport) =
            service.generate_with_canvas(&request, &batches, Some(&comparison), canvas)?;
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let output = service.generate(&request, &batches, Some(&comparison))?;
    let output_dir = opt.output_dir.unwrap_or_else(default_output_dir);
    let path = output
        .write_to_dir(&output_dir)
        .with_context(|| format!("write {}", output.file_name))?;

    println!(
        "{} ({} paquetes, {} páginas)",
        path.display(),
        output.total_count,
        output.layout.pages
    );
    Ok(())
}

/// 默认输出目录: 用户下载目录,否则当前目录
fn default_output_dir() -> PathBuf {
    dirs::download_dir().unwrap_or_else(|| PathBuf::from("."))
}
