// ==========================================
// 报表全流程测试
// ==========================================
// 测试目标: CSV 文件 → ConsolidationReportService → PDF 文件
// ==========================================


use chrono::NaiveDate;
use guide_consolidator::config::{ConfigManager, DateLanguage};
use guide_consolidator::engine::{ConsolidationReportService, ReportError, ReportRequest};
use guide_consolidator::importer::{RecordSource, UniversalFileParser};
use guide_consolidator::logging;
use std::io::Write;
use tempfile::{tempdir, NamedTempFile};
use test_helpers::{as_str_rows, create_batch_file, create_comparison_file, sequential_batch_rows};

fn request() -> ReportRequest {
    ReportRequest::new(NaiveDate::from_ymd_opt(2025, 3, 7).unwrap(), "15").with_time("18:30")
}

#[test]
fn test_full_pipeline_writes_pdf() {
    logging::init_test();

    let rows = sequential_batch_rows("G", 120);
    let batch1 = create_batch_file(&as_str_rows(&rows[..60])).unwrap();
    let batch2 = create_batch_file(&as_str_rows(&rows[60..])).unwrap();
    let comparison = create_comparison_file(&[("G00003", "4"), ("G00100", "2")]).unwrap();

    let parser = UniversalFileParser;
    let batches = parser
        .read_batches(&[batch1.path(), batch2.path()])
        .unwrap();
    let comp = parser.read_comparison_table(comparison.path()).unwrap();

    let service = ConsolidationReportService::default();
    let output = service.generate(&request(), &batches, Some(&comp)).unwrap();

    assert_eq!(output.file_name, "Consolidated_15_07-03-2025.pdf");
    assert_eq!(output.total_count, 120);
    assert!(output.document.starts_with(b"%PDF-"));
    assert_eq!(output.layout.rows_drawn, 120);

    let dir = tempdir().unwrap();
    let path = output.write_to_dir(dir.path()).unwrap();
    assert_eq!(path, dir.path().join("Consolidated_15_07-03-2025.pdf"));
    assert_eq!(std::fs::read(&path).unwrap(), output.document);
}

#[test]
fn test_sorted_batch_puts_numeric_last() {
    let rows = sequential_batch_rows("G", 5);
    let batch = create_batch_file(&as_str_rows(&rows)).unwrap();
    let comparison = create_comparison_file(&[("G00000", "9"), ("G00004", "1")]).unwrap();

    let parser = UniversalFileParser;
    let batches = vec![parser.read_batch(batch.path()).unwrap()];
    let comp = parser.read_comparison_table(comparison.path()).unwrap();

    let consolidated = ConsolidationReportService::default()
        .consolidate(&batches, Some(&comp))
        .unwrap();

    let guides: Vec<&str> = consolidated.records().iter().map(|r| r.guide_id()).collect();
    assert_eq!(guides, vec!["G00001", "G00002", "G00003", "G00004", "G00000"]);
}

#[test]
fn test_config_file_changes_date_language() {
    let mut config_file = NamedTempFile::new().unwrap();
    write!(
        config_file,
        r#"{{"date": {{"language": "ENGLISH", "pattern": "%B %d, %Y"}}}}"#
    )
    .unwrap();

    let manager = ConfigManager::load(Some(config_file.path())).unwrap();
    assert_eq!(manager.source(), Some(config_file.path()));
    assert_eq!(manager.config().date.language, DateLanguage::English);

    let batch = create_batch_file(&[("A1", "", "")]).unwrap();
    let comparison = create_comparison_file(&[]).unwrap();
    let parser = UniversalFileParser;
    let batches = vec![parser.read_batch(batch.path()).unwrap()];
    let comp = parser.read_comparison_table(comparison.path()).unwrap();

    let service = ConsolidationReportService::new(manager.into_config());
    let canvas = guide_consolidator::RecordingCanvas::new(210.0, 297.0);
    let (json, report) = service
        .generate_with_canvas(&request(), &batches, Some(&comp), canvas)
        .unwrap();

    let text = String::from_utf8(json).unwrap();
    assert!(text.contains("Fecha: March 07, 2025"));
    assert!(text.contains("Hora: 18:30"));
    // 文件名日期格式固定
    assert_eq!(report.file_name, "Consolidated_15_07-03-2025.pdf");
}

#[test]
fn test_invalid_config_is_rejected() {
    let result = ConfigManager::from_json_str(r#"{"geometry": {"bottom_margin": 290}}"#);
    assert!(result.is_err());
}

#[test]
fn test_missing_comparison_produces_no_output() {
    let batch = create_batch_file(&[("A1", "", "")]).unwrap();
    let batches = vec![UniversalFileParser.read_batch(batch.path()).unwrap()];

    let result = ConsolidationReportService::default().generate(&request(), &batches, None);

    assert!(matches!(result, Err(ReportError::MissingComparisonTable)));
}

#[test]
fn test_unsupported_extension() {
    let file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
    let result = UniversalFileParser.read_batch(file.path());
    assert!(result.is_err());
}
