// ==========================================
// ConsolidationEngine 集成测试
// ==========================================
// 测试目标: 文件读取 → 合并 → 分类 → 排序
// ==========================================


use guide_consolidator::engine::{ConsolidationEngine, ReportError};
use guide_consolidator::importer::{RecordSource, UniversalFileParser};
use guide_consolidator::logging;
use guide_consolidator::ClassificationRule;
use std::path::Path;
use test_helpers::{create_batch_file, create_comparison_file, write_csv};

fn guide_ids(batch: &guide_consolidator::ConsolidatedBatch) -> Vec<&str> {
    batch.records().iter().map(|r| r.guide_id()).collect()
}

fn destinations(batch: &guide_consolidator::ConsolidatedBatch) -> Vec<&str> {
    batch.records().iter().map(|r| r.destination()).collect()
}

#[test]
fn test_two_batches_without_index_hits() {
    logging::init_test();

    let batch1 = create_batch_file(&[("A1", "x", "y"), ("SACO", "", "")]).unwrap();
    let batch2 = create_batch_file(&[("QU9", "", "")]).unwrap();
    let comparison = create_comparison_file(&[("ZZ1", "3")]).unwrap();

    let parser = UniversalFileParser;
    let batches = parser
        .read_batches(&[batch1.path(), batch2.path()])
        .unwrap();
    let comp = parser.read_comparison_table(comparison.path()).unwrap();

    let result = ConsolidationEngine::new()
        .consolidate(&batches, Some(&comp))
        .unwrap();

    assert_eq!(result.total_count(), 3);
    assert_eq!(guide_ids(&result), vec!["A1", "SACO", "QU9"]);
    assert_eq!(destinations(&result), vec!["AMBATO", "AMBATO", "QUITO"]);
}

#[test]
fn test_index_hit_moves_record_after_non_numeric() {
    logging::init_test();

    let batch1 = create_batch_file(&[("QU9", "", ""), ("A1", "x", "y")]).unwrap();
    let batch2 = create_batch_file(&[("SACO", "", "")]).unwrap();
    let comparison = create_comparison_file(&[("QU9", "5")]).unwrap();

    let parser = UniversalFileParser;
    let batches = parser
        .read_batches(&[batch1.path(), batch2.path()])
        .unwrap();
    let comp = parser.read_comparison_table(comparison.path()).unwrap();

    let result = ConsolidationEngine::new()
        .consolidate(&batches, Some(&comp))
        .unwrap();

    assert_eq!(guide_ids(&result), vec!["A1", "SACO", "QU9"]);
    assert_eq!(destinations(&result), vec!["AMBATO", "AMBATO", "5"]);
    assert_eq!(result.records()[2].rule(), ClassificationRule::QuitoPrefix);
}

#[test]
fn test_saco_ignores_index_entry() {
    logging::init_test();

    let batch = create_batch_file(&[("SACO", "b", "c")]).unwrap();
    let comparison = create_comparison_file(&[("SACO", "9")]).unwrap();

    let parser = UniversalFileParser;
    let batches = vec![parser.read_batch(batch.path()).unwrap()];
    let comp = parser.read_comparison_table(comparison.path()).unwrap();

    let result = ConsolidationEngine::new()
        .consolidate(&batches, Some(&comp))
        .unwrap();

    assert_eq!(destinations(&result), vec!["AMBATO"]);
    assert_eq!(result.records()[0].rule(), ClassificationRule::SacoLiteral);
}

#[test]
fn test_numeric_destinations_sorted_and_stable() {
    logging::init_test();

    let batch = create_batch_file(&[
        ("G1", "", ""),
        ("G2", "", ""),
        ("G3", "", ""),
        ("G4", "", ""),
        ("QUA", "", ""),
    ])
    .unwrap();
    let comparison =
        create_comparison_file(&[("G1", "12"), ("G2", "3"), ("G3", "12.0"), ("G4", "AMBATO")])
            .unwrap();

    let parser = UniversalFileParser;
    let batches = vec![parser.read_batch(batch.path()).unwrap()];
    let comp = parser.read_comparison_table(comparison.path()).unwrap();

    let result = ConsolidationEngine::new()
        .consolidate(&batches, Some(&comp))
        .unwrap();

    // 非数值 (AMBATO, QUITO) 在前,保持合并顺序; 12 与 12.0 保持合并顺序
    assert_eq!(guide_ids(&result), vec!["G4", "QUA", "G2", "G1", "G3"]);
    assert_eq!(destinations(&result), vec!["AMBATO", "QUITO", "3", "12", "12.0"]);
}

#[test]
fn test_duplicate_index_keys_last_write_wins() {
    logging::init_test();

    let batch = create_batch_file(&[("G1", "", "")]).unwrap();
    let comparison = create_comparison_file(&[("G1", "7"), ("G1", "8")]).unwrap();

    let parser = UniversalFileParser;
    let batches = vec![parser.read_batch(batch.path()).unwrap()];
    let comp = parser.read_comparison_table(comparison.path()).unwrap();

    let result = ConsolidationEngine::new()
        .consolidate(&batches, Some(&comp))
        .unwrap();

    assert_eq!(destinations(&result), vec!["8"]);
}

#[test]
fn test_narrow_comparison_table_is_rejected() {
    logging::init_test();

    let batch = create_batch_file(&[("G1", "", "")]).unwrap();
    let narrow = write_csv(&[vec!["G1".to_string(), "5".to_string()]]).unwrap();

    let parser = UniversalFileParser;
    let batches = vec![parser.read_batch(batch.path()).unwrap()];
    let comp = parser.read_comparison_table(narrow.path()).unwrap();

    let result = ConsolidationEngine::new().consolidate(&batches, Some(&comp));

    assert!(matches!(
        result,
        Err(ReportError::ComparisonTableTooNarrow { required: 13, actual: 2, .. })
    ));
}

#[test]
fn test_missing_file_fails_whole_read() {
    let batch = create_batch_file(&[("G1", "", "")]).unwrap();
    let missing = Path::new("/nonexistent/guias.csv");

    let result = UniversalFileParser.read_batches(&[batch.path(), missing]);

    assert!(result.is_err());
}

#[test]
fn test_no_batches_is_input_error() {
    let comparison = create_comparison_file(&[]).unwrap();
    let comp = UniversalFileParser
        .read_comparison_table(comparison.path())
        .unwrap();

    let result = ConsolidationEngine::new().consolidate(&[], Some(&comp));

    assert!(matches!(result, Err(ReportError::NoSourceBatches)));
    assert_eq!(result.unwrap_err().category(), "INPUT");
}
