// ==========================================
// guías 合并系统 - 文件解析器实现
// ==========================================
// 支持: Excel (.xlsx/.xlsm/.xls/.ods) / CSV (.csv)
// 无表头,按列位置读取
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use crate::importer::record_source_trait::{FileParser, RecordSource};
use crate::importer::source_table::{SourceRow, SourceTable};
use calamine::{open_workbook_auto, Data, Reader};
use csv::ReaderBuilder;
use std::fs::File;
use std::path::Path;
use tracing::{debug, info};

const EXCEL_EXTENSIONS: [&str; 4] = ["xlsx", "xlsm", "xls", "ods"];

/// 取文件名作为来源标识
fn source_label(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}

fn ensure_exists(path: &Path) -> ImportResult<()> {
    if !path.exists() {
        return Err(ImportError::FileNotFound(path.display().to_string()));
    }
    Ok(())
}

// ==========================================
// CSV Parser 实现
// ==========================================
pub struct CsvParser;

impl FileParser for CsvParser {
    fn parse_to_table(&self, file_path: &Path) -> ImportResult<SourceTable> {
        let path = file_path;

        // 检查文件存在
        ensure_exists(path)?;

        // 检查扩展名
        let ext = extension_of(path);
        if ext != "csv" {
            return Err(ImportError::UnsupportedFormat(ext));
        }

        let file = File::open(path)?;
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true) // 允许行长度不一致
            .from_reader(file);

        let mut rows = Vec::new();
        let mut skipped = 0usize;
        for result in reader.records() {
            let record = result?;
            let row: SourceRow = record.iter().map(|value| value.trim()).collect();

            // 跳过完全空白的行
            if row.is_blank() {
                skipped += 1;
                continue;
            }

            rows.push(row);
        }

        debug!(
            file = %path.display(),
            rows = rows.len(),
            skipped,
            "CSV 解析完成"
        );
        Ok(SourceTable::new(source_label(path), rows))
    }
}

// ==========================================
// Excel Parser 实现
// ==========================================
pub struct ExcelParser;

impl ExcelParser {
    /// 单元格转字符串
    ///
    /// 整数值的浮点数不带小数部分 (5.0 → "5"),错误单元格视为空
    fn cell_to_string(cell: &Data) -> String {
        match cell {
            Data::Empty => String::new(),
            Data::Error(_) => String::new(),
            Data::String(s) => s.trim().to_string(),
            Data::Int(i) => i.to_string(),
            Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
            other => other.to_string().trim().to_string(),
        }
    }
}

impl FileParser for ExcelParser {
    fn parse_to_table(&self, file_path: &Path) -> ImportResult<SourceTable> {
        let path = file_path;

        ensure_exists(path)?;

        let ext = extension_of(path);
        if !EXCEL_EXTENSIONS.contains(&ext.as_str()) {
            return Err(ImportError::UnsupportedFormat(ext));
        }

        let mut workbook = open_workbook_auto(path)?;

        // 读取第一个 sheet
        let sheet_names = workbook.sheet_names();
        let sheet_name = sheet_names
            .first()
            .cloned()
            .ok_or_else(|| ImportError::NoWorksheet(source_label(path)))?;

        let range = workbook.worksheet_range(&sheet_name)?;

        // 已用区域可能不从 A 列开始,补齐前导空列以保持绝对列位置
        let leading_cols = range.start().map(|(_, col)| col as usize).unwrap_or(0);

        let mut rows = Vec::new();
        for data_row in range.rows() {
            let mut cells = vec![String::new(); leading_cols];
            cells.extend(data_row.iter().map(Self::cell_to_string));
            let row = SourceRow::new(cells);

            // 跳过完全空白的行
            if row.is_blank() {
                continue;
            }
            rows.push(row);
        }

        debug!(
            file = %path.display(),
            sheet = %sheet_name,
            rows = rows.len(),
            leading_cols,
            "Excel 解析完成"
        );
        Ok(SourceTable::new(source_label(path), rows))
    }
}

// ==========================================
// 通用文件解析器（根据扩展名自动选择）
// ==========================================
pub struct UniversalFileParser;

impl UniversalFileParser {
    pub fn read_table<P: AsRef<Path>>(&self, file_path: P) -> ImportResult<SourceTable> {
        let path = file_path.as_ref();
        let ext = extension_of(path);

        match ext.as_str() {
            "csv" => CsvParser.parse_to_table(path),
            e if EXCEL_EXTENSIONS.contains(&e) => ExcelParser.parse_to_table(path),
            _ => Err(ImportError::UnsupportedFormat(ext)),
        }
    }
}

impl RecordSource for UniversalFileParser {
    fn read_batch(&self, source: &Path) -> ImportResult<SourceTable> {
        let table = self.read_table(source)?;
        info!(file = %source.display(), rows = table.len(), "读取 guía 批次");
        Ok(table)
    }

    fn read_comparison_table(&self, source: &Path) -> ImportResult<SourceTable> {
        let table = self.read_table(source)?;
        info!(
            file = %source.display(),
            rows = table.len(),
            width = table.width(),
            "读取对照表"
        );
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    fn csv_file(lines: &[&str]) -> tempfile::NamedTempFile {
        let mut temp_file = Builder::new().suffix(".csv").tempfile().unwrap();
        for line in lines {
            writeln!(temp_file, "{}", line).unwrap();
        }
        temp_file
    }

    #[test]
    fn test_csv_parser_has_no_header() {
        let temp_file = csv_file(&["A1,x,y", "SACO,,"]);

        let table = CsvParser.parse_to_table(temp_file.path()).unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.rows()[0].cell(0), "A1");
        assert_eq!(table.rows()[0].cell(2), "y");
        assert_eq!(table.rows()[1].cell(0), "SACO");
        assert_eq!(table.rows()[1].cell(1), "");
    }

    #[test]
    fn test_csv_parser_skip_empty_rows() {
        let temp_file = csv_file(&["G1,2.5", ",", " G2 ,3.0"]);

        let table = CsvParser.parse_to_table(temp_file.path()).unwrap();

        // 应跳过空行,单元格做 TRIM
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows()[1].cell(0), "G2");
    }

    #[test]
    fn test_csv_parser_flexible_width() {
        let temp_file = csv_file(&["G1", "G2,b,c,d"]);

        let table = CsvParser.parse_to_table(temp_file.path()).unwrap();

        assert_eq!(table.width(), 4);
        assert_eq!(table.rows()[0].cell(3), "");
    }

    #[test]
    fn test_csv_parser_file_not_found() {
        let result = CsvParser.parse_to_table(Path::new("non_existent.csv"));
        assert!(matches!(result, Err(ImportError::FileNotFound(_))));
    }

    #[test]
    fn test_universal_parser_rejects_unknown_extension() {
        let temp_file = Builder::new().suffix(".txt").tempfile().unwrap();
        let result = UniversalFileParser.read_table(temp_file.path());
        assert!(matches!(result, Err(ImportError::UnsupportedFormat(ext)) if ext == "txt"));
    }

    #[test]
    fn test_cell_to_string() {
        assert_eq!(ExcelParser::cell_to_string(&Data::Float(5.0)), "5");
        assert_eq!(ExcelParser::cell_to_string(&Data::Float(5.5)), "5.5");
        assert_eq!(ExcelParser::cell_to_string(&Data::Int(12)), "12");
        assert_eq!(ExcelParser::cell_to_string(&Data::String(" QU9 ".to_string())), "QU9");
        assert_eq!(ExcelParser::cell_to_string(&Data::Empty), "");
    }

    #[test]
    fn test_read_batches_preserves_order() {
        let first = csv_file(&["A1,x,y", "SACO,,"]);
        let second = csv_file(&["QU9,,"]);

        let tables = UniversalFileParser
            .read_batches(&[first.path(), second.path()])
            .unwrap();

        assert_eq!(tables.len(), 2);
        assert_eq!(tables[0].len(), 2);
        assert_eq!(tables[1].rows()[0].cell(0), "QU9");
    }
}
