// ==========================================
// guías 合并系统 - 导入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// 任一文件读取失败即中止,不返回部分表格
// ==========================================

use thiserror::Error;

/// 导入模块错误类型
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 文件相关错误 =====
    #[error("文件不存在: {0}")]
    FileNotFound(String),

    #[error("文件格式不支持: .{0}（仅支持 .xlsx/.xlsm/.xls/.ods/.csv）")]
    UnsupportedFormat(String),

    #[error("文件读取失败: {0}")]
    FileReadError(String),

    // ===== 表格解析错误 =====
    #[error("Excel 工作簿没有工作表: {0}")]
    NoWorksheet(String),

    #[error("Excel 解析失败: {0}")]
    ExcelParseError(String),

    #[error("CSV 解析失败 (第 {} 行): {message}", .line.map(|l| l.to_string()).unwrap_or_else(|| "?".to_string()))]
    CsvParseError { line: Option<u64>, message: String },
}

impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::FileReadError(err.to_string())
    }
}

// csv 错误保留出错行号
impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        let line = err.position().map(|p| p.line());
        ImportError::CsvParseError {
            line,
            message: err.to_string(),
        }
    }
}

impl From<calamine::Error> for ImportError {
    fn from(err: calamine::Error) -> Self {
        ImportError::ExcelParseError(err.to_string())
    }
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;
