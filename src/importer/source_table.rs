// ==========================================
// guías 合并系统 - 按位置访问的源表格
// ==========================================
// 表格无表头,列按位置访问 (A=0, B=1, ..., H=7, M=12)
// 缺失的单元格一律视为空串
// ==========================================

use serde::Serialize;

// ==========================================
// SourceRow - 一行原始单元格
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SourceRow {
    cells: Vec<String>,
}

impl SourceRow {
    pub fn new(cells: Vec<String>) -> Self {
        Self { cells }
    }

    /// 按位置取值,越界或缺失返回空串
    pub fn cell(&self, index: usize) -> &str {
        self.cells.get(index).map(String::as_str).unwrap_or("")
    }

    /// 可寻址的列数
    pub fn width(&self) -> usize {
        self.cells.len()
    }

    /// 是否整行为空
    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(|c| c.trim().is_empty())
    }
}

impl<S: Into<String>> FromIterator<S> for SourceRow {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self::new(iter.into_iter().map(Into::into).collect())
    }
}

// ==========================================
// SourceTable - 一个批次 (一个文件) 的全部行
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SourceTable {
    label: String, // 来源标识 (通常为文件名)
    rows: Vec<SourceRow>,
}

impl SourceTable {
    pub fn new(label: impl Into<String>, rows: Vec<SourceRow>) -> Self {
        Self {
            label: label.into(),
            rows,
        }
    }

    /// 由字符串二维数组构建 (测试与内存数据源使用)
    pub fn from_rows<R, S>(label: impl Into<String>, rows: R) -> Self
    where
        R: IntoIterator,
        R::Item: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let rows = rows
            .into_iter()
            .map(|row| row.into_iter().collect::<SourceRow>())
            .collect();
        Self::new(label, rows)
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn rows(&self) -> &[SourceRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// 表格宽度 (所有行中最大的列数)
    pub fn width(&self) -> usize {
        self.rows.iter().map(SourceRow::width).max().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_cell_is_empty() {
        let row: SourceRow = vec!["A1", "x"].into_iter().collect();
        assert_eq!(row.cell(0), "A1");
        assert_eq!(row.cell(1), "x");
        assert_eq!(row.cell(2), "");
        assert_eq!(row.cell(12), "");
    }

    #[test]
    fn test_table_width_uses_widest_row() {
        let table = SourceTable::from_rows("t", vec![vec!["a"], vec!["a", "b", "c"], vec![]]);
        assert_eq!(table.len(), 3);
        assert_eq!(table.width(), 3);
        assert_eq!(table.label(), "t");
    }

    #[test]
    fn test_blank_row() {
        let row: SourceRow = vec!["", "  "].into_iter().collect();
        assert!(row.is_blank());
        assert!(SourceRow::default().is_blank());
    }
}
