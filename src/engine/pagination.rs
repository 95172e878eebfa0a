// ==========================================
// guías 合并系统 - 分页规划引擎
// ==========================================
// 输入: 总行数 + 页面几何
// 输出: 每页左右两列各放多少行 (PagePlan 列表)
// 规则:
// 1) 末页平衡: 剩余行数 ∈ (max/2, max] 时左右两列平分
// 2) 普通页: 左列 = min(max, 剩余, 纵向容量)
//    左列之后若仍有剩余且光标严格位于底部保留区之上,右列 = min(剩余, 纵向容量)
// 3) 每页至少消耗一行,否则报 LayoutStalled
// 红线: 行数守恒,不重复、不遗漏
// ==========================================

use crate::domain::geometry::PageGeometry;
use crate::engine::error::{ReportError, ReportResult};
use serde::Serialize;
use tracing::debug;


// ==========================================
// PagePlan - 单页规划
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PagePlan {
    pub page_index: usize, // 从 0 开始
    pub start_y: f64,
    pub first_row: usize, // 本页第一行在批次中的下标
    pub left_rows: usize,
    pub right_rows: usize,
    pub balanced: bool, // 是否按末页平衡规则切分
}

impl PagePlan {
    pub fn rows(&self) -> usize {
        self.left_rows + self.right_rows
    }

    /// 右列第一行的下标
    pub fn right_first_row(&self) -> usize {
        self.first_row + self.left_rows
    }
}

// ==========================================
// PaginationPlanner
// ==========================================
pub struct PaginationPlanner<'a> {
    geometry: &'a PageGeometry,
}

impl<'a> PaginationPlanner<'a> {
    pub fn new(geometry: &'a PageGeometry) -> Self {
        Self { geometry }
    }

    /// 校验几何配置 (首页与续页的纵向容量都必须 >= 1)
    pub fn validate(&self) -> ReportResult<()> {
        let problems = self.geometry.validate();
        if problems.is_empty() {
            Ok(())
        } else {
            Err(ReportError::InvalidGeometry(problems.join("; ")))
        }
    }

    /// 表格 (表头 + rows 行数据) 的底部 y
    pub fn table_bottom(&self, start_y: f64, rows: usize) -> f64 {
        start_y + self.geometry.row_height * (rows as f64 + 1.0)
    }

    /// 规划全部页面
    ///
    /// # 返回
    /// - Ok(Vec<PagePlan>): total_rows == 0 时为空列表
    /// - Err(InvalidGeometry / LayoutStalled)
    pub fn plan(&self, total_rows: usize) -> ReportResult<Vec<PagePlan>> {
        self.validate()?;

        let mut plans = Vec::new();
        let mut consumed = 0usize;

        while consumed < total_rows {
            let page_index = plans.len();
            let plan = self.plan_page(page_index, consumed, total_rows - consumed);

            if plan.rows() == 0 {
                return Err(ReportError::LayoutStalled {
                    page: page_index + 1,
                    remaining: total_rows - consumed,
                });
            }

            debug!(
                page = page_index + 1,
                first_row = plan.first_row,
                left_rows = plan.left_rows,
                right_rows = plan.right_rows,
                balanced = plan.balanced,
                "分页规划"
            );

            consumed += plan.rows();
            plans.push(plan);
        }

        Ok(plans)
    }

    /// 规划单页
    fn plan_page(&self, page_index: usize, first_row: usize, remaining: usize) -> PagePlan {
        let geometry = self.geometry;
        let start_y = geometry.start_y(page_index);
        let max_rows = geometry.max_rows_per_page;

        let balanced = remaining <= max_rows && remaining > max_rows / 2;

        let (left_rows, right_rows) = if balanced {
            let left = remaining / 2;
            (left, remaining - left)
        } else {
            let capacity = geometry.vertical_capacity(start_y).max(0) as usize;
            let available = max_rows.min(remaining);
            let left = available.min(capacity);

            let after_left = remaining - left;
            let cursor_y = if left > 0 {
                self.table_bottom(start_y, left)
            } else {
                start_y
            };

            // 左表底部恰好落在保留区边界上时不再使用右列
            let right = if after_left > 0 && cursor_y < geometry.table_limit_y() {
                after_left.min(capacity)
            } else {
                0
            };
            (left, right)
        };

        PagePlan {
            page_index,
            start_y,
            first_row,
            left_rows,
            right_rows,
            balanced,
        }
    }
}
