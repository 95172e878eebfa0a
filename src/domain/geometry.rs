// ==========================================
// guías 合并系统 - 页面几何常量
// ==========================================
// 单位: 毫米 (mm),坐标原点在页面左上角,y 向下增长
// 运行期不可变
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// PageGeometry - 页面几何
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageGeometry {
    pub page_width: f64,
    pub page_height: f64,
    pub column_width: f64,
    pub row_height: f64,
    pub max_rows_per_page: usize,
    pub left_table_x: f64,
    pub right_table_x: f64,
    pub first_page_start_y: f64,   // 首页表格起点 (首页有抬头)
    pub continuation_start_y: f64, // 续页表格起点
    pub bottom_margin: f64,        // 表格区域底部保留高度
    pub signature_offset: f64,     // 签名区相对左表底部的偏移
    pub signature_bottom_margin: f64,
    pub signature_restart_y: f64, // 签名区换页后的 y
}

impl Default for PageGeometry {
    fn default() -> Self {
        // A4 纵向
        Self {
            page_width: 210.0,
            page_height: 297.0,
            column_width: 23.0,
            row_height: 3.0,
            max_rows_per_page: 88,
            left_table_x: 11.0,
            right_table_x: 110.0,
            first_page_start_y: 28.0,
            continuation_start_y: 20.0,
            bottom_margin: 40.0,
            signature_offset: 50.0,
            signature_bottom_margin: 30.0,
            signature_restart_y: 20.0,
        }
    }
}

impl PageGeometry {
    /// 第 page_index 页 (从 0 开始) 的表格起点
    pub fn start_y(&self, page_index: usize) -> f64 {
        if page_index == 0 {
            self.first_page_start_y
        } else {
            self.continuation_start_y
        }
    }

    /// 单列纵向容量 (数据行数)
    ///
    /// floor((页高 - 起点 - 底部保留) / 行高) - 1,减去的一行留给表头
    pub fn vertical_capacity(&self, start_y: f64) -> i64 {
        if self.row_height <= 0.0 {
            return 0;
        }
        let usable = self.page_height - start_y - self.bottom_margin;
        (usable / self.row_height).floor() as i64 - 1
    }

    /// 表格区域的最低 y
    pub fn table_limit_y(&self) -> f64 {
        self.page_height - self.bottom_margin
    }

    /// 签名区允许的最低 y
    pub fn signature_limit_y(&self) -> f64 {
        self.page_height - self.signature_bottom_margin
    }

    /// 表格总宽度 (4 列)
    pub fn table_width(&self) -> f64 {
        self.column_width * 4.0
    }

    /// 校验几何配置
    ///
    /// # 返回
    /// 所有问题的描述列表,空列表表示配置有效
    pub fn validate(&self) -> Vec<String> {
        let mut problems = Vec::new();

        if !(self.page_height > 0.0) || !(self.page_width > 0.0) {
            problems.push(format!(
                "页面尺寸必须为正数: {}x{}",
                self.page_width, self.page_height
            ));
        }
        if !(self.row_height > 0.0) {
            problems.push(format!("行高必须为正数: {}", self.row_height));
        }
        if !(self.column_width > 0.0) {
            problems.push(format!("列宽必须为正数: {}", self.column_width));
        }
        if self.max_rows_per_page == 0 {
            problems.push("每页最大行数必须 >= 1".to_string());
        }

        for (label, start_y) in [
            ("首页", self.first_page_start_y),
            ("续页", self.continuation_start_y),
        ] {
            let capacity = self.vertical_capacity(start_y);
            if capacity <= 0 {
                problems.push(format!(
                    "{}纵向容量不足: start_y={}, capacity={}",
                    label, start_y, capacity
                ));
            }
        }

        problems
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_capacities() {
        let geometry = PageGeometry::default();
        // (297 - 28 - 40) / 3 = 76.33 → 76 - 1
        assert_eq!(geometry.vertical_capacity(geometry.first_page_start_y), 75);
        // (297 - 20 - 40) / 3 = 79 → 79 - 1
        assert_eq!(geometry.vertical_capacity(geometry.continuation_start_y), 78);
        assert!(geometry.validate().is_empty());
    }

    #[test]
    fn test_start_y_by_page() {
        let geometry = PageGeometry::default();
        assert_eq!(geometry.start_y(0), 28.0);
        assert_eq!(geometry.start_y(1), 20.0);
        assert_eq!(geometry.start_y(7), 20.0);
    }

    #[test]
    fn test_validate_rejects_zero_capacity() {
        let geometry = PageGeometry {
            bottom_margin: 265.0,
            ..PageGeometry::default()
        };
        let problems = geometry.validate();
        assert!(!problems.is_empty());
        assert!(problems.iter().any(|p| p.contains("首页")));
    }

    #[test]
    fn test_validate_rejects_bad_row_height() {
        let geometry = PageGeometry {
            row_height: 0.0,
            ..PageGeometry::default()
        };
        assert!(geometry.validate().iter().any(|p| p.contains("行高")));
    }
}
