// ==========================================
// 导入工具 - 工作表网格
// ==========================================
// 职责: 以绝对行列（第 1 行 / A 列起）承载工作表数据
// 红线: 只有值，不含样式
// ==========================================

use crate::domain::cell::CellValue;
use serde::{Deserialize, Serialize};

/// 去重键列 (A)
pub const KEY_COLUMN: usize = 0;
/// 补零文本列 (B)
pub const PADDED_COLUMN: usize = 1;
/// 文件名常量列 (H / I / J)
pub const TRIPLE_COLUMNS: [usize; 3] = [7, 8, 9];
/// 数字格式重置为常规的列数 (A..=J)
pub const CLEARED_COLUMN_COUNT: usize = 10;

// ==========================================
// SheetGrid - 工作表网格
// ==========================================
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SheetGrid {
    pub name: String,
    pub rows: Vec<Vec<CellValue>>,
}

impl SheetGrid {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rows: Vec::new(),
        }
    }

    pub fn with_rows(name: impl Into<String>, rows: Vec<Vec<CellValue>>) -> Self {
        Self {
            name: name.into(),
            rows,
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// 最宽行的列数
    pub fn width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&CellValue> {
        self.rows.get(row).and_then(|r| r.get(col))
    }

    /// 写单元格，行宽不足时以空单元格补齐
    pub fn set_cell(&mut self, row: usize, col: usize, value: CellValue) {
        if let Some(cells) = self.rows.get_mut(row) {
            if cells.len() <= col {
                cells.resize(col + 1, CellValue::Empty);
            }
            cells[col] = value;
        }
    }

    /// 删除一行（越界忽略）
    pub fn delete_row(&mut self, row: usize) {
        if row < self.rows.len() {
            self.rows.remove(row);
        }
    }

    /// 某列是否存在非空值
    pub fn column_has_data(&self, col: usize) -> bool {
        self.rows
            .iter()
            .any(|r| r.get(col).map(|c| !c.is_empty()).unwrap_or(false))
    }

    /// 某列全部值（行宽不足视为空）
    pub fn column_values(&self, col: usize) -> Vec<CellValue> {
        self.rows
            .iter()
            .map(|r| r.get(col).cloned().unwrap_or_default())
            .collect()
    }
}
