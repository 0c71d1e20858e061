// ==========================================
// 导入工具 - 列格式化
// ==========================================
// 职责: B 列补零文本化（直接原地改写）
// ==========================================

use crate::domain::{CellValue, SheetGrid};

/// 补零目标宽度
pub const PAD_WIDTH: usize = 10;

/// 左侧补零到指定宽度
///
/// 带符号时零补在符号之后；超长不截断。
pub fn zero_pad(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len >= width {
        return text.to_string();
    }

    let zeros = "0".repeat(width - len);
    match text.chars().next() {
        Some(sign @ ('+' | '-')) => format!("{}{}{}", sign, zeros, &text[1..]),
        _ => format!("{}{}", zeros, text),
    }
}

/// 单元格补零；空单元格保持为空
pub fn pad_cell(value: &CellValue, width: usize) -> CellValue {
    if value.is_empty() {
        CellValue::Empty
    } else {
        CellValue::Text(zero_pad(&value.render(), width))
    }
}

/// 整列补零
///
/// # 返回
/// - true: 该列有数据且已改写
/// - false: 该列全空，未改写
pub fn pad_column(grid: &mut SheetGrid, col: usize, width: usize) -> bool {
    if !grid.column_has_data(col) {
        return false;
    }

    for row in grid.rows.iter_mut() {
        if let Some(cell) = row.get_mut(col) {
            *cell = pad_cell(cell, width);
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_pad_basic() {
        assert_eq!(zero_pad("123", PAD_WIDTH), "0000000123");
        assert_eq!(zero_pad("", 3), "000");
    }

    #[test]
    fn test_zero_pad_sign() {
        assert_eq!(zero_pad("-12", PAD_WIDTH), "-000000012");
        assert_eq!(zero_pad("+5", 4), "+005");
    }

    #[test]
    fn test_zero_pad_no_truncation() {
        assert_eq!(zero_pad("123456789012", PAD_WIDTH), "123456789012");
    }

    #[test]
    fn test_pad_cell_number() {
        assert_eq!(
            pad_cell(&CellValue::Number(4521.0), PAD_WIDTH),
            CellValue::Text("0000004521".to_string())
        );
        assert_eq!(pad_cell(&CellValue::Empty, PAD_WIDTH), CellValue::Empty);
    }

    #[test]
    fn test_pad_column_skips_empty_column() {
        let mut grid = SheetGrid::with_rows("S", vec![vec![CellValue::from("a")]]);
        assert!(!pad_column(&mut grid, 1, PAD_WIDTH));
    }

    #[test]
    fn test_pad_column_rewrites_values() {
        let mut grid = SheetGrid::with_rows(
            "S",
            vec![
                vec![CellValue::from("a"), CellValue::Number(7.0)],
                vec![CellValue::from("b")],
                vec![CellValue::from("c"), CellValue::from("AB12")],
            ],
        );
        assert!(pad_column(&mut grid, 1, PAD_WIDTH));
        assert_eq!(grid.cell(0, 1), Some(&CellValue::from("0000000007")));
        assert_eq!(grid.cell(1, 1), None);
        assert_eq!(grid.cell(2, 1), Some(&CellValue::from("000000AB12")));
    }
}
