// ==========================================
// 导入工具 - 工作表规范化
// ==========================================
// 流程（逐工作表）:
// 1. 样式清空（写出时不携带字体/填充/边框；A..J 数字格式重置为常规）
// 2. 删除第 1 行（表头）
// 3. H / I / J 填充文件名常量
// 4. B 列补零文本化
// 5. A 列去重（倒序删除）
// 6. 记录剩余行数
// ==========================================

use crate::domain::{
    CellValue, SheetGrid, CLEARED_COLUMN_COUNT, KEY_COLUMN, PADDED_COLUMN, TRIPLE_COLUMNS,
};
use crate::importer::column_formatter::{pad_column, PAD_WIDTH};
use crate::importer::duplicate_filter::remove_duplicate_rows;
use crate::importer::filename_parser::ConstantTriple;
use crate::workbook::SheetWriteOptions;
use tracing::{debug, info};

// ==========================================
// SheetReport - 单工作表处理结果
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SheetReport {
    pub remaining_rows: usize,
    pub removed_duplicates: usize,
    pub padded: bool, // B 列是否已补零
    pub filled: bool, // H/I/J 是否已填充
}

impl SheetReport {
    /// 对应的写出选项（B 列补零后以文本格式写出）
    pub fn write_options(&self) -> SheetWriteOptions {
        SheetWriteOptions {
            text_columns: if self.padded {
                vec![PADDED_COLUMN]
            } else {
                Vec::new()
            },
            cleared_columns: CLEARED_COLUMN_COUNT,
        }
    }
}

// ==========================================
// SheetNormalizer
// ==========================================
pub struct SheetNormalizer {
    triple: Option<ConstantTriple>,
}

impl SheetNormalizer {
    /// # 参数
    /// - triple: 文件名常量；None 表示跳过 H/I/J 填充
    pub fn new(triple: Option<ConstantTriple>) -> Self {
        Self { triple }
    }

    pub fn normalize(&self, grid: &mut SheetGrid) -> SheetReport {
        remove_header(grid);

        let filled = match &self.triple {
            Some(triple) => {
                fill_triple(grid, triple);
                true
            }
            None => false,
        };

        let padded = pad_column(grid, PADDED_COLUMN, PAD_WIDTH);
        if !padded {
            info!(sheet = %grid.name, "B 列为空，跳过补零");
        }

        let removed_duplicates = remove_duplicate_rows(grid, KEY_COLUMN);

        let report = SheetReport {
            remaining_rows: grid.row_count(),
            removed_duplicates,
            padded,
            filled,
        };

        debug!(
            sheet = %grid.name,
            remaining = report.remaining_rows,
            removed = report.removed_duplicates,
            "工作表规范化完成"
        );

        report
    }
}

/// 删除第 1 行（表头）
pub fn remove_header(grid: &mut SheetGrid) {
    grid.delete_row(0);
}

/// 每行 H / I / J 填充常量（文本）
pub fn fill_triple(grid: &mut SheetGrid, triple: &ConstantTriple) {
    for row in 0..grid.row_count() {
        for (col, value) in TRIPLE_COLUMNS.iter().zip(triple.values()) {
            grid.set_cell(row, *col, CellValue::from(value));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triple() -> ConstantTriple {
        ConstantTriple {
            second: "331".to_string(),
            fourth: "273".to_string(),
            fifth: "128".to_string(),
        }
    }

    fn sample_grid() -> SheetGrid {
        SheetGrid::with_rows(
            "Sheet1",
            vec![
                vec![CellValue::from("Key"), CellValue::from("Code")],
                vec![CellValue::from("K1"), CellValue::Number(42.0)],
                vec![CellValue::from("K2"), CellValue::Empty],
                vec![CellValue::from("K1"), CellValue::Number(43.0)],
            ],
        )
    }

    #[test]
    fn test_normalize_full_pipeline() {
        let mut grid = sample_grid();
        let report = SheetNormalizer::new(Some(triple())).normalize(&mut grid);

        assert_eq!(report.remaining_rows, 2);
        assert_eq!(report.removed_duplicates, 1);
        assert!(report.padded);
        assert!(report.filled);

        assert_eq!(grid.cell(0, 0), Some(&CellValue::from("K1")));
        assert_eq!(grid.cell(0, 1), Some(&CellValue::from("0000000042")));
        assert_eq!(grid.cell(1, 1), Some(&CellValue::Empty));
        for row in 0..grid.row_count() {
            assert_eq!(grid.cell(row, 7), Some(&CellValue::from("331")));
            assert_eq!(grid.cell(row, 8), Some(&CellValue::from("273")));
            assert_eq!(grid.cell(row, 9), Some(&CellValue::from("128")));
        }
    }

    #[test]
    fn test_normalize_without_triple() {
        let mut grid = sample_grid();
        let report = SheetNormalizer::new(None).normalize(&mut grid);

        assert!(!report.filled);
        assert_eq!(grid.width(), 2);
    }

    #[test]
    fn test_normalize_empty_column_b() {
        let mut grid = SheetGrid::with_rows(
            "S",
            vec![vec![CellValue::from("H")], vec![CellValue::from("a")]],
        );
        let report = SheetNormalizer::new(None).normalize(&mut grid);

        assert!(!report.padded);
        assert!(report.write_options().text_columns.is_empty());
        assert_eq!(report.write_options().cleared_columns, 10);
    }

    #[test]
    fn test_normalize_header_only_sheet() {
        let mut grid = SheetGrid::with_rows("S", vec![vec![CellValue::from("H")]]);
        let report = SheetNormalizer::new(Some(triple())).normalize(&mut grid);

        assert_eq!(report.remaining_rows, 0);
    }
}
