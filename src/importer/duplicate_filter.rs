// ==========================================
// 导入工具 - 重复行过滤
// ==========================================
// 职责: 按键列检测同一工作表内重复行并删除（保留首次出现）
// ==========================================

use crate::domain::{CellKey, CellValue, SheetGrid};
use std::collections::HashSet;

/// 检测重复行
///
/// # 返回
/// - Vec<行下标>: 重复记录（不包括第一次出现），升序
pub fn detect_duplicates(values: &[CellValue]) -> Vec<usize> {
    let mut seen: HashSet<CellKey> = HashSet::new();
    let mut duplicates = Vec::new();

    for (row, value) in values.iter().enumerate() {
        if !seen.insert(value.key()) {
            duplicates.push(row);
        }
    }

    duplicates
}

/// 删除指定行（倒序删除，避免前面的删除影响后面的下标）
pub fn delete_rows(grid: &mut SheetGrid, rows: &[usize]) {
    for &row in rows.iter().rev() {
        grid.delete_row(row);
    }
}

/// 按键列去重
///
/// # 返回
/// - 删除的行数
pub fn remove_duplicate_rows(grid: &mut SheetGrid, key_col: usize) -> usize {
    let duplicates = detect_duplicates(&grid.column_values(key_col));
    delete_rows(grid, &duplicates);
    duplicates.len()
}
