// ==========================================
// 导入工具 - 表格读取
// ==========================================
// 支持: Excel (.xlsx / .xlsm)
// 职责: 读取全部工作表为绝对坐标网格（公式单元格保留原文）；xlsm 额外提取宏工程
// ==========================================

use crate::domain::{CellValue, SheetGrid};
use crate::workbook::error::{WorkbookError, WorkbookResult};
use calamine::{open_workbook, Data, Range, Reader, Xlsx};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// xlsm 包内宏工程路径
pub const VBA_PROJECT_ENTRY: &str = "xl/vbaProject.bin";

/// 支持读写的表格扩展名（小写）
pub const SPREADSHEET_EXTENSIONS: [&str; 2] = ["xlsx", "xlsm"];

// ==========================================
// LoadedWorkbook - 已载入的工作簿
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct LoadedWorkbook {
    pub sheets: Vec<SheetGrid>,
    pub vba_project: Option<Vec<u8>>,
}

/// 小写扩展名（无扩展名返回空串）
pub fn lowercase_extension(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}

/// 是否为可处理的表格文件
pub fn is_spreadsheet(path: &Path) -> bool {
    SPREADSHEET_EXTENSIONS.contains(&lowercase_extension(path).as_str())
}

/// 读取工作簿（全部工作表）
pub fn read_workbook(path: &Path) -> WorkbookResult<LoadedWorkbook> {
    // 检查文件存在
    if !path.exists() {
        return Err(WorkbookError::FileNotFound(path.display().to_string()));
    }

    // 检查扩展名
    let ext = lowercase_extension(path);
    if !SPREADSHEET_EXTENSIONS.contains(&ext.as_str()) {
        return Err(WorkbookError::UnsupportedFormat(ext));
    }

    // 读取全部工作表后即释放文件句柄，便于原地覆写
    let sheets = {
        let mut workbook: Xlsx<_> = open_workbook(path)?;
        let mut sheets = Vec::new();
        for name in workbook.sheet_names() {
            let range = workbook.worksheet_range(&name)?;
            let mut grid = range_to_grid(&name, &range);
            let formulas = workbook.worksheet_formula(&name)?;
            overlay_formulas(&mut grid, &formulas);
            sheets.push(grid);
        }
        sheets
    };

    let vba_project = if ext == "xlsm" {
        read_vba_project(path)?
    } else {
        None
    };

    debug!(
        file = %path.display(),
        sheets = sheets.len(),
        has_vba = vba_project.is_some(),
        "工作簿读取完成"
    );

    Ok(LoadedWorkbook {
        sheets,
        vba_project,
    })
}

/// 从 xlsm 包中提取 vbaProject.bin（不存在返回 None）
pub fn read_vba_project(path: &Path) -> WorkbookResult<Option<Vec<u8>>> {
    let file = File::open(path)?;
    let mut archive = zip::ZipArchive::new(file)?;
    let project = match archive.by_name(VBA_PROJECT_ENTRY) {
        Ok(mut entry) => {
            let mut buf = Vec::new();
            entry.read_to_end(&mut buf)?;
            Some(buf)
        }
        Err(zip::result::ZipError::FileNotFound) => None,
        Err(e) => return Err(e.into()),
    };
    Ok(project)
}

/// calamine 区域转绝对坐标网格
///
/// calamine 的区域从第一个非空单元格开始，这里按 start() 偏移补齐，
/// 保证 rows[0] 永远是工作表第 1 行、列 0 永远是 A 列。
fn range_to_grid(name: &str, range: &Range<Data>) -> SheetGrid {
    let Some((start_row, start_col)) = range.start() else {
        return SheetGrid::new(name);
    };

    let mut rows: Vec<Vec<CellValue>> = vec![Vec::new(); start_row as usize];
    for data_row in range.rows() {
        let mut cells = vec![CellValue::Empty; start_col as usize];
        cells.extend(data_row.iter().map(data_to_cell));
        rows.push(cells);
    }

    SheetGrid::with_rows(name, rows)
}

/// 公式原文覆盖到网格（覆盖缓存值）
fn overlay_formulas(grid: &mut SheetGrid, formulas: &Range<String>) {
    let Some((start_row, start_col)) = formulas.start() else {
        return;
    };

    for (i, row) in formulas.rows().enumerate() {
        for (j, formula) in row.iter().enumerate() {
            if formula.is_empty() {
                continue;
            }
            let row_idx = start_row as usize + i;
            if grid.rows.len() <= row_idx {
                grid.rows.resize(row_idx + 1, Vec::new());
            }
            let source = formula.strip_prefix('=').unwrap_or(formula);
            grid.set_cell(
                row_idx,
                start_col as usize + j,
                CellValue::Formula(source.to_string()),
            );
        }
    }
}

fn data_to_cell(data: &Data) -> CellValue {
    match data {
        Data::Empty => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Float(v) => CellValue::Number(*v),
        Data::Int(v) => CellValue::Number(*v as f64),
        Data::Bool(v) => CellValue::Bool(*v),
        Data::DateTime(dt) => CellValue::DateTime(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Error(e) => CellValue::Text(e.to_string()),
    }
}
