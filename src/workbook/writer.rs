// ==========================================
// 导入工具 - 表格写出
// ==========================================
// 工具: rust_xlsxwriter
// 职责: 值 + 公式的工作簿输出（字体/填充/边框全部清空）；
//       可选文本格式列；清空区以外的日期保留日期格式；xlsm 宏工程回写
// ==========================================

use crate::domain::{CellValue, SheetGrid};
use crate::workbook::error::WorkbookResult;
use crate::workbook::reader::lowercase_extension;
use rust_xlsxwriter::{Format, Workbook, Worksheet};
use std::io::{Cursor, Read, Write};
use std::path::Path;
use tracing::debug;

/// Excel 文本数字格式
pub const TEXT_NUM_FORMAT: &str = "@";
pub const DATETIME_NUM_FORMAT: &str = "yyyy-mm-dd hh:mm:ss";
pub const DATE_NUM_FORMAT: &str = "yyyy-mm-dd";
pub const TIME_NUM_FORMAT: &str = "hh:mm:ss";

const CONTENT_TYPES_ENTRY: &str = "[Content_Types].xml";
const WORKBOOK_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml";
const MACRO_WORKBOOK_CONTENT_TYPE: &str = "application/vnd.ms-excel.sheet.macroEnabled.main+xml";

// ==========================================
// SheetWriteOptions - 单个工作表写出选项
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct SheetWriteOptions {
    /// 以文本格式 (@) 写出的列（0 基）
    pub text_columns: Vec<usize>,
    /// 前 N 列数字格式重置为常规（日期写成序列号）
    pub cleared_columns: usize,
}

// 日期格式集合（每个工作簿创建一次）
struct DateFormats {
    datetime: Format,
    date: Format,
    time: Format,
}

impl DateFormats {
    fn new() -> Self {
        Self {
            datetime: Format::new().set_num_format(DATETIME_NUM_FORMAT),
            date: Format::new().set_num_format(DATE_NUM_FORMAT),
            time: Format::new().set_num_format(TIME_NUM_FORMAT),
        }
    }

    /// 按序列号的日期/时间部分选格式
    fn pick(&self, serial: f64) -> &Format {
        if serial < 1.0 {
            &self.time
        } else if serial.fract().abs() > 1e-9 {
            &self.datetime
        } else {
            &self.date
        }
    }
}

/// 写出工作簿
///
/// # 参数
/// - path: 输出路径（存在则覆盖）
/// - sheets: 工作表及其写出选项（顺序即工作表顺序）
/// - vba_project: xlsm 宏工程（vbaProject.bin 原始字节）
///
/// 无宏工程的 .xlsm 仍按启用宏的工作簿内容类型写出，否则 Excel 拒绝打开。
pub fn write_workbook(
    path: &Path,
    sheets: &[(SheetGrid, SheetWriteOptions)],
    vba_project: Option<&[u8]>,
) -> WorkbookResult<()> {
    let mut workbook = Workbook::new();
    let text_format = Format::new().set_num_format(TEXT_NUM_FORMAT);
    let date_formats = DateFormats::new();

    // rust_xlsxwriter 只接受文件路径形式的宏工程，需要先落地临时文件
    let vba_file = match vba_project {
        Some(bytes) => {
            let mut file = tempfile::NamedTempFile::new()?;
            file.write_all(bytes)?;
            file.flush()?;
            workbook.add_vba_project(file.path())?;
            Some(file)
        }
        None => None,
    };

    for (grid, options) in sheets {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(&grid.name)?;

        for (row_idx, cells) in grid.rows.iter().enumerate() {
            let row = row_idx as u32;

            for (col_idx, cell) in cells.iter().enumerate() {
                let col = col_idx as u16;
                let as_text = options.text_columns.contains(&col_idx);

                match cell {
                    CellValue::Empty => {
                        if as_text {
                            worksheet.write_blank(row, col, &text_format)?;
                        }
                    }
                    CellValue::Text(s) if s.is_empty() => {
                        if as_text {
                            worksheet.write_blank(row, col, &text_format)?;
                        }
                    }
                    CellValue::Text(s) => {
                        if as_text {
                            worksheet.write_string_with_format(row, col, s, &text_format)?;
                        } else {
                            worksheet.write_string(row, col, s)?;
                        }
                    }
                    CellValue::Number(n) => {
                        worksheet.write_number(row, col, *n)?;
                    }
                    CellValue::Bool(b) => {
                        worksheet.write_boolean(row, col, *b)?;
                    }
                    CellValue::DateTime(serial) => {
                        if col_idx < options.cleared_columns {
                            worksheet.write_number(row, col, *serial)?;
                        } else {
                            worksheet.write_number_with_format(
                                row,
                                col,
                                *serial,
                                date_formats.pick(*serial),
                            )?;
                        }
                    }
                    CellValue::Formula(source) => {
                        write_formula(worksheet, row, col, source, as_text.then_some(&text_format))?;
                    }
                }
            }
        }
    }

    if vba_project.is_none() && lowercase_extension(path) == "xlsm" {
        let package = workbook.save_to_buffer()?;
        std::fs::write(path, mark_macro_enabled(&package)?)?;
    } else {
        workbook.save(path)?;
    }
    drop(vba_file);

    debug!(file = %path.display(), sheets = sheets.len(), "工作簿写出完成");
    Ok(())
}

fn write_formula(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    source: &str,
    format: Option<&Format>,
) -> WorkbookResult<()> {
    let formula = format!("={}", source);
    match format {
        Some(format) => worksheet.write_formula_with_format(row, col, formula.as_str(), format)?,
        None => worksheet.write_formula(row, col, formula.as_str())?,
    };
    Ok(())
}

/// 工作簿包的主内容类型改为启用宏
fn mark_macro_enabled(package: &[u8]) -> WorkbookResult<Vec<u8>> {
    let mut archive = zip::ZipArchive::new(Cursor::new(package))?;
    let mut output = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = zip::write::FileOptions::default();

    for index in 0..archive.len() {
        let mut entry = archive.by_index(index)?;
        let name = entry.name().to_string();
        let mut bytes = Vec::new();
        entry.read_to_end(&mut bytes)?;

        if name == CONTENT_TYPES_ENTRY {
            bytes = String::from_utf8_lossy(&bytes)
                .replace(WORKBOOK_CONTENT_TYPE, MACRO_WORKBOOK_CONTENT_TYPE)
                .into_bytes();
        }

        output.start_file(name, options)?;
        output.write_all(&bytes)?;
    }

    Ok(output.finish()?.into_inner())
}

/// 写出纯文本行工作簿（每行一个单元格，位于 A 列，无表头）
pub fn write_line_sheets(path: &Path, sheets: &[(&str, &[String])]) -> WorkbookResult<()> {
    let grids: Vec<(SheetGrid, SheetWriteOptions)> = sheets
        .iter()
        .map(|(name, lines)| {
            let rows = lines
                .iter()
                .map(|line| vec![CellValue::Text(line.clone())])
                .collect();
            (SheetGrid::with_rows(*name, rows), SheetWriteOptions::default())
        })
        .collect();

    write_workbook(path, &grids, None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workbook::read_workbook;
    use tempfile::TempDir;

    fn content_types(path: &Path) -> String {
        let file = std::fs::File::open(path).unwrap();
        let mut archive = zip::ZipArchive::new(file).unwrap();
        let mut xml = String::new();
        archive
            .by_name(CONTENT_TYPES_ENTRY)
            .unwrap()
            .read_to_string(&mut xml)
            .unwrap();
        xml
    }

    fn grid() -> SheetGrid {
        SheetGrid::with_rows(
            "Sheet1",
            vec![vec![
                CellValue::from("K1"),
                CellValue::Number(10.0),
                CellValue::Formula("B1*2".to_string()),
            ]],
        )
    }

    #[test]
    fn test_xlsm_without_vba_is_macro_enabled() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("m.xlsm");

        write_workbook(&path, &[(grid(), SheetWriteOptions::default())], None).unwrap();

        let xml = content_types(&path);
        assert!(xml.contains(MACRO_WORKBOOK_CONTENT_TYPE));
        assert!(!xml.contains(WORKBOOK_CONTENT_TYPE));

        // 改写后的包仍可读取
        let loaded = read_workbook(&path).unwrap();
        assert_eq!(loaded.sheets[0].cell(0, 0), Some(&CellValue::from("K1")));
    }

    #[test]
    fn test_xlsx_keeps_plain_content_type() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("p.xlsx");

        write_workbook(&path, &[(grid(), SheetWriteOptions::default())], None).unwrap();

        assert!(content_types(&path).contains(WORKBOOK_CONTENT_TYPE));
    }

    #[test]
    fn test_formula_written_back() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("f.xlsx");

        write_workbook(&path, &[(grid(), SheetWriteOptions::default())], None).unwrap();

        let loaded = read_workbook(&path).unwrap();
        assert_eq!(
            loaded.sheets[0].cell(0, 2),
            Some(&CellValue::Formula("B1*2".to_string()))
        );
    }

    #[test]
    fn test_date_format_pick() {
        let formats = DateFormats::new();
        assert_eq!(formats.pick(45586.0), &formats.date);
        assert_eq!(formats.pick(45586.5), &formats.datetime);
        assert_eq!(formats.pick(0.5), &formats.time);
    }
}
