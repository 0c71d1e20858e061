// ==========================================
// 测试辅助函数
// ==========================================
// 职责: 生成带样式的 xlsx/xlsm 测试文件、读回工作簿、读取包内条目
// ==========================================

#![allow(dead_code)]

use import_tools::domain::{CellValue, SheetGrid};
use import_tools::workbook::read_workbook;
use rust_xlsxwriter::{Color, Format, Workbook};
use std::error::Error;
use std::io::Read;
use std::path::Path;

/// 测试单元格
pub enum Fx {
    S(&'static str),
    N(f64),
    /// 公式（含前导 '='）
    F(&'static str),
    /// 日期序列号（yyyy-mm-dd 格式）
    D(f64),
    Blank,
}

/// 生成测试工作簿
///
/// 第 1 行按表头写出（加粗 + 填充色），B 列数字带自定义数字格式，
/// 用于验证规范化后样式被清空
pub fn write_fixture(path: &Path, sheets: &[(&str, Vec<Vec<Fx>>)]) -> Result<(), Box<dyn Error>> {
    let mut workbook = build_fixture(sheets)?;
    workbook.save(path)?;
    Ok(())
}

/// 生成带宏工程的 xlsm 测试工作簿
pub fn write_fixture_with_vba(
    path: &Path,
    sheets: &[(&str, Vec<Vec<Fx>>)],
    vba_project: &[u8],
) -> Result<(), Box<dyn Error>> {
    let vba_file = tempfile::NamedTempFile::new()?;
    std::fs::write(vba_file.path(), vba_project)?;

    let mut workbook = build_fixture(sheets)?;
    workbook.add_vba_project(vba_file.path())?;
    workbook.save(path)?;
    Ok(())
}

fn build_fixture(sheets: &[(&str, Vec<Vec<Fx>>)]) -> Result<Workbook, Box<dyn Error>> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold().set_background_color(Color::Yellow);
    let number = Format::new().set_num_format("#,##0.00");
    let date = Format::new().set_num_format("yyyy-mm-dd");

    for (name, rows) in sheets {
        let sheet = workbook.add_worksheet();
        sheet.set_name(*name)?;

        for (r, cells) in rows.iter().enumerate() {
            for (c, cell) in cells.iter().enumerate() {
                let (row, col) = (r as u32, c as u16);
                match cell {
                    Fx::S(s) if r == 0 => {
                        sheet.write_string_with_format(row, col, *s, &header)?;
                    }
                    Fx::S(s) => {
                        sheet.write_string(row, col, *s)?;
                    }
                    Fx::N(n) if c == 1 => {
                        sheet.write_number_with_format(row, col, *n, &number)?;
                    }
                    Fx::N(n) => {
                        sheet.write_number(row, col, *n)?;
                    }
                    Fx::F(f) => {
                        sheet.write_formula(row, col, *f)?;
                    }
                    Fx::D(serial) => {
                        sheet.write_number_with_format(row, col, *serial, &date)?;
                    }
                    Fx::Blank => {}
                }
            }
        }
    }

    Ok(workbook)
}

/// 读取工作簿包内条目原始字节
pub fn zip_entry(path: &Path, name: &str) -> Vec<u8> {
    let file = std::fs::File::open(path).expect("workbook should exist");
    let mut archive = zip::ZipArchive::new(file).expect("workbook should be a zip package");
    let mut entry = archive.by_name(name).expect("entry should exist");
    let mut bytes = Vec::new();
    entry.read_to_end(&mut bytes).expect("entry should be readable");
    bytes
}

/// 读取工作簿包内文本条目
pub fn zip_text(path: &Path, name: &str) -> String {
    String::from_utf8(zip_entry(path, name)).expect("entry should be UTF-8")
}

/// 读回全部工作表
pub fn read_sheets(path: &Path) -> Vec<SheetGrid> {
    read_workbook(path).expect("workbook should be readable").sheets
}

/// 单元格文本（越界视为空串）
pub fn text_at(grid: &SheetGrid, row: usize, col: usize) -> String {
    grid.cell(row, col).map(CellValue::render).unwrap_or_default()
}

/// 某列全部文本
pub fn column_text(grid: &SheetGrid, col: usize) -> Vec<String> {
    grid.column_values(col).iter().map(CellValue::render).collect()
}
