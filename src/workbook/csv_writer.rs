// ==========================================
// 导入工具 - 分隔符文本写出
// ==========================================
// 工具: csv crate
// 职责: 工作表网格写出为 UTF-8 分隔符文本（最少引号，CRLF 行尾）
// ==========================================

use crate::domain::SheetGrid;
use crate::workbook::error::WorkbookResult;
use csv::{QuoteStyle, Terminator, WriterBuilder};
use std::path::Path;

/// 导入 CSV 的默认分隔符
pub const PIPE_DELIMITER: u8 = b'|';

/// 写出分隔符文本
///
/// 每行按工作表最宽列数补齐，空单元格写为空字段
pub fn write_delimited(path: &Path, grid: &SheetGrid, delimiter: u8) -> WorkbookResult<()> {
    let mut writer = WriterBuilder::new()
        .delimiter(delimiter)
        .quote_style(QuoteStyle::Necessary)
        .terminator(Terminator::CRLF)
        .from_path(path)?;

    let width = grid.width();
    if width > 0 {
        for cells in &grid.rows {
            let mut record: Vec<String> = cells.iter().map(|c| c.render()).collect();
            record.resize(width, String::new());
            writer.write_record(&record)?;
        }
    }

    writer.flush()?;
    Ok(())
}
