// ==========================================
// 导入工具 - 表格读写层
// ==========================================
// 职责: xlsx/xlsm 读取、值与公式的工作簿写出、分隔符文本写出
// ==========================================

pub mod csv_writer;
pub mod error;
pub mod reader;
pub mod writer;

// 重导出核心类型
pub use csv_writer::{write_delimited, PIPE_DELIMITER};
pub use error::{WorkbookError, WorkbookResult};
pub use reader::{is_spreadsheet, lowercase_extension, read_workbook, LoadedWorkbook};
pub use writer::{write_line_sheets, write_workbook, SheetWriteOptions};
