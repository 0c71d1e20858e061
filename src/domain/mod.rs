// ==========================================
// 导入工具 - 领域模型层
// ==========================================
// 职责: 单元格 / 工作表网格 / 处理结果
// 红线: 不含文件读写逻辑
// ==========================================

pub mod cell;
pub mod outcome;
pub mod sheet;

// 重导出核心类型
pub use cell::{CellKey, CellValue};
pub use outcome::{
    BatchSummary, ClassifiedLines, FailedFile, LineBucket, NormalizeOutcome, ReportOutcome,
};
pub use sheet::{SheetGrid, CLEARED_COLUMN_COUNT, KEY_COLUMN, PADDED_COLUMN, TRIPLE_COLUMNS};
