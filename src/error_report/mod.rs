// ==========================================
// 导入工具 - 错误报表导出层
// ==========================================
// 职责: txt 错误报表过滤、分组并导出为 Phone / Other 两页工作簿
// ==========================================

pub mod error;
pub mod line_classifier;
pub mod report_exporter;

// 重导出核心类型
pub use error::{ReportError, ReportResult};
pub use line_classifier::{classify_line, classify_text};
pub use report_exporter::{
    write_manifest, xlsx_file_name, ReportExporter, ReportExporterImpl, OTHER_SHEET, PHONE_SHEET,
};
