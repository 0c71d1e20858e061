// ==========================================
// 导入工具 - 核心库
// ==========================================
// 组成: 错误报表导出 + 导入表格规范化
// 技术栈: calamine + rust_xlsxwriter + csv + tokio
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 单元格 / 工作表 / 处理结果
pub mod domain;

// 表格读写层
pub mod workbook;

// 错误报表导出
pub mod error_report;

// 导入表格规范化
pub mod importer;

// 配置层
pub mod config;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

pub use config::{FilenamePolicy, ToolConfig};
pub use domain::{BatchSummary, CellValue, NormalizeOutcome, ReportOutcome, SheetGrid};
pub use error_report::{ReportExporter, ReportExporterImpl};
pub use importer::{ImportNormalizer, ImportNormalizerImpl};

// ==========================================
// 常量定义
// ==========================================

// 版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 名称
pub const APP_NAME: &str = "导入/错误报表批处理工具";
