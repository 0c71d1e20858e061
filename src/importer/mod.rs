// ==========================================
// 导入工具 - 导入表格规范化层
// ==========================================
// 职责: 待导入表格清洗（表头 / 常量列 / 补零 / 去重）并输出 CSV
// 支持: Excel (.xlsx / .xlsm)
// ==========================================

// 模块声明
pub mod column_formatter;
pub mod duplicate_filter;
pub mod error;
pub mod filename_parser;
pub mod import_normalizer_impl;
pub mod import_normalizer_trait;
pub mod sheet_normalizer;
pub mod summary_log;

// 重导出核心类型
pub use column_formatter::{pad_column, zero_pad, PAD_WIDTH};
pub use duplicate_filter::{detect_duplicates, remove_duplicate_rows};
pub use error::{ImportError, ImportResult};
pub use filename_parser::{extract_constant_triple, numeric_tokens, ConstantTriple};
pub use import_normalizer_impl::{discover_spreadsheets, normalize_workbook_file, ImportNormalizerImpl};
pub use sheet_normalizer::{SheetNormalizer, SheetReport};
pub use summary_log::SummaryLog;

// 重导出 Trait 接口
pub use import_normalizer_trait::ImportNormalizer;
