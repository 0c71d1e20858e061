// ==========================================
// 导入工具 - 表格读写错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use std::io::ErrorKind;
use thiserror::Error;

/// 表格 / CSV 读写错误类型
#[derive(Error, Debug)]
pub enum WorkbookError {
    // ===== 文件相关错误 =====
    #[error("文件不存在: {0}")]
    FileNotFound(String),

    #[error("文件格式不支持: {0}（仅支持 .xlsx/.xlsm）")]
    UnsupportedFormat(String),

    #[error("权限不足: {0}")]
    PermissionDenied(String),

    #[error("文件读写失败: {0}")]
    Io(std::io::Error),

    // ===== 格式相关错误 =====
    #[error("Excel 解析失败: {0}")]
    ExcelParse(String),

    #[error("Excel 写出失败: {0}")]
    ExcelWrite(String),

    #[error("CSV 写出失败: {0}")]
    Csv(String),

    #[error("宏工程读取失败: {0}")]
    VbaProject(String),
}

impl WorkbookError {
    pub fn is_permission_denied(&self) -> bool {
        matches!(self, WorkbookError::PermissionDenied(_))
    }
}

// 实现 From<std::io::Error>（权限错误单独归类）
impl From<std::io::Error> for WorkbookError {
    fn from(err: std::io::Error) -> Self {
        if err.kind() == ErrorKind::PermissionDenied {
            WorkbookError::PermissionDenied(err.to_string())
        } else {
            WorkbookError::Io(err)
        }
    }
}

// 实现 From<calamine::XlsxError>
impl From<calamine::XlsxError> for WorkbookError {
    fn from(err: calamine::XlsxError) -> Self {
        match err {
            calamine::XlsxError::Io(io) => WorkbookError::from(io),
            other => WorkbookError::ExcelParse(other.to_string()),
        }
    }
}

// 实现 From<rust_xlsxwriter::XlsxError>
impl From<rust_xlsxwriter::XlsxError> for WorkbookError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        match err {
            rust_xlsxwriter::XlsxError::IoError(io) => WorkbookError::from(io),
            other => WorkbookError::ExcelWrite(other.to_string()),
        }
    }
}

// 实现 From<csv::Error>
impl From<csv::Error> for WorkbookError {
    fn from(err: csv::Error) -> Self {
        if let csv::ErrorKind::Io(io) = err.kind() {
            if io.kind() == ErrorKind::PermissionDenied {
                return WorkbookError::PermissionDenied(io.to_string());
            }
        }
        WorkbookError::Csv(err.to_string())
    }
}

// 实现 From<zip::result::ZipError>
impl From<zip::result::ZipError> for WorkbookError {
    fn from(err: zip::result::ZipError) -> Self {
        match err {
            zip::result::ZipError::Io(io) => WorkbookError::from(io),
            other => WorkbookError::VbaProject(other.to_string()),
        }
    }
}

/// Result 类型别名
pub type WorkbookResult<T> = Result<T, WorkbookError>;
