// ==========================================
// 导入工具 - 错误报表导出错误类型
// ==========================================

use crate::workbook::WorkbookError;
use std::io::ErrorKind;
use thiserror::Error;

/// 错误报表导出错误类型
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("权限不足: {0}")]
    PermissionDenied(String),

    #[error("文件编码错误（需要 UTF-8）: {0}")]
    EncodingError(String),

    #[error("文件读写失败: {0}")]
    FileIoError(String),

    #[error("目录读取失败: {0}")]
    FolderReadError(String),

    #[error("清单文件写入失败: {0}")]
    ManifestWriteError(String),

    #[error(transparent)]
    Workbook(WorkbookError),
}

impl ReportError {
    pub fn is_permission_denied(&self) -> bool {
        matches!(self, ReportError::PermissionDenied(_))
    }
}

// 实现 From<std::io::Error>
impl From<std::io::Error> for ReportError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            ErrorKind::PermissionDenied => ReportError::PermissionDenied(err.to_string()),
            ErrorKind::InvalidData => ReportError::EncodingError(err.to_string()),
            _ => ReportError::FileIoError(err.to_string()),
        }
    }
}

// 实现 From<WorkbookError>
impl From<WorkbookError> for ReportError {
    fn from(err: WorkbookError) -> Self {
        match err {
            WorkbookError::PermissionDenied(msg) => ReportError::PermissionDenied(msg),
            other => ReportError::Workbook(other),
        }
    }
}

/// Result 类型别名
pub type ReportResult<T> = Result<T, ReportError>;
