// ==========================================
// 导入工具 - 导入规范化错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use crate::workbook::WorkbookError;
use thiserror::Error;

/// 导入规范化错误类型
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 文件相关错误 =====
    #[error("文件不存在: {0}")]
    FileNotFound(String),

    #[error("文件格式不支持: {0}（仅支持 .xlsx/.xlsm）")]
    UnsupportedFormat(String),

    #[error("权限不足: {0}")]
    PermissionDenied(String),

    #[error("目录读取失败: {0}")]
    FolderReadError(String),

    #[error("汇总文件写入失败: {0}")]
    SummaryWriteError(String),

    // ===== 文件名解析错误 =====
    #[error("文件名 {filename} 不足 5 个数字（实际 {found} 个）")]
    FilenameTokens { filename: String, found: usize },

    // ===== 表格读写错误 =====
    #[error(transparent)]
    Workbook(WorkbookError),

    // ===== 任务错误 =====
    #[error("处理任务异常退出: {0}")]
    TaskFailed(String),
}

impl ImportError {
    pub fn is_permission_denied(&self) -> bool {
        matches!(self, ImportError::PermissionDenied(_))
    }
}

// 实现 From<WorkbookError>（文件类错误展开为导入错误）
impl From<WorkbookError> for ImportError {
    fn from(err: WorkbookError) -> Self {
        match err {
            WorkbookError::FileNotFound(path) => ImportError::FileNotFound(path),
            WorkbookError::UnsupportedFormat(ext) => ImportError::UnsupportedFormat(ext),
            WorkbookError::PermissionDenied(msg) => ImportError::PermissionDenied(msg),
            other => ImportError::Workbook(other),
        }
    }
}

// 实现 From<std::io::Error>
impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::from(WorkbookError::from(err))
    }
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::ErrorKind;

    #[test]
    fn test_permission_error_maps_through() {
        let err = ImportError::from(std::io::Error::new(ErrorKind::PermissionDenied, "locked"));
        assert!(err.is_permission_denied());
    }

    #[test]
    fn test_filename_tokens_message() {
        let err = ImportError::FilenameTokens {
            filename: "a_1_2.xlsx".to_string(),
            found: 2,
        };
        assert!(err.to_string().contains("a_1_2.xlsx"));
    }
}
