// ==========================================
// 导入工具 - 处理结果实体
// ==========================================
// 职责: 单文件结果 / 批次汇总
// ==========================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ==========================================
// LineBucket - 错误报表行分类
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineBucket {
    Excluded,      // 排除行（File: / client program not found）
    Phone(String), // Phone 工作表
    Other(String), // Other 工作表
}

// ==========================================
// ClassifiedLines - 单个错误报表的分组结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ClassifiedLines {
    pub phone: Vec<String>,
    pub other: Vec<String>,
    pub excluded: usize,
}

impl ClassifiedLines {
    pub fn push(&mut self, bucket: LineBucket) {
        match bucket {
            LineBucket::Excluded => self.excluded += 1,
            LineBucket::Phone(line) => self.phone.push(line),
            LineBucket::Other(line) => self.other.push(line),
        }
    }
}

// ==========================================
// ReportOutcome - 错误报表单文件导出结果
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportOutcome {
    pub file_name: String,   // 源 txt 文件名
    pub output_path: String, // 输出 xlsx 路径
    pub phone_rows: usize,   // Phone 行数
    pub other_rows: usize,   // Other 行数
    pub excluded_rows: usize,
}

// ==========================================
// NormalizeOutcome - 导入表格单文件规范化结果
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizeOutcome {
    pub file_name: String,      // 源表格文件名
    pub remaining_rows: usize,  // 去重后剩余行数（最后一个工作表）
    pub removed_duplicates: usize,
    pub csv_path: String,       // 输出 CSV 路径
    pub triple_filled: bool,    // H/I/J 是否已填充
    pub sheet_count: usize,
}

// ==========================================
// FailedFile - 失败文件记录
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailedFile {
    pub file_name: String,
    pub error: String,
}

// ==========================================
// BatchSummary - 一次运行的汇总
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchSummary<T> {
    pub run_id: String,                       // 运行 ID（UUID）
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub processed: Vec<T>,
    pub failed: Vec<FailedFile>,
}

impl<T> BatchSummary<T> {
    pub fn start() -> Self {
        Self {
            run_id: Uuid::new_v4().to_string(),
            started_at: Utc::now(),
            finished_at: None,
            processed: Vec::new(),
            failed: Vec::new(),
        }
    }

    pub fn record_failure(&mut self, file_name: impl Into<String>, error: impl ToString) {
        self.failed.push(FailedFile {
            file_name: file_name.into(),
            error: error.to_string(),
        });
    }

    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    pub fn total(&self) -> usize {
        self.processed.len() + self.failed.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classified_lines_push() {
        let mut lines = ClassifiedLines::default();
        lines.push(LineBucket::Excluded);
        lines.push(LineBucket::Phone("Phone: 1".to_string()));
        lines.push(LineBucket::Other("x".to_string()));
        assert_eq!(lines.excluded, 1);
        assert_eq!(lines.phone, vec!["Phone: 1"]);
        assert_eq!(lines.other, vec!["x"]);
    }

    #[test]
    fn test_batch_summary_lifecycle() {
        let mut summary: BatchSummary<String> = BatchSummary::start();
        assert!(!summary.run_id.is_empty());
        summary.processed.push("a.xlsx".to_string());
        summary.record_failure("b.xlsx", "boom");
        summary.finish();
        assert_eq!(summary.total(), 2);
        assert!(summary.finished_at.is_some());
        assert_eq!(summary.failed[0].error, "boom");
    }
}
