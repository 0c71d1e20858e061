// ==========================================
// 导入工具 - 导入规范化 Trait
// ==========================================
// 职责: 定义导入表格规范化接口（不包含实现）
// ==========================================

use crate::domain::{BatchSummary, NormalizeOutcome};
use crate::importer::error::ImportResult;
use async_trait::async_trait;
use std::path::Path;

// ==========================================
// ImportNormalizer Trait
// ==========================================
// 实现者: ImportNormalizerImpl
#[async_trait]
pub trait ImportNormalizer: Send + Sync {
    /// 规范化单个表格文件（原地改写 + 输出 CSV）
    ///
    /// # 参数
    /// - file_path: .xlsx / .xlsm 文件路径
    ///
    /// # 返回
    /// - Ok(NormalizeOutcome): 剩余行数、CSV 路径等
    /// - Err: 文件读写失败、文件名策略为 skip_file 且数字不足等
    ///
    /// # 说明
    /// - 失败时文件可能已部分改写（不回滚）
    fn normalize_file(&self, file_path: &Path) -> ImportResult<NormalizeOutcome>;

    /// 规范化目录下全部表格文件（每个文件一个并发任务）
    ///
    /// # 返回
    /// - Ok(BatchSummary): 成功 / 失败明细
    /// - Err: 目录不可读、汇总文件无法创建
    ///
    /// # 说明
    /// - 单个文件失败不影响其他文件
    /// - 结果按完成顺序收集并追加到汇总文件
    async fn normalize_folder(&self) -> ImportResult<BatchSummary<NormalizeOutcome>>;
}
