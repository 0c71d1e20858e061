// ==========================================
// 导入工具 - 导入规范化实现
// ==========================================
// 职责: 单文件规范化流程 + 目录级并发调度
// 并发: 每个文件一个 tokio 阻塞任务，按完成顺序收集
// ==========================================

use crate::config::{FilenamePolicy, ImportConfig};
use crate::domain::{BatchSummary, NormalizeOutcome, SheetGrid};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::filename_parser::extract_constant_triple;
use crate::importer::import_normalizer_trait::ImportNormalizer;
use crate::importer::sheet_normalizer::{SheetNormalizer, SheetReport};
use crate::importer::summary_log::SummaryLog;
use crate::workbook::{is_spreadsheet, read_workbook, write_delimited, write_workbook};
use async_trait::async_trait;
use futures::stream::{FuturesUnordered, StreamExt};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Excel 打开文件时生成的锁文件前缀
const OFFICE_LOCK_PREFIX: &str = "~$";

pub struct ImportNormalizerImpl {
    config: Arc<ImportConfig>,
}

impl ImportNormalizerImpl {
    pub fn new(config: ImportConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &ImportConfig {
        &self.config
    }

    /// 列出目录下待处理的表格文件（按文件名排序）
    pub fn discover_files(&self) -> ImportResult<Vec<PathBuf>> {
        discover_spreadsheets(&self.config.folder)
    }
}

#[async_trait]
impl ImportNormalizer for ImportNormalizerImpl {
    fn normalize_file(&self, file_path: &Path) -> ImportResult<NormalizeOutcome> {
        normalize_workbook_file(&self.config, file_path)
    }

    async fn normalize_folder(&self) -> ImportResult<BatchSummary<NormalizeOutcome>> {
        let mut summary = BatchSummary::start();
        let files = self.discover_files()?;

        info!(
            run_id = %summary.run_id,
            folder = %self.config.folder.display(),
            count = files.len(),
            "开始规范化导入表格"
        );

        let summary_log = SummaryLog::create(self.config.summary_path())
            .map_err(|e| ImportError::SummaryWriteError(e.to_string()))?;

        // 为每个文件创建阻塞任务（spawn 后立即开始执行）
        let mut tasks = FuturesUnordered::new();
        for path in files {
            let file_name = file_name_of(&path);
            let config = Arc::clone(&self.config);
            let handle =
                tokio::task::spawn_blocking(move || normalize_workbook_file(&config, &path));
            tasks.push(async move { (file_name, handle.await) });
        }

        // 按完成顺序收集
        while let Some((file_name, joined)) = tasks.next().await {
            let result = joined.unwrap_or_else(|e| Err(ImportError::TaskFailed(e.to_string())));

            match result {
                Ok(outcome) => {
                    if let Err(e) = summary_log.append(&outcome.file_name, outcome.remaining_rows)
                    {
                        error!(file = %file_name, error = %e, "汇总文件追加失败");
                    }
                    summary.processed.push(outcome);
                }
                Err(e) if e.is_permission_denied() => {
                    error!(file = %file_name, error = %e, "文件权限不足，跳过");
                    summary.record_failure(file_name, e);
                }
                Err(e) => {
                    error!(file = %file_name, error = %e, "文件处理失败");
                    summary.record_failure(file_name, e);
                }
            }
        }

        summary.finish();
        info!(
            run_id = %summary.run_id,
            total = summary.total(),
            success = summary.processed.len(),
            failed = summary.failed.len(),
            "全部导入表格处理完成"
        );

        Ok(summary)
    }
}

/// 单文件规范化
///
/// # 流程
/// 1. 解析文件名常量（不足 5 个数字时按 filename_policy 处理）
/// 2. 读取全部工作表
/// 3. 逐工作表规范化（表头 / H-I-J / B 列补零 / A 列去重）
/// 4. 原地写回工作簿（只写值，样式清空；xlsm 带回宏工程）
/// 5. 以最后一个工作表输出分隔符 CSV
pub fn normalize_workbook_file(config: &ImportConfig, path: &Path) -> ImportResult<NormalizeOutcome> {
    let file_name = file_name_of(path);
    info!(file = %path.display(), "开始处理文件");

    let triple = match extract_constant_triple(&file_name) {
        Ok(triple) => Some(triple),
        Err(e) => match config.filename_policy {
            FilenamePolicy::SkipFill => {
                warn!(file = %file_name, error = %e, "文件名数字不足，跳过 H/I/J 填充");
                None
            }
            FilenamePolicy::SkipFile => {
                warn!(file = %file_name, error = %e, "文件名数字不足，跳过该文件");
                return Err(e);
            }
        },
    };
    let triple_filled = triple.is_some();

    let loaded = read_workbook(path)?;
    let normalizer = SheetNormalizer::new(triple);

    let mut sheets = Vec::with_capacity(loaded.sheets.len());
    let mut last_report = SheetReport::default();
    for mut grid in loaded.sheets {
        last_report = normalizer.normalize(&mut grid);
        let options = last_report.write_options();
        sheets.push((grid, options));
    }

    write_workbook(path, &sheets, loaded.vba_project.as_deref())?;
    debug!(file = %file_name, "工作簿已原地保存");

    let csv_path = path
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .join(config.csv_file_name(&file_name));
    let empty = SheetGrid::default();
    let csv_grid = sheets.last().map(|(grid, _)| grid).unwrap_or(&empty);
    write_delimited(&csv_path, csv_grid, config.delimiter_byte())?;

    info!(
        file = %file_name,
        rows = last_report.remaining_rows,
        removed = last_report.removed_duplicates,
        csv = %csv_path.display(),
        "文件处理完成"
    );

    Ok(NormalizeOutcome {
        file_name,
        remaining_rows: last_report.remaining_rows,
        removed_duplicates: last_report.removed_duplicates,
        csv_path: csv_path.display().to_string(),
        triple_filled,
        sheet_count: sheets.len(),
    })
}

/// 列出目录下的 .xlsx / .xlsm 文件（跳过 Office 锁文件）
pub fn discover_spreadsheets(folder: &Path) -> ImportResult<Vec<PathBuf>> {
    let entries = std::fs::read_dir(folder)
        .map_err(|e| ImportError::FolderReadError(format!("{}: {}", folder.display(), e)))?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry?.path();
        if !path.is_file() || !is_spreadsheet(&path) {
            continue;
        }
        if file_name_of(&path).starts_with(OFFICE_LOCK_PREFIX) {
            debug!(file = %path.display(), "跳过 Office 锁文件");
            continue;
        }
        files.push(path);
    }

    files.sort();
    Ok(files)
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_discover_spreadsheets_filters_and_sorts() {
        let dir = TempDir::new().unwrap();
        for name in ["b.xlsx", "a.XLSM", "c.csv", "~$b.xlsx", "notes.txt"] {
            std::fs::write(dir.path().join(name), b"").unwrap();
        }
        std::fs::create_dir(dir.path().join("d.xlsx")).unwrap();

        let files = discover_spreadsheets(dir.path()).unwrap();
        let names: Vec<String> = files.iter().map(|p| file_name_of(p)).collect();

        assert_eq!(names, vec!["a.XLSM", "b.xlsx"]);
    }

    #[test]
    fn test_discover_missing_folder() {
        let result = discover_spreadsheets(Path::new("/non/existent/folder"));
        assert!(matches!(result, Err(ImportError::FolderReadError(_))));
    }

    #[test]
    fn test_skip_file_policy_leaves_file_untouched() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("few_1_2.xlsx");
        std::fs::write(&path, b"not really a workbook").unwrap();

        let config = ImportConfig {
            folder: dir.path().to_path_buf(),
            filename_policy: FilenamePolicy::SkipFile,
            ..ImportConfig::default()
        };

        let result = normalize_workbook_file(&config, &path);

        assert!(matches!(result, Err(ImportError::FilenameTokens { found: 2, .. })));
        assert_eq!(std::fs::read(&path).unwrap(), b"not really a workbook");
    }
}
