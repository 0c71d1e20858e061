// ==========================================
// 导入工具 - 错误报表导出
// ==========================================
// 流程（逐文件，顺序执行）:
// 1. 读取 txt（UTF-8）
// 2. 行分类（排除 / Phone / Other）
// 3. 写出 <Completed>/<主文件名>.xlsx（Phone、Other 两个工作表，无表头）
// 4. 删除源 txt
// 全部完成后写出已处理清单 Completed.txt
// ==========================================

use crate::config::ErrorReportConfig;
use crate::domain::{BatchSummary, ReportOutcome};
use crate::error_report::error::{ReportError, ReportResult};
use crate::error_report::line_classifier::classify_text;
use crate::workbook::{lowercase_extension, write_line_sheets};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{error, info};

pub const PHONE_SHEET: &str = "Phone";
pub const OTHER_SHEET: &str = "Other";

// ==========================================
// ReportExporter Trait
// ==========================================
// 实现者: ReportExporterImpl
pub trait ReportExporter {
    /// 导出单个 txt 报表并删除源文件
    ///
    /// # 参数
    /// - file_path: txt 文件路径
    /// - output_dir: xlsx 输出目录
    fn export_file(&self, file_path: &Path, output_dir: &Path) -> ReportResult<ReportOutcome>;

    /// 导出来源目录下全部 txt 报表
    ///
    /// # 说明
    /// - 单个文件失败只记录，源文件保留
    /// - 清单只包含成功处理的文件名
    fn export_folder(&self) -> ReportResult<BatchSummary<ReportOutcome>>;
}

pub struct ReportExporterImpl {
    config: ErrorReportConfig,
}

impl ReportExporterImpl {
    pub fn new(config: ErrorReportConfig) -> Self {
        Self { config }
    }

    /// 列出来源目录下的 txt 文件（按文件名排序，排除清单文件自身）
    pub fn discover_files(&self) -> ReportResult<Vec<PathBuf>> {
        let folder = &self.config.source_dir;
        let entries = std::fs::read_dir(folder)
            .map_err(|e| ReportError::FolderReadError(format!("{}: {}", folder.display(), e)))?;

        let mut files = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if !path.is_file() || lowercase_extension(&path) != "txt" {
                continue;
            }
            if file_name_of(&path) == self.config.manifest_file_name {
                continue;
            }
            files.push(path);
        }

        files.sort();
        Ok(files)
    }
}

impl ReportExporter for ReportExporterImpl {
    fn export_file(&self, file_path: &Path, output_dir: &Path) -> ReportResult<ReportOutcome> {
        let file_name = file_name_of(file_path);

        let text = std::fs::read_to_string(file_path)?;
        let classified = classify_text(&text);

        let output_path = output_dir.join(xlsx_file_name(&file_name));
        write_line_sheets(
            &output_path,
            &[
                (PHONE_SHEET, classified.phone.as_slice()),
                (OTHER_SHEET, classified.other.as_slice()),
            ],
        )?;
        info!(output = %output_path.display(), "已导出");

        std::fs::remove_file(file_path)?;
        info!(file = %file_path.display(), "已删除源文件");

        Ok(ReportOutcome {
            file_name,
            output_path: output_path.display().to_string(),
            phone_rows: classified.phone.len(),
            other_rows: classified.other.len(),
            excluded_rows: classified.excluded,
        })
    }

    fn export_folder(&self) -> ReportResult<BatchSummary<ReportOutcome>> {
        let mut summary = BatchSummary::start();
        let output_dir = self.config.completed_dir();
        std::fs::create_dir_all(&output_dir)?;

        let files = self.discover_files()?;
        info!(
            run_id = %summary.run_id,
            folder = %self.config.source_dir.display(),
            count = files.len(),
            "开始导出错误报表"
        );

        for path in files {
            match self.export_file(&path, &output_dir) {
                Ok(outcome) => summary.processed.push(outcome),
                Err(e) => {
                    error!(file = %path.display(), error = %e, "错误报表导出失败");
                    summary.record_failure(file_name_of(&path), e);
                }
            }
        }

        let manifest_path = self.config.manifest_path();
        let names: Vec<&str> = summary.processed.iter().map(|o| o.file_name.as_str()).collect();
        write_manifest(&manifest_path, &names)
            .map_err(|e| ReportError::ManifestWriteError(e.to_string()))?;
        info!(manifest = %manifest_path.display(), "已处理文件清单已保存");

        summary.finish();
        info!(
            run_id = %summary.run_id,
            success = summary.processed.len(),
            failed = summary.failed.len(),
            "错误报表处理完成，txt 文件已删除"
        );

        Ok(summary)
    }
}

/// 写出已处理清单（覆盖），每行一个文件名
pub fn write_manifest(path: &Path, file_names: &[&str]) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    for name in file_names {
        writeln!(file, "{}", name)?;
    }
    Ok(())
}

/// 输出文件名: 去掉最后一个扩展名后加 .xlsx
pub fn xlsx_file_name(file_name: &str) -> String {
    let stem = Path::new(file_name)
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| file_name.to_string());
    format!("{}.xlsx", stem)
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}
