// ==========================================
// 导入工具 - 错误报表导出入口
// ==========================================
// 用法:
//   cargo run --bin export-error-reports
//
// 目录来自配置（见 config::ToolConfig::load），无命令行参数。
// ==========================================

use import_tools::config::ToolConfig;
use import_tools::error_report::{ReportExporter, ReportExporterImpl};
use import_tools::logging;

fn main() -> anyhow::Result<()> {
    let config = ToolConfig::load()?;
    logging::init(config.log_format);

    tracing::info!("==================================================");
    tracing::info!("{} - 错误报表导出", import_tools::APP_NAME);
    tracing::info!("版本: {}", import_tools::VERSION);
    tracing::info!("==================================================");

    let exporter = ReportExporterImpl::new(config.error_report);
    let summary = exporter.export_folder()?;

    if !summary.failed.is_empty() {
        tracing::warn!(failed = summary.failed.len(), "部分文件导出失败，源文件已保留");
    }

    Ok(())
}
