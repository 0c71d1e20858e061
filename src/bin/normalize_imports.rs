// ==========================================
// 导入工具 - 导入表格规范化入口
// ==========================================
// 用法:
//   cargo run --bin normalize-imports
//
// 目录来自配置（见 config::ToolConfig::load），无命令行参数。
// ==========================================

use import_tools::config::ToolConfig;
use import_tools::importer::{ImportNormalizer, ImportNormalizerImpl};
use import_tools::logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ToolConfig::load()?;
    logging::init(config.log_format);

    tracing::info!("==================================================");
    tracing::info!("{} - 导入表格规范化", import_tools::APP_NAME);
    tracing::info!("版本: {}", import_tools::VERSION);
    tracing::info!("==================================================");

    let normalizer = ImportNormalizerImpl::new(config.import);
    let summary = normalizer.normalize_folder().await?;

    for failed in &summary.failed {
        tracing::warn!(file = %failed.file_name, error = %failed.error, "文件未完成处理");
    }
    tracing::info!(
        summary = %serde_json::to_string(&summary)?,
        "运行汇总"
    );

    Ok(())
}
