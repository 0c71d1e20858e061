// ==========================================
// 导入工具 - 配置层
// ==========================================
// 职责: 运行配置加载（默认值 / JSON 文件 / 环境变量）
// ==========================================

pub mod tool_config;

// 重导出核心配置
pub use tool_config::{
    default_config_path, ConfigError, ErrorReportConfig, FilenamePolicy, ImportConfig, LogFormat,
    ToolConfig, CONFIG_PATH_ENV, ERROR_DIR_ENV, IMPORT_DIR_ENV,
};
