// ==========================================
// 导入工具 - 运行配置
// ==========================================
// 职责: 目录 / 输出文件名 / 文件名策略 / 日志格式
// 来源优先级: 内置默认值 < JSON 配置文件 < 环境变量
// ==========================================

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// 配置文件路径环境变量
pub const CONFIG_PATH_ENV: &str = "IMPORT_TOOLS_CONFIG";
/// 错误报表目录环境变量
pub const ERROR_DIR_ENV: &str = "IMPORT_TOOLS_ERROR_DIR";
/// 待导入目录环境变量
pub const IMPORT_DIR_ENV: &str = "IMPORT_TOOLS_IMPORT_DIR";

const APP_CONFIG_DIR: &str = "import-tools";
const CONFIG_FILE_NAME: &str = "config.json";

// ==========================================
// ConfigError - 配置错误
// ==========================================
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件读取失败 ({path}): {source}")]
    ReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("配置文件格式错误 ({path}): {message}")]
    ParseError { path: String, message: String },

    #[error("配置值无效 (key: {key}): {message}")]
    InvalidValue { key: String, message: String },
}

// ==========================================
// FilenamePolicy - 文件名数字不足时的处理策略
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilenamePolicy {
    /// 跳过 H/I/J 填充，其余步骤照常
    #[default]
    SkipFill,
    /// 整个文件不处理，记为失败
    SkipFile,
}

// ==========================================
// LogFormat - 日志输出格式
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

// ==========================================
// ErrorReportConfig - 错误报表导出配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ErrorReportConfig {
    pub source_dir: PathBuf,          // txt 来源目录
    pub completed_dir_name: String,   // 输出子目录名
    pub manifest_file_name: String,   // 已处理清单文件名（位于来源目录）
}

impl Default for ErrorReportConfig {
    fn default() -> Self {
        Self {
            source_dir: imports_errors_root().join("Error"),
            completed_dir_name: "Completed".to_string(),
            manifest_file_name: "Completed.txt".to_string(),
        }
    }
}

impl ErrorReportConfig {
    pub fn completed_dir(&self) -> PathBuf {
        self.source_dir.join(&self.completed_dir_name)
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.source_dir.join(&self.manifest_file_name)
    }
}

// ==========================================
// ImportConfig - 导入表格规范化配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportConfig {
    pub folder: PathBuf,                  // 待导入表格目录（原地改写）
    pub summary_file_name: String,        // 剩余行数汇总文件名
    pub csv_suffix: String,               // CSV 文件名后缀（拼在主文件名后）
    pub csv_delimiter: char,              // CSV 分隔符（单字节 ASCII）
    pub filename_policy: FilenamePolicy,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            folder: imports_errors_root().join("Import").join("To be imported"),
            summary_file_name: "Duplicates remaining.txt".to_string(),
            csv_suffix: " csv".to_string(),
            csv_delimiter: '|',
            filename_policy: FilenamePolicy::SkipFill,
        }
    }
}

impl ImportConfig {
    pub fn summary_path(&self) -> PathBuf {
        self.folder.join(&self.summary_file_name)
    }

    /// CSV 文件名: 去掉最后一个扩展名 + 后缀 + .csv
    pub fn csv_file_name(&self, file_name: &str) -> String {
        let stem = file_name
            .rsplit_once('.')
            .map(|(stem, _)| stem)
            .unwrap_or(file_name);
        format!("{}{}.csv", stem, self.csv_suffix)
    }

    pub fn delimiter_byte(&self) -> u8 {
        // validate() 已保证是 ASCII
        self.csv_delimiter as u8
    }
}

// ==========================================
// ToolConfig - 顶层配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolConfig {
    pub error_report: ErrorReportConfig,
    pub import: ImportConfig,
    pub log_format: LogFormat,
}

impl ToolConfig {
    /// 加载配置
    ///
    /// 1. 内置默认值
    /// 2. $IMPORT_TOOLS_CONFIG 或 <config_dir>/import-tools/config.json（存在时）
    /// 3. 环境变量覆写目录
    pub fn load() -> Result<Self, ConfigError> {
        let explicit = std::env::var(CONFIG_PATH_ENV)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);

        let mut config = match explicit {
            // 显式指定的配置文件必须存在
            Some(path) => Self::from_file(&path)?,
            None => match default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                _ => Self::default(),
            },
        };

        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// 从 JSON 文件读取（缺失字段取默认值）
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.display().to_string(),
            source: e,
        })?;

        let config: ToolConfig =
            serde_json::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        debug!(path = %path.display(), "配置文件已加载");
        Ok(config)
    }

    /// 目录覆写（空白值忽略）
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        if let Some(dir) = non_blank(ERROR_DIR_ENV) {
            self.error_report.source_dir = PathBuf::from(dir);
        }
        if let Some(dir) = non_blank(IMPORT_DIR_ENV) {
            self.import.folder = PathBuf::from(dir);
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.import.csv_delimiter.is_ascii() {
            return Err(ConfigError::InvalidValue {
                key: "import.csv_delimiter".to_string(),
                message: format!("分隔符必须是 ASCII 字符: {:?}", self.import.csv_delimiter),
            });
        }

        let names = [
            ("error_report.completed_dir_name", &self.error_report.completed_dir_name),
            ("error_report.manifest_file_name", &self.error_report.manifest_file_name),
            ("import.summary_file_name", &self.import.summary_file_name),
        ];
        for (key, value) in names {
            if value.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    key: key.to_string(),
                    message: "不能为空".to_string(),
                });
            }
        }

        Ok(())
    }
}

/// 默认配置文件路径: <config_dir>/import-tools/config.json
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_CONFIG_DIR).join(CONFIG_FILE_NAME))
}

fn imports_errors_root() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("OneDrive - XpertEase")
        .join("Imports-Errors")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = ToolConfig::default();
        assert!(config.error_report.source_dir.ends_with("Imports-Errors/Error"));
        assert_eq!(
            config.error_report.manifest_path(),
            config.error_report.source_dir.join("Completed.txt")
        );
        assert_eq!(config.import.summary_file_name, "Duplicates remaining.txt");
        assert_eq!(config.import.filename_policy, FilenamePolicy::SkipFill);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_csv_file_name() {
        let config = ImportConfig::default();
        assert_eq!(config.csv_file_name("a_1_2.xlsx"), "a_1_2 csv.csv");
        assert_eq!(config.csv_file_name("a.b.xlsm"), "a.b csv.csv");
        assert_eq!(config.csv_file_name("noext"), "noext csv.csv");
    }

    #[test]
    fn test_from_file_partial() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"{{ "import": {{ "folder": "/data/in", "filename_policy": "skip_file" }}, "log_format": "json" }}"#
        )
        .unwrap();

        let config = ToolConfig::from_file(file.path()).unwrap();
        assert_eq!(config.import.folder, PathBuf::from("/data/in"));
        assert_eq!(config.import.filename_policy, FilenamePolicy::SkipFile);
        assert_eq!(config.import.csv_suffix, " csv");
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.error_report.completed_dir_name, "Completed");
    }

    #[test]
    fn test_from_file_invalid_json() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "not json").unwrap();
        let result = ToolConfig::from_file(file.path());
        assert!(matches!(result, Err(ConfigError::ParseError { .. })));
    }

    #[test]
    fn test_apply_overrides() {
        let env: HashMap<&str, &str> = [(ERROR_DIR_ENV, "/tmp/errors"), (IMPORT_DIR_ENV, "  ")]
            .into_iter()
            .collect();
        let mut config = ToolConfig::default();
        let original_import = config.import.folder.clone();

        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.error_report.source_dir, PathBuf::from("/tmp/errors"));
        assert_eq!(config.import.folder, original_import);
    }

    #[test]
    fn test_validate_rejects_non_ascii_delimiter() {
        let mut config = ToolConfig::default();
        config.import.csv_delimiter = '¦';
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { .. })
        ));
    }
}
