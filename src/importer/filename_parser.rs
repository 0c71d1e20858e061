// ==========================================
// 导入工具 - 文件名常量解析
// ==========================================
// 职责: 从文件名提取数字片段，选取第 2 / 4 / 5 个作为 H / I / J 列常量
// 例: report_20241021_331_7_273_128.xlsx -> (331, 273, 128)
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// 至少需要的数字片段个数
pub const MIN_NUMBER_TOKENS: usize = 5;

static NUMBER_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d+").expect("number token pattern is valid"));

// ==========================================
// ConstantTriple - 文件名常量三元组
// ==========================================
// 保持文本形式（保留前导零）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstantTriple {
    pub second: String, // H 列
    pub fourth: String, // I 列
    pub fifth: String,  // J 列
}

impl ConstantTriple {
    /// 按 H / I / J 顺序
    pub fn values(&self) -> [&str; 3] {
        [&self.second, &self.fourth, &self.fifth]
    }
}

/// 文件名中全部数字片段（按出现顺序）
pub fn numeric_tokens(filename: &str) -> Vec<&str> {
    NUMBER_TOKEN.find_iter(filename).map(|m| m.as_str()).collect()
}

/// 提取常量三元组
///
/// # 返回
/// - Ok(ConstantTriple): 第 2 / 4 / 5 个数字片段
/// - Err(FilenameTokens): 数字片段不足 5 个
pub fn extract_constant_triple(filename: &str) -> ImportResult<ConstantTriple> {
    let tokens = numeric_tokens(filename);
    if tokens.len() < MIN_NUMBER_TOKENS {
        return Err(ImportError::FilenameTokens {
            filename: filename.to_string(),
            found: tokens.len(),
        });
    }

    Ok(ConstantTriple {
        second: tokens[1].to_string(),
        fourth: tokens[3].to_string(),
        fifth: tokens[4].to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_triple_positional() {
        let triple = extract_constant_triple("report_20241021_331_7_273_128.xlsx").unwrap();
        assert_eq!(triple.values(), ["331", "273", "128"]);
    }

    #[test]
    fn test_extract_triple_keeps_leading_zeros() {
        let triple = extract_constant_triple("1-007-2-0042-09 extra 5.xlsm").unwrap();
        assert_eq!(triple.values(), ["007", "0042", "09"]);
    }

    #[test]
    fn test_extract_triple_too_few_numbers() {
        // x 不是数字，只有 4 个片段
        let result = extract_constant_triple("report_20241021_331_x_273_128.xlsx");
        match result {
            Err(ImportError::FilenameTokens { found, .. }) => assert_eq!(found, 4),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_numeric_tokens() {
        assert_eq!(numeric_tokens("a12b3c"), vec!["12", "3"]);
        assert!(numeric_tokens("none.xlsx").is_empty());
    }
}
