// ==========================================
// 导入工具 - 错误报表行分类
// ==========================================
// 规则:
// - 原始行以 "File:" 开头 -> 排除
// - 原始行（小写）包含 "client program not found" -> 排除
// - 其余行去首尾空白；以 "Phone" 开头 -> Phone，否则 -> Other
// ==========================================

use crate::domain::{ClassifiedLines, LineBucket};

pub const FILE_HEADER_PREFIX: &str = "File:";
pub const CLIENT_NOT_FOUND_MARKER: &str = "client program not found";
pub const PHONE_PREFIX: &str = "Phone";

/// 单行分类
pub fn classify_line(raw: &str) -> LineBucket {
    if raw.starts_with(FILE_HEADER_PREFIX) || raw.to_lowercase().contains(CLIENT_NOT_FOUND_MARKER) {
        return LineBucket::Excluded;
    }

    let line = raw.trim();
    if line.starts_with(PHONE_PREFIX) {
        LineBucket::Phone(line.to_string())
    } else {
        LineBucket::Other(line.to_string())
    }
}

/// 整个文本分类（保持行序）
pub fn classify_text(text: &str) -> ClassifiedLines {
    let mut classified = ClassifiedLines::default();
    for raw in split_lines(text) {
        classified.push(classify_line(raw));
    }
    classified
}

/// 按 "\r\n" / "\n" / "\r" 分行；末尾换行不产生空行
pub fn split_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut rest = text;
    while !rest.is_empty() {
        match rest.find(&['\r', '\n'][..]) {
            Some(pos) => {
                lines.push(&rest[..pos]);
                let skip = if rest[pos..].starts_with("\r\n") { 2 } else { 1 };
                rest = &rest[pos + skip..];
            }
            None => {
                lines.push(rest);
                break;
            }
        }
    }
    lines
}
