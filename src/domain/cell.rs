// ==========================================
// 导入工具 - 单元格值类型
// ==========================================
// 职责: 表格单元格值 / 去重键 / 文本渲染
// 红线: 不含样式信息（日期格式由写出层按列决定）
// ==========================================

use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 单元格值 (CellValue)
// ==========================================
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum CellValue {
    #[default]
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
    /// 日期时间（Excel 1900 日期系统序列号）
    DateTime(f64),
    /// 公式原文（不含前导 '='）
    Formula(String),
}

impl CellValue {
    /// 是否为空（空字符串也视为空）
    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.is_empty(),
            _ => false,
        }
    }

    /// 去重键
    ///
    /// f64 不可哈希，按位比较；-0.0 归一为 0.0
    pub fn key(&self) -> CellKey {
        match self {
            CellValue::Empty => CellKey::Empty,
            CellValue::Text(s) => CellKey::Text(s.clone()),
            CellValue::Number(n) => {
                let n = if *n == 0.0 { 0.0 } else { *n };
                CellKey::Number(n.to_bits())
            }
            CellValue::Bool(b) => CellKey::Bool(*b),
            CellValue::DateTime(serial) => CellKey::DateTime(serial.to_bits()),
            CellValue::Formula(f) => CellKey::Formula(f.clone()),
        }
    }

    /// 渲染为文本（CSV 字段 / 补零前的原始文本）
    ///
    /// 整数值的数字不带小数点；空单元格渲染为空串；
    /// 日期渲染为 `YYYY-MM-DD HH:MM:SS`（纯时间为 `HH:MM:SS`）；公式渲染为 `=` 原文
    pub fn render(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Text(s) => s.clone(),
            CellValue::Number(n) => render_number(*n),
            CellValue::Bool(true) => "True".to_string(),
            CellValue::Bool(false) => "False".to_string(),
            CellValue::DateTime(serial) => render_serial(*serial),
            CellValue::Formula(f) => format!("={}", f),
        }
    }
}

/// Excel 序列号转日期时间（精确到秒）
///
/// 1900 日期系统把 1900-02-29 计为第 60 天，60 之前的序列号需后移一天。
pub fn serial_to_datetime(serial: f64) -> Option<NaiveDateTime> {
    if !serial.is_finite() || serial < 0.0 {
        return None;
    }
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?.and_hms_opt(0, 0, 0)?;
    let adjusted = if serial < 60.0 { serial + 1.0 } else { serial };
    let seconds = (adjusted * 86_400.0).round() as i64;
    epoch.checked_add_signed(Duration::seconds(seconds))
}

fn render_serial(serial: f64) -> String {
    match serial_to_datetime(serial) {
        Some(dt) if serial < 1.0 => dt.format("%H:%M:%S").to_string(),
        Some(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => render_number(serial),
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render())
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

// ==========================================
// 去重键 (CellKey)
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CellKey {
    Empty,
    Text(String),
    Number(u64),
    Bool(bool),
    DateTime(u64),
    Formula(String),
}

fn render_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}
