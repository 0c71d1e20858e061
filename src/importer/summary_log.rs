// ==========================================
// 导入工具 - 剩余行数汇总文件
// ==========================================
// 格式:
//   Excel File Name, Remaining Rows
//   <文件名>, <剩余行数>
// ==========================================

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

pub const SUMMARY_HEADER: &str = "Excel File Name, Remaining Rows";

pub struct SummaryLog {
    path: PathBuf,
}

impl SummaryLog {
    /// 创建（或清空）汇总文件并写入表头
    pub fn create(path: impl Into<PathBuf>) -> io::Result<Self> {
        let path = path.into();
        let mut file = File::create(&path)?;
        writeln!(file, "{}", SUMMARY_HEADER)?;
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 追加一行
    pub fn append(&self, file_name: &str, remaining_rows: usize) -> io::Result<()> {
        let mut file = OpenOptions::new().append(true).open(&self.path)?;
        writeln!(file, "{}, {}", file_name, remaining_rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_create_and_append() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("Duplicates remaining.txt");
        std::fs::write(&path, "stale content\n").unwrap();

        let log = SummaryLog::create(&path).unwrap();
        log.append("a.xlsx", 12).unwrap();
        log.append("b.xlsm", 0).unwrap();

        let content = std::fs::read_to_string(log.path()).unwrap();
        assert_eq!(
            content,
            "Excel File Name, Remaining Rows\na.xlsx, 12\nb.xlsm, 0\n"
        );
    }
}
