//! 警告写入服务 - 业务能力层
//!
//! 只负责"写 warn.txt"能力，不关心流程

use std::fs::OpenOptions;
use std::io::Write;

use anyhow::Result;
use tracing::debug;

/// 警告写入服务
///
/// 职责：
/// - 将强制重复与标签缺失记录写入 warn.txt
/// - 只处理单条警告
/// - 不关心流程顺序
pub struct WarnWriter {
    warn_file_path: String,
}

impl WarnWriter {
    /// 创建新的警告写入服务
    pub fn new() -> Self {
        Self {
            warn_file_path: "warn.txt".to_string(),
        }
    }

    /// 使用自定义文件路径创建
    pub fn with_path(path: impl Into<String>) -> Self {
        Self {
            warn_file_path: path.into(),
        }
    }

    /// 写入警告信息
    ///
    /// # 参数
    /// - `set_index`: 套卷编号
    /// - `slot_number`: 槽位编号
    /// - `reason`: 警告原因
    pub fn write(&self, set_index: usize, slot_number: u32, reason: &str) -> Result<()> {
        debug!(
            "写入警告: 套卷 {} | 槽位 {} | 原因: {}",
            set_index, slot_number, reason
        );

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.warn_file_path)?;

        let warn_msg = format!("套卷 {} | 槽位 {} | {}\n", set_index, slot_number, reason);
        file.write_all(warn_msg.as_bytes())?;

        Ok(())
    }
}

impl Default for WarnWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_appends_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("warn.txt");
        let writer = WarnWriter::with_path(path.to_string_lossy().to_string());

        writer.write(1, 5, "标签 1A 去重池耗尽，重复抽取").unwrap();
        writer.write(2, 21, "题库缺少标签 3C").unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("套卷 1"));
        assert!(lines[1].contains("槽位 21"));
    }
}
