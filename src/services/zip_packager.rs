//! 打包服务 - 业务能力层
//!
//! 只负责"把若干生成文档打进一个 zip 归档"能力

use std::io::{Cursor, Write};

use anyhow::Result;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

/// zip 打包服务（内存归档）
pub struct ZipPackager {
    writer: ZipWriter<Cursor<Vec<u8>>>,
}

impl ZipPackager {
    pub fn new() -> Self {
        Self {
            writer: ZipWriter::new(Cursor::new(Vec::new())),
        }
    }

    /// 向归档追加一个文件
    pub fn add_file(&mut self, name: &str, bytes: &[u8]) -> Result<()> {
        let options = FileOptions::default().compression_method(CompressionMethod::Deflated);
        self.writer.start_file(name, options)?;
        self.writer.write_all(bytes)?;
        Ok(())
    }

    /// 关闭归档，返回 zip 字节
    pub fn finish(mut self) -> Result<Vec<u8>> {
        let cursor = self.writer.finish()?;
        Ok(cursor.into_inner())
    }
}

impl Default for ZipPackager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    #[test]
    fn test_archive_round_trip() {
        let mut packager = ZipPackager::new();
        packager.add_file("Set_1_Student.docx", b"doc-one").unwrap();
        packager.add_file("Set_2_Student.docx", b"doc-two").unwrap();
        let bytes = packager.finish().unwrap();

        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        assert_eq!(archive.len(), 2);
        let mut content = String::new();
        archive
            .by_name("Set_2_Student.docx")
            .unwrap()
            .read_to_string(&mut content)
            .unwrap();
        assert_eq!(content, "doc-two");
    }
}
