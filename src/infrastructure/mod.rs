//! 基础设施层（Infrastructure Layer）
//!
//! 持有外部文档库（docx-rs），向上层只暴露表格网格能力。
//! 业务层不直接接触 docx 的对象模型，单元测试可以手工构造
//! `DocTables` 而无需真实文档。

pub mod docx_tables;

pub use docx_tables::{cell_plain_text, DocTables, DocxError, ParsedCell};
