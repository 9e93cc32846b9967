//! docx 表格网格提取
//!
//! 将 docx 字节流解析为内存中的表格网格：每个单元格保留
//! 纯文本、内嵌图片字节和剥离了 Drawing 的格式化内容。

use docx_rs::{
    DocumentChild, DrawingData, ParagraphChild, RunChild, TableCellContent, TableChild,
    TableRowChild,
};
use thiserror::Error;

/// 文档层错误
#[derive(Debug, Error)]
pub enum DocxError {
    /// docx 字节流解析失败
    #[error("docx 解析失败: {0}")]
    Parse(String),
    /// docx 打包输出失败
    #[error("docx 打包失败: {0}")]
    Pack(String),
}

/// 解析后的单元格
#[derive(Debug, Clone, Default)]
pub struct ParsedCell {
    /// 单元格纯文本（段落以空格连接）
    pub text: String,
    /// 单元格内嵌图片的原始字节
    pub images: Vec<Vec<u8>>,
    /// 格式化内容（Drawing 已剥离，图片另行回插）
    pub content: Vec<TableCellContent>,
}

impl ParsedCell {
    /// 仅携带文本的单元格（测试使用）
    pub fn text_only(text: &str) -> Self {
        Self {
            text: text.to_string(),
            ..Default::default()
        }
    }
}

/// 文档表格网格：tables[表格][行][单元格]
#[derive(Debug, Clone, Default)]
pub struct DocTables {
    pub tables: Vec<Vec<Vec<ParsedCell>>>,
}

impl DocTables {
    /// 从 docx 字节流解析所有表格
    pub fn parse(bytes: &[u8]) -> Result<Self, DocxError> {
        let docx = docx_rs::read_docx(bytes).map_err(|e| DocxError::Parse(e.to_string()))?;

        let mut tables = Vec::new();
        for child in &docx.document.children {
            if let DocumentChild::Table(table) = child {
                let mut rows = Vec::new();
                for tc in &table.rows {
                    let TableChild::TableRow(row) = tc;
                    let mut cells = Vec::new();
                    for rc in &row.cells {
                        let TableRowChild::TableCell(cell) = rc;
                        cells.push(parse_cell(&cell.children));
                    }
                    rows.push(cells);
                }
                tables.push(rows);
            }
        }

        Ok(Self { tables })
    }

    /// 单元测试辅助：从文本网格构造（单表格）
    pub fn from_text_grid(rows: Vec<Vec<&str>>) -> Self {
        let table = rows
            .into_iter()
            .map(|row| row.into_iter().map(ParsedCell::text_only).collect())
            .collect();
        Self {
            tables: vec![table],
        }
    }

    /// 按坐标取单元格
    pub fn cell(&self, table: usize, row: usize, cell: usize) -> Option<&ParsedCell> {
        self.tables.get(table)?.get(row)?.get(cell)
    }
}

/// 解析单个单元格：文本 + 图片 + 剥离 Drawing 的内容克隆
fn parse_cell(children: &[TableCellContent]) -> ParsedCell {
    let mut text = String::new();
    let mut images = Vec::new();

    for cc in children {
        if let TableCellContent::Paragraph(para) = cc {
            let line = paragraph_text_with_images(para, &mut images);
            if !line.trim().is_empty() {
                if !text.is_empty() {
                    text.push(' ');
                }
                text.push_str(line.trim());
            }
        }
    }

    let mut content: Vec<TableCellContent> = children.to_vec();
    strip_drawings(&mut content);

    ParsedCell {
        text,
        images,
        content,
    }
}

/// 从段落提取文本，同时收集图片字节
fn paragraph_text_with_images(para: &docx_rs::Paragraph, images: &mut Vec<Vec<u8>>) -> String {
    let mut line = String::new();
    for child in &para.children {
        match child {
            ParagraphChild::Run(run) => {
                run_text_with_images(run, &mut line, images);
            }
            ParagraphChild::Hyperlink(hyperlink) => {
                for run in &hyperlink.children {
                    if let ParagraphChild::Run(r) = run {
                        run_text_with_images(r, &mut line, images);
                    }
                }
            }
            ParagraphChild::Insert(ins) => {
                for ic in &ins.children {
                    if let docx_rs::InsertChild::Run(r) = ic {
                        run_text_with_images(r, &mut line, images);
                    }
                }
            }
            _ => {}
        }
    }
    line
}

/// 从 Run 提取文本，遇到图片收集其字节
fn run_text_with_images(run: &docx_rs::Run, out: &mut String, images: &mut Vec<Vec<u8>>) {
    for rc in &run.children {
        match rc {
            RunChild::Text(t) => {
                out.push_str(&t.text);
            }
            RunChild::Tab(_) => {
                out.push('\t');
            }
            RunChild::Break(_) => {
                out.push('\n');
            }
            RunChild::Drawing(drawing) => {
                if let Some(DrawingData::Pic(pic)) = &drawing.data {
                    if !pic.image.is_empty() {
                        images.push(pic.image.clone());
                    }
                }
            }
            _ => {}
        }
    }
}

/// 从格式化内容中剥离所有 Drawing（图片在装配阶段按固定宽度回插）
fn strip_drawings(content: &mut [TableCellContent]) {
    for cc in content.iter_mut() {
        if let TableCellContent::Paragraph(para) = cc {
            for child in para.children.iter_mut() {
                if let ParagraphChild::Run(run) = child {
                    run.children
                        .retain(|rc| !matches!(rc, RunChild::Drawing(_)));
                }
            }
        }
    }
}

/// 从 docx 表格单元格提取纯文本（装配阶段识别 CO 描述行使用）
pub fn cell_plain_text(cell: &docx_rs::TableCell) -> String {
    let mut images = Vec::new();
    let mut text = String::new();
    for cc in &cell.children {
        if let TableCellContent::Paragraph(para) = cc {
            let line = paragraph_text_with_images(para, &mut images);
            if !line.trim().is_empty() {
                if !text.is_empty() {
                    text.push(' ');
                }
                text.push_str(line.trim());
            }
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use docx_rs::{Docx, Paragraph, Run, Table, TableCell, TableRow};

    fn pack(docx: Docx) -> Vec<u8> {
        let mut buf = std::io::Cursor::new(Vec::new());
        docx.build().pack(&mut buf).unwrap();
        buf.into_inner()
    }

    #[test]
    fn test_parse_simple_table() {
        let table = Table::new(vec![TableRow::new(vec![
            TableCell::new()
                .add_paragraph(Paragraph::new().add_run(Run::new().add_text("1."))),
            TableCell::new()
                .add_paragraph(Paragraph::new().add_run(Run::new().add_text("What is X?"))),
        ])]);
        let bytes = pack(Docx::new().add_table(table));

        let tables = DocTables::parse(&bytes).unwrap();
        assert_eq!(tables.tables.len(), 1);
        assert_eq!(tables.tables[0].len(), 1);
        assert_eq!(tables.tables[0][0][0].text, "1.");
        assert_eq!(tables.tables[0][0][1].text, "What is X?");
    }

    #[test]
    fn test_cell_out_of_range() {
        let tables = DocTables::from_text_grid(vec![vec!["a"]]);
        assert!(tables.cell(0, 0, 0).is_some());
        assert!(tables.cell(0, 0, 1).is_none());
        assert!(tables.cell(1, 0, 0).is_none());
    }
}
