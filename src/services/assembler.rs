//! 文档装配服务 - 业务能力层
//!
//! 每套卷、每个受众都从原始模板字节重新解析一份新文档再填充，
//! 套卷之间不共享可变文档状态。
//!
//! 装配约定（与模板行结构对应）：
//! - 槽位所在行的第 1 格放题干（保留来源格式，图片按固定宽度回插）
//! - 第 2 格放 `CO<n>`，第 3 格（存在时）放 `K<n>`
//! - 标签缺失的槽位放固定占位文本，绝不留空白格
//! - 教师卷在题干后追加加粗的 Answer 段落

use std::collections::BTreeMap;
use std::io::Cursor;

use docx_rs::{
    DocumentChild, Paragraph, Pic, Run, TableCellContent, TableChild, TableRowChild,
};
use image::GenericImageView;
use tracing::warn;

use crate::infrastructure::{cell_plain_text, DocxError};
use crate::models::exam::Audience;
use crate::models::question::{CoDescriptions, Question};
use crate::models::slot::CellCoord;
use crate::services::selector::SlotOutcome;

/// 标签缺失槽位的固定占位文本
pub const TAG_NOT_FOUND_TEXT: &str = "Error: Tag missing in Bank";

/// 图片回插的固定显示宽度（2 英寸，EMU 单位）
const IMG_WIDTH_EMU: u32 = 1_828_800;

/// 文档装配服务
#[derive(Debug, Default)]
pub struct DocAssembler;

impl DocAssembler {
    pub fn new() -> Self {
        Self
    }

    /// 将一套选题结果装配为输出文档字节
    pub fn assemble(
        &self,
        template_bytes: &[u8],
        picks: &BTreeMap<CellCoord, SlotOutcome>,
        questions: &[Question],
        co_desc: &CoDescriptions,
        audience: Audience,
    ) -> Result<Vec<u8>, DocxError> {
        let mut docx =
            docx_rs::read_docx(template_bytes).map_err(|e| DocxError::Parse(e.to_string()))?;

        // 先替换 CO 描述行，槽位行不受影响
        substitute_co_descriptions(&mut docx, co_desc);

        for (&(ti, ri, _ci), outcome) in picks {
            let Some(row) = table_row_mut(&mut docx, ti, ri) else {
                warn!("⚠️ 槽位坐标越界: 表格 {} 行 {}", ti, ri);
                continue;
            };
            fill_slot_row(row, outcome, questions, audience);
        }

        let mut buf = Cursor::new(Vec::new());
        docx.build()
            .pack(&mut buf)
            .map_err(|e| DocxError::Pack(e.to_string()))?;
        Ok(buf.into_inner())
    }
}

/// 替换 CO 描述行：行文本以 CO<i> 开头且至少 3 格的，第 3 格放描述
fn substitute_co_descriptions(docx: &mut docx_rs::Docx, co_desc: &CoDescriptions) {
    for child in docx.document.children.iter_mut() {
        if let DocumentChild::Table(table) = child {
            for tc in table.rows.iter_mut() {
                let TableChild::TableRow(row) = tc;
                let row_text: String = row
                    .cells
                    .iter()
                    .map(|rc| {
                        let TableRowChild::TableCell(cell) = rc;
                        cell_plain_text(cell)
                    })
                    .collect();
                let trimmed = row_text.trim().to_string();
                for i in 1..=5u8 {
                    if trimmed.starts_with(&format!("CO{}", i)) && row.cells.len() >= 3 {
                        let desc = co_desc
                            .get(&i)
                            .cloned()
                            .unwrap_or_else(|| format!("Course Outcome {}", i));
                        if let Some(cell) = row_cell_mut(row, 2) {
                            set_cell_text(cell, &desc);
                        }
                    }
                }
            }
        }
    }
}

/// 填充槽位所在行（题干格 / CO 格 / K 格）
fn fill_slot_row(
    row: &mut docx_rs::TableRow,
    outcome: &SlotOutcome,
    questions: &[Question],
    audience: Audience,
) {
    let question = outcome.question().and_then(|idx| questions.get(idx));

    match question {
        None => {
            // 标签缺失：放固定占位文本，绝不留空白格
            if let Some(cell) = row_cell_mut(row, 1) {
                set_cell_text(cell, TAG_NOT_FOUND_TEXT);
            }
        }
        Some(q) => {
            if let Some(cell) = row_cell_mut(row, 1) {
                fill_question_cell(cell, q, audience);
            }
            if let Some(cell) = row_cell_mut(row, 2) {
                set_cell_text(cell, &format!("CO{}", q.co_number()));
            }
            if let Some(cell) = row_cell_mut(row, 3) {
                set_cell_text(cell, &q.level_text());
            }
        }
    }
}

/// 填充题干格：来源格式内容 + 图片回插 + 教师卷答案段落
fn fill_question_cell(cell: &mut docx_rs::TableCell, q: &Question, audience: Audience) {
    let mut children = q.content.clone();
    if children.is_empty() {
        children.push(text_paragraph(&q.text));
    }

    for blob in &q.images {
        if let Some(para) = image_paragraph(blob) {
            children.push(para);
        } else {
            warn!("⚠️ 图片无法解码，跳过回插 (题目 {})", q.id);
        }
    }

    if audience == Audience::Faculty {
        if let Some(answer) = &q.answer {
            children.push(answer_paragraph(answer));
        }
    }

    cell.children = children;
}

/// 将单元格内容整体替换为一段纯文本
fn set_cell_text(cell: &mut docx_rs::TableCell, text: &str) {
    cell.children = vec![text_paragraph(text)];
}

fn text_paragraph(text: &str) -> TableCellContent {
    TableCellContent::Paragraph(Box::new(
        Paragraph::new().add_run(Run::new().add_text(text)),
    ))
}

/// 答案段落：加粗前缀 + 答案文本
fn answer_paragraph(answer: &str) -> TableCellContent {
    TableCellContent::Paragraph(Box::new(
        Paragraph::new()
            .add_run(Run::new().add_text("Answer: ").bold())
            .add_run(Run::new().add_text(answer)),
    ))
}

/// 图片段落：固定 2 英寸显示宽度，高度按原图比例缩放
fn image_paragraph(blob: &[u8]) -> Option<TableCellContent> {
    let (w, h) = image::load_from_memory(blob).ok()?.dimensions();
    if w == 0 {
        return None;
    }
    let height_emu = ((h as u64 * IMG_WIDTH_EMU as u64) / w as u64) as u32;
    let pic = Pic::new(blob).size(IMG_WIDTH_EMU, height_emu);
    Some(TableCellContent::Paragraph(Box::new(
        Paragraph::new().add_run(Run::new().add_image(pic)),
    )))
}

/// 按（表格, 行）坐标取可变行引用
fn table_row_mut(
    docx: &mut docx_rs::Docx,
    table_idx: usize,
    row_idx: usize,
) -> Option<&mut docx_rs::TableRow> {
    let mut t = 0;
    for child in docx.document.children.iter_mut() {
        if let DocumentChild::Table(table) = child {
            if t == table_idx {
                let mut r = 0;
                for tc in table.rows.iter_mut() {
                    let TableChild::TableRow(row) = tc;
                    if r == row_idx {
                        return Some(row);
                    }
                    r += 1;
                }
                return None;
            }
            t += 1;
        }
    }
    None
}

fn row_cell_mut(row: &mut docx_rs::TableRow, idx: usize) -> Option<&mut docx_rs::TableCell> {
    row.cells.get_mut(idx).map(|rc| {
        let TableRowChild::TableCell(cell) = rc;
        cell
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::DocTables;
    use docx_rs::{Docx, Table, TableCell, TableRow};

    fn template_bytes() -> Vec<u8> {
        let table = Table::new(vec![
            TableRow::new(vec![
                cell("CO1"),
                cell(""),
                cell("placeholder"),
            ]),
            TableRow::new(vec![cell("1."), cell(""), cell(""), cell("")]),
            TableRow::new(vec![cell("2."), cell(""), cell(""), cell("")]),
        ]);
        let mut buf = Cursor::new(Vec::new());
        Docx::new().add_table(table).build().pack(&mut buf).unwrap();
        buf.into_inner()
    }

    fn cell(text: &str) -> TableCell {
        TableCell::new().add_paragraph(Paragraph::new().add_run(Run::new().add_text(text)))
    }

    #[test]
    fn test_assemble_fills_question_co_and_level() {
        let mut q = Question::plain(0, "1A", Some(3), "Define a relation schema.");
        q.answer = Some("A set of attribute names.".to_string());
        let questions = vec![q];

        let mut picks = BTreeMap::new();
        picks.insert((0usize, 1usize, 0usize), SlotOutcome::Assigned(0));
        picks.insert((0usize, 2usize, 0usize), SlotOutcome::NotFound);

        let mut co_desc = CoDescriptions::new();
        co_desc.insert(1, "Understand relational design".to_string());

        let assembler = DocAssembler::new();
        let bytes = assembler
            .assemble(&template_bytes(), &picks, &questions, &co_desc, Audience::Student)
            .unwrap();

        let tables = DocTables::parse(&bytes).unwrap();
        // CO 描述行
        assert_eq!(
            tables.cell(0, 0, 2).unwrap().text,
            "Understand relational design"
        );
        // 槽位行：题干 / CO / K
        assert_eq!(
            tables.cell(0, 1, 1).unwrap().text,
            "Define a relation schema."
        );
        assert_eq!(tables.cell(0, 1, 2).unwrap().text, "CO1");
        assert_eq!(tables.cell(0, 1, 3).unwrap().text, "K3");
        // 标签缺失槽位：固定占位文本
        assert_eq!(tables.cell(0, 2, 1).unwrap().text, TAG_NOT_FOUND_TEXT);
        // 学生卷不含答案
        assert!(!tables.cell(0, 1, 1).unwrap().text.contains("Answer:"));
    }

    #[test]
    fn test_faculty_variant_appends_answer() {
        let mut q = Question::plain(0, "2B", None, "Explain joins.");
        q.answer = Some("Inner and outer joins combine rows.".to_string());
        let questions = vec![q];

        let mut picks = BTreeMap::new();
        picks.insert((0usize, 1usize, 0usize), SlotOutcome::Assigned(0));

        let assembler = DocAssembler::new();
        let bytes = assembler
            .assemble(
                &template_bytes(),
                &picks,
                &questions,
                &CoDescriptions::new(),
                Audience::Faculty,
            )
            .unwrap();

        let tables = DocTables::parse(&bytes).unwrap();
        let text = &tables.cell(0, 1, 1).unwrap().text;
        assert!(text.contains("Explain joins."));
        assert!(text.contains("Answer:"));
        assert!(text.contains("Inner and outer joins"));
    }
}
