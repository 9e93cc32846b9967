//! 题库提取服务 - 业务能力层
//!
//! 从题库表格网格中提取题目记录与 CO 描述。
//!
//! 识别约定：
//! - 任何包含 `[1-5][ABC]` 标签单元格的行视为题目行（首格含 "ans" 除外）
//! - 行内文本最长的单元格为题干
//! - 行文本中 `K[1-6]` 给出认知级别，`CO[1-5]` 给出课程目标编号
//! - 紧随其后且首格含 "ans" 的行提供答案文本
//! - `CO<d>: <描述>` 形式的行贡献 CO 描述（同号首见生效）

use anyhow::Result;
use regex::Regex;
use tracing::{debug, info};

use crate::infrastructure::DocTables;
use crate::models::question::{CoDescriptions, Question};

/// 题库提取服务
pub struct BankParser {
    tag_re: Regex,
    co_desc_re: Regex,
    bloom_re: Regex,
    co_num_re: Regex,
}

impl BankParser {
    pub fn new() -> Result<Self> {
        Ok(Self {
            tag_re: Regex::new(r"^[1-5][ABC]$")?,
            co_desc_re: Regex::new(r"(?i)CO(\d)[:\s]+(.*)")?,
            bloom_re: Regex::new(r"(?i)K\s*([1-6])")?,
            co_num_re: Regex::new(r"(?i)CO\s*([1-5])")?,
        })
    }

    /// 提取题目列表与 CO 描述
    pub fn extract(&self, tables: &DocTables) -> (Vec<Question>, CoDescriptions) {
        let mut questions = Vec::new();
        let mut co_map = CoDescriptions::new();

        for table in &tables.tables {
            for (row_idx, row) in table.iter().enumerate() {
                let cells_text: Vec<&str> = row.iter().map(|c| c.text.as_str()).collect();
                let text_blob = cells_text.join(" ");

                // 收集 CO 描述（同号首见生效）
                for caps in self.co_desc_re.captures_iter(&text_blob) {
                    if let Ok(num) = caps[1].parse::<u8>() {
                        co_map
                            .entry(num)
                            .or_insert_with(|| caps[2].trim().to_string());
                    }
                }

                // 寻找标签单元格
                let tag = cells_text
                    .iter()
                    .map(|t| t.trim().to_uppercase())
                    .find(|t| self.tag_re.is_match(t));
                let Some(tag) = tag else { continue };

                // 答案行本身不是题目行
                let first_cell = cells_text.first().map(|t| t.to_lowercase()).unwrap_or_default();
                if first_cell.contains("ans") {
                    continue;
                }

                // 文本最长的单元格为题干
                let Some(main_idx) = longest_cell(&cells_text) else {
                    continue;
                };

                let level = self
                    .bloom_re
                    .captures(&text_blob)
                    .and_then(|c| c[1].parse::<u8>().ok());
                let course_outcome = self
                    .co_num_re
                    .captures(&text_blob)
                    .and_then(|c| c[1].parse::<u8>().ok());

                // 下一行若以 "ans" 开头则为答案行
                let answer = table.get(row_idx + 1).and_then(|next_row| {
                    let first = next_row.first()?.text.to_lowercase();
                    if !first.contains("ans") {
                        return None;
                    }
                    let texts: Vec<&str> = next_row.iter().map(|c| c.text.as_str()).collect();
                    let idx = longest_cell(&texts)?;
                    Some(next_row[idx].text.clone())
                });

                let main_cell = &row[main_idx];
                let mut chars = tag.chars();
                let unit = chars.next().and_then(|c| c.to_digit(10)).unwrap_or(0) as u8;
                let part = chars.next().unwrap_or('A');

                questions.push(Question {
                    id: questions.len(),
                    tag: tag.clone(),
                    unit,
                    part,
                    course_outcome,
                    level,
                    text: main_cell.text.clone(),
                    content: main_cell.content.clone(),
                    images: main_cell.images.clone(),
                    answer,
                });

                debug!(
                    "题目 {}: 标签 {} | K级别 {:?} | 图片 {} 张",
                    questions.len(),
                    tag,
                    level,
                    main_cell.images.len()
                );
            }
        }

        info!(
            "📚 题库提取完成: {} 道题目, {} 条 CO 描述",
            questions.len(),
            co_map.len()
        );
        (questions, co_map)
    }
}

/// 文本最长的单元格下标
fn longest_cell(cells: &[&str]) -> Option<usize> {
    cells
        .iter()
        .enumerate()
        .max_by_key(|(_, t)| t.chars().count())
        .map(|(idx, _)| idx)
}
