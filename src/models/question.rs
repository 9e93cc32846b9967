use std::collections::HashMap;

use docx_rs::TableCellContent;

/// CO 编号 → 课程目标描述文本
pub type CoDescriptions = HashMap<u8, String>;

/// 题目记录
///
/// 题库解析时一次性创建，之后只读
#[derive(Debug, Clone)]
pub struct Question {
    /// 顺序编号（解析遇到的次序）
    pub id: usize,
    /// 标签，例如 "3B"（单元 + 子部分）
    pub tag: String,
    /// 单元编号（标签首位数字）
    pub unit: u8,
    /// 子部分字母（A / B / C）
    pub part: char,
    /// 课程目标编号（CO1-CO5）
    pub course_outcome: Option<u8>,
    /// 认知级别（K1-K6）
    pub level: Option<u8>,
    /// 纯文本题干（用于日志与测试）
    pub text: String,
    /// 来源单元格的格式化内容（已剥离图片 Drawing）
    pub content: Vec<TableCellContent>,
    /// 题干单元格内嵌图片的原始字节
    pub images: Vec<Vec<u8>>,
    /// 答案文本（教师卷使用）
    pub answer: Option<String>,
}

impl Question {
    /// 构造纯文本题目（测试与索引逻辑使用，不携带格式化内容）
    pub fn plain(id: usize, tag: &str, level: Option<u8>, text: &str) -> Self {
        let mut chars = tag.chars();
        let unit = chars
            .next()
            .and_then(|c| c.to_digit(10))
            .unwrap_or(0) as u8;
        let part = chars.next().unwrap_or('A');
        Self {
            id,
            tag: tag.to_string(),
            unit,
            part,
            course_outcome: None,
            level,
            text: text.to_string(),
            content: Vec::new(),
            images: Vec::new(),
            answer: None,
        }
    }

    /// 输出单元格使用的 CO 编号：优先使用显式 CO，缺省回退到标签单元号
    pub fn co_number(&self) -> u8 {
        self.course_outcome.unwrap_or(self.unit)
    }

    /// 输出单元格使用的 K 级别文本，例如 "K3"；缺省为空串
    pub fn level_text(&self) -> String {
        self.level.map(|l| format!("K{}", l)).unwrap_or_default()
    }

    /// 截断题干用于日志显示（最多 80 个字符）
    pub fn text_preview(&self) -> String {
        if self.text.chars().count() > 80 {
            self.text.chars().take(80).collect::<String>() + "..."
        } else {
            self.text.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_question_tag_split() {
        let q = Question::plain(0, "3B", Some(4), "What is a B-tree?");
        assert_eq!(q.unit, 3);
        assert_eq!(q.part, 'B');
        assert_eq!(q.co_number(), 3);
        assert_eq!(q.level_text(), "K4");
    }

    #[test]
    fn test_explicit_co_wins() {
        let mut q = Question::plain(0, "2A", None, "x");
        q.course_outcome = Some(5);
        assert_eq!(q.co_number(), 5);
        assert_eq!(q.level_text(), "");
    }
}
