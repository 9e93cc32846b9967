//! 模板扫描服务 - 业务能力层
//!
//! 从模板表格网格中识别编号槽位与 OR 配对。
//!
//! 识别约定：
//! - 去除空白后以「数字 + `.` 或 `)`」开头的单元格是槽位，编号取数字前缀
//! - 恰好为 "OR"（可带括号 / 空白，大小写不敏感）的单元格是配对边界，
//!   将最近的前一个与后一个编号槽位连成 OR 配对

use anyhow::Result;
use regex::Regex;
use tracing::info;

use crate::infrastructure::DocTables;
use crate::models::slot::{OrPair, Slot};

/// 文档顺序扫描中的标记
enum Marker {
    /// 编号槽位（slots 列表下标）
    Slot(usize),
    /// OR 配对边界
    Or,
}

/// 模板扫描服务
pub struct TemplateParser {
    num_prefix_re: Regex,
    or_re: Regex,
}

impl TemplateParser {
    pub fn new() -> Result<Self> {
        Ok(Self {
            num_prefix_re: Regex::new(r"^\s*(\d+)\s*[.)]")?,
            or_re: Regex::new(r"(?i)^\(?\s*or\s*\)?$")?,
        })
    }

    /// 按文档顺序扫描槽位与 OR 配对
    pub fn extract(&self, tables: &DocTables) -> (Vec<Slot>, Vec<OrPair>) {
        let mut slots: Vec<Slot> = Vec::new();
        let mut markers: Vec<Marker> = Vec::new();

        for (ti, table) in tables.tables.iter().enumerate() {
            for (ri, row) in table.iter().enumerate() {
                for (ci, cell) in row.iter().enumerate() {
                    let text = cell.text.trim();
                    if let Some(caps) = self.num_prefix_re.captures(text) {
                        if let Ok(number) = caps[1].parse::<u32>() {
                            slots.push(Slot {
                                table: ti,
                                row: ri,
                                cell: ci,
                                number,
                                is_or_alternative: false,
                            });
                            markers.push(Marker::Slot(slots.len() - 1));
                        }
                    } else if self.or_re.is_match(text) {
                        markers.push(Marker::Or);
                    }
                }
            }
        }

        // OR 边界连接最近的前后两个槽位
        let mut pairs: Vec<OrPair> = Vec::new();
        for (pos, marker) in markers.iter().enumerate() {
            if !matches!(marker, Marker::Or) {
                continue;
            }
            let prev = markers[..pos].iter().rev().find_map(|m| match m {
                Marker::Slot(idx) => Some(*idx),
                Marker::Or => None,
            });
            let next = markers[pos + 1..].iter().find_map(|m| match m {
                Marker::Slot(idx) => Some(*idx),
                Marker::Or => None,
            });
            if let (Some(first), Some(second)) = (prev, next) {
                slots[first].is_or_alternative = true;
                slots[second].is_or_alternative = true;
                pairs.push(OrPair { first, second });
            }
        }

        info!(
            "📋 模板扫描完成: {} 个槽位, {} 组 OR 配对",
            slots.len(),
            pairs.len()
        );
        (slots, pairs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbered_slots_found() {
        let tables = DocTables::from_text_grid(vec![
            vec!["1.", "", "", ""],
            vec!["2)", "", "", ""],
            vec!["header", "", "", ""],
            vec![" 10 . ", "", "", ""],
        ]);
        let parser = TemplateParser::new().unwrap();
        let (slots, pairs) = parser.extract(&tables);
        assert_eq!(slots.len(), 3);
        assert_eq!(slots[0].number, 1);
        assert_eq!(slots[1].number, 2);
        assert_eq!(slots[2].number, 10);
        assert_eq!(slots[2].coord(), (0, 3, 0));
        assert!(pairs.is_empty());
    }

    #[test]
    fn test_or_pairs_link_nearest_slots() {
        let tables = DocTables::from_text_grid(vec![
            vec!["1.", ""],
            vec!["2.", ""],
            vec!["OR", ""],
            vec!["3.", ""],
            vec!["4.", ""],
        ]);
        let parser = TemplateParser::new().unwrap();
        let (slots, pairs) = parser.extract(&tables);
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0], OrPair { first: 1, second: 2 });
        assert!(slots[1].is_or_alternative);
        assert!(slots[2].is_or_alternative);
        assert!(!slots[0].is_or_alternative);
        assert!(!slots[3].is_or_alternative);
    }

    #[test]
    fn test_or_marker_variants() {
        let tables = DocTables::from_text_grid(vec![
            vec!["5."],
            vec!["( or )"],
            vec!["6."],
        ]);
        let parser = TemplateParser::new().unwrap();
        let (slots, pairs) = parser.extract(&tables);
        assert_eq!(pairs.len(), 1);
        assert!(slots[0].is_or_alternative && slots[1].is_or_alternative);
    }

    #[test]
    fn test_or_without_following_slot_is_ignored() {
        let tables = DocTables::from_text_grid(vec![vec!["1."], vec!["OR"]]);
        let parser = TemplateParser::new().unwrap();
        let (slots, pairs) = parser.extract(&tables);
        assert!(pairs.is_empty());
        assert!(!slots[0].is_or_alternative);
    }
}
