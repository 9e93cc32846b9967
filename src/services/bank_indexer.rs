//! 题库索引服务 - 业务能力层
//!
//! 按标签分组题目索引，保留遇到顺序。分组只做累加，不校验重复标签。

use std::collections::HashMap;

use crate::models::question::Question;
use crate::models::slot::SlotRequirement;

/// 题库索引
#[derive(Debug, Default)]
pub struct BankIndex {
    /// 标签 → 题目下标列表（保留遇到顺序）
    by_tag: HashMap<String, Vec<usize>>,
    /// K 级别 → 题目下标列表（保留遇到顺序）
    by_level: HashMap<u8, Vec<usize>>,
}

impl BankIndex {
    /// 从题目列表构建索引
    pub fn build(questions: &[Question]) -> Self {
        let mut by_tag: HashMap<String, Vec<usize>> = HashMap::new();
        let mut by_level: HashMap<u8, Vec<usize>> = HashMap::new();
        for (idx, q) in questions.iter().enumerate() {
            by_tag.entry(q.tag.clone()).or_default().push(idx);
            if let Some(level) = q.level {
                by_level.entry(level).or_default().push(idx);
            }
        }
        Self { by_tag, by_level }
    }

    /// 满足要求的全部候选题目下标（保留题库遇到顺序）
    pub fn candidates(&self, req: &SlotRequirement) -> Vec<usize> {
        match req {
            SlotRequirement::Tag(tag) => self.by_tag.get(tag).cloned().unwrap_or_default(),
            SlotRequirement::Levels(levels) => {
                // 按级别列表合并后按题库顺序排序，保证遇到顺序不被打乱
                let mut merged: Vec<usize> = levels
                    .iter()
                    .filter_map(|l| self.by_level.get(l))
                    .flatten()
                    .copied()
                    .collect();
                merged.sort_unstable();
                merged
            }
        }
    }

    /// 索引中出现过的标签数量
    pub fn tag_count(&self) -> usize {
        self.by_tag.len()
    }
}
