//! 选题服务 - 业务能力层
//!
//! 只负责"为一个要求选一道题"：按已用集过滤候选池、均匀随机抽取、
//! 池耗尽时回退到允许重复。回退是明确的返回类别而非隐式行为。

use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::models::slot::SlotRequirement;
use crate::services::bank_indexer::BankIndex;

/// 单个槽位的选题结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotOutcome {
    /// 正常分配（题目未被用过）
    Assigned(usize),
    /// 去重池耗尽，从完整候选池重复抽取（刻意的兜底策略）
    Repeated(usize),
    /// 题库中完全没有满足要求的题目
    NotFound,
}

impl SlotOutcome {
    /// 选中的题目下标（NotFound 为 None）
    pub fn question(&self) -> Option<usize> {
        match self {
            SlotOutcome::Assigned(idx) | SlotOutcome::Repeated(idx) => Some(*idx),
            SlotOutcome::NotFound => None,
        }
    }
}

/// 选题服务
#[derive(Debug, Default)]
pub struct Selector;

impl Selector {
    pub fn new() -> Self {
        Self
    }

    /// 为一个槽位要求选题
    ///
    /// # 参数
    /// - `requirement`: 槽位要求（None 表示映射表查不到该槽位）
    /// - `index`: 题库索引
    /// - `used`: 已用题目集合（显式传入，随一次生成传递）
    /// - `rng`: 注入的随机源（测试用固定种子）
    pub fn select<R: Rng>(
        &self,
        requirement: Option<&SlotRequirement>,
        index: &BankIndex,
        used: &mut HashSet<usize>,
        rng: &mut R,
    ) -> SlotOutcome {
        let Some(req) = requirement else {
            return SlotOutcome::NotFound;
        };

        let candidates = index.candidates(req);
        if candidates.is_empty() {
            return SlotOutcome::NotFound;
        }

        // 去重池：候选中剔除已用题目
        let pool: Vec<usize> = candidates
            .iter()
            .copied()
            .filter(|idx| !used.contains(idx))
            .collect();

        if let Some(&idx) = pool.choose(rng) {
            used.insert(idx);
            return SlotOutcome::Assigned(idx);
        }

        // 去重池耗尽但候选存在：允许重复，避免整次生成被阻塞
        match candidates.choose(rng) {
            Some(&idx) => {
                used.insert(idx);
                SlotOutcome::Repeated(idx)
            }
            None => SlotOutcome::NotFound,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::question::Question;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn tag_req(tag: &str) -> SlotRequirement {
        SlotRequirement::Tag(tag.to_string())
    }

    #[test]
    fn test_assign_until_exhausted_then_repeat() {
        let questions = vec![
            Question::plain(0, "1A", None, "q0"),
            Question::plain(1, "1A", None, "q1"),
        ];
        let index = BankIndex::build(&questions);
        let selector = Selector::new();
        let mut used = HashSet::new();
        let mut rng = StdRng::seed_from_u64(7);
        let req = tag_req("1A");

        let first = selector.select(Some(&req), &index, &mut used, &mut rng);
        let second = selector.select(Some(&req), &index, &mut used, &mut rng);
        assert!(matches!(first, SlotOutcome::Assigned(_)));
        assert!(matches!(second, SlotOutcome::Assigned(_)));
        assert_ne!(first.question(), second.question());

        // 池已耗尽：第三次必须是 Repeated 而不是 NotFound
        let third = selector.select(Some(&req), &index, &mut used, &mut rng);
        assert!(matches!(third, SlotOutcome::Repeated(_)));
    }

    #[test]
    fn test_missing_tag_is_not_found() {
        let questions = vec![Question::plain(0, "1A", None, "q0")];
        let index = BankIndex::build(&questions);
        let selector = Selector::new();
        let mut used = HashSet::new();
        let mut rng = StdRng::seed_from_u64(7);

        let outcome = selector.select(Some(&tag_req("5C")), &index, &mut used, &mut rng);
        assert_eq!(outcome, SlotOutcome::NotFound);
        assert!(used.is_empty());
    }

    #[test]
    fn test_no_requirement_is_not_found() {
        let questions = vec![Question::plain(0, "1A", None, "q0")];
        let index = BankIndex::build(&questions);
        let selector = Selector::new();
        let mut used = HashSet::new();
        let mut rng = StdRng::seed_from_u64(7);

        let outcome = selector.select(None, &index, &mut used, &mut rng);
        assert_eq!(outcome, SlotOutcome::NotFound);
    }
}
