//! 标签匹配服务 - 业务能力层
//!
//! 只负责"槽位编号 → 题目要求"的固定映射，不关心题库内容。
//! 映射表按考试类型固定；查不到返回 None，由下游走 NotFound 兜底。

use rand::seq::SliceRandom;
use rand::Rng;

use crate::models::exam::{EndSemTagMode, ExamType};
use crate::models::slot::SlotRequirement;

/// EndSem K 级别区间：槽位 1-10
const LEVELS_LOW: &[u8] = &[1, 2, 3];
/// EndSem K 级别区间：槽位 11-20
const LEVELS_MID: &[u8] = &[4, 5];
/// EndSem K 级别区间：槽位 21-22
const LEVELS_HIGH: &[u8] = &[6];

/// 标签匹配服务
#[derive(Debug, Clone)]
pub struct TagMatcher {
    exam_type: ExamType,
    /// CAT 卷 Part C 的单元选择
    part_c_unit: u8,
    /// EndSem 卷 Part C 的单元选择
    endsem_unit: u8,
    /// EndSem 映射模式
    endsem_mode: EndSemTagMode,
}

impl TagMatcher {
    pub fn new(
        exam_type: ExamType,
        part_c_unit: u8,
        endsem_unit: u8,
        endsem_mode: EndSemTagMode,
    ) -> Self {
        Self {
            exam_type,
            part_c_unit,
            endsem_unit,
            endsem_mode,
        }
    }

    /// 计算槽位的题目要求
    ///
    /// CAT 卷第 5 题在两个候选标签中随机二选一，因此需要注入随机源
    pub fn requirement_for_slot<R: Rng>(
        &self,
        slot_number: u32,
        rng: &mut R,
    ) -> Option<SlotRequirement> {
        match self.exam_type {
            ExamType::EndSem => self.endsem_requirement(slot_number),
            ExamType::Cat1 => self.cat_requirement(slot_number, "1A", "2A", "1B", "2B", rng),
            ExamType::Cat2 => self.cat_requirement(slot_number, "3A", "4A", "3B", "4B", rng),
        }
    }

    fn endsem_requirement(&self, slot_number: u32) -> Option<SlotRequirement> {
        match self.endsem_mode {
            EndSemTagMode::DirectTable => {
                let tag = match slot_number {
                    1 | 2 => "1A",
                    3 | 4 => "2A",
                    5 | 6 => "3A",
                    7 | 8 => "4A",
                    9 | 10 => "5A",
                    11 | 12 => "1B",
                    13 | 14 => "2B",
                    15 | 16 => "3B",
                    17 | 18 => "4B",
                    19 | 20 => "5B",
                    21 | 22 => {
                        return Some(SlotRequirement::Tag(format!("{}C", self.endsem_unit)))
                    }
                    _ => return None,
                };
                Some(SlotRequirement::Tag(tag.to_string()))
            }
            EndSemTagMode::LevelRange => match slot_number {
                1..=10 => Some(SlotRequirement::Levels(LEVELS_LOW)),
                11..=20 => Some(SlotRequirement::Levels(LEVELS_MID)),
                21 | 22 => Some(SlotRequirement::Levels(LEVELS_HIGH)),
                _ => None,
            },
        }
    }

    fn cat_requirement<R: Rng>(
        &self,
        slot_number: u32,
        a1: &str,
        a2: &str,
        b1: &str,
        b2: &str,
        rng: &mut R,
    ) -> Option<SlotRequirement> {
        let tag = match slot_number {
            1 | 2 => a1.to_string(),
            3 | 4 => a2.to_string(),
            // 第 5 题在两个 A 部分标签中随机二选一
            5 => {
                let candidates = [a1, a2];
                candidates.choose(rng).copied().unwrap_or(a1).to_string()
            }
            6 | 7 => b1.to_string(),
            8 | 9 => b2.to_string(),
            10 | 11 => format!("{}C", self.part_c_unit),
            _ => return None,
        };
        Some(SlotRequirement::Tag(tag))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    #[test]
    fn test_endsem_direct_table() {
        let matcher = TagMatcher::new(ExamType::EndSem, 1, 3, EndSemTagMode::DirectTable);
        let mut r = rng();
        assert_eq!(
            matcher.requirement_for_slot(1, &mut r),
            Some(SlotRequirement::Tag("1A".to_string()))
        );
        assert_eq!(
            matcher.requirement_for_slot(15, &mut r),
            Some(SlotRequirement::Tag("3B".to_string()))
        );
        assert_eq!(
            matcher.requirement_for_slot(20, &mut r),
            Some(SlotRequirement::Tag("5B".to_string()))
        );
        // 21/22 取 EndSem Part C 单元
        assert_eq!(
            matcher.requirement_for_slot(21, &mut r),
            Some(SlotRequirement::Tag("3C".to_string()))
        );
        assert_eq!(matcher.requirement_for_slot(23, &mut r), None);
    }

    #[test]
    fn test_endsem_level_range() {
        let matcher = TagMatcher::new(ExamType::EndSem, 1, 1, EndSemTagMode::LevelRange);
        let mut r = rng();
        assert_eq!(
            matcher.requirement_for_slot(3, &mut r),
            Some(SlotRequirement::Levels(&[1, 2, 3]))
        );
        assert_eq!(
            matcher.requirement_for_slot(11, &mut r),
            Some(SlotRequirement::Levels(&[4, 5]))
        );
        assert_eq!(
            matcher.requirement_for_slot(22, &mut r),
            Some(SlotRequirement::Levels(&[6]))
        );
        assert_eq!(matcher.requirement_for_slot(0, &mut r), None);
    }

    #[test]
    fn test_cat1_table() {
        let matcher = TagMatcher::new(ExamType::Cat1, 2, 1, EndSemTagMode::DirectTable);
        let mut r = rng();
        assert_eq!(
            matcher.requirement_for_slot(1, &mut r),
            Some(SlotRequirement::Tag("1A".to_string()))
        );
        assert_eq!(
            matcher.requirement_for_slot(8, &mut r),
            Some(SlotRequirement::Tag("2B".to_string()))
        );
        assert_eq!(
            matcher.requirement_for_slot(10, &mut r),
            Some(SlotRequirement::Tag("2C".to_string()))
        );
        assert_eq!(matcher.requirement_for_slot(12, &mut r), None);
    }

    #[test]
    fn test_cat_slot5_is_random_choice() {
        let matcher = TagMatcher::new(ExamType::Cat2, 3, 1, EndSemTagMode::DirectTable);
        let mut r = rng();
        for _ in 0..20 {
            let req = matcher.requirement_for_slot(5, &mut r).unwrap();
            match req {
                SlotRequirement::Tag(tag) => assert!(tag == "3A" || tag == "4A"),
                _ => panic!("CAT 卷第 5 题必须返回标签要求"),
            }
        }
    }
}
