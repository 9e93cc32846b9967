//! 套卷选题流程 - 流程层
//!
//! 核心职责：定义"一套卷"的完整选题流程
//!
//! 流程顺序：
//! 1. 确定槽位遍历顺序（OR 配对槽位可优先）
//! 2. 槽位编号 → 标签要求（TagMatcher）
//! 3. 去重池选题（Selector）
//! 4. 重复 / 缺失写入 warn.txt（兜底记录）

use std::collections::{BTreeMap, HashSet};

use anyhow::Result;
use rand::Rng;
use tracing::{info, warn};

use crate::config::Config;
use crate::models::exam::{EndSemTagMode, ExamType};
use crate::models::question::Question;
use crate::models::slot::{CellCoord, OrPair, Slot};
use crate::services::{BankIndex, Selector, SlotOutcome, TagMatcher, WarnWriter};
use crate::workflow::set_ctx::SetCtx;

/// 一套卷的选题统计
#[derive(Debug, Default, Clone, Copy, serde::Serialize)]
pub struct SetStats {
    /// 正常分配数量
    pub assigned: usize,
    /// 强制重复数量
    pub repeated: usize,
    /// 标签缺失数量
    pub not_found: usize,
}

impl SetStats {
    pub fn total(&self) -> usize {
        self.assigned + self.repeated + self.not_found
    }
}

/// 一套卷的选题结果
#[derive(Debug)]
pub struct SetSelection {
    /// 槽位坐标 → 选题结果
    pub picks: BTreeMap<CellCoord, SlotOutcome>,
    /// 统计信息
    pub stats: SetStats,
}

/// 套卷选题流程
///
/// - 编排一套卷的完整选题流程
/// - 决定遍历顺序、何时匹配、何时兜底
/// - 不持有文档资源
/// - 只依赖业务能力（services）
pub struct GenerationFlow {
    matcher: TagMatcher,
    selector: Selector,
    warn_writer: WarnWriter,
    pairs_first: bool,
    verbose_logging: bool,
}

impl GenerationFlow {
    /// 创建新的套卷选题流程
    pub fn new(config: &Config, exam_type: ExamType) -> Self {
        let endsem_mode = if config.endsem_level_mode {
            EndSemTagMode::LevelRange
        } else {
            EndSemTagMode::DirectTable
        };
        Self {
            matcher: TagMatcher::new(
                exam_type,
                config.part_c_unit,
                config.endsem_unit,
                endsem_mode,
            ),
            selector: Selector::new(),
            warn_writer: WarnWriter::with_path(config.warn_file.clone()),
            pairs_first: config.pairs_first,
            verbose_logging: config.verbose_logging,
        }
    }

    /// 为一套卷完成全部槽位的选题
    pub fn run<R: Rng>(
        &self,
        slots: &[Slot],
        pairs: &[OrPair],
        index: &BankIndex,
        questions: &[Question],
        used: &mut HashSet<usize>,
        rng: &mut R,
        ctx: &SetCtx,
    ) -> Result<SetSelection> {
        let order = self.slot_order(slots, pairs);

        let mut picks = BTreeMap::new();
        let mut stats = SetStats::default();

        for slot_pos in order {
            let slot = &slots[slot_pos];
            let requirement = self.matcher.requirement_for_slot(slot.number, rng);
            let outcome = self
                .selector
                .select(requirement.as_ref(), index, used, rng);

            match outcome {
                SlotOutcome::Assigned(idx) => {
                    stats.assigned += 1;
                    if self.verbose_logging {
                        if let Some(q) = questions.get(idx) {
                            info!(
                                "[套卷 {}] 槽位 {} ← 题目 {} ({})",
                                ctx.set_index,
                                slot.number,
                                q.id,
                                q.text_preview()
                            );
                        }
                    }
                }
                SlotOutcome::Repeated(_) => {
                    stats.repeated += 1;
                    let reason = match &requirement {
                        Some(req) => format!("{} 去重池耗尽，重复抽取", req),
                        None => "去重池耗尽，重复抽取".to_string(),
                    };
                    warn!("[套卷 {}] ⚠️ 槽位 {}: {}", ctx.set_index, slot.number, reason);
                    self.warn_writer.write(ctx.set_index, slot.number, &reason)?;
                }
                SlotOutcome::NotFound => {
                    stats.not_found += 1;
                    let reason = match &requirement {
                        Some(req) => format!("题库缺少 {}", req),
                        None => "槽位编号无映射".to_string(),
                    };
                    warn!("[套卷 {}] ⚠️ 槽位 {}: {}", ctx.set_index, slot.number, reason);
                    self.warn_writer.write(ctx.set_index, slot.number, &reason)?;
                }
            }

            picks.insert(slot.coord(), outcome);
        }

        info!(
            "[套卷 {}] 选题统计: 分配 {}, 重复 {}, 缺失 {}, 总计 {}",
            ctx.set_index,
            stats.assigned,
            stats.repeated,
            stats.not_found,
            stats.total()
        );

        Ok(SetSelection { picks, stats })
    }

    /// 槽位遍历顺序
    ///
    /// pairs_first 模式下 OR 配对槽位先于独立槽位处理，
    /// 保证成对题目在题库紧张时仍然优先成对抽取
    fn slot_order(&self, slots: &[Slot], pairs: &[OrPair]) -> Vec<usize> {
        if !self.pairs_first || pairs.is_empty() {
            return (0..slots.len()).collect();
        }

        let mut order = Vec::with_capacity(slots.len());
        let mut seen = HashSet::new();
        for pair in pairs {
            for idx in [pair.first, pair.second] {
                if idx < slots.len() && seen.insert(idx) {
                    order.push(idx);
                }
            }
        }
        for idx in 0..slots.len() {
            if seen.insert(idx) {
                order.push(idx);
            }
        }
        order
    }
}
