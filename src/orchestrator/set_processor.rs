//! 单套卷处理器 - 编排层
//!
//! ## 职责
//!
//! 本模块负责处理一套卷：执行选题流程，再为两个受众各装配一份文档。
//!
//! ## 核心功能
//!
//! 1. **选题**：委托 `GenerationFlow` 完成槽位遍历
//! 2. **装配**：学生卷 / 教师卷各一份（共用同一选题结果）
//! 3. **统计输出**：记录分配 / 重复 / 缺失数量

use std::collections::HashSet;

use anyhow::{Context, Result};
use rand::Rng;
use tracing::info;

use crate::models::exam::Audience;
use crate::models::question::{CoDescriptions, Question};
use crate::models::slot::{OrPair, Slot};
use crate::services::{BankIndex, DocAssembler};
use crate::workflow::{GenerationFlow, SetCtx, SetStats};

/// 一份生成的输出文档
#[derive(Debug)]
pub struct GeneratedFile {
    /// 输出文件名，例如 "Set_1_Student.docx"
    pub name: String,
    /// 目标受众
    pub audience: Audience,
    /// 文档字节
    pub bytes: Vec<u8>,
}

/// 一套卷的处理结果
#[derive(Debug)]
pub struct SetOutput {
    pub files: Vec<GeneratedFile>,
    pub stats: SetStats,
}

/// 处理一套卷
///
/// # 参数
/// - `flow`: 选题流程
/// - `assembler`: 文档装配服务
/// - `template_bytes`: 原始模板字节（每个受众各解析一份新文档）
/// - `used`: 已用题目集合（跟踪范围由调用方决定）
/// - `rng`: 注入的随机源
/// - `ctx`: 套卷上下文
#[allow(clippy::too_many_arguments)]
pub fn process_set<R: Rng>(
    flow: &GenerationFlow,
    assembler: &DocAssembler,
    template_bytes: &[u8],
    slots: &[Slot],
    pairs: &[OrPair],
    index: &BankIndex,
    questions: &[Question],
    co_desc: &CoDescriptions,
    used: &mut HashSet<usize>,
    rng: &mut R,
    ctx: &SetCtx,
) -> Result<SetOutput> {
    log_set_start(ctx, slots.len());

    // 选题（一次选题，双受众共用）
    let selection = flow.run(slots, pairs, index, questions, used, rng, ctx)?;

    // 装配两个受众的文档
    let mut files = Vec::with_capacity(Audience::ALL.len());
    for audience in Audience::ALL {
        let bytes = assembler
            .assemble(template_bytes, &selection.picks, questions, co_desc, audience)
            .with_context(|| {
                format!("套卷 {} {} 卷装配失败", ctx.set_index, audience.label())
            })?;
        let name = format!("Set_{}_{}.docx", ctx.set_index, audience.label());
        info!(
            "[套卷 {}] ✓ {} 已装配 ({} KB)",
            ctx.set_index,
            name,
            bytes.len() / 1024
        );
        files.push(GeneratedFile {
            name,
            audience,
            bytes,
        });
    }

    log_set_complete(ctx, &selection.stats);

    Ok(SetOutput {
        files,
        stats: selection.stats,
    })
}

// ========== 日志辅助函数 ==========

fn log_set_start(ctx: &SetCtx, slot_count: usize) {
    info!("\n[套卷 {}] {}", ctx.set_index, "─".repeat(30));
    info!(
        "[套卷 {}] 开始处理（{}/{}），槽位 {} 个",
        ctx.set_index, ctx.set_index, ctx.total_sets, slot_count
    );
}

fn log_set_complete(ctx: &SetCtx, stats: &SetStats) {
    info!(
        "[套卷 {}] ✅ 处理完成: 分配 {}, 重复 {}, 缺失 {}",
        ctx.set_index, stats.assigned, stats.repeated, stats.not_found
    );
}
