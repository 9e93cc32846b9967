//! 流程层（Workflow Layer）
//!
//! 定义"一套卷"的完整选题流程：槽位遍历 → 标签匹配 → 选题 → 统计。
//! 不持有文档资源，只依赖业务能力（services）。

pub mod generation_flow;
pub mod set_ctx;

pub use generation_flow::{GenerationFlow, SetSelection, SetStats};
pub use set_ctx::SetCtx;
