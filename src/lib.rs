//! # QP Generator
//!
//! 一个从 docx 题库和 docx 模板自动生成随机化试卷的 Rust 应用程序
//!
//! ## 架构设计
//!
//! 本系统采用严格的四层架构：
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有外部文档库（docx-rs），只暴露能力
//! - `DocTables` - 将 docx 字节流解析为内存表格网格（文本 / 图片 / 格式内容）
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，每个服务只负责一种能力
//! - `BankParser` - 题库提取能力（标签行 / K 级别 / CO / 答案行 / 图片）
//! - `TemplateParser` - 模板槽位扫描能力（编号前缀 / OR 配对）
//! - `TagMatcher` - 槽位编号 → 标签要求的固定映射表
//! - `BankIndex` - 按标签 / K 级别分组索引题目
//! - `Selector` - 选题能力（去重池 / 随机抽取 / 兜底重复）
//! - `DocAssembler` - 文档装配能力（填充单元格 / 图片回插 / 答案段落）
//! - `ZipPackager` - 打包能力（每个受众一个 zip 归档）
//! - `WarnWriter` - 写 warn.txt 能力
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一套卷"的完整选题流程
//! - `SetCtx` - 上下文封装（set_index + total_sets）
//! - `GenerationFlow` - 流程编排（槽位遍历 → 匹配 → 选题 → 统计 → warn）
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/app` - 整次生成的管理者（加载、循环套卷、输出、清单）
//! - `orchestrator/set_processor` - 单套卷处理器（选题 + 双受众装配）
//!
//! ## 模块结构

pub mod config;
pub mod error;
pub mod infrastructure;

pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult};
pub use infrastructure::{DocTables, ParsedCell};
pub use models::exam::{Audience, EndSemTagMode, ExamType, TrackingMode};
pub use models::question::{CoDescriptions, Question};
pub use models::slot::{CellCoord, OrPair, Slot, SlotRequirement};
pub use orchestrator::{process_set, App};
pub use services::{BankIndex, BankParser, Selector, SlotOutcome, TagMatcher, TemplateParser};
pub use workflow::{GenerationFlow, SetCtx, SetSelection, SetStats};
