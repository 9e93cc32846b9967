//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责整次生成的调度，是整个系统的"指挥中心"。
//!
//! ### `app` - 生成运行管理者
//! - 管理应用生命周期（初始化、运行、输出）
//! - 加载并解析题库与模板
//! - 控制套卷循环与去重跟踪范围
//! - 写出文档、zip 归档与 manifest.json
//! - 输出全局统计信息
//!
//! ### `set_processor` - 单套卷处理器
//! - 执行一套卷的选题流程（GenerationFlow）
//! - 为两个受众各装配一份文档
//! - 输出单套卷的统计信息
//!
//! ## 层次关系
//!
//! ```text
//! app (处理整次生成)
//!     ↓
//! set_processor (处理一套卷)
//!     ↓
//! workflow::GenerationFlow (处理槽位遍历)
//!     ↓
//! services (能力层：match / index / select / assemble / pack / warn)
//!     ↓
//! infrastructure (基础设施：DocTables / docx-rs)
//! ```

pub mod app;
pub mod set_processor;

// 重新导出主要类型
pub use app::App;
pub use set_processor::{process_set, GeneratedFile, SetOutput};
