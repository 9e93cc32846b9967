//! 日志工具模块
//!
//! 提供日志初始化与格式化输出的辅助函数

use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::models::exam::{ExamType, TrackingMode};
use crate::workflow::SetStats;

/// 初始化日志订阅者
///
/// RUST_LOG 环境变量可覆盖默认级别
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// 记录程序启动信息
pub fn log_startup(exam_type: ExamType, set_count: usize, tracking_mode: TrackingMode) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 随机化试卷生成模式");
    info!("🕐 时间: {}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S"));
    info!("📝 考试类型: {}", exam_type);
    info!("📦 套卷数量: {}", set_count);
    info!("🔁 去重跟踪: {}", tracking_mode.name());
    info!("{}", "=".repeat(60));
}

/// 记录整次生成的统计信息
pub fn log_generation_complete(all_stats: &[SetStats], output_dir: &str) {
    let assigned: usize = all_stats.iter().map(|s| s.assigned).sum();
    let repeated: usize = all_stats.iter().map(|s| s.repeated).sum();
    let not_found: usize = all_stats.iter().map(|s| s.not_found).sum();

    info!("{}", "=".repeat(60));
    info!(
        "✅ 生成完成: {} 套卷, 分配 {}, 重复 {}, 缺失 {}",
        all_stats.len(),
        assigned,
        repeated,
        not_found
    );
    if repeated > 0 {
        info!("⚠️ 题库不足以完全去重，详见 warn.txt");
    }
    if not_found > 0 {
        info!("⚠️ 部分标签在题库中缺失，输出中已放置占位文本");
    }
    info!("📂 输出目录: {}", output_dir);
    info!("{}", "=".repeat(60));
}
