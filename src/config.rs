use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

/// 一次生成运行允许的最大套卷数量
pub const MAX_SETS: usize = 10;

/// 程序配置文件
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 题库 docx 文件路径
    pub bank_path: String,
    /// 模板 docx 文件路径
    pub template_path: String,
    /// 输出目录
    pub output_dir: String,
    /// 考试类型："cat1" | "cat2" | "endsem"
    pub exam_type: String,
    /// 生成套卷数量（1..=10）
    pub set_count: usize,
    /// CAT 卷 Part C 的单元选择
    pub part_c_unit: u8,
    /// EndSem 卷 Part C 的单元选择
    pub endsem_unit: u8,
    /// EndSem 是否使用 K 级别区间模式（否则使用固定标签表）
    pub endsem_level_mode: bool,
    /// 去重跟踪模式："global"（跨套卷）| "per_set"（单套卷内）
    pub tracking_mode: String,
    /// 是否先解析 OR 配对槽位，保证成对题目优先抽取
    pub pairs_first: bool,
    /// 警告输出文件
    pub warn_file: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bank_path: "bank.docx".to_string(),
            template_path: "template.docx".to_string(),
            output_dir: "output".to_string(),
            exam_type: "endsem".to_string(),
            set_count: 1,
            part_c_unit: 1,
            endsem_unit: 1,
            endsem_level_mode: false,
            tracking_mode: "global".to_string(),
            pairs_first: true,
            warn_file: "warn.txt".to_string(),
            verbose_logging: false,
        }
    }
}

impl Config {
    /// 从环境变量构造配置（缺失项取默认值）
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            bank_path: std::env::var("BANK_PATH").unwrap_or(default.bank_path),
            template_path: std::env::var("TEMPLATE_PATH").unwrap_or(default.template_path),
            output_dir: std::env::var("OUTPUT_DIR").unwrap_or(default.output_dir),
            exam_type: std::env::var("EXAM_TYPE").unwrap_or(default.exam_type),
            set_count: std::env::var("SET_COUNT").ok().and_then(|v| v.parse().ok()).unwrap_or(default.set_count),
            part_c_unit: std::env::var("PART_C_UNIT").ok().and_then(|v| v.parse().ok()).unwrap_or(default.part_c_unit),
            endsem_unit: std::env::var("ENDSEM_UNIT").ok().and_then(|v| v.parse().ok()).unwrap_or(default.endsem_unit),
            endsem_level_mode: std::env::var("ENDSEM_LEVEL_MODE").ok().and_then(|v| v.parse().ok()).unwrap_or(default.endsem_level_mode),
            tracking_mode: std::env::var("TRACKING_MODE").unwrap_or(default.tracking_mode),
            pairs_first: std::env::var("PAIRS_FIRST").ok().and_then(|v| v.parse().ok()).unwrap_or(default.pairs_first),
            warn_file: std::env::var("WARN_FILE").unwrap_or(default.warn_file),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
        }
    }

    /// 从 TOML 文件加载配置
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        use anyhow::Context;
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("无法读取配置文件: {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("无法解析配置文件: {}", path.display()))?;
        Ok(config)
    }

    /// 加载配置：qpgen.toml 存在则优先读取，环境变量逐项覆盖
    pub fn load() -> Self {
        let file_path = Path::new("qpgen.toml");
        let base = if file_path.exists() {
            match Self::from_file(file_path) {
                Ok(config) => config,
                Err(e) => {
                    warn!("⚠️ 配置文件加载失败，回退到默认值: {}", e);
                    Self::default()
                }
            }
        } else {
            Self::default()
        };
        Self::merge_env(base)
    }

    /// 用环境变量覆盖已有配置
    fn merge_env(base: Self) -> Self {
        Self {
            bank_path: std::env::var("BANK_PATH").unwrap_or(base.bank_path),
            template_path: std::env::var("TEMPLATE_PATH").unwrap_or(base.template_path),
            output_dir: std::env::var("OUTPUT_DIR").unwrap_or(base.output_dir),
            exam_type: std::env::var("EXAM_TYPE").unwrap_or(base.exam_type),
            set_count: std::env::var("SET_COUNT").ok().and_then(|v| v.parse().ok()).unwrap_or(base.set_count),
            part_c_unit: std::env::var("PART_C_UNIT").ok().and_then(|v| v.parse().ok()).unwrap_or(base.part_c_unit),
            endsem_unit: std::env::var("ENDSEM_UNIT").ok().and_then(|v| v.parse().ok()).unwrap_or(base.endsem_unit),
            endsem_level_mode: std::env::var("ENDSEM_LEVEL_MODE").ok().and_then(|v| v.parse().ok()).unwrap_or(base.endsem_level_mode),
            tracking_mode: std::env::var("TRACKING_MODE").unwrap_or(base.tracking_mode),
            pairs_first: std::env::var("PAIRS_FIRST").ok().and_then(|v| v.parse().ok()).unwrap_or(base.pairs_first),
            warn_file: std::env::var("WARN_FILE").unwrap_or(base.warn_file),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(base.verbose_logging),
        }
    }

    /// 套卷数量限制在 1..=MAX_SETS
    pub fn clamped_set_count(&self) -> usize {
        self.set_count.clamp(1, MAX_SETS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.exam_type, "endsem");
        assert_eq!(config.set_count, 1);
        assert_eq!(config.tracking_mode, "global");
        assert!(config.pairs_first);
    }

    #[test]
    fn test_clamped_set_count() {
        let mut config = Config::default();
        config.set_count = 0;
        assert_eq!(config.clamped_set_count(), 1);
        config.set_count = 99;
        assert_eq!(config.clamped_set_count(), MAX_SETS);
        config.set_count = 3;
        assert_eq!(config.clamped_set_count(), 3);
    }

    #[test]
    fn test_parse_toml() {
        let toml_str = r#"
            exam_type = "cat1"
            set_count = 3
            part_c_unit = 2
            tracking_mode = "per_set"
        "#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.exam_type, "cat1");
        assert_eq!(config.set_count, 3);
        assert_eq!(config.part_c_unit, 2);
        assert_eq!(config.tracking_mode, "per_set");
        // 未指定项取默认值
        assert_eq!(config.bank_path, "bank.docx");
    }
}
