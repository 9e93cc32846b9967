//! 生成运行管理者 - 编排层
//!
//! 管理一次完整的生成运行：加载输入 → 解析 → 套卷循环 → 输出。

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::json;
use tracing::{info, warn};

use crate::config::Config;
use crate::error::{AppError, BusinessError};
use crate::infrastructure::DocTables;
use crate::models::exam::{ExamType, TrackingMode};
use crate::orchestrator::set_processor::process_set;
use crate::services::{BankIndex, BankParser, DocAssembler, TemplateParser, ZipPackager};
use crate::utils::logging;
use crate::workflow::{GenerationFlow, SetCtx, SetStats};

/// 生成运行管理者
pub struct App {
    config: Config,
    exam_type: ExamType,
    tracking_mode: TrackingMode,
}

impl App {
    /// 初始化应用：校验输入与配置
    ///
    /// 缺少题库或模板时直接拒绝，不产生任何部分输出
    pub fn initialize(config: Config) -> Result<Self> {
        if !Path::new(&config.bank_path).exists() {
            return Err(AppError::file_not_found(&config.bank_path).into());
        }
        if !Path::new(&config.template_path).exists() {
            return Err(AppError::file_not_found(&config.template_path).into());
        }

        let exam_type = ExamType::from_str(&config.exam_type).ok_or_else(|| {
            AppError::Business(BusinessError::ExamTypeParseFailed {
                exam_type: config.exam_type.clone(),
            })
        })?;

        let tracking_mode = TrackingMode::from_str(&config.tracking_mode).unwrap_or_else(|| {
            warn!(
                "⚠️ 跟踪模式 '{}' 无法识别，回退到 global",
                config.tracking_mode
            );
            TrackingMode::GlobalAcrossSets
        });

        Ok(Self {
            config,
            exam_type,
            tracking_mode,
        })
    }

    /// 执行一次完整的生成运行
    pub fn run(&self) -> Result<()> {
        let set_count = self.config.clamped_set_count();
        logging::log_startup(self.exam_type, set_count, self.tracking_mode);

        // ========== 加载与解析 ==========
        let bank_bytes = fs::read(&self.config.bank_path)
            .with_context(|| format!("无法读取题库: {}", self.config.bank_path))?;
        let template_bytes = fs::read(&self.config.template_path)
            .with_context(|| format!("无法读取模板: {}", self.config.template_path))?;

        let bank_tables = DocTables::parse(&bank_bytes).context("题库文档解析失败")?;
        let template_tables =
            DocTables::parse(&template_bytes).context("模板文档解析失败")?;

        let bank_parser = BankParser::new()?;
        let (questions, co_desc) = bank_parser.extract(&bank_tables);
        if questions.is_empty() {
            return Err(AppError::Business(BusinessError::EmptyBank).into());
        }

        let template_parser = TemplateParser::new()?;
        let (slots, pairs) = template_parser.extract(&template_tables);
        if slots.is_empty() {
            return Err(AppError::Business(BusinessError::NoSlotsInTemplate).into());
        }

        let index = BankIndex::build(&questions);
        info!(
            "📊 题库 {} 道题 / {} 个标签，模板 {} 个槽位",
            questions.len(),
            index.tag_count(),
            slots.len()
        );

        // ========== 套卷循环 ==========
        fs::create_dir_all(&self.config.output_dir)
            .with_context(|| format!("无法创建输出目录: {}", self.config.output_dir))?;

        let flow = GenerationFlow::new(&self.config, self.exam_type);
        let assembler = DocAssembler::new();
        let mut rng = StdRng::from_entropy();

        let mut used: HashSet<usize> = HashSet::new();
        let mut student_zip = ZipPackager::new();
        let mut faculty_zip = ZipPackager::new();
        let mut all_stats: Vec<SetStats> = Vec::with_capacity(set_count);
        let mut file_names: Vec<String> = Vec::new();

        for set_index in 1..=set_count {
            // per_set 模式每套卷重新计已用集
            if self.tracking_mode == TrackingMode::PerSet {
                used.clear();
            }

            let ctx = SetCtx::new(set_index, set_count);
            let output = process_set(
                &flow,
                &assembler,
                &template_bytes,
                &slots,
                &pairs,
                &index,
                &questions,
                &co_desc,
                &mut used,
                &mut rng,
                &ctx,
            )?;

            for file in &output.files {
                let path = self.write_output(&file.name, &file.bytes)?;
                info!("[套卷 {}] 💾 已写出 {}", set_index, path.display());
                match file.audience {
                    crate::models::exam::Audience::Student => {
                        student_zip.add_file(&file.name, &file.bytes)?
                    }
                    crate::models::exam::Audience::Faculty => {
                        faculty_zip.add_file(&file.name, &file.bytes)?
                    }
                }
                file_names.push(file.name.clone());
            }
            all_stats.push(output.stats);
        }

        // ========== 归档与清单 ==========
        self.write_output("Student.zip", &student_zip.finish()?)?;
        self.write_output("Faculty.zip", &faculty_zip.finish()?)?;
        self.write_manifest(set_count, &all_stats, &file_names)?;

        logging::log_generation_complete(&all_stats, &self.config.output_dir);
        Ok(())
    }

    /// 写出一个输出文件，返回完整路径
    fn write_output(&self, name: &str, bytes: &[u8]) -> Result<PathBuf> {
        let path = Path::new(&self.config.output_dir).join(name);
        fs::write(&path, bytes)
            .map_err(|e| AppError::file_write_failed(path.to_string_lossy().to_string(), e))?;
        Ok(path)
    }

    /// 写出 manifest.json：本次运行的参数与统计
    fn write_manifest(
        &self,
        set_count: usize,
        all_stats: &[SetStats],
        file_names: &[String],
    ) -> Result<()> {
        let manifest = json!({
            "generated_at": chrono::Local::now().to_rfc3339(),
            "exam_type": self.exam_type.name(),
            "tracking_mode": self.tracking_mode.name(),
            "set_count": set_count,
            "sets": all_stats,
            "files": file_names,
        });
        let content = serde_json::to_string_pretty(&manifest)?;
        self.write_output("manifest.json", content.as_bytes())?;
        Ok(())
    }
}
