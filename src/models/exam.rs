/// 考试类型枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ExamType {
    /// 第一次阶段测验（单元 1、2）
    Cat1,
    /// 第二次阶段测验（单元 3、4）
    Cat2,
    /// 期末考试（单元 1-5）
    EndSem,
}

impl ExamType {
    /// 获取标准名称
    pub fn name(self) -> &'static str {
        match self {
            ExamType::Cat1 => "CAT 1",
            ExamType::Cat2 => "CAT 2",
            ExamType::EndSem => "EndSem",
        }
    }

    /// 尝试从字符串解析考试类型（宽松匹配）
    pub fn from_str(s: &str) -> Option<Self> {
        let normalized: String = s
            .to_lowercase()
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();
        match normalized.as_str() {
            "cat1" => Some(ExamType::Cat1),
            "cat2" => Some(ExamType::Cat2),
            "endsem" | "final" => Some(ExamType::EndSem),
            _ => None,
        }
    }
}

impl std::fmt::Display for ExamType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// 去重跟踪模式
///
/// 部署期固定选择，不支持运行中途切换
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackingMode {
    /// 跨套卷全局去重（严格不重复，题库可能很快耗尽）
    GlobalAcrossSets,
    /// 仅单套卷内去重（跨套卷允许重复）
    PerSet,
}

impl TrackingMode {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "global" => Some(TrackingMode::GlobalAcrossSets),
            "per_set" | "perset" => Some(TrackingMode::PerSet),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            TrackingMode::GlobalAcrossSets => "global",
            TrackingMode::PerSet => "per_set",
        }
    }
}

/// EndSem 槽位映射模式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndSemTagMode {
    /// 固定标签表：槽位 1-20 直接映射到标签，21/22 取 Part C 单元
    DirectTable,
    /// K 级别区间：槽位 1-10 → K{1,2,3}，11-20 → K{4,5}，21-22 → K{6}
    LevelRange,
}

/// 输出受众
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Audience {
    /// 学生卷（不含答案）
    Student,
    /// 教师卷（含答案）
    Faculty,
}

impl Audience {
    /// 输出文件名中使用的标签
    pub fn label(self) -> &'static str {
        match self {
            Audience::Student => "Student",
            Audience::Faculty => "Faculty",
        }
    }

    pub const ALL: [Audience; 2] = [Audience::Student, Audience::Faculty];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exam_type_from_str() {
        assert_eq!(ExamType::from_str("cat1"), Some(ExamType::Cat1));
        assert_eq!(ExamType::from_str("CAT 1"), Some(ExamType::Cat1));
        assert_eq!(ExamType::from_str("Cat 2"), Some(ExamType::Cat2));
        assert_eq!(ExamType::from_str("EndSem"), Some(ExamType::EndSem));
        assert_eq!(ExamType::from_str("end sem"), Some(ExamType::EndSem));
        assert_eq!(ExamType::from_str("midterm"), None);
    }

    #[test]
    fn test_tracking_mode_from_str() {
        assert_eq!(
            TrackingMode::from_str("global"),
            Some(TrackingMode::GlobalAcrossSets)
        );
        assert_eq!(TrackingMode::from_str("per_set"), Some(TrackingMode::PerSet));
        assert_eq!(TrackingMode::from_str("PerSet"), Some(TrackingMode::PerSet));
        assert_eq!(TrackingMode::from_str("none"), None);
    }
}
