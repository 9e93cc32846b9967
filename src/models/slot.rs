/// 单元格坐标：（表格索引, 行索引, 单元格索引）
pub type CellCoord = (usize, usize, usize);

/// 模板中的编号槽位
///
/// 模板解析时一次性创建，装配阶段消费
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot {
    /// 所在表格索引
    pub table: usize,
    /// 所在行索引
    pub row: usize,
    /// 所在单元格索引
    pub cell: usize,
    /// 槽位编号（数字前缀）
    pub number: u32,
    /// 是否属于 OR 配对的备选槽位
    pub is_or_alternative: bool,
}

impl Slot {
    pub fn coord(&self) -> CellCoord {
        (self.table, self.row, self.cell)
    }
}

/// OR 配对：两个互为备选的槽位在 `slots` 列表中的索引
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrPair {
    pub first: usize,
    pub second: usize,
}

/// 槽位对题目的要求
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotRequirement {
    /// 要求固定标签，例如 "3B"
    Tag(String),
    /// 要求认知级别落在给定集合内（EndSem K 级别区间模式）
    Levels(&'static [u8]),
}

impl std::fmt::Display for SlotRequirement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SlotRequirement::Tag(tag) => write!(f, "标签 {}", tag),
            SlotRequirement::Levels(levels) => {
                let list: Vec<String> = levels.iter().map(|l| format!("K{}", l)).collect();
                write!(f, "级别 {{{}}}", list.join(","))
            }
        }
    }
}
