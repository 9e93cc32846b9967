/// 套卷上下文封装
///
/// 贯穿一套卷的选题与装配流程，只携带标识信息
#[derive(Debug, Clone, Copy)]
pub struct SetCtx {
    /// 套卷编号（从 1 开始）
    pub set_index: usize,
    /// 本次生成的套卷总数
    pub total_sets: usize,
}

impl SetCtx {
    pub fn new(set_index: usize, total_sets: usize) -> Self {
        Self {
            set_index,
            total_sets,
        }
    }
}
