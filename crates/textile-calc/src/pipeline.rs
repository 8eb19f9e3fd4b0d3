//! 依相依順序排列的公式步驟
//!
//! 每個步驟讀取前面步驟已寫回記錄（已取捨）的欄位，
//! 因此步驟順序決定中間取捨的效果，不可任意調換。

/// 單一公式步驟：寫入一個推導欄位
pub(crate) struct Step<R, C> {
    /// 寫入的推導欄位名稱
    pub field: &'static str,
    /// 公式
    pub apply: fn(&mut R, &C),
}

impl<R, C> Step<R, C> {
    pub const fn new(field: &'static str, apply: fn(&mut R, &C)) -> Self {
        Self { field, apply }
    }
}

/// 依序執行所有步驟（單次同步計算，無增量追蹤）
pub(crate) fn run<R, C>(steps: &[Step<R, C>], record: &mut R, context: &C) {
    for step in steps {
        (step.apply)(record, context);
        tracing::trace!(field = step.field, "推導欄位已更新");
    }
}
