//! 回收單對帳公式

use rust_decimal::Decimal;
use serde::{Serialize, Serializer};
use textile_core::units::PERCENT;
use textile_core::{arith, RoundingPolicy};

use crate::pipeline::Step;
use crate::record::ReturnRecord;

/// 對帳結果
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReturnDerived {
    /// 回收合計
    pub(crate) total: Decimal,
    /// 增減量（回收合計 − 計劃總量）
    pub(crate) gl: Decimal,
    /// 增減百分比；沒有計劃總量時留白
    #[serde(serialize_with = "blank_when_unset")]
    pub(crate) percent: Option<Decimal>,
}

impl ReturnDerived {
    /// 推導欄位
    pub const FIELDS: &'static [&'static str] = &["total", "gl", "percent"];

    pub fn total(&self) -> Decimal {
        self.total
    }

    pub fn gl(&self) -> Decimal {
        self.gl
    }

    /// `None` 表示沒有比較基準，與「零差異」不同
    pub fn percent(&self) -> Option<Decimal> {
        self.percent
    }
}

fn blank_when_unset<S: Serializer>(
    value: &Option<Decimal>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match value {
        Some(percent) => Serialize::serialize(percent, serializer),
        None => serializer.serialize_str(""),
    }
}

/// 對帳計算器
pub struct ReconciliationCalculator;

impl ReconciliationCalculator {
    /// 回收合計：正品 + B/G + C/P
    pub fn total(fresh: Decimal, bg: Decimal, cp: Decimal) -> Decimal {
        RoundingPolicy::round4_or_zero(arith::add(fresh, bg).and_then(|sum| arith::add(sum, cp)))
    }

    /// 增減量
    pub fn gain_loss(total: Decimal, planned_total: Decimal) -> Decimal {
        RoundingPolicy::round4_or_zero(arith::sub(total, planned_total))
    }

    /// 增減百分比：計劃總量大於 0 才計算，取 2 位小數
    pub fn percent(gain_loss: Decimal, planned_total: Decimal) -> Option<Decimal> {
        if planned_total > Decimal::ZERO {
            let ratio = arith::div(gain_loss, planned_total).and_then(|r| arith::mul(r, PERCENT));
            Some(RoundingPolicy::round2_or_zero(ratio))
        } else {
            None
        }
    }
}

/// 對帳公式的執行順序
pub(crate) const RETURN_PIPELINE: &[Step<ReturnRecord, ()>] = &[
    Step::new("total", total_step),
    Step::new("gl", gain_loss_step),
    Step::new("percent", percent_step),
];

fn total_step(record: &mut ReturnRecord, _: &()) {
    let input = &record.input;
    record.derived.total = ReconciliationCalculator::total(
        arith::or_zero(input.fresh),
        arith::or_zero(input.bg),
        arith::or_zero(input.cp),
    );
}

fn gain_loss_step(record: &mut ReturnRecord, _: &()) {
    record.derived.gl = ReconciliationCalculator::gain_loss(
        record.derived.total,
        arith::or_zero(record.input.planned_total),
    );
}

fn percent_step(record: &mut ReturnRecord, _: &()) {
    record.derived.percent = ReconciliationCalculator::percent(
        record.derived.gl,
        arith::or_zero(record.input.planned_total),
    );
}
