//! 快速成本估算（粗估公式）
//!
//! 使用每 100 米近似耗用量，不採用合約的 1.0936/800 支數制度。
//! 兩套公式各自獨立，估算結果不受合約單價影響。

use rust_decimal::Decimal;
use serde::Serialize;
use textile_core::units::COSTING_LENGTH_BASIS;
use textile_core::{arith, CostingConfig, CostingInput, RoundingPolicy};

use crate::pipeline::{self, Step};
use crate::record::CostingRecord;

/// 粗估結果
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CostingEstimate {
    /// 經紗耗用（每 100 米）
    pub(crate) warp_consumption: Decimal,
    /// 緯紗耗用（每 100 米）
    pub(crate) weft_consumption: Decimal,
    /// 紗線總公斤數
    pub(crate) total_yarn_kg: Decimal,
    /// 所需袋數（無條件進位）
    pub(crate) required_bags: Decimal,
    /// 估算成本
    pub(crate) estimated_cost: Decimal,
}

impl CostingEstimate {
    /// 推導欄位
    pub const FIELDS: &'static [&'static str] = &[
        "warp_consumption",
        "weft_consumption",
        "total_yarn_kg",
        "required_bags",
        "estimated_cost",
    ];

    pub fn warp_consumption(&self) -> Decimal {
        self.warp_consumption
    }

    pub fn weft_consumption(&self) -> Decimal {
        self.weft_consumption
    }

    pub fn total_yarn_kg(&self) -> Decimal {
        self.total_yarn_kg
    }

    pub fn required_bags(&self) -> Decimal {
        self.required_bags
    }

    pub fn estimated_cost(&self) -> Decimal {
        self.estimated_cost
    }
}

/// 粗估計算器
pub struct CostingEstimator;

impl CostingEstimator {
    /// 獨立執行粗估
    pub fn estimate(input: &CostingInput, config: &CostingConfig) -> CostingEstimate {
        let mut record = CostingRecord::new(input.clone());
        pipeline::run(COSTING_PIPELINE, &mut record, config);
        record.estimate
    }

    /// 經紗耗用：`筘數 × 0.05`
    pub fn warp_consumption(reed: Decimal, config: &CostingConfig) -> Decimal {
        RoundingPolicy::round4_or_zero(arith::mul(reed, config.warp_consumption_factor))
    }

    /// 緯紗耗用：`緯密 × 0.04`
    pub fn weft_consumption(pick: Decimal, config: &CostingConfig) -> Decimal {
        RoundingPolicy::round4_or_zero(arith::mul(pick, config.weft_consumption_factor))
    }

    /// 紗線總公斤數：`(經耗 + 緯耗) × 米數 / 100`，取 2 位小數
    pub fn total_yarn_kg(warp: Decimal, weft: Decimal, required_meters: Decimal) -> Decimal {
        let kg = || {
            let per_basis = arith::add(warp, weft)?;
            arith::div(arith::mul(per_basis, required_meters)?, COSTING_LENGTH_BASIS)
        };
        RoundingPolicy::round2_or_zero(kg())
    }

    /// 所需袋數：`ceil(公斤數 / 包重)`
    pub fn required_bags(total_yarn_kg: Decimal, config: &CostingConfig) -> Decimal {
        arith::div(total_yarn_kg, config.bag_weight_kg)
            .map(|bags| bags.ceil())
            .unwrap_or(Decimal::ZERO)
    }

    /// 估算成本：`公斤數 × 紗價`，取 2 位小數
    pub fn estimated_cost(total_yarn_kg: Decimal, config: &CostingConfig) -> Decimal {
        RoundingPolicy::round2_or_zero(arith::mul(total_yarn_kg, config.unit_price))
    }
}

/// 粗估公式的執行順序
pub(crate) const COSTING_PIPELINE: &[Step<CostingRecord, CostingConfig>] = &[
    Step::new("warp_consumption", warp_consumption_step),
    Step::new("weft_consumption", weft_consumption_step),
    Step::new("total_yarn_kg", total_yarn_kg_step),
    Step::new("required_bags", required_bags_step),
    Step::new("estimated_cost", estimated_cost_step),
];

fn warp_consumption_step(record: &mut CostingRecord, config: &CostingConfig) {
    let reed = arith::or_zero(record.input.reed);
    record.estimate.warp_consumption = CostingEstimator::warp_consumption(reed, config);
}

fn weft_consumption_step(record: &mut CostingRecord, config: &CostingConfig) {
    let pick = arith::or_zero(record.input.pick);
    record.estimate.weft_consumption = CostingEstimator::weft_consumption(pick, config);
}

fn total_yarn_kg_step(record: &mut CostingRecord, _config: &CostingConfig) {
    let meters = arith::or_zero(record.input.required_meters);
    record.estimate.total_yarn_kg = CostingEstimator::total_yarn_kg(
        record.estimate.warp_consumption,
        record.estimate.weft_consumption,
        meters,
    );
}

fn required_bags_step(record: &mut CostingRecord, config: &CostingConfig) {
    record.estimate.required_bags =
        CostingEstimator::required_bags(record.estimate.total_yarn_kg, config);
}

fn estimated_cost_step(record: &mut CostingRecord, config: &CostingConfig) {
    record.estimate.estimated_cost =
        CostingEstimator::estimated_cost(record.estimate.total_yarn_kg, config);
}
