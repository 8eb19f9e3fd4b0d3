//! 紗線重量公式

use rust_decimal::Decimal;
use textile_core::units::{COUNT_WEIGHT_DIVISOR, QUOTE_LENGTH_METERS, YARD_METER_FACTOR};
use textile_core::{arith, ConstructionSpec, RoundingPolicy};

/// 每米/每 40 米紗重計算器
pub struct WeightCalculator;

impl WeightCalculator {
    /// 每米紗重
    ///
    /// `(密度 × 幅寬 × 1.0936) / (支數 × 800)`，取 4 位小數。
    /// `count_divisor` 由呼叫端先行箝制（缺值或 0 以 1 代替）。
    pub fn per_meter(density: Decimal, width: Decimal, count_divisor: Decimal) -> Decimal {
        let weight = || {
            let numerator = arith::mul(arith::mul(density, width)?, YARD_METER_FACTOR)?;
            let denominator = arith::mul(count_divisor, COUNT_WEIGHT_DIVISOR)?;
            arith::div(numerator, denominator)
        };
        RoundingPolicy::round4_or_zero(weight())
    }

    /// 經紗每米紗重
    pub fn warp_per_meter(spec: &ConstructionSpec) -> Decimal {
        Self::per_meter(spec.reed_or_zero(), spec.width_or_zero(), spec.warp_divisor())
    }

    /// 緯紗每米紗重
    pub fn weft_per_meter(spec: &ConstructionSpec) -> Decimal {
        Self::per_meter(spec.pick_or_zero(), spec.width_or_zero(), spec.weft_divisor())
    }

    /// 每 40 米紗重（以已取捨的每米紗重計算）
    pub fn per_40_meter(weight_per_meter: Decimal) -> Decimal {
        RoundingPolicy::round4_or_zero(arith::mul(weight_per_meter, QUOTE_LENGTH_METERS))
    }
}
