//! 紗價與加工費公式

use rust_decimal::Decimal;
use textile_core::units::QUOTE_LENGTH_METERS;
use textile_core::{arith, RoundingPolicy};

/// 金額推導計算器（建立在紗重公式之上）
pub struct ValueCalculator;

impl ValueCalculator {
    /// 每 40 米紗價：兩個運算元都存在時才計算，否則為 0
    pub fn yarn_value_per_40(weight_per_40_meter: Decimal, rate: Option<Decimal>) -> Decimal {
        Self::product_if_present(Some(weight_per_40_meter), rate)
    }

    /// 每米加工費：`每緯加工費 × 緯密`
    pub fn conv_charges_per_meter(
        charge_per_pick: Option<Decimal>,
        pick: Option<Decimal>,
    ) -> Decimal {
        Self::product_if_present(charge_per_pick, pick)
    }

    /// 每 40 米加工費
    pub fn conv_charges_per_40_meter(conv_charges_per_meter: Decimal) -> Decimal {
        RoundingPolicy::round4_or_zero(arith::mul(conv_charges_per_meter, QUOTE_LENGTH_METERS))
    }

    /// 經緯紗價合計
    pub fn total_yarn_value(warp_value: Decimal, weft_value: Decimal) -> Decimal {
        RoundingPolicy::round4_or_zero(arith::add(warp_value, weft_value))
    }

    fn product_if_present(a: Option<Decimal>, b: Option<Decimal>) -> Decimal {
        match (a, b) {
            (Some(a), Some(b)) if !a.is_zero() && !b.is_zero() => {
                RoundingPolicy::round4_or_zero(arith::mul(a, b))
            }
            _ => RoundingPolicy::round4(Decimal::ZERO),
        }
    }
}
