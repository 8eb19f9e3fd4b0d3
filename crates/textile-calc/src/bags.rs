//! 合約袋數公式

use rust_decimal::Decimal;
use textile_core::units::BAG_DIVISOR;
use textile_core::{arith, RoundingPolicy};

/// 合約用袋數計算器
///
/// 與快速估算的 45.36 公斤包重制度不同，兩者不可合併。
pub struct BagCalculator;

impl BagCalculator {
    /// 所需袋數：`(每米紗重 × 訂購長度) / 100`
    pub fn bags_required(weight_per_meter: Decimal, quantity: Decimal) -> Decimal {
        let bags = arith::mul(weight_per_meter, quantity).and_then(|w| arith::div(w, BAG_DIVISOR));
        RoundingPolicy::round4_or_zero(bags)
    }

    /// 經緯合計袋數（以已取捨的經緯袋數相加）
    pub fn total(warp_bags: Decimal, weft_bags: Decimal) -> Decimal {
        RoundingPolicy::round4_or_zero(arith::add(warp_bags, weft_bags))
    }
}
