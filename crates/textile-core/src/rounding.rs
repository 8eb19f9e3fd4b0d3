//! 四捨五入規則
//!
//! 每個公式輸出都在寫回記錄前取捨；下一個公式讀取的是取捨後的值。

use rust_decimal::{Decimal, RoundingStrategy};

use crate::input;

/// 定點小數取捨規則
pub struct RoundingPolicy;

impl RoundingPolicy {
    /// 金額/重量的小數位數
    pub const CURRENCY_DP: u32 = 4;

    /// 百分比的小數位數
    pub const PERCENT_DP: u32 = 2;

    /// 取到 4 位小數（金額、重量、袋數）
    pub fn round4(value: Decimal) -> Decimal {
        Self::round_to(value, Self::CURRENCY_DP)
    }

    /// 取到 2 位小數（百分比、粗估公斤數與成本）
    pub fn round2(value: Decimal) -> Decimal {
        Self::round_to(value, Self::PERCENT_DP)
    }

    /// 受保護運算的結果取到 4 位小數；溢位（`None`）歸零
    pub fn round4_or_zero(value: Option<Decimal>) -> Decimal {
        Self::round4(value.unwrap_or(Decimal::ZERO))
    }

    /// 受保護運算的結果取到 2 位小數；溢位（`None`）歸零
    pub fn round2_or_zero(value: Option<Decimal>) -> Decimal {
        Self::round2(value.unwrap_or(Decimal::ZERO))
    }

    /// 文字輸入取到 4 位小數，無法解析的輸入視為 0
    pub fn round4_text(raw: &str) -> Decimal {
        Self::round4(input::parse_lenient(raw).unwrap_or(Decimal::ZERO))
    }

    /// 文字輸入取到 2 位小數，無法解析的輸入視為 0
    pub fn round2_text(raw: &str) -> Decimal {
        Self::round2(input::parse_lenient(raw).unwrap_or(Decimal::ZERO))
    }

    /// 固定 4 位小數的顯示字串，例如 `"8.2020"`
    pub fn format4(value: Decimal) -> String {
        Self::round4(value).to_string()
    }

    /// 固定 2 位小數的顯示字串
    pub fn format2(value: Decimal) -> String {
        Self::round2(value).to_string()
    }

    /// 中點遠離零，並補足小數位數
    ///
    /// 大到無法保留固定小數位數的值視同溢位，歸零。
    fn round_to(value: Decimal, dp: u32) -> Decimal {
        let mut rounded = value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
        rounded.rescale(dp);
        if rounded.scale() != dp {
            rounded = Decimal::ZERO;
            rounded.rescale(dp);
        }
        if rounded.is_zero() {
            rounded.set_sign_positive(true);
        }
        rounded
    }
}
