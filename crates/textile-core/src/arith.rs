//! 受保護的算術運算
//!
//! 所有推導欄位都必須是全函數。運算以 `Option` 串接：任一步溢位或除以零，
//! 整條公式回傳 `None`，由取捨規則歸零，不會留下只算了一半的值。

use rust_decimal::Decimal;

/// 乘法，溢位時回傳 `None`
pub fn mul(a: Decimal, b: Decimal) -> Option<Decimal> {
    a.checked_mul(b)
}

/// 除法，除數為零或溢位時回傳 `None`
pub fn div(a: Decimal, b: Decimal) -> Option<Decimal> {
    a.checked_div(b)
}

/// 加法，溢位時回傳 `None`
pub fn add(a: Decimal, b: Decimal) -> Option<Decimal> {
    a.checked_add(b)
}

/// 減法，溢位時回傳 `None`
pub fn sub(a: Decimal, b: Decimal) -> Option<Decimal> {
    a.checked_sub(b)
}

/// 除數箝制：缺值或為零時以 1 代替
pub fn divisor(value: Option<Decimal>) -> Decimal {
    match value {
        Some(v) if !v.is_zero() => v,
        _ => Decimal::ONE,
    }
}

/// 缺值視為 0
pub fn or_zero(value: Option<Decimal>) -> Decimal {
    value.unwrap_or(Decimal::ZERO)
}
