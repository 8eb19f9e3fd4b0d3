//! 單位換算常數
//!
//! 紗支制度與英制/公制換算的固定值，屬於行業慣例而非配置。
//! 公式中一律引用此處的具名常數，方便紡織專業人員核對。

use rust_decimal::Decimal;

/// 碼與米的換算係數（碼制支數換算到公制幅寬/長度基準）
pub const YARD_METER_FACTOR: Decimal = Decimal::from_parts(10936, 0, 0, false, 4);

/// 支數換算重量的固定除數
pub const COUNT_WEIGHT_DIVISOR: Decimal = Decimal::from_parts(800, 0, 0, false, 0);

/// 整經長度換算除數
pub const SIZING_LENGTH_DIVISOR: Decimal = Decimal::from_parts(7861, 0, 0, false, 1);

/// 每公斤的磅數
pub const LB_PER_KG: Decimal = Decimal::from_parts(22046, 0, 0, false, 4);

/// 報價基準長度（米）
pub const QUOTE_LENGTH_METERS: Decimal = Decimal::from_parts(40, 0, 0, false, 0);

/// 合約用袋數換算除數
pub const BAG_DIVISOR: Decimal = Decimal::from_parts(100, 0, 0, false, 0);

/// 粗估公式的長度基準（每 100 米）
pub const COSTING_LENGTH_BASIS: Decimal = Decimal::from_parts(100, 0, 0, false, 0);

/// 粗估：每單位筘數的經紗耗用
pub const WARP_CONSUMPTION_FACTOR: Decimal = Decimal::from_parts(5, 0, 0, false, 2);

/// 粗估：每單位緯密的緯紗耗用
pub const WEFT_CONSUMPTION_FACTOR: Decimal = Decimal::from_parts(4, 0, 0, false, 2);

/// 標準包重（公斤）
pub const STANDARD_BAG_KG: Decimal = Decimal::from_parts(4536, 0, 0, false, 2);

/// 粗估用的暫定紗價（每公斤）
pub const PLACEHOLDER_YARN_PRICE: Decimal = Decimal::from_parts(55, 0, 0, false, 1);

/// 百分比
pub const PERCENT: Decimal = Decimal::ONE_HUNDRED;
