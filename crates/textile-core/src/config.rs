//! 快速成本估算配置

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::units;

/// 粗估公式的參數
///
/// 與合約公式使用的 1.0936/800 制度無關；預設值即估算畫面的固定值。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostingConfig {
    /// 每單位筘數的經紗耗用（每 100 米）
    pub warp_consumption_factor: Decimal,

    /// 每單位緯密的緯紗耗用（每 100 米）
    pub weft_consumption_factor: Decimal,

    /// 每袋公斤數
    pub bag_weight_kg: Decimal,

    /// 每公斤紗價（暫定值）
    pub unit_price: Decimal,
}

impl CostingConfig {
    /// 創建預設配置
    pub fn new() -> Self {
        Self {
            warp_consumption_factor: units::WARP_CONSUMPTION_FACTOR,
            weft_consumption_factor: units::WEFT_CONSUMPTION_FACTOR,
            bag_weight_kg: units::STANDARD_BAG_KG,
            unit_price: units::PLACEHOLDER_YARN_PRICE,
        }
    }

    /// 由 JSON 載入，缺少的欄位使用預設值
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// 建構器模式：設置經紗耗用係數
    pub fn with_warp_consumption_factor(mut self, factor: Decimal) -> Self {
        self.warp_consumption_factor = factor;
        self
    }

    /// 建構器模式：設置緯紗耗用係數
    pub fn with_weft_consumption_factor(mut self, factor: Decimal) -> Self {
        self.weft_consumption_factor = factor;
        self
    }

    /// 建構器模式：設置每袋公斤數
    pub fn with_bag_weight_kg(mut self, kg: Decimal) -> Self {
        self.bag_weight_kg = kg;
        self
    }

    /// 建構器模式：設置紗價
    pub fn with_unit_price(mut self, price: Decimal) -> Self {
        self.unit_price = price;
        self
    }
}

impl Default for CostingConfig {
    fn default() -> Self {
        Self::new()
    }
}
