//! 織物規格與單價模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::arith;
use crate::input::deserialize_lenient;

/// 織物規格（合約的獨立輸入）
///
/// 所有欄位皆可缺省；缺值視為 0，紗支作為除數時缺值或 0 視為 1。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConstructionSpec {
    /// 筘數（每單位幅寬經紗數，舊資料稱 `read`）
    #[serde(
        default,
        alias = "read",
        deserialize_with = "deserialize_lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub reed: Option<Decimal>,

    /// 緯密（每單位長度緯紗數）
    #[serde(
        default,
        deserialize_with = "deserialize_lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub pick: Option<Decimal>,

    /// 經紗支數
    #[serde(
        default,
        deserialize_with = "deserialize_lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub warp: Option<Decimal>,

    /// 緯紗支數
    #[serde(
        default,
        deserialize_with = "deserialize_lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub weft: Option<Decimal>,

    /// 幅寬
    #[serde(
        default,
        deserialize_with = "deserialize_lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub width: Option<Decimal>,

    /// 訂購長度（米）
    #[serde(
        default,
        deserialize_with = "deserialize_lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub quantity: Option<Decimal>,
}

impl ConstructionSpec {
    /// 可編輯欄位
    pub const FIELDS: &'static [&'static str] =
        &["reed", "pick", "warp", "weft", "width", "quantity"];

    /// 創建空白規格
    pub fn new() -> Self {
        Self::default()
    }

    /// 建構器模式：設置筘數
    pub fn with_reed(mut self, reed: Decimal) -> Self {
        self.reed = Some(reed);
        self
    }

    /// 建構器模式：設置緯密
    pub fn with_pick(mut self, pick: Decimal) -> Self {
        self.pick = Some(pick);
        self
    }

    /// 建構器模式：設置經紗支數
    pub fn with_warp(mut self, warp: Decimal) -> Self {
        self.warp = Some(warp);
        self
    }

    /// 建構器模式：設置緯紗支數
    pub fn with_weft(mut self, weft: Decimal) -> Self {
        self.weft = Some(weft);
        self
    }

    /// 建構器模式：設置幅寬
    pub fn with_width(mut self, width: Decimal) -> Self {
        self.width = Some(width);
        self
    }

    /// 建構器模式：設置訂購長度
    pub fn with_quantity(mut self, quantity: Decimal) -> Self {
        self.quantity = Some(quantity);
        self
    }

    pub fn reed_or_zero(&self) -> Decimal {
        arith::or_zero(self.reed)
    }

    pub fn pick_or_zero(&self) -> Decimal {
        arith::or_zero(self.pick)
    }

    pub fn width_or_zero(&self) -> Decimal {
        arith::or_zero(self.width)
    }

    pub fn quantity_or_zero(&self) -> Decimal {
        arith::or_zero(self.quantity)
    }

    /// 經紗支數（作為除數）
    pub fn warp_divisor(&self) -> Decimal {
        arith::divisor(self.warp)
    }

    /// 緯紗支數（作為除數）
    pub fn weft_divisor(&self) -> Decimal {
        arith::divisor(self.weft)
    }

    /// 依欄位名稱取得可寫入的欄位
    pub fn slot_mut(&mut self, field: &str) -> Option<&mut Option<Decimal>> {
        match field {
            "reed" | "read" => Some(&mut self.reed),
            "pick" => Some(&mut self.pick),
            "warp" => Some(&mut self.warp),
            "weft" => Some(&mut self.weft),
            "width" => Some(&mut self.width),
            "quantity" => Some(&mut self.quantity),
            _ => None,
        }
    }
}

/// 單價與加工費（合約的獨立輸入）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RateSpec {
    /// 經紗單價（每單位重量）
    #[serde(
        default,
        deserialize_with = "deserialize_lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub rate_warp: Option<Decimal>,

    /// 緯紗單價（每單位重量）
    #[serde(
        default,
        deserialize_with = "deserialize_lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub rate_weft: Option<Decimal>,

    /// 每緯加工費
    #[serde(
        default,
        deserialize_with = "deserialize_lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub conv_charges_per_pick: Option<Decimal>,

    /// 每米扣款
    #[serde(
        default,
        deserialize_with = "deserialize_lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub deduction_per_meter: Option<Decimal>,

    /// 胚布單價
    ///
    /// 人工輸入，不由紗價與加工費推導。
    #[serde(
        default,
        deserialize_with = "deserialize_lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub grey_fabric_rate: Option<Decimal>,
}

impl RateSpec {
    /// 可編輯欄位
    pub const FIELDS: &'static [&'static str] = &[
        "rate_warp",
        "rate_weft",
        "conv_charges_per_pick",
        "deduction_per_meter",
        "grey_fabric_rate",
    ];

    /// 創建空白單價
    pub fn new() -> Self {
        Self::default()
    }

    /// 建構器模式：設置經紗單價
    pub fn with_rate_warp(mut self, rate: Decimal) -> Self {
        self.rate_warp = Some(rate);
        self
    }

    /// 建構器模式：設置緯紗單價
    pub fn with_rate_weft(mut self, rate: Decimal) -> Self {
        self.rate_weft = Some(rate);
        self
    }

    /// 建構器模式：設置每緯加工費
    pub fn with_conv_charges_per_pick(mut self, charge: Decimal) -> Self {
        self.conv_charges_per_pick = Some(charge);
        self
    }

    /// 建構器模式：設置胚布單價
    pub fn with_grey_fabric_rate(mut self, rate: Decimal) -> Self {
        self.grey_fabric_rate = Some(rate);
        self
    }

    /// 依欄位名稱取得可寫入的欄位
    pub fn slot_mut(&mut self, field: &str) -> Option<&mut Option<Decimal>> {
        match field {
            "rate_warp" => Some(&mut self.rate_warp),
            "rate_weft" => Some(&mut self.rate_weft),
            "conv_charges_per_pick" => Some(&mut self.conv_charges_per_pick),
            "deduction_per_meter" => Some(&mut self.deduction_per_meter),
            "grey_fabric_rate" => Some(&mut self.grey_fabric_rate),
            _ => None,
        }
    }
}
