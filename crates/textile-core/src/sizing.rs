//! 整經/上漿收發模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::input::deserialize_lenient;

/// 整經/上漿收發的輸入
///
/// 同時承載紗線收發的袋數與單價，兩者一起寫入庫存記錄。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SizingSpec {
    /// 引用的品質代號；設定時以品質主檔的規格計算經緯重量
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality_id: Option<String>,

    /// 筘數
    #[serde(
        default,
        alias = "read",
        deserialize_with = "deserialize_lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub reed: Option<Decimal>,

    /// 緯密
    #[serde(
        default,
        deserialize_with = "deserialize_lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub pick: Option<Decimal>,

    /// 整經幅寬參數（G5，與合約幅寬分開）
    #[serde(
        default,
        deserialize_with = "deserialize_lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub g5: Option<Decimal>,

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

    /// 經軸頭份數
    #[serde(
        default,
        deserialize_with = "deserialize_lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub wires: Option<Decimal>,

    /// 每組整經長度
    #[serde(
        default,
        deserialize_with = "deserialize_lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub length_set: Option<Decimal>,

    /// 整經用經紗支數
    #[serde(
        default,
        deserialize_with = "deserialize_lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub yarn_count_warp: Option<Decimal>,

    /// 袋數
    #[serde(
        default,
        deserialize_with = "deserialize_lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub qty_bag: Option<Decimal>,

    /// 筒子數
    #[serde(
        default,
        deserialize_with = "deserialize_lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub kones: Option<Decimal>,

    /// 紗管重量
    #[serde(
        default,
        deserialize_with = "deserialize_lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub qty_gulle: Option<Decimal>,

    /// 紙管重量
    #[serde(
        default,
        deserialize_with = "deserialize_lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub qty_paper: Option<Decimal>,

    /// 回絲損耗
    #[serde(
        default,
        deserialize_with = "deserialize_lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub gole_waste: Option<Decimal>,

    /// 經紗滌綸比例
    #[serde(
        default,
        deserialize_with = "deserialize_lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub warp_poly: Option<Decimal>,

    /// 緯紗滌綸比例
    #[serde(
        default,
        deserialize_with = "deserialize_lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub weft_poly: Option<Decimal>,

    /// 經紗棉比例
    #[serde(
        default,
        deserialize_with = "deserialize_lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub warp_cotton: Option<Decimal>,

    /// 緯紗棉比例
    #[serde(
        default,
        deserialize_with = "deserialize_lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub weft_cotton: Option<Decimal>,

    /// 上漿單價（每公斤）
    #[serde(
        default,
        deserialize_with = "deserialize_lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub rate: Option<Decimal>,

    /// 經紗收發袋數
    #[serde(
        default,
        deserialize_with = "deserialize_lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub warp_bags_quantity: Option<Decimal>,

    /// 經紗每袋單價
    #[serde(
        default,
        deserialize_with = "deserialize_lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub warp_rate: Option<Decimal>,

    /// 緯紗收發袋數
    #[serde(
        default,
        deserialize_with = "deserialize_lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub weft_bags_quantity: Option<Decimal>,

    /// 緯紗每袋單價
    #[serde(
        default,
        deserialize_with = "deserialize_lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub weft_rate: Option<Decimal>,
}

impl SizingSpec {
    /// 可編輯的數值欄位
    pub const FIELDS: &'static [&'static str] = &[
        "reed",
        "pick",
        "g5",
        "warp",
        "weft",
        "wires",
        "length_set",
        "yarn_count_warp",
        "qty_bag",
        "kones",
        "qty_gulle",
        "qty_paper",
        "gole_waste",
        "warp_poly",
        "weft_poly",
        "warp_cotton",
        "weft_cotton",
        "rate",
        "warp_bags_quantity",
        "warp_rate",
        "weft_bags_quantity",
        "weft_rate",
    ];

    /// 品質代號欄位
    pub const QUALITY_FIELD: &'static str = "quality_id";

    /// 創建空白記錄
    pub fn new() -> Self {
        Self::default()
    }

    /// 建構器模式：引用品質主檔
    pub fn with_quality_id(mut self, quality_id: impl Into<String>) -> Self {
        self.quality_id = Some(quality_id.into());
        self
    }

    /// 建構器模式：設置整經參數
    pub fn with_warping(
        mut self,
        wires: Decimal,
        length_set: Decimal,
        yarn_count_warp: Decimal,
    ) -> Self {
        self.wires = Some(wires);
        self.length_set = Some(length_set);
        self.yarn_count_warp = Some(yarn_count_warp);
        self
    }

    /// 建構器模式：設置上漿單價
    pub fn with_rate(mut self, rate: Decimal) -> Self {
        self.rate = Some(rate);
        self
    }

    /// 依欄位名稱取得可寫入的數值欄位
    pub fn slot_mut(&mut self, field: &str) -> Option<&mut Option<Decimal>> {
        match field {
            "reed" | "read" => Some(&mut self.reed),
            "pick" => Some(&mut self.pick),
            "g5" => Some(&mut self.g5),
            "warp" => Some(&mut self.warp),
            "weft" => Some(&mut self.weft),
            "wires" => Some(&mut self.wires),
            "length_set" => Some(&mut self.length_set),
            "yarn_count_warp" => Some(&mut self.yarn_count_warp),
            "qty_bag" => Some(&mut self.qty_bag),
            "kones" => Some(&mut self.kones),
            "qty_gulle" => Some(&mut self.qty_gulle),
            "qty_paper" => Some(&mut self.qty_paper),
            "gole_waste" => Some(&mut self.gole_waste),
            "warp_poly" => Some(&mut self.warp_poly),
            "weft_poly" => Some(&mut self.weft_poly),
            "warp_cotton" => Some(&mut self.warp_cotton),
            "weft_cotton" => Some(&mut self.weft_cotton),
            "rate" => Some(&mut self.rate),
            "warp_bags_quantity" => Some(&mut self.warp_bags_quantity),
            "warp_rate" => Some(&mut self.warp_rate),
            "weft_bags_quantity" => Some(&mut self.weft_bags_quantity),
            "weft_rate" => Some(&mut self.weft_rate),
            _ => None,
        }
    }
}
