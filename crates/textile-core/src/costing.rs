//! 快速成本估算輸入

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::input::deserialize_lenient;

/// 粗估畫面的輸入（不綁定合約、不保存）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CostingInput {
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

    /// 需求米數
    #[serde(
        default,
        deserialize_with = "deserialize_lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub required_meters: Option<Decimal>,
}

impl CostingInput {
    /// 可編輯欄位
    pub const FIELDS: &'static [&'static str] = &["reed", "pick", "required_meters"];

    /// 創建估算輸入
    pub fn new(reed: Decimal, pick: Decimal, required_meters: Decimal) -> Self {
        Self {
            reed: Some(reed),
            pick: Some(pick),
            required_meters: Some(required_meters),
        }
    }

    /// 依欄位名稱取得可寫入的欄位
    pub fn slot_mut(&mut self, field: &str) -> Option<&mut Option<Decimal>> {
        match field {
            "reed" | "read" => Some(&mut self.reed),
            "pick" => Some(&mut self.pick),
            "required_meters" => Some(&mut self.required_meters),
            _ => None,
        }
    }
}
