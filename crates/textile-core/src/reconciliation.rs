//! 回收單（Return PO）對帳輸入

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::input::deserialize_lenient;

/// 回收數量與原計劃數量
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReturnInput {
    /// 正品
    #[serde(
        default,
        deserialize_with = "deserialize_lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub fresh: Option<Decimal>,

    /// B/G 品
    #[serde(
        default,
        deserialize_with = "deserialize_lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub bg: Option<Decimal>,

    /// C/P 品
    #[serde(
        default,
        deserialize_with = "deserialize_lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub cp: Option<Decimal>,

    /// 原訂單計劃總量（由來源訂單帶入）
    #[serde(
        default,
        deserialize_with = "deserialize_lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub planned_total: Option<Decimal>,
}

impl ReturnInput {
    /// 可編輯欄位
    pub const FIELDS: &'static [&'static str] = &["fresh", "bg", "cp", "planned_total"];

    /// 以來源訂單的計劃總量建立回收單
    pub fn for_planned_total(planned_total: Decimal) -> Self {
        Self {
            planned_total: Some(planned_total),
            ..Self::default()
        }
    }

    /// 建構器模式：設置回收數量
    pub fn with_returned(mut self, fresh: Decimal, bg: Decimal, cp: Decimal) -> Self {
        self.fresh = Some(fresh);
        self.bg = Some(bg);
        self.cp = Some(cp);
        self
    }

    /// 依欄位名稱取得可寫入的欄位
    pub fn slot_mut(&mut self, field: &str) -> Option<&mut Option<Decimal>> {
        match field {
            "fresh" => Some(&mut self.fresh),
            "bg" => Some(&mut self.bg),
            "cp" => Some(&mut self.cp),
            "planned_total" => Some(&mut self.planned_total),
            _ => None,
        }
    }
}
