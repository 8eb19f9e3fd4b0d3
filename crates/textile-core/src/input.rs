//! 輸入邊界
//!
//! 使用者在數值欄位中每按一次鍵就送出一次編輯。
//! 不符合數值格式的文字在此被拒絕，記錄維持原值，不會進入公式。

use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::{CalcError, Result};

/// 允許的數值文字：整數、小數、尾端小數點、前導小數點，或空字串
static NUMERIC_TEXT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9]+(\.[0-9]*)?|\.[0-9]+)?$").expect("numeric pattern is valid"));

/// 原始欄位編輯
#[derive(Debug, Clone, PartialEq)]
pub enum FieldInput {
    /// 表單文字
    Text(String),
    /// 數值（已是數字型別的輸入）
    Number(Decimal),
    /// 清除欄位
    Clear,
}

impl FieldInput {
    /// 建立文字輸入
    pub fn text(raw: impl Into<String>) -> Self {
        FieldInput::Text(raw.into())
    }

    /// 由 JSON 值建立輸入
    pub fn from_json(field: &str, value: &Value) -> Result<Self> {
        match value {
            Value::Null => Ok(FieldInput::Clear),
            Value::String(s) => Ok(FieldInput::Text(s.clone())),
            Value::Number(n) => number_to_decimal(n)
                .map(FieldInput::Number)
                .ok_or_else(|| invalid(field, &n.to_string())),
            other => Err(invalid(field, &other.to_string())),
        }
    }

    /// 解析為數值欄位的新值（`None` 表示欄位清空）
    pub fn to_numeric(&self, field: &str) -> Result<Option<Decimal>> {
        match self {
            FieldInput::Clear => Ok(None),
            FieldInput::Number(n) => Ok(Some(*n)),
            FieldInput::Text(raw) => parse_text(field, raw),
        }
    }

    /// 解析為文字欄位的新值（空白視為清空）
    pub fn to_text(&self) -> Option<String> {
        match self {
            FieldInput::Clear => None,
            FieldInput::Number(n) => Some(n.to_string()),
            FieldInput::Text(raw) => {
                let trimmed = raw.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.to_string())
                }
            }
        }
    }
}

impl From<Decimal> for FieldInput {
    fn from(value: Decimal) -> Self {
        FieldInput::Number(value)
    }
}

impl From<&str> for FieldInput {
    fn from(raw: &str) -> Self {
        FieldInput::text(raw)
    }
}

/// 驗證並解析表單文字
pub fn parse_text(field: &str, raw: &str) -> Result<Option<Decimal>> {
    if !NUMERIC_TEXT.is_match(raw) {
        return Err(invalid(field, raw));
    }
    if raw.is_empty() {
        return Ok(None);
    }

    let normalized = normalize(raw);
    Decimal::from_str(&normalized)
        .map(Some)
        .map_err(|_| invalid(field, raw))
}

/// 寬鬆解析：無法解析時回傳 `None`（由呼叫端視為 0）
pub fn parse_lenient(raw: &str) -> Option<Decimal> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    Decimal::from_str(trimmed)
        .ok()
        .or_else(|| Decimal::from_scientific(trimmed).ok())
        .or_else(|| parse_text("", trimmed).ok().flatten())
}

/// 寬鬆解析 JSON 值
pub fn lenient_decimal(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => number_to_decimal(n),
        Value::String(s) => parse_lenient(s),
        _ => None,
    }
}

/// serde 欄位反序列化：接受數字、數字字串或 null，其他內容視為缺值
pub fn deserialize_lenient<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(lenient_decimal))
}

fn number_to_decimal(n: &serde_json::Number) -> Option<Decimal> {
    if let Some(i) = n.as_i64() {
        return Some(Decimal::from(i));
    }
    if let Some(u) = n.as_u64() {
        return Some(Decimal::from(u));
    }
    let repr = n.to_string();
    Decimal::from_str(&repr)
        .ok()
        .or_else(|| Decimal::from_scientific(&repr).ok())
}

/// `".5"` → `"0.5"`，`"12."` → `"12"`
fn normalize(raw: &str) -> String {
    let trimmed = raw.strip_suffix('.').unwrap_or(raw);
    if trimmed.starts_with('.') {
        format!("0{}", trimmed)
    } else {
        trimmed.to_string()
    }
}

fn invalid(field: &str, raw: &str) -> CalcError {
    CalcError::InvalidInput {
        field: field.to_string(),
        value: raw.to_string(),
    }
}
