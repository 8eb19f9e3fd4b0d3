//! # Textile Core
//!
//! 織造計算核心資料模型與類型定義

pub mod arith;
pub mod config;
pub mod construction;
pub mod costing;
pub mod input;
pub mod quality;
pub mod reconciliation;
pub mod rounding;
pub mod sizing;
pub mod units;

use std::fmt;

use serde::{Deserialize, Serialize};

// Re-export 主要類型
pub use config::CostingConfig;
pub use construction::{ConstructionSpec, RateSpec};
pub use costing::CostingInput;
pub use input::FieldInput;
pub use quality::{NoQualities, Quality, QualityCatalog, QualityLookup};
pub use reconciliation::ReturnInput;
pub use rounding::RoundingPolicy;
pub use sizing::SizingSpec;

/// 記錄模式（對應四個使用計算引擎的畫面）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordMode {
    /// 合約建立
    Contract,
    /// 快速成本估算
    Costing,
    /// 整經/上漿收發
    Sizing,
    /// 回收單對帳
    Return,
}

impl RecordMode {
    /// 模式標籤（JSON `mode` 欄位值）
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordMode::Contract => "contract",
            RecordMode::Costing => "costing",
            RecordMode::Sizing => "sizing",
            RecordMode::Return => "return",
        }
    }

    /// 由標籤解析模式
    pub fn parse(tag: &str) -> Result<Self> {
        match tag {
            "contract" => Ok(RecordMode::Contract),
            "costing" => Ok(RecordMode::Costing),
            "sizing" => Ok(RecordMode::Sizing),
            "return" => Ok(RecordMode::Return),
            other => Err(CalcError::UnknownMode(other.to_string())),
        }
    }
}

impl fmt::Display for RecordMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 計算錯誤類型
///
/// 公式本身不會失敗；錯誤只出現在輸入邊界。
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CalcError {
    #[error("無效的數值輸入 {field}: {value:?}")]
    InvalidInput { field: String, value: String },

    #[error("{mode} 記錄沒有欄位: {field}")]
    UnknownField { mode: RecordMode, field: String },

    #[error("欄位由計算引擎推導，不可直接寫入: {0}")]
    DerivedField(String),

    #[error("未知的記錄模式: {0}")]
    UnknownMode(String),

    #[error("序列化錯誤: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for CalcError {
    fn from(err: serde_json::Error) -> Self {
        CalcError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CalcError>;
