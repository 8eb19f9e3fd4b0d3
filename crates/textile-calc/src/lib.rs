//! # Textile Calculation Engine
//!
//! 織造推導數量計算引擎：紗重、袋數、金額、整經重量與回收對帳

pub mod bags;
pub mod contract;
pub mod costing;
pub mod draft;
pub mod engine;
mod pipeline;
pub mod reconciliation;
pub mod record;
pub mod sizing;
pub mod value;
pub mod weight;

// Re-export 主要類型
pub use bags::BagCalculator;
pub use contract::DerivedQuantities;
pub use costing::{CostingEstimate, CostingEstimator};
pub use draft::Draft;
pub use engine::RecalculationEngine;
pub use reconciliation::{ReconciliationCalculator, ReturnDerived};
pub use record::{ContractRecord, CostingRecord, Record, ReturnRecord, SizingRecord};
pub use sizing::{SizingCalculator, SizingConstruction, SizingDerived};
pub use value::ValueCalculator;
pub use weight::WeightCalculator;
