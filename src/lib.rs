//! # Textile
//!
//! 織造推導數量計算引擎的統一入口：
//! 合約紗重/袋數/金額、快速成本估算、整經上漿重量與回收單對帳。

pub use textile_calc;
pub use textile_core;

pub use textile_calc::{
    BagCalculator, ContractRecord, CostingEstimate, CostingEstimator, CostingRecord,
    DerivedQuantities, Draft, RecalculationEngine, ReconciliationCalculator, Record, ReturnDerived,
    ReturnRecord, SizingCalculator, SizingConstruction, SizingDerived, SizingRecord,
    ValueCalculator, WeightCalculator,
};
pub use textile_core::{
    units, CalcError, ConstructionSpec, CostingConfig, CostingInput, FieldInput, NoQualities,
    Quality, QualityCatalog, QualityLookup, RateSpec, RecordMode, Result, ReturnInput,
    RoundingPolicy, SizingSpec,
};
