//! 計算記錄
//!
//! 每種記錄由獨立輸入與推導欄位組成。推導欄位只由計算引擎寫入：
//! 反序列化時忽略外部傳入的推導值，也沒有依名稱寫入的方法。

use serde::{Deserialize, Serialize};
use textile_core::{
    CalcError, ConstructionSpec, CostingInput, FieldInput, RateSpec, RecordMode, Result,
    ReturnInput, SizingSpec,
};

use crate::contract::DerivedQuantities;
use crate::costing::CostingEstimate;
use crate::reconciliation::ReturnDerived;
use crate::sizing::SizingDerived;

/// 合約記錄
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "ContractInputs")]
pub struct ContractRecord {
    /// 織物規格
    #[serde(flatten)]
    pub spec: ConstructionSpec,

    /// 單價與加工費
    #[serde(flatten)]
    pub rates: RateSpec,

    #[serde(flatten)]
    pub(crate) derived: DerivedQuantities,
}

/// 合約記錄的可反序列化部分
#[derive(Deserialize)]
struct ContractInputs {
    #[serde(flatten)]
    spec: ConstructionSpec,
    #[serde(flatten)]
    rates: RateSpec,
}

impl From<ContractInputs> for ContractRecord {
    fn from(inputs: ContractInputs) -> Self {
        Self::new(inputs.spec, inputs.rates)
    }
}

impl ContractRecord {
    /// 創建合約記錄（推導欄位待計算）
    pub fn new(spec: ConstructionSpec, rates: RateSpec) -> Self {
        Self {
            spec,
            rates,
            derived: DerivedQuantities::default(),
        }
    }

    /// 推導欄位
    pub fn derived(&self) -> &DerivedQuantities {
        &self.derived
    }

    fn apply_edit(&mut self, field: &str, input: &FieldInput) -> Result<()> {
        let slot = match self.spec.slot_mut(field) {
            Some(slot) => Some(slot),
            None => self.rates.slot_mut(field),
        };
        match slot {
            Some(slot) => {
                *slot = input.to_numeric(field)?;
                Ok(())
            }
            None => Err(rejected_field(RecordMode::Contract, field, DerivedQuantities::FIELDS)),
        }
    }
}

/// 快速成本估算記錄
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "CostingInput")]
pub struct CostingRecord {
    /// 估算輸入
    #[serde(flatten)]
    pub input: CostingInput,

    #[serde(flatten)]
    pub(crate) estimate: CostingEstimate,
}

impl From<CostingInput> for CostingRecord {
    fn from(input: CostingInput) -> Self {
        Self::new(input)
    }
}

impl CostingRecord {
    /// 創建估算記錄
    pub fn new(input: CostingInput) -> Self {
        Self {
            input,
            estimate: CostingEstimate::default(),
        }
    }

    /// 估算結果
    pub fn estimate(&self) -> &CostingEstimate {
        &self.estimate
    }

    fn apply_edit(&mut self, field: &str, input: &FieldInput) -> Result<()> {
        match self.input.slot_mut(field) {
            Some(slot) => {
                *slot = input.to_numeric(field)?;
                Ok(())
            }
            None => Err(rejected_field(RecordMode::Costing, field, CostingEstimate::FIELDS)),
        }
    }
}

/// 整經/上漿收發記錄
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "SizingSpec")]
pub struct SizingRecord {
    /// 收發輸入
    #[serde(flatten)]
    pub spec: SizingSpec,

    #[serde(flatten)]
    pub(crate) derived: SizingDerived,
}

impl From<SizingSpec> for SizingRecord {
    fn from(spec: SizingSpec) -> Self {
        Self::new(spec)
    }
}

impl SizingRecord {
    /// 創建收發記錄
    pub fn new(spec: SizingSpec) -> Self {
        Self {
            spec,
            derived: SizingDerived::default(),
        }
    }

    /// 推導欄位
    pub fn derived(&self) -> &SizingDerived {
        &self.derived
    }

    fn apply_edit(&mut self, field: &str, input: &FieldInput) -> Result<()> {
        if field == SizingSpec::QUALITY_FIELD {
            self.spec.quality_id = input.to_text();
            return Ok(());
        }
        match self.spec.slot_mut(field) {
            Some(slot) => {
                *slot = input.to_numeric(field)?;
                Ok(())
            }
            None => Err(rejected_field(RecordMode::Sizing, field, SizingDerived::FIELDS)),
        }
    }
}

/// 回收單記錄
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "ReturnInput")]
pub struct ReturnRecord {
    /// 回收數量與計劃總量
    #[serde(flatten)]
    pub input: ReturnInput,

    #[serde(flatten)]
    pub(crate) derived: ReturnDerived,
}

impl From<ReturnInput> for ReturnRecord {
    fn from(input: ReturnInput) -> Self {
        Self::new(input)
    }
}

impl ReturnRecord {
    /// 創建回收單記錄
    pub fn new(input: ReturnInput) -> Self {
        Self {
            input,
            derived: ReturnDerived::default(),
        }
    }

    /// 推導欄位
    pub fn derived(&self) -> &ReturnDerived {
        &self.derived
    }

    fn apply_edit(&mut self, field: &str, input: &FieldInput) -> Result<()> {
        match self.input.slot_mut(field) {
            Some(slot) => {
                *slot = input.to_numeric(field)?;
                Ok(())
            }
            None => Err(rejected_field(RecordMode::Return, field, ReturnDerived::FIELDS)),
        }
    }
}

/// 任一模式的記錄（JSON 以 `mode` 欄位區分）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Record {
    Contract(ContractRecord),
    Costing(CostingRecord),
    Sizing(SizingRecord),
    Return(ReturnRecord),
}

impl Record {
    /// 表單開啟時的空白記錄
    pub fn empty(mode: RecordMode) -> Self {
        match mode {
            RecordMode::Contract => Record::Contract(ContractRecord::default()),
            RecordMode::Costing => Record::Costing(CostingRecord::default()),
            RecordMode::Sizing => Record::Sizing(SizingRecord::default()),
            RecordMode::Return => Record::Return(ReturnRecord::default()),
        }
    }

    /// 記錄模式
    pub fn mode(&self) -> RecordMode {
        match self {
            Record::Contract(_) => RecordMode::Contract,
            Record::Costing(_) => RecordMode::Costing,
            Record::Sizing(_) => RecordMode::Sizing,
            Record::Return(_) => RecordMode::Return,
        }
    }

    /// 寫入一個輸入欄位（不重新計算）
    ///
    /// 驗證失敗時記錄保持不變。
    pub(crate) fn apply_edit(&mut self, field: &str, input: &FieldInput) -> Result<()> {
        match self {
            Record::Contract(r) => r.apply_edit(field, input),
            Record::Costing(r) => r.apply_edit(field, input),
            Record::Sizing(r) => r.apply_edit(field, input),
            Record::Return(r) => r.apply_edit(field, input),
        }
    }

    pub fn as_contract(&self) -> Option<&ContractRecord> {
        match self {
            Record::Contract(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_costing(&self) -> Option<&CostingRecord> {
        match self {
            Record::Costing(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_sizing(&self) -> Option<&SizingRecord> {
        match self {
            Record::Sizing(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_return(&self) -> Option<&ReturnRecord> {
        match self {
            Record::Return(r) => Some(r),
            _ => None,
        }
    }
}

impl From<ContractRecord> for Record {
    fn from(record: ContractRecord) -> Self {
        Record::Contract(record)
    }
}

impl From<CostingRecord> for Record {
    fn from(record: CostingRecord) -> Self {
        Record::Costing(record)
    }
}

impl From<SizingRecord> for Record {
    fn from(record: SizingRecord) -> Self {
        Record::Sizing(record)
    }
}

impl From<ReturnRecord> for Record {
    fn from(record: ReturnRecord) -> Self {
        Record::Return(record)
    }
}

fn rejected_field(mode: RecordMode, field: &str, derived_fields: &[&str]) -> CalcError {
    if derived_fields.contains(&field) {
        CalcError::DerivedField(field.to_string())
    } else {
        CalcError::UnknownField {
            mode,
            field: field.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use serde_json::json;

    #[test]
    fn test_apply_edit_writes_input_field() {
        let mut record = Record::empty(RecordMode::Contract);
        record.apply_edit("reed", &FieldInput::text("64")).unwrap();

        assert_eq!(record.as_contract().unwrap().spec.reed, Some(Decimal::from(64)));
    }

    #[test]
    fn test_derived_field_has_no_setter() {
        let mut record = Record::empty(RecordMode::Contract);
        let err = record
            .apply_edit("total_bags_required", &FieldInput::text("5"))
            .unwrap_err();

        assert_eq!(err, CalcError::DerivedField("total_bags_required".to_string()));
    }

    #[test]
    fn test_unknown_field() {
        let mut record = Record::empty(RecordMode::Return);
        let err = record.apply_edit("invoice_no", &FieldInput::text("7")).unwrap_err();

        assert_eq!(
            err,
            CalcError::UnknownField {
                mode: RecordMode::Return,
                field: "invoice_no".to_string(),
            }
        );
    }

    #[test]
    fn test_quality_id_is_text() {
        let mut record = Record::empty(RecordMode::Sizing);
        record.apply_edit("quality_id", &FieldInput::text("Q-64X60")).unwrap();
        assert_eq!(
            record.as_sizing().unwrap().spec.quality_id.as_deref(),
            Some("Q-64X60")
        );

        record.apply_edit("quality_id", &FieldInput::Clear).unwrap();
        assert_eq!(record.as_sizing().unwrap().spec.quality_id, None);
    }

    #[test]
    fn test_deserialize_discards_external_derived_values() {
        let record: Record = serde_json::from_value(json!({
            "mode": "contract",
            "reed": "100",
            "width": 60,
            "total_bags_required": "999",
        }))
        .unwrap();

        let contract = record.as_contract().unwrap();
        assert_eq!(contract.spec.reed, Some(Decimal::from(100)));
        assert_eq!(contract.spec.width, Some(Decimal::from(60)));
        assert_eq!(contract.derived().total_bags_required(), Decimal::ZERO);
    }

    #[test]
    fn test_serialize_is_flat_with_mode_tag() {
        let input = ReturnInput::for_planned_total(Decimal::from(100));
        let record = Record::from(ReturnRecord::new(input));
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["mode"], "return");
        assert_eq!(json["planned_total"], "100");
        assert_eq!(json["percent"], "");
    }
}
