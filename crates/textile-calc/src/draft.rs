//! 表單草稿
//!
//! 持有最近一次的完整記錄（閒置狀態）；每次編輯同步重算後整筆替換。

use textile_core::{FieldInput, QualityLookup, RecordMode, Result};

use crate::engine::RecalculationEngine;
use crate::record::Record;

/// 表單草稿
pub struct Draft<'e, Q> {
    engine: &'e RecalculationEngine<Q>,
    current: Record,
}

impl<'e, Q: QualityLookup> Draft<'e, Q> {
    /// 開啟空白表單
    pub fn open(engine: &'e RecalculationEngine<Q>, mode: RecordMode) -> Self {
        let current = engine.recompute(&Record::empty(mode));
        Self { engine, current }
    }

    /// 以既有記錄開啟表單
    pub fn from_record(engine: &'e RecalculationEngine<Q>, record: &Record) -> Self {
        Self {
            engine,
            current: engine.recompute(record),
        }
    }

    /// 編輯一個欄位
    ///
    /// 輸入被拒絕時草稿維持原樣。
    pub fn edit(&mut self, field: &str, input: impl Into<FieldInput>) -> Result<&Record> {
        self.current = self.engine.set_field(&self.current, field, input)?;
        Ok(&self.current)
    }

    /// 目前記錄
    pub fn record(&self) -> &Record {
        &self.current
    }

    /// 送出：交出整筆記錄給保存層
    pub fn submit(self) -> Record {
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;
    use textile_core::CalcError;

    #[test]
    fn test_draft_keeps_previous_value_on_rejection() {
        let engine = RecalculationEngine::new();
        let mut draft = Draft::open(&engine, RecordMode::Contract);

        draft.edit("reed", "100").unwrap();
        draft.edit("width", "60").unwrap();
        let before = draft.record().clone();

        let err = draft.edit("width", "6o").unwrap_err();

        assert!(matches!(err, CalcError::InvalidInput { .. }));
        assert_eq!(draft.record(), &before);
    }

    #[test]
    fn test_draft_open_is_fully_derived() {
        let engine = RecalculationEngine::new();
        let draft = Draft::open(&engine, RecordMode::Return);

        let record = draft.submit();
        let derived = record.as_return().unwrap().derived();
        assert_eq!(derived.total().to_string(), "0.0000");
        assert_eq!(derived.percent(), None);
    }

    #[test]
    fn test_draft_edit_sequence() {
        let engine = RecalculationEngine::new();
        let mut draft = Draft::open(&engine, RecordMode::Costing);

        draft.edit("reed", "64").unwrap();
        draft.edit("pick", "60").unwrap();
        let record = draft.edit("required_meters", "1000").unwrap();

        let estimate = record.as_costing().unwrap().estimate();
        assert_eq!(estimate.estimated_cost(), Decimal::from_str("308").unwrap());
    }

    #[test]
    fn test_draft_from_saved_record_recomputes() {
        let engine = RecalculationEngine::new();
        let saved: Record = serde_json::from_value(serde_json::json!({
            "mode": "return",
            "fresh": "980",
            "planned_total": "1000",
            "total": "12345",
        }))
        .unwrap();

        let mut draft = Draft::from_record(&engine, &saved);
        assert_eq!(draft.record().as_return().unwrap().derived().total().to_string(), "980.0000");

        let record = draft.edit("bg", "20").unwrap();
        let derived = record.as_return().unwrap().derived();
        assert_eq!(derived.gl().to_string(), "0.0000");
        assert_eq!(derived.percent().map(|p| p.to_string()), Some("0.00".to_string()));
    }
}
