//! 重新計算引擎
//!
//! 不保存任何狀態：輸入一筆記錄，回傳全部推導欄位已更新的新記錄。
//! 每次呼叫都重算該模式的完整公式鏈，不做增量追蹤。

use rayon::prelude::*;
use serde_json::Value;
use textile_core::{
    CalcError, CostingConfig, FieldInput, NoQualities, QualityLookup, RecordMode, Result,
};

use crate::contract::CONTRACT_PIPELINE;
use crate::costing::COSTING_PIPELINE;
use crate::pipeline;
use crate::reconciliation::RETURN_PIPELINE;
use crate::record::{ContractRecord, CostingRecord, Record, ReturnRecord, SizingRecord};
use crate::sizing::{SizingCalculator, SIZING_PIPELINE};

/// 重新計算引擎
pub struct RecalculationEngine<Q = NoQualities> {
    /// 品質主檔查詢（唯讀）
    qualities: Q,

    /// 粗估參數
    costing: CostingConfig,
}

impl RecalculationEngine<NoQualities> {
    /// 創建不連接品質主檔的引擎
    pub fn new() -> Self {
        Self::with_qualities(NoQualities)
    }
}

impl Default for RecalculationEngine<NoQualities> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Q: QualityLookup> RecalculationEngine<Q> {
    /// 創建連接品質主檔的引擎
    pub fn with_qualities(qualities: Q) -> Self {
        Self {
            qualities,
            costing: CostingConfig::default(),
        }
    }

    /// 建構器模式：設置粗估參數
    pub fn with_costing_config(mut self, config: CostingConfig) -> Self {
        self.costing = config;
        self
    }

    /// 粗估參數
    pub fn costing_config(&self) -> &CostingConfig {
        &self.costing
    }

    /// 品質主檔查詢
    pub fn qualities(&self) -> &Q {
        &self.qualities
    }

    /// 重新計算記錄的全部推導欄位
    pub fn recompute(&self, record: &Record) -> Record {
        let mut next = record.clone();
        self.recompute_in_place(&mut next);
        next
    }

    /// 寫入一個欄位並重新計算
    ///
    /// 輸入不合法時回傳錯誤，原記錄不受影響（呼叫端保留舊值）。
    pub fn set_field(
        &self,
        record: &Record,
        field: &str,
        input: impl Into<FieldInput>,
    ) -> Result<Record> {
        let input = input.into();
        let mut next = record.clone();

        if let Err(err) = next.apply_edit(field, &input) {
            tracing::warn!("拒絕 {} 記錄的欄位編輯 {}: {}", record.mode(), field, err);
            return Err(err);
        }

        tracing::debug!("{} 記錄欄位 {} 已更新", record.mode(), field);
        self.recompute_in_place(&mut next);
        Ok(next)
    }

    /// 合約記錄
    pub fn recompute_contract(&self, record: &ContractRecord) -> ContractRecord {
        let mut next = record.clone();
        pipeline::run(CONTRACT_PIPELINE, &mut next, &());
        next
    }

    /// 快速成本估算記錄
    pub fn recompute_costing(&self, record: &CostingRecord) -> CostingRecord {
        let mut next = record.clone();
        pipeline::run(COSTING_PIPELINE, &mut next, &self.costing);
        next
    }

    /// 整經/上漿收發記錄
    pub fn recompute_sizing(&self, record: &SizingRecord) -> SizingRecord {
        let mut next = record.clone();
        let construction = SizingCalculator::resolve(&next.spec, &self.qualities);
        pipeline::run(SIZING_PIPELINE, &mut next, &construction);
        next
    }

    /// 回收單記錄
    pub fn recompute_return(&self, record: &ReturnRecord) -> ReturnRecord {
        let mut next = record.clone();
        pipeline::run(RETURN_PIPELINE, &mut next, &());
        next
    }

    /// JSON 邊界：輸入鍵值記錄，回傳推導欄位已填入的記錄
    pub fn recompute_json(&self, value: &Value) -> Result<Value> {
        let record = Self::record_from_json(value)?;
        Ok(serde_json::to_value(self.recompute(&record))?)
    }

    /// JSON 邊界：寫入一個欄位並重新計算
    pub fn set_field_json(&self, value: &Value, field: &str, raw: &Value) -> Result<Value> {
        let record = Self::record_from_json(value)?;
        let input = FieldInput::from_json(field, raw)?;
        let next = self.set_field(&record, field, input)?;
        Ok(serde_json::to_value(next)?)
    }

    fn recompute_in_place(&self, record: &mut Record) {
        tracing::debug!("重新計算 {} 記錄", record.mode());
        match record {
            Record::Contract(r) => pipeline::run(CONTRACT_PIPELINE, r, &()),
            Record::Costing(r) => pipeline::run(COSTING_PIPELINE, r, &self.costing),
            Record::Sizing(r) => {
                let construction = SizingCalculator::resolve(&r.spec, &self.qualities);
                pipeline::run(SIZING_PIPELINE, r, &construction);
            }
            Record::Return(r) => pipeline::run(RETURN_PIPELINE, r, &()),
        }
    }

    fn record_from_json(value: &Value) -> Result<Record> {
        let tag = value
            .get("mode")
            .and_then(Value::as_str)
            .ok_or_else(|| CalcError::UnknownMode(String::new()))?;
        RecordMode::parse(tag)?;
        Ok(serde_json::from_value(value.clone())?)
    }
}

impl<Q: QualityLookup + Sync> RecalculationEngine<Q> {
    /// 批次重新計算已保存的記錄（保持原順序）
    pub fn recompute_batch(&self, records: &[Record]) -> Vec<Record> {
        let start_time = std::time::Instant::now();
        let results: Vec<Record> = records.par_iter().map(|r| self.recompute(r)).collect();
        tracing::info!(
            "批次重新計算完成：{} 筆，耗時 {:?}",
            results.len(),
            start_time.elapsed()
        );
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal::Decimal;
    use serde_json::json;
    use std::str::FromStr;
    use textile_core::{
        ConstructionSpec, CostingInput, Quality, QualityCatalog, RateSpec, ReturnInput,
        RoundingPolicy, SizingSpec,
    };

    fn d(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_set_field_recomputes() {
        let engine = RecalculationEngine::new();
        let record = Record::empty(RecordMode::Contract);

        let record = engine.set_field(&record, "reed", "100").unwrap();
        let record = engine.set_field(&record, "width", "60").unwrap();
        let record = engine.set_field(&record, "warp", "40").unwrap();

        let contract = record.as_contract().unwrap();
        assert_eq!(contract.derived().weight_per_meter_warp(), d("0.2051"));
    }

    #[test]
    fn test_rejected_edit_leaves_record_unchanged() {
        let engine = RecalculationEngine::new();
        let record = engine
            .set_field(&Record::empty(RecordMode::Contract), "reed", "12.34")
            .unwrap();

        let err = engine.set_field(&record, "reed", "12.3.4").unwrap_err();

        assert!(matches!(err, CalcError::InvalidInput { .. }));
        assert_eq!(record.as_contract().unwrap().spec.reed, Some(d("12.34")));
    }

    #[test]
    fn test_sizing_uses_quality_lookup() {
        let catalog = QualityCatalog::new().with_quality(
            Quality::new("Q-1")
                .with_density(d("64"), d("60"))
                .with_g5(d("63"))
                .with_counts(d("30"), d("30")),
        );
        let engine = RecalculationEngine::with_qualities(&catalog);
        assert!(engine.qualities().find_quality_by_id("Q-1").is_some());
        let record = Record::from(SizingRecord::new(SizingSpec::new().with_quality_id("Q-1")));

        let sizing = engine.recompute(&record);
        let derived = sizing.as_sizing().unwrap().derived();
        assert_eq!(derived.weight_per_meter_warp_sizing(), d("0.1837"));

        let missing = engine
            .set_field(&record, "quality_id", "Q-404")
            .unwrap();
        let derived = missing.as_sizing().unwrap().derived();
        assert_eq!(derived.weight_per_meter_warp_sizing(), Decimal::ZERO);
        assert_eq!(derived.total_warp_weft(), Decimal::ZERO);
    }

    #[test]
    fn test_recompute_json() {
        let engine = RecalculationEngine::new();
        let output = engine
            .recompute_json(&json!({
                "mode": "return",
                "fresh": "950",
                "bg": 30,
                "cp": "10",
                "planned_total": "1000",
            }))
            .unwrap();

        assert_eq!(output["total"], "990.0000");
        assert_eq!(output["gl"], "-10.0000");
        assert_eq!(output["percent"], "-1.00");
    }

    #[test]
    fn test_recompute_json_unknown_mode() {
        let engine = RecalculationEngine::new();

        assert_eq!(
            engine.recompute_json(&json!({ "mode": "invoice" })),
            Err(CalcError::UnknownMode("invoice".to_string()))
        );
        assert_eq!(
            engine.recompute_json(&json!({ "reed": 10 })),
            Err(CalcError::UnknownMode(String::new()))
        );
    }

    #[test]
    fn test_set_field_json() {
        let engine = RecalculationEngine::new();
        let output = engine
            .set_field_json(
                &json!({ "mode": "costing", "reed": 64, "pick": 60 }),
                "required_meters",
                &json!("1000"),
            )
            .unwrap();

        assert_eq!(output["total_yarn_kg"], "56.00");
        assert_eq!(output["required_bags"], "2");
    }

    #[test]
    fn test_batch_preserves_order() {
        let engine = RecalculationEngine::new();
        let records: Vec<Record> = (1..=20)
            .map(|reed| {
                Record::from(ContractRecord::new(
                    ConstructionSpec::new()
                        .with_reed(Decimal::from(reed))
                        .with_width(d("800")),
                    RateSpec::new(),
                ))
            })
            .collect();

        let results = engine.recompute_batch(&records);

        assert_eq!(results.len(), 20);
        for (i, record) in results.iter().enumerate() {
            let contract = record.as_contract().unwrap();
            assert_eq!(contract.spec.reed, Some(Decimal::from(i as i64 + 1)));
            assert_eq!(contract.derived(), engine.recompute_contract(contract).derived());
        }
    }

    fn optional_decimal() -> impl Strategy<Value = Option<Decimal>> {
        prop::option::of(
            (0u64..1_000_000_000, 0u32..6).prop_map(|(m, s)| Decimal::new(m as i64, s)),
        )
    }

    /// 涵蓋到 `Decimal::MAX` 的任意非負值
    fn any_decimal() -> impl Strategy<Value = Decimal> {
        prop_oneof![
            (0u64..1_000_000, 0u32..4).prop_map(|(m, s)| Decimal::new(m as i64, s)),
            (any::<u32>(), any::<u32>(), any::<u32>(), 0u32..=28)
                .prop_map(|(lo, mid, hi, scale)| Decimal::from_parts(lo, mid, hi, false, scale)),
            Just(Decimal::MAX),
        ]
    }

    fn any_optional_decimal() -> impl Strategy<Value = Option<Decimal>> {
        prop::option::of(any_decimal())
    }

    fn fixed_scale(values: &[Decimal], dp: u32) -> bool {
        values.iter().all(|v| v.scale() == dp)
    }

    proptest! {
        #[test]
        fn sizing_recompute_is_total_and_idempotent(
            values in prop::collection::vec(any_optional_decimal(), SizingSpec::FIELDS.len()),
        ) {
            let engine = RecalculationEngine::new();
            let mut spec = SizingSpec::new();
            for (field, value) in SizingSpec::FIELDS.iter().zip(values) {
                if let Some(slot) = spec.slot_mut(field) {
                    *slot = value;
                }
            }
            let record = Record::from(SizingRecord::new(spec.clone()));

            let once = engine.recompute(&record);
            prop_assert_eq!(&once, &engine.recompute(&once));

            let d = once.as_sizing().unwrap().derived();
            prop_assert!(fixed_scale(
                &[
                    d.weight_per_meter_warp_sizing(),
                    d.weight_per_meter_weft_sizing(),
                    d.total_warp_weft(),
                    d.total_weight(),
                    d.blended_poly(),
                    d.blended_cotton(),
                    d.amount(),
                    d.warp_amount(),
                    d.weft_amount(),
                    d.total_amount(),
                ],
                4,
            ));

            let warp_amount = spec
                .warp_bags_quantity
                .unwrap_or_default()
                .checked_mul(spec.warp_rate.unwrap_or_default());
            prop_assert_eq!(d.warp_amount(), RoundingPolicy::round4_or_zero(warp_amount));
            prop_assert_eq!(
                d.total_amount(),
                RoundingPolicy::round4_or_zero(d.warp_amount().checked_add(d.weft_amount()))
            );
        }

        #[test]
        fn costing_recompute_is_total_and_idempotent(
            reed in any_optional_decimal(),
            pick in any_optional_decimal(),
            required_meters in any_optional_decimal(),
        ) {
            let engine = RecalculationEngine::new();
            let input = CostingInput { reed, pick, required_meters };
            let record = Record::from(CostingRecord::new(input));

            let once = engine.recompute(&record);
            prop_assert_eq!(&once, &engine.recompute(&once));

            let e = once.as_costing().unwrap().estimate();
            prop_assert!(fixed_scale(&[e.warp_consumption(), e.weft_consumption()], 4));
            prop_assert!(fixed_scale(&[e.total_yarn_kg(), e.estimated_cost()], 2));
            prop_assert!(e.required_bags().fract().is_zero());
            prop_assert!(e.required_bags() >= Decimal::ZERO);

            let cost = e.total_yarn_kg().checked_mul(engine.costing_config().unit_price);
            prop_assert_eq!(e.estimated_cost(), RoundingPolicy::round2_or_zero(cost));
        }

        #[test]
        fn return_recompute_is_total_and_idempotent(
            fresh in any_optional_decimal(),
            bg in any_optional_decimal(),
            cp in any_optional_decimal(),
            planned_total in any_optional_decimal(),
        ) {
            let engine = RecalculationEngine::new();
            let input = ReturnInput { fresh, bg, cp, planned_total };
            let record = Record::from(ReturnRecord::new(input));

            let once = engine.recompute(&record);
            prop_assert_eq!(&once, &engine.recompute(&once));

            let d = once.as_return().unwrap().derived();
            prop_assert!(fixed_scale(&[d.total(), d.gl()], 4));
            if let Some(percent) = d.percent() {
                prop_assert_eq!(percent.scale(), 2);
            }

            // 任一加項溢位時合計整體歸零，不會只剩部分加總
            let sum = fresh
                .unwrap_or_default()
                .checked_add(bg.unwrap_or_default())
                .and_then(|s| s.checked_add(cp.unwrap_or_default()));
            prop_assert_eq!(d.total(), RoundingPolicy::round4_or_zero(sum));
        }

        #[test]
        fn contract_recompute_is_total_and_idempotent(
            reed in optional_decimal(),
            pick in optional_decimal(),
            warp in optional_decimal(),
            weft in optional_decimal(),
            width in optional_decimal(),
            quantity in optional_decimal(),
            rate_warp in optional_decimal(),
            conv in optional_decimal(),
        ) {
            let engine = RecalculationEngine::new();
            let spec = ConstructionSpec { reed, pick, warp, weft, width, quantity };
            let rates = RateSpec { rate_warp, conv_charges_per_pick: conv, ..RateSpec::default() };
            let record = Record::from(ContractRecord::new(spec, rates));

            let once = engine.recompute(&record);
            let twice = engine.recompute(&once);
            prop_assert_eq!(&once, &twice);

            let derived = once.as_contract().unwrap().derived();
            let bags = derived.total_bags_req_warp() + derived.total_bags_req_weft();
            prop_assert_eq!(
                derived.total_bags_required(),
                RoundingPolicy::round4(bags)
            );
        }

        #[test]
        fn return_percent_blank_without_baseline(
            fresh in optional_decimal(),
            bg in optional_decimal(),
        ) {
            let engine = RecalculationEngine::new();
            let input = ReturnInput { fresh, bg, ..Default::default() };
            let record = engine.recompute_return(&ReturnRecord::new(input));

            prop_assert_eq!(record.derived().percent(), None);
            prop_assert_eq!(record.derived().gl(), record.derived().total());
        }
    }
}
