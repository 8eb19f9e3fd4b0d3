//! 合約推導欄位與公式順序

use rust_decimal::Decimal;
use serde::Serialize;

use crate::bags::BagCalculator;
use crate::pipeline::Step;
use crate::record::ContractRecord;
use crate::value::ValueCalculator;
use crate::weight::WeightCalculator;

/// 合約推導欄位
///
/// 全部由織物規格與單價推導，不提供寫入方法。
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DerivedQuantities {
    pub(crate) weight_per_meter_warp: Decimal,
    pub(crate) weight_per_meter_weft: Decimal,
    pub(crate) total_bags_req_warp: Decimal,
    pub(crate) total_bags_req_weft: Decimal,
    pub(crate) total_bags_required: Decimal,
    pub(crate) weight_per_40_meter_warp: Decimal,
    pub(crate) weight_per_40_meter_weft: Decimal,
    pub(crate) value_yarn_per_40_warp: Decimal,
    pub(crate) value_yarn_per_40_weft: Decimal,
    pub(crate) total_yarn_value: Decimal,
    pub(crate) conv_charges_per_meter: Decimal,
    pub(crate) conv_charges_per_40_meter: Decimal,
}

impl DerivedQuantities {
    /// 推導欄位（依計算順序）
    pub const FIELDS: &'static [&'static str] = &[
        "weight_per_meter_warp",
        "weight_per_meter_weft",
        "total_bags_req_warp",
        "total_bags_req_weft",
        "total_bags_required",
        "weight_per_40_meter_warp",
        "weight_per_40_meter_weft",
        "value_yarn_per_40_warp",
        "value_yarn_per_40_weft",
        "conv_charges_per_meter",
        "conv_charges_per_40_meter",
        "total_yarn_value",
    ];

    pub fn weight_per_meter_warp(&self) -> Decimal {
        self.weight_per_meter_warp
    }

    pub fn weight_per_meter_weft(&self) -> Decimal {
        self.weight_per_meter_weft
    }

    pub fn total_bags_req_warp(&self) -> Decimal {
        self.total_bags_req_warp
    }

    pub fn total_bags_req_weft(&self) -> Decimal {
        self.total_bags_req_weft
    }

    pub fn total_bags_required(&self) -> Decimal {
        self.total_bags_required
    }

    pub fn weight_per_40_meter_warp(&self) -> Decimal {
        self.weight_per_40_meter_warp
    }

    pub fn weight_per_40_meter_weft(&self) -> Decimal {
        self.weight_per_40_meter_weft
    }

    pub fn value_yarn_per_40_warp(&self) -> Decimal {
        self.value_yarn_per_40_warp
    }

    pub fn value_yarn_per_40_weft(&self) -> Decimal {
        self.value_yarn_per_40_weft
    }

    pub fn total_yarn_value(&self) -> Decimal {
        self.total_yarn_value
    }

    pub fn conv_charges_per_meter(&self) -> Decimal {
        self.conv_charges_per_meter
    }

    pub fn conv_charges_per_40_meter(&self) -> Decimal {
        self.conv_charges_per_40_meter
    }
}

/// 合約公式的執行順序：紗重 → 袋數 → 40 米紗重 → 金額 → 合計
pub(crate) const CONTRACT_PIPELINE: &[Step<ContractRecord, ()>] = &[
    Step::new("weight_per_meter_warp", weight_per_meter_warp),
    Step::new("weight_per_meter_weft", weight_per_meter_weft),
    Step::new("total_bags_req_warp", total_bags_req_warp),
    Step::new("total_bags_req_weft", total_bags_req_weft),
    Step::new("total_bags_required", total_bags_required),
    Step::new("weight_per_40_meter_warp", weight_per_40_meter_warp),
    Step::new("weight_per_40_meter_weft", weight_per_40_meter_weft),
    Step::new("value_yarn_per_40_warp", value_yarn_per_40_warp),
    Step::new("value_yarn_per_40_weft", value_yarn_per_40_weft),
    Step::new("conv_charges_per_meter", conv_charges_per_meter),
    Step::new("conv_charges_per_40_meter", conv_charges_per_40_meter),
    Step::new("total_yarn_value", total_yarn_value),
];

fn weight_per_meter_warp(record: &mut ContractRecord, _: &()) {
    record.derived.weight_per_meter_warp = WeightCalculator::warp_per_meter(&record.spec);
}

fn weight_per_meter_weft(record: &mut ContractRecord, _: &()) {
    record.derived.weight_per_meter_weft = WeightCalculator::weft_per_meter(&record.spec);
}

fn total_bags_req_warp(record: &mut ContractRecord, _: &()) {
    record.derived.total_bags_req_warp = BagCalculator::bags_required(
        record.derived.weight_per_meter_warp,
        record.spec.quantity_or_zero(),
    );
}

fn total_bags_req_weft(record: &mut ContractRecord, _: &()) {
    record.derived.total_bags_req_weft = BagCalculator::bags_required(
        record.derived.weight_per_meter_weft,
        record.spec.quantity_or_zero(),
    );
}

fn total_bags_required(record: &mut ContractRecord, _: &()) {
    record.derived.total_bags_required = BagCalculator::total(
        record.derived.total_bags_req_warp,
        record.derived.total_bags_req_weft,
    );
}

fn weight_per_40_meter_warp(record: &mut ContractRecord, _: &()) {
    record.derived.weight_per_40_meter_warp =
        WeightCalculator::per_40_meter(record.derived.weight_per_meter_warp);
}

fn weight_per_40_meter_weft(record: &mut ContractRecord, _: &()) {
    record.derived.weight_per_40_meter_weft =
        WeightCalculator::per_40_meter(record.derived.weight_per_meter_weft);
}

fn value_yarn_per_40_warp(record: &mut ContractRecord, _: &()) {
    record.derived.value_yarn_per_40_warp = ValueCalculator::yarn_value_per_40(
        record.derived.weight_per_40_meter_warp,
        record.rates.rate_warp,
    );
}

fn value_yarn_per_40_weft(record: &mut ContractRecord, _: &()) {
    record.derived.value_yarn_per_40_weft = ValueCalculator::yarn_value_per_40(
        record.derived.weight_per_40_meter_weft,
        record.rates.rate_weft,
    );
}

fn conv_charges_per_meter(record: &mut ContractRecord, _: &()) {
    record.derived.conv_charges_per_meter = ValueCalculator::conv_charges_per_meter(
        record.rates.conv_charges_per_pick,
        record.spec.pick,
    );
}

fn conv_charges_per_40_meter(record: &mut ContractRecord, _: &()) {
    record.derived.conv_charges_per_40_meter =
        ValueCalculator::conv_charges_per_40_meter(record.derived.conv_charges_per_meter);
}

fn total_yarn_value(record: &mut ContractRecord, _: &()) {
    record.derived.total_yarn_value = ValueCalculator::total_yarn_value(
        record.derived.value_yarn_per_40_warp,
        record.derived.value_yarn_per_40_weft,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline;
    use std::str::FromStr;
    use textile_core::{ConstructionSpec, RateSpec};

    fn d(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn computed(spec: ConstructionSpec, rates: RateSpec) -> DerivedQuantities {
        let mut record = ContractRecord::new(spec, rates);
        pipeline::run(CONTRACT_PIPELINE, &mut record, &());
        record.derived().clone()
    }

    #[test]
    fn test_contract_pipeline() {
        let spec = ConstructionSpec::new()
            .with_reed(d("100"))
            .with_pick(d("80"))
            .with_width(d("60"))
            .with_warp(d("40"))
            .with_weft(d("20"))
            .with_quantity(d("5000"));
        let rates = RateSpec::new()
            .with_rate_warp(d("350.5"))
            .with_rate_weft(d("300"))
            .with_conv_charges_per_pick(d("0.15"));

        let derived = computed(spec, rates);

        assert_eq!(derived.weight_per_meter_warp(), d("0.2051"));
        // (80 × 60 × 1.0936) / (20 × 800) = 0.32808
        assert_eq!(derived.weight_per_meter_weft(), d("0.3281"));
        assert_eq!(derived.total_bags_req_warp(), d("10.2550"));
        assert_eq!(derived.total_bags_req_weft(), d("16.4050"));
        assert_eq!(derived.total_bags_required(), d("26.6600"));
        assert_eq!(derived.weight_per_40_meter_warp(), d("8.2040"));
        assert_eq!(derived.weight_per_40_meter_weft(), d("13.1240"));
        assert_eq!(derived.value_yarn_per_40_warp(), d("2875.5020"));
        assert_eq!(derived.value_yarn_per_40_weft(), d("3937.2000"));
        assert_eq!(derived.total_yarn_value(), d("6812.7020"));
        assert_eq!(derived.conv_charges_per_meter(), d("12.0000"));
        assert_eq!(derived.conv_charges_per_40_meter(), d("480.0000"));
    }

    #[test]
    fn test_chained_rounding_uses_stored_intermediate() {
        // 每米紗重 0.32808 先取捨為 0.3281，40 米紗重為 13.124 而非 13.1232
        let spec = ConstructionSpec::new()
            .with_pick(d("80"))
            .with_width(d("60"))
            .with_weft(d("20"));

        let derived = computed(spec, RateSpec::new());
        assert_eq!(derived.weight_per_40_meter_weft(), d("13.1240"));
    }

    #[test]
    fn test_grey_fabric_rate_is_not_derived() {
        let rates = RateSpec::new()
            .with_rate_warp(d("350"))
            .with_grey_fabric_rate(d("99.5"));
        let spec = ConstructionSpec::new().with_reed(d("100")).with_width(d("60"));

        let mut record = ContractRecord::new(spec, rates);
        pipeline::run(CONTRACT_PIPELINE, &mut record, &());

        assert_eq!(record.rates.grey_fabric_rate, Some(d("99.5")));
    }

    #[test]
    fn test_pipeline_covers_every_output_once() {
        let fields: Vec<_> = CONTRACT_PIPELINE.iter().map(|s| s.field).collect();
        assert_eq!(fields, DerivedQuantities::FIELDS);
    }
}
