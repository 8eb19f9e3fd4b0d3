//! 整經/上漿公式

use rust_decimal::Decimal;
use serde::Serialize;
use textile_core::units::{LB_PER_KG, SIZING_LENGTH_DIVISOR, YARD_METER_FACTOR};
use textile_core::{arith, Quality, QualityLookup, RoundingPolicy, SizingSpec};

use crate::pipeline::Step;
use crate::record::SizingRecord;
use crate::weight::WeightCalculator;

/// 整經計算用的織物規格（已解析品質主檔）
#[derive(Debug, Clone, PartialEq)]
pub struct SizingConstruction {
    pub reed: Decimal,
    pub pick: Decimal,
    pub g5: Decimal,
    pub warp_divisor: Decimal,
    pub weft_divisor: Decimal,
}

impl SizingConstruction {
    /// 使用記錄本身輸入的規格
    pub fn from_spec(spec: &SizingSpec) -> Self {
        Self {
            reed: arith::or_zero(spec.reed),
            pick: arith::or_zero(spec.pick),
            g5: arith::or_zero(spec.g5),
            warp_divisor: arith::divisor(spec.warp),
            weft_divisor: arith::divisor(spec.weft),
        }
    }

    /// 使用品質主檔的規格
    pub fn from_quality(quality: &Quality) -> Self {
        Self {
            reed: arith::or_zero(quality.reed),
            pick: arith::or_zero(quality.pick),
            g5: quality.g5_or_width(),
            warp_divisor: arith::divisor(quality.warp),
            weft_divisor: arith::divisor(quality.weft),
        }
    }

    /// 查無品質主檔：經緯重量貢獻為 0
    pub fn missing() -> Self {
        Self {
            reed: Decimal::ZERO,
            pick: Decimal::ZERO,
            g5: Decimal::ZERO,
            warp_divisor: Decimal::ONE,
            weft_divisor: Decimal::ONE,
        }
    }
}

/// 整經/上漿推導結果
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SizingDerived {
    pub(crate) weight_per_meter_warp_sizing: Decimal,
    pub(crate) weight_per_meter_weft_sizing: Decimal,
    pub(crate) total_warp_weft: Decimal,
    pub(crate) total_weight: Decimal,
    pub(crate) blended_poly: Decimal,
    pub(crate) blended_cotton: Decimal,
    pub(crate) amount: Decimal,
    pub(crate) warp_amount: Decimal,
    pub(crate) weft_amount: Decimal,
    pub(crate) total_amount: Decimal,
}

impl SizingDerived {
    /// 推導欄位
    pub const FIELDS: &'static [&'static str] = &[
        "weight_per_meter_warp_sizing",
        "weight_per_meter_weft_sizing",
        "total_warp_weft",
        "total_weight",
        "blended_poly",
        "blended_cotton",
        "amount",
        "warp_amount",
        "weft_amount",
        "total_amount",
    ];

    pub fn weight_per_meter_warp_sizing(&self) -> Decimal {
        self.weight_per_meter_warp_sizing
    }

    pub fn weight_per_meter_weft_sizing(&self) -> Decimal {
        self.weight_per_meter_weft_sizing
    }

    pub fn total_warp_weft(&self) -> Decimal {
        self.total_warp_weft
    }

    /// 整經總重（公斤）
    pub fn total_weight(&self) -> Decimal {
        self.total_weight
    }

    pub fn blended_poly(&self) -> Decimal {
        self.blended_poly
    }

    pub fn blended_cotton(&self) -> Decimal {
        self.blended_cotton
    }

    /// 上漿金額
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn warp_amount(&self) -> Decimal {
        self.warp_amount
    }

    pub fn weft_amount(&self) -> Decimal {
        self.weft_amount
    }

    pub fn total_amount(&self) -> Decimal {
        self.total_amount
    }
}

/// 整經/上漿計算器
pub struct SizingCalculator;

impl SizingCalculator {
    /// 解析計算用規格
    ///
    /// 記錄引用品質代號時以主檔為準；查無主檔時經緯重量以 0 計。
    pub fn resolve<Q: QualityLookup + ?Sized>(
        spec: &SizingSpec,
        qualities: &Q,
    ) -> SizingConstruction {
        match spec.quality_id.as_deref() {
            Some(id) => match qualities.find_quality_by_id(id) {
                Some(quality) => SizingConstruction::from_quality(&quality),
                None => {
                    tracing::warn!("找不到品質主檔 {}，經緯重量以 0 計算", id);
                    SizingConstruction::missing()
                }
            },
            None => SizingConstruction::from_spec(spec),
        }
    }

    /// 整經總重：`(頭份 × 長度) / 786.1 / 支數 / 2.2046 / 1.0936`
    pub fn total_weight(
        wires: Decimal,
        length_set: Decimal,
        yarn_count_divisor: Decimal,
    ) -> Decimal {
        let divisors = [SIZING_LENGTH_DIVISOR, yarn_count_divisor, LB_PER_KG, YARD_METER_FACTOR];
        let weight = arith::mul(wires, length_set)
            .and_then(|product| divisors.into_iter().try_fold(product, arith::div));
        RoundingPolicy::round4_or_zero(weight)
    }

    /// 經緯合計每米重
    pub fn total_warp_weft(warp: Decimal, weft: Decimal) -> Decimal {
        RoundingPolicy::round4_or_zero(arith::add(warp, weft))
    }

    /// 混紡比例：`(經重 × 經比例 + 緯重 × 緯比例) / 經緯合計`
    pub fn blend(
        warp_weight: Decimal,
        weft_weight: Decimal,
        warp_fraction: Decimal,
        weft_fraction: Decimal,
        total_warp_weft: Decimal,
    ) -> Decimal {
        let fraction = || {
            let weighted = arith::add(
                arith::mul(warp_weight, warp_fraction)?,
                arith::mul(weft_weight, weft_fraction)?,
            )?;
            arith::div(weighted, arith::divisor(Some(total_warp_weft)))
        };
        RoundingPolicy::round4_or_zero(fraction())
    }

    /// 金額：`數量 × 單價`
    pub fn amount(quantity: Decimal, rate: Decimal) -> Decimal {
        RoundingPolicy::round4_or_zero(arith::mul(quantity, rate))
    }

    /// 經緯金額合計
    pub fn total_amount(warp_amount: Decimal, weft_amount: Decimal) -> Decimal {
        RoundingPolicy::round4_or_zero(arith::add(warp_amount, weft_amount))
    }
}

/// 整經/上漿公式的執行順序
pub(crate) const SIZING_PIPELINE: &[Step<SizingRecord, SizingConstruction>] = &[
    Step::new("weight_per_meter_warp_sizing", warp_weight_step),
    Step::new("weight_per_meter_weft_sizing", weft_weight_step),
    Step::new("total_warp_weft", total_warp_weft_step),
    Step::new("total_weight", total_weight_step),
    Step::new("blended_poly", blended_poly_step),
    Step::new("blended_cotton", blended_cotton_step),
    Step::new("amount", amount_step),
    Step::new("warp_amount", warp_amount_step),
    Step::new("weft_amount", weft_amount_step),
    Step::new("total_amount", total_amount_step),
];

fn warp_weight_step(record: &mut SizingRecord, c: &SizingConstruction) {
    record.derived.weight_per_meter_warp_sizing =
        WeightCalculator::per_meter(c.reed, c.g5, c.warp_divisor);
}

fn weft_weight_step(record: &mut SizingRecord, c: &SizingConstruction) {
    record.derived.weight_per_meter_weft_sizing =
        WeightCalculator::per_meter(c.pick, c.g5, c.weft_divisor);
}

fn total_warp_weft_step(record: &mut SizingRecord, _c: &SizingConstruction) {
    let d = &record.derived;
    record.derived.total_warp_weft = SizingCalculator::total_warp_weft(
        d.weight_per_meter_warp_sizing,
        d.weight_per_meter_weft_sizing,
    );
}

fn total_weight_step(record: &mut SizingRecord, _c: &SizingConstruction) {
    let spec = &record.spec;
    record.derived.total_weight = SizingCalculator::total_weight(
        arith::or_zero(spec.wires),
        arith::or_zero(spec.length_set),
        arith::divisor(spec.yarn_count_warp),
    );
}

fn blended_poly_step(record: &mut SizingRecord, _c: &SizingConstruction) {
    let d = &record.derived;
    record.derived.blended_poly = SizingCalculator::blend(
        d.weight_per_meter_warp_sizing,
        d.weight_per_meter_weft_sizing,
        arith::or_zero(record.spec.warp_poly),
        arith::or_zero(record.spec.weft_poly),
        d.total_warp_weft,
    );
}

fn blended_cotton_step(record: &mut SizingRecord, _c: &SizingConstruction) {
    let d = &record.derived;
    record.derived.blended_cotton = SizingCalculator::blend(
        d.weight_per_meter_warp_sizing,
        d.weight_per_meter_weft_sizing,
        arith::or_zero(record.spec.warp_cotton),
        arith::or_zero(record.spec.weft_cotton),
        d.total_warp_weft,
    );
}

fn amount_step(record: &mut SizingRecord, _c: &SizingConstruction) {
    record.derived.amount =
        SizingCalculator::amount(record.derived.total_weight, arith::or_zero(record.spec.rate));
}

fn warp_amount_step(record: &mut SizingRecord, _c: &SizingConstruction) {
    record.derived.warp_amount = SizingCalculator::amount(
        arith::or_zero(record.spec.warp_bags_quantity),
        arith::or_zero(record.spec.warp_rate),
    );
}

fn weft_amount_step(record: &mut SizingRecord, _c: &SizingConstruction) {
    record.derived.weft_amount = SizingCalculator::amount(
        arith::or_zero(record.spec.weft_bags_quantity),
        arith::or_zero(record.spec.weft_rate),
    );
}

fn total_amount_step(record: &mut SizingRecord, _c: &SizingConstruction) {
    record.derived.total_amount =
        SizingCalculator::total_amount(record.derived.warp_amount, record.derived.weft_amount);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline;
    use std::str::FromStr;
    use textile_core::{NoQualities, QualityCatalog};

    fn d(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn catalog() -> QualityCatalog {
        QualityCatalog::new().with_quality(
            Quality::new("Q-64X60")
                .with_density(d("64"), d("60"))
                .with_g5(d("63"))
                .with_counts(d("30"), d("30")),
        )
    }

    #[test]
    fn test_total_weight_chain() {
        assert_eq!(
            SizingCalculator::total_weight(d("4000"), d("1000"), d("30")),
            d("70.3514")
        );
    }

    #[test]
    fn test_total_weight_zero_count_clamped() {
        let count = arith::divisor(Some(Decimal::ZERO));
        assert_eq!(
            SizingCalculator::total_weight(d("4000"), d("1000"), count),
            d("2110.5415")
        );
    }

    #[test]
    fn test_blend_without_weight_is_zero() {
        let zero = Decimal::ZERO;
        assert_eq!(SizingCalculator::blend(zero, zero, d("0.65"), d("0.5"), zero), zero);
    }

    #[test]
    fn test_resolve_from_quality() {
        let spec = SizingSpec::new().with_quality_id("Q-64X60");
        let construction = SizingCalculator::resolve(&spec, &catalog());

        assert_eq!(construction.reed, d("64"));
        assert_eq!(construction.g5, d("63"));
        assert_eq!(construction.warp_divisor, d("30"));
    }

    #[test]
    fn test_resolve_missing_quality() {
        let mut spec = SizingSpec::new().with_quality_id("Q-404");
        spec.reed = Some(d("64"));

        assert_eq!(SizingCalculator::resolve(&spec, &NoQualities), SizingConstruction::missing());
    }

    #[test]
    fn test_sizing_pipeline() {
        let mut spec = SizingSpec::new()
            .with_quality_id("Q-64X60")
            .with_warping(d("4000"), d("1000"), d("30"))
            .with_rate(d("12"));
        spec.warp_poly = Some(d("0.65"));
        spec.weft_poly = Some(d("0.5"));
        spec.warp_cotton = Some(d("0.35"));
        spec.weft_cotton = Some(d("0.5"));
        spec.warp_bags_quantity = Some(d("10"));
        spec.warp_rate = Some(d("15000"));
        spec.weft_bags_quantity = Some(d("8"));
        spec.weft_rate = Some(d("14250.5"));

        let construction = SizingCalculator::resolve(&spec, &catalog());
        let mut record = SizingRecord::new(spec);
        pipeline::run(SIZING_PIPELINE, &mut record, &construction);
        let derived = record.derived();

        assert_eq!(derived.weight_per_meter_warp_sizing(), d("0.1837"));
        assert_eq!(derived.weight_per_meter_weft_sizing(), d("0.1722"));
        assert_eq!(derived.total_warp_weft(), d("0.3559"));
        assert_eq!(derived.blended_poly(), d("0.5774"));
        assert_eq!(derived.blended_cotton(), d("0.4226"));
        assert_eq!(derived.total_weight(), d("70.3514"));
        assert_eq!(derived.amount(), d("844.2168"));
        assert_eq!(derived.warp_amount(), d("150000"));
        assert_eq!(derived.weft_amount(), d("114004"));
        assert_eq!(derived.total_amount(), d("264004"));
    }

    #[test]
    fn test_pipeline_covers_every_output_once() {
        let fields: Vec<_> = SIZING_PIPELINE.iter().map(|s| s.field).collect();
        assert_eq!(fields, SizingDerived::FIELDS);
    }
}
