//! 合約成本試算示例

use rust_decimal::Decimal;
use textile::{
    CostingEstimator, CostingInput, Draft, RecalculationEngine, RecordMode, RoundingPolicy,
};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_max_level(tracing::Level::DEBUG).init();

    println!("=== 合約成本試算示例 ===\n");

    let engine = RecalculationEngine::new();
    let mut draft = Draft::open(&engine, RecordMode::Contract);

    // 逐欄輸入，如同在表單中編輯
    for (field, value) in [
        ("reed", "100"),
        ("pick", "80"),
        ("width", "60"),
        ("warp", "40"),
        ("weft", "20"),
        ("quantity", "5000"),
        ("rate_warp", "350.5"),
        ("rate_weft", "300"),
        ("conv_charges_per_pick", "0.15"),
    ] {
        draft.edit(field, value)?;
    }

    // 不合法的輸入被拒絕，記錄保持原值
    if let Err(err) = draft.edit("pick", "8.0.1") {
        println!("輸入被拒絕: {}\n", err);
    }

    let record = draft.submit();
    let contract = record
        .as_contract()
        .ok_or_else(|| anyhow::anyhow!("預期合約記錄"))?;
    let derived = contract.derived();

    println!("推導數量:");
    println!(
        "  每米紗重 經/緯: {} / {}",
        derived.weight_per_meter_warp(),
        derived.weight_per_meter_weft()
    );
    println!(
        "  所需袋數 經/緯: {} / {}",
        derived.total_bags_req_warp(),
        derived.total_bags_req_weft()
    );
    println!("  所需袋數合計: {}", derived.total_bags_required());
    println!("  每 40 米紗值合計: {}", derived.total_yarn_value());
    println!("  每 40 米加工費: {}", derived.conv_charges_per_40_meter());

    let estimate = CostingEstimator::estimate(
        &CostingInput::new(Decimal::from(64), Decimal::from(60), Decimal::from(1000)),
        engine.costing_config(),
    );
    println!("\n快速粗估 (64 x 60, 1000 米):");
    println!("  紗線公斤數: {}", RoundingPolicy::format2(estimate.total_yarn_kg()));
    println!("  所需袋數: {}", estimate.required_bags());
    println!("  估算成本: {}", RoundingPolicy::format2(estimate.estimated_cost()));

    println!("\nJSON:\n{}", serde_json::to_string_pretty(&record)?);

    Ok(())
}
